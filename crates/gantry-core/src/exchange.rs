//! JSON exchange format for sharing project lists.
//!
//! Export writes a flat `[{ "id", "name", "start", "end" }]` array. Import is lenient about
//! field names (`start`/`startDate`, `end`/`endDate`) but strict about content: every item must
//! carry a name and at least one date, otherwise nothing is imported.

use crate::date::{format_optional_date, parse_optional_date};
use crate::model::{Project, ProjectDraft, ProjectKind};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRecord {
    pub id: u64,
    pub name: String,
    /// `YYYY-MM-DD`, or `""` when unset.
    pub start: String,
    pub end: String,
}

impl From<&Project> for ExportRecord {
    fn from(p: &Project) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
            start: format_optional_date(p.start_date),
            end: format_optional_date(p.end_date),
        }
    }
}

/// Pretty-printed (two-space indented) export document.
pub fn export_projects(projects: &[Project]) -> Result<String> {
    let records: Vec<ExportRecord> = projects.iter().map(ExportRecord::from).collect();
    Ok(serde_json::to_string_pretty(&records)?)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportMode {
    #[default]
    Replace,
    Append,
}

impl FromStr for ImportMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "replace" => Ok(Self::Replace),
            "append" => Ok(Self::Append),
            other => Err(Error::InvalidImport {
                message: format!("unknown import mode `{other}`"),
            }),
        }
    }
}

/// Parses an exchange document into drafts. Identities in the document are ignored; the
/// caller assigns fresh ones (see [`merge_imported`]).
pub fn import_projects(text: &str) -> Result<Vec<ProjectDraft>> {
    let doc: Value = serde_json::from_str(text)?;
    let Value::Array(items) = doc else {
        return Err(Error::InvalidImport {
            message: "expected a JSON array of projects".to_string(),
        });
    };

    items
        .iter()
        .enumerate()
        .map(|(idx, item)| import_item(item).map_err(|message| Error::InvalidImport {
            message: format!("item {idx}: {message}"),
        }))
        .collect()
}

fn import_item(item: &Value) -> std::result::Result<ProjectDraft, String> {
    let text = |keys: &[&str]| {
        keys.iter()
            .filter_map(|k| item.get(*k).and_then(Value::as_str))
            .find(|s| !s.is_empty())
            .unwrap_or_default()
    };

    let name = text(&["name"]);
    if name.trim().is_empty() {
        return Err("missing project name".to_string());
    }
    let date = |keys: &[&str]| parse_optional_date(text(keys)).map_err(|e| e.to_string());
    let start_date = date(&["start", "startDate"])?;
    let end_date = date(&["end", "endDate"])?;
    if start_date.is_none() && end_date.is_none() {
        return Err(format!("project `{name}` has neither a start nor an end date"));
    }

    let description = Some(text(&["description"]))
        .filter(|s| !s.is_empty())
        .map(str::to_string);
    Ok(ProjectDraft {
        name: name.to_string(),
        kind: ProjectKind::Feature,
        start_date,
        end_date,
        description,
        color: None,
    })
}

/// Gives imported drafts fresh ids (one past the largest id in use) and either replaces or
/// extends `existing`.
pub fn merge_imported(
    existing: Vec<Project>,
    imported: Vec<ProjectDraft>,
    mode: ImportMode,
) -> Vec<Project> {
    let mut out = match mode {
        ImportMode::Replace => Vec::new(),
        ImportMode::Append => existing,
    };
    let mut next = next_id(&out);
    for draft in imported {
        out.push(Project::from_draft(next, draft));
        next = next.saturating_add(1);
    }
    out
}

/// One past the largest id in `projects`, starting at 1.
pub fn next_id(projects: &[Project]) -> u64 {
    projects
        .iter()
        .map(|p| p.id)
        .max()
        .map_or(1, |m| m.saturating_add(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn export_uses_the_flat_exchange_shape() {
        let projects = vec![
            Project::new(1, "Design").with_dates(Some(d(2025, 1, 3)), Some(d(2025, 1, 5))),
            Project::new(2, "Someday"),
        ];
        let text = export_projects(&projects).unwrap();
        assert!(text.starts_with("[\n  {\n    \"id\": 1,"), "{text}");
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            value,
            json!([
                { "id": 1, "name": "Design", "start": "2025-01-03", "end": "2025-01-05" },
                { "id": 2, "name": "Someday", "start": "", "end": "" }
            ])
        );
    }

    #[test]
    fn import_accepts_both_field_spellings() {
        let text = json!([
            { "id": 99, "name": "A", "start": "2025-02-01", "end": "2025-02-03", "type": "release" },
            { "name": "B", "startDate": "2025-03-01", "description": "notes" },
            { "name": "C", "start": "", "endDate": "2025-04-01" }
        ])
        .to_string();
        let drafts = import_projects(&text).unwrap();
        assert_eq!(drafts.len(), 3);
        assert_eq!(drafts[0].kind, ProjectKind::Feature);
        assert_eq!(drafts[1].start_date, Some(d(2025, 3, 1)));
        assert_eq!(drafts[1].description.as_deref(), Some("notes"));
        assert_eq!(drafts[2].start_date, None);
        assert_eq!(drafts[2].end_date, Some(d(2025, 4, 1)));
    }

    #[test]
    fn import_rejects_the_whole_document_on_one_bad_item() {
        let no_dates = json!([
            { "name": "ok", "start": "2025-01-01" },
            { "name": "undated" }
        ])
        .to_string();
        let err = import_projects(&no_dates).unwrap_err();
        assert!(matches!(err, Error::InvalidImport { .. }), "{err}");

        let no_name = json!([{ "start": "2025-01-01" }]).to_string();
        assert!(import_projects(&no_name).is_err());

        assert!(import_projects(r#"{"name":"x"}"#).is_err());
        assert!(import_projects("not json").is_err());
        assert!(import_projects(r#"[{"name":"x","start":"01/02/2025"}]"#).is_err());
    }

    #[test]
    fn merge_assigns_fresh_ids() {
        let existing = vec![Project::new(4, "a"), Project::new(9, "b")];
        let drafts = vec![ProjectDraft::new("x"), ProjectDraft::new("y")];

        let appended = merge_imported(existing.clone(), drafts.clone(), ImportMode::Append);
        let ids: Vec<u64> = appended.iter().map(|p| p.id).collect();
        assert_eq!(ids, [4, 9, 10, 11]);

        let replaced = merge_imported(existing, drafts, ImportMode::Replace);
        let ids: Vec<u64> = replaced.iter().map(|p| p.id).collect();
        assert_eq!(ids, [1, 2]);
    }

    #[test]
    fn exported_documents_import_cleanly() {
        let projects = vec![
            Project::new(1, "Design").with_dates(Some(d(2025, 1, 3)), None),
            Project::new(2, "QA").with_dates(None, Some(d(2025, 1, 9))),
        ];
        let drafts = import_projects(&export_projects(&projects).unwrap()).unwrap();
        let names: Vec<&str> = drafts.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Design", "QA"]);
        assert_eq!(drafts[1].end_date, Some(d(2025, 1, 9)));
    }
}
