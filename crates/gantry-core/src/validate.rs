use crate::i18n::{Language, Message};
use crate::model::ProjectDraft;
use crate::{Error, Result};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    StartDate,
    EndDate,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::StartDate => "startDate",
            Field::EndDate => "endDate",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum IssueKind {
    NameRequired,
    DateRequired,
    EndBeforeStart,
}

impl IssueKind {
    pub fn message(self) -> Message {
        match self {
            IssueKind::NameRequired => Message::NameRequired,
            IssueKind::DateRequired => Message::DateRequired,
            IssueKind::EndBeforeStart => Message::EndBeforeStart,
        }
    }
}

/// One rejected form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ValidationIssue {
    pub field: Field,
    pub kind: IssueKind,
}

impl ValidationIssue {
    pub fn localized(&self, language: Language) -> &'static str {
        language.text(self.kind.message())
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.field.as_str(),
            self.localized(Language::En)
        )
    }
}

/// Checks a draft against the form rules and returns every violated rule.
///
/// A missing pair of dates flags both date fields. An end date before the start date is
/// reported on the end field.
pub fn check_draft(draft: &ProjectDraft) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    if draft.name.trim().is_empty() {
        issues.push(ValidationIssue {
            field: Field::Name,
            kind: IssueKind::NameRequired,
        });
    }
    match (draft.start_date, draft.end_date) {
        (None, None) => {
            for field in [Field::StartDate, Field::EndDate] {
                issues.push(ValidationIssue {
                    field,
                    kind: IssueKind::DateRequired,
                });
            }
        }
        (Some(start), Some(end)) if start > end => issues.push(ValidationIssue {
            field: Field::EndDate,
            kind: IssueKind::EndBeforeStart,
        }),
        _ => {}
    }
    issues
}

pub fn validate_draft(draft: &ProjectDraft) -> Result<()> {
    let issues = check_draft(draft);
    if issues.is_empty() {
        Ok(())
    } else {
        Err(Error::Validation { issues })
    }
}
