//! File-backed project store.
//!
//! One JSON object holds the project list and the two UI preferences under the keys
//! `gantt-projects`, `gantt-language` and `gantt-theme`. A missing file opens as an empty store
//! with default preferences; nothing touches the disk until [`Store::save`].

use crate::exchange::{ImportMode, merge_imported, next_id};
use crate::i18n::Language;
use crate::model::{Project, ProjectDraft};
use crate::theme::Theme;
use crate::validate::validate_draft;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(rename = "gantt-projects", default)]
    projects: Vec<Project>,
    #[serde(rename = "gantt-language", default)]
    language: Language,
    #[serde(rename = "gantt-theme", default)]
    theme: Theme,
}

#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
    doc: StoreDocument,
}

impl Store {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let doc = match std::fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => StoreDocument::default(),
            Ok(text) => serde_json::from_str(&text)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "store file missing; starting empty");
                StoreDocument::default()
            }
            Err(source) => {
                return Err(Error::StoreIo {
                    path: path.display().to_string(),
                    source,
                });
            }
        };
        Ok(Self { path, doc })
    }

    pub fn save(&self) -> Result<()> {
        let io_err = |source| Error::StoreIo {
            path: self.path.display().to_string(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let text = serde_json::to_string_pretty(&self.doc)?;
        std::fs::write(&self.path, text).map_err(io_err)?;
        tracing::info!(
            path = %self.path.display(),
            projects = self.doc.projects.len(),
            "store saved"
        );
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn projects(&self) -> &[Project] {
        &self.doc.projects
    }

    pub fn project(&self, id: u64) -> Option<&Project> {
        self.doc.projects.iter().find(|p| p.id == id)
    }

    /// Validates `draft` and appends it with a fresh id.
    pub fn add(&mut self, draft: ProjectDraft) -> Result<&Project> {
        validate_draft(&draft)?;
        let id = next_id(&self.doc.projects);
        self.doc.projects.push(Project::from_draft(id, draft));
        let idx = self.doc.projects.len() - 1;
        Ok(&self.doc.projects[idx])
    }

    /// Validates `draft` and replaces the fields of project `id`, keeping its identity.
    pub fn update(&mut self, id: u64, draft: ProjectDraft) -> Result<&Project> {
        validate_draft(&draft)?;
        let slot = self
            .doc
            .projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(Error::ProjectNotFound { id })?;
        *slot = Project::from_draft(id, draft);
        Ok(slot)
    }

    pub fn remove(&mut self, id: u64) -> Result<Project> {
        let idx = self
            .doc
            .projects
            .iter()
            .position(|p| p.id == id)
            .ok_or(Error::ProjectNotFound { id })?;
        Ok(self.doc.projects.remove(idx))
    }

    /// Drops every project. Preferences are kept.
    pub fn clear(&mut self) -> usize {
        let n = self.doc.projects.len();
        self.doc.projects.clear();
        n
    }

    /// Merges already-parsed drafts (see [`crate::exchange::import_projects`]). Returns the
    /// number of projects added.
    pub fn import(&mut self, drafts: Vec<ProjectDraft>, mode: ImportMode) -> usize {
        let n = drafts.len();
        let existing = std::mem::take(&mut self.doc.projects);
        self.doc.projects = merge_imported(existing, drafts, mode);
        n
    }

    pub fn theme(&self) -> Theme {
        self.doc.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.doc.theme = theme;
    }

    pub fn language(&self) -> Language {
        self.doc.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.doc.language = language;
    }
}
