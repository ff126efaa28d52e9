use crate::validate::ValidationIssue;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid date `{value}`: expected YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("Unknown view mode `{value}` (expected day, week or month)")]
    InvalidViewMode { value: String },

    #[error("Unknown project type `{value}` (expected feature, bugfix, milestone or release)")]
    InvalidProjectKind { value: String },

    #[error("Unknown theme `{value}` (expected light, dark, blue, green or purple)")]
    InvalidTheme { value: String },

    #[error("Unknown language `{value}` (expected en or zh)")]
    InvalidLanguage { value: String },

    #[error("Project is invalid: {}", format_issues(.issues))]
    Validation { issues: Vec<ValidationIssue> },

    #[error("Invalid import data: {message}")]
    InvalidImport { message: String },

    #[error("No project with id {id}")]
    ProjectNotFound { id: u64 },

    #[error("Store I/O error ({path}): {source}")]
    StoreIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn format_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
