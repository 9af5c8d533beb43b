#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("invalid field update: {0}")]
    InvalidUpdate(String),
    #[error("invalid record: {0}")]
    InvalidRecord(String),
}

/// Structured check result for `cg check --json`.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CheckReport {
    pub file: String,
    pub pass: bool,
    pub errors: Vec<CheckIssue>,
    pub warnings: Vec<CheckIssue>,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct CheckIssue {
    pub code: String,
    pub check: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}
