use thiserror::Error;

/// Error type that captures common ledger failures.
///
/// Duplicate names carry their own variants so callers can offer an edit
/// flow instead of treating every insert failure the same way.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Category `{0}` already exists")]
    DuplicateCategory(String),
    #[error("A goal for `{0}` is already set")]
    DuplicateGoal(String),
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Storage error: {0}")]
    Storage(String),
}
