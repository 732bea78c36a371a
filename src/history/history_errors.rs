use thiserror::Error;

/// Errors specific to the history ledger.
#[derive(Error, Debug)]
pub enum HistoryError {
    /// The referenced record does not exist.
    #[error("History record not found: {0}")]
    NotFound(String),

    /// The record input failed validation.
    #[error("Invalid history record: {0}")]
    InvalidData(String),
}
