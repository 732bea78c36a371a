use thiserror::Error;

/// Errors specific to loyalty program balances.
#[derive(Error, Debug)]
pub enum ProgramError {
    /// The referenced balance does not exist.
    #[error("Program balance not found: {0}")]
    NotFound(String),

    /// The balance input failed validation.
    #[error("Invalid program balance: {0}")]
    InvalidData(String),
}
