use thiserror::Error;

/// Errors specific to accrual calculation.
#[derive(Error, Debug)]
pub enum AccrualError {
    /// Miles were requested under a rule that cannot accrue: switched off,
    /// or carrying a non-positive unit threshold.
    #[error("Invalid rule: {0}")]
    InvalidRule(String),

    /// The spend event failed validation.
    #[error("Invalid spend event: {0}")]
    InvalidSpend(String),

    /// The spend's owner is not visible in the resolved scope.
    #[error("Owner not in scope: {0}")]
    OwnerNotInScope(String),
}
