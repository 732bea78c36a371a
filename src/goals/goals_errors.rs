use thiserror::Error;

/// Errors specific to goal tracking.
#[derive(Error, Debug)]
pub enum GoalError {
    /// The card already backs another goal that is not completed yet.
    #[error("Card already linked: {0}")]
    CardAlreadyLinked(String),

    /// The referenced goal does not exist.
    #[error("Goal not found: {0}")]
    NotFound(String),

    /// The goal input failed validation.
    #[error("Invalid goal data: {0}")]
    InvalidData(String),
}
