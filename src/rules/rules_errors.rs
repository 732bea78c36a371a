use thiserror::Error;

/// Errors specific to rule management.
#[derive(Error, Debug)]
pub enum RuleError {
    /// An active rule already occupies the (owner, card, purchase type) slot.
    #[error("Duplicate rule: {0}")]
    DuplicateRule(String),

    /// The referenced rule does not exist.
    #[error("Rule not found: {0}")]
    NotFound(String),

    /// The rule input failed validation.
    #[error("Invalid rule data: {0}")]
    InvalidData(String),
}
