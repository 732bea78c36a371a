use thiserror::Error;

/// Errors specific to currency conversion.
#[derive(Error, Debug)]
pub enum FxError {
    /// No rate is known for the requested currency pair.
    #[error("Exchange rate not found: {0}")]
    RateNotFound(String),

    /// A supplied rate cannot be used (zero or negative).
    #[error("Invalid exchange rate: {0}")]
    InvalidRate(String),

    /// A currency code failed basic validation.
    #[error("Invalid currency code: {0}")]
    InvalidCurrencyCode(String),
}
