use rust_decimal::Decimal;

use crate::errors::Result;

/// Trait defining the contract for currency conversion.
///
/// The accrual pipeline is agnostic of where rates come from; the host
/// application injects an implementation (live rates, cached snapshot, ...).
/// Implementations must return the amount unchanged when both currency codes
/// are equal.
pub trait CurrencyConverterTrait: Send + Sync {
    fn convert_currency(
        &self,
        amount: Decimal,
        from_currency: &str,
        to_currency: &str,
    ) -> Result<Decimal>;
}
