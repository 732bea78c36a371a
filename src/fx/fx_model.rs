use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One entry of a point-in-time exchange rate snapshot.
///
/// `rate` is the multiplier applied to an amount in `from_currency` to
/// express it in `to_currency`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRateEntry {
    pub from_currency: String,
    pub to_currency: String,
    pub rate: Decimal,
}

impl ExchangeRateEntry {
    pub fn new(
        from_currency: impl Into<String>,
        to_currency: impl Into<String>,
        rate: Decimal,
    ) -> Self {
        Self {
            from_currency: from_currency.into(),
            to_currency: to_currency.into(),
            rate,
        }
    }
}
