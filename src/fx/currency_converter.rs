use std::collections::HashMap;

use rust_decimal::Decimal;

use super::fx_errors::FxError;
use super::fx_model::ExchangeRateEntry;
use super::fx_traits::CurrencyConverterTrait;
use crate::errors::Result;

/// Currency converter backed by a fixed rate snapshot.
///
/// Rates are stored per pair; the inverse of a known pair is derived at
/// construction when no direct rate is supplied for it. Lookups never chain
/// through intermediate currencies: the snapshot is expected to carry every
/// pair the rule set can reference.
pub struct RateSnapshotConverter {
    /// Key: (from_currency, to_currency)
    rates: HashMap<(String, String), Decimal>,
}

impl RateSnapshotConverter {
    /// Builds a converter from snapshot entries.
    ///
    /// Entries with equal source and target currency are ignored. A zero or
    /// negative rate is rejected, since it would silently wipe out or invert
    /// accrued amounts downstream.
    pub fn new(entries: Vec<ExchangeRateEntry>) -> std::result::Result<Self, FxError> {
        let mut rates: HashMap<(String, String), Decimal> = HashMap::new();

        for entry in entries {
            if entry.from_currency == entry.to_currency {
                continue;
            }
            if entry.from_currency.trim().is_empty() || entry.to_currency.trim().is_empty() {
                return Err(FxError::InvalidCurrencyCode(format!(
                    "'{}/{}'",
                    entry.from_currency, entry.to_currency
                )));
            }
            if entry.rate <= Decimal::ZERO {
                return Err(FxError::InvalidRate(format!(
                    "{} for {}/{}",
                    entry.rate, entry.from_currency, entry.to_currency
                )));
            }

            let forward_pair = (entry.from_currency.clone(), entry.to_currency.clone());
            let inverse_pair = (entry.to_currency, entry.from_currency);

            // A direct entry always wins; the derived inverse never
            // overwrites one supplied explicitly.
            rates.insert(forward_pair, entry.rate);
            rates
                .entry(inverse_pair)
                .or_insert(Decimal::ONE / entry.rate);
        }

        Ok(Self { rates })
    }
}

impl CurrencyConverterTrait for RateSnapshotConverter {
    fn convert_currency(
        &self,
        amount: Decimal,
        from_currency: &str,
        to_currency: &str,
    ) -> Result<Decimal> {
        if from_currency == to_currency {
            return Ok(amount);
        }

        let rate = self
            .rates
            .get(&(from_currency.to_string(), to_currency.to_string()))
            .copied()
            .ok_or_else(|| {
                FxError::RateNotFound(format!("{}/{}", from_currency, to_currency))
            })?;

        Ok(amount * rate)
    }
}
