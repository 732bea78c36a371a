use std::sync::Arc;

use rust_decimal::Decimal;

use super::accrual_errors::AccrualError;
use crate::errors::Result;
use crate::fx::CurrencyConverterTrait;
use crate::rules::MileageRule;

/// Computes miles earned for a spend under a rule.
///
/// Spend arrives in the home currency and is first converted into the
/// currency the rule's rate is quoted in. The result is always rounded
/// down to a whole mile: partial units never earn, and re-running the
/// same spend can never credit more than it did the first time.
pub struct AccrualCalculator {
    converter: Arc<dyn CurrencyConverterTrait>,
    home_currency: String,
}

impl AccrualCalculator {
    pub fn new(converter: Arc<dyn CurrencyConverterTrait>, home_currency: String) -> Self {
        Self {
            converter,
            home_currency,
        }
    }

    pub fn home_currency(&self) -> &str {
        &self.home_currency
    }

    /// Miles for `amount_spent` (home currency) under `rule`:
    /// `floor(converted / unit_threshold * miles_per_unit)`.
    pub fn compute_miles(&self, amount_spent: Decimal, rule: &MileageRule) -> Result<Decimal> {
        if !rule.is_active {
            return Err(AccrualError::InvalidRule(format!("rule {} is inactive", rule.id)).into());
        }
        if rule.unit_threshold <= Decimal::ZERO {
            return Err(AccrualError::InvalidRule(format!(
                "rule {} has a non-positive unit threshold",
                rule.id
            ))
            .into());
        }

        let converted = if rule.currency == self.home_currency {
            amount_spent
        } else {
            self.converter
                .convert_currency(amount_spent, &self.home_currency, &rule.currency)?
        };

        let miles = converted / rule.unit_threshold * rule.miles_per_unit;
        Ok(miles.floor())
    }
}
