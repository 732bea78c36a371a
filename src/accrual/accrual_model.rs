//! Accrual domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::accrual_errors::AccrualError;
use crate::rules::PurchaseType;

/// One card spend submitted for accrual, in the home currency.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpendEvent {
    pub owner_id: String,
    pub card_id: String,
    pub purchase_type: PurchaseType,
    /// Amount spent, quoted in the home currency.
    pub amount_spent: Decimal,
    /// When the spend happened. Imports may backdate this.
    pub calculation_date: DateTime<Utc>,
    /// Transaction in the host application this spend came from, if any.
    pub source_transaction_id: Option<String>,
}

impl SpendEvent {
    pub fn validate(&self) -> Result<(), AccrualError> {
        if self.owner_id.trim().is_empty() {
            return Err(AccrualError::InvalidSpend(
                "Owner id is required".to_string(),
            ));
        }
        if self.card_id.trim().is_empty() {
            return Err(AccrualError::InvalidSpend(
                "Card id is required".to_string(),
            ));
        }
        if self.amount_spent < Decimal::ZERO {
            return Err(AccrualError::InvalidSpend(format!(
                "Spend amount cannot be negative, got {}",
                self.amount_spent
            )));
        }
        Ok(())
    }
}
