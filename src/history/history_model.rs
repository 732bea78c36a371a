//! Mileage history domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::history_errors::HistoryError;

/// Domain model representing one accrual event in the ledger.
///
/// Records are append-only: once written they are never updated, and a
/// later rule change never rewrites what was earned under the old rate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MileageHistoryRecord {
    pub id: String,
    pub owner_id: String,
    pub card_id: String,
    /// Rule the miles were computed under. Kept for audit even after the
    /// rule itself is replaced or deleted.
    pub rule_id: String,
    /// Spend amount in the home currency, as submitted.
    pub amount_spent: Decimal,
    pub miles_earned: Decimal,
    /// When the spend happened (may be backdated by imports).
    pub calculation_date: DateTime<Utc>,
    /// Transaction in the host application this accrual came from, if any.
    pub source_transaction_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input model for appending a ledger record.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewMileageHistoryRecord {
    pub owner_id: String,
    pub card_id: String,
    pub rule_id: String,
    pub amount_spent: Decimal,
    pub miles_earned: Decimal,
    pub calculation_date: DateTime<Utc>,
    pub source_transaction_id: Option<String>,
}

impl NewMileageHistoryRecord {
    pub fn validate(&self) -> Result<(), HistoryError> {
        if self.owner_id.trim().is_empty() {
            return Err(HistoryError::InvalidData(
                "Owner id is required".to_string(),
            ));
        }
        if self.card_id.trim().is_empty() {
            return Err(HistoryError::InvalidData(
                "Card id is required".to_string(),
            ));
        }
        if self.rule_id.trim().is_empty() {
            return Err(HistoryError::InvalidData(
                "Rule id is required".to_string(),
            ));
        }
        if self.miles_earned < Decimal::ZERO {
            return Err(HistoryError::InvalidData(format!(
                "Miles earned cannot be negative, got {}",
                self.miles_earned
            )));
        }
        Ok(())
    }
}
