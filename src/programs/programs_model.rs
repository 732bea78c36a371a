//! Loyalty program balance domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::programs_errors::ProgramError;

/// Externally synced balance of a connected loyalty program.
///
/// Program balances form their own pool: they already include transfer
/// bonuses and partner credits the rule engine never saw, so they are
/// summed on their own and never folded into rule-derived goal progress.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MileageProgramBalance {
    pub id: String,
    pub owner_id: String,
    pub program_name: String,
    pub balance_miles: Decimal,
    pub synced_at: DateTime<Utc>,
}

/// Input model for recording a program sync.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewMileageProgramBalance {
    pub id: Option<String>,
    pub owner_id: String,
    pub program_name: String,
    pub balance_miles: Decimal,
}

impl NewMileageProgramBalance {
    pub fn validate(&self) -> Result<(), ProgramError> {
        if self.owner_id.trim().is_empty() {
            return Err(ProgramError::InvalidData(
                "Owner id is required".to_string(),
            ));
        }
        if self.program_name.trim().is_empty() {
            return Err(ProgramError::InvalidData(
                "Program name is required".to_string(),
            ));
        }
        if self.balance_miles < Decimal::ZERO {
            return Err(ProgramError::InvalidData(format!(
                "Balance cannot be negative, got {}",
                self.balance_miles
            )));
        }
        Ok(())
    }
}
