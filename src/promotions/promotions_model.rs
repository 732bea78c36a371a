//! Promotion catalog domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An airline redemption promotion from the partner catalog.
///
/// The catalog is maintained externally and replaced wholesale on refresh;
/// the engine only reads it when suggesting redemptions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Promotion {
    pub id: String,
    pub airline: String,
    pub destination: Option<String>,
    pub miles_required: Decimal,
    pub benefit_description: Option<String>,
    pub valid_from: NaiveDate,
    pub valid_to: NaiveDate,
    pub is_active: bool,
}

impl Promotion {
    /// Whether the promotion can still be redeemed on `date`: marked active
    /// and not yet expired. The start date is informational only; miles can
    /// be banked toward a promotion before its window opens.
    pub fn is_valid_on(&self, date: NaiveDate) -> bool {
        self.is_active && self.valid_to >= date
    }
}
