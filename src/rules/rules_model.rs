//! Mileage rule domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::rules_errors::RuleError;

pub const PURCHASE_TYPE_DOMESTIC: &str = "DOMESTIC";
pub const PURCHASE_TYPE_INTERNATIONAL: &str = "INTERNATIONAL";

/// Enum representing the two accrual regimes a card can carry.
///
/// Domestic and international purchases on the same physical card earn at
/// independent rates, so they are modeled as separate rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PurchaseType {
    Domestic,
    International,
}

impl PurchaseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PurchaseType::Domestic => PURCHASE_TYPE_DOMESTIC,
            PurchaseType::International => PURCHASE_TYPE_INTERNATIONAL,
        }
    }
}

impl FromStr for PurchaseType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            s if s == PURCHASE_TYPE_DOMESTIC => Ok(PurchaseType::Domestic),
            s if s == PURCHASE_TYPE_INTERNATIONAL => Ok(PurchaseType::International),
            _ => Err(format!("Unknown purchase type: {}", s)),
        }
    }
}

impl fmt::Display for PurchaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Domain model representing one accrual rule.
///
/// At most one rule exists per (owner, card, purchase type); the domestic
/// rule additionally carries the card's pre-engine mileage balance in
/// `existing_miles`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MileageRule {
    pub id: String,
    pub owner_id: String,
    /// Card the rule is attached to. `None` for rules imported before cards
    /// became first-class records.
    pub card_id: Option<String>,
    pub bank_name: String,
    pub card_brand: String,
    pub purchase_type: PurchaseType,
    /// Currency the rate is quoted in (spend is converted into it first).
    pub currency: String,
    /// Miles earned per threshold unit of converted spend.
    pub miles_per_unit: Decimal,
    /// Converted-spend amount that earns `miles_per_unit` miles.
    pub unit_threshold: Decimal,
    /// Mileage balance the card already had when the rule was created.
    /// Tracked on the domestic rule only.
    pub existing_miles: Decimal,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input model for creating or replacing a rule.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewMileageRule {
    pub id: Option<String>,
    pub owner_id: String,
    pub card_id: Option<String>,
    pub bank_name: String,
    pub card_brand: String,
    pub purchase_type: PurchaseType,
    pub currency: String,
    pub miles_per_unit: Decimal,
    pub unit_threshold: Decimal,
    #[serde(default)]
    pub existing_miles: Decimal,
    pub is_active: bool,
}

impl NewMileageRule {
    /// Validates the rule input before it reaches the store.
    pub fn validate(&self) -> Result<(), RuleError> {
        if self.owner_id.trim().is_empty() {
            return Err(RuleError::InvalidData("Owner id is required".to_string()));
        }
        if self.bank_name.trim().is_empty() {
            return Err(RuleError::InvalidData("Bank name is required".to_string()));
        }
        if self.card_brand.trim().is_empty() {
            return Err(RuleError::InvalidData("Card brand is required".to_string()));
        }
        if self.currency.trim().is_empty() {
            return Err(RuleError::InvalidData(
                "Rule currency is required".to_string(),
            ));
        }
        if self.miles_per_unit <= Decimal::ZERO {
            return Err(RuleError::InvalidData(format!(
                "Miles per unit must be positive, got {}",
                self.miles_per_unit
            )));
        }
        if self.unit_threshold <= Decimal::ZERO {
            return Err(RuleError::InvalidData(format!(
                "Unit threshold must be positive, got {}",
                self.unit_threshold
            )));
        }
        if self.existing_miles < Decimal::ZERO {
            return Err(RuleError::InvalidData(format!(
                "Existing miles cannot be negative, got {}",
                self.existing_miles
            )));
        }
        if self.purchase_type == PurchaseType::International
            && self.existing_miles > Decimal::ZERO
        {
            return Err(RuleError::InvalidData(
                "Existing miles are tracked on the domestic rule only".to_string(),
            ));
        }
        Ok(())
    }
}
