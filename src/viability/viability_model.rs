//! Goal viability domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::promotions::Promotion;

/// Classification of whether a mileage goal can be reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoalViability {
    /// The target is already met.
    Achievable,
    /// Not met yet, but the current accrual pace reaches it within the
    /// projection horizon (the target date, or the default horizon).
    PartiallyAchievable,
    /// No recent accrual, or the pace lands beyond the horizon.
    NotAchievable,
}

/// Full viability report for one goal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalAnalysis {
    pub goal_id: String,
    pub viability: GoalViability,
    pub current_miles: Decimal,
    pub target_miles: Decimal,
    pub remaining_miles: Decimal,
    /// Average miles earned per month over the lookback window.
    pub monthly_velocity: Decimal,
    /// Whole months until the target at the current pace. `None` when the
    /// goal is already met or nothing is accruing.
    pub estimated_months_to_achieve: Option<u32>,
    pub projected_completion_date: Option<NaiveDate>,
    /// Cheapest redemption the owner's trajectory can reach, if any.
    pub best_promotion: Option<Promotion>,
}
