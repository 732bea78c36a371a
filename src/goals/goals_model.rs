//! Goal domain models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::goals_errors::GoalError;
use crate::constants::DISPLAY_DECIMAL_PRECISION;

/// Domain model representing a mileage goal.
///
/// `current_miles` is a cached projection of the card's ledger (plus the
/// pre-engine balance); it is recomputed from source, never incremented.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MileageGoal {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub description: Option<String>,
    pub target_miles: Decimal,
    pub current_miles: Decimal,
    /// Deadline the owner wants the miles by, if any.
    pub target_date: Option<NaiveDate>,
    /// Card feeding this goal. `None` for goals tracked by hand.
    pub source_card_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MileageGoal {
    pub fn is_completed(&self) -> bool {
        self.current_miles >= self.target_miles
    }

    pub fn remaining_miles(&self) -> Decimal {
        (self.target_miles - self.current_miles).max(Decimal::ZERO)
    }

    /// Progress toward the target, capped at 100.
    pub fn progress_percent(&self) -> Decimal {
        if self.target_miles <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        ((self.current_miles / self.target_miles).min(Decimal::ONE) * Decimal::ONE_HUNDRED)
            .round_dp(DISPLAY_DECIMAL_PRECISION)
    }
}

/// Input model for creating a new goal.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewMileageGoal {
    pub id: Option<String>,
    pub owner_id: String,
    pub name: String,
    pub description: Option<String>,
    pub target_miles: Decimal,
    /// Starting balance for goals without a source card. Ignored for linked
    /// goals, whose balance always comes from the card itself.
    #[serde(default)]
    pub current_miles: Decimal,
    pub target_date: Option<NaiveDate>,
    pub source_card_id: Option<String>,
}

impl NewMileageGoal {
    pub fn validate(&self) -> Result<(), GoalError> {
        if self.owner_id.trim().is_empty() {
            return Err(GoalError::InvalidData("Owner id is required".to_string()));
        }
        if self.name.trim().is_empty() {
            return Err(GoalError::InvalidData("Goal name is required".to_string()));
        }
        if self.target_miles <= Decimal::ZERO {
            return Err(GoalError::InvalidData(format!(
                "Target miles must be positive, got {}",
                self.target_miles
            )));
        }
        if self.current_miles < Decimal::ZERO {
            return Err(GoalError::InvalidData(format!(
                "Current miles cannot be negative, got {}",
                self.current_miles
            )));
        }
        Ok(())
    }
}

/// Read model summarizing a goal's progress for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    pub goal_id: String,
    pub name: String,
    pub current_miles: Decimal,
    pub target_miles: Decimal,
    pub remaining_miles: Decimal,
    pub progress_percent: Decimal,
    pub is_completed: bool,
}

impl From<&MileageGoal> for GoalProgress {
    fn from(goal: &MileageGoal) -> Self {
        Self {
            goal_id: goal.id.clone(),
            name: goal.name.clone(),
            current_miles: goal.current_miles,
            target_miles: goal.target_miles,
            remaining_miles: goal.remaining_miles(),
            progress_percent: goal.progress_percent(),
            is_completed: goal.is_completed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn goal_with(current: Decimal, target: Decimal) -> MileageGoal {
        let now = Utc::now();
        MileageGoal {
            id: "goal-1".to_string(),
            owner_id: "user-1".to_string(),
            name: "Tokyo trip".to_string(),
            description: None,
            target_miles: target,
            current_miles: current,
            target_date: None,
            source_card_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_progress_percent_rounds_for_display() {
        let goal = goal_with(dec!(1), dec!(3));
        assert_eq!(goal.progress_percent(), dec!(33.33));
    }

    #[test]
    fn test_progress_percent_caps_at_one_hundred() {
        let goal = goal_with(dec!(4500), dec!(3000));
        assert_eq!(goal.progress_percent(), dec!(100));
        assert!(goal.is_completed());
        assert_eq!(goal.remaining_miles(), Decimal::ZERO);
    }

    #[test]
    fn test_remaining_miles() {
        let goal = goal_with(dec!(300), dec!(1000));
        assert_eq!(goal.remaining_miles(), dec!(700));
        assert!(!goal.is_completed());
    }

    #[test]
    fn test_validate_rejects_non_positive_target() {
        let input = NewMileageGoal {
            id: None,
            owner_id: "user-1".to_string(),
            name: "Tokyo trip".to_string(),
            description: None,
            target_miles: dec!(0),
            current_miles: dec!(0),
            target_date: None,
            source_card_id: None,
        };
        assert!(matches!(input.validate(), Err(GoalError::InvalidData(_))));
    }
}
