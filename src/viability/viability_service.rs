use std::sync::Arc;

use chrono::{DateTime, Months, NaiveDate, Utc};
use num_traits::ToPrimitive;
use rust_decimal::Decimal;

use super::viability_model::{GoalAnalysis, GoalViability};
use crate::constants::{DEFAULT_PROJECTION_HORIZON_MONTHS, DEFAULT_VELOCITY_LOOKBACK_MONTHS};
use crate::errors::Result;
use crate::goals::{GoalRepositoryTrait, MileageGoal};
use crate::history::HistoryServiceTrait;
use crate::promotions::{Promotion, PromotionRepositoryTrait};

/// Trait for goal viability analysis.
pub trait ViabilityServiceTrait: Send + Sync {
    fn analyze_goal(&self, goal_id: &str, as_of: DateTime<Utc>) -> Result<GoalAnalysis>;
    fn analyze_goals(
        &self,
        owner_ids: &[String],
        as_of: DateTime<Utc>,
    ) -> Result<Vec<GoalAnalysis>>;
}

/// Projects goal completion from recent accrual pace and suggests the best
/// reachable promotion.
pub struct ViabilityService {
    goal_repository: Arc<dyn GoalRepositoryTrait>,
    history_service: Arc<dyn HistoryServiceTrait>,
    promotion_repository: Arc<dyn PromotionRepositoryTrait>,
    velocity_lookback_months: u32,
}

impl ViabilityService {
    pub fn new(
        goal_repository: Arc<dyn GoalRepositoryTrait>,
        history_service: Arc<dyn HistoryServiceTrait>,
        promotion_repository: Arc<dyn PromotionRepositoryTrait>,
    ) -> Self {
        Self {
            goal_repository,
            history_service,
            promotion_repository,
            velocity_lookback_months: DEFAULT_VELOCITY_LOOKBACK_MONTHS,
        }
    }

    pub fn with_lookback_months(mut self, months: u32) -> Self {
        self.velocity_lookback_months = months;
        self
    }

    fn analyze(&self, goal: &MileageGoal, as_of: DateTime<Utc>) -> Result<GoalAnalysis> {
        let today = as_of.date_naive();
        let velocity = self.history_service.monthly_velocity(
            &goal.owner_id,
            goal.source_card_id.as_deref(),
            self.velocity_lookback_months,
            as_of,
        )?;
        let remaining = goal.remaining_miles();

        // Nothing left to optimize: no estimate, no suggestion.
        if goal.is_completed() {
            return Ok(GoalAnalysis {
                goal_id: goal.id.clone(),
                viability: GoalViability::Achievable,
                current_miles: goal.current_miles,
                target_miles: goal.target_miles,
                remaining_miles: remaining,
                monthly_velocity: velocity,
                estimated_months_to_achieve: None,
                projected_completion_date: None,
                best_promotion: None,
            });
        }

        let best_promotion = self.best_promotion(goal, velocity, today)?;

        let estimated_months = if velocity > Decimal::ZERO {
            Some(
                (remaining / velocity)
                    .ceil()
                    .to_u32()
                    .unwrap_or(u32::MAX),
            )
        } else {
            None
        };
        let projected_completion_date = estimated_months
            .and_then(|months| today.checked_add_months(Months::new(months)));

        let horizon = match goal.target_date {
            Some(date) => date,
            None => today
                .checked_add_months(Months::new(DEFAULT_PROJECTION_HORIZON_MONTHS))
                .unwrap_or(NaiveDate::MAX),
        };
        let viability = match projected_completion_date {
            Some(projected) if projected <= horizon => GoalViability::PartiallyAchievable,
            _ => GoalViability::NotAchievable,
        };

        Ok(GoalAnalysis {
            goal_id: goal.id.clone(),
            viability,
            current_miles: goal.current_miles,
            target_miles: goal.target_miles,
            remaining_miles: remaining,
            monthly_velocity: velocity,
            estimated_months_to_achieve: estimated_months,
            projected_completion_date,
            best_promotion,
        })
    }

    /// Candidates need `miles_required` within the goal's target and must be
    /// reachable: outright with the miles already accrued, or eventually at
    /// a positive pace. Cheapest wins; earlier expiry breaks ties.
    fn best_promotion(
        &self,
        goal: &MileageGoal,
        velocity: Decimal,
        today: NaiveDate,
    ) -> Result<Option<Promotion>> {
        let mut candidates: Vec<Promotion> = self
            .promotion_repository
            .get_valid_promotions(today)?
            .into_iter()
            .filter(|promotion| promotion.miles_required <= goal.target_miles)
            .filter(|promotion| {
                velocity > Decimal::ZERO || promotion.miles_required <= goal.current_miles
            })
            .collect();

        candidates.sort_by(|a, b| {
            a.miles_required
                .cmp(&b.miles_required)
                .then(a.valid_to.cmp(&b.valid_to))
        });
        Ok(candidates.into_iter().next())
    }
}

impl ViabilityServiceTrait for ViabilityService {
    fn analyze_goal(&self, goal_id: &str, as_of: DateTime<Utc>) -> Result<GoalAnalysis> {
        let goal = self.goal_repository.get_goal(goal_id)?;
        self.analyze(&goal, as_of)
    }

    fn analyze_goals(
        &self,
        owner_ids: &[String],
        as_of: DateTime<Utc>,
    ) -> Result<Vec<GoalAnalysis>> {
        let goals = self.goal_repository.get_goals_by_owner_ids(owner_ids)?;
        goals.iter().map(|goal| self.analyze(goal, as_of)).collect()
    }
}
