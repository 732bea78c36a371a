use async_trait::async_trait;

use crate::errors::Result;
use crate::goals::goals_model::{GoalProgress, MileageGoal, NewMileageGoal};

/// Trait for goal repository operations
#[async_trait]
pub trait GoalRepositoryTrait: Send + Sync {
    fn get_goal(&self, goal_id: &str) -> Result<MileageGoal>;
    fn get_goals_by_owner_ids(&self, owner_ids: &[String]) -> Result<Vec<MileageGoal>>;
    fn find_goals_for_card(&self, owner_id: &str, card_id: &str) -> Result<Vec<MileageGoal>>;
    async fn insert_goal(&self, goal: MileageGoal) -> Result<MileageGoal>;
    async fn update_goal(&self, goal: MileageGoal) -> Result<MileageGoal>;
    async fn delete_goal(&self, goal_id: &str) -> Result<usize>;
}

/// Trait for goal service operations
#[async_trait]
pub trait GoalServiceTrait: Send + Sync {
    fn get_goal(&self, goal_id: &str) -> Result<MileageGoal>;
    fn get_goals(&self, owner_ids: &[String]) -> Result<Vec<MileageGoal>>;
    fn get_goal_progress(&self, goal_id: &str) -> Result<GoalProgress>;
    async fn create_goal(&self, new_goal: NewMileageGoal) -> Result<MileageGoal>;
    /// Re-derives `current_miles` from the goal's source card. Safe to call
    /// repeatedly; goals without a source card are returned unchanged.
    async fn recompute_progress(&self, goal_id: &str) -> Result<MileageGoal>;
    /// Recomputes every goal fed by the given card.
    async fn recompute_card_goals(
        &self,
        owner_id: &str,
        card_id: &str,
    ) -> Result<Vec<MileageGoal>>;
    async fn delete_goal(&self, goal_id: &str) -> Result<usize>;
}
