use std::collections::HashSet;

use async_trait::async_trait;
use dashmap::DashMap;

use super::goals_errors::GoalError;
use super::goals_model::MileageGoal;
use super::goals_traits::GoalRepositoryTrait;
use crate::errors::Result;

/// In-memory goal store keyed by goal id.
pub struct GoalRepository {
    goals: DashMap<String, MileageGoal>,
}

impl GoalRepository {
    pub fn new() -> Self {
        Self {
            goals: DashMap::new(),
        }
    }
}

impl Default for GoalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GoalRepositoryTrait for GoalRepository {
    fn get_goal(&self, goal_id: &str) -> Result<MileageGoal> {
        self.goals
            .get(goal_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| GoalError::NotFound(goal_id.to_string()).into())
    }

    fn get_goals_by_owner_ids(&self, owner_ids: &[String]) -> Result<Vec<MileageGoal>> {
        let owners: HashSet<&str> = owner_ids.iter().map(|id| id.as_str()).collect();
        let mut goals: Vec<MileageGoal> = self
            .goals
            .iter()
            .filter(|entry| owners.contains(entry.value().owner_id.as_str()))
            .map(|entry| entry.value().clone())
            .collect();
        goals.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(goals)
    }

    fn find_goals_for_card(&self, owner_id: &str, card_id: &str) -> Result<Vec<MileageGoal>> {
        let mut goals: Vec<MileageGoal> = self
            .goals
            .iter()
            .filter(|entry| {
                let goal = entry.value();
                goal.owner_id == owner_id && goal.source_card_id.as_deref() == Some(card_id)
            })
            .map(|entry| entry.value().clone())
            .collect();
        goals.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(goals)
    }

    async fn insert_goal(&self, goal: MileageGoal) -> Result<MileageGoal> {
        self.goals.insert(goal.id.clone(), goal.clone());
        Ok(goal)
    }

    async fn update_goal(&self, goal: MileageGoal) -> Result<MileageGoal> {
        match self.goals.get_mut(&goal.id) {
            Some(mut entry) => {
                *entry.value_mut() = goal.clone();
                Ok(goal)
            }
            None => Err(GoalError::NotFound(goal.id).into()),
        }
    }

    async fn delete_goal(&self, goal_id: &str) -> Result<usize> {
        match self.goals.remove(goal_id) {
            Some(_) => Ok(1),
            None => Err(GoalError::NotFound(goal_id.to_string()).into()),
        }
    }
}
