use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::goals_errors::GoalError;
use super::goals_model::{GoalProgress, MileageGoal, NewMileageGoal};
use super::goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
use crate::errors::Result;
use crate::history::HistoryServiceTrait;
use crate::rules::{PurchaseType, RuleRepositoryTrait};

/// Service tracking mileage goals against card accrual.
pub struct GoalService {
    goal_repository: Arc<dyn GoalRepositoryTrait>,
    rule_repository: Arc<dyn RuleRepositoryTrait>,
    history_service: Arc<dyn HistoryServiceTrait>,
}

impl GoalService {
    pub fn new(
        goal_repository: Arc<dyn GoalRepositoryTrait>,
        rule_repository: Arc<dyn RuleRepositoryTrait>,
        history_service: Arc<dyn HistoryServiceTrait>,
    ) -> Self {
        Self {
            goal_repository,
            rule_repository,
            history_service,
        }
    }

    /// Miles a card has produced to date: the pre-engine balance carried on
    /// its domestic rule plus everything in the ledger. The domestic rule
    /// counts even while toggled off, since the balance it carries predates
    /// the engine and does not depend on the rule accruing.
    fn card_miles_to_date(&self, owner_id: &str, card_id: &str) -> Result<Decimal> {
        let opening_balance = self
            .rule_repository
            .find_rule(owner_id, Some(card_id), PurchaseType::Domestic)?
            .map(|rule| rule.existing_miles)
            .unwrap_or(Decimal::ZERO);
        let accrued = self
            .history_service
            .sum_miles_for_card(owner_id, card_id, None)?;
        Ok(opening_balance + accrued)
    }

    async fn recompute(&self, mut goal: MileageGoal) -> Result<MileageGoal> {
        let card_id = match goal.source_card_id.clone() {
            Some(card_id) => card_id,
            // Manual goals keep whatever balance the owner typed in.
            None => return Ok(goal),
        };

        let recomputed = self.card_miles_to_date(&goal.owner_id, &card_id)?;
        debug!(
            "Recomputed goal {}: {} -> {} miles",
            goal.id, goal.current_miles, recomputed
        );
        goal.current_miles = recomputed;
        goal.updated_at = Utc::now();
        self.goal_repository.update_goal(goal).await
    }
}

#[async_trait]
impl GoalServiceTrait for GoalService {
    fn get_goal(&self, goal_id: &str) -> Result<MileageGoal> {
        self.goal_repository.get_goal(goal_id)
    }

    fn get_goals(&self, owner_ids: &[String]) -> Result<Vec<MileageGoal>> {
        self.goal_repository.get_goals_by_owner_ids(owner_ids)
    }

    fn get_goal_progress(&self, goal_id: &str) -> Result<GoalProgress> {
        let goal = self.goal_repository.get_goal(goal_id)?;
        Ok(GoalProgress::from(&goal))
    }

    async fn create_goal(&self, new_goal: NewMileageGoal) -> Result<MileageGoal> {
        new_goal.validate()?;

        let current_miles = match &new_goal.source_card_id {
            Some(card_id) => {
                let linked = self
                    .goal_repository
                    .find_goals_for_card(&new_goal.owner_id, card_id)?;
                if let Some(open_goal) = linked.iter().find(|goal| !goal.is_completed()) {
                    return Err(GoalError::CardAlreadyLinked(format!(
                        "card {} already backs goal '{}'",
                        card_id, open_goal.name
                    ))
                    .into());
                }
                self.card_miles_to_date(&new_goal.owner_id, card_id)?
            }
            None => new_goal.current_miles,
        };

        let now = Utc::now();
        let goal = MileageGoal {
            id: new_goal.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            owner_id: new_goal.owner_id,
            name: new_goal.name,
            description: new_goal.description,
            target_miles: new_goal.target_miles,
            current_miles,
            target_date: new_goal.target_date,
            source_card_id: new_goal.source_card_id,
            created_at: now,
            updated_at: now,
        };
        self.goal_repository.insert_goal(goal).await
    }

    async fn recompute_progress(&self, goal_id: &str) -> Result<MileageGoal> {
        let goal = self.goal_repository.get_goal(goal_id)?;
        self.recompute(goal).await
    }

    async fn recompute_card_goals(
        &self,
        owner_id: &str,
        card_id: &str,
    ) -> Result<Vec<MileageGoal>> {
        let goals = self
            .goal_repository
            .find_goals_for_card(owner_id, card_id)?;

        let mut refreshed = Vec::with_capacity(goals.len());
        for goal in goals {
            refreshed.push(self.recompute(goal).await?);
        }
        Ok(refreshed)
    }

    async fn delete_goal(&self, goal_id: &str) -> Result<usize> {
        self.goal_repository.delete_goal(goal_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use crate::goals::goals_repository::GoalRepository;
    use crate::history::{HistoryRepository, HistoryService, NewMileageHistoryRecord};
    use crate::rules::{MileageRule, RuleRepository};
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    struct Fixture {
        service: GoalService,
        rule_repository: Arc<RuleRepository>,
        history_service: Arc<HistoryService>,
    }

    fn make_fixture() -> Fixture {
        let goal_repository = Arc::new(GoalRepository::new());
        let rule_repository = Arc::new(RuleRepository::new());
        let history_service = Arc::new(HistoryService::new(Arc::new(HistoryRepository::new())));

        Fixture {
            service: GoalService::new(
                goal_repository,
                rule_repository.clone(),
                history_service.clone(),
            ),
            rule_repository,
            history_service,
        }
    }

    fn domestic_rule(card_id: &str, existing_miles: Decimal, is_active: bool) -> MileageRule {
        let now = Utc::now();
        MileageRule {
            id: format!("rule-{}", card_id),
            owner_id: "user-1".to_string(),
            card_id: Some(card_id.to_string()),
            bank_name: "Banco Azul".to_string(),
            card_brand: "Visa Infinite".to_string(),
            purchase_type: PurchaseType::Domestic,
            currency: "USD".to_string(),
            miles_per_unit: dec!(2),
            unit_threshold: dec!(1),
            existing_miles,
            is_active,
            created_at: now,
            updated_at: now,
        }
    }

    fn goal_input(card_id: Option<&str>) -> NewMileageGoal {
        NewMileageGoal {
            id: None,
            owner_id: "user-1".to_string(),
            name: "Tokyo trip".to_string(),
            description: None,
            target_miles: dec!(1000),
            current_miles: dec!(0),
            target_date: None,
            source_card_id: card_id.map(|c| c.to_string()),
        }
    }

    async fn earn(fixture: &Fixture, card_id: &str, miles: Decimal) {
        fixture
            .history_service
            .append_record(NewMileageHistoryRecord {
                owner_id: "user-1".to_string(),
                card_id: card_id.to_string(),
                rule_id: format!("rule-{}", card_id),
                amount_spent: dec!(100),
                miles_earned: miles,
                calculation_date: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
                source_transaction_id: None,
            })
            .await
            .unwrap();
    }

    // ===== Creation =====

    #[tokio::test]
    async fn test_linked_goal_starts_from_card_balance() {
        let fixture = make_fixture();
        fixture
            .rule_repository
            .insert_rule(domestic_rule("card-1", dec!(300), true))
            .await
            .unwrap();
        earn(&fixture, "card-1", dec!(200)).await;

        let goal = fixture
            .service
            .create_goal(goal_input(Some("card-1")))
            .await
            .unwrap();

        assert_eq!(goal.current_miles, dec!(500));
    }

    #[tokio::test]
    async fn test_manual_goal_keeps_supplied_balance() {
        let fixture = make_fixture();
        let mut input = goal_input(None);
        input.current_miles = dec!(250);

        let goal = fixture.service.create_goal(input).await.unwrap();
        assert_eq!(goal.current_miles, dec!(250));
    }

    #[tokio::test]
    async fn test_card_cannot_back_two_open_goals() {
        let fixture = make_fixture();
        fixture
            .service
            .create_goal(goal_input(Some("card-1")))
            .await
            .unwrap();

        let err = fixture
            .service
            .create_goal(goal_input(Some("card-1")))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Goal(GoalError::CardAlreadyLinked(_))
        ));
    }

    #[tokio::test]
    async fn test_card_can_back_new_goal_once_previous_is_completed() {
        let fixture = make_fixture();
        fixture
            .rule_repository
            .insert_rule(domestic_rule("card-1", dec!(1500), true))
            .await
            .unwrap();

        // Opening balance 1500 >= target 1000: born completed.
        let first = fixture
            .service
            .create_goal(goal_input(Some("card-1")))
            .await
            .unwrap();
        assert!(first.is_completed());

        let mut second_input = goal_input(Some("card-1"));
        second_input.target_miles = dec!(5000);
        let second = fixture.service.create_goal(second_input).await.unwrap();
        assert!(!second.is_completed());
    }

    #[tokio::test]
    async fn test_card_can_back_new_goal_once_previous_is_deleted() {
        let fixture = make_fixture();
        let first = fixture
            .service
            .create_goal(goal_input(Some("card-1")))
            .await
            .unwrap();

        assert!(fixture
            .service
            .create_goal(goal_input(Some("card-1")))
            .await
            .is_err());

        fixture.service.delete_goal(&first.id).await.unwrap();
        let second = fixture.service.create_goal(goal_input(Some("card-1"))).await;
        assert!(second.is_ok());
    }

    #[tokio::test]
    async fn test_manual_goals_may_overlap_freely() {
        let fixture = make_fixture();
        fixture.service.create_goal(goal_input(None)).await.unwrap();
        let second = fixture.service.create_goal(goal_input(None)).await;
        assert!(second.is_ok());
    }

    // ===== Recompute =====

    #[tokio::test]
    async fn test_recompute_rederives_from_ledger() {
        let fixture = make_fixture();
        fixture
            .rule_repository
            .insert_rule(domestic_rule("card-1", dec!(300), true))
            .await
            .unwrap();
        let goal = fixture
            .service
            .create_goal(goal_input(Some("card-1")))
            .await
            .unwrap();
        assert_eq!(goal.current_miles, dec!(300));

        earn(&fixture, "card-1", dec!(200)).await;
        let refreshed = fixture.service.recompute_progress(&goal.id).await.unwrap();
        assert_eq!(refreshed.current_miles, dec!(500));

        // Idempotent: a second pass lands on the same value.
        let again = fixture.service.recompute_progress(&goal.id).await.unwrap();
        assert_eq!(again.current_miles, dec!(500));
    }

    #[tokio::test]
    async fn test_recompute_counts_inactive_domestic_rule_balance() {
        let fixture = make_fixture();
        fixture
            .rule_repository
            .insert_rule(domestic_rule("card-1", dec!(300), false))
            .await
            .unwrap();
        let goal = fixture
            .service
            .create_goal(goal_input(Some("card-1")))
            .await
            .unwrap();

        let refreshed = fixture.service.recompute_progress(&goal.id).await.unwrap();
        assert_eq!(refreshed.current_miles, dec!(300));
    }

    #[tokio::test]
    async fn test_recompute_leaves_manual_goal_alone() {
        let fixture = make_fixture();
        let mut input = goal_input(None);
        input.current_miles = dec!(250);
        let goal = fixture.service.create_goal(input).await.unwrap();

        earn(&fixture, "card-1", dec!(9999)).await;
        let refreshed = fixture.service.recompute_progress(&goal.id).await.unwrap();
        assert_eq!(refreshed.current_miles, dec!(250));
    }

    #[tokio::test]
    async fn test_recompute_card_goals_touches_only_that_card() {
        let fixture = make_fixture();
        let first = fixture
            .service
            .create_goal(goal_input(Some("card-1")))
            .await
            .unwrap();
        let mut other_input = goal_input(Some("card-2"));
        other_input.name = "Lisbon trip".to_string();
        let other = fixture.service.create_goal(other_input).await.unwrap();

        earn(&fixture, "card-1", dec!(400)).await;
        let refreshed = fixture
            .service
            .recompute_card_goals("user-1", "card-1")
            .await
            .unwrap();

        assert_eq!(refreshed.len(), 1);
        assert_eq!(refreshed[0].id, first.id);
        assert_eq!(refreshed[0].current_miles, dec!(400));
        assert_eq!(
            fixture.service.get_goal(&other.id).unwrap().current_miles,
            dec!(0)
        );
    }

    // ===== Progress =====

    #[tokio::test]
    async fn test_goal_progress_read_model() {
        let fixture = make_fixture();
        let mut input = goal_input(None);
        input.current_miles = dec!(300);
        let goal = fixture.service.create_goal(input).await.unwrap();

        let progress = fixture.service.get_goal_progress(&goal.id).unwrap();
        assert_eq!(progress.current_miles, dec!(300));
        assert_eq!(progress.remaining_miles, dec!(700));
        assert_eq!(progress.progress_percent, dec!(30));
        assert!(!progress.is_completed);
    }

    #[tokio::test]
    async fn test_delete_goal() {
        let fixture = make_fixture();
        let goal = fixture.service.create_goal(goal_input(None)).await.unwrap();

        assert_eq!(fixture.service.delete_goal(&goal.id).await.unwrap(), 1);
        assert!(fixture.service.get_goal(&goal.id).is_err());
    }
}
