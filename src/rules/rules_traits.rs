use async_trait::async_trait;

use crate::errors::Result;
use crate::rules::rules_grouper::CardRuleGroup;
use crate::rules::rules_model::{MileageRule, NewMileageRule, PurchaseType};

/// Trait for rule repository operations
#[async_trait]
pub trait RuleRepositoryTrait: Send + Sync {
    fn get_rule(&self, rule_id: &str) -> Result<MileageRule>;
    fn get_rules_by_owner_ids(&self, owner_ids: &[String]) -> Result<Vec<MileageRule>>;
    /// Looks up the single occupant of an (owner, card, purchase type) slot,
    /// active or not.
    fn find_rule(
        &self,
        owner_id: &str,
        card_id: Option<&str>,
        purchase_type: PurchaseType,
    ) -> Result<Option<MileageRule>>;
    async fn insert_rule(&self, rule: MileageRule) -> Result<MileageRule>;
    async fn update_rule(&self, rule: MileageRule) -> Result<MileageRule>;
    /// Flips `is_active` on every listed rule as one unit. No rule changes
    /// when any id is unknown.
    async fn toggle_rules_active(&self, rule_ids: &[String]) -> Result<Vec<MileageRule>>;
    /// Deletes every listed rule as one unit. No rule is removed when any id
    /// is unknown.
    async fn delete_rules(&self, rule_ids: &[String]) -> Result<usize>;
}

/// Trait for rule service operations
#[async_trait]
pub trait RuleServiceTrait: Send + Sync {
    fn get_rule(&self, rule_id: &str) -> Result<MileageRule>;
    fn get_rules(&self, owner_ids: &[String]) -> Result<Vec<MileageRule>>;
    fn find_active_rule(
        &self,
        owner_id: &str,
        card_id: Option<&str>,
        purchase_type: PurchaseType,
    ) -> Result<Option<MileageRule>>;
    fn get_card_rule_groups(&self, owner_ids: &[String]) -> Result<Vec<CardRuleGroup>>;
    async fn upsert_rule(&self, new_rule: NewMileageRule) -> Result<MileageRule>;
    async fn toggle_rules_active(&self, rule_ids: &[String]) -> Result<Vec<MileageRule>>;
    async fn delete_rules(&self, rule_ids: &[String]) -> Result<usize>;
}
