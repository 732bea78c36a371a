use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use uuid::Uuid;

use super::rules_errors::RuleError;
use super::rules_grouper::{group_rules_by_card, CardRuleGroup};
use super::rules_model::{MileageRule, NewMileageRule, PurchaseType};
use super::rules_traits::{RuleRepositoryTrait, RuleServiceTrait};
use crate::errors::Result;

/// Service for managing mileage accrual rules.
pub struct RuleService {
    rule_repository: Arc<dyn RuleRepositoryTrait>,
}

impl RuleService {
    pub fn new(rule_repository: Arc<dyn RuleRepositoryTrait>) -> Self {
        Self { rule_repository }
    }
}

#[async_trait]
impl RuleServiceTrait for RuleService {
    fn get_rule(&self, rule_id: &str) -> Result<MileageRule> {
        self.rule_repository.get_rule(rule_id)
    }

    fn get_rules(&self, owner_ids: &[String]) -> Result<Vec<MileageRule>> {
        self.rule_repository.get_rules_by_owner_ids(owner_ids)
    }

    fn find_active_rule(
        &self,
        owner_id: &str,
        card_id: Option<&str>,
        purchase_type: PurchaseType,
    ) -> Result<Option<MileageRule>> {
        Ok(self
            .rule_repository
            .find_rule(owner_id, card_id, purchase_type)?
            .filter(|rule| rule.is_active))
    }

    fn get_card_rule_groups(&self, owner_ids: &[String]) -> Result<Vec<CardRuleGroup>> {
        let rules = self.rule_repository.get_rules_by_owner_ids(owner_ids)?;
        Ok(group_rules_by_card(&rules))
    }

    async fn upsert_rule(&self, new_rule: NewMileageRule) -> Result<MileageRule> {
        new_rule.validate()?;

        let occupant = self.rule_repository.find_rule(
            &new_rule.owner_id,
            new_rule.card_id.as_deref(),
            new_rule.purchase_type,
        )?;

        let now = Utc::now();
        match occupant {
            Some(existing) if existing.is_active => Err(RuleError::DuplicateRule(format!(
                "an active {} rule already exists for this card",
                new_rule.purchase_type
            ))
            .into()),
            Some(existing) => {
                // An inactive occupant is replaced in place so the slot keeps
                // its identity and ledger records stay attached to it.
                debug!(
                    "Replacing inactive {} rule {} for owner {}",
                    existing.purchase_type, existing.id, existing.owner_id
                );
                let replacement = MileageRule {
                    id: existing.id,
                    owner_id: new_rule.owner_id,
                    card_id: new_rule.card_id,
                    bank_name: new_rule.bank_name,
                    card_brand: new_rule.card_brand,
                    purchase_type: new_rule.purchase_type,
                    currency: new_rule.currency,
                    miles_per_unit: new_rule.miles_per_unit,
                    unit_threshold: new_rule.unit_threshold,
                    existing_miles: new_rule.existing_miles,
                    is_active: new_rule.is_active,
                    created_at: existing.created_at,
                    updated_at: now,
                };
                self.rule_repository.update_rule(replacement).await
            }
            None => {
                let rule = MileageRule {
                    id: new_rule
                        .id
                        .unwrap_or_else(|| Uuid::new_v4().to_string()),
                    owner_id: new_rule.owner_id,
                    card_id: new_rule.card_id,
                    bank_name: new_rule.bank_name,
                    card_brand: new_rule.card_brand,
                    purchase_type: new_rule.purchase_type,
                    currency: new_rule.currency,
                    miles_per_unit: new_rule.miles_per_unit,
                    unit_threshold: new_rule.unit_threshold,
                    existing_miles: new_rule.existing_miles,
                    is_active: new_rule.is_active,
                    created_at: now,
                    updated_at: now,
                };
                self.rule_repository.insert_rule(rule).await
            }
        }
    }

    async fn toggle_rules_active(&self, rule_ids: &[String]) -> Result<Vec<MileageRule>> {
        debug!("Toggling activation for {} rules", rule_ids.len());
        self.rule_repository.toggle_rules_active(rule_ids).await
    }

    async fn delete_rules(&self, rule_ids: &[String]) -> Result<usize> {
        self.rule_repository.delete_rules(rule_ids).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use crate::rules::rules_repository::RuleRepository;
    use rust_decimal_macros::dec;

    fn make_service() -> RuleService {
        RuleService::new(Arc::new(RuleRepository::new()))
    }

    fn rule_input(card_id: &str, purchase_type: PurchaseType) -> NewMileageRule {
        NewMileageRule {
            id: None,
            owner_id: "user-1".to_string(),
            card_id: Some(card_id.to_string()),
            bank_name: "Banco Azul".to_string(),
            card_brand: "Visa Infinite".to_string(),
            purchase_type,
            currency: "USD".to_string(),
            miles_per_unit: dec!(2),
            unit_threshold: dec!(1),
            existing_miles: dec!(0),
            is_active: true,
        }
    }

    // ===== Upsert =====

    #[tokio::test]
    async fn test_upsert_inserts_when_slot_is_empty() {
        let service = make_service();

        let rule = service
            .upsert_rule(rule_input("card-1", PurchaseType::Domestic))
            .await
            .unwrap();

        assert!(!rule.id.is_empty());
        assert_eq!(
            service.get_rules(&["user-1".to_string()]).unwrap().len(),
            1
        );
    }

    #[tokio::test]
    async fn test_upsert_rejects_active_duplicate() {
        let service = make_service();
        service
            .upsert_rule(rule_input("card-1", PurchaseType::Domestic))
            .await
            .unwrap();

        let err = service
            .upsert_rule(rule_input("card-1", PurchaseType::Domestic))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Rule(RuleError::DuplicateRule(_))));
    }

    #[tokio::test]
    async fn test_upsert_allows_both_purchase_types_on_one_card() {
        let service = make_service();
        service
            .upsert_rule(rule_input("card-1", PurchaseType::Domestic))
            .await
            .unwrap();
        service
            .upsert_rule(rule_input("card-1", PurchaseType::International))
            .await
            .unwrap();

        assert_eq!(
            service.get_rules(&["user-1".to_string()]).unwrap().len(),
            2
        );
    }

    #[tokio::test]
    async fn test_upsert_replaces_inactive_occupant_in_place() {
        let service = make_service();
        let original = service
            .upsert_rule(rule_input("card-1", PurchaseType::Domestic))
            .await
            .unwrap();
        service
            .toggle_rules_active(&[original.id.clone()])
            .await
            .unwrap();

        let mut replacement_input = rule_input("card-1", PurchaseType::Domestic);
        replacement_input.miles_per_unit = dec!(3);
        let replacement = service.upsert_rule(replacement_input).await.unwrap();

        // Same slot identity, new rate, and only one rule in the store.
        assert_eq!(replacement.id, original.id);
        assert_eq!(replacement.miles_per_unit, dec!(3));
        assert!(replacement.is_active);
        assert_eq!(
            service.get_rules(&["user-1".to_string()]).unwrap().len(),
            1
        );
    }

    #[tokio::test]
    async fn test_upsert_rejects_invalid_input() {
        let service = make_service();
        let mut input = rule_input("card-1", PurchaseType::Domestic);
        input.unit_threshold = dec!(0);

        assert!(service.upsert_rule(input).await.is_err());
    }

    // ===== Lookup =====

    #[tokio::test]
    async fn test_find_active_rule_skips_inactive() {
        let service = make_service();
        let rule = service
            .upsert_rule(rule_input("card-1", PurchaseType::Domestic))
            .await
            .unwrap();

        let found = service
            .find_active_rule("user-1", Some("card-1"), PurchaseType::Domestic)
            .unwrap();
        assert_eq!(found.map(|r| r.id), Some(rule.id.clone()));

        service.toggle_rules_active(&[rule.id]).await.unwrap();
        let found = service
            .find_active_rule("user-1", Some("card-1"), PurchaseType::Domestic)
            .unwrap();
        assert!(found.is_none());
    }

    // ===== Toggle / delete =====

    #[tokio::test]
    async fn test_toggle_flips_whole_batch() {
        let service = make_service();
        let domestic = service
            .upsert_rule(rule_input("card-1", PurchaseType::Domestic))
            .await
            .unwrap();
        let international = service
            .upsert_rule(rule_input("card-1", PurchaseType::International))
            .await
            .unwrap();

        let toggled = service
            .toggle_rules_active(&[domestic.id, international.id])
            .await
            .unwrap();

        assert_eq!(toggled.len(), 2);
        assert!(toggled.iter().all(|rule| !rule.is_active));
    }

    #[tokio::test]
    async fn test_toggle_with_unknown_id_changes_nothing() {
        let service = make_service();
        let rule = service
            .upsert_rule(rule_input("card-1", PurchaseType::Domestic))
            .await
            .unwrap();

        let err = service
            .toggle_rules_active(&[rule.id.clone(), "missing".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Rule(RuleError::NotFound(_))));

        // The known rule kept its state.
        assert!(service.get_rule(&rule.id).unwrap().is_active);
    }

    #[tokio::test]
    async fn test_delete_is_all_or_nothing() {
        let service = make_service();
        let rule = service
            .upsert_rule(rule_input("card-1", PurchaseType::Domestic))
            .await
            .unwrap();

        let err = service
            .delete_rules(&[rule.id.clone(), "missing".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Rule(RuleError::NotFound(_))));
        assert!(service.get_rule(&rule.id).is_ok());

        let deleted = service.delete_rules(&[rule.id]).await.unwrap();
        assert_eq!(deleted, 1);
    }
}
