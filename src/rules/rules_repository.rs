use std::collections::HashSet;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use super::rules_errors::RuleError;
use super::rules_model::{MileageRule, PurchaseType};
use super::rules_traits::RuleRepositoryTrait;
use crate::errors::Result;

/// In-memory rule store keyed by rule id.
///
/// The engine owns rule state for the lifetime of the process; the host
/// application is responsible for loading and persisting it.
pub struct RuleRepository {
    rules: DashMap<String, MileageRule>,
}

impl RuleRepository {
    pub fn new() -> Self {
        Self {
            rules: DashMap::new(),
        }
    }
}

impl Default for RuleRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RuleRepositoryTrait for RuleRepository {
    fn get_rule(&self, rule_id: &str) -> Result<MileageRule> {
        self.rules
            .get(rule_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| RuleError::NotFound(rule_id.to_string()).into())
    }

    fn get_rules_by_owner_ids(&self, owner_ids: &[String]) -> Result<Vec<MileageRule>> {
        let owners: HashSet<&str> = owner_ids.iter().map(|id| id.as_str()).collect();
        let mut rules: Vec<MileageRule> = self
            .rules
            .iter()
            .filter(|entry| owners.contains(entry.value().owner_id.as_str()))
            .map(|entry| entry.value().clone())
            .collect();
        // DashMap iteration order is arbitrary; keep results stable.
        rules.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(rules)
    }

    fn find_rule(
        &self,
        owner_id: &str,
        card_id: Option<&str>,
        purchase_type: PurchaseType,
    ) -> Result<Option<MileageRule>> {
        Ok(self
            .rules
            .iter()
            .find(|entry| {
                let rule = entry.value();
                rule.owner_id == owner_id
                    && rule.card_id.as_deref() == card_id
                    && rule.purchase_type == purchase_type
            })
            .map(|entry| entry.value().clone()))
    }

    async fn insert_rule(&self, rule: MileageRule) -> Result<MileageRule> {
        self.rules.insert(rule.id.clone(), rule.clone());
        Ok(rule)
    }

    async fn update_rule(&self, rule: MileageRule) -> Result<MileageRule> {
        match self.rules.get_mut(&rule.id) {
            Some(mut entry) => {
                *entry.value_mut() = rule.clone();
                Ok(rule)
            }
            None => Err(RuleError::NotFound(rule.id).into()),
        }
    }

    async fn toggle_rules_active(&self, rule_ids: &[String]) -> Result<Vec<MileageRule>> {
        // Validate the whole batch before touching anything.
        for rule_id in rule_ids {
            if !self.rules.contains_key(rule_id) {
                return Err(RuleError::NotFound(rule_id.clone()).into());
            }
        }

        let now = Utc::now();
        let mut toggled = Vec::with_capacity(rule_ids.len());
        for rule_id in rule_ids {
            if let Some(mut entry) = self.rules.get_mut(rule_id) {
                let rule = entry.value_mut();
                rule.is_active = !rule.is_active;
                rule.updated_at = now;
                toggled.push(rule.clone());
            }
        }
        Ok(toggled)
    }

    async fn delete_rules(&self, rule_ids: &[String]) -> Result<usize> {
        for rule_id in rule_ids {
            if !self.rules.contains_key(rule_id) {
                return Err(RuleError::NotFound(rule_id.clone()).into());
            }
        }

        let mut deleted = 0;
        for rule_id in rule_ids {
            if self.rules.remove(rule_id).is_some() {
                deleted += 1;
            }
        }
        Ok(deleted)
    }
}
