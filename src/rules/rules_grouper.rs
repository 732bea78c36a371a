//! Groups an owner's rules into display units, one per physical card.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::rules_model::{MileageRule, PurchaseType};

/// Combined activation state of a card's rule pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GroupActivation {
    Active,
    PartiallyActive,
    Inactive,
}

/// Per-purchase-type rate summary inside a card group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleRateSummary {
    pub rule_id: String,
    pub purchase_type: PurchaseType,
    pub currency: String,
    pub miles_per_unit: Decimal,
    pub unit_threshold: Decimal,
    pub is_active: bool,
}

/// One physical card with its accrual rules folded together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRuleGroup {
    pub owner_id: String,
    pub card_id: Option<String>,
    pub bank_name: String,
    pub card_brand: String,
    pub activation: GroupActivation,
    /// Pre-engine balance summed across members. Only the domestic member
    /// should carry one, but the sum does not rely on that.
    pub existing_miles: Decimal,
    pub rates: Vec<RuleRateSummary>,
}

/// Folds rules into card groups.
///
/// Rules pair by (owner, card id); rules without a card id fall back to
/// (owner, bank name, card brand) so legacy imports still collapse into a
/// single display unit. Output order is stable across calls.
pub fn group_rules_by_card(rules: &[MileageRule]) -> Vec<CardRuleGroup> {
    let mut grouped: BTreeMap<GroupKey, Vec<&MileageRule>> = BTreeMap::new();
    for rule in rules {
        grouped.entry(group_key(rule)).or_default().push(rule);
    }

    grouped
        .into_values()
        .map(|mut members| {
            members.sort_by_key(|rule| rule.purchase_type);
            build_group(&members)
        })
        .collect()
}

/// Grouping key: (owner, card id, bank fallback, brand fallback). The
/// fallback components are only populated when the card id is missing.
type GroupKey = (String, Option<String>, String, String);

fn group_key(rule: &MileageRule) -> GroupKey {
    match &rule.card_id {
        Some(card_id) => (
            rule.owner_id.clone(),
            Some(card_id.clone()),
            String::new(),
            String::new(),
        ),
        None => (
            rule.owner_id.clone(),
            None,
            rule.bank_name.clone(),
            rule.card_brand.clone(),
        ),
    }
}

fn build_group(members: &[&MileageRule]) -> CardRuleGroup {
    let first = members[0];

    let active_count = members.iter().filter(|rule| rule.is_active).count();
    let activation = if active_count == members.len() {
        GroupActivation::Active
    } else if active_count == 0 {
        GroupActivation::Inactive
    } else {
        GroupActivation::PartiallyActive
    };

    let existing_miles = members.iter().map(|rule| rule.existing_miles).sum();

    let rates = members
        .iter()
        .map(|rule| RuleRateSummary {
            rule_id: rule.id.clone(),
            purchase_type: rule.purchase_type,
            currency: rule.currency.clone(),
            miles_per_unit: rule.miles_per_unit,
            unit_threshold: rule.unit_threshold,
            is_active: rule.is_active,
        })
        .collect();

    CardRuleGroup {
        owner_id: first.owner_id.clone(),
        card_id: first.card_id.clone(),
        bank_name: first.bank_name.clone(),
        card_brand: first.card_brand.clone(),
        activation,
        existing_miles,
        rates,
    }
}
