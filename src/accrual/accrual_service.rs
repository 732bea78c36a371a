use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};

use super::accrual_calculator::AccrualCalculator;
use super::accrual_errors::AccrualError;
use super::accrual_model::SpendEvent;
use crate::errors::Result;
use crate::goals::GoalServiceTrait;
use crate::history::{HistoryServiceTrait, MileageHistoryRecord, NewMileageHistoryRecord};
use crate::rules::{RuleError, RuleServiceTrait};
use crate::scope::ResolvedScope;

/// Trait for the accrual pipeline.
#[async_trait]
pub trait AccrualServiceTrait: Send + Sync {
    /// Runs one spend through the pipeline: resolve the active rule, compute
    /// miles, append to the ledger, and refresh goals fed by the card.
    async fn record_spend(
        &self,
        scope: &ResolvedScope,
        spend: SpendEvent,
    ) -> Result<MileageHistoryRecord>;
}

/// Orchestrates spend events across rules, ledger, and goals.
pub struct AccrualService {
    rule_service: Arc<dyn RuleServiceTrait>,
    history_service: Arc<dyn HistoryServiceTrait>,
    goal_service: Arc<dyn GoalServiceTrait>,
    calculator: AccrualCalculator,
}

impl AccrualService {
    pub fn new(
        rule_service: Arc<dyn RuleServiceTrait>,
        history_service: Arc<dyn HistoryServiceTrait>,
        goal_service: Arc<dyn GoalServiceTrait>,
        calculator: AccrualCalculator,
    ) -> Self {
        Self {
            rule_service,
            history_service,
            goal_service,
            calculator,
        }
    }
}

#[async_trait]
impl AccrualServiceTrait for AccrualService {
    async fn record_spend(
        &self,
        scope: &ResolvedScope,
        spend: SpendEvent,
    ) -> Result<MileageHistoryRecord> {
        spend.validate()?;
        if !scope.includes(&spend.owner_id) {
            return Err(AccrualError::OwnerNotInScope(spend.owner_id).into());
        }

        let rule = self
            .rule_service
            .find_active_rule(&spend.owner_id, Some(&spend.card_id), spend.purchase_type)?
            .ok_or_else(|| {
                RuleError::NotFound(format!(
                    "no active {} rule for card {}",
                    spend.purchase_type, spend.card_id
                ))
            })?;

        let miles_earned = self.calculator.compute_miles(spend.amount_spent, &rule)?;
        debug!(
            "Spend of {} {} on card {} earns {} miles under rule {}",
            spend.amount_spent,
            self.calculator.home_currency(),
            spend.card_id,
            miles_earned,
            rule.id
        );

        let record = self
            .history_service
            .append_record(NewMileageHistoryRecord {
                owner_id: spend.owner_id.clone(),
                card_id: spend.card_id.clone(),
                rule_id: rule.id,
                amount_spent: spend.amount_spent,
                miles_earned,
                calculation_date: spend.calculation_date,
                source_transaction_id: spend.source_transaction_id,
            })
            .await?;

        let refreshed = self
            .goal_service
            .recompute_card_goals(&spend.owner_id, &spend.card_id)
            .await?;
        if !refreshed.is_empty() {
            info!(
                "Recomputed {} goal(s) after accrual on card {}",
                refreshed.len(),
                spend.card_id
            );
        }

        Ok(record)
    }
}
