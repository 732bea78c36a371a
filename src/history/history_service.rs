use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Months, Utc};
use log::{debug, warn};
use num_traits::Zero;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::history_model::{MileageHistoryRecord, NewMileageHistoryRecord};
use super::history_traits::{HistoryRepositoryTrait, HistoryServiceTrait};
use crate::constants::DECIMAL_PRECISION;
use crate::errors::Result;

/// Service for the append-only accrual ledger.
pub struct HistoryService {
    history_repository: Arc<dyn HistoryRepositoryTrait>,
}

impl HistoryService {
    pub fn new(history_repository: Arc<dyn HistoryRepositoryTrait>) -> Self {
        Self { history_repository }
    }
}

#[async_trait]
impl HistoryServiceTrait for HistoryService {
    fn get_record(&self, record_id: &str) -> Result<MileageHistoryRecord> {
        self.history_repository.get_record(record_id)
    }

    fn get_records(&self, owner_ids: &[String]) -> Result<Vec<MileageHistoryRecord>> {
        self.history_repository.get_records_by_owner_ids(owner_ids)
    }

    fn get_records_for_card(
        &self,
        owner_id: &str,
        card_id: &str,
    ) -> Result<Vec<MileageHistoryRecord>> {
        self.history_repository
            .get_records_for_card(owner_id, card_id)
    }

    fn sum_miles_for_card(
        &self,
        owner_id: &str,
        card_id: &str,
        since: Option<DateTime<Utc>>,
    ) -> Result<Decimal> {
        let records = self
            .history_repository
            .get_records_for_card(owner_id, card_id)?;
        let total = records
            .iter()
            .filter(|record| match since {
                Some(cutoff) => record.calculation_date >= cutoff,
                None => true,
            })
            .map(|record| record.miles_earned)
            .sum();
        Ok(total)
    }

    fn monthly_velocity(
        &self,
        owner_id: &str,
        card_id: Option<&str>,
        lookback_months: u32,
        as_of: DateTime<Utc>,
    ) -> Result<Decimal> {
        if lookback_months == 0 {
            return Ok(Decimal::ZERO);
        }
        let window_start = match as_of.checked_sub_months(Months::new(lookback_months)) {
            Some(start) => start,
            None => return Ok(Decimal::ZERO),
        };

        let records = match card_id {
            Some(card) => self
                .history_repository
                .get_records_for_card(owner_id, card)?,
            None => self
                .history_repository
                .get_records_by_owner_ids(&[owner_id.to_string()])?,
        };

        let total: Decimal = records
            .iter()
            .filter(|record| {
                record.calculation_date >= window_start && record.calculation_date <= as_of
            })
            .map(|record| record.miles_earned)
            .sum();

        if total.is_zero() {
            return Ok(Decimal::ZERO);
        }
        Ok((total / Decimal::from(lookback_months)).round_dp(DECIMAL_PRECISION))
    }

    async fn append_record(
        &self,
        new_record: NewMileageHistoryRecord,
    ) -> Result<MileageHistoryRecord> {
        new_record.validate()?;

        let record = MileageHistoryRecord {
            id: Uuid::new_v4().to_string(),
            owner_id: new_record.owner_id,
            card_id: new_record.card_id,
            rule_id: new_record.rule_id,
            amount_spent: new_record.amount_spent,
            miles_earned: new_record.miles_earned,
            calculation_date: new_record.calculation_date,
            source_transaction_id: new_record.source_transaction_id,
            created_at: Utc::now(),
        };
        debug!(
            "Appending {} miles for card {} to the ledger",
            record.miles_earned, record.card_id
        );
        self.history_repository.append_record(record).await
    }

    async fn purge_card_history(&self, owner_id: &str, card_id: &str) -> Result<usize> {
        let deleted = self
            .history_repository
            .delete_records_for_card(owner_id, card_id)
            .await?;
        warn!(
            "Purged {} ledger records for card {} of owner {}",
            deleted, card_id, owner_id
        );
        Ok(deleted)
    }
}
