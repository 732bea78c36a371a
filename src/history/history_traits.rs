use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::errors::Result;
use crate::history::history_model::{MileageHistoryRecord, NewMileageHistoryRecord};

/// Trait for history repository operations.
///
/// The ledger is append-only: there is deliberately no update operation,
/// and deletion exists only as an administrative purge per card.
#[async_trait]
pub trait HistoryRepositoryTrait: Send + Sync {
    fn get_record(&self, record_id: &str) -> Result<MileageHistoryRecord>;
    fn get_records_by_owner_ids(&self, owner_ids: &[String]) -> Result<Vec<MileageHistoryRecord>>;
    fn get_records_for_card(
        &self,
        owner_id: &str,
        card_id: &str,
    ) -> Result<Vec<MileageHistoryRecord>>;
    async fn append_record(&self, record: MileageHistoryRecord) -> Result<MileageHistoryRecord>;
    async fn delete_records_for_card(&self, owner_id: &str, card_id: &str) -> Result<usize>;
}

/// Trait for history service operations
#[async_trait]
pub trait HistoryServiceTrait: Send + Sync {
    fn get_record(&self, record_id: &str) -> Result<MileageHistoryRecord>;
    fn get_records(&self, owner_ids: &[String]) -> Result<Vec<MileageHistoryRecord>>;
    fn get_records_for_card(
        &self,
        owner_id: &str,
        card_id: &str,
    ) -> Result<Vec<MileageHistoryRecord>>;
    /// Sums miles earned on a card, optionally restricted to records whose
    /// calculation date is on or after `since`.
    fn sum_miles_for_card(
        &self,
        owner_id: &str,
        card_id: &str,
        since: Option<DateTime<Utc>>,
    ) -> Result<Decimal>;
    /// Average miles earned per month over the lookback window ending at
    /// `as_of`. Zero when there is no history or the window is empty.
    fn monthly_velocity(
        &self,
        owner_id: &str,
        card_id: Option<&str>,
        lookback_months: u32,
        as_of: DateTime<Utc>,
    ) -> Result<Decimal>;
    async fn append_record(
        &self,
        new_record: NewMileageHistoryRecord,
    ) -> Result<MileageHistoryRecord>;
    /// Administrative wipe of a card's ledger. Goal progress derived from it
    /// must be recomputed by the caller afterwards.
    async fn purge_card_history(&self, owner_id: &str, card_id: &str) -> Result<usize>;
}
