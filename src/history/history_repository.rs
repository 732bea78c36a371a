use std::collections::HashSet;

use async_trait::async_trait;
use dashmap::DashMap;

use super::history_errors::HistoryError;
use super::history_model::MileageHistoryRecord;
use super::history_traits::HistoryRepositoryTrait;
use crate::errors::Result;

/// In-memory ledger store keyed by record id.
pub struct HistoryRepository {
    records: DashMap<String, MileageHistoryRecord>,
}

impl HistoryRepository {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }

    fn sorted(&self, mut records: Vec<MileageHistoryRecord>) -> Vec<MileageHistoryRecord> {
        // Most recent first, id as tie-breaker for stable output.
        records.sort_by(|a, b| {
            b.calculation_date
                .cmp(&a.calculation_date)
                .then(a.id.cmp(&b.id))
        });
        records
    }
}

impl Default for HistoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HistoryRepositoryTrait for HistoryRepository {
    fn get_record(&self, record_id: &str) -> Result<MileageHistoryRecord> {
        self.records
            .get(record_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| HistoryError::NotFound(record_id.to_string()).into())
    }

    fn get_records_by_owner_ids(&self, owner_ids: &[String]) -> Result<Vec<MileageHistoryRecord>> {
        let owners: HashSet<&str> = owner_ids.iter().map(|id| id.as_str()).collect();
        let records = self
            .records
            .iter()
            .filter(|entry| owners.contains(entry.value().owner_id.as_str()))
            .map(|entry| entry.value().clone())
            .collect();
        Ok(self.sorted(records))
    }

    fn get_records_for_card(
        &self,
        owner_id: &str,
        card_id: &str,
    ) -> Result<Vec<MileageHistoryRecord>> {
        let records = self
            .records
            .iter()
            .filter(|entry| {
                let record = entry.value();
                record.owner_id == owner_id && record.card_id == card_id
            })
            .map(|entry| entry.value().clone())
            .collect();
        Ok(self.sorted(records))
    }

    async fn append_record(&self, record: MileageHistoryRecord) -> Result<MileageHistoryRecord> {
        self.records.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    async fn delete_records_for_card(&self, owner_id: &str, card_id: &str) -> Result<usize> {
        let doomed: Vec<String> = self
            .records
            .iter()
            .filter(|entry| {
                let record = entry.value();
                record.owner_id == owner_id && record.card_id == card_id
            })
            .map(|entry| entry.key().clone())
            .collect();

        let mut deleted = 0;
        for record_id in &doomed {
            if self.records.remove(record_id).is_some() {
                deleted += 1;
            }
        }
        Ok(deleted)
    }
}
