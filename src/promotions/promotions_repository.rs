use std::sync::RwLock;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;

use super::promotions_model::Promotion;
use super::promotions_traits::PromotionRepositoryTrait;
use crate::errors::Result;

/// In-memory promotion catalog.
///
/// Read-mostly: lookups clone the current snapshot, refreshes swap it out
/// under a short write lock.
pub struct PromotionRepository {
    promotions: RwLock<Vec<Promotion>>,
}

impl PromotionRepository {
    pub fn new() -> Self {
        Self {
            promotions: RwLock::new(Vec::new()),
        }
    }

    pub fn with_catalog(promotions: Vec<Promotion>) -> Self {
        Self {
            promotions: RwLock::new(promotions),
        }
    }
}

impl Default for PromotionRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PromotionRepositoryTrait for PromotionRepository {
    fn get_promotions(&self) -> Result<Vec<Promotion>> {
        Ok(self.promotions.read().unwrap().clone())
    }

    fn get_valid_promotions(&self, date: NaiveDate) -> Result<Vec<Promotion>> {
        Ok(self
            .promotions
            .read()
            .unwrap()
            .iter()
            .filter(|promotion| promotion.is_valid_on(date))
            .cloned()
            .collect())
    }

    async fn replace_catalog(&self, promotions: Vec<Promotion>) -> Result<usize> {
        let count = promotions.len();
        *self.promotions.write().unwrap() = promotions;
        debug!("Replaced promotion catalog with {} entries", count);
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn promotion(id: &str, valid_to: NaiveDate) -> Promotion {
        Promotion {
            id: id.to_string(),
            airline: "LATAM".to_string(),
            destination: None,
            miles_required: dec!(50000),
            benefit_description: None,
            valid_from: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            valid_to,
            is_active: true,
        }
    }

    #[tokio::test]
    async fn test_replace_and_filter_by_validity() {
        let repository = PromotionRepository::with_catalog(vec![
            promotion("p1", NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()),
            promotion("p2", NaiveDate::from_ymd_opt(2025, 3, 31).unwrap()),
        ]);

        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let valid = repository.get_valid_promotions(today).unwrap();
        assert_eq!(valid.len(), 1);
        assert_eq!(valid[0].id, "p1");

        // A refresh replaces the catalog wholesale.
        repository
            .replace_catalog(vec![promotion(
                "p3",
                NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
            )])
            .await
            .unwrap();
        assert_eq!(repository.get_promotions().unwrap().len(), 1);
    }
}
