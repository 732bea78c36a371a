use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::Result;
use crate::promotions::promotions_model::Promotion;

/// Trait for promotion catalog operations
#[async_trait]
pub trait PromotionRepositoryTrait: Send + Sync {
    fn get_promotions(&self) -> Result<Vec<Promotion>>;
    /// Promotions redeemable as of `date` (active, not expired).
    fn get_valid_promotions(&self, date: NaiveDate) -> Result<Vec<Promotion>>;
    /// Swaps the whole catalog for a fresh partner feed.
    async fn replace_catalog(&self, promotions: Vec<Promotion>) -> Result<usize>;
}
