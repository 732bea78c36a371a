use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::errors::Result;
use crate::programs::programs_model::{MileageProgramBalance, NewMileageProgramBalance};

/// Trait for program balance repository operations
#[async_trait]
pub trait ProgramBalanceRepositoryTrait: Send + Sync {
    fn get_balance(&self, balance_id: &str) -> Result<MileageProgramBalance>;
    fn get_balances_by_owner_ids(&self, owner_ids: &[String])
        -> Result<Vec<MileageProgramBalance>>;
    fn find_balance(
        &self,
        owner_id: &str,
        program_name: &str,
    ) -> Result<Option<MileageProgramBalance>>;
    async fn insert_balance(
        &self,
        balance: MileageProgramBalance,
    ) -> Result<MileageProgramBalance>;
    async fn update_balance(
        &self,
        balance: MileageProgramBalance,
    ) -> Result<MileageProgramBalance>;
    async fn delete_balance(&self, balance_id: &str) -> Result<usize>;
}

/// Trait for program balance service operations
#[async_trait]
pub trait ProgramServiceTrait: Send + Sync {
    fn get_balances(&self, owner_ids: &[String]) -> Result<Vec<MileageProgramBalance>>;
    /// Sum of synced program balances in scope. Never mixed with
    /// rule-derived miles.
    fn total_program_miles(&self, owner_ids: &[String]) -> Result<Decimal>;
    /// Records a sync: replaces the (owner, program) balance or creates it.
    async fn upsert_balance(
        &self,
        new_balance: NewMileageProgramBalance,
    ) -> Result<MileageProgramBalance>;
    async fn delete_balance(&self, balance_id: &str) -> Result<usize>;
}
