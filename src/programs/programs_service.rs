use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::programs_model::{MileageProgramBalance, NewMileageProgramBalance};
use super::programs_traits::{ProgramBalanceRepositoryTrait, ProgramServiceTrait};
use crate::errors::Result;

/// Service for externally synced loyalty program balances.
pub struct ProgramService {
    program_repository: Arc<dyn ProgramBalanceRepositoryTrait>,
}

impl ProgramService {
    pub fn new(program_repository: Arc<dyn ProgramBalanceRepositoryTrait>) -> Self {
        Self { program_repository }
    }
}

#[async_trait]
impl ProgramServiceTrait for ProgramService {
    fn get_balances(&self, owner_ids: &[String]) -> Result<Vec<MileageProgramBalance>> {
        self.program_repository.get_balances_by_owner_ids(owner_ids)
    }

    fn total_program_miles(&self, owner_ids: &[String]) -> Result<Decimal> {
        let balances = self
            .program_repository
            .get_balances_by_owner_ids(owner_ids)?;
        Ok(balances
            .iter()
            .map(|balance| balance.balance_miles)
            .sum())
    }

    async fn upsert_balance(
        &self,
        new_balance: NewMileageProgramBalance,
    ) -> Result<MileageProgramBalance> {
        new_balance.validate()?;

        let existing = self
            .program_repository
            .find_balance(&new_balance.owner_id, &new_balance.program_name)?;
        let now = Utc::now();

        match existing {
            Some(current) => {
                debug!(
                    "Refreshing {} balance for owner {}: {} -> {}",
                    current.program_name,
                    current.owner_id,
                    current.balance_miles,
                    new_balance.balance_miles
                );
                let refreshed = MileageProgramBalance {
                    id: current.id,
                    owner_id: new_balance.owner_id,
                    program_name: new_balance.program_name,
                    balance_miles: new_balance.balance_miles,
                    synced_at: now,
                };
                self.program_repository.update_balance(refreshed).await
            }
            None => {
                let balance = MileageProgramBalance {
                    id: new_balance
                        .id
                        .unwrap_or_else(|| Uuid::new_v4().to_string()),
                    owner_id: new_balance.owner_id,
                    program_name: new_balance.program_name,
                    balance_miles: new_balance.balance_miles,
                    synced_at: now,
                };
                self.program_repository.insert_balance(balance).await
            }
        }
    }

    async fn delete_balance(&self, balance_id: &str) -> Result<usize> {
        self.program_repository.delete_balance(balance_id).await
    }
}
