use std::collections::HashSet;

use async_trait::async_trait;
use dashmap::DashMap;

use super::programs_errors::ProgramError;
use super::programs_model::MileageProgramBalance;
use super::programs_traits::ProgramBalanceRepositoryTrait;
use crate::errors::Result;

/// In-memory program balance store keyed by balance id.
pub struct ProgramBalanceRepository {
    balances: DashMap<String, MileageProgramBalance>,
}

impl ProgramBalanceRepository {
    pub fn new() -> Self {
        Self {
            balances: DashMap::new(),
        }
    }
}

impl Default for ProgramBalanceRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProgramBalanceRepositoryTrait for ProgramBalanceRepository {
    fn get_balance(&self, balance_id: &str) -> Result<MileageProgramBalance> {
        self.balances
            .get(balance_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| ProgramError::NotFound(balance_id.to_string()).into())
    }

    fn get_balances_by_owner_ids(
        &self,
        owner_ids: &[String],
    ) -> Result<Vec<MileageProgramBalance>> {
        let owners: HashSet<&str> = owner_ids.iter().map(|id| id.as_str()).collect();
        let mut balances: Vec<MileageProgramBalance> = self
            .balances
            .iter()
            .filter(|entry| owners.contains(entry.value().owner_id.as_str()))
            .map(|entry| entry.value().clone())
            .collect();
        balances.sort_by(|a, b| {
            a.owner_id
                .cmp(&b.owner_id)
                .then(a.program_name.cmp(&b.program_name))
        });
        Ok(balances)
    }

    fn find_balance(
        &self,
        owner_id: &str,
        program_name: &str,
    ) -> Result<Option<MileageProgramBalance>> {
        Ok(self
            .balances
            .iter()
            .find(|entry| {
                let balance = entry.value();
                balance.owner_id == owner_id && balance.program_name == program_name
            })
            .map(|entry| entry.value().clone()))
    }

    async fn insert_balance(
        &self,
        balance: MileageProgramBalance,
    ) -> Result<MileageProgramBalance> {
        self.balances.insert(balance.id.clone(), balance.clone());
        Ok(balance)
    }

    async fn update_balance(
        &self,
        balance: MileageProgramBalance,
    ) -> Result<MileageProgramBalance> {
        match self.balances.get_mut(&balance.id) {
            Some(mut entry) => {
                *entry.value_mut() = balance.clone();
                Ok(balance)
            }
            None => Err(ProgramError::NotFound(balance.id).into()),
        }
    }

    async fn delete_balance(&self, balance_id: &str) -> Result<usize> {
        match self.balances.remove(balance_id) {
            Some(_) => Ok(1),
            None => Err(ProgramError::NotFound(balance_id.to_string()).into()),
        }
    }
}
