//! Scope domain models.

use serde::{Deserialize, Serialize};

/// Which partner's records a paired account is currently viewing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViewMode {
    Both,
    PartnerA,
    PartnerB,
}

/// A paired-account relationship supplied by the host's identity layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CoupleLink {
    pub partner_a_id: String,
    pub partner_b_id: String,
}

impl CoupleLink {
    pub fn involves(&self, user_id: &str) -> bool {
        self.partner_a_id == user_id || self.partner_b_id == user_id
    }
}

/// The set of owner identities a query may touch.
///
/// Every read and every spend submission is checked against this set, so a
/// partner filter in the UI cannot leak the other partner's records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedScope {
    owner_ids: Vec<String>,
}

impl ResolvedScope {
    pub fn new(owner_ids: Vec<String>) -> Self {
        let mut deduped: Vec<String> = Vec::with_capacity(owner_ids.len());
        for owner_id in owner_ids {
            if !deduped.contains(&owner_id) {
                deduped.push(owner_id);
            }
        }
        Self { owner_ids: deduped }
    }

    pub fn single(owner_id: &str) -> Self {
        Self {
            owner_ids: vec![owner_id.to_string()],
        }
    }

    pub fn owner_ids(&self) -> &[String] {
        &self.owner_ids
    }

    pub fn includes(&self, owner_id: &str) -> bool {
        self.owner_ids.iter().any(|id| id == owner_id)
    }
}
