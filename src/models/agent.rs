use super::{to_timestamp, TokenAmount};
use crate::error::Result;
use chrono::{DateTime, Utc};
use ethers::types::{Address, U256};
use serde::Serialize;

/// Raw `agents(address)` tuple as returned by the ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentEntry {
    pub wallet: Address,
    pub node_id: String,
    pub pooled_amount: U256,
    pub compute_score: U256,
    pub joined_at: U256,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Agent {
    pub address: Address,
    pub node_id: String,
    pub pooled_amount: TokenAmount,
    /// Reserved by the ledger; always zero today.
    pub compute_score: U256,
    pub joined_at: DateTime<Utc>,
    pub active: bool,
}

impl Agent {
    /// Decodes a lookup result. A registered agent always has a non-zero
    /// join timestamp, so a zero timestamp means "not registered" regardless
    /// of the other fields.
    pub fn from_entry(address: Address, entry: AgentEntry) -> Result<Option<Self>> {
        if entry.joined_at.is_zero() {
            return Ok(None);
        }

        Ok(Some(Self {
            address,
            node_id: entry.node_id,
            pooled_amount: TokenAmount::from_raw(entry.pooled_amount),
            compute_score: entry.compute_score,
            joined_at: to_timestamp(entry.joined_at, "joinedAt")?,
            active: entry.active,
        }))
    }
}
