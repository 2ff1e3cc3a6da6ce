use super::to_u64;
use crate::error::Result;
use ethers::types::{Address, U256};
use serde::Serialize;

/// Raw `contributions(uint256,address)` tuple.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContributionEntry {
    pub percentage: U256,
    pub claimed: bool,
}

/// An agent's recorded share of a project. Unrecorded pairs read back as
/// `0` / `false`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Contribution {
    pub project_id: u64,
    pub agent: Address,
    pub percentage: u64,
    pub claimed: bool,
}

impl Contribution {
    pub fn from_entry(project_id: u64, agent: Address, entry: ContributionEntry) -> Result<Self> {
        Ok(Self {
            project_id,
            agent,
            percentage: to_u64(entry.percentage, "percentage")?,
            claimed: entry.claimed,
        })
    }
}
