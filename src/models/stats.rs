use super::TokenAmount;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LedgerStats {
    pub agent_count: u64,
    pub project_count: u64,
    pub total_pool: TokenAmount,
}
