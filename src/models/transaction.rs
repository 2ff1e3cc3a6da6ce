use ethers::types::H256;
use serde::Serialize;

/// A mined, successful transaction.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct TxConfirmation {
    pub tx_hash: H256,
    pub block_number: u64,
}

/// Outcome of the approve-if-insufficient check.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum AllowanceCheck {
    /// Nothing to spend, so no authorization was read or sent.
    NotRequired,
    Sufficient,
    Approved(TxConfirmation),
}
