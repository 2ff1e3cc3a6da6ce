use ethers::{
    providers::ProviderError,
    signers::WalletError,
    types::H256,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Invalid private key: {0}")]
    InvalidKey(String),

    #[error("Wallet error: {0}")]
    Wallet(#[from] WalletError),

    #[error("Invalid RPC URL: {0}")]
    InvalidRpcUrl(String),

    #[error("Unknown network: {0}")]
    UnknownNetwork(String),

    #[error("RPC error: {0}")]
    Rpc(#[from] ProviderError),

    #[error("Contract error: {0}")]
    Contract(String),

    #[error("Transaction dropped: {0:?}")]
    TransactionDropped(H256),

    #[error("Transaction {tx_hash:?} reverted in block {block:?}")]
    TransactionReverted { tx_hash: H256, block: Option<u64> },

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Decode error: {0}")]
    Decode(String),
}

impl LedgerError {
    /// Wraps any contract-layer error, keeping its message verbatim.
    pub fn contract(err: impl std::fmt::Display) -> Self {
        LedgerError::Contract(err.to_string())
    }
}

pub type Result<T, E = LedgerError> = std::result::Result<T, E>;
