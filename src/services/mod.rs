pub mod ethereum;
pub mod ledger;

pub use ethereum::{EthersLedger, SignerClient};
pub use ledger::LedgerBackend;
