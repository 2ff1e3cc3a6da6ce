pub mod ledger;
pub mod token;

pub use ledger::{ProjectCreatedFilter, ProtocolLedger};
pub use token::IERC20;
