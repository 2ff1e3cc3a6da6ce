pub mod agent;
pub mod amount;
pub mod contribution;
pub mod project;
pub mod stats;
pub mod transaction;

pub use agent::*;
pub use amount::*;
pub use contribution::*;
pub use project::*;
pub use stats::*;
pub use transaction::*;

use crate::error::{LedgerError, Result};
use chrono::{DateTime, Utc};
use ethers::types::U256;

pub(crate) fn to_u64(value: U256, field: &str) -> Result<u64> {
    u64::try_from(value)
        .map_err(|_| LedgerError::Decode(format!("{} does not fit in u64: {}", field, value)))
}

pub(crate) fn to_timestamp(value: U256, field: &str) -> Result<DateTime<Utc>> {
    let secs = i64::try_from(to_u64(value, field)?)
        .map_err(|_| LedgerError::Decode(format!("{} out of range: {}", field, value)))?;
    DateTime::<Utc>::from_timestamp(secs, 0)
        .ok_or_else(|| LedgerError::Decode(format!("{} out of range: {}", field, value)))
}
