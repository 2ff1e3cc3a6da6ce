pub mod protocol;

pub use protocol::{ProtocolClient, APPROVAL_CEILING};
