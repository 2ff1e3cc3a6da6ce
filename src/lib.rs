pub mod client;
pub mod config;
pub mod contracts;
pub mod error;
pub mod models;
pub mod services;

pub use client::ProtocolClient;
pub use config::{ClientConfig, Network};
pub use error::LedgerError;
pub use models::TokenAmount;
