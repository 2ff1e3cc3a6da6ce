use crate::error::{LedgerError, Result};
use anyhow::Context;
use ethers::types::Address;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Network {
    Mainnet,
    #[default]
    Testnet,
}

/// Static deployment data for one network.
#[derive(Debug)]
pub struct NetworkConfig {
    pub name: &'static str,
    pub chain_id: u64,
    pub rpc_url: &'static str,
    pub explorer_url: &'static str,
    pub ledger_address: &'static str,
    pub token_address: &'static str,
}

// Ledger addresses stay at zero until the contract is deployed; use
// `ClientConfig::with_ledger_address` or LEDGER_ADDRESS meanwhile.
static MAINNET: NetworkConfig = NetworkConfig {
    name: "base",
    chain_id: 8453,
    rpc_url: "https://mainnet.base.org",
    explorer_url: "https://basescan.org",
    ledger_address: "0x0000000000000000000000000000000000000000",
    token_address: "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913",
};

static TESTNET: NetworkConfig = NetworkConfig {
    name: "base-sepolia",
    chain_id: 84532,
    rpc_url: "https://sepolia.base.org",
    explorer_url: "https://sepolia.basescan.org",
    ledger_address: "0x0000000000000000000000000000000000000000",
    token_address: "0x036CbD53842c5426634e7929541eC2318f3dCF7e",
};

impl Network {
    pub const ALL: [Network; 2] = [Network::Mainnet, Network::Testnet];

    pub fn config(self) -> &'static NetworkConfig {
        match self {
            Network::Mainnet => &MAINNET,
            Network::Testnet => &TESTNET,
        }
    }
}

impl FromStr for Network {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "mainnet" | "base" | "production" | "prod" => Ok(Network::Mainnet),
            "testnet" | "base-sepolia" | "sepolia" | "test" => Ok(Network::Testnet),
            _ => Err(LedgerError::UnknownNetwork(s.to_string())),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.config().name)
    }
}

impl NetworkConfig {
    pub fn tx_url(&self, tx_hash: &str) -> String {
        format!("{}/tx/{}", self.explorer_url, tx_hash)
    }

    pub fn address_url(&self, address: Address) -> String {
        format!("{}/address/{:?}", self.explorer_url, address)
    }

    pub fn ledger(&self) -> Result<Address> {
        parse_address(self.ledger_address)
    }

    pub fn token(&self) -> Result<Address> {
        parse_address(self.token_address)
    }
}

fn parse_address(value: &str) -> Result<Address> {
    Address::from_str(value)
        .map_err(|e| LedgerError::Decode(format!("invalid address {}: {}", value, e)))
}

/// Caller-supplied settings for building a client.
#[derive(Clone)]
pub struct ClientConfig {
    pub private_key: String,
    pub network: Option<Network>,
    pub rpc_url: Option<String>,
    pub ledger_address: Option<Address>,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("private_key", &"<redacted>")
            .field("network", &self.network)
            .field("rpc_url", &self.rpc_url)
            .field("ledger_address", &self.ledger_address)
            .finish()
    }
}

impl ClientConfig {
    pub fn new(private_key: impl Into<String>) -> Self {
        Self {
            private_key: private_key.into(),
            network: None,
            rpc_url: None,
            ledger_address: None,
        }
    }

    pub fn with_network(mut self, network: Network) -> Self {
        self.network = Some(network);
        self
    }

    pub fn with_rpc_url(mut self, rpc_url: impl Into<String>) -> Self {
        self.rpc_url = Some(rpc_url.into());
        self
    }

    pub fn with_ledger_address(mut self, ledger: Address) -> Self {
        self.ledger_address = Some(ledger);
        self
    }

    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let private_key = std::env::var("AGENT_PRIVATE_KEY")
            .context("AGENT_PRIVATE_KEY required")?;

        let network = match std::env::var("NETWORK") {
            Ok(name) => Some(name.parse::<Network>().context("Invalid NETWORK")?),
            Err(_) => None,
        };

        let ledger_address = match std::env::var("LEDGER_ADDRESS") {
            Ok(addr) => Some(
                Address::from_str(&addr).context("Invalid address for LEDGER_ADDRESS")?,
            ),
            Err(_) => None,
        };

        Ok(Self {
            private_key,
            network,
            rpc_url: std::env::var("RPC_URL").ok(),
            ledger_address,
        })
    }

    /// Applies the overrides on top of the selected network's table entry.
    pub fn resolve(&self) -> Result<Deployment> {
        let network = self.network.unwrap_or_default();
        let table = network.config();

        let rpc_url = self
            .rpc_url
            .clone()
            .unwrap_or_else(|| table.rpc_url.to_string());
        if !rpc_url.starts_with("http") {
            return Err(LedgerError::InvalidRpcUrl(rpc_url));
        }

        let ledger = match self.ledger_address {
            Some(addr) => addr,
            None => table.ledger()?,
        };
        if ledger.is_zero() {
            tracing::warn!("No ledger deployment configured for {}", network);
        }

        Ok(Deployment {
            network,
            chain_id: table.chain_id,
            rpc_url,
            ledger,
            token: table.token()?,
        })
    }
}

/// Fully resolved addresses and endpoint a client talks to.
#[derive(Debug, Clone)]
pub struct Deployment {
    pub network: Network,
    pub chain_id: u64,
    pub rpc_url: String,
    pub ledger: Address,
    pub token: Address,
}

/// Canonical `0x`-prefixed lowercase form of a 32-byte hex key.
pub fn normalize_private_key(key: &str) -> Result<String> {
    let trimmed = key.trim();
    let body = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if body.len() != 64 {
        return Err(LedgerError::InvalidKey(format!(
            "expected 64 hex characters, got {}",
            body.len()
        )));
    }
    hex::decode(body).map_err(|e| LedgerError::InvalidKey(e.to_string()))?;

    Ok(format!("0x{}", body.to_lowercase()))
}
