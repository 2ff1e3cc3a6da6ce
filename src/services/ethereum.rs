use crate::{
    config::{normalize_private_key, ClientConfig, Deployment},
    contracts::{ProjectCreatedFilter, ProtocolLedger, IERC20},
    error::{LedgerError, Result},
    models::{AgentEntry, ContributionEntry, ProjectEntry, TxConfirmation},
    services::LedgerBackend,
};
use async_trait::async_trait;
use ethers::{
    abi::Detokenize,
    contract::{parse_log, ContractCall},
    prelude::*,
    providers::{Http, Provider},
    types::{Address, TransactionReceipt, U256},
};
use std::sync::Arc;

pub type SignerClient = SignerMiddleware<Provider<Http>, LocalWallet>;

/// `LedgerBackend` over a JSON-RPC endpoint, signing with a local key.
pub struct EthersLedger {
    client: Arc<SignerClient>,
    ledger: ProtocolLedger<SignerClient>,
    token: IERC20<SignerClient>,
    deployment: Deployment,
}

impl EthersLedger {
    /// Builds the signer and contract handles. No RPC round trip happens
    /// here, so a malformed key or URL fails before any call is attempted.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let deployment = config.resolve()?;
        let key = normalize_private_key(&config.private_key)?;

        let wallet = key
            .parse::<LocalWallet>()?
            .with_chain_id(deployment.chain_id);

        let provider = Provider::<Http>::try_from(deployment.rpc_url.as_str())
            .map_err(|e| LedgerError::InvalidRpcUrl(format!("{}: {}", deployment.rpc_url, e)))?;

        let client = Arc::new(SignerMiddleware::new(provider, wallet));
        let ledger = ProtocolLedger::new(deployment.ledger, client.clone());
        let token = IERC20::new(deployment.token, client.clone());

        tracing::info!(
            "Ledger client ready on {} (chain {}), signer {:?}",
            deployment.network,
            deployment.chain_id,
            client.address()
        );

        Ok(Self {
            client,
            ledger,
            token,
            deployment,
        })
    }

    pub fn deployment(&self) -> &Deployment {
        &self.deployment
    }

    async fn send<D: Detokenize>(
        &self,
        method: &str,
        call: ContractCall<SignerClient, D>,
    ) -> Result<TransactionReceipt> {
        let pending = call.send().await.map_err(LedgerError::contract)?;
        let tx_hash = pending.tx_hash();

        tracing::info!(method, tx_hash = ?tx_hash, "Transaction sent, waiting for confirmation...");

        let receipt = pending
            .await?
            .ok_or(LedgerError::TransactionDropped(tx_hash))?;

        let block = receipt.block_number.map(|b| b.as_u64());
        if receipt.status != Some(1.into()) {
            tracing::warn!(method, tx_hash = ?tx_hash, "Transaction reverted");
            return Err(LedgerError::TransactionReverted { tx_hash, block });
        }

        tracing::info!(method, tx_hash = ?tx_hash, block = ?block, "Transaction confirmed");
        Ok(receipt)
    }

    async fn confirm<D: Detokenize>(
        &self,
        method: &str,
        call: ContractCall<SignerClient, D>,
    ) -> Result<TxConfirmation> {
        let receipt = self.send(method, call).await?;
        Ok(confirmation(&receipt))
    }
}

fn confirmation(receipt: &TransactionReceipt) -> TxConfirmation {
    TxConfirmation {
        tx_hash: receipt.transaction_hash,
        block_number: receipt.block_number.map(|b| b.as_u64()).unwrap_or_default(),
    }
}

#[async_trait]
impl LedgerBackend for EthersLedger {
    fn signer(&self) -> Address {
        self.client.address()
    }

    fn ledger(&self) -> Address {
        self.deployment.ledger
    }

    async fn balance_of(&self, owner: Address) -> Result<U256> {
        self.token
            .balance_of(owner)
            .call()
            .await
            .map_err(LedgerError::contract)
    }

    async fn allowance(&self, owner: Address, spender: Address) -> Result<U256> {
        self.token
            .allowance(owner, spender)
            .call()
            .await
            .map_err(LedgerError::contract)
    }

    async fn approve(&self, spender: Address, amount: U256) -> Result<TxConfirmation> {
        self.confirm("approve", self.token.approve(spender, amount)).await
    }

    async fn agent(&self, agent: Address) -> Result<AgentEntry> {
        let (wallet, node_id, pooled_amount, compute_score, joined_at, active) = self
            .ledger
            .agents(agent)
            .call()
            .await
            .map_err(LedgerError::contract)?;

        Ok(AgentEntry {
            wallet,
            node_id,
            pooled_amount,
            compute_score,
            joined_at,
            active,
        })
    }

    async fn project(&self, project_id: U256) -> Result<ProjectEntry> {
        let (name, repository, creator, total_funding, created_at, status) = self
            .ledger
            .projects(project_id)
            .call()
            .await
            .map_err(LedgerError::contract)?;

        Ok(ProjectEntry {
            name,
            repository,
            creator,
            total_funding,
            created_at,
            status,
        })
    }

    async fn project_contributors(&self, project_id: U256) -> Result<Vec<Address>> {
        self.ledger
            .get_project_contributors(project_id)
            .call()
            .await
            .map_err(LedgerError::contract)
    }

    async fn contribution(&self, project_id: U256, agent: Address) -> Result<ContributionEntry> {
        let (percentage, claimed) = self
            .ledger
            .contributions(project_id, agent)
            .call()
            .await
            .map_err(LedgerError::contract)?;

        Ok(ContributionEntry { percentage, claimed })
    }

    async fn agent_count(&self) -> Result<U256> {
        self.ledger.agent_count().call().await.map_err(LedgerError::contract)
    }

    async fn project_count(&self) -> Result<U256> {
        self.ledger.project_count().call().await.map_err(LedgerError::contract)
    }

    async fn total_pool(&self) -> Result<U256> {
        self.ledger.total_pool().call().await.map_err(LedgerError::contract)
    }

    async fn join(&self, node_id: &str, pool_amount: U256) -> Result<TxConfirmation> {
        self.confirm("join", self.ledger.join(node_id.to_string(), pool_amount))
            .await
    }

    async fn create_project(
        &self,
        name: &str,
        repository: &str,
        initial_funding: U256,
    ) -> Result<(TxConfirmation, Option<U256>)> {
        let call = self
            .ledger
            .create_project(name.to_string(), repository.to_string(), initial_funding);
        let receipt = self.send("createProject", call).await?;

        let ledger = self.ledger.address();
        let project_id = receipt
            .logs
            .iter()
            .filter(|log| log.address == ledger)
            .find_map(|log| parse_log::<ProjectCreatedFilter>(log.clone()).ok())
            .map(|event| event.project_id);

        Ok((confirmation(&receipt), project_id))
    }

    async fn fund_project(&self, project_id: U256, amount: U256) -> Result<TxConfirmation> {
        self.confirm("fundProject", self.ledger.fund_project(project_id, amount))
            .await
    }

    async fn record_contribution(
        &self,
        project_id: U256,
        agent: Address,
        percentage: U256,
    ) -> Result<TxConfirmation> {
        let call = self.ledger.record_contribution(project_id, agent, percentage);
        self.confirm("recordContribution", call).await
    }

    async fn complete_project(&self, project_id: U256) -> Result<TxConfirmation> {
        self.confirm("completeProject", self.ledger.complete_project(project_id))
            .await
    }

    async fn claim_rewards(&self, project_id: U256) -> Result<TxConfirmation> {
        self.confirm("claimRewards", self.ledger.claim_rewards(project_id))
            .await
    }
}
