use crate::{
    config::{ClientConfig, Network},
    error::{LedgerError, Result},
    models::{
        project::project_id, to_u64, AllowanceCheck, Agent, Contribution, IdSource, LedgerStats, Project,
        ProjectCreation, TokenAmount, TxConfirmation,
    },
    services::{EthersLedger, LedgerBackend},
};
use ethers::types::{Address, H256, U256};

/// Allowance granted whenever the current one falls short: one million
/// tokens, so routine funding calls skip the approve round trip.
pub const APPROVAL_CEILING: U256 = U256([1_000_000_000_000, 0, 0, 0]);

/// Typed read/write surface over the ledger and its payment token.
///
/// Holds no state besides its configuration; every read goes back to the
/// chain.
pub struct ProtocolClient<B = EthersLedger> {
    backend: B,
    network: Network,
}

impl ProtocolClient<EthersLedger> {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let backend = EthersLedger::new(config)?;
        let network = backend.deployment().network;
        Ok(Self { backend, network })
    }
}

impl<B: LedgerBackend> ProtocolClient<B> {
    pub fn with_backend(backend: B, network: Network) -> Self {
        Self { backend, network }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn network(&self) -> Network {
        self.network
    }

    /// Address of the signing wallet.
    pub fn address(&self) -> Address {
        self.backend.signer()
    }

    pub fn explorer_url(&self, tx_hash: H256) -> String {
        self.network.config().tx_url(&format!("{:?}", tx_hash))
    }

    // ---- reads ----

    /// Payment-token balance of `owner`, or of the signer when `None`.
    pub async fn balance(&self, owner: Option<Address>) -> Result<TokenAmount> {
        let owner = owner.unwrap_or_else(|| self.address());
        let raw = self.backend.balance_of(owner).await?;
        tracing::debug!("Balance of {:?}: {}", owner, raw);
        Ok(TokenAmount::from_raw(raw))
    }

    /// Spend authorization the signer has granted the ledger.
    pub async fn allowance(&self) -> Result<TokenAmount> {
        let raw = self
            .backend
            .allowance(self.address(), self.backend.ledger())
            .await?;
        Ok(TokenAmount::from_raw(raw))
    }

    /// `None` when the address never joined.
    pub async fn agent(&self, address: Address) -> Result<Option<Agent>> {
        let entry = self.backend.agent(address).await?;
        let agent = Agent::from_entry(address, entry)?;
        tracing::debug!("Agent {:?} registered: {}", address, agent.is_some());
        Ok(agent)
    }

    /// Fetches the project tuple and its contributor list concurrently. Ids
    /// are not bounds-checked here; the ledger's error for an unknown id is
    /// returned as is.
    pub async fn project(&self, id: u64) -> Result<Project> {
        let raw_id = U256::from(id);
        let (entry, contributors) = futures::try_join!(
            self.backend.project(raw_id),
            self.backend.project_contributors(raw_id),
        )?;
        Project::from_parts(id, entry, contributors)
    }

    /// Contribution of `agent` (the signer when `None`) to a project.
    pub async fn contribution(&self, project_id: u64, agent: Option<Address>) -> Result<Contribution> {
        let agent = agent.unwrap_or_else(|| self.address());
        let entry = self.backend.contribution(U256::from(project_id), agent).await?;
        Contribution::from_entry(project_id, agent, entry)
    }

    pub async fn agent_count(&self) -> Result<u64> {
        to_u64(self.backend.agent_count().await?, "agentCount")
    }

    pub async fn project_count(&self) -> Result<u64> {
        to_u64(self.backend.project_count().await?, "projectCount")
    }

    pub async fn total_pool(&self) -> Result<TokenAmount> {
        Ok(TokenAmount::from_raw(self.backend.total_pool().await?))
    }

    pub async fn stats(&self) -> Result<LedgerStats> {
        let (agents, projects, pool) = futures::try_join!(
            self.backend.agent_count(),
            self.backend.project_count(),
            self.backend.total_pool(),
        )?;

        Ok(LedgerStats {
            agent_count: to_u64(agents, "agentCount")?,
            project_count: to_u64(projects, "projectCount")?,
            total_pool: TokenAmount::from_raw(pool),
        })
    }

    // ---- writes ----

    /// Makes sure the ledger may pull `amount` from the signer.
    ///
    /// Zero amounts skip the check entirely. Otherwise the current allowance
    /// is read, and if it is short a single approval for
    /// `APPROVAL_CEILING` is sent and awaited. A spend larger than the
    /// ceiling is approved for its own amount instead, so the ceiling never
    /// leaves the primary call short; this departure from a strictly fixed
    /// approval is intentional.
    pub async fn ensure_allowance(&self, amount: TokenAmount) -> Result<AllowanceCheck> {
        if amount.is_zero() {
            return Ok(AllowanceCheck::NotRequired);
        }

        let spender = self.backend.ledger();
        let current = self.backend.allowance(self.address(), spender).await?;
        tracing::debug!(
            "Allowance for {:?}: {} (need {})",
            spender,
            current,
            amount.raw()
        );

        if current >= amount.raw() {
            return Ok(AllowanceCheck::Sufficient);
        }

        let ceiling = APPROVAL_CEILING.max(amount.raw());
        tracing::info!(
            "Approving {} tokens for ledger {:?}",
            TokenAmount::from_raw(ceiling),
            spender
        );
        let confirmation = self.backend.approve(spender, ceiling).await?;
        Ok(AllowanceCheck::Approved(confirmation))
    }

    /// Registers the signer under `node_id`, optionally pooling funds.
    pub async fn join(&self, node_id: &str, pool_amount: Option<TokenAmount>) -> Result<TxConfirmation> {
        let amount = pool_amount.unwrap_or(TokenAmount::ZERO);
        self.ensure_allowance(amount).await?;

        tracing::info!("Joining as {} with {} pooled", node_id, amount);
        self.backend.join(node_id, amount.raw()).await
    }

    /// Creates a project and reports its id.
    ///
    /// The id comes from the creation receipt's `ProjectCreated` log when
    /// present. Otherwise it is inferred as `projectCount() - 1` after
    /// confirmation, which is wrong if another creation lands in between.
    pub async fn create_project(
        &self,
        name: &str,
        repository: &str,
        initial_funding: TokenAmount,
    ) -> Result<ProjectCreation> {
        self.ensure_allowance(initial_funding).await?;

        tracing::info!("Creating project {} ({}) with {}", name, repository, initial_funding);
        let (confirmation, event_id) = self
            .backend
            .create_project(name, repository, initial_funding.raw())
            .await?;

        let (project_id, id_source) = match event_id {
            Some(id) => (project_id(id)?, IdSource::Event),
            None => {
                tracing::warn!("No ProjectCreated log in receipt, inferring id from project count");
                let count = self.project_count().await?;
                let id = count.checked_sub(1).ok_or_else(|| {
                    LedgerError::Decode("projectCount is zero after creation".to_string())
                })?;
                (id, IdSource::CountInference)
            }
        };

        tracing::info!("Project {} created: {}", project_id, self.explorer_url(confirmation.tx_hash));
        Ok(ProjectCreation {
            confirmation,
            project_id,
            id_source,
        })
    }

    pub async fn fund_project(&self, project_id: u64, amount: TokenAmount) -> Result<TxConfirmation> {
        self.ensure_allowance(amount).await?;

        tracing::info!("Funding project {} with {}", project_id, amount);
        self.backend.fund_project(U256::from(project_id), amount.raw()).await
    }

    /// Percentage bounds and totals are enforced by the ledger only.
    pub async fn record_contribution(
        &self,
        project_id: u64,
        agent: Address,
        percentage: u64,
    ) -> Result<TxConfirmation> {
        tracing::info!("Recording {}% for {:?} on project {}", percentage, agent, project_id);
        self.backend
            .record_contribution(U256::from(project_id), agent, U256::from(percentage))
            .await
    }

    pub async fn complete_project(&self, project_id: u64) -> Result<TxConfirmation> {
        tracing::info!("Completing project {}", project_id);
        self.backend.complete_project(U256::from(project_id)).await
    }

    pub async fn claim_rewards(&self, project_id: u64) -> Result<TxConfirmation> {
        tracing::info!("Claiming rewards on project {}", project_id);
        self.backend.claim_rewards(U256::from(project_id)).await
    }
}

