use crate::{
    error::Result,
    models::{AgentEntry, ContributionEntry, ProjectEntry, TxConfirmation},
};
use async_trait::async_trait;
use ethers::types::{Address, U256};

/// Raw call surface of the ledger and payment-token contracts.
///
/// Amounts are smallest-unit integers. Every write submits a signed
/// transaction and resolves only once it is mined with a success status.
#[async_trait]
pub trait LedgerBackend: Send + Sync {
    /// Address of the signing wallet.
    fn signer(&self) -> Address;

    /// Address of the ledger contract, i.e. the spender for allowances.
    fn ledger(&self) -> Address;

    // Token reads
    async fn balance_of(&self, owner: Address) -> Result<U256>;
    async fn allowance(&self, owner: Address, spender: Address) -> Result<U256>;

    // Token write
    async fn approve(&self, spender: Address, amount: U256) -> Result<TxConfirmation>;

    // Ledger reads
    async fn agent(&self, agent: Address) -> Result<AgentEntry>;
    async fn project(&self, project_id: U256) -> Result<ProjectEntry>;
    async fn project_contributors(&self, project_id: U256) -> Result<Vec<Address>>;
    async fn contribution(&self, project_id: U256, agent: Address) -> Result<ContributionEntry>;
    async fn agent_count(&self) -> Result<U256>;
    async fn project_count(&self) -> Result<U256>;
    async fn total_pool(&self) -> Result<U256>;

    // Ledger writes
    async fn join(&self, node_id: &str, pool_amount: U256) -> Result<TxConfirmation>;

    /// Returns the confirmation plus the new project id when the receipt
    /// carries a `ProjectCreated` log from the ledger.
    async fn create_project(
        &self,
        name: &str,
        repository: &str,
        initial_funding: U256,
    ) -> Result<(TxConfirmation, Option<U256>)>;

    async fn fund_project(&self, project_id: U256, amount: U256) -> Result<TxConfirmation>;
    async fn record_contribution(
        &self,
        project_id: U256,
        agent: Address,
        percentage: U256,
    ) -> Result<TxConfirmation>;
    async fn complete_project(&self, project_id: U256) -> Result<TxConfirmation>;
    async fn claim_rewards(&self, project_id: U256) -> Result<TxConfirmation>;
}
