#![allow(dead_code)]

use agent_ledger::{
    error::{LedgerError, Result},
    models::{AgentEntry, ContributionEntry, ProjectEntry, TxConfirmation},
    services::LedgerBackend,
};
use async_trait::async_trait;
use ethers::types::{Address, H256, U256};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

pub const JOINED_AT: u64 = 1_700_000_000;

pub fn address(byte: u8) -> Address {
    Address::repeat_byte(byte)
}

pub fn tokens(whole: u64) -> U256 {
    U256::from(whole) * U256::exp10(6)
}

#[derive(Default)]
pub struct State {
    pub balances: HashMap<Address, U256>,
    pub allowance: U256,
    pub agents: HashMap<Address, AgentEntry>,
    pub projects: Vec<(ProjectEntry, Vec<Address>)>,
    pub contributions: HashMap<(U256, Address), ContributionEntry>,
    pub total_pool: U256,
    /// Emit a `ProjectCreated` id with creation receipts.
    pub emit_project_event: bool,
    /// Projects another wallet creates right after ours confirms.
    pub racing_creations: usize,
    pub fail_approve: bool,
    pub calls: Vec<&'static str>,
    pub approvals: Vec<U256>,
    block: u64,
}

impl State {
    fn confirm(&mut self) -> TxConfirmation {
        self.block += 1;
        TxConfirmation {
            tx_hash: H256::from_low_u64_be(self.block),
            block_number: self.block,
        }
    }

    fn pull(&mut self, owner: Address, amount: U256) -> Result<()> {
        if amount.is_zero() {
            return Ok(());
        }
        if self.allowance < amount {
            return Err(LedgerError::Contract(
                "execution reverted: ERC20: insufficient allowance".to_string(),
            ));
        }
        let balance = self.balances.entry(owner).or_default();
        if *balance < amount {
            return Err(LedgerError::Contract(
                "execution reverted: ERC20: transfer amount exceeds balance".to_string(),
            ));
        }
        *balance -= amount;
        self.allowance -= amount;
        Ok(())
    }

    fn push_project(&mut self, name: &str, creator: Address, funding: U256) {
        let entry = ProjectEntry {
            name: name.to_string(),
            repository: format!("github.com/example/{}", name),
            creator,
            total_funding: funding,
            created_at: U256::from(JOINED_AT + 60),
            status: 0,
        };
        self.projects.push((entry, Vec::new()));
    }

    pub fn count(&self, method: &str) -> usize {
        self.calls.iter().filter(|call| **call == method).count()
    }
}

pub struct FakeLedger {
    signer: Address,
    ledger: Address,
    state: Mutex<State>,
}

impl FakeLedger {
    pub fn new() -> Self {
        Self {
            signer: address(0xaa),
            ledger: address(0x1e),
            state: Mutex::new(State::default()),
        }
    }

    pub fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    pub fn with_balance(self, amount: U256) -> Self {
        let signer = self.signer;
        self.state().balances.insert(signer, amount);
        self
    }

    pub fn with_allowance(self, amount: U256) -> Self {
        self.state().allowance = amount;
        self
    }

    pub fn with_projects(self, n: usize) -> Self {
        {
            let mut state = self.state();
            for i in 0..n {
                state.push_project(&format!("seed-{}", i), address(0x33), tokens(1));
            }
        }
        self
    }

    fn record(&self, call: &'static str) -> MutexGuard<'_, State> {
        let mut state = self.state();
        state.calls.push(call);
        state
    }

    fn index(state: &State, project_id: U256) -> Result<usize> {
        if project_id >= U256::from(state.projects.len()) {
            return Err(LedgerError::Contract(
                "execution reverted: project does not exist".to_string(),
            ));
        }
        Ok(project_id.as_usize())
    }
}

#[async_trait]
impl LedgerBackend for FakeLedger {
    fn signer(&self) -> Address {
        self.signer
    }

    fn ledger(&self) -> Address {
        self.ledger
    }

    async fn balance_of(&self, owner: Address) -> Result<U256> {
        let state = self.record("balanceOf");
        Ok(state.balances.get(&owner).copied().unwrap_or_default())
    }

    async fn allowance(&self, owner: Address, spender: Address) -> Result<U256> {
        let state = self.record("allowance");
        assert_eq!(owner, self.signer);
        assert_eq!(spender, self.ledger);
        Ok(state.allowance)
    }

    async fn approve(&self, spender: Address, amount: U256) -> Result<TxConfirmation> {
        let mut state = self.record("approve");
        assert_eq!(spender, self.ledger);
        if state.fail_approve {
            return Err(LedgerError::Contract("execution reverted: paused".to_string()));
        }
        state.allowance = amount;
        state.approvals.push(amount);
        Ok(state.confirm())
    }

    async fn agent(&self, agent: Address) -> Result<AgentEntry> {
        let state = self.record("agents");
        Ok(state.agents.get(&agent).cloned().unwrap_or_default())
    }

    async fn project(&self, project_id: U256) -> Result<ProjectEntry> {
        let state = self.record("projects");
        let index = Self::index(&state, project_id)?;
        Ok(state.projects[index].0.clone())
    }

    async fn project_contributors(&self, project_id: U256) -> Result<Vec<Address>> {
        let state = self.record("getProjectContributors");
        let index = Self::index(&state, project_id)?;
        Ok(state.projects[index].1.clone())
    }

    async fn contribution(&self, project_id: U256, agent: Address) -> Result<ContributionEntry> {
        let state = self.record("contributions");
        Ok(state
            .contributions
            .get(&(project_id, agent))
            .cloned()
            .unwrap_or_default())
    }

    async fn agent_count(&self) -> Result<U256> {
        let state = self.record("agentCount");
        Ok(U256::from(state.agents.len()))
    }

    async fn project_count(&self) -> Result<U256> {
        let state = self.record("projectCount");
        Ok(U256::from(state.projects.len()))
    }

    async fn total_pool(&self) -> Result<U256> {
        let state = self.record("totalPool");
        Ok(state.total_pool)
    }

    async fn join(&self, node_id: &str, pool_amount: U256) -> Result<TxConfirmation> {
        let mut state = self.record("join");
        state.pull(self.signer, pool_amount)?;
        state.total_pool += pool_amount;
        state.agents.insert(
            self.signer,
            AgentEntry {
                wallet: self.signer,
                node_id: node_id.to_string(),
                pooled_amount: pool_amount,
                compute_score: U256::zero(),
                joined_at: U256::from(JOINED_AT),
                active: true,
            },
        );
        Ok(state.confirm())
    }

    async fn create_project(
        &self,
        name: &str,
        _repository: &str,
        initial_funding: U256,
    ) -> Result<(TxConfirmation, Option<U256>)> {
        let mut state = self.record("createProject");
        state.pull(self.signer, initial_funding)?;
        state.push_project(name, self.signer, initial_funding);
        let id = U256::from(state.projects.len() - 1);
        let confirmation = state.confirm();

        for i in 0..state.racing_creations {
            state.push_project(&format!("racer-{}", i), address(0x99), U256::zero());
        }

        let event = state.emit_project_event.then_some(id);
        Ok((confirmation, event))
    }

    async fn fund_project(&self, project_id: U256, amount: U256) -> Result<TxConfirmation> {
        let mut state = self.record("fundProject");
        let index = Self::index(&state, project_id)?;
        state.pull(self.signer, amount)?;
        state.projects[index].0.total_funding += amount;
        Ok(state.confirm())
    }

    async fn record_contribution(
        &self,
        project_id: U256,
        agent: Address,
        percentage: U256,
    ) -> Result<TxConfirmation> {
        let mut state = self.record("recordContribution");
        let index = Self::index(&state, project_id)?;
        if !state.projects[index].1.contains(&agent) {
            state.projects[index].1.push(agent);
        }
        state.contributions.insert(
            (project_id, agent),
            ContributionEntry {
                percentage,
                claimed: false,
            },
        );
        Ok(state.confirm())
    }

    async fn complete_project(&self, project_id: U256) -> Result<TxConfirmation> {
        let mut state = self.record("completeProject");
        let index = Self::index(&state, project_id)?;
        state.projects[index].0.status = 1;
        Ok(state.confirm())
    }

    async fn claim_rewards(&self, project_id: U256) -> Result<TxConfirmation> {
        let mut state = self.record("claimRewards");
        let signer = self.signer;
        let entry = state
            .contributions
            .get_mut(&(project_id, signer))
            .ok_or_else(|| LedgerError::Contract("execution reverted: no contribution".to_string()))?;
        entry.claimed = true;
        Ok(state.confirm())
    }
}
