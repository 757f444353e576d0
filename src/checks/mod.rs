//! Per-proposal checks.
//!
//! Each check simulates its proposal, then asserts the governor state, the
//! exact sequence of execution events and whatever storage the proposal was
//! meant to change.

pub mod errors;
pub mod proposal_10;
pub mod proposal_19;
pub mod proposal_20;
pub mod proposal_22;
pub mod proposal_23;
pub mod proposal_9;
pub mod timelock;

pub use errors::CheckError;

use alloy_primitives::{Address, U256};
use alloy_sol_types::SolCall;
use std::fmt;
use std::sync::Arc;
use tracing::info;

use crate::abi::contracts::{IGovernorBravo, IVotingToken};
use crate::abi::Interfaces;
use crate::config::GovernanceConfig;
use crate::governance::{GovernanceDriver, GovernanceError, ProposalState, SimulationResult, Stage};
use crate::harness::{read_contract, BlockTag, ChainHarness};
use crate::output;
use crate::validator::{validate_sequence, ExpectedEvent};

/// Proposals with a check.
pub const SUPPORTED_PROPOSALS: [u64; 6] = [9, 10, 19, 20, 22, 23];

/// Expected movement of the treasury's voting-token balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceDelta {
    Unchanged,
    Decreased(U256),
}

impl BalanceDelta {
    fn holds(&self, before: U256, after: U256) -> bool {
        match self {
            Self::Unchanged => before == after,
            Self::Decreased(amount) => before.checked_sub(*amount) == Some(after),
        }
    }
}

impl fmt::Display for BalanceDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unchanged => f.write_str("unchanged"),
            Self::Decreased(amount) => {
                write!(f, "decreased by {}", output::format_token_amount(*amount))
            }
        }
    }
}

/// Shared state and assertions for proposal checks.
pub struct CheckContext {
    harness: Arc<dyn ChainHarness>,
    interfaces: Interfaces,
    driver: GovernanceDriver,
}

impl CheckContext {
    pub fn new(
        harness: Arc<dyn ChainHarness>,
        interfaces: Interfaces,
        config: GovernanceConfig,
    ) -> Self {
        let driver = GovernanceDriver::new(Arc::clone(&harness), config, interfaces.clone());
        Self { harness, interfaces, driver }
    }

    pub fn interfaces(&self) -> &Interfaces {
        &self.interfaces
    }

    pub fn config(&self) -> &GovernanceConfig {
        self.driver.config()
    }

    /// Run the proposal through its lifecycle and print the stages.
    pub async fn simulate(&self, id: u64) -> Result<SimulationResult, CheckError> {
        let result = self.driver.simulate(U256::from(id)).await.map_err(|error| match error {
            GovernanceError::ProposalNotFound { .. } => CheckError::NotFound(id),
            other => CheckError::Governance(other),
        })?;

        output::print_stage(Stage::Forked, format!("block {}", result.fork_block_number));
        let votes = &result.votes;
        output::print_stage(
            Stage::Voted,
            format!("{} of {} voters", votes.cast_count(), votes.entries.len()),
        );
        for (voter, outcome) in &votes.entries {
            output::print_vote(voter, outcome);
        }
        if votes.cast_count() == 0 {
            output::print_warning("no voter could cast a vote; the proposal cannot pass");
        }
        output::print_stage(Stage::Queued, format!("{} logs", result.queue_logs.len()));
        output::print_stage(Stage::Executed, format!("{} logs", result.execution_logs.len()));
        Ok(result)
    }

    /// ETA assigned when the proposal was queued.
    pub fn eta(result: &SimulationResult, id: u64) -> Result<U256, CheckError> {
        result.eta().ok_or(CheckError::MissingEta(id))
    }

    /// Read a view function at the fork head.
    pub async fn read<C: SolCall>(&self, to: Address, call: C) -> Result<C::Return, CheckError> {
        Ok(read_contract(self.harness.as_ref(), to, call, BlockTag::Latest).await?)
    }

    /// The governor must report the proposal as executed.
    pub async fn assert_executed(&self, id: u64) -> Result<(), CheckError> {
        let state = self
            .read(self.config().governor, IGovernorBravo::stateCall { proposalId: U256::from(id) })
            .await?;
        if ProposalState::from_u8(state) != Some(ProposalState::Executed) {
            return Err(CheckError::StateAssertion { id, state });
        }
        output::print_ok(&format!("proposal {id} executed"));
        Ok(())
    }

    /// Execution logs must match `expected` exactly.
    pub fn assert_events(
        &self,
        expected: &[ExpectedEvent],
        result: &SimulationResult,
    ) -> Result<(), CheckError> {
        validate_sequence(expected, &result.execution_logs)?;
        for (i, event) in expected.iter().enumerate() {
            output::print_event_ok(i + 1, &event.event_name, &event.origin);
        }
        output::print_ok("no unexpected events");
        Ok(())
    }

    /// Compare the timelock's token balance at the fork block with the head.
    pub async fn assert_treasury(
        &self,
        result: &SimulationResult,
        delta: BalanceDelta,
    ) -> Result<(), CheckError> {
        let token = self.config().token;
        let holder = result.timelock;
        let before = read_contract(
            self.harness.as_ref(),
            token,
            IVotingToken::balanceOfCall { account: holder },
            BlockTag::Number(result.fork_block_number),
        )
        .await?;
        let after = self.read(token, IVotingToken::balanceOfCall { account: holder }).await?;

        output::print_balance("before", before);
        output::print_balance("after", after);
        info!(target: "checks", %before, %after, %delta, "Treasury balance");

        if !delta.holds(before, after) {
            return Err(CheckError::BalanceAssertion { expected: delta.to_string(), before, after });
        }
        output::print_ok(&format!("treasury balance {delta}"));
        Ok(())
    }

    /// A value read from a contract must equal `expected`.
    pub fn assert_storage<T>(&self, what: &str, expected: &T, actual: &T) -> Result<(), CheckError>
    where
        T: PartialEq + fmt::Debug + ?Sized,
    {
        if expected != actual {
            return Err(CheckError::StorageAssertion {
                what: what.to_string(),
                expected: format!("{expected:?}"),
                actual: format!("{actual:?}"),
            });
        }
        output::print_ok(what);
        Ok(())
    }
}

/// Run the check for proposal `id`.
pub async fn run_check(ctx: &CheckContext, id: u64) -> Result<(), CheckError> {
    info!(target: "checks", id, "Running proposal check");
    match id {
        proposal_9::PROPOSAL_ID => proposal_9::check(ctx).await,
        proposal_10::PROPOSAL_ID => proposal_10::check(ctx).await,
        proposal_19::PROPOSAL_ID => proposal_19::check(ctx).await,
        proposal_20::PROPOSAL_ID => proposal_20::check(ctx).await,
        proposal_22::PROPOSAL_ID => proposal_22::check(ctx).await,
        proposal_23::PROPOSAL_ID => proposal_23::check(ctx).await,
        other => Err(CheckError::UnsupportedProposal(other)),
    }
}
