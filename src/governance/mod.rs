//! Governance lifecycle driver.
//!
//! Replays a proposal on a fresh fork taken at its creation block:
//!
//! ```text
//! Located → Forked → PastReview → Voted → PastVoting → Queued → PastTimelock → Executed
//! ```
//!
//! Every delay is read from the contracts. Stages run strictly in order and
//! nothing is retried; the first fatal error aborts the run with the stage
//! it happened in.

pub mod errors;
pub mod voting;

pub use errors::GovernanceError;
pub use voting::{cast_yes_vote, classify_failure, VoteOutcome, VoteReport};

use alloy_primitives::{Address, U256};
use alloy_sol_types::SolCall;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::abi::contracts::{IGovernorBravo, ITimelock};
use crate::abi::{DecodedEvent, Interfaces};
use crate::config::GovernanceConfig;
use crate::harness::{read_contract, BlockTag, ChainHarness, Log, LogFilter};

/// Lifecycle stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Located,
    Forked,
    PastReview,
    Voted,
    PastVoting,
    Queued,
    PastTimelock,
    Executed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Located => "Locate",
            Self::Forked => "Fork",
            Self::PastReview => "Review period",
            Self::Voted => "Vote",
            Self::PastVoting => "Voting period",
            Self::Queued => "Queue",
            Self::PastTimelock => "Timelock delay",
            Self::Executed => "Execute",
        };
        f.write_str(name)
    }
}

/// Values of the governor's `state(uint256)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProposalState {
    Pending,
    Active,
    Canceled,
    Defeated,
    Succeeded,
    Queued,
    Expired,
    Executed,
}

impl ProposalState {
    pub fn from_u8(value: u8) -> Option<Self> {
        Some(match value {
            0 => Self::Pending,
            1 => Self::Active,
            2 => Self::Canceled,
            3 => Self::Defeated,
            4 => Self::Succeeded,
            5 => Self::Queued,
            6 => Self::Expired,
            7 => Self::Executed,
            _ => return None,
        })
    }
}

/// A `ProposalCreated` log found on chain.
#[derive(Debug, Clone)]
pub struct LocatedProposal {
    pub event: DecodedEvent,
    /// Block that contains the creation log
    pub block_number: u64,
}

/// Everything a check needs after a simulated execution.
#[derive(Debug, Clone)]
pub struct SimulationResult {
    pub proposal_id: U256,
    /// Height the fork was taken at
    pub fork_block_number: u64,
    /// Timelock the governor queues into
    pub timelock: Address,
    pub proposal_creation_event: DecodedEvent,
    /// Decoded logs of the `queue` transaction
    pub queue_logs: Vec<DecodedEvent>,
    /// Raw logs of the `execute` transaction, in emission order
    pub execution_logs: Vec<Log>,
    pub votes: VoteReport,
}

impl SimulationResult {
    /// ETA assigned at queue time.
    pub fn eta(&self) -> Option<U256> {
        self.queue_logs
            .iter()
            .find(|event| event.name == "ProposalQueued")
            .and_then(|event| event.uint("eta"))
            .or_else(|| self.queue_logs.iter().find_map(|event| event.uint("eta")))
    }
}

/// Drives one governor through the proposal lifecycle.
pub struct GovernanceDriver {
    harness: Arc<dyn ChainHarness>,
    config: GovernanceConfig,
    interfaces: Interfaces,
}

impl GovernanceDriver {
    pub fn new(
        harness: Arc<dyn ChainHarness>,
        config: GovernanceConfig,
        interfaces: Interfaces,
    ) -> Self {
        Self { harness, config, interfaces }
    }

    pub fn config(&self) -> &GovernanceConfig {
        &self.config
    }

    /// Find the `ProposalCreated` log for `id`.
    pub async fn locate(&self, id: U256) -> Result<LocatedProposal, GovernanceError> {
        let schema = self
            .interfaces
            .governor
            .event("ProposalCreated")
            .ok_or(GovernanceError::MissingSchema("ProposalCreated"))?;

        let filter = LogFilter {
            address: self.config.governor,
            topics: vec![schema.selector],
            from_block: BlockTag::Number(self.config.search_from_block),
            to_block: BlockTag::Latest,
        };
        let logs =
            self.harness.get_logs(filter).await.map_err(GovernanceError::at(Stage::Located))?;
        debug!(target: "governance", count = logs.len(), "Fetched ProposalCreated logs");

        for log in &logs {
            let event = schema.decode(log)?;
            if event.uint("id") == Some(id) {
                let block_number = log.block().ok_or(GovernanceError::MissingBlockNumber)?;
                return Ok(LocatedProposal { event, block_number });
            }
        }

        Err(GovernanceError::ProposalNotFound { id, from_block: self.config.search_from_block })
    }

    /// Fork at the proposal's creation block and run it to execution.
    pub async fn simulate(&self, id: U256) -> Result<SimulationResult, GovernanceError> {
        let harness = self.harness.as_ref();
        let governor = self.config.governor;

        let located = self.locate(id).await?;
        let fork_block_number = located.block_number;
        let start_block = located.event.uint("startBlock").ok_or(GovernanceError::MissingField {
            event: "ProposalCreated",
            field: "startBlock",
        })?;
        let start_block = to_u64("startBlock", start_block)?;
        info!(
            target: "governance",
            %id,
            block = fork_block_number,
            start_block,
            "Located proposal"
        );

        // Fork
        harness.fork(fork_block_number).await.map_err(GovernanceError::at(Stage::Forked))?;
        let timelock =
            read_contract(harness, governor, IGovernorBravo::timelockCall {}, BlockTag::Latest)
                .await
                .map_err(GovernanceError::at(Stage::Forked))?;

        // Review period
        let voting_delay = self
            .read_u64(
                Stage::PastReview,
                "votingDelay",
                governor,
                IGovernorBravo::votingDelayCall {},
            )
            .await?;
        harness
            .mine_blocks(voting_delay + 1)
            .await
            .map_err(GovernanceError::at(Stage::PastReview))?;
        info!(target: "governance", blocks = voting_delay + 1, "Advanced past review period");

        // Votes
        let mut votes = VoteReport::default();
        for &voter in &self.config.voters {
            let outcome =
                cast_yes_vote(harness, governor, self.config.token, id, start_block, voter)
                    .await
                    .map_err(GovernanceError::at(Stage::Voted))?;
            if outcome.is_cast() {
                info!(target: "governance", %voter, "Voted");
            } else {
                warn!(target: "governance", %voter, %outcome, "Could not vote");
            }
            votes.record(voter, outcome);
        }

        // Voting period
        let voting_period = self
            .read_u64(
                Stage::PastVoting,
                "votingPeriod",
                governor,
                IGovernorBravo::votingPeriodCall {},
            )
            .await?;
        harness.mine_blocks(voting_period).await.map_err(GovernanceError::at(Stage::PastVoting))?;
        info!(target: "governance", blocks = voting_period, "Advanced past voting period");

        // Queue
        let executor = harness
            .impersonate(self.config.executor)
            .await
            .map_err(GovernanceError::at(Stage::Queued))?;
        let queue = IGovernorBravo::queueCall { proposalId: id };
        let receipt = harness
            .send_transaction(&executor, governor, queue.abi_encode().into())
            .await
            .map_err(GovernanceError::at(Stage::Queued))?;
        let queue_logs = receipt
            .logs
            .iter()
            .map(|log| self.decode_queue_log(log, timelock))
            .collect::<Result<Vec<_>, _>>()?;
        info!(target: "governance", logs = queue_logs.len(), "Queued");

        // Timelock
        let delay =
            self.read_u64(Stage::PastTimelock, "delay", timelock, ITimelock::delayCall {}).await?;
        harness.advance_time(delay + 1).await.map_err(GovernanceError::at(Stage::PastTimelock))?;
        info!(target: "governance", seconds = delay + 1, "Advanced past timelock delay");

        // Execute
        let executor = harness
            .impersonate(self.config.executor)
            .await
            .map_err(GovernanceError::at(Stage::Executed))?;
        let execute = IGovernorBravo::executeCall { proposalId: id };
        let receipt = harness
            .send_transaction(&executor, governor, execute.abi_encode().into())
            .await
            .map_err(GovernanceError::at(Stage::Executed))?;
        info!(target: "governance", logs = receipt.logs.len(), "Executed");

        Ok(SimulationResult {
            proposal_id: id,
            fork_block_number,
            timelock,
            proposal_creation_event: located.event,
            queue_logs,
            execution_logs: receipt.logs,
            votes,
        })
    }

    async fn read_u64<C: SolCall<Return = U256>>(
        &self,
        stage: Stage,
        what: &'static str,
        to: Address,
        call: C,
    ) -> Result<u64, GovernanceError> {
        let value = read_contract(self.harness.as_ref(), to, call, BlockTag::Latest)
            .await
            .map_err(GovernanceError::at(stage))?;
        to_u64(what, value)
    }

    fn decode_queue_log(
        &self,
        log: &Log,
        timelock: Address,
    ) -> Result<DecodedEvent, GovernanceError> {
        let interface = if log.address == self.config.governor {
            &self.interfaces.governor
        } else if log.address == timelock {
            &self.interfaces.timelock
        } else {
            return Err(GovernanceError::UnexpectedQueueLog(log.address));
        };
        Ok(interface.decode_log(log)?)
    }
}

fn to_u64(what: &'static str, value: U256) -> Result<u64, GovernanceError> {
    u64::try_from(value).map_err(|_| GovernanceError::OutOfRange { what, value })
}
