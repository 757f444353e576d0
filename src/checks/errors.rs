use alloy_primitives::U256;
use thiserror::Error;

use crate::abi::AbiError;
use crate::governance::GovernanceError;
use crate::harness::HarnessError;
use crate::validator::EventValidationError;

/// Errors that fail a proposal check
#[derive(Debug, Error)]
pub enum CheckError {
    /// No check exists for this proposal
    #[error(
        "No check for proposal {0} (supported: {supported:?})",
        supported = super::SUPPORTED_PROPOSALS
    )]
    UnsupportedProposal(u64),

    /// The governor has no such proposal
    #[error("Proposal {0} not found")]
    NotFound(u64),

    /// Governor reports a state other than Executed
    #[error("Proposal {id} not executed (state {state})")]
    StateAssertion {
        /// Proposal id
        id: u64,
        /// Raw value of `state(uint256)`
        state: u8,
    },

    /// Treasury moved by something other than the expected amount
    #[error("Treasury balance {expected}: before {before}, after {after}")]
    BalanceAssertion {
        /// Expected movement
        expected: String,
        /// Balance at the fork block
        before: U256,
        /// Balance after execution
        after: U256,
    },

    /// A contract read returned the wrong value
    #[error("{what}: expected {expected}, got {actual}")]
    StorageAssertion {
        /// What was read
        what: String,
        /// Expected value
        expected: String,
        /// Value on chain
        actual: String,
    },

    /// Queuing produced no ETA
    #[error("Queue logs of proposal {0} carry no eta")]
    MissingEta(u64),

    /// Simulation failed
    #[error(transparent)]
    Governance(#[from] GovernanceError),

    /// Execution logs did not match
    #[error(transparent)]
    Validation(#[from] EventValidationError),

    /// A contract read failed
    #[error(transparent)]
    Harness(#[from] HarnessError),

    /// Event tables could not be loaded
    #[error(transparent)]
    Abi(#[from] AbiError),
}
