use alloy_primitives::{Address, U256};
use thiserror::Error;

use super::Stage;
use crate::abi::DecodeError;
use crate::harness::HarnessError;

/// Errors that abort a proposal simulation
#[derive(Debug, Error)]
pub enum GovernanceError {
    /// No `ProposalCreated` log carries the requested id
    #[error("Proposal {id} not found in ProposalCreated logs since block {from_block}")]
    ProposalNotFound {
        /// Requested proposal id
        id: U256,
        /// First block searched
        from_block: u64,
    },

    /// The governor interface lacks an event the driver relies on
    #[error("Governor interface has no {0} event")]
    MissingSchema(&'static str),

    /// A decoded event lacks a field the driver relies on
    #[error("{event} has no field {field}")]
    MissingField {
        /// Event name
        event: &'static str,
        /// Field name
        field: &'static str,
    },

    /// The node returned a log without block metadata
    #[error("ProposalCreated log has no block number")]
    MissingBlockNumber,

    /// A contract value does not fit the driver's counters
    #[error("{what} = {value} does not fit in 64 bits")]
    OutOfRange {
        /// Name of the value
        what: &'static str,
        /// The value read
        value: U256,
    },

    /// Queuing emitted a log from neither the governor nor the timelock
    #[error("Unexpected log from {0} while queuing")]
    UnexpectedQueueLog(Address),

    /// A log could not be decoded
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The harness failed while entering a stage
    #[error("{stage} failed: {source}")]
    Harness {
        /// Stage being entered
        stage: Stage,
        /// Underlying failure
        #[source]
        source: HarnessError,
    },
}

impl GovernanceError {
    /// Tag a harness failure with the stage being entered.
    pub(crate) fn at(stage: Stage) -> impl FnOnce(HarnessError) -> Self {
        move |source| Self::Harness { stage, source }
    }
}
