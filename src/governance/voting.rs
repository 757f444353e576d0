use alloy_primitives::{Address, B256, U256};
use alloy_sol_types::SolCall;
use std::fmt;

use crate::abi::contracts::{IGovernorBravo, IVotingToken};
use crate::constants::VOTE_FOR;
use crate::harness::{read_contract, BlockTag, ChainHarness, HarnessError};

/// What happened when one voter tried to vote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteOutcome {
    /// Vote transaction mined
    Cast { tx_hash: B256 },
    /// Voter cannot vote on this proposal (no weight, already voted)
    Ineligible(String),
    /// Vote transaction reverted for another reason
    Reverted(String),
}

impl VoteOutcome {
    pub fn is_cast(&self) -> bool {
        matches!(self, Self::Cast { .. })
    }
}

impl fmt::Display for VoteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cast { tx_hash } => write!(f, "voted ({tx_hash})"),
            Self::Ineligible(reason) => write!(f, "ineligible: {reason}"),
            Self::Reverted(reason) => write!(f, "reverted: {reason}"),
        }
    }
}

/// Per-voter outcomes in voter order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoteReport {
    pub entries: Vec<(Address, VoteOutcome)>,
}

impl VoteReport {
    pub fn record(&mut self, voter: Address, outcome: VoteOutcome) {
        self.entries.push((voter, outcome));
    }

    /// Number of votes that made it on chain.
    pub fn cast_count(&self) -> usize {
        self.entries.iter().filter(|(_, outcome)| outcome.is_cast()).count()
    }

    pub fn outcome(&self, voter: Address) -> Option<&VoteOutcome> {
        self.entries.iter().find(|(v, _)| *v == voter).map(|(_, outcome)| outcome)
    }
}

/// Turn a vote failure into an outcome. Only reverts are absorbed.
pub fn classify_failure(error: HarnessError) -> Result<VoteOutcome, HarnessError> {
    match error {
        HarnessError::Reverted { reason } if reason.to_lowercase().contains("already voted") => {
            Ok(VoteOutcome::Ineligible(reason))
        }
        HarnessError::Reverted { reason } => Ok(VoteOutcome::Reverted(reason)),
        other => Err(other),
    }
}

/// Cast a yes vote for `voter`, skipping voters without weight at `start_block`.
pub async fn cast_yes_vote(
    harness: &dyn ChainHarness,
    governor: Address,
    token: Address,
    proposal_id: U256,
    start_block: u64,
    voter: Address,
) -> Result<VoteOutcome, HarnessError> {
    let attempt = async {
        let weight = read_contract(
            harness,
            token,
            IVotingToken::getPriorVotesCall {
                account: voter,
                blockNumber: U256::from(start_block),
            },
            BlockTag::Latest,
        )
        .await?;
        if weight.is_zero() {
            return Ok(VoteOutcome::Ineligible(format!("no voting weight at block {start_block}")));
        }

        let signer = harness.impersonate(voter).await?;
        let call = IGovernorBravo::castVoteCall { proposalId: proposal_id, support: VOTE_FOR };
        let receipt = harness.send_transaction(&signer, governor, call.abi_encode().into()).await?;
        Ok(VoteOutcome::Cast { tx_hash: receipt.transaction_hash })
    };

    match attempt.await {
        Ok(outcome) => Ok(outcome),
        Err(error) => classify_failure(error),
    }
}
