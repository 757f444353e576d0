//! Expectations shared by every proposal: the timelock's `ExecuteTransaction`
//! and the governor's `ProposalExecuted`.

use alloy_primitives::{keccak256, Address, Bytes, B256, U256};
use alloy_sol_types::SolValue;

use crate::abi::Interfaces;
use crate::validator::{Expected, ExpectedEvent};

/// Key of a queued timelock transaction:
/// keccak256(abi.encode(target, value, signature, data, eta)).
pub fn timelock_tx_hash(
    target: Address,
    value: U256,
    signature: &str,
    data: &Bytes,
    eta: U256,
) -> B256 {
    keccak256((target, value, signature.to_string(), data.clone(), eta).abi_encode_params())
}

/// A call the timelock makes on the proposal's behalf.
///
/// With an empty `signature`, `data` is full calldata including the selector;
/// otherwise it holds only the encoded arguments.
#[derive(Debug, Clone)]
pub struct TimelockCall {
    pub target: Address,
    pub value: U256,
    pub signature: String,
    pub data: Bytes,
}

impl TimelockCall {
    pub fn new(target: Address, signature: &str, data: impl Into<Bytes>) -> Self {
        Self { target, value: U256::ZERO, signature: signature.to_string(), data: data.into() }
    }

    /// `ExecuteTransaction` the timelock emits for this call.
    pub fn executed(&self, interfaces: &Interfaces, timelock: Address, eta: U256) -> ExpectedEvent {
        let tx_hash = timelock_tx_hash(self.target, self.value, &self.signature, &self.data, eta);
        ExpectedEvent::new("ExecuteTransaction", timelock, &interfaces.timelock)
            .field("txHash", Expected::word(tx_hash))
            .field("target", Expected::address(self.target))
            .field("value", Expected::uint(self.value))
            .field("signature", Expected::text(self.signature.as_str()))
            .field("data", Expected::bytes(self.data.clone()))
            .field("eta", Expected::uint(eta))
    }
}

/// `ProposalExecuted(id)` from the governor, always the last event.
pub fn proposal_executed(interfaces: &Interfaces, governor: Address, id: u64) -> ExpectedEvent {
    ExpectedEvent::new("ProposalExecuted", governor, &interfaces.governor)
        .field("id", Expected::uint(id))
}
