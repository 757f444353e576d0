//! Scripted in-memory harness for driver and check tests.

use alloy_primitives::{Address, Bytes, B256, U64};
use async_trait::async_trait;
use std::sync::Mutex;

use super::{BlockTag, ChainHarness, HarnessError, Impersonated, Log, LogFilter, Receipt};

/// What a scripted transaction does.
pub(crate) enum SendOutcome {
    /// Succeeds and emits these logs
    Logs(Vec<Log>),
    /// Reverts with this reason
    Revert(String),
    /// Fails below the EVM
    Fail(HarnessError),
}

type CallResponder = Box<dyn Fn(Address, &[u8], BlockTag) -> Option<Bytes> + Send + Sync>;
type SendResponder = Box<dyn Fn(Address, Address, &[u8]) -> SendOutcome + Send + Sync>;

/// Everything the mock observed.
#[derive(Debug, Default, Clone)]
pub(crate) struct MockState {
    pub block: u64,
    pub forked_at: Option<u64>,
    pub time_advanced: u64,
    /// Block counts of each `mine_blocks` call
    pub mined: Vec<u64>,
    pub impersonated: Vec<Address>,
    /// `(from, to, calldata)` of every transaction sent
    pub sent: Vec<(Address, Address, Bytes)>,
}

pub(crate) struct MockHarness {
    logs: Vec<Log>,
    on_call: CallResponder,
    on_send: SendResponder,
    pub state: Mutex<MockState>,
}

impl MockHarness {
    /// A harness serving `logs` from `get_logs`. Calls fail and sends
    /// succeed without logs until responders are installed.
    pub(crate) fn new(logs: Vec<Log>) -> Self {
        Self {
            logs,
            on_call: Box::new(|_, _, _| None),
            on_send: Box::new(|_, _, _| SendOutcome::Logs(vec![])),
            state: Mutex::new(MockState::default()),
        }
    }

    pub(crate) fn on_call(
        mut self,
        responder: impl Fn(Address, &[u8], BlockTag) -> Option<Bytes> + Send + Sync + 'static,
    ) -> Self {
        self.on_call = Box::new(responder);
        self
    }

    pub(crate) fn on_send(
        mut self,
        responder: impl Fn(Address, Address, &[u8]) -> SendOutcome + Send + Sync + 'static,
    ) -> Self {
        self.on_send = Box::new(responder);
        self
    }

    pub(crate) fn snapshot(&self) -> MockState {
        self.state.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChainHarness for MockHarness {
    async fn fork(&self, block_number: u64) -> Result<(), HarnessError> {
        let mut state = self.state.lock().unwrap();
        state.forked_at = Some(block_number);
        state.block = block_number;
        Ok(())
    }

    async fn block_number(&self) -> Result<u64, HarnessError> {
        Ok(self.state.lock().unwrap().block)
    }

    async fn mine_blocks(&self, count: u64) -> Result<(), HarnessError> {
        let mut state = self.state.lock().unwrap();
        state.block += count;
        state.mined.push(count);
        Ok(())
    }

    async fn advance_time(&self, seconds: u64) -> Result<(), HarnessError> {
        self.state.lock().unwrap().time_advanced += seconds;
        Ok(())
    }

    async fn impersonate(&self, address: Address) -> Result<Impersonated, HarnessError> {
        self.state.lock().unwrap().impersonated.push(address);
        Ok(Impersonated::new(address))
    }

    async fn send_transaction(
        &self,
        from: &Impersonated,
        to: Address,
        data: Bytes,
    ) -> Result<Receipt, HarnessError> {
        let block = {
            let mut state = self.state.lock().unwrap();
            state.sent.push((from.address(), to, data.clone()));
            state.block += 1;
            state.block
        };
        let logs = match (self.on_send)(from.address(), to, &data) {
            SendOutcome::Logs(logs) => logs,
            SendOutcome::Revert(reason) => return Err(HarnessError::Reverted { reason }),
            SendOutcome::Fail(error) => return Err(error),
        };
        Ok(Receipt {
            transaction_hash: B256::with_last_byte(block as u8),
            block_number: Some(U64::from(block)),
            status: Some(U64::from(1)),
            logs,
        })
    }

    async fn call(&self, to: Address, data: Bytes, block: BlockTag) -> Result<Bytes, HarnessError> {
        (self.on_call)(to, &data, block).ok_or_else(|| HarnessError::Reverted {
            reason: format!("no scripted response for call to {to}"),
        })
    }

    async fn get_logs(&self, filter: LogFilter) -> Result<Vec<Log>, HarnessError> {
        Ok(self.logs.iter().filter(|log| log.address == filter.address).cloned().collect())
    }
}

/// First four bytes of calldata.
pub(crate) fn selector(data: &[u8]) -> Option<[u8; 4]> {
    data.get(..4)?.try_into().ok()
}

/// Canned answers for the governor, timelock and token reads the driver makes.
#[derive(Debug, Clone)]
pub(crate) struct GovernanceScript {
    pub voting_delay: u64,
    pub voting_period: u64,
    pub timelock: Address,
    pub timelock_delay: u64,
    /// Voters with zero weight; everyone else has some
    pub weightless: Vec<Address>,
    /// Value returned by `state(uint256)`
    pub state: u8,
}

impl Default for GovernanceScript {
    fn default() -> Self {
        Self {
            voting_delay: 13_140,
            voting_period: 40_320,
            timelock: crate::constants::UNI_TIMELOCK_ADDRESS,
            timelock_delay: 172_800,
            weightless: vec![],
            state: 7,
        }
    }
}

impl GovernanceScript {
    pub(crate) fn respond(&self, data: &[u8]) -> Option<Bytes> {
        use crate::abi::contracts::{IGovernorBravo, ITimelock, IVotingToken};
        use alloy_primitives::U256;
        use alloy_sol_types::{SolCall, SolValue};

        let selector = selector(data)?;
        let encoded = if selector == IGovernorBravo::votingDelayCall::SELECTOR {
            U256::from(self.voting_delay).abi_encode()
        } else if selector == IGovernorBravo::votingPeriodCall::SELECTOR {
            U256::from(self.voting_period).abi_encode()
        } else if selector == IGovernorBravo::timelockCall::SELECTOR {
            self.timelock.abi_encode()
        } else if selector == IGovernorBravo::stateCall::SELECTOR {
            <alloy_sol_types::sol_data::Uint<8> as alloy_sol_types::SolType>::abi_encode(&self.state)
        } else if selector == ITimelock::delayCall::SELECTOR {
            U256::from(self.timelock_delay).abi_encode()
        } else if selector == IVotingToken::getPriorVotesCall::SELECTOR {
            let call = IVotingToken::getPriorVotesCall::abi_decode(data).ok()?;
            let weight = if self.weightless.contains(&call.account) { 0u64 } else { 1_000_000 };
            U256::from(weight).abi_encode()
        } else {
            return None;
        };
        Some(encoded.into())
    }
}

/// A `ProposalCreated` log for `id` mined at `block`.
pub(crate) fn proposal_created_log(
    interfaces: &crate::abi::Interfaces,
    governor: Address,
    id: u64,
    start_block: u64,
    block: u64,
) -> Log {
    use alloy_dyn_abi::DynSolValue;
    use alloy_primitives::U256;

    let uint = |v: u64| DynSolValue::Uint(U256::from(v), 256);
    let mut log = interfaces
        .governor
        .event("ProposalCreated")
        .expect("ProposalCreated schema")
        .encode_log(
            governor,
            vec![
                uint(id),
                DynSolValue::Address(Address::repeat_byte(0xaa)),
                DynSolValue::Array(vec![]),
                DynSolValue::Array(vec![]),
                DynSolValue::Array(vec![]),
                DynSolValue::Array(vec![]),
                uint(start_block),
                uint(start_block + 40_320),
                DynSolValue::String(format!("Proposal {id}")),
            ],
        );
    log.block_number = Some(U64::from(block));
    log
}
