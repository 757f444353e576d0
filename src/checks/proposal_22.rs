//! Proposal 22: pay 500,000 UNI from the treasury to the Protocol Guild
//! vesting contract.

use alloy_primitives::{address, Address, U256};
use alloy_sol_types::SolValue;

use super::timelock::{proposal_executed, TimelockCall};
use super::{BalanceDelta, CheckContext, CheckError};
use crate::abi::Interfaces;
use crate::config::GovernanceConfig;
use crate::validator::{Expected, ExpectedEvent};

pub const PROPOSAL_ID: u64 = 22;

pub const PROTOCOL_GUILD_VESTING_ADDRESS: Address =
    address!("F29Ff96aaEa6C9A1fBa851f74737f3c069d4f1a9");

/// 500,000 UNI in base units
pub fn payment() -> U256 {
    U256::from(500_000u64) * U256::from(10u64).pow(U256::from(18u64))
}

pub fn expected_events(
    interfaces: &Interfaces,
    config: &GovernanceConfig,
    timelock: Address,
    eta: U256,
) -> Vec<ExpectedEvent> {
    let transfer_args = (PROTOCOL_GUILD_VESTING_ADDRESS, payment()).abi_encode_params();

    vec![
        ExpectedEvent::new("Transfer", config.token, &interfaces.token)
            .field("from", Expected::address(timelock))
            .field("to", Expected::address(PROTOCOL_GUILD_VESTING_ADDRESS))
            .field("amount", Expected::uint(payment())),
        TimelockCall::new(config.token, "transfer(address,uint256)", transfer_args)
            .executed(interfaces, timelock, eta),
        proposal_executed(interfaces, config.governor, PROPOSAL_ID),
    ]
}

pub async fn check(ctx: &CheckContext) -> Result<(), CheckError> {
    let result = ctx.simulate(PROPOSAL_ID).await?;
    let eta = CheckContext::eta(&result, PROPOSAL_ID)?;
    ctx.assert_executed(PROPOSAL_ID).await?;

    let expected = expected_events(ctx.interfaces(), ctx.config(), result.timelock, eta);
    ctx.assert_events(&expected, &result)?;

    ctx.assert_treasury(&result, BalanceDelta::Decreased(payment())).await
}
