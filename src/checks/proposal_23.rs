//! Proposal 23: enable the 1bp fee tier on the Optimism v3 factory by
//! sending a cross-domain message through the L1 messenger.
//!
//! The message travels L1 messenger -> canonical transaction chain ->
//! L2 messenger -> Uniswap's cross-chain account, which forwards
//! `enableFeeAmount` to the L2 factory. Only the L1 side is observable on a
//! mainnet fork.

use alloy_primitives::aliases::{I24, U160, U24};
use alloy_primitives::{address, Address, Bytes, U256};
use alloy_sol_types::SolCall;

use super::timelock::{proposal_executed, TimelockCall};
use super::{BalanceDelta, CheckContext, CheckError};
use crate::abi::contracts::{
    ICrossChainAccount, IL1CrossDomainMessenger, IL2CrossDomainMessenger, IUniswapV3Factory,
};
use crate::abi::Interfaces;
use crate::config::GovernanceConfig;
use crate::constants::{
    OVM_CANONICAL_TRANSACTION_CHAIN_ADDRESS, OVM_L1_CROSS_DOMAIN_MESSENGER_ADDRESS,
    OVM_L2_CROSS_DOMAIN_MESSENGER_ADDRESS, UNISWAP_OVM_CROSS_CHAIN_ACCOUNT_ADDRESS,
    UNISWAP_V3_FACTORY_ADDRESS,
};
use crate::validator::{Expected, ExpectedEvent};

pub const PROPOSAL_ID: u64 = 23;

/// Fee tier in hundredths of a bip
pub const FEE: u16 = 100;
/// L2 gas limit attached to the message
pub const GAS_LIMIT: u32 = 3_000_000;
/// Messenger nonce the proposal's message was assigned on mainnet
pub const MESSAGE_NONCE: u64 = 122_160;

/// Offset added to an L1 contract address when it calls into L2.
const L1_TO_L2_ALIAS_OFFSET: Address = address!("1111000000000000000000000000000000001111");

/// Address an L1 contract appears as on L2: `l1 + 0x1111…1111 mod 2^160`.
pub fn l1_to_l2_alias(l1: Address) -> Address {
    let offset = U160::from_be_bytes(L1_TO_L2_ALIAS_OFFSET.0 .0);
    Address::from(U160::from_be_bytes(l1.0 .0).wrapping_add(offset))
}

/// `forward(factory, enableFeeAmount(100, 1))` for the cross-chain account.
pub fn forward_calldata() -> Bytes {
    let enable =
        IUniswapV3Factory::enableFeeAmountCall { fee: U24::from(FEE), tickSpacing: I24::ONE };
    ICrossChainAccount::forwardCall {
        target: UNISWAP_V3_FACTORY_ADDRESS,
        data: enable.abi_encode().into(),
    }
    .abi_encode()
    .into()
}

/// Calldata the timelock sends to the L1 messenger.
pub fn send_message_calldata() -> Bytes {
    IL1CrossDomainMessenger::sendMessageCall {
        _target: UNISWAP_OVM_CROSS_CHAIN_ACCOUNT_ADDRESS,
        _message: forward_calldata(),
        _gasLimit: GAS_LIMIT,
    }
    .abi_encode()
    .into()
}

/// Calldata the L2 messenger will be asked to run, as enqueued on L1.
pub fn relay_message_calldata(timelock: Address) -> Bytes {
    IL2CrossDomainMessenger::relayMessageCall {
        _target: UNISWAP_OVM_CROSS_CHAIN_ACCOUNT_ADDRESS,
        _sender: timelock,
        _message: forward_calldata(),
        _messageNonce: U256::from(MESSAGE_NONCE),
    }
    .abi_encode()
    .into()
}

pub fn expected_events(
    interfaces: &Interfaces,
    config: &GovernanceConfig,
    timelock: Address,
    eta: U256,
) -> Vec<ExpectedEvent> {
    vec![
        ExpectedEvent::new(
            "TransactionEnqueued",
            OVM_CANONICAL_TRANSACTION_CHAIN_ADDRESS,
            &interfaces.canonical_transaction_chain,
        )
        .field(
            "_l1TxOrigin",
            Expected::address(l1_to_l2_alias(OVM_L1_CROSS_DOMAIN_MESSENGER_ADDRESS)),
        )
        .field("_target", Expected::address(OVM_L2_CROSS_DOMAIN_MESSENGER_ADDRESS))
        .field("_gasLimit", Expected::uint(GAS_LIMIT))
        .field("_data", Expected::bytes(relay_message_calldata(timelock)))
        .field("_queueIndex", Expected::any())
        .field("_timestamp", Expected::any()),
        ExpectedEvent::new(
            "SentMessage",
            OVM_L1_CROSS_DOMAIN_MESSENGER_ADDRESS,
            &interfaces.l1_messenger,
        )
        .field("target", Expected::address(UNISWAP_OVM_CROSS_CHAIN_ACCOUNT_ADDRESS))
        .field("sender", Expected::address(timelock))
        .field("message", Expected::bytes(forward_calldata()))
        .field("messageNonce", Expected::uint(MESSAGE_NONCE))
        .field("gasLimit", Expected::uint(GAS_LIMIT)),
        TimelockCall::new(OVM_L1_CROSS_DOMAIN_MESSENGER_ADDRESS, "", send_message_calldata())
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

    ctx.assert_treasury(&result, BalanceDelta::Unchanged).await
}
