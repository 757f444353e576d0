//! Proposal 20: create `v3-core-license-grants.uniswap.eth` under the
//! timelock and record the Gnosis additional use grant on it.

use alloy_primitives::{Address, U256};
use alloy_sol_types::SolValue;

use super::timelock::{proposal_executed, TimelockCall};
use super::{BalanceDelta, CheckContext, CheckError};
use crate::abi::contracts::{IEnsRegistry, IPublicResolver};
use crate::abi::Interfaces;
use crate::config::GovernanceConfig;
use crate::constants::{ENS_PUBLIC_RESOLVER_2_ADDRESS, ENS_REGISTRY_WITH_FALLBACK_ADDRESS};
use crate::ens::{labelhash, namehash};
use crate::validator::{Expected, ExpectedEvent};

pub const PROPOSAL_ID: u64 = 20;

pub const PARENT_NAME: &str = "uniswap.eth";
pub const LICENSE_LABEL: &str = "v3-core-license-grants";
pub const LICENSE_GRANTS_NAME: &str = "v3-core-license-grants.uniswap.eth";

/// The key carries literal double quotes.
pub const GNOSIS_TEXT_KEY: &str = "\"Gnosis LTD Uni v3 Additional Use Grant\"";
pub const GNOSIS_TEXT: &str = include_str!("grants/gnosis.txt");

/// Grant already on the resolver, which must survive the proposal.
pub const VOLTZ_TEXT_KEY: &str = "Voltz Uni v3 Additional Use Grant";
pub const VOLTZ_TEXT: &str = include_str!("grants/voltz.txt");

pub fn expected_events(
    interfaces: &Interfaces,
    config: &GovernanceConfig,
    timelock: Address,
    eta: U256,
) -> Vec<ExpectedEvent> {
    let parent = namehash(PARENT_NAME);
    let license = namehash(LICENSE_GRANTS_NAME);
    let subnode_args = (
        parent,
        labelhash(LICENSE_LABEL),
        timelock,
        ENS_PUBLIC_RESOLVER_2_ADDRESS,
        0u64,
    )
        .abi_encode_params();
    let text_args =
        (license, GNOSIS_TEXT_KEY.to_string(), GNOSIS_TEXT.to_string()).abi_encode_params();

    vec![
        ExpectedEvent::new("NewOwner", ENS_REGISTRY_WITH_FALLBACK_ADDRESS, &interfaces.ens_registry)
            .field("node", Expected::word(parent))
            .field("label", Expected::hashed(LICENSE_LABEL))
            .field("owner", Expected::address(timelock)),
        TimelockCall::new(
            ENS_REGISTRY_WITH_FALLBACK_ADDRESS,
            "setSubnodeRecord(bytes32,bytes32,address,address,uint64)",
            subnode_args,
        )
        .executed(interfaces, timelock, eta),
        ExpectedEvent::new(
            "TextChanged",
            ENS_PUBLIC_RESOLVER_2_ADDRESS,
            &interfaces.public_resolver,
        )
        .field("node", Expected::word(license))
        .field("indexedKey", Expected::text(GNOSIS_TEXT_KEY))
        .field("key", Expected::text(GNOSIS_TEXT_KEY)),
        TimelockCall::new(
            ENS_PUBLIC_RESOLVER_2_ADDRESS,
            "setText(bytes32,string,string)",
            text_args,
        )
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
    ctx.assert_treasury(&result, BalanceDelta::Unchanged).await?;

    let node = namehash(LICENSE_GRANTS_NAME);
    let owner =
        ctx.read(ENS_REGISTRY_WITH_FALLBACK_ADDRESS, IEnsRegistry::ownerCall { node }).await?;
    ctx.assert_storage("license domain owned by the timelock", &result.timelock, &owner)?;

    for (what, key, text) in [
        ("Gnosis grant text uploaded", GNOSIS_TEXT_KEY, GNOSIS_TEXT),
        ("Voltz grant text preserved", VOLTZ_TEXT_KEY, VOLTZ_TEXT),
    ] {
        let text_call = IPublicResolver::textCall { node, key: key.to_string() };
        let stored = ctx.read(ENS_PUBLIC_RESOLVER_2_ADDRESS, text_call).await?;
        ctx.assert_storage(what, text, stored.as_str())?;
    }
    Ok(())
}
