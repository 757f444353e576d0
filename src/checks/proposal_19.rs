//! Proposal 19: record the Illusory Systems additional use grant under
//! `v3-core-license-grants.uniswap.eth`.

use alloy_primitives::{Address, U256};
use alloy_sol_types::SolCall;

use super::timelock::{proposal_executed, TimelockCall};
use super::{BalanceDelta, CheckContext, CheckError};
use crate::abi::contracts::{IEnsRegistry, IPublicResolver};
use crate::abi::Interfaces;
use crate::config::GovernanceConfig;
use crate::constants::{ENS_PUBLIC_RESOLVER_2_ADDRESS, ENS_REGISTRY_WITH_FALLBACK_ADDRESS};
use crate::ens::namehash;
use crate::validator::{Expected, ExpectedEvent};

pub const PROPOSAL_ID: u64 = 19;

pub const LICENSE_GRANTS_NAME: &str = "v3-core-license-grants.uniswap.eth";
pub const TEXT_KEY: &str = "Illusory Systems, Inc. Uni v3 Additional Use Grant";
pub const TEXT: &str = include_str!("grants/illusory.txt");

/// `setText` calldata the timelock sends to the resolver.
fn set_text_calldata() -> Vec<u8> {
    IPublicResolver::setTextCall {
        node: namehash(LICENSE_GRANTS_NAME),
        key: TEXT_KEY.to_string(),
        value: TEXT.to_string(),
    }
    .abi_encode()
}

pub fn expected_events(
    interfaces: &Interfaces,
    config: &GovernanceConfig,
    timelock: Address,
    eta: U256,
) -> Vec<ExpectedEvent> {
    vec![
        ExpectedEvent::new(
            "TextChanged",
            ENS_PUBLIC_RESOLVER_2_ADDRESS,
            &interfaces.public_resolver,
        )
        .field("node", Expected::word(namehash(LICENSE_GRANTS_NAME)))
        .field("indexedKey", Expected::text(TEXT_KEY))
        .field("key", Expected::text(TEXT_KEY)),
        TimelockCall::new(ENS_PUBLIC_RESOLVER_2_ADDRESS, "", set_text_calldata())
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

    let text_call = IPublicResolver::textCall { node, key: TEXT_KEY.to_string() };
    let text = ctx.read(ENS_PUBLIC_RESOLVER_2_ADDRESS, text_call).await?;
    ctx.assert_storage("grant text uploaded to the resolver", TEXT, text.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::run_check;
    use crate::checks::tests::{context, ETA};
    use crate::checks::timelock::timelock_tx_hash;
    use crate::constants::{UNISWAP_GOVERNOR_ADDRESS, UNI_TIMELOCK_ADDRESS};
    use crate::harness::mock::selector;
    use crate::harness::Log;
    use alloy_dyn_abi::DynSolValue;
    use alloy_primitives::Bytes;
    use alloy_sol_types::SolValue;

    fn execution_logs(interfaces: &Interfaces, key: &str) -> Vec<Log> {
        let eta = U256::from(ETA);
        let data: Bytes = set_text_calldata().into();
        vec![
            interfaces.public_resolver.event("TextChanged").unwrap().encode_log(
                ENS_PUBLIC_RESOLVER_2_ADDRESS,
                vec![
                    DynSolValue::FixedBytes(namehash(LICENSE_GRANTS_NAME), 32),
                    DynSolValue::String(key.to_string()),
                    DynSolValue::String(key.to_string()),
                ],
            ),
            interfaces.timelock.event("ExecuteTransaction").unwrap().encode_log(
                UNI_TIMELOCK_ADDRESS,
                vec![
                    DynSolValue::FixedBytes(
                        timelock_tx_hash(ENS_PUBLIC_RESOLVER_2_ADDRESS, U256::ZERO, "", &data, eta),
                        32,
                    ),
                    DynSolValue::Address(ENS_PUBLIC_RESOLVER_2_ADDRESS),
                    DynSolValue::Uint(U256::ZERO, 256),
                    DynSolValue::String(String::new()),
                    DynSolValue::Bytes(data.to_vec()),
                    DynSolValue::Uint(eta, 256),
                ],
            ),
            interfaces
                .governor
                .event("ProposalExecuted")
                .unwrap()
                .encode_log(
                    UNISWAP_GOVERNOR_ADDRESS,
                    vec![DynSolValue::Uint(U256::from(PROPOSAL_ID), 256)],
                ),
        ]
    }

    fn ens(
        text: &'static str,
    ) -> impl Fn(Address, &[u8]) -> Option<Vec<u8>> + Send + Sync + 'static {
        move |_, data| {
            let selector = selector(data)?;
            if selector == IEnsRegistry::ownerCall::SELECTOR {
                Some(UNI_TIMELOCK_ADDRESS.abi_encode())
            } else if selector == IPublicResolver::textCall::SELECTOR {
                Some(text.to_string().abi_encode())
            } else {
                None
            }
        }
    }

    #[test]
    fn test_grant_text_embedded() {
        assert!(TEXT.starts_with("\n    Illusory Systems, Inc. Uni v3 Additional Use Grant"));
        assert!(TEXT.ends_with("LICENSE."));
    }

    #[tokio::test]
    async fn test_proposal_19_passes() {
        let interfaces = Interfaces::load().unwrap();
        let logs = execution_logs(&interfaces, TEXT_KEY);
        let ctx = context(PROPOSAL_ID, logs, U256::ZERO, U256::ZERO, ens(TEXT));
        run_check(&ctx, PROPOSAL_ID).await.unwrap();
    }

    #[tokio::test]
    async fn test_proposal_19_wrong_key_fails() {
        let interfaces = Interfaces::load().unwrap();
        let logs = execution_logs(&interfaces, "Someone else's grant");
        let ctx = context(PROPOSAL_ID, logs, U256::ZERO, U256::ZERO, ens(TEXT));
        assert!(matches!(run_check(&ctx, PROPOSAL_ID).await, Err(CheckError::Validation(_))));
    }

    #[tokio::test]
    async fn test_proposal_19_wrong_text_fails() {
        let interfaces = Interfaces::load().unwrap();
        let logs = execution_logs(&interfaces, TEXT_KEY);
        let ctx = context(PROPOSAL_ID, logs, U256::ZERO, U256::ZERO, ens("tampered"));
        assert!(matches!(
            run_check(&ctx, PROPOSAL_ID).await,
            Err(CheckError::StorageAssertion { .. })
        ));
    }
}
