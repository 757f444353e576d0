//! Proposal 9: enable the 1bp fee tier on the Uniswap v3 factory.

use alloy_primitives::aliases::{I24, U24};

use super::{CheckContext, CheckError};
use crate::abi::contracts::IUniswapV3Factory;
use crate::constants::UNISWAP_V3_FACTORY_ADDRESS;

pub const PROPOSAL_ID: u64 = 9;

/// Fee tier in hundredths of a bip
pub const FEE: u16 = 100;

pub async fn check(ctx: &CheckContext) -> Result<(), CheckError> {
    ctx.simulate(PROPOSAL_ID).await?;
    ctx.assert_executed(PROPOSAL_ID).await?;

    let tick_spacing = ctx
        .read(
            UNISWAP_V3_FACTORY_ADDRESS,
            IUniswapV3Factory::feeAmountTickSpacingCall { fee: U24::from(FEE) },
        )
        .await?;
    ctx.assert_storage("tick spacing is correct", &I24::ONE, &tick_spacing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::run_check;
    use crate::checks::tests::context;
    use crate::harness::mock::selector;
    use alloy_dyn_abi::DynSolValue;
    use alloy_primitives::{Address, I256, U256};
    use alloy_sol_types::SolCall;

    fn factory(spacing: i64) -> impl Fn(Address, &[u8]) -> Option<Vec<u8>> + Send + Sync + 'static {
        move |to, data| {
            (to == UNISWAP_V3_FACTORY_ADDRESS
                && selector(data) == Some(IUniswapV3Factory::feeAmountTickSpacingCall::SELECTOR))
            .then(|| DynSolValue::Int(I256::try_from(spacing).unwrap(), 24).abi_encode())
        }
    }

    #[tokio::test]
    async fn test_proposal_9_tick_spacing_one_passes() {
        let ctx = context(PROPOSAL_ID, vec![], U256::ZERO, U256::ZERO, factory(1));
        run_check(&ctx, PROPOSAL_ID).await.unwrap();
    }

    #[tokio::test]
    async fn test_proposal_9_disabled_tier_fails() {
        let ctx = context(PROPOSAL_ID, vec![], U256::ZERO, U256::ZERO, factory(0));
        assert!(matches!(
            run_check(&ctx, PROPOSAL_ID).await,
            Err(CheckError::StorageAssertion { .. })
        ));
    }
}
