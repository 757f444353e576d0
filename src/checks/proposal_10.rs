//! Proposal 10: must execute without touching the treasury.

use super::{BalanceDelta, CheckContext, CheckError};

pub const PROPOSAL_ID: u64 = 10;

pub async fn check(ctx: &CheckContext) -> Result<(), CheckError> {
    let result = ctx.simulate(PROPOSAL_ID).await?;
    ctx.assert_executed(PROPOSAL_ID).await?;
    ctx.assert_treasury(&result, BalanceDelta::Unchanged).await
}
