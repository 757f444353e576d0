use proposal_check::abi::Interfaces;
use proposal_check::checks::{self, CheckContext};
use proposal_check::cli::Cli;
use proposal_check::harness::RpcHarness;
use proposal_check::output;

use clap::Parser;
use std::{process, sync::Arc};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    reth_tracing::init_test_tracing();

    let cli = Cli::parse();
    let harness_config = cli.harness_config();
    output::print_banner(cli.proposal, &harness_config.node_url);

    let harness = RpcHarness::new(harness_config)?;
    let interfaces = Interfaces::load()?;
    let ctx = CheckContext::new(Arc::new(harness), interfaces, cli.governance_config());

    if let Err(error) = checks::run_check(&ctx, cli.proposal).await {
        output::print_failure(cli.proposal, &error);
        process::exit(1);
    }

    output::print_passed(cli.proposal);
    Ok(())
}
