use clap::Parser;

use crate::config::{GovernanceConfig, HarnessConfig};

/// CLI arguments for a proposal check run
#[derive(Parser, Debug)]
#[command(
    name = "proposal-check",
    about = "Simulate a Uniswap governance proposal on a mainnet fork"
)]
pub struct Cli {
    /// Id of the proposal to simulate and check
    pub proposal: u64,

    /// JSON-RPC endpoint of the dev node (Hardhat or Anvil) hosting the fork
    #[arg(long, env = "NODE_URL", default_value = "http://127.0.0.1:8545")]
    pub node_url: String,

    /// Archive node the fork is taken from.
    /// Required: the run fails at the fork stage without it.
    #[arg(long, env = "MAINNET_URL", default_value = "")]
    pub fork_url: String,

    /// First block scanned for the proposal's `ProposalCreated` log
    #[arg(long, env = "SEARCH_FROM_BLOCK", default_value = "0")]
    pub search_from_block: u64,

    /// Maximum number of `evm_mine` requests in flight while skipping blocks
    #[arg(long, default_value = "64", value_parser = clap::value_parser!(u64).range(1..))]
    pub mine_concurrency: u64,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "300")]
    pub request_timeout: u64,
}

impl Cli {
    pub fn harness_config(&self) -> HarnessConfig {
        HarnessConfig {
            node_url: self.node_url.clone(),
            fork_url: self.fork_url.clone(),
            mine_concurrency: self.mine_concurrency as usize,
            request_timeout_secs: self.request_timeout,
        }
    }

    pub fn governance_config(&self) -> GovernanceConfig {
        GovernanceConfig {
            search_from_block: self.search_from_block,
            ..GovernanceConfig::uniswap()
        }
    }
}
