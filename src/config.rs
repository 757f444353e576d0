use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::constants::{
    DEFAULT_EXECUTOR_ADDRESS, UNISWAP_GOVERNOR_ADDRESS, UNISWAP_VOTERS, UNI_ADDRESS,
};

/// Connection settings for the programmable node that hosts the fork.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HarnessConfig {
    /// JSON-RPC endpoint of the dev node (Hardhat or Anvil)
    pub node_url: String,
    /// Upstream archive endpoint the fork is taken from
    pub fork_url: String,
    /// Maximum number of in-flight `evm_mine` requests
    pub mine_concurrency: usize,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl HarnessConfig {
    /// Request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            node_url: "http://127.0.0.1:8545".to_string(),
            fork_url: String::new(),
            mine_concurrency: 64,
            request_timeout_secs: 300,
        }
    }
}

/// The governance system under test and the accounts used to drive it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GovernanceConfig {
    /// Governor contract (proposal lifecycle, votes, queue, execute)
    pub governor: Address,
    /// Voting token; also the treasury asset checked after execution
    pub token: Address,
    /// Account impersonated to submit `queue` and `execute`
    pub executor: Address,
    /// Ordered voter set; each casts a yes vote
    pub voters: Vec<Address>,
    /// First block scanned for `ProposalCreated` logs
    pub search_from_block: u64,
}

impl GovernanceConfig {
    /// Uniswap GovernorBravo on mainnet.
    pub fn uniswap() -> Self {
        Self {
            governor: UNISWAP_GOVERNOR_ADDRESS,
            token: UNI_ADDRESS,
            executor: DEFAULT_EXECUTOR_ADDRESS,
            voters: UNISWAP_VOTERS.to_vec(),
            search_from_block: 0,
        }
    }
}

impl Default for GovernanceConfig {
    fn default() -> Self {
        Self::uniswap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_harness_config() {
        let config = HarnessConfig::default();
        assert_eq!(config.node_url, "http://127.0.0.1:8545");
        assert!(config.fork_url.is_empty());
        assert_eq!(config.request_timeout(), Duration::from_secs(300));
    }

    #[test]
    fn test_uniswap_governance_config() {
        let config = GovernanceConfig::default();
        assert_eq!(config.governor, UNISWAP_GOVERNOR_ADDRESS);
        assert_eq!(config.voters.len(), 12);
        assert_eq!(config.voters[0], UNISWAP_VOTERS[0]);
    }

    #[test]
    fn test_harness_config_serde_camel_case() {
        let json = serde_json::to_value(HarnessConfig::default()).unwrap();
        assert!(json.get("nodeUrl").is_some());
        assert!(json.get("mineConcurrency").is_some());
    }
}
