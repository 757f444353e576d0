use alloy_primitives::B256;
use jsonrpsee::core::ClientError;
use thiserror::Error;

/// Errors raised by a [`ChainHarness`](super::ChainHarness)
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Transport failure, timeout or JSON-RPC error from the node
    #[error("RPC error: {0}")]
    Rpc(#[from] ClientError),

    /// Forking requested without an upstream archive URL
    #[error("No fork URL configured (set --fork-url or MAINNET_URL)")]
    MissingForkUrl,

    /// Transaction or call reverted
    #[error("Execution reverted: {reason}")]
    Reverted {
        /// Revert reason as reported by the node
        reason: String,
    },

    /// Node accepted a transaction but has no receipt for it
    #[error("No receipt for transaction {0}")]
    MissingReceipt(B256),

    /// Mining did not land on the expected height
    #[error("Unexpected block height after mining: expected {expected}, got {actual}")]
    UnexpectedBlockHeight {
        /// Height before mining plus the requested block count
        expected: u64,
        /// Height reported afterwards
        actual: u64,
    },

    /// Node answered but refused the request
    #[error("Node rejected {0}")]
    Rejected(String),

    /// Return data of a contract call could not be decoded
    #[error("Failed to decode return of {function}: {reason}")]
    ReturnDecode {
        /// Solidity signature of the called function
        function: String,
        /// Decoder message
        reason: String,
    },
}

impl HarnessError {
    /// Whether this error is an EVM revert rather than an infrastructure failure.
    pub fn is_revert(&self) -> bool {
        matches!(self, Self::Reverted { .. })
    }
}
