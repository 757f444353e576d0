//! Programmable-node harness.
//!
//! [`ChainHarness`] is the seam between the governance driver and the dev
//! node that hosts the fork. [`RpcHarness`] talks to a Hardhat or Anvil node
//! over HTTP JSON-RPC; tests use a scripted in-memory implementation.

pub mod api;
pub mod errors;
#[cfg(test)]
pub(crate) mod mock;
pub mod types;

pub use errors::HarnessError;
pub use types::{BlockTag, CallRequest, Log, LogFilter, Receipt};

use alloy_primitives::{Address, Bytes, B256};
use alloy_sol_types::SolCall;
use async_trait::async_trait;
use futures_util::{stream, StreamExt, TryStreamExt};
use jsonrpsee::{
    core::ClientError,
    http_client::{HttpClient, HttpClientBuilder},
};
use tracing::debug;

use crate::config::HarnessConfig;
use api::{EthApiClient, EvmApiClient, HardhatApiClient};
use types::{ForkingParams, ResetParams};

/// Proof that the node accepts transactions from an address.
///
/// Only [`ChainHarness::impersonate`] hands these out, so every
/// [`ChainHarness::send_transaction`] is preceded by an impersonation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Impersonated {
    address: Address,
}

impl Impersonated {
    pub(crate) fn new(address: Address) -> Self {
        Self { address }
    }

    /// The impersonated account.
    pub fn address(&self) -> Address {
        self.address
    }
}

/// Operations the governance driver needs from a forked chain.
#[async_trait]
pub trait ChainHarness: Send + Sync {
    /// Reset the node to a fork of the upstream chain at `block_number`.
    async fn fork(&self, block_number: u64) -> Result<(), HarnessError>;

    /// Current head height.
    async fn block_number(&self) -> Result<u64, HarnessError>;

    /// Mine exactly `count` empty blocks.
    async fn mine_blocks(&self, count: u64) -> Result<(), HarnessError>;

    /// Move the clock forward without mining.
    async fn advance_time(&self, seconds: u64) -> Result<(), HarnessError>;

    /// Unlock `address` for sending.
    async fn impersonate(&self, address: Address) -> Result<Impersonated, HarnessError>;

    /// Send a transaction and wait for its receipt.
    ///
    /// Reverts surface as [`HarnessError::Reverted`].
    async fn send_transaction(
        &self,
        from: &Impersonated,
        to: Address,
        data: Bytes,
    ) -> Result<Receipt, HarnessError>;

    /// Read-only call against the given block.
    async fn call(&self, to: Address, data: Bytes, block: BlockTag) -> Result<Bytes, HarnessError>;

    /// Query logs.
    async fn get_logs(&self, filter: LogFilter) -> Result<Vec<Log>, HarnessError>;
}

/// Call a view function and decode its return value.
pub async fn read_contract<H, C>(
    harness: &H,
    to: Address,
    call: C,
    block: BlockTag,
) -> Result<C::Return, HarnessError>
where
    H: ChainHarness + ?Sized,
    C: SolCall,
{
    let data = harness.call(to, call.abi_encode().into(), block).await?;
    C::abi_decode_returns(&data).map_err(|e| HarnessError::ReturnDecode {
        function: C::SIGNATURE.to_string(),
        reason: e.to_string(),
    })
}

/// [`ChainHarness`] backed by a Hardhat or Anvil node.
#[derive(Debug, Clone)]
pub struct RpcHarness {
    client: HttpClient,
    config: HarnessConfig,
}

impl RpcHarness {
    /// Build an HTTP client for `config.node_url`.
    pub fn new(config: HarnessConfig) -> Result<Self, HarnessError> {
        let client = HttpClientBuilder::default()
            .request_timeout(config.request_timeout())
            .build(&config.node_url)?;
        Ok(Self { client, config })
    }
}

/// JSON-RPC error code geth and Anvil use for `execution reverted`.
const EXECUTION_REVERTED_CODE: i32 = 3;

/// Whether a JSON-RPC error object reports an EVM revert.
///
/// Hardhat reports reverts as `-32603`/`-32000` with a `VM Exception` or
/// `reverted` message. Upstream fork failures share those codes.
fn is_revert_error(code: i32, message: &str) -> bool {
    let message = message.to_lowercase();
    code == EXECUTION_REVERTED_CODE
        || message.contains("revert")
        || message.contains("vm exception")
}

/// Reverts become [`HarnessError::Reverted`]; every other error, including
/// JSON-RPC error objects from the upstream node, stays an RPC error.
fn revert_or_rpc(error: ClientError) -> HarnessError {
    match error {
        ClientError::Call(object) if is_revert_error(object.code(), object.message()) => {
            HarnessError::Reverted { reason: object.message().to_string() }
        }
        other => HarnessError::Rpc(other),
    }
}

/// Hardhat answers `true` to `hardhat_*` control methods, Anvil `null`.
fn acknowledged(response: &serde_json::Value) -> bool {
    matches!(response, serde_json::Value::Null | serde_json::Value::Bool(true))
}

/// The head must sit exactly `count` blocks above `before`.
fn check_height(before: u64, count: u64, after: u64) -> Result<(), HarnessError> {
    let expected = before + count;
    if after != expected {
        return Err(HarnessError::UnexpectedBlockHeight { expected, actual: after });
    }
    Ok(())
}

/// A sent transaction must have a receipt with a success status.
fn confirmed(hash: B256, receipt: Option<Receipt>) -> Result<Receipt, HarnessError> {
    let receipt = receipt.ok_or(HarnessError::MissingReceipt(hash))?;
    if !receipt.succeeded() {
        return Err(HarnessError::Reverted { reason: format!("transaction {hash} reverted") });
    }
    Ok(receipt)
}

#[async_trait]
impl ChainHarness for RpcHarness {
    async fn fork(&self, block_number: u64) -> Result<(), HarnessError> {
        if self.config.fork_url.is_empty() {
            return Err(HarnessError::MissingForkUrl);
        }
        let params = ResetParams {
            forking: ForkingParams {
                json_rpc_url: self.config.fork_url.clone(),
                block_number,
            },
        };
        if !acknowledged(&self.client.reset(params).await?) {
            return Err(HarnessError::Rejected(format!("hardhat_reset to block {block_number}")));
        }
        debug!(target: "harness", block_number, "Forked");
        Ok(())
    }

    async fn block_number(&self) -> Result<u64, HarnessError> {
        Ok(self.client.block_number().await?.to::<u64>())
    }

    async fn mine_blocks(&self, count: u64) -> Result<(), HarnessError> {
        let before = self.block_number().await?;

        stream::iter(0..count)
            .map(|_| self.client.mine())
            .buffer_unordered(self.config.mine_concurrency.max(1))
            .try_for_each(|_| async { Ok(()) })
            .await?;

        let after = self.block_number().await?;
        check_height(before, count, after)?;
        debug!(target: "harness", count, head = after, "Mined blocks");
        Ok(())
    }

    async fn advance_time(&self, seconds: u64) -> Result<(), HarnessError> {
        self.client.increase_time(seconds).await?;
        debug!(target: "harness", seconds, "Advanced time");
        Ok(())
    }

    async fn impersonate(&self, address: Address) -> Result<Impersonated, HarnessError> {
        if !acknowledged(&self.client.impersonate_account(address).await?) {
            return Err(HarnessError::Rejected(format!("impersonation of {address}")));
        }
        Ok(Impersonated::new(address))
    }

    async fn send_transaction(
        &self,
        from: &Impersonated,
        to: Address,
        data: Bytes,
    ) -> Result<Receipt, HarnessError> {
        let request = CallRequest { from: Some(from.address()), to, data };
        let hash = self.client.send_transaction(request).await.map_err(revert_or_rpc)?;
        confirmed(hash, self.client.transaction_receipt(hash).await?)
    }

    async fn call(&self, to: Address, data: Bytes, block: BlockTag) -> Result<Bytes, HarnessError> {
        let request = CallRequest { from: None, to, data };
        self.client.call(request, block).await.map_err(revert_or_rpc)
    }

    async fn get_logs(&self, filter: LogFilter) -> Result<Vec<Log>, HarnessError> {
        Ok(self.client.logs(filter).await?)
    }
}
