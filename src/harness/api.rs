use alloy_primitives::{Address, Bytes, B256, U64};
use jsonrpsee::{core::RpcResult, proc_macros::rpc};

use super::types::{BlockTag, CallRequest, Log, LogFilter, Receipt, ResetParams};

/// The `hardhat_*` namespace (also served by Anvil).
#[rpc(client, namespace = "hardhat")]
pub trait HardhatApi {
    /// Re-fork the node from an upstream endpoint at a fixed height.
    #[method(name = "reset")]
    async fn reset(&self, params: ResetParams) -> RpcResult<serde_json::Value>;

    /// Allow transactions from `address` without its key.
    #[method(name = "impersonateAccount")]
    async fn impersonate_account(&self, address: Address) -> RpcResult<serde_json::Value>;
}

/// The `evm_*` namespace.
#[rpc(client, namespace = "evm")]
pub trait EvmApi {
    /// Mine one block.
    #[method(name = "mine")]
    async fn mine(&self) -> RpcResult<serde_json::Value>;

    /// Shift the timestamp of the next block forward.
    #[method(name = "increaseTime")]
    async fn increase_time(&self, seconds: u64) -> RpcResult<serde_json::Value>;
}

/// The subset of `eth_*` the harness needs.
#[rpc(client, namespace = "eth")]
pub trait EthApi {
    #[method(name = "blockNumber")]
    async fn block_number(&self) -> RpcResult<U64>;

    #[method(name = "call")]
    async fn call(&self, request: CallRequest, block: BlockTag) -> RpcResult<Bytes>;

    #[method(name = "sendTransaction")]
    async fn send_transaction(&self, request: CallRequest) -> RpcResult<B256>;

    #[method(name = "getTransactionReceipt")]
    async fn transaction_receipt(&self, hash: B256) -> RpcResult<Option<Receipt>>;

    #[method(name = "getLogs")]
    async fn logs(&self, filter: LogFilter) -> RpcResult<Vec<Log>>;
}
