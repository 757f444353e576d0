use alloy_primitives::{Address, Bytes, B256, U64};
use serde::{Deserialize, Serialize, Serializer};

/// Block selector for reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockTag {
    /// Head of the fork
    #[default]
    Latest,
    /// A specific height
    Number(u64),
}

impl Serialize for BlockTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Latest => serializer.serialize_str("latest"),
            Self::Number(n) => serializer.serialize_str(&format!("{n:#x}")),
        }
    }
}

/// Parameters of `hardhat_reset`.
#[derive(Debug, Clone, Serialize)]
pub struct ResetParams {
    pub forking: ForkingParams,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForkingParams {
    pub json_rpc_url: String,
    pub block_number: u64,
}

/// Request object shared by `eth_call` and `eth_sendTransaction`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<Address>,
    pub to: Address,
    pub data: Bytes,
}

/// Filter object of `eth_getLogs`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogFilter {
    pub address: Address,
    /// Topic constraints by position; an empty list matches everything
    pub topics: Vec<B256>,
    pub from_block: BlockTag,
    pub to_block: BlockTag,
}

/// A raw event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Log {
    /// Emitting contract
    pub address: Address,
    pub topics: Vec<B256>,
    pub data: Bytes,
    #[serde(default)]
    pub block_number: Option<U64>,
    #[serde(default)]
    pub transaction_hash: Option<B256>,
    #[serde(default)]
    pub log_index: Option<U64>,
}

impl Log {
    /// A log without block metadata.
    pub fn new(address: Address, topics: Vec<B256>, data: Bytes) -> Self {
        Self { address, topics, data, block_number: None, transaction_hash: None, log_index: None }
    }

    /// Height of the block that contains the log.
    pub fn block(&self) -> Option<u64> {
        self.block_number.map(|n| n.to::<u64>())
    }
}

/// The parts of a transaction receipt the tool uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub transaction_hash: B256,
    #[serde(default)]
    pub block_number: Option<U64>,
    /// `1` on success, `0` on revert; absent before Byzantium
    #[serde(default)]
    pub status: Option<U64>,
    #[serde(default)]
    pub logs: Vec<Log>,
}

impl Receipt {
    /// Whether the transaction did not revert.
    pub fn succeeded(&self) -> bool {
        !matches!(self.status, Some(status) if status.is_zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn test_block_tag_serialization() {
        assert_eq!(serde_json::to_value(BlockTag::Latest).unwrap(), "latest");
        assert_eq!(serde_json::to_value(BlockTag::Number(13_941_470)).unwrap(), "0xd4bade");
    }

    #[test]
    fn test_reset_params_shape() {
        let params = ResetParams {
            forking: ForkingParams {
                json_rpc_url: "https://archive.example".to_string(),
                block_number: 14_000_000,
            },
        };
        let json = serde_json::to_value(params).unwrap();
        assert_eq!(json["forking"]["jsonRpcUrl"], "https://archive.example");
        assert_eq!(json["forking"]["blockNumber"], 14_000_000);
    }

    #[test]
    fn test_call_request_omits_missing_from() {
        let request = CallRequest {
            from: None,
            to: address!("1f9840a85d5aF5bf1D1762F925BDADdC4201F984"),
            data: Bytes::from_static(&[0x70, 0xa0, 0x82, 0x31]),
        };
        let json = serde_json::to_value(request).unwrap();
        assert!(json.get("from").is_none());
        assert_eq!(json["data"], "0x70a08231");
    }

    #[test]
    fn test_receipt_from_rpc_json() {
        let receipt: Receipt = serde_json::from_value(serde_json::json!({
            "transactionHash": format!("{}", B256::repeat_byte(0xab)),
            "blockNumber": "0x10",
            "status": "0x0",
            "logs": [{
                "address": "0x1f9840a85d5af5bf1d1762f925bdaddc4201f984",
                "topics": [],
                "data": "0x",
                "logIndex": "0x2"
            }],
        }))
        .unwrap();
        assert!(!receipt.succeeded());
        assert_eq!(receipt.logs.len(), 1);
        assert_eq!(receipt.logs[0].log_index, Some(U64::from(2)));
        assert_eq!(receipt.logs[0].block(), None);
    }

    #[test]
    fn test_receipt_without_status_succeeds() {
        let receipt = Receipt {
            transaction_hash: B256::ZERO,
            block_number: None,
            status: None,
            logs: vec![],
        };
        assert!(receipt.succeeded());
    }
}
