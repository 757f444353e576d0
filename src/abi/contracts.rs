//! Contract bindings.
//!
//! Functions are bound with `sol!` (calls are always encoded the same way);
//! events are kept as signature tables so the validator can look them up by
//! name and decode them field by field.

use alloy_sol_types::sol;
use std::sync::Arc;

use super::{AbiError, ContractInterface};

sol! {
    /// GovernorBravoDelegate, reached through the delegator proxy.
    interface IGovernorBravo {
        function votingDelay() external view returns (uint256);
        function votingPeriod() external view returns (uint256);
        function timelock() external view returns (address);
        function state(uint256 proposalId) external view returns (uint8);
        function castVote(uint256 proposalId, uint8 support) external;
        function queue(uint256 proposalId) external;
        function execute(uint256 proposalId) external payable;
    }

    /// Compound-style timelock.
    interface ITimelock {
        function delay() external view returns (uint256);
    }

    /// Checkpointed voting token (UNI).
    interface IVotingToken {
        function balanceOf(address account) external view returns (uint256);
        function getPriorVotes(address account, uint256 blockNumber) external view returns (uint96);
    }

    interface IEnsRegistry {
        function owner(bytes32 node) external view returns (address);
        function setSubnodeRecord(bytes32 node, bytes32 label, address owner, address resolver, uint64 ttl) external;
    }

    interface IPublicResolver {
        function text(bytes32 node, string memory key) external view returns (string memory);
        function setText(bytes32 node, string memory key, string memory value) external;
    }

    interface IUniswapV3Factory {
        function feeAmountTickSpacing(uint24 fee) external view returns (int24);
        function enableFeeAmount(uint24 fee, int24 tickSpacing) external;
    }

    /// Uniswap's L2 account that replays calls forwarded from L1 governance.
    interface ICrossChainAccount {
        function forward(address target, bytes memory data) external;
    }

    interface IL1CrossDomainMessenger {
        function sendMessage(address _target, bytes memory _message, uint32 _gasLimit) external;
    }

    interface IL2CrossDomainMessenger {
        function relayMessage(address _target, address _sender, bytes memory _message, uint256 _messageNonce) external;
    }
}

pub const GOVERNOR_EVENTS: &[&str] = &[
    "event ProposalCreated(uint256 id, address proposer, address[] targets, uint256[] values, string[] signatures, bytes[] calldatas, uint256 startBlock, uint256 endBlock, string description)",
    "event VoteCast(address indexed voter, uint256 proposalId, uint8 support, uint256 votes, string reason)",
    "event ProposalCanceled(uint256 id)",
    "event ProposalQueued(uint256 id, uint256 eta)",
    "event ProposalExecuted(uint256 id)",
];

pub const TIMELOCK_EVENTS: &[&str] = &[
    "event NewDelay(uint256 indexed newDelay)",
    "event CancelTransaction(bytes32 indexed txHash, address indexed target, uint256 value, string signature, bytes data, uint256 eta)",
    "event ExecuteTransaction(bytes32 indexed txHash, address indexed target, uint256 value, string signature, bytes data, uint256 eta)",
    "event QueueTransaction(bytes32 indexed txHash, address indexed target, uint256 value, string signature, bytes data, uint256 eta)",
];

pub const TOKEN_EVENTS: &[&str] = &[
    "event Transfer(address indexed from, address indexed to, uint256 amount)",
    "event Approval(address indexed owner, address indexed spender, uint256 amount)",
    "event DelegateChanged(address indexed delegator, address indexed fromDelegate, address indexed toDelegate)",
    "event DelegateVotesChanged(address indexed delegate, uint256 previousBalance, uint256 newBalance)",
];

pub const ENS_REGISTRY_EVENTS: &[&str] = &[
    "event NewOwner(bytes32 indexed node, bytes32 indexed label, address owner)",
    "event Transfer(bytes32 indexed node, address owner)",
    "event NewResolver(bytes32 indexed node, address resolver)",
    "event NewTTL(bytes32 indexed node, uint64 ttl)",
];

pub const PUBLIC_RESOLVER_EVENTS: &[&str] = &[
    "event AddrChanged(bytes32 indexed node, address a)",
    "event TextChanged(bytes32 indexed node, string indexed indexedKey, string key)",
];

pub const L1_MESSENGER_EVENTS: &[&str] = &[
    "event SentMessage(address indexed target, address sender, bytes message, uint256 messageNonce, uint256 gasLimit)",
];

pub const CANONICAL_TRANSACTION_CHAIN_EVENTS: &[&str] = &[
    "event TransactionEnqueued(address indexed _l1TxOrigin, address indexed _target, uint256 _gasLimit, bytes _data, uint256 indexed _queueIndex, uint256 _timestamp)",
];

/// Event interfaces of every contract whose logs are decoded.
#[derive(Debug, Clone)]
pub struct Interfaces {
    pub governor: Arc<ContractInterface>,
    pub timelock: Arc<ContractInterface>,
    pub token: Arc<ContractInterface>,
    pub ens_registry: Arc<ContractInterface>,
    pub public_resolver: Arc<ContractInterface>,
    pub l1_messenger: Arc<ContractInterface>,
    pub canonical_transaction_chain: Arc<ContractInterface>,
}

impl Interfaces {
    /// Parse all signature tables.
    pub fn load() -> Result<Self, AbiError> {
        let load = |name: &str, signatures: &[&str]| {
            ContractInterface::from_signatures(name, signatures).map(Arc::new)
        };
        Ok(Self {
            governor: load("GovernorBravo", GOVERNOR_EVENTS)?,
            timelock: load("Timelock", TIMELOCK_EVENTS)?,
            token: load("Uni", TOKEN_EVENTS)?,
            ens_registry: load("ENSRegistryWithFallback", ENS_REGISTRY_EVENTS)?,
            public_resolver: load("PublicResolver", PUBLIC_RESOLVER_EVENTS)?,
            l1_messenger: load("L1CrossDomainMessenger", L1_MESSENGER_EVENTS)?,
            canonical_transaction_chain: load(
                "CanonicalTransactionChain",
                CANONICAL_TRANSACTION_CHAIN_EVENTS,
            )?,
        })
    }
}
