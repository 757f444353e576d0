//! Mainnet addresses of the Uniswap governance system and the contracts its
//! proposals touch.

use alloy_primitives::{address, Address};

/// GovernorBravoDelegator (proxy in front of GovernorBravoDelegate)
pub const UNISWAP_GOVERNOR_ADDRESS: Address = address!("408ED6354d4973f66138C91495F2f2FCbd8724C3");
/// UNI token, also the voting-weight source for the governor
pub const UNI_ADDRESS: Address = address!("1f9840a85d5aF5bf1D1762F925BDADdC4201F984");
/// Compound-style timelock holding the treasury
pub const UNI_TIMELOCK_ADDRESS: Address = address!("1a9C8182C09F50C8318d769245beA52c32BE35BC");
/// Uniswap v3 factory
pub const UNISWAP_V3_FACTORY_ADDRESS: Address =
    address!("1F98431c8aD98523631AE4a59f267346ea31F984");

/// ENS registry with fallback
pub const ENS_REGISTRY_WITH_FALLBACK_ADDRESS: Address =
    address!("00000000000C2E074eC69A0dFb2997BA6C7d2e1e");
/// ENS public resolver 2
pub const ENS_PUBLIC_RESOLVER_2_ADDRESS: Address =
    address!("4976fb03C32e5B8cfe2b6cCB31c09Ba78EBaBa41");

/// Optimism L1 cross-domain messenger (proxy)
pub const OVM_L1_CROSS_DOMAIN_MESSENGER_ADDRESS: Address =
    address!("25ace71c97B33Cc4729CF772ae268934F7ab5fA1");
/// Optimism canonical transaction chain
pub const OVM_CANONICAL_TRANSACTION_CHAIN_ADDRESS: Address =
    address!("5E4e65926BA27467555EB562121fac00D24E9dD2");
/// Optimism L2 cross-domain messenger predeploy
pub const OVM_L2_CROSS_DOMAIN_MESSENGER_ADDRESS: Address =
    address!("4200000000000000000000000000000000000007");
/// Uniswap cross-chain account on Optimism (forwards governance calls on L2)
pub const UNISWAP_OVM_CROSS_CHAIN_ACCOUNT_ADDRESS: Address =
    address!("a1dD330d602c32622AA270Ea73d078B803Cb3518");

/// Account used to submit `queue` and `execute` (anyone may call them)
pub const DEFAULT_EXECUTOR_ADDRESS: Address = address!("d8dA6BF26964aF9D7eEd9e03E53415D37aA96045");

/// `support` value for a yes vote in `castVote`
pub const VOTE_FOR: u8 = 1;

/// Delegates with enough UNI to pass a proposal between them.
pub const UNISWAP_VOTERS: [Address; 12] = [
    address!("2b1ad6184a6b0fac06bd225ed37c2abc04415ff4"), // a16z
    address!("e02457a1459b6c49469bf658d4fe345c636326bf"),
    address!("8e4ed221fa034245f14205f781e0b13c5bd6a42e"),
    address!("61c8d4e4be6477bb49791540ff297ef30eaa01c2"), // harvard law blockchain
    address!("a2bf1b0a7e079767b4701b5a1d9d5700eb42d1d1"),
    address!("e7925d190aea9279400cd9a005e33ceb9389cc2b"),
    address!("7e4a8391c728fed9069b2962699ab416628b19fa"), // dharma
    address!("8962285faac45a7cbc75380c484523bb7c32d429"), // consensys
    address!("b0623c91c65621df716ab8afe5f66656b21a9108"),
    address!("6626593c237f530d15ae9980a95ef938ac15c35c"), // gauntlet
    address!("59a5493513ba2378ed57ae5ecfb8a027e9d80365"),
    address!("88fb3d509fc49b515bfeb04e23f53ba339563981"),
];
