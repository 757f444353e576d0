//! # proposal-check
//!
//! Simulates a Uniswap governance proposal end to end on a forked mainnet
//! node (vote, queue, timelock, execute) and checks that execution emitted
//! exactly the expected events and left the expected on-chain state.

pub mod abi;
pub mod checks;
pub mod cli;
pub mod config;
pub mod constants;
pub mod ens;
pub mod governance;
pub mod harness;
pub mod output;
pub mod validator;
