use alloy_primitives::B256;
use thiserror::Error;

/// Errors raised while building event schemas
#[derive(Debug, Error)]
pub enum AbiError {
    /// Human-readable signature could not be parsed or resolved
    #[error("Invalid event signature `{signature}`: {reason}")]
    InvalidSignature {
        /// The offending signature
        signature: String,
        /// Parser message
        reason: String,
    },
}

/// Errors raised while decoding a raw log against an event schema
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Log has no topics although the event is not anonymous
    #[error("Log for {event} has no selector topic")]
    MissingSelector {
        /// Event name
        event: String,
    },

    /// First topic is not the event's selector
    #[error("Selector mismatch for {event}: expected {expected}, got {got}")]
    SelectorMismatch {
        /// Event name
        event: String,
        /// Selector of the schema
        expected: B256,
        /// First topic of the log
        got: B256,
    },

    /// Number of indexed topics differs from the schema
    #[error("{event} expects {expected} indexed topics, log has {got}")]
    TopicCount {
        /// Event name
        event: String,
        /// Indexed parameters in the schema
        expected: usize,
        /// Topics after the selector
        got: usize,
    },

    /// Log data is not a valid encoding of the non-indexed parameters
    #[error("Failed to decode data of {event}: {reason}")]
    Data {
        /// Event name
        event: String,
        /// Decoder message
        reason: String,
    },

    /// No event of the interface has the log's selector
    #[error("{contract} has no event with selector {selector}")]
    UnknownSelector {
        /// Interface name
        contract: String,
        /// First topic of the log
        selector: B256,
    },
}
