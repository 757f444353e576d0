use alloy_primitives::Address;
use thiserror::Error;

use crate::abi::DecodeError;

/// Errors raised while matching execution logs against expectations.
///
/// `index` is the 1-based position of the expectation in the sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventValidationError {
    /// Logs ran out before the expectations did
    #[error("Event #{index}: expected {event}, but no logs are left")]
    MissingEvent { index: usize, event: String },

    /// Log was emitted by a different contract
    #[error("Event #{index}: expected {event} from {expected}, log came from {actual}")]
    WrongOrigin { index: usize, event: String, expected: Address, actual: Address },

    /// The interface has no event with this name
    #[error("Event #{index}: {contract} has no event named {event}")]
    UnknownEvent { index: usize, event: String, contract: String },

    /// Log does not decode as the expected event
    #[error("Event #{index}: log is not a valid {event}: {source}")]
    Decode {
        index: usize,
        event: String,
        #[source]
        source: DecodeError,
    },

    /// Decoded field names differ from the expected ones
    #[error("Event #{index}: {event} fields are {actual:?}, expected {expected:?}")]
    FieldSetMismatch { index: usize, event: String, expected: Vec<String>, actual: Vec<String> },

    /// A field value does not satisfy its rule
    #[error("Event #{index}: {event}.{field} is {actual}, expected {expected}")]
    FieldValueMismatch {
        index: usize,
        event: String,
        field: String,
        expected: String,
        actual: String,
    },

    /// Logs remain after every expectation matched
    #[error("{count} unexpected event(s) after the expected sequence")]
    UnexpectedExtraEvents { count: usize },
}
