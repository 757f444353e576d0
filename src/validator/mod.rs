//! Ordered, field-by-field validation of execution logs.
//!
//! A proposal check lists the events it expects, in emission order. Each
//! expectation consumes exactly one log; after the last expectation no logs
//! may remain.

pub mod errors;
pub mod expected;

pub use errors::EventValidationError;
pub use expected::{Expected, Mismatch};

use alloy_primitives::Address;
use indexmap::IndexMap;
use std::collections::VecDeque;
use std::sync::Arc;

use crate::abi::{ContractInterface, DecodedEvent};
use crate::harness::Log;

/// One event a proposal's execution must emit.
#[derive(Debug, Clone)]
pub struct ExpectedEvent {
    pub event_name: String,
    /// Contract that must emit the event
    pub origin: Address,
    /// Interface the event is decoded with
    pub interface: Arc<ContractInterface>,
    /// Every field of the event, in declaration order
    pub fields: IndexMap<String, Expected>,
}

impl ExpectedEvent {
    pub fn new(event_name: &str, origin: Address, interface: &Arc<ContractInterface>) -> Self {
        Self {
            event_name: event_name.to_string(),
            origin,
            interface: Arc::clone(interface),
            fields: IndexMap::new(),
        }
    }

    /// Add the rule for the next field.
    pub fn field(mut self, name: &str, expected: Expected) -> Self {
        self.fields.insert(name.to_string(), expected);
        self
    }
}

/// Match `logs` against `expected`, one to one and in order.
///
/// Returns the decoded events on success. `logs` is not modified.
pub fn validate_sequence(
    expected: &[ExpectedEvent],
    logs: &[Log],
) -> Result<Vec<DecodedEvent>, EventValidationError> {
    let mut queue: VecDeque<&Log> = logs.iter().collect();
    let mut decoded = Vec::with_capacity(expected.len());

    for (i, expectation) in expected.iter().enumerate() {
        let index = i + 1;
        let log = queue.pop_front().ok_or_else(|| EventValidationError::MissingEvent {
            index,
            event: expectation.event_name.clone(),
        })?;
        decoded.push(validate_event(expectation, index, log)?);
    }

    if !queue.is_empty() {
        return Err(EventValidationError::UnexpectedExtraEvents { count: queue.len() });
    }
    Ok(decoded)
}

/// Match a single log against a single expectation.
pub fn validate_event(
    expected: &ExpectedEvent,
    index: usize,
    log: &Log,
) -> Result<DecodedEvent, EventValidationError> {
    let event = expected.event_name.clone();

    if log.address != expected.origin {
        return Err(EventValidationError::WrongOrigin {
            index,
            event,
            expected: expected.origin,
            actual: log.address,
        });
    }

    let schema = expected.interface.event(&expected.event_name).ok_or_else(|| {
        EventValidationError::UnknownEvent {
            index,
            event: event.clone(),
            contract: expected.interface.name.clone(),
        }
    })?;

    let decoded = schema
        .decode(log)
        .map_err(|source| EventValidationError::Decode { index, event: event.clone(), source })?;

    let names_match = decoded.fields.len() == expected.fields.len()
        && decoded.fields.iter().zip(expected.fields.keys()).all(|(f, name)| f.name == *name);
    if !names_match {
        return Err(EventValidationError::FieldSetMismatch {
            index,
            event,
            expected: expected.fields.keys().cloned().collect(),
            actual: decoded.fields.iter().map(|f| f.name.clone()).collect(),
        });
    }

    for (field, rule) in decoded.fields.iter().zip(expected.fields.values()) {
        rule.check(field).map_err(|Mismatch { expected, actual }| {
            EventValidationError::FieldValueMismatch {
                index,
                event: event.clone(),
                field: field.name.clone(),
                expected,
                actual,
            }
        })?;
    }

    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::Interfaces;
    use alloy_dyn_abi::DynSolValue;
    use alloy_primitives::{address, keccak256, B256, U256};

    const TOKEN: Address = address!("1f9840a85d5aF5bf1D1762F925BDADdC4201F984");
    const GOVERNOR: Address = address!("408ED6354d4973f66138C91495F2f2FCbd8724C3");
    const RESOLVER: Address = address!("4976fb03C32e5B8cfe2b6cCB31c09Ba78EBaBa41");
    const FROM: Address = address!("1a9C8182C09F50C8318d769245beA52c32BE35BC");
    const TO: Address = address!("F29Ff96aaEa6C9A1fBa851f74737f3c069d4f1a9");

    fn transfer_log(interfaces: &Interfaces, amount: u64) -> Log {
        interfaces.token.event("Transfer").unwrap().encode_log(
            TOKEN,
            vec![
                DynSolValue::Address(FROM),
                DynSolValue::Address(TO),
                DynSolValue::Uint(U256::from(amount), 256),
            ],
        )
    }

    fn executed_log(interfaces: &Interfaces, id: u64) -> Log {
        interfaces
            .governor
            .event("ProposalExecuted")
            .unwrap()
            .encode_log(GOVERNOR, vec![DynSolValue::Uint(U256::from(id), 256)])
    }

    fn expect_transfer(interfaces: &Interfaces, amount: u64) -> ExpectedEvent {
        ExpectedEvent::new("Transfer", TOKEN, &interfaces.token)
            .field("from", Expected::address(FROM))
            .field("to", Expected::address(TO))
            .field("amount", Expected::uint(amount))
    }

    fn expect_executed(interfaces: &Interfaces, id: u64) -> ExpectedEvent {
        ExpectedEvent::new("ProposalExecuted", GOVERNOR, &interfaces.governor)
            .field("id", Expected::uint(id))
    }

    #[test]
    fn test_matching_sequence_passes() {
        let interfaces = Interfaces::load().unwrap();
        let expected = [expect_transfer(&interfaces, 5), expect_executed(&interfaces, 22)];
        let logs = [transfer_log(&interfaces, 5), executed_log(&interfaces, 22)];

        let decoded = validate_sequence(&expected, &logs).unwrap();
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[1].uint("id"), Some(U256::from(22u64)));
    }

    #[test]
    fn test_validation_is_repeatable() {
        let interfaces = Interfaces::load().unwrap();
        let expected = [expect_transfer(&interfaces, 5)];
        let logs = vec![transfer_log(&interfaces, 5), executed_log(&interfaces, 22)];

        let first = validate_sequence(&expected, &logs);
        let second = validate_sequence(&expected, &logs);
        assert_eq!(first, second);
        assert_eq!(logs.len(), 2);
    }

    #[test]
    fn test_swapped_logs_fail_on_origin() {
        let interfaces = Interfaces::load().unwrap();
        let expected = [expect_transfer(&interfaces, 5), expect_executed(&interfaces, 22)];
        let logs = [executed_log(&interfaces, 22), transfer_log(&interfaces, 5)];

        assert!(matches!(
            validate_sequence(&expected, &logs),
            Err(EventValidationError::WrongOrigin { index: 1, .. })
        ));
    }

    #[test]
    fn test_extra_log_rejected() {
        let interfaces = Interfaces::load().unwrap();
        let expected = [expect_executed(&interfaces, 22)];
        let logs = [executed_log(&interfaces, 22), executed_log(&interfaces, 22)];

        assert_eq!(
            validate_sequence(&expected, &logs),
            Err(EventValidationError::UnexpectedExtraEvents { count: 1 })
        );
    }

    #[test]
    fn test_missing_log_rejected() {
        let interfaces = Interfaces::load().unwrap();
        let expected = [expect_transfer(&interfaces, 5), expect_executed(&interfaces, 22)];
        let logs = [transfer_log(&interfaces, 5)];

        assert!(matches!(
            validate_sequence(&expected, &logs),
            Err(EventValidationError::MissingEvent { index: 2, .. })
        ));
    }

    #[test]
    fn test_field_value_mismatch_reports_field() {
        let interfaces = Interfaces::load().unwrap();
        let expected = [expect_transfer(&interfaces, 6)];
        let err = validate_sequence(&expected, &[transfer_log(&interfaces, 5)]).unwrap_err();
        assert_eq!(
            err,
            EventValidationError::FieldValueMismatch {
                index: 1,
                event: "Transfer".to_string(),
                field: "amount".to_string(),
                expected: "6".to_string(),
                actual: "5".to_string(),
            }
        );
    }

    #[test]
    fn test_field_set_must_match_exactly() {
        let interfaces = Interfaces::load().unwrap();
        let partial = ExpectedEvent::new("Transfer", TOKEN, &interfaces.token)
            .field("from", Expected::address(FROM))
            .field("to", Expected::address(TO));
        assert!(matches!(
            validate_sequence(&[partial], &[transfer_log(&interfaces, 5)]),
            Err(EventValidationError::FieldSetMismatch { .. })
        ));

        let reordered = ExpectedEvent::new("Transfer", TOKEN, &interfaces.token)
            .field("to", Expected::address(TO))
            .field("from", Expected::address(FROM))
            .field("amount", Expected::uint(5u64));
        assert!(matches!(
            validate_sequence(&[reordered], &[transfer_log(&interfaces, 5)]),
            Err(EventValidationError::FieldSetMismatch { .. })
        ));
    }

    #[test]
    fn test_unknown_event_name() {
        let interfaces = Interfaces::load().unwrap();
        let expected = ExpectedEvent::new("Mint", TOKEN, &interfaces.token);
        assert!(matches!(
            validate_sequence(&[expected], &[transfer_log(&interfaces, 5)]),
            Err(EventValidationError::UnknownEvent { .. })
        ));
    }

    #[test]
    fn test_wrong_event_is_decode_error() {
        let interfaces = Interfaces::load().unwrap();
        let log = interfaces
            .token
            .event("Approval")
            .unwrap()
            .encode_log(
                TOKEN,
                vec![
                    DynSolValue::Address(FROM),
                    DynSolValue::Address(TO),
                    DynSolValue::Uint(U256::from(5u64), 256),
                ],
            );
        assert!(matches!(
            validate_sequence(&[expect_transfer(&interfaces, 5)], &[log]),
            Err(EventValidationError::Decode { index: 1, .. })
        ));
    }

    #[test]
    fn test_hashed_string_field() {
        let interfaces = Interfaces::load().unwrap();
        let node = B256::repeat_byte(0x42);
        let log = interfaces.public_resolver.event("TextChanged").unwrap().encode_log(
            RESOLVER,
            vec![
                DynSolValue::FixedBytes(node, 32),
                DynSolValue::String("url".into()),
                DynSolValue::String("url".into()),
            ],
        );
        assert_eq!(log.topics[2], keccak256("url"));

        let expect = |key: &str| {
            ExpectedEvent::new("TextChanged", RESOLVER, &interfaces.public_resolver)
                .field("node", Expected::word(node))
                .field("indexedKey", Expected::text(key))
                .field("key", Expected::text("url"))
        };
        assert!(validate_sequence(&[expect("url")], std::slice::from_ref(&log)).is_ok());
        assert!(matches!(
            validate_sequence(&[expect("avatar")], &[log]),
            Err(EventValidationError::FieldValueMismatch { .. })
        ));
    }

    #[test]
    fn test_origin_case_irrelevant() {
        let interfaces = Interfaces::load().unwrap();
        let lower: Address = "0x1f9840a85d5af5bf1d1762f925bdaddc4201f984".parse().unwrap();
        let expected = ExpectedEvent::new("Transfer", lower, &interfaces.token)
            .field("from", Expected::text("0x1A9C8182C09F50C8318D769245BEA52C32BE35BC"))
            .field("to", Expected::address(TO))
            .field("amount", Expected::uint(5u64));
        assert!(validate_sequence(&[expected], &[transfer_log(&interfaces, 5)]).is_ok());
    }

    #[test]
    fn test_empty_expectations_need_empty_logs() {
        let interfaces = Interfaces::load().unwrap();
        assert_eq!(validate_sequence(&[], &[]), Ok(vec![]));
        assert_eq!(
            validate_sequence(&[], &[transfer_log(&interfaces, 1)]),
            Err(EventValidationError::UnexpectedExtraEvents { count: 1 })
        );
    }
}
