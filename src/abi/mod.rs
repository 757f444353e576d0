//! Event schemas and log decoding.
//!
//! Each contract the tool reads logs from is described by a table of
//! human-readable event signatures, parsed once at startup into
//! [`EventSchema`]s. Decoding a raw [`Log`] against a schema yields the
//! event's fields in declaration order, each tagged with whether the log
//! carries the value itself or only its keccak256 hash (indexed dynamic
//! types such as `string indexed key`).
//!
//! Call encoding does not go through these tables: every function the tool
//! calls is bound at compile time in [`contracts`].

pub mod contracts;
pub mod errors;

pub use contracts::Interfaces;
pub use errors::{AbiError, DecodeError};

use alloy_dyn_abi::{DynSolType, DynSolValue, Specifier};
use alloy_json_abi::Event;
use alloy_primitives::{Address, B256, I256, U256};

use crate::harness::Log;

/// One parameter of an event.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSchema {
    /// Parameter name as declared in the contract
    pub name: String,
    /// Resolved Solidity type
    pub ty: DynSolType,
    /// Whether the parameter lives in a topic
    pub indexed: bool,
}

impl ParamSchema {
    /// Whether the topic holds keccak256 of the value instead of the value.
    pub fn is_hashed(&self) -> bool {
        self.indexed && !is_word_type(&self.ty)
    }
}

/// Types that an indexed topic stores verbatim.
fn is_word_type(ty: &DynSolType) -> bool {
    matches!(
        ty,
        DynSolType::Address
            | DynSolType::Bool
            | DynSolType::Int(_)
            | DynSolType::Uint(_)
            | DynSolType::FixedBytes(_)
    )
}

/// Schema of a single event: name, selector and ordered parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct EventSchema {
    /// Event name
    pub name: String,
    /// keccak256 of the canonical signature (topic 0)
    pub selector: B256,
    /// Anonymous events carry no selector topic
    pub anonymous: bool,
    /// Parameters in declaration order
    pub params: Vec<ParamSchema>,
}

impl EventSchema {
    /// Parse a human-readable signature such as
    /// `event Transfer(address indexed from, address indexed to, uint256 amount)`.
    pub fn parse(signature: &str) -> Result<Self, AbiError> {
        let invalid = |reason: String| AbiError::InvalidSignature {
            signature: signature.to_string(),
            reason,
        };

        let event = Event::parse(signature).map_err(|e| invalid(e.to_string()))?;
        let params = event
            .inputs
            .iter()
            .map(|input| {
                let ty: DynSolType = input.resolve().map_err(|e| invalid(e.to_string()))?;
                Ok(ParamSchema { name: input.name.clone(), ty, indexed: input.indexed })
            })
            .collect::<Result<Vec<_>, AbiError>>()?;

        Ok(Self {
            name: event.name.clone(),
            selector: event.selector(),
            anonymous: event.anonymous,
            params,
        })
    }

    /// Decode a raw log into ordered fields.
    pub fn decode(&self, log: &Log) -> Result<DecodedEvent, DecodeError> {
        let mut topics = log.topics.iter();

        if !self.anonymous {
            let selector = topics
                .next()
                .ok_or_else(|| DecodeError::MissingSelector { event: self.name.clone() })?;
            if *selector != self.selector {
                return Err(DecodeError::SelectorMismatch {
                    event: self.name.clone(),
                    expected: self.selector,
                    got: *selector,
                });
            }
        }

        let indexed_count = self.params.iter().filter(|p| p.indexed).count();
        if topics.len() != indexed_count {
            return Err(DecodeError::TopicCount {
                event: self.name.clone(),
                expected: indexed_count,
                got: topics.len(),
            });
        }

        let body_types = self.params.iter().filter(|p| !p.indexed).map(|p| p.ty.clone()).collect();
        let body = DynSolType::Tuple(body_types)
            .abi_decode_sequence(&log.data)
            .map_err(|e| self.data_error(e.to_string()))?;
        let mut body = match body {
            DynSolValue::Tuple(values) => values.into_iter(),
            other => vec![other].into_iter(),
        };

        let mut fields = Vec::with_capacity(self.params.len());
        for param in &self.params {
            let value = if param.indexed {
                match topics.next() {
                    Some(topic) => decode_topic(&param.ty, *topic),
                    None => return Err(self.data_error("missing indexed topic".to_string())),
                }
            } else {
                body.next().ok_or_else(|| self.data_error("missing body value".to_string()))?
            };
            fields.push(DecodedField {
                name: param.name.clone(),
                value,
                hashed: param.is_hashed(),
            });
        }

        Ok(DecodedEvent { address: log.address, name: self.name.clone(), fields })
    }

    fn data_error(&self, reason: String) -> DecodeError {
        DecodeError::Data { event: self.name.clone(), reason }
    }
}

/// Decode a single topic word. Dynamic and composite types are kept as the
/// raw 32-byte hash.
fn decode_topic(ty: &DynSolType, topic: B256) -> DynSolValue {
    match ty {
        DynSolType::Address => DynSolValue::Address(Address::from_word(topic)),
        DynSolType::Bool => DynSolValue::Bool(topic[31] != 0),
        DynSolType::Uint(bits) => DynSolValue::Uint(U256::from_be_bytes(topic.0), *bits),
        DynSolType::Int(bits) => {
            DynSolValue::Int(I256::from_raw(U256::from_be_bytes(topic.0)), *bits)
        }
        DynSolType::FixedBytes(size) => DynSolValue::FixedBytes(topic, *size),
        _ => DynSolValue::FixedBytes(topic, 32),
    }
}

/// A decoded event field.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedField {
    /// Parameter name
    pub name: String,
    /// Decoded value; for hashed fields the 32-byte topic
    pub value: DynSolValue,
    /// The log only stores keccak256 of the original value
    pub hashed: bool,
}

/// A log decoded against its event schema.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedEvent {
    /// Emitting contract
    pub address: Address,
    /// Event name
    pub name: String,
    /// Fields in declaration order
    pub fields: Vec<DecodedField>,
}

impl DecodedEvent {
    /// Look up a field value by name.
    pub fn field(&self, name: &str) -> Option<&DynSolValue> {
        self.fields.iter().find(|f| f.name == name).map(|f| &f.value)
    }

    /// Look up an unsigned integer field by name.
    pub fn uint(&self, name: &str) -> Option<U256> {
        match self.field(name)? {
            DynSolValue::Uint(value, _) => Some(*value),
            _ => None,
        }
    }

    /// Field names in decoding order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }
}

/// The events a single contract can emit.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractInterface {
    /// Display name used in errors
    pub name: String,
    events: Vec<EventSchema>,
}

impl ContractInterface {
    /// Build an interface from human-readable event signatures.
    pub fn from_signatures(name: &str, signatures: &[&str]) -> Result<Self, AbiError> {
        let events = signatures
            .iter()
            .map(|signature| EventSchema::parse(signature))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { name: name.to_string(), events })
    }

    /// Schema of the named event.
    pub fn event(&self, name: &str) -> Option<&EventSchema> {
        self.events.iter().find(|e| e.name == name)
    }

    /// Schema whose selector matches `selector`.
    pub fn event_by_selector(&self, selector: B256) -> Option<&EventSchema> {
        self.events.iter().find(|e| !e.anonymous && e.selector == selector)
    }

    /// Decode a log by its selector topic.
    pub fn decode_log(&self, log: &Log) -> Result<DecodedEvent, DecodeError> {
        let selector = log.topics.first().copied().unwrap_or_default();
        let schema = self.event_by_selector(selector).ok_or_else(|| {
            DecodeError::UnknownSelector { contract: self.name.clone(), selector }
        })?;
        schema.decode(log)
    }
}

#[cfg(test)]
impl EventSchema {
    /// Encode a log for this event from values given in declaration order.
    pub(crate) fn encode_log(&self, address: Address, values: Vec<DynSolValue>) -> Log {
        use alloy_primitives::keccak256;

        assert_eq!(values.len(), self.params.len(), "value count for {}", self.name);
        let mut topics = Vec::new();
        if !self.anonymous {
            topics.push(self.selector);
        }
        let mut body = Vec::new();
        for (param, value) in self.params.iter().zip(values) {
            if !param.indexed {
                body.push(value);
            } else if param.is_hashed() {
                topics.push(keccak256(value.abi_encode_packed()));
            } else {
                topics.push(value.as_word().expect("word type"));
            }
        }
        Log::new(address, topics, DynSolValue::Tuple(body).abi_encode_params().into())
    }
}
