use alloy_dyn_abi::DynSolValue;
use alloy_primitives::ruint::UintTryFrom;
use alloy_primitives::{keccak256, Address, Bytes, B256, I256, U256};
use std::fmt;

use crate::abi::DecodedField;

/// Comparison rule for one expected event field.
#[derive(Debug, Clone, PartialEq)]
pub enum Expected {
    /// Case-insensitive match against the rendered value
    Text(String),
    /// keccak256 of the string must equal the stored word
    HashedText(String),
    /// Canonical decimal form of an integer
    Numeric(String),
    /// Exact typed equality
    Raw(DynSolValue),
    /// Matches anything (values assigned during execution)
    Any,
}

/// A field that did not satisfy its rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub expected: String,
    pub actual: String,
}

impl Expected {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// An address, compared without regard to checksum casing.
    pub fn address(address: Address) -> Self {
        Self::Text(address.to_string())
    }

    pub fn hashed(value: impl Into<String>) -> Self {
        Self::HashedText(value.into())
    }

    pub fn uint<T>(value: T) -> Self
    where
        U256: UintTryFrom<T>,
    {
        Self::Numeric(U256::from(value).to_string())
    }

    /// Parse a decimal literal; leading zeros and a `+` sign are dropped.
    pub fn numeric(literal: &str) -> Option<Self> {
        let literal = literal.trim();
        let canonical = match literal.strip_prefix('-') {
            Some(_) => I256::from_dec_str(literal).ok()?.to_string(),
            None => {
                let digits = literal.strip_prefix('+').unwrap_or(literal);
                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                U256::from_str_radix(digits, 10).ok()?.to_string()
            }
        };
        Some(Self::Numeric(canonical))
    }

    pub fn bytes(value: impl Into<Bytes>) -> Self {
        Self::Raw(DynSolValue::Bytes(value.into().to_vec()))
    }

    pub fn word(value: B256) -> Self {
        Self::Raw(DynSolValue::FixedBytes(value, 32))
    }

    pub fn any() -> Self {
        Self::Any
    }

    /// Check a decoded field against this rule.
    pub fn check(&self, field: &DecodedField) -> Result<(), Mismatch> {
        let matched = if field.hashed {
            match (self, &field.value) {
                (Self::Any, _) => true,
                (Self::Text(s) | Self::HashedText(s), DynSolValue::FixedBytes(topic, _)) => {
                    keccak256(s.as_bytes()) == *topic
                }
                _ => false,
            }
        } else {
            match (self, &field.value) {
                (Self::Any, _) => true,
                (Self::HashedText(s), DynSolValue::FixedBytes(word, 32)) => {
                    keccak256(s.as_bytes()) == *word
                }
                (Self::HashedText(_), _) => false,
                (Self::Text(s), value) => render(value).to_lowercase() == s.to_lowercase(),
                (Self::Numeric(n), DynSolValue::Uint(value, _)) => value.to_string() == *n,
                (Self::Numeric(n), DynSolValue::Int(value, _)) => value.to_string() == *n,
                (Self::Numeric(_), _) => false,
                (Self::Raw(expected), value) => expected == value,
            }
        };

        if matched {
            Ok(())
        } else {
            Err(Mismatch { expected: self.to_string(), actual: render(&field.value) })
        }
    }
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) | Self::Numeric(s) => f.write_str(s),
            Self::HashedText(s) => write!(f, "keccak256({s:?})"),
            Self::Raw(value) => f.write_str(&render(value)),
            Self::Any => f.write_str("<any>"),
        }
    }
}

/// Human-readable form of a decoded value.
pub fn render(value: &DynSolValue) -> String {
    match value {
        DynSolValue::Address(address) => address.to_string(),
        DynSolValue::Bool(b) => b.to_string(),
        DynSolValue::Uint(v, _) => v.to_string(),
        DynSolValue::Int(v, _) => v.to_string(),
        DynSolValue::FixedBytes(word, size) => format!("0x{}", hex::encode(&word[..*size])),
        DynSolValue::Bytes(bytes) => format!("0x{}", hex::encode(bytes)),
        DynSolValue::String(s) => s.clone(),
        DynSolValue::Array(values)
        | DynSolValue::FixedArray(values)
        | DynSolValue::Tuple(values) => {
            let items: Vec<String> = values.iter().map(render).collect();
            format!("[{}]", items.join(", "))
        }
        other => format!("{other:?}"),
    }
}
