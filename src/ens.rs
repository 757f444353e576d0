//! ENS name hashing (EIP-137).
//!
//! Labels are hashed exactly as given; names are expected to be normalised
//! already.

use alloy_primitives::{keccak256, Keccak256, B256};

/// keccak256 of a single label.
pub fn labelhash(label: &str) -> B256 {
    keccak256(label.as_bytes())
}

/// Node of a dotted name:
///   namehash("") = 0x00..00
///   namehash(label + "." + parent) = keccak256(namehash(parent) ++ labelhash(label))
pub fn namehash(name: &str) -> B256 {
    if name.is_empty() {
        return B256::ZERO;
    }
    name.rsplit('.').fold(B256::ZERO, |node, label| {
        let mut hasher = Keccak256::new();
        hasher.update(node.as_slice());
        hasher.update(labelhash(label).as_slice());
        hasher.finalize()
    })
}
