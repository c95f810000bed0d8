//! Hex encoding of JSON-RPC quantities.
//!
//! Quantities are encoded as lowercase hex with a `0x` prefix and no leading
//! zeroes; zero is `0x0`.

use std::num::ParseIntError;
use thiserror::Error;

/// An error decoding a hex quantity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuantityError {
    /// The value does not start with `0x`.
    #[error("quantity {0:?} is missing the 0x prefix")]
    MissingPrefix(String),
    /// The value is just `0x`.
    #[error("quantity has no digits")]
    Empty,
    /// The value has leading zeroes, e.g. `0x01`.
    #[error("quantity {0:?} has leading zeroes")]
    LeadingZero(String),
    /// The digits are not valid hex or overflow a `u64`.
    #[error("invalid quantity {value:?}: {source}")]
    Invalid {
        /// The rejected input.
        value: String,
        /// The underlying parse error.
        #[source]
        source: ParseIntError,
    },
}

/// Encodes `n` as a JSON-RPC quantity.
pub fn encode_quantity(n: u64) -> String {
    format!("{n:#x}")
}

/// Decodes a JSON-RPC quantity produced by [`encode_quantity`] or a node.
pub fn decode_quantity(value: &str) -> Result<u64, QuantityError> {
    let digits = value
        .strip_prefix("0x")
        .ok_or_else(|| QuantityError::MissingPrefix(value.to_string()))?;
    if digits.is_empty() {
        return Err(QuantityError::Empty);
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return Err(QuantityError::LeadingZero(value.to_string()));
    }
    u64::from_str_radix(digits, 16)
        .map_err(|source| QuantityError::Invalid { value: value.to_string(), source })
}
