//! # Value Objects
//!
//! Immutable domain primitives for contract lifecycle tracking.
//! These types represent concepts defined by their value, not identity.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// Re-export U256 from primitive-types for 256-bit arithmetic
pub use primitive_types::U256;

// =============================================================================
// CALL VALUE
// =============================================================================

/// A dynamically shaped value flowing through a contract call.
///
/// Inputs, options objects, and results of remote calls are free-form trees.
/// `CallValue` is the one representation used on both sides of the seam: raw
/// values are forwarded to the remote client unchanged, normalized copies
/// (see [`normalize`](crate::domain::normalize::normalize)) are recorded in
/// the state tree.
///
/// Serializes untagged, so a state snapshot reads as plain JSON:
/// `Seq` becomes an array, `Map` an object, `Uint` its `primitive-types`
/// string form. `Str` is tried before `Uint` on deserialization, so string
/// data is never reinterpreted as a number.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CallValue {
    /// Absent / null value.
    Null,
    /// Boolean.
    Bool(bool),
    /// Plain machine-width integer. Passes through normalization unchanged.
    Int(i64),
    /// UTF-8 string.
    Str(String),
    /// Arbitrary-precision unsigned integer. Normalization rewrites this
    /// to its base-10 string form.
    Uint(U256),
    /// Ordered sequence of values.
    Seq(Vec<CallValue>),
    /// Keyed mapping of values.
    Map(BTreeMap<String, CallValue>),
}

impl CallValue {
    /// An empty keyed mapping (`{}`).
    #[must_use]
    pub fn empty_map() -> Self {
        Self::Map(BTreeMap::new())
    }

    /// An empty sequence (`[]`).
    #[must_use]
    pub fn empty_seq() -> Self {
        Self::Seq(Vec::new())
    }

    /// A string value.
    pub fn str(value: impl Into<String>) -> Self {
        Self::Str(value.into())
    }

    /// An arbitrary-precision unsigned integer value.
    pub fn uint(value: impl Into<U256>) -> Self {
        Self::Uint(value.into())
    }

    /// Looks up `key` if this value is a `Map`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&CallValue> {
        match self {
            Self::Map(entries) => entries.get(key),
            _ => None,
        }
    }

    /// Returns the string slice if this value is a `Str`.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) => Some(value),
            _ => None,
        }
    }

    /// Returns true for `Null`.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl Default for CallValue {
    fn default() -> Self {
        Self::Null
    }
}

impl From<bool> for CallValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for CallValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<U256> for CallValue {
    fn from(value: U256) -> Self {
        Self::Uint(value)
    }
}

impl From<&str> for CallValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for CallValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<Vec<CallValue>> for CallValue {
    fn from(values: Vec<CallValue>) -> Self {
        Self::Seq(values)
    }
}

impl From<BTreeMap<String, CallValue>> for CallValue {
    fn from(entries: BTreeMap<String, CallValue>) -> Self {
        Self::Map(entries)
    }
}

/// Builds a `CallValue::Map` from key/value pairs.
///
/// Convenience for options objects and scripted results:
///
/// ```
/// use contract_state::domain::value_objects::{map_value, CallValue};
///
/// let tx = map_value([("from", CallValue::str("0xaa")), ("gas", CallValue::uint(3000u64))]);
/// assert!(tx.get("from").is_some());
/// ```
pub fn map_value<K, I>(entries: I) -> CallValue
where
    K: Into<String>,
    I: IntoIterator<Item = (K, CallValue)>,
{
    CallValue::Map(
        entries
            .into_iter()
            .map(|(key, value)| (key.into(), value))
            .collect(),
    )
}

// =============================================================================
// TESTS
// =============================================================================
