//! # Numeric Normalizer
//!
//! Rewrites arbitrary-precision numeric leaves to their base-10 string form,
//! recursively, everywhere inside a value tree. Everything else passes
//! through untouched and the structure shape is preserved.
//!
//! The state tree only ever holds normalized values; the values forwarded
//! to the remote client stay raw. Normalization is presentation state, not
//! a transformation of the caller-visible API.

use crate::domain::value_objects::CallValue;

/// Returns a copy of `value` with every `Uint` leaf replaced by its decimal
/// string representation.
///
/// Pure and total: no side effects, no failure modes, unsupported value
/// types simply pass through. Idempotent, since the produced strings are
/// not numeric leaves themselves.
#[must_use]
pub fn normalize(value: &CallValue) -> CallValue {
    match value {
        CallValue::Uint(number) => CallValue::Str(number.to_string()),
        CallValue::Seq(items) => CallValue::Seq(items.iter().map(normalize).collect()),
        CallValue::Map(entries) => CallValue::Map(
            entries
                .iter()
                .map(|(key, item)| (key.clone(), normalize(item)))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Normalizes a slice of positional inputs into one `Seq` value, the shape
/// method records store their inputs in.
#[must_use]
pub fn normalize_inputs(inputs: &[CallValue]) -> CallValue {
    CallValue::Seq(inputs.iter().map(normalize).collect())
}

// =============================================================================
// TESTS
// =============================================================================
