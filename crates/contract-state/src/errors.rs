//! # Error Types
//!
//! Error taxonomy:
//!
//! - [`ConfigError`]: missing registration fields. Fatal, raised
//!   synchronously at registration time, no event emitted.
//! - [`RemoteError`]: the remote client reported a call or deploy failure.
//!   Non-fatal; recorded in the state tree and forwarded to the caller's
//!   callback, never swallowed.
//! - [`CallError`]: a wrapped surface was used incorrectly (unknown method).
//!
//! Exceptions raised inside caller-supplied callbacks are not caught
//! anywhere in this crate; they propagate to the caller of the call.

use crate::domain::value_objects::CallValue;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// CONFIGURATION ERRORS
// =============================================================================

/// Fatal registration-time errors. Never recoverable; no state event is
/// emitted for a rejected registration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The registration config carried no contract name.
    #[error("a unique contract name is required")]
    MissingName,

    /// The registration config carried no callable-surface descriptors.
    #[error("contract `{contract}` has an empty callable surface")]
    EmptySurface {
        /// Name of the rejected contract.
        contract: String,
    },

    /// Two surface entries share one method name.
    #[error("contract `{contract}` declares method `{method}` more than once")]
    DuplicateMethod {
        /// Name of the rejected contract.
        contract: String,
        /// Duplicated method name.
        method: String,
    },
}

// =============================================================================
// REMOTE ERRORS
// =============================================================================

/// A failure reported by the remote client for a method or deploy call.
///
/// Cloneable and serializable so the same failure can be recorded in the
/// state tree and forwarded to the caller's callback unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{message}")]
pub struct RemoteError {
    /// Message reported by the remote side.
    pub message: String,
}

impl RemoteError {
    /// A remote error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The state-tree representation of this error.
    #[must_use]
    pub fn to_value(&self) -> CallValue {
        CallValue::Str(self.message.clone())
    }
}

// =============================================================================
// CALL ERRORS
// =============================================================================

/// Misuse of a wrapped contract surface.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CallError {
    /// No wrapped method with the given name exists on this surface.
    #[error("no method named `{0}` on this contract surface")]
    UnknownMethod(String),
}

// =============================================================================
// TESTS
// =============================================================================
