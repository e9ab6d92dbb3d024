//! # State Events (Change Descriptors)
//!
//! Declarative descriptors of contract lifecycle transitions. One event is
//! dispatched per lifecycle milestone and folded into the state tree by the
//! reducer; events carry no behavior and are never mutated after creation.
//!
//! ## Variants
//!
//! | Event | Emitted when |
//! |-------|--------------|
//! | `Construct` | Contract registered, scaffold installed |
//! | `BindAt` | Bound to an existing instance address |
//! | `NewPending` | Deploy submitted, not yet confirmed |
//! | `NewError` | Deploy failed |
//! | `NewSuccess` | Deploy confirmed with an address |
//! | `MethodSuccess` | Wrapped method call resolved successfully |
//! | `MethodError` | Wrapped method call resolved with an error |

use crate::domain::entities::{MethodKind, MethodRecord};
use crate::domain::value_objects::CallValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// EVENT VARIANTS
// =============================================================================

/// An immutable, serializable descriptor of one state transition.
///
/// Marked `#[non_exhaustive]`: readers outside this crate must keep a
/// wildcard arm and treat unknown variants as "state unchanged".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
#[non_exhaustive]
pub enum ContractEvent {
    /// A contract was registered with its initial method-record scaffold.
    Construct {
        /// Contract name.
        contract: String,
        /// Initial method records, including the synthetic `new` entry
        /// when the surface has a constructor.
        methods: BTreeMap<String, MethodRecord>,
    },
    /// A contract was bound to an existing instance at a known address.
    BindAt {
        /// Contract name.
        contract: String,
        /// Address of the live instance.
        address: String,
    },
    /// A deploy was submitted and is awaiting confirmation.
    NewPending {
        /// Contract name.
        contract: String,
        /// Normalized constructor inputs.
        inputs: CallValue,
        /// Normalized transaction object.
        tx_object: CallValue,
        /// Identifier of the submitted transaction.
        transaction_hash: String,
    },
    /// A deploy failed.
    NewError {
        /// Contract name.
        contract: String,
        /// Normalized constructor inputs.
        inputs: CallValue,
        /// Normalized transaction object.
        tx_object: CallValue,
        /// Failure value reported by the remote client.
        error: CallValue,
    },
    /// A deploy was confirmed with an instance address.
    NewSuccess {
        /// Contract name.
        contract: String,
        /// Address of the deployed instance.
        address: String,
    },
    /// A wrapped method call resolved successfully.
    MethodSuccess {
        /// Contract name.
        contract: String,
        /// Method name.
        method: String,
        /// Method classification; decides whether the record keeps a
        /// transaction object.
        kind: MethodKind,
        /// Normalized positional inputs.
        inputs: CallValue,
        /// Normalized transaction (or filter) object.
        tx_object: CallValue,
        /// Normalized result value.
        result: CallValue,
    },
    /// A wrapped method call resolved with an error.
    MethodError {
        /// Contract name.
        contract: String,
        /// Method name.
        method: String,
        /// Method classification.
        kind: MethodKind,
        /// Normalized positional inputs.
        inputs: CallValue,
        /// Normalized transaction (or filter) object.
        tx_object: CallValue,
        /// Failure value reported by the remote client.
        error: CallValue,
    },
}

// =============================================================================
// FACTORY
// =============================================================================

/// Pure constructors. Shape only; business-rule validation is the caller's
/// responsibility.
impl ContractEvent {
    /// A `Construct` event.
    pub fn construct(
        contract: impl Into<String>,
        methods: BTreeMap<String, MethodRecord>,
    ) -> Self {
        Self::Construct {
            contract: contract.into(),
            methods,
        }
    }

    /// A `BindAt` event.
    pub fn bind_at(contract: impl Into<String>, address: impl Into<String>) -> Self {
        Self::BindAt {
            contract: contract.into(),
            address: address.into(),
        }
    }

    /// A `NewPending` event.
    pub fn new_pending(
        contract: impl Into<String>,
        inputs: CallValue,
        tx_object: CallValue,
        transaction_hash: impl Into<String>,
    ) -> Self {
        Self::NewPending {
            contract: contract.into(),
            inputs,
            tx_object,
            transaction_hash: transaction_hash.into(),
        }
    }

    /// A `NewError` event.
    pub fn new_error(
        contract: impl Into<String>,
        inputs: CallValue,
        tx_object: CallValue,
        error: CallValue,
    ) -> Self {
        Self::NewError {
            contract: contract.into(),
            inputs,
            tx_object,
            error,
        }
    }

    /// A `NewSuccess` event.
    pub fn new_success(contract: impl Into<String>, address: impl Into<String>) -> Self {
        Self::NewSuccess {
            contract: contract.into(),
            address: address.into(),
        }
    }

    /// A `MethodSuccess` event.
    pub fn method_success(
        contract: impl Into<String>,
        method: impl Into<String>,
        kind: MethodKind,
        inputs: CallValue,
        tx_object: CallValue,
        result: CallValue,
    ) -> Self {
        Self::MethodSuccess {
            contract: contract.into(),
            method: method.into(),
            kind,
            inputs,
            tx_object,
            result,
        }
    }

    /// A `MethodError` event.
    pub fn method_error(
        contract: impl Into<String>,
        method: impl Into<String>,
        kind: MethodKind,
        inputs: CallValue,
        tx_object: CallValue,
        error: CallValue,
    ) -> Self {
        Self::MethodError {
            contract: contract.into(),
            method: method.into(),
            kind,
            inputs,
            tx_object,
            error,
        }
    }

    /// Name of the contract this event belongs to.
    #[must_use]
    pub fn contract(&self) -> &str {
        match self {
            Self::Construct { contract, .. }
            | Self::BindAt { contract, .. }
            | Self::NewPending { contract, .. }
            | Self::NewError { contract, .. }
            | Self::NewSuccess { contract, .. }
            | Self::MethodSuccess { contract, .. }
            | Self::MethodError { contract, .. } => contract,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
