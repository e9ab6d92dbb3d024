//! # Domain Entities
//!
//! State shapes for tracked contracts. The state tree is
//! `{ contract name -> ContractRecord }`; every record in it is a plain,
//! serializable snapshot produced by the reducer and never mutated in place.

use crate::domain::value_objects::CallValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key under which the synthetic constructor record is stored.
pub const NEW_METHOD: &str = "new";

// =============================================================================
// METHOD SURFACE DESCRIPTION
// =============================================================================

/// Classification of a callable operation on a contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodKind {
    /// State-changing or read call.
    Function,
    /// Subscription / filter. Filtered by an options object, never by
    /// positional inputs.
    Event,
    /// Deploy entry point. Surfaced as the synthetic `new` record.
    Constructor,
}

impl MethodKind {
    /// Whether method records of this kind carry a transaction object.
    /// Event records never do; their options object is a filter, not a
    /// transaction.
    #[must_use]
    pub fn records_tx_object(self) -> bool {
        !matches!(self, Self::Event)
    }
}

/// One entry of a contract's callable surface, fixed at registration time.
///
/// The interceptor never introspects the remote client; this table is the
/// single source of truth for method names, kinds, and input arity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDescriptor {
    /// Method name, unique within one contract surface.
    pub name: String,
    /// Method classification.
    pub kind: MethodKind,
    /// Number of positional inputs the method expects. Ignored (treated
    /// as zero) for `Event` kind.
    pub arity: usize,
}

impl MethodDescriptor {
    /// A function-kind descriptor.
    pub fn function(name: impl Into<String>, arity: usize) -> Self {
        Self {
            name: name.into(),
            kind: MethodKind::Function,
            arity,
        }
    }

    /// An event-kind descriptor.
    pub fn event(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: MethodKind::Event,
            arity: 0,
        }
    }

    /// A constructor-kind descriptor.
    pub fn constructor(arity: usize) -> Self {
        Self {
            name: NEW_METHOD.to_owned(),
            kind: MethodKind::Constructor,
            arity,
        }
    }

    /// Effective positional arity for argument splitting. Events take no
    /// positional inputs regardless of declared arity.
    #[must_use]
    pub fn effective_arity(&self) -> usize {
        match self.kind {
            MethodKind::Event => 0,
            _ => self.arity,
        }
    }
}

// =============================================================================
// METHOD RECORD
// =============================================================================

/// Last-observed call state for one method of one contract.
///
/// Records are replaced wholesale on every update, so a field can never
/// leak from one call resolution into the next. `result` and `error` are
/// mutually exclusive; writing one resets the other.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodRecord {
    /// Last-used normalized inputs. A sequence for function/constructor
    /// kinds; the registration scaffold uses an empty map for events.
    pub inputs: CallValue,
    /// Last-used transaction object. Absent for event kinds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tx_object: Option<CallValue>,
    /// Last successful (normalized) result, or null.
    pub result: Option<CallValue>,
    /// Last failure value, or null.
    pub error: Option<CallValue>,
    /// Transaction identifier of a submitted-but-unconfirmed deploy.
    /// Only ever present on the synthetic `new` record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<String>,
}

impl MethodRecord {
    /// The placeholder record installed at registration time.
    ///
    /// Events start with `{}` inputs and no transaction object; every
    /// other kind starts with `[]` inputs and an empty transaction object.
    #[must_use]
    pub fn scaffold(kind: MethodKind) -> Self {
        let inputs = if kind == MethodKind::Event {
            CallValue::empty_map()
        } else {
            CallValue::empty_seq()
        };
        Self {
            inputs,
            tx_object: kind.records_tx_object().then(CallValue::empty_map),
            result: None,
            error: None,
            transaction_hash: None,
        }
    }
}

// =============================================================================
// CONTRACT RECORD
// =============================================================================

/// One tracked contract in the state tree.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractRecord {
    /// Per-method call state, keyed by method name. Contains the synthetic
    /// `new` entry when the surface has a constructor.
    pub methods: BTreeMap<String, MethodRecord>,
    /// True only after a successful deploy or bind produced an address.
    pub created: bool,
    /// Remote address of the live instance. Set together with `created`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// The full state tree: contract name to contract record.
pub type ContractsState = BTreeMap<String, ContractRecord>;

// =============================================================================
// TESTS
// =============================================================================
