//! # Contract-State - Lifecycle Tracking Middleware
//!
//! Tracks the lifecycle of calls made against a remote contract-style API
//! (deploy, bind, per-method invocation) and projects it into an observable,
//! centrally stored state tree. Sits between a callback-driven contract
//! client and a unidirectional state store that holds only plain snapshots
//! and is mutated exclusively through declarative events folded by a pure
//! reducer.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | `result`/`error` mutually exclusive per method record | `domain/reducer.rs` - wholesale record replacement |
//! | INVARIANT-2 | `address` present whenever `created` is true | `domain/reducer.rs` - bind/new-success arms |
//! | INVARIANT-3 | Pending deploy never coexists with `created = true` | `domain/reducer.rs` - new-pending and new-success arms |
//! | INVARIANT-4 | Exactly one event per call resolution | `service.rs` - wrapped callbacks |
//! | INVARIANT-5 | Normalization is idempotent and structure-preserving | `domain/normalize.rs` |
//!
//! ## Architecture
//!
//! Hexagonal: `domain` (pure reducer, normalizer, invariants), `ports`
//! (state store, remote client, lifecycle traits), `adapters` (in-memory
//! reference implementations), `service` (interceptor and controller).
//!
//! ## Usage Example
//!
//! ```
//! use contract_state::prelude::*;
//! use std::sync::Arc;
//!
//! let store = Arc::new(InMemoryStore::new());
//! let client = Arc::new(ScriptedClient::new());
//! let service = ContractService::new(store.clone(), client.clone());
//!
//! let contract = service
//!     .register(ContractConfig::new(
//!         "SimpleStore",
//!         vec![
//!             MethodDescriptor::constructor(0),
//!             MethodDescriptor::function("set", 1),
//!         ],
//!     ))
//!     .unwrap();
//!
//! // Bind to a live instance and invoke the wrapped surface.
//! let bound = contract.at("0xabc");
//! bound.call("set", vec![CallValue::Int(100)], CallOpts::new()).unwrap();
//!
//! assert!(store.get_state()["SimpleStore"].created);
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod domain;
pub mod errors;
pub mod events;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain entities
    pub use crate::domain::entities::{
        ContractRecord, ContractsState, MethodDescriptor, MethodKind, MethodRecord, NEW_METHOD,
    };

    // Value objects
    pub use crate::domain::value_objects::{map_value, CallValue, U256};

    // Normalizer and reducer
    pub use crate::domain::normalize::{normalize, normalize_inputs};
    pub use crate::domain::reducer::reduce;

    // Invariants
    pub use crate::domain::invariants::{check_state_invariants, InvariantViolation};

    // Ports
    pub use crate::ports::inbound::{ContractConfig, ContractLifecycle};
    pub use crate::ports::outbound::{ClientCallback, RemoteClient, StateObserver, StateStore};

    // Events
    pub use crate::events::ContractEvent;

    // Errors
    pub use crate::errors::{CallError, ConfigError, RemoteError};

    // Adapters
    pub use crate::adapters::{InMemoryStore, RecordedCall, ScriptedClient};

    // Service
    pub use crate::service::{
        BoundContract, CallOpts, Contract, ContractService, DeployNotice, DeployOpts, MethodProxy,
    };
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// TESTS
// =============================================================================
