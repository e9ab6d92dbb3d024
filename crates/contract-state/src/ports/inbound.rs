//! # Driving Ports (Inbound)
//!
//! The registration surface callers use to put a contract under tracking.
//! `service::ContractService` is the production implementation.

use crate::domain::entities::MethodDescriptor;
use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};

// =============================================================================
// REGISTRATION CONFIG
// =============================================================================

/// Configuration for registering one contract.
///
/// The state store and remote client are supplied once when the service is
/// built, so the only per-contract requirements are a unique name and a
/// non-empty callable surface. Registration fails fatally when either is
/// missing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractConfig {
    /// Unique contract name, the key of this contract in the state tree.
    pub name: String,
    /// Abstract description of the callable surface.
    pub surface: Vec<MethodDescriptor>,
    /// Default deploy payload (e.g. deployable bytecode), injected into the
    /// deploy options under `"data"` when the caller supplies none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deploy_payload: Option<String>,
}

impl ContractConfig {
    /// Config with a name and surface, no deploy payload.
    pub fn new(name: impl Into<String>, surface: Vec<MethodDescriptor>) -> Self {
        Self {
            name: name.into(),
            surface,
            deploy_payload: None,
        }
    }

    /// Attaches a default deploy payload.
    #[must_use]
    pub fn with_deploy_payload(mut self, payload: impl Into<String>) -> Self {
        self.deploy_payload = Some(payload.into());
        self
    }
}

// =============================================================================
// LIFECYCLE PORT
// =============================================================================

/// Registration entry point: puts a contract under lifecycle tracking and
/// hands back a handle exposing `deploy`, `at`, and the wrapped surface.
pub trait ContractLifecycle {
    /// The per-contract handle produced by a successful registration.
    type Handle;

    /// Registers `config`, emitting the construct event, or fails fatally
    /// on a malformed config (no event emitted).
    fn register(&self, config: ContractConfig) -> Result<Self::Handle, ConfigError>;
}
