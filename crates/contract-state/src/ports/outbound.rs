//! # Driven Ports (Outbound)
//!
//! Interfaces this crate depends on. External collaborators implement these
//! traits; reference in-memory implementations live in `adapters`.
//!
//! - [`StateStore`]: the central, single-writer state tree.
//! - [`RemoteClient`]: the contract-invocation client.

use crate::domain::entities::{ContractsState, MethodDescriptor};
use crate::domain::value_objects::CallValue;
use crate::errors::RemoteError;
use crate::events::ContractEvent;
use uuid::Uuid;

// =============================================================================
// STATE STORE
// =============================================================================

/// Observer of state-tree snapshots.
pub type StateObserver = Box<dyn Fn(&ContractsState) + Send + Sync>;

/// The central state tree holding plain, serializable snapshots.
///
/// Mutated exclusively through [`ContractEvent`]s applied by the reducer.
/// `dispatch` serializes reducer application: events for one contract are
/// folded strictly in the order their callbacks fire, and observers see
/// each resulting snapshot exactly once.
pub trait StateStore: Send + Sync {
    /// Applies one event to the state tree and notifies observers.
    fn dispatch(&self, event: ContractEvent);

    /// Returns a snapshot of the current state tree.
    fn get_state(&self) -> ContractsState;

    /// Registers an observer of state snapshots. Returns its subscription id.
    fn subscribe(&self, observer: StateObserver) -> Uuid;

    /// Removes a previously registered observer. Unknown ids are ignored.
    fn unsubscribe(&self, id: Uuid);
}

// =============================================================================
// REMOTE CLIENT
// =============================================================================

/// Completion callback handed to the remote client.
///
/// `FnMut` because the deploy entry point is expected to invoke its callback
/// more than once: first with a submitted-but-unconfirmed result carrying a
/// transaction identifier, later with the confirmed result carrying the
/// instance address.
pub type ClientCallback = Box<dyn FnMut(Result<CallValue, RemoteError>) + Send>;

/// The contract-invocation client. Wire protocol, payload encoding, retries,
/// and cancellation are its concern, not this crate's.
pub trait RemoteClient: Send + Sync {
    /// Invokes `method` on the instance at `address` with the given raw
    /// positional inputs and options object, reporting the outcome through
    /// `callback`.
    fn call(
        &self,
        address: &str,
        method: &MethodDescriptor,
        inputs: Vec<CallValue>,
        options: CallValue,
        callback: ClientCallback,
    );

    /// Submits a deploy with the given raw constructor inputs and options
    /// object. May invoke `callback` more than once (pending, then final).
    fn deploy(&self, inputs: Vec<CallValue>, options: CallValue, callback: ClientCallback);
}
