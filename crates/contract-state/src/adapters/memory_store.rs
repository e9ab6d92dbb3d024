//! # In-Memory Store Adapter
//!
//! Reference [`StateStore`] backed by the reducer and a `RwLock`ed tree.
//! Production deployments may substitute any store that satisfies the port;
//! this one is the default for tests and embedding.

use crate::domain::entities::ContractsState;
use crate::domain::reducer::reduce;
use crate::ports::outbound::{StateObserver, StateStore};
use crate::events::ContractEvent;
use std::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// Single-writer in-memory state store.
///
/// `dispatch` holds the write lock for the reducer fold only; observers are
/// notified outside the lock with a snapshot, so an observer may call
/// `get_state` or `dispatch` again without deadlocking.
#[derive(Default)]
pub struct InMemoryStore {
    /// Current state tree.
    state: RwLock<ContractsState>,
    /// Registered observers.
    observers: RwLock<Vec<(Uuid, StateObserver)>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for InMemoryStore {
    fn dispatch(&self, event: ContractEvent) {
        debug!(contract = event.contract(), "applying state event");

        let snapshot = {
            let mut state = self.state.write().unwrap();
            let next = reduce(&state, &event);
            *state = next;
            state.clone()
        };

        for (_, observer) in self.observers.read().unwrap().iter() {
            observer(&snapshot);
        }
    }

    fn get_state(&self) -> ContractsState {
        self.state.read().unwrap().clone()
    }

    fn subscribe(&self, observer: StateObserver) -> Uuid {
        let id = Uuid::new_v4();
        self.observers.write().unwrap().push((id, observer));
        id
    }

    fn unsubscribe(&self, id: Uuid) {
        self.observers
            .write()
            .unwrap()
            .retain(|(observer_id, _)| *observer_id != id);
    }
}

// =============================================================================
// TESTS
// =============================================================================
