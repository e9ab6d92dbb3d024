//! # State Reducer
//!
//! Pure fold of [`ContractEvent`]s into the state tree. The reducer is the
//! only writer of contract state; interceptors emit events, they never touch
//! state directly.
//!
//! Every update is a structural copy. The returned tree shares no mutable
//! substructure with the input, so observers can rely on subtree replacement
//! for change detection. Method records are replaced wholesale, never
//! patched, which keeps `result`/`error` mutually exclusive by construction.

use crate::domain::entities::{ContractsState, MethodRecord, NEW_METHOD};
use crate::events::ContractEvent;

/// Computes the next state tree from `state` and one event.
///
/// Total over all event variants; `state` is never mutated.
#[must_use]
pub fn reduce(state: &ContractsState, event: &ContractEvent) -> ContractsState {
    let mut next = state.clone();

    match event {
        ContractEvent::Construct { contract, methods } => {
            // Layer the scaffold onto whatever is already there. A previous
            // address survives re-registration; `created` never does.
            let record = next.entry(contract.clone()).or_default();
            for (name, method) in methods {
                record.methods.insert(name.clone(), method.clone());
            }
            record.created = false;
        }

        ContractEvent::BindAt { contract, address } => {
            let record = next.entry(contract.clone()).or_default();
            record.address = Some(address.clone());
            record.created = true;
        }

        ContractEvent::NewPending {
            contract,
            inputs,
            tx_object,
            transaction_hash,
        } => {
            let record = next.entry(contract.clone()).or_default();
            record.methods.insert(
                NEW_METHOD.to_owned(),
                MethodRecord {
                    inputs: inputs.clone(),
                    tx_object: Some(tx_object.clone()),
                    result: None,
                    error: None,
                    transaction_hash: Some(transaction_hash.clone()),
                },
            );
            record.created = false;
        }

        ContractEvent::NewError {
            contract,
            inputs,
            tx_object,
            error,
        } => {
            let record = next.entry(contract.clone()).or_default();
            record.methods.insert(
                NEW_METHOD.to_owned(),
                MethodRecord {
                    inputs: inputs.clone(),
                    tx_object: Some(tx_object.clone()),
                    result: None,
                    error: Some(error.clone()),
                    transaction_hash: None,
                },
            );
            record.created = false;
        }

        ContractEvent::NewSuccess { contract, address } => {
            let record = next.entry(contract.clone()).or_default();
            // Confirmation ends the pending phase: the hash written by an
            // earlier new-pending event must not outlive it.
            if let Some(new_record) = record.methods.get_mut(NEW_METHOD) {
                new_record.transaction_hash = None;
            }
            record.address = Some(address.clone());
            record.created = true;
        }

        ContractEvent::MethodSuccess {
            contract,
            method,
            kind,
            inputs,
            tx_object,
            result,
        } => {
            let record = next.entry(contract.clone()).or_default();
            record.methods.insert(
                method.clone(),
                MethodRecord {
                    inputs: inputs.clone(),
                    tx_object: kind.records_tx_object().then(|| tx_object.clone()),
                    result: Some(result.clone()),
                    error: None,
                    transaction_hash: None,
                },
            );
        }

        ContractEvent::MethodError {
            contract,
            method,
            kind,
            inputs,
            tx_object,
            error,
        } => {
            let record = next.entry(contract.clone()).or_default();
            record.methods.insert(
                method.clone(),
                MethodRecord {
                    inputs: inputs.clone(),
                    tx_object: kind.records_tx_object().then(|| tx_object.clone()),
                    result: None,
                    error: Some(error.clone()),
                    transaction_hash: None,
                },
            );
        }
    }

    next
}

// =============================================================================
// TESTS
// =============================================================================
