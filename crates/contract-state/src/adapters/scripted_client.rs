//! # Scripted Client Adapter
//!
//! In-memory [`RemoteClient`] for testing. Outcomes are scripted per method
//! name and replayed synchronously when the interceptor forwards a call;
//! deploy scripts may carry several stages so the pending-then-confirmed
//! double notification is exercisable without a live remote.

use crate::domain::entities::{MethodDescriptor, NEW_METHOD};
use crate::domain::value_objects::CallValue;
use crate::errors::RemoteError;
use crate::ports::outbound::{ClientCallback, RemoteClient};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// One outcome handed to a client callback.
pub type ScriptedOutcome = Result<CallValue, RemoteError>;

/// A call the interceptor forwarded to the client, as the client saw it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedCall {
    /// Instance address, or `None` for deploys.
    pub address: Option<String>,
    /// Method name (`"new"` for deploys).
    pub method: String,
    /// Raw (un-normalized) positional inputs.
    pub inputs: Vec<CallValue>,
    /// Raw options object, including any injected deploy payload.
    pub options: CallValue,
}

/// Scriptable remote client double.
#[derive(Default)]
pub struct ScriptedClient {
    /// Outcome queues, keyed by method name.
    outcomes: Mutex<HashMap<String, VecDeque<ScriptedOutcome>>>,
    /// Deploy scripts; each entry is the full callback sequence of one deploy.
    deploys: Mutex<VecDeque<Vec<ScriptedOutcome>>>,
    /// Everything forwarded to this client, in call order.
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedClient {
    /// Creates a client with no scripted outcomes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues one outcome for the next call to `method`.
    pub fn script_call(&self, method: impl Into<String>, outcome: ScriptedOutcome) {
        self.outcomes
            .lock()
            .unwrap()
            .entry(method.into())
            .or_default()
            .push_back(outcome);
    }

    /// Queues the callback sequence for the next deploy. Each stage fires
    /// one callback invocation, in order.
    pub fn script_deploy(&self, stages: Vec<ScriptedOutcome>) {
        self.deploys.lock().unwrap().push_back(stages);
    }

    /// Returns everything forwarded to this client so far.
    #[must_use]
    pub fn recorded_calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl RemoteClient for ScriptedClient {
    fn call(
        &self,
        address: &str,
        method: &MethodDescriptor,
        inputs: Vec<CallValue>,
        options: CallValue,
        mut callback: ClientCallback,
    ) {
        self.calls.lock().unwrap().push(RecordedCall {
            address: Some(address.to_owned()),
            method: method.name.clone(),
            inputs,
            options,
        });

        let outcome = self
            .outcomes
            .lock()
            .unwrap()
            .get_mut(&method.name)
            .and_then(VecDeque::pop_front)
            .unwrap_or(Ok(CallValue::Null));

        callback(outcome);
    }

    fn deploy(&self, inputs: Vec<CallValue>, options: CallValue, mut callback: ClientCallback) {
        self.calls.lock().unwrap().push(RecordedCall {
            address: None,
            method: NEW_METHOD.to_owned(),
            inputs,
            options,
        });

        let stages = self.deploys.lock().unwrap().pop_front().unwrap_or_else(|| {
            vec![Err(RemoteError::new("no scripted deploy outcome"))]
        });

        for stage in stages {
            callback(stage);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
