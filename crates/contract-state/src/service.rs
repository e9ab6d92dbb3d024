//! # Contract Tracking Service
//!
//! The orchestrating layer: registration, the call interceptor, and the
//! construction/binding controller.
//!
//! Data flow: a caller registers a contract (construct event) and receives a
//! [`Contract`] handle; `deploy` or `at` produce a [`BoundContract`] whose
//! [`MethodProxy`] wrappers normalize arguments, forward the real call, and
//! emit state events as results arrive. The reducer folds those events into
//! the store; the caller's own callbacks receive the raw client values.
//!
//! Execution model is callback-driven and single-threaded from the caller's
//! point of view: binding completes synchronously, everything else suspends
//! until the remote client fires a completion callback (possibly twice for
//! deploys). No retries, no timeouts, no cancellation in this layer.

use crate::domain::entities::{
    MethodDescriptor, MethodKind, MethodRecord, NEW_METHOD,
};
use crate::domain::normalize::{normalize, normalize_inputs};
use crate::domain::value_objects::CallValue;
use crate::errors::{CallError, ConfigError, RemoteError};
use crate::events::ContractEvent;
use crate::ports::inbound::{ContractConfig, ContractLifecycle};
use crate::ports::outbound::{ClientCallback, RemoteClient, StateStore};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

// =============================================================================
// CALL OPTIONS
// =============================================================================

/// Caller callback for a wrapped method call. Receives exactly what the
/// remote client reported (minus the transport-only `block` field), never
/// the normalized copies recorded in state.
pub type MethodCallback = Box<dyn FnMut(Result<CallValue, RemoteError>) + Send>;

/// Trailing options for a wrapped method call.
///
/// One explicit configuration object instead of positionally overloaded
/// trailing arguments: the options object defaults to `{}` and the callback
/// to a no-op, and a callback can never be mistaken for a positional input.
#[derive(Default)]
pub struct CallOpts {
    /// Transaction object (or filter object for event kinds).
    pub options: Option<CallValue>,
    /// Completion callback.
    pub callback: Option<MethodCallback>,
}

impl CallOpts {
    /// Empty options: `{}` object, no-op callback.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the transaction/filter object.
    #[must_use]
    pub fn with_options(mut self, options: CallValue) -> Self {
        self.options = Some(options);
        self
    }

    /// Sets the completion callback.
    #[must_use]
    pub fn with_callback(
        mut self,
        callback: impl FnMut(Result<CallValue, RemoteError>) + Send + 'static,
    ) -> Self {
        self.callback = Some(Box::new(callback));
        self
    }
}

// =============================================================================
// DEPLOY OPTIONS
// =============================================================================

/// Notification delivered to a deploy callback. Deploys notify twice when
/// the remote confirms asynchronously: `Pending` first, `Deployed` later.
pub enum DeployNotice {
    /// Submitted but unconfirmed; carries the raw intermediate client result.
    Pending(CallValue),
    /// Confirmed; carries the fully proxied instance wrapper.
    Deployed(BoundContract),
}

/// Caller callback for a deploy. `FnMut` because the pending and confirmed
/// notifications arrive through the same callback.
pub type DeployCallback = Box<dyn FnMut(Result<DeployNotice, RemoteError>) + Send>;

/// Trailing options for a deploy call.
#[derive(Default)]
pub struct DeployOpts {
    /// Transaction object. A copy is taken before the default deploy
    /// payload is injected; the caller's value is never mutated.
    pub options: Option<CallValue>,
    /// Completion callback.
    pub callback: Option<DeployCallback>,
}

impl DeployOpts {
    /// Empty options: `{}` object, no-op callback.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the transaction object.
    #[must_use]
    pub fn with_options(mut self, options: CallValue) -> Self {
        self.options = Some(options);
        self
    }

    /// Sets the completion callback.
    #[must_use]
    pub fn with_callback(
        mut self,
        callback: impl FnMut(Result<DeployNotice, RemoteError>) + Send + 'static,
    ) -> Self {
        self.callback = Some(Box::new(callback));
        self
    }
}

// =============================================================================
// SERVICE (REGISTRATION)
// =============================================================================

/// Entry point: binds a state store and a remote client, and registers
/// contracts for lifecycle tracking.
///
/// Both collaborators are passed in explicitly; there is no ambient global
/// store or client anywhere in this crate.
pub struct ContractService {
    store: Arc<dyn StateStore>,
    client: Arc<dyn RemoteClient>,
}

impl ContractService {
    /// Creates a service over the given collaborators.
    pub fn new(store: Arc<dyn StateStore>, client: Arc<dyn RemoteClient>) -> Self {
        Self { store, client }
    }

    /// Registers a contract: validates the config, installs the initial
    /// method-record scaffold via a construct event, and returns the
    /// lifecycle handle.
    ///
    /// # Errors
    ///
    /// Fatal [`ConfigError`] on an empty name, empty surface, or duplicate
    /// method names. No event is emitted for a rejected registration.
    pub fn register(&self, config: ContractConfig) -> Result<Contract, ConfigError> {
        if config.name.is_empty() {
            return Err(ConfigError::MissingName);
        }
        if config.surface.is_empty() {
            return Err(ConfigError::EmptySurface {
                contract: config.name,
            });
        }

        let mut scaffold: BTreeMap<String, MethodRecord> = BTreeMap::new();
        for method in &config.surface {
            let key = if method.kind == MethodKind::Constructor {
                NEW_METHOD
            } else {
                method.name.as_str()
            };
            if scaffold
                .insert(key.to_owned(), MethodRecord::scaffold(method.kind))
                .is_some()
            {
                return Err(ConfigError::DuplicateMethod {
                    contract: config.name,
                    method: key.to_owned(),
                });
            }
        }

        info!(
            contract = %config.name,
            methods = config.surface.len(),
            "registering contract"
        );
        self.store
            .dispatch(ContractEvent::construct(&config.name, scaffold));

        Ok(Contract {
            name: config.name,
            surface: Arc::from(config.surface),
            deploy_payload: config.deploy_payload,
            store: self.store.clone(),
            client: self.client.clone(),
        })
    }
}

impl ContractLifecycle for ContractService {
    type Handle = Contract;

    fn register(&self, config: ContractConfig) -> Result<Contract, ConfigError> {
        ContractService::register(self, config)
    }
}

// =============================================================================
// CONTRACT HANDLE (CONSTRUCTION / BINDING CONTROLLER)
// =============================================================================

/// A registered contract: not yet bound to any live instance.
///
/// Two paths lead to a usable [`BoundContract`]: `at` (synchronous bind to a
/// known address) and `deploy` (asynchronous, two-phase).
#[derive(Clone)]
pub struct Contract {
    name: String,
    surface: Arc<[MethodDescriptor]>,
    deploy_payload: Option<String>,
    store: Arc<dyn StateStore>,
    client: Arc<dyn RemoteClient>,
}

impl Contract {
    /// The contract's unique name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Binds to an existing instance at `address`.
    ///
    /// Builds the full interceptor-wrapped surface and emits the bind event
    /// synchronously; binding itself makes no remote call.
    pub fn at(&self, address: &str) -> BoundContract {
        debug!(contract = %self.name, address, "binding to existing instance");
        let bound = BoundContract::build(self, address);
        self.store
            .dispatch(ContractEvent::bind_at(&self.name, address));
        bound
    }

    /// Deploys a new instance.
    ///
    /// Inputs are truncated to the constructor arity. The options object is
    /// copied, and the registered deploy payload is injected under `"data"`
    /// when the caller supplied none. The deploy callback may be notified
    /// twice: [`DeployNotice::Pending`] when the remote reports only a
    /// transaction identifier, then [`DeployNotice::Deployed`] (with a fully
    /// proxied wrapper) once an address is known.
    pub fn deploy(&self, inputs: Vec<CallValue>, opts: DeployOpts) {
        let arity = self
            .surface
            .iter()
            .find(|method| method.kind == MethodKind::Constructor)
            .map_or(0, |method| method.arity);
        let inputs: Vec<CallValue> = inputs.into_iter().take(arity).collect();

        let mut options = opts.options.unwrap_or_else(CallValue::empty_map);
        if let (Some(payload), CallValue::Map(entries)) = (&self.deploy_payload, &mut options) {
            entries
                .entry("data".to_owned())
                .or_insert_with(|| CallValue::Str(payload.clone()));
        }

        let recorded_inputs = normalize_inputs(&inputs);
        let tx_object = normalize(&options);
        let mut callback: DeployCallback =
            opts.callback.unwrap_or_else(|| Box::new(|_| {}));

        let handle = self.clone();
        let client_callback: ClientCallback = Box::new(move |outcome| match outcome {
            Err(error) => {
                warn!(contract = %handle.name, %error, "deploy failed");
                handle.store.dispatch(ContractEvent::new_error(
                    &handle.name,
                    recorded_inputs.clone(),
                    tx_object.clone(),
                    error.to_value(),
                ));
                callback(Err(error));
            }
            Ok(result) => {
                if let Some(address) = result.get("address").and_then(CallValue::as_str) {
                    let address = address.to_owned();
                    info!(contract = %handle.name, address, "deploy confirmed");
                    handle
                        .store
                        .dispatch(ContractEvent::new_success(&handle.name, &address));

                    // Re-bind through the binding path so the caller gets a
                    // fully proxied wrapper, not the raw client result.
                    let mut bound = handle.at(&address);
                    bound.transaction_hash = result
                        .get("transactionHash")
                        .and_then(CallValue::as_str)
                        .map(str::to_owned);
                    callback(Ok(DeployNotice::Deployed(bound)));
                } else if let Some(hash) =
                    result.get("transactionHash").and_then(CallValue::as_str)
                {
                    debug!(contract = %handle.name, transaction_hash = hash, "deploy pending");
                    handle.store.dispatch(ContractEvent::new_pending(
                        &handle.name,
                        recorded_inputs.clone(),
                        tx_object.clone(),
                        hash,
                    ));
                    callback(Ok(DeployNotice::Pending(result)));
                } else {
                    // Intermediate result with neither field: nothing to
                    // record, but the caller still hears about it.
                    callback(Ok(DeployNotice::Pending(result)));
                }
            }
        });

        self.client.deploy(inputs, options, client_callback);
    }
}

// =============================================================================
// BOUND CONTRACT (WRAPPED SURFACE)
// =============================================================================

/// A contract bound to a live instance: one [`MethodProxy`] per described
/// method, plus the address (and transaction hash, after a deploy).
#[derive(Clone)]
pub struct BoundContract {
    name: String,
    address: String,
    transaction_hash: Option<String>,
    methods: BTreeMap<String, MethodProxy>,
}

impl BoundContract {
    fn build(contract: &Contract, address: &str) -> Self {
        let methods = contract
            .surface
            .iter()
            .filter(|method| method.kind != MethodKind::Constructor)
            .map(|method| {
                (
                    method.name.clone(),
                    MethodProxy {
                        contract: contract.name.clone(),
                        address: address.to_owned(),
                        descriptor: method.clone(),
                        store: contract.store.clone(),
                        client: contract.client.clone(),
                    },
                )
            })
            .collect();

        Self {
            name: contract.name.clone(),
            address: address.to_owned(),
            transaction_hash: None,
            methods,
        }
    }

    /// The contract's unique name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Address of the bound instance.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Transaction identifier of the deploy that produced this instance,
    /// when it arrived through the deploy path.
    #[must_use]
    pub fn transaction_hash(&self) -> Option<&str> {
        self.transaction_hash.as_deref()
    }

    /// The wrapped method named `name`.
    #[must_use]
    pub fn method(&self, name: &str) -> Option<&MethodProxy> {
        self.methods.get(name)
    }

    /// Names of all wrapped methods.
    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(String::as_str)
    }

    /// Invokes the wrapped method named `method`.
    ///
    /// # Errors
    ///
    /// [`CallError::UnknownMethod`] when the surface has no such method.
    pub fn call(
        &self,
        method: &str,
        inputs: Vec<CallValue>,
        opts: CallOpts,
    ) -> Result<(), CallError> {
        let proxy = self
            .methods
            .get(method)
            .ok_or_else(|| CallError::UnknownMethod(method.to_owned()))?;
        proxy.invoke(inputs, opts);
        Ok(())
    }
}

// =============================================================================
// METHOD PROXY (CALL INTERCEPTOR)
// =============================================================================

/// Interceptor wrapper around one remote method.
///
/// Each invocation forwards the raw call to the remote client and emits
/// exactly one state event when it resolves — success or error, never both.
#[derive(Clone)]
pub struct MethodProxy {
    contract: String,
    address: String,
    descriptor: MethodDescriptor,
    store: Arc<dyn StateStore>,
    client: Arc<dyn RemoteClient>,
}

impl MethodProxy {
    /// The surface entry this proxy wraps.
    #[must_use]
    pub fn descriptor(&self) -> &MethodDescriptor {
        &self.descriptor
    }

    /// Invokes the wrapped method.
    ///
    /// Inputs are truncated to the effective arity (zero for event kinds);
    /// the options object defaults to `{}` and the callback to a no-op.
    /// Normalized copies of inputs and options go into the emitted events;
    /// the remote client and the caller's callback both see raw values.
    pub fn invoke(&self, inputs: Vec<CallValue>, opts: CallOpts) {
        let arity = self.descriptor.effective_arity();
        let inputs: Vec<CallValue> = inputs.into_iter().take(arity).collect();
        let options = opts.options.unwrap_or_else(CallValue::empty_map);
        let mut callback: MethodCallback =
            opts.callback.unwrap_or_else(|| Box::new(|_| {}));

        let recorded_inputs = normalize_inputs(&inputs);
        let tx_object = normalize(&options);

        debug!(
            contract = %self.contract,
            method = %self.descriptor.name,
            address = %self.address,
            "forwarding wrapped call"
        );

        let store = self.store.clone();
        let contract = self.contract.clone();
        let descriptor = self.descriptor.clone();
        let client_callback: ClientCallback = Box::new(move |outcome| match outcome {
            Err(error) => {
                warn!(contract = %contract, method = %descriptor.name, %error, "call failed");
                store.dispatch(ContractEvent::method_error(
                    &contract,
                    &descriptor.name,
                    descriptor.kind,
                    recorded_inputs.clone(),
                    tx_object.clone(),
                    error.to_value(),
                ));
                callback(Err(error));
            }
            Ok(mut result) => {
                // `block` is transport bookkeeping, not state.
                if let CallValue::Map(entries) = &mut result {
                    entries.remove("block");
                }
                store.dispatch(ContractEvent::method_success(
                    &contract,
                    &descriptor.name,
                    descriptor.kind,
                    recorded_inputs.clone(),
                    tx_object.clone(),
                    normalize(&result),
                ));
                callback(Ok(result));
            }
        });

        self.client.call(
            &self.address,
            &self.descriptor,
            inputs,
            options,
            client_callback,
        );
    }
}

// =============================================================================
// TESTS
// =============================================================================
