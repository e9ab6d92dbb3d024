//! # Lifecycle Integration Flows
//!
//! End-to-end scenarios across service, interceptor, reducer, and store:
//!
//! 1. **Bind**: `at(address)` updates state synchronously.
//! 2. **Deploy**: pending → confirmed two-phase flow, including the dual
//!    callback invocation and the re-bind that hands the caller a fully
//!    proxied wrapper.
//! 3. **Method calls**: normalized inputs in state, raw values forwarded.

#[cfg(test)]
mod tests {
    use contract_state::prelude::*;
    use std::sync::{Arc, Mutex};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn harness() -> (Arc<InMemoryStore>, Arc<ScriptedClient>, ContractService) {
        let store = Arc::new(InMemoryStore::new());
        let client = Arc::new(ScriptedClient::new());
        let service = ContractService::new(store.clone(), client.clone());
        (store, client, service)
    }

    /// The surface used throughout: constructor, one write method, one read
    /// method, one event.
    fn simple_store(service: &ContractService) -> Contract {
        service
            .register(
                ContractConfig::new(
                    "SimpleStore",
                    vec![
                        MethodDescriptor::constructor(0),
                        MethodDescriptor::function("set", 1),
                        MethodDescriptor::function("get", 0),
                        MethodDescriptor::event("SetComplete"),
                    ],
                )
                .with_deploy_payload("0x6060deadbeef"),
            )
            .unwrap()
    }

    fn tx_options() -> CallValue {
        map_value([
            ("from", CallValue::str("0xsender")),
            ("gas", CallValue::uint(U256::from(3_000_000u64))),
        ])
    }

    // =============================================================================
    // BIND SCENARIO
    // =============================================================================

    #[test]
    fn test_bind_updates_state_synchronously() {
        let (store, _, service) = harness();
        let contract = simple_store(&service);

        let bound = contract.at("0xabc");

        // No callback asynchrony: state is already current.
        let state = store.get_state();
        let record = &state["SimpleStore"];
        assert!(record.created);
        assert_eq!(record.address.as_deref(), Some("0xabc"));
        assert_eq!(bound.address(), "0xabc");
    }

    // =============================================================================
    // DEPLOY SCENARIO (PENDING -> CONFIRMED)
    // =============================================================================

    #[test]
    fn test_deploy_pending_then_confirmed() {
        let (store, client, service) = harness();
        let contract = simple_store(&service);

        client.script_deploy(vec![
            Ok(map_value([(
                "transactionHash",
                CallValue::str("0xhash"),
            )])),
            Ok(map_value([
                ("address", CallValue::str("0xabc")),
                ("transactionHash", CallValue::str("0xhash")),
            ])),
        ]);

        let notices: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let deployed: Arc<Mutex<Option<BoundContract>>> = Arc::new(Mutex::new(None));
        let pending_state: Arc<Mutex<Option<ContractsState>>> = Arc::new(Mutex::new(None));

        let notice_log = notices.clone();
        let deployed_slot = deployed.clone();
        let pending_snapshot = pending_state.clone();
        let observer = store.clone();

        contract.deploy(
            vec![],
            DeployOpts::new()
                .with_options(tx_options())
                .with_callback(move |outcome| match outcome.unwrap() {
                    DeployNotice::Pending(raw) => {
                        // The pending notice carries the raw client result.
                        assert_eq!(
                            raw.get("transactionHash"),
                            Some(&CallValue::str("0xhash"))
                        );
                        *pending_snapshot.lock().unwrap() = Some(observer.get_state());
                        notice_log.lock().unwrap().push("pending".to_owned());
                    }
                    DeployNotice::Deployed(bound) => {
                        notice_log.lock().unwrap().push("deployed".to_owned());
                        *deployed_slot.lock().unwrap() = Some(bound);
                    }
                }),
        );

        // Two notifications, in order.
        assert_eq!(
            notices.lock().unwrap().as_slice(),
            &["pending".to_owned(), "deployed".to_owned()]
        );

        // Phase 1: pending state had the transaction hash and created=false.
        let pending = pending_state.lock().unwrap().take().unwrap();
        let record = &pending["SimpleStore"];
        assert!(!record.created);
        let new_record = &record.methods[NEW_METHOD];
        assert_eq!(new_record.transaction_hash.as_deref(), Some("0xhash"));
        assert_eq!(
            new_record.tx_object.as_ref().and_then(|tx| tx.get("gas")).cloned(),
            Some(CallValue::str("3000000"))
        );

        // Phase 2: confirmed state carries the address; the pending hash is
        // gone from the construction record.
        let state = store.get_state();
        let record = &state["SimpleStore"];
        assert!(record.created);
        assert_eq!(record.address.as_deref(), Some("0xabc"));
        assert!(record.methods[NEW_METHOD].transaction_hash.is_none());

        // The caller got a fully proxied wrapper, not the raw result.
        let bound = deployed.lock().unwrap().take().unwrap();
        assert_eq!(bound.address(), "0xabc");
        assert_eq!(bound.transaction_hash(), Some("0xhash"));
        assert!(bound.method("set").is_some());

        // And its methods really are wired through to the client.
        bound
            .call("get", vec![], CallOpts::new())
            .unwrap();
        let calls = client.recorded_calls();
        let last = calls.last().unwrap();
        assert_eq!(last.method, "get");
        assert_eq!(last.address.as_deref(), Some("0xabc"));
    }

    #[test]
    fn test_deploy_error_is_recorded_and_forwarded() {
        let (store, client, service) = harness();
        let contract = simple_store(&service);

        client.script_deploy(vec![Err(RemoteError::new("insufficient funds"))]);

        let forwarded: Arc<Mutex<Option<RemoteError>>> = Arc::new(Mutex::new(None));
        let slot = forwarded.clone();
        contract.deploy(
            vec![],
            DeployOpts::new().with_callback(move |outcome| {
                *slot.lock().unwrap() = Some(outcome.err().unwrap());
            }),
        );

        // Same failure in the state tree and at the caller's callback.
        let state = store.get_state();
        let new_record = &state["SimpleStore"].methods[NEW_METHOD];
        assert_eq!(
            new_record.error,
            Some(CallValue::str("insufficient funds"))
        );
        assert!(new_record.result.is_none());
        assert!(!state["SimpleStore"].created);
        assert_eq!(
            forwarded.lock().unwrap().take().unwrap().message,
            "insufficient funds"
        );
    }

    #[test]
    fn test_deploy_options_are_copied_not_mutated() {
        let (_, client, service) = harness();
        let contract = simple_store(&service);

        let caller_options = tx_options();
        contract.deploy(
            vec![],
            DeployOpts::new().with_options(caller_options.clone()),
        );

        // The client saw the injected payload; the caller's value does not
        // have it (the options object was copied before injection).
        let call = client.recorded_calls().pop().unwrap();
        assert_eq!(
            call.options.get("data"),
            Some(&CallValue::str("0x6060deadbeef"))
        );
        assert_eq!(caller_options.get("data"), None);
    }

    // =============================================================================
    // METHOD CALL SCENARIOS
    // =============================================================================

    #[test]
    fn test_write_method_success_normalizes_into_state() {
        let (store, client, service) = harness();
        let contract = simple_store(&service);
        let bound = contract.at("0xabc");

        client.script_call("set", Ok(CallValue::str("0xdeadbeef")));

        let forwarded: Arc<Mutex<Option<CallValue>>> = Arc::new(Mutex::new(None));
        let slot = forwarded.clone();
        bound
            .call(
                "set",
                vec![CallValue::uint(U256::from(100u8))],
                CallOpts::new()
                    .with_options(tx_options())
                    .with_callback(move |outcome| {
                        *slot.lock().unwrap() = Some(outcome.unwrap());
                    }),
            )
            .unwrap();

        let state = store.get_state();
        let record = &state["SimpleStore"].methods["set"];
        assert_eq!(record.inputs, CallValue::Seq(vec![CallValue::str("100")]));
        assert_eq!(record.result, Some(CallValue::str("0xdeadbeef")));
        assert!(record.error.is_none());
        assert_eq!(
            record.tx_object.as_ref().and_then(|tx| tx.get("from")).cloned(),
            Some(CallValue::str("0xsender"))
        );

        // The caller's callback received the client's value unchanged.
        assert_eq!(
            forwarded.lock().unwrap().take(),
            Some(CallValue::str("0xdeadbeef"))
        );
    }

    #[test]
    fn test_method_error_then_success_leaves_no_stale_fields() {
        let (store, client, service) = harness();
        let contract = simple_store(&service);
        let bound = contract.at("0xabc");

        client.script_call("set", Err(RemoteError::new("revert")));
        bound
            .call("set", vec![CallValue::Int(1)], CallOpts::new())
            .unwrap();

        let state = store.get_state();
        let record = &state["SimpleStore"].methods["set"];
        assert_eq!(record.error, Some(CallValue::str("revert")));
        assert!(record.result.is_none());

        client.script_call("set", Ok(CallValue::str("0x01")));
        bound
            .call("set", vec![CallValue::Int(2)], CallOpts::new())
            .unwrap();

        let state = store.get_state();
        let record = &state["SimpleStore"].methods["set"];
        assert_eq!(record.result, Some(CallValue::str("0x01")));
        assert!(record.error.is_none());
    }

    #[test]
    fn test_event_subscription_takes_filter_not_inputs() {
        let (store, client, service) = harness();
        let contract = simple_store(&service);
        let bound = contract.at("0xabc");

        client.script_call("SetComplete", Ok(CallValue::str("log-entry")));

        // Positional inputs are ignored for events; the filter object is
        // the options value.
        bound
            .call(
                "SetComplete",
                vec![CallValue::Int(123)],
                CallOpts::new()
                    .with_options(map_value([("fromBlock", CallValue::Int(0))])),
            )
            .unwrap();

        let forwarded = client.recorded_calls().pop().unwrap();
        assert!(forwarded.inputs.is_empty());

        let state = store.get_state();
        let record = &state["SimpleStore"].methods["SetComplete"];
        assert_eq!(record.inputs, CallValue::Seq(vec![]));
        assert!(record.tx_object.is_none());
        assert_eq!(record.result, Some(CallValue::str("log-entry")));
    }

    // =============================================================================
    // ORDERING
    // =============================================================================

    #[test]
    fn test_observers_see_transitions_in_callback_order() {
        let (store, client, service) = harness();

        let created_flags: Arc<Mutex<Vec<bool>>> = Arc::new(Mutex::new(Vec::new()));
        let log = created_flags.clone();
        store.subscribe(Box::new(move |state| {
            if let Some(record) = state.get("SimpleStore") {
                log.lock().unwrap().push(record.created);
            }
        }));

        let contract = simple_store(&service);
        client.script_deploy(vec![
            Ok(map_value([("transactionHash", CallValue::str("0xh"))])),
            Ok(map_value([("address", CallValue::str("0xabc"))])),
        ]);
        contract.deploy(vec![], DeployOpts::new());

        // construct (false), pending (false), success (true), re-bind (true).
        assert_eq!(
            created_flags.lock().unwrap().as_slice(),
            &[false, false, true, true]
        );
    }
}
