//! # State Shape and Invariant Flows
//!
//! Verifies the persisted state layout (`{ contractName: record }` as plain
//! JSON) and that every state the scenario flows produce satisfies the
//! domain invariants.

#[cfg(test)]
mod tests {
    use contract_state::prelude::*;
    use std::sync::{Arc, Mutex};

    fn harness() -> (Arc<InMemoryStore>, Arc<ScriptedClient>, ContractService) {
        let store = Arc::new(InMemoryStore::new());
        let client = Arc::new(ScriptedClient::new());
        let service = ContractService::new(store.clone(), client.clone());
        (store, client, service)
    }

    #[test]
    fn test_snapshot_serializes_to_documented_layout() {
        let (store, client, service) = harness();
        let contract = service
            .register(ContractConfig::new(
                "SimpleStore",
                vec![
                    MethodDescriptor::constructor(0),
                    MethodDescriptor::function("set", 1),
                ],
            ))
            .unwrap();
        let bound = contract.at("0xabc");

        client.script_call("set", Ok(CallValue::str("0x01")));
        bound
            .call(
                "set",
                vec![CallValue::uint(U256::from(100u8))],
                CallOpts::new().with_options(map_value([("from", CallValue::str("0xaa"))])),
            )
            .unwrap();

        let json = serde_json::to_value(store.get_state()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "SimpleStore": {
                    "created": true,
                    "address": "0xabc",
                    "methods": {
                        "new": { "inputs": [], "txObject": {}, "result": null, "error": null },
                        "set": {
                            "inputs": ["100"],
                            "txObject": { "from": "0xaa" },
                            "result": "0x01",
                            "error": null
                        }
                    }
                }
            })
        );
    }

    #[test]
    fn test_reregistration_layers_onto_existing_state() {
        let (store, _, service) = harness();
        let first = service
            .register(ContractConfig::new(
                "Token",
                vec![MethodDescriptor::function("get", 0)],
            ))
            .unwrap();
        first.at("0xabc");
        assert!(store.get_state()["Token"].created);

        // Registering again with a different surface merges method records
        // and resets `created`, but keeps the earlier address.
        service
            .register(ContractConfig::new(
                "Token",
                vec![MethodDescriptor::function("set", 1)],
            ))
            .unwrap();

        let state = store.get_state();
        let record = &state["Token"];
        assert!(!record.created);
        assert_eq!(record.address.as_deref(), Some("0xabc"));
        assert!(record.methods.contains_key("get"));
        assert!(record.methods.contains_key("set"));
    }

    #[test]
    fn test_every_observed_state_satisfies_invariants() {
        let (store, client, service) = harness();

        let violations: Arc<Mutex<Vec<InvariantViolation>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = violations.clone();
        store.subscribe(Box::new(move |state| {
            sink.lock().unwrap().extend(check_state_invariants(state));
        }));

        let contract = service
            .register(
                ContractConfig::new(
                    "SimpleStore",
                    vec![
                        MethodDescriptor::constructor(1),
                        MethodDescriptor::function("set", 1),
                        MethodDescriptor::event("SetComplete"),
                    ],
                )
                .with_deploy_payload("0xcode"),
            )
            .unwrap();

        // Failed deploy, then a successful two-phase one, then method traffic.
        client.script_deploy(vec![Err(RemoteError::new("nonce too low"))]);
        contract.deploy(vec![CallValue::Int(7)], DeployOpts::new());

        client.script_deploy(vec![
            Ok(map_value([("transactionHash", CallValue::str("0xh"))])),
            Ok(map_value([("address", CallValue::str("0xabc"))])),
        ]);
        let deployed: Arc<Mutex<Option<BoundContract>>> = Arc::new(Mutex::new(None));
        let slot = deployed.clone();
        contract.deploy(
            vec![CallValue::Int(7)],
            DeployOpts::new().with_callback(move |outcome| {
                if let Ok(DeployNotice::Deployed(bound)) = outcome {
                    *slot.lock().unwrap() = Some(bound);
                }
            }),
        );

        let bound = deployed.lock().unwrap().take().unwrap();
        client.script_call("set", Err(RemoteError::new("revert")));
        bound
            .call("set", vec![CallValue::Int(1)], CallOpts::new())
            .unwrap();
        client.script_call("set", Ok(CallValue::str("0x01")));
        bound
            .call("set", vec![CallValue::Int(2)], CallOpts::new())
            .unwrap();

        assert_eq!(violations.lock().unwrap().as_slice(), &[]);
    }

    #[test]
    fn test_normalization_applies_at_every_depth_of_recorded_state() {
        let (store, client, service) = harness();
        let contract = service
            .register(ContractConfig::new(
                "Token",
                vec![MethodDescriptor::function("batch", 1)],
            ))
            .unwrap();
        let bound = contract.at("0xabc");

        client.script_call(
            "batch",
            Ok(map_value([(
                "amounts",
                CallValue::Seq(vec![
                    CallValue::uint(U256::from(10u8)),
                    CallValue::uint(U256::from(20u8)),
                ]),
            )])),
        );

        bound
            .call(
                "batch",
                vec![CallValue::Seq(vec![CallValue::uint(U256::from(5u8))])],
                CallOpts::new()
                    .with_options(map_value([("gas", CallValue::uint(U256::from(9000u64)))])),
            )
            .unwrap();

        let state = store.get_state();
        let record = &state["Token"].methods["batch"];

        // Nested numeric leaves become decimal strings everywhere.
        assert_eq!(
            record.inputs,
            CallValue::Seq(vec![CallValue::Seq(vec![CallValue::str("5")])])
        );
        assert_eq!(
            record.result.as_ref().and_then(|r| r.get("amounts")).cloned(),
            Some(CallValue::Seq(vec![
                CallValue::str("10"),
                CallValue::str("20"),
            ]))
        );
        assert_eq!(
            record.tx_object.as_ref().and_then(|tx| tx.get("gas")).cloned(),
            Some(CallValue::str("9000"))
        );

        // Normalizing a recorded value again changes nothing.
        let recorded = record.inputs.clone();
        assert_eq!(normalize(&recorded), recorded);
    }
}
