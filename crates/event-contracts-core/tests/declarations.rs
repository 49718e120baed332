// crates/event-contracts-core/tests/declarations.rs
// ============================================================================
// Module: Contract Declaration Tests
// Description: Verifies JSON and RON declaration loading.
// ============================================================================
//! ## Overview
//! Ensures declarations parse into descriptors, require an explicit payload
//! schema, reject duplicates and unknown formats, and enforce size limits.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions are permitted."
)]

use std::fs;

use event_contracts_core::ContractError;
use event_contracts_core::ContractId;
use event_contracts_core::DeclarationFormat;
use event_contracts_core::PayloadSchema;
use event_contracts_core::declarations::MAX_DECLARATIONS_BYTES;
use event_contracts_core::load_declarations;
use event_contracts_core::parse_declarations;
use serde_json::json;
use tempfile::tempdir;

const JSON_INPUT: &str = r#"{
  "contracts": [
    {
      "id": "order-created",
      "sources": ["order-service"],
      "eventType": "OrderCreated",
      "payloadSchema": { "type": "object", "required": ["orderId"] }
    },
    {
      "id": "ping",
      "sources": [],
      "eventType": "Ping",
      "payloadSchema": null
    }
  ]
}"#;

const RON_INPUT: &str = r#"(
  contracts: [
    (
      id: "order-created",
      sources: ["order-service"],
      eventType: "OrderCreated",
      payloadSchema: Some({ "type": "object", "required": ["orderId"] }),
    ),
    (
      id: "ping",
      sources: [],
      eventType: "Ping",
      payloadSchema: None,
    ),
  ],
)"#;

#[test]
fn json_declarations_build_registry() {
    let registry = parse_declarations(JSON_INPUT, DeclarationFormat::Json).unwrap();
    assert_eq!(registry.len(), 2);
    let order = registry.get(&ContractId::from("order-created")).unwrap();
    assert_eq!(order.native_pattern().source, ["order-service"]);
    assert_eq!(
        order.payload_schema(),
        &PayloadSchema::Present(json!({ "type": "object", "required": ["orderId"] }))
    );
    let ping = registry.get(&ContractId::from("ping")).unwrap();
    assert!(ping.payload_schema().is_absent());
    assert!(ping.matches_nothing());
}

#[test]
fn ron_and_json_declarations_are_equivalent() {
    let json = parse_declarations(JSON_INPUT, DeclarationFormat::Json).unwrap();
    let ron = parse_declarations(RON_INPUT, DeclarationFormat::Ron).unwrap();
    assert_eq!(json, ron);
}

#[test]
fn missing_payload_schema_is_rejected() {
    let input = r#"{ "contracts": [ { "id": "a", "sources": ["s"], "eventType": "A" } ] }"#;
    let err = parse_declarations(input, DeclarationFormat::Json).unwrap_err();
    let ContractError::Parse {
        format,
        error,
    } = err
    else {
        panic!("expected parse error");
    };
    assert_eq!(format, DeclarationFormat::Json);
    assert!(error.contains("payloadSchema"), "unexpected error: {error}");
}

#[test]
fn unknown_fields_are_rejected() {
    let input = r#"{ "contracts": [ { "id": "a", "sources": [], "eventType": "A",
        "payloadSchema": null, "detailType": "A" } ] }"#;
    let err = parse_declarations(input, DeclarationFormat::Json).unwrap_err();
    assert!(matches!(err, ContractError::Parse { .. }));
}

#[test]
fn duplicate_ids_are_rejected() {
    let input = r#"{ "contracts": [
        { "id": "a", "sources": [], "eventType": "A", "payloadSchema": null },
        { "id": "a", "sources": [], "eventType": "B", "payloadSchema": null }
    ] }"#;
    let err = parse_declarations(input, DeclarationFormat::Json).unwrap_err();
    assert!(matches!(err, ContractError::DuplicateContract(id) if id.as_str() == "a"));
}

#[test]
fn load_detects_format_from_extension() {
    let dir = tempdir().unwrap();
    let json_path = dir.path().join("contracts.json");
    let ron_path = dir.path().join("contracts.RON");
    fs::write(&json_path, JSON_INPUT).unwrap();
    fs::write(&ron_path, RON_INPUT).unwrap();
    assert_eq!(load_declarations(&json_path).unwrap(), load_declarations(&ron_path).unwrap());
}

#[test]
fn load_rejects_unknown_extension() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("contracts.yaml");
    fs::write(&path, "contracts: []").unwrap();
    let err = load_declarations(&path).unwrap_err();
    assert!(matches!(err, ContractError::Invalid(_)));
}

#[test]
fn load_rejects_oversized_files() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("contracts.json");
    fs::write(&path, vec![b' '; MAX_DECLARATIONS_BYTES + 1]).unwrap();
    let err = load_declarations(&path).unwrap_err();
    assert!(matches!(err, ContractError::Invalid(message) if message.contains("size limit")));
}

#[test]
fn load_reports_missing_files_as_io() {
    let dir = tempdir().unwrap();
    let err = load_declarations(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, ContractError::Io(_)));
}
