// crates/event-contracts-core/src/core/descriptor/tests.rs
// ============================================================================
// Module: Contract Descriptor Unit Tests
// Description: Unit coverage for descriptor construction and wire shape.
// Purpose: Ensure derived patterns and payload schema encoding stay stable.
// Dependencies: event-contracts-core, serde_json
// ============================================================================

//! ## Overview
//! Exercises pattern derivation, the fixed contract type, and the explicit
//! absent/present payload schema encoding.

// ============================================================================
// SECTION: Lint Configuration
// ============================================================================

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::panic,
    reason = "Test-only assertions favor direct unwrap/expect for clarity."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use serde_json::json;

use super::*;

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn serializes_with_camel_case_and_hyphenated_native_key() {
    let descriptor: ContractDescriptor = ContractDescriptor::new(
        "order-created",
        ["order-service"],
        "OrderCreated",
        PayloadSchema::Absent,
    );
    let value = serde_json::to_value(&descriptor).unwrap();
    assert_eq!(
        value,
        json!({
            "id": "order-created",
            "contractType": "eventBridge",
            "sources": ["order-service"],
            "eventType": "OrderCreated",
            "payloadSchema": null,
            "nativePattern": { "source": ["order-service"], "detail-type": ["OrderCreated"] },
            "pattern": { "source": ["order-service"], "detailType": ["OrderCreated"] },
        })
    );
}

#[test]
fn present_schema_serializes_as_schema_value() {
    let schema = json!({ "type": "object", "required": ["orderId"] });
    let descriptor = ContractDescriptor::new(
        "order-created",
        ["order-service"],
        "OrderCreated",
        PayloadSchema::Present(schema.clone()),
    );
    let value = serde_json::to_value(&descriptor).unwrap();
    assert_eq!(value["payloadSchema"], schema);
}

#[test]
fn payload_schema_null_deserializes_as_absent() {
    let schema: PayloadSchema = serde_json::from_value(json!(null)).unwrap();
    assert!(schema.is_absent());
    let schema: PayloadSchema = serde_json::from_value(json!({ "type": "string" })).unwrap();
    assert_eq!(schema.as_present(), Some(&json!({ "type": "string" })));
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct TypedSchema {
    title: &'static str,
}

#[test]
fn typed_schema_converts_to_json_form() {
    let descriptor = ContractDescriptor::new(
        "typed",
        vec!["svc".to_string()],
        "Typed",
        PayloadSchema::Present(TypedSchema {
            title: "typed-payload",
        }),
    );
    let json_descriptor = descriptor.to_json_schema().unwrap();
    assert_eq!(
        json_descriptor.payload_schema().as_present(),
        Some(&json!({ "title": "typed-payload" }))
    );
    assert_eq!(json_descriptor.native_pattern(), descriptor.native_pattern());
    assert_eq!(json_descriptor.pattern(), descriptor.pattern());
}

#[test]
fn contract_type_label_is_event_bridge() {
    assert_eq!(ContractType::EventBridge.as_str(), "eventBridge");
    assert_eq!(serde_json::to_value(ContractType::EventBridge).unwrap(), json!("eventBridge"));
}
