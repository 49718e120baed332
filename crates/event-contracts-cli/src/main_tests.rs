// crates/event-contracts-cli/src/main_tests.rs
// ============================================================================
// Module: CLI Main Helpers Tests
// Description: Unit tests for argument parsing and CLI input helpers.
// Purpose: Ensure bounded reads fail closed and arguments parse as documented.
// Dependencies: event-contracts-cli main helpers
// ============================================================================

//! ## Overview
//! Validates clap argument shapes, payload size enforcement, and the
//! unmatchable-contract warnings printed by `contracts check`.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::PathBuf;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use clap::Parser;
use event_contracts_core::ContractDescriptor;
use event_contracts_core::ContractRegistry;
use event_contracts_core::PayloadSchema;
use serde_json::json;

use super::Cli;
use super::Commands;
use super::ContractsCommand;
use super::MAX_PAYLOAD_BYTES;
use super::read_payload;
use super::unmatchable_warnings;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn temp_file(label: &str) -> PathBuf {
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).expect("clock drift").as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("event-contracts-cli-{label}-{nanos}.json"));
    path
}

fn cleanup(path: &PathBuf) {
    let _ = fs::remove_file(path);
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn publish_accepts_target_overrides() {
    let cli = Cli::try_parse_from([
        "event-contracts",
        "publish",
        "--config",
        "deploy/event-contracts.toml",
        "--bucket",
        "orders-service-deployments",
        "--artifact-directory",
        "serverless/orders-service/dev/1700000000000",
    ])
    .unwrap();
    let Some(Commands::Publish(command)) = cli.command else {
        panic!("expected publish command");
    };
    assert_eq!(command.config, Some(PathBuf::from("deploy/event-contracts.toml")));
    assert_eq!(command.bucket.as_deref(), Some("orders-service-deployments"));
    assert_eq!(
        command.artifact_directory.as_deref(),
        Some("serverless/orders-service/dev/1700000000000")
    );
}

#[test]
fn contracts_check_requires_input() {
    assert!(Cli::try_parse_from(["event-contracts", "contracts", "check"]).is_err());
    let cli =
        Cli::try_parse_from(["event-contracts", "contracts", "check", "--input", "c.ron"]).unwrap();
    let Some(Commands::Contracts {
        command: ContractsCommand::Check(command),
    }) = cli.command
    else {
        panic!("expected contracts check command");
    };
    assert_eq!(command.input, PathBuf::from("c.ron"));
}

#[test]
fn version_flag_is_global() {
    let cli = Cli::try_parse_from(["event-contracts", "--version"]).unwrap();
    assert!(cli.show_version);
    assert!(cli.command.is_none());
}

#[test]
fn unmatchable_warnings_name_contracts_without_sources() {
    let registry = ContractRegistry::from_descriptors([
        ContractDescriptor::new(
            "order-created",
            ["order-service"],
            "OrderCreated",
            PayloadSchema::Present(json!({ "type": "object" })),
        ),
        ContractDescriptor::new(
            "orphaned",
            Vec::<String>::new(),
            "Orphaned",
            PayloadSchema::Absent,
        ),
    ])
    .unwrap();
    let warnings = unmatchable_warnings(&registry);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("orphaned"));
}

#[test]
fn read_payload_parses_json() {
    let path = temp_file("payload-ok");
    fs::write(&path, br#"{"orderId":"o-1"}"#).unwrap();
    let payload = read_payload(&path).unwrap();
    assert_eq!(payload["orderId"], "o-1");
    cleanup(&path);
}

#[test]
fn read_payload_rejects_oversized_file() {
    let path = temp_file("payload-large");
    let size = usize::try_from(MAX_PAYLOAD_BYTES).unwrap() + 1;
    fs::write(&path, vec![b' '; size]).unwrap();
    let err = read_payload(&path).unwrap_err();
    assert!(err.to_string().contains("exceeds size limit"));
    cleanup(&path);
}

#[test]
fn read_payload_rejects_invalid_json() {
    let path = temp_file("payload-bad");
    fs::write(&path, b"{not json").unwrap();
    let err = read_payload(&path).unwrap_err();
    assert!(err.to_string().contains("invalid payload json"));
    cleanup(&path);
}
