// crates/event-contracts-publish/src/object_store/tests.rs
// ============================================================================
// Module: Object Store Unit Tests
// Description: Key derivation and prefix normalization checks.
// ============================================================================

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only assertions favor direct unwrap/expect for clarity."
)]

use event_contracts_config::ObjectStoreConfig;

use super::ObjectStoreError;
use super::S3ObjectStoreClient;
use super::manifest_object_key;
use super::normalize_prefix;

#[test]
fn prefix_is_normalized_with_single_trailing_slash() {
    assert_eq!(normalize_prefix("").unwrap(), "");
    assert_eq!(normalize_prefix("contracts").unwrap(), "contracts/");
    assert_eq!(normalize_prefix("team/contracts/").unwrap(), "team/contracts/");
}

#[test]
fn prefix_rejects_absolute_and_traversal() {
    assert!(matches!(normalize_prefix("/abs"), Err(ObjectStoreError::Invalid(_))));
    assert!(matches!(normalize_prefix("a/../b"), Err(ObjectStoreError::Invalid(_))));
    assert!(matches!(normalize_prefix("a\\b"), Err(ObjectStoreError::Invalid(_))));
    assert!(matches!(normalize_prefix("   "), Err(ObjectStoreError::Invalid(_))));
}

#[test]
fn manifest_key_joins_directory_and_file_name() {
    let key = manifest_object_key(
        "",
        "serverless/orders-service/dev/1700000000000-2023-11-14T22:13:20.000Z",
    )
    .unwrap();
    assert_eq!(
        key,
        "serverless/orders-service/dev/1700000000000-2023-11-14T22:13:20.000Z/\
         serverless-contracts.json"
    );
}

#[test]
fn manifest_key_applies_root_prefix_and_trims_directory_slash() {
    let prefix = normalize_prefix("contracts").unwrap();
    let key = manifest_object_key(&prefix, "deploy/1/").unwrap();
    assert_eq!(key, "contracts/deploy/1/serverless-contracts.json");
}

#[test]
fn manifest_key_rejects_invalid_directories() {
    for directory in ["", "/", "/abs/dir", "../escape", "./a", "a//b", "a\\b", " deploy/1"] {
        assert!(
            matches!(manifest_object_key("", directory), Err(ObjectStoreError::Invalid(_))),
            "directory {directory:?} should be rejected"
        );
    }
}

#[test]
fn manifest_key_rejects_long_segments() {
    let directory = "x".repeat(256);
    assert!(matches!(manifest_object_key("", &directory), Err(ObjectStoreError::Invalid(_))));
}

#[test]
fn s3_client_rejects_invalid_config_before_connecting() {
    let config = ObjectStoreConfig {
        endpoint: Some("http://localhost:9000".to_string()),
        ..ObjectStoreConfig::default()
    };
    let result = S3ObjectStoreClient::new(&config);
    assert!(matches!(result, Err(ObjectStoreError::Invalid(_))));
}

#[test]
fn s3_client_builds_from_explicit_region_and_endpoint() {
    let config = ObjectStoreConfig {
        region: Some("us-east-1".to_string()),
        endpoint: Some("https://s3.example.test".to_string()),
        force_path_style: true,
        ..ObjectStoreConfig::default()
    };
    assert!(S3ObjectStoreClient::new(&config).is_ok());
}
