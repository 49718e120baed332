// crates/event-contracts-config/src/config/tests.rs
// ============================================================================
// Module: Config Unit Tests
// Description: Unit coverage for config helpers.
// Purpose: Ensure key, bucket, and revision validation fail closed.
// Dependencies: event-contracts-config
// ============================================================================

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::panic,
    reason = "Test-only assertions favor direct unwrap/expect for clarity."
)]

use super::*;

#[test]
fn validate_relative_key_accepts_nested_directory() {
    let result = validate_relative_key("serverless/orders/dev/1700000000000", "field");
    assert!(result.is_ok(), "valid directory should pass");
}

#[test]
fn validate_relative_key_rejects_backslash() {
    let result = validate_relative_key("serverless\\orders", "field");
    assert!(result.unwrap_err().to_string().contains("backslash"));
}

#[test]
fn validate_relative_key_rejects_absolute_path() {
    assert!(validate_relative_key("/serverless", "field").is_err());
}

#[test]
fn validate_relative_key_rejects_parent_traversal() {
    assert!(validate_relative_key("../serverless", "field").is_err());
    assert!(validate_relative_key("serverless/../../etc", "field").is_err());
}

#[test]
fn validate_bucket_name_enforces_charset_and_length() {
    assert!(validate_bucket_name("orders-deployments.v1").is_ok());
    assert!(validate_bucket_name("ab").is_err());
    assert!(validate_bucket_name("Orders").is_err());
    assert!(validate_bucket_name(&"a".repeat(64)).is_err());
}

#[test]
fn full_revision_hash_accepts_sha1_and_sha256_lengths() {
    assert!(is_full_revision_hash(&"a".repeat(40)));
    assert!(is_full_revision_hash(&"0F".repeat(32)));
    assert!(!is_full_revision_hash("abc123"));
    assert!(!is_full_revision_hash(&"g".repeat(40)));
}

#[test]
fn declarations_path_resolves_relative_to_config_dir() {
    let mut config = EventContractsConfig::from_toml_str(
        r#"
[contracts]
declarations = "contracts.ron"
"#,
    )
    .unwrap();
    assert_eq!(config.declarations_path(), PathBuf::from("contracts.ron"));
    config.config_dir = Some(PathBuf::from("/srv/service"));
    assert_eq!(config.declarations_path(), PathBuf::from("/srv/service/contracts.ron"));
}

#[test]
fn resolve_target_prefers_overrides_and_strips_trailing_slash() {
    let publish = PublishConfig {
        bucket: Some("configured-bucket".to_string()),
        artifact_directory_name: Some("serverless/app/dev/1/".to_string()),
        object_store: ObjectStoreConfig::default(),
    };
    let target = publish.resolve_target(None, None).unwrap();
    assert_eq!(target.bucket, "configured-bucket");
    assert_eq!(target.artifact_directory_name, "serverless/app/dev/1");

    let target = publish.resolve_target(Some("override-bucket"), Some("other/dir")).unwrap();
    assert_eq!(target.bucket, "override-bucket");
    assert_eq!(target.artifact_directory_name, "other/dir");
}

#[test]
fn resolve_target_requires_bucket_and_directory() {
    let publish = PublishConfig::default();
    let err = publish.resolve_target(None, Some("dir")).unwrap_err();
    assert!(err.to_string().contains("publish.bucket"));
    let err = publish.resolve_target(Some("bucket-name"), None).unwrap_err();
    assert!(err.to_string().contains("publish.artifact_directory_name"));
}

#[test]
fn resolve_target_rejects_directory_with_surrounding_whitespace() {
    let publish = PublishConfig::default();
    for directory in [" deploy/1", "deploy/1 "] {
        let err = publish.resolve_target(Some("bucket-name"), Some(directory)).unwrap_err();
        assert!(err.to_string().contains("whitespace"), "{directory:?}: {err}");
    }
}

#[test]
fn config_dir_of_bare_filename_is_none() {
    assert_eq!(config_dir_of(Path::new("event-contracts.toml")), None);
    assert_eq!(config_dir_of(Path::new("svc/event-contracts.toml")), Some(PathBuf::from("svc")));
    assert_eq!(config_dir_of(Path::new("/srv/event-contracts.toml")), Some(PathBuf::from("/srv")));
}
