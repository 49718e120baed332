// crates/event-contracts-config/src/examples.rs
// ============================================================================
// Module: Config Examples
// Description: Canonical example configuration payloads.
// Purpose: Deterministic examples for docs and tooling.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Example configuration used by documentation and the config test suite.

/// Returns a canonical example `event-contracts.toml` configuration.
#[must_use]
pub fn config_toml_example() -> String {
    String::from(
        r#"[contracts]
declarations = "contracts.json"

[publish]
bucket = "orders-service-deployments"
artifact_directory_name = "serverless/orders-service/dev/1700000000000-2023-11-14T22:13:20.000Z"

[publish.object_store]
provider = "s3"
region = "eu-west-1"
# prefix = "contracts"
# endpoint = "https://s3.example.com"
# force_path_style = false
# allow_http = false

[revision]
source = "git"
# repo_dir = "."

[audit]
enabled = true
# path = "event-contracts-audit.jsonl"
"#,
    )
}
