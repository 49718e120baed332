// crates/event-contracts-core/src/core/manifest.rs
// ============================================================================
// Module: Contracts Manifest
// Description: Serialized collection of a service's declared contracts.
// Purpose: Build the canonical manifest and its integrity digest.
// Dependencies: serde, serde_jcs, sha2
// ============================================================================

//! ## Overview
//! The manifest records every contract a service declares, together with the
//! source-control revision it was built from and the contracts format version.
//! It is rendered as canonical JSON (RFC 8785) and hashed over exactly those
//! bytes, so the digest stored next to the object always matches its body.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Serialize;

use crate::core::descriptor::ContractDescriptor;
use crate::core::hashing::DEFAULT_HASH_ALGORITHM;
use crate::core::hashing::HashDigest;
use crate::core::hashing::HashError;
use crate::core::hashing::canonical_json_bytes;
use crate::core::hashing::hash_bytes;
use crate::core::identifiers::ContractId;
use crate::core::registry::ContractRegistry;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Contracts manifest format version.
pub const CONTRACTS_VERSION: &str = "1.0.0";
/// File name of the manifest inside the deployment artifact directory.
pub const MANIFEST_FILE_NAME: &str = "serverless-contracts.json";
/// Content type declared for the uploaded manifest.
pub const MANIFEST_CONTENT_TYPE: &str = "application/json";

// ============================================================================
// SECTION: Manifest
// ============================================================================

/// Contracts manifest published at deployment time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractsManifest {
    /// Declared contracts keyed by identifier.
    pub contracts: BTreeMap<ContractId, ContractDescriptor>,
    /// Full source-control revision hash.
    pub git_commit: String,
    /// Manifest format version tag.
    pub contracts_version: String,
}

impl ContractsManifest {
    /// Builds a manifest from a registry snapshot and a revision.
    #[must_use]
    pub fn new(registry: &ContractRegistry, git_commit: impl Into<String>) -> Self {
        Self {
            contracts: registry.snapshot(),
            git_commit: git_commit.into(),
            contracts_version: CONTRACTS_VERSION.to_string(),
        }
    }

    /// Renders the manifest to canonical bytes and computes their digest.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] when canonicalization fails.
    pub fn render(&self) -> Result<RenderedManifest, HashError> {
        let bytes = canonical_json_bytes(self)?;
        let digest = hash_bytes(DEFAULT_HASH_ALGORITHM, &bytes);
        Ok(RenderedManifest {
            bytes,
            digest,
        })
    }
}

/// Canonical manifest bytes with the digest computed over them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedManifest {
    /// Canonical JSON bytes.
    pub bytes: Vec<u8>,
    /// Digest over `bytes`.
    pub digest: HashDigest,
}
