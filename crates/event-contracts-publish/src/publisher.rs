// crates/event-contracts-publish/src/publisher.rs
// ============================================================================
// Module: Manifest Publisher
// Description: Compiles the contract registry into a manifest and uploads it.
// Purpose: Deployment-time publication of the contracts manifest.
// Dependencies: event-contracts-core, event-contracts-config
// ============================================================================

//! ## Overview
//! [`ManifestPublisher::publish`] runs one synchronous pass:
//!
//! 1. snapshot the registry,
//! 2. derive and validate the object key,
//! 3. look up the current revision,
//! 4. render the canonical manifest and its SHA-256 digest,
//! 5. upload with the digest under the `filesha256` metadata key.
//!
//! Any failure aborts the pass; there is no retry. Every attempt, successful
//! or not, is recorded on the audit sink.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;

use event_contracts_config::EventContractsConfig;
use event_contracts_config::PublishTarget;
use event_contracts_core::CONTRACTS_VERSION;
use event_contracts_core::ContractRegistry;
use event_contracts_core::ContractsManifest;
use event_contracts_core::HashDigest;
use event_contracts_core::MANIFEST_CONTENT_TYPE;
use event_contracts_core::RenderedManifest;
use serde::Serialize;

use crate::audit::NoopAuditSink;
use crate::audit::PublishAuditEvent;
use crate::audit::PublishAuditEventParams;
use crate::audit::PublishAuditSink;
use crate::audit::PublishOutcome;
use crate::audit::sink_from_config;
use crate::object_store::ObjectStoreClient;
use crate::object_store::ObjectStoreError;
use crate::object_store::PutObjectRequest;
use crate::object_store::client_from_config;
use crate::object_store::manifest_object_key;
use crate::object_store::normalize_prefix;
use crate::revision::RevisionError;
use crate::revision::RevisionSource;
use crate::revision::source_from_config;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Object metadata key carrying the manifest digest.
pub const DIGEST_METADATA_KEY: &str = "filesha256";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while publishing a manifest.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// Publisher configuration could not be applied.
    #[error("publish config invalid: {0}")]
    Config(String),
    /// Revision lookup failed.
    #[error(transparent)]
    Revision(#[from] RevisionError),
    /// Manifest serialization or hashing failed.
    #[error("manifest rendering failed: {0}")]
    Manifest(String),
    /// Object key derivation or upload failed.
    #[error(transparent)]
    ObjectStore(#[from] ObjectStoreError),
}

// ============================================================================
// SECTION: Results
// ============================================================================

/// A rendered manifest together with its source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedManifest {
    /// Manifest document.
    pub manifest: ContractsManifest,
    /// Canonical bytes and digest.
    pub rendered: RenderedManifest,
}

/// Summary of a successful publish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishReceipt {
    /// Destination bucket.
    pub bucket: String,
    /// Object key.
    pub key: String,
    /// Object URI (`<scheme>://<bucket>/<key>`).
    pub uri: String,
    /// Revision stamped into the manifest.
    pub git_commit: String,
    /// Manifest format version.
    pub contracts_version: String,
    /// Number of contracts published.
    pub contract_count: usize,
    /// Canonical manifest size in bytes.
    pub manifest_bytes: usize,
    /// Manifest content digest.
    pub digest: HashDigest,
}

/// Progress recorded for the failure audit event.
#[derive(Default)]
struct Attempt {
    /// Derived object key.
    key: Option<String>,
    /// Resolved revision.
    git_commit: Option<String>,
    /// Rendered manifest, once available.
    rendered: Option<RenderedManifest>,
}

// ============================================================================
// SECTION: Publisher
// ============================================================================

/// Uploads compiled contract manifests through injected collaborators.
pub struct ManifestPublisher {
    /// Revision lookup.
    revision: Arc<dyn RevisionSource>,
    /// Upload backend.
    store: Arc<dyn ObjectStoreClient>,
    /// Audit sink for publish attempts.
    audit: Arc<dyn PublishAuditSink>,
    /// Normalized root prefix (empty or ending in `/`).
    root_prefix: String,
}

impl ManifestPublisher {
    /// Creates a publisher with no root prefix and no audit output.
    #[must_use]
    pub fn new(revision: Arc<dyn RevisionSource>, store: Arc<dyn ObjectStoreClient>) -> Self {
        Self {
            revision,
            store,
            audit: Arc::new(NoopAuditSink),
            root_prefix: String::new(),
        }
    }

    /// Builds a publisher from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError`] when the object store, prefix, or audit sink
    /// cannot be initialized.
    pub fn from_config(config: &EventContractsConfig) -> Result<Self, PublishError> {
        let base_dir = config.config_dir.as_deref();
        let store = client_from_config(&config.publish.object_store)?;
        let revision = source_from_config(&config.revision, base_dir);
        let audit = sink_from_config(&config.audit, base_dir)
            .map_err(|err| PublishError::Config(format!("audit log: {err}")))?;
        let publisher = Self::new(revision, store).with_audit(audit);
        match config.publish.object_store.prefix.as_deref() {
            Some(prefix) => publisher.with_root_prefix(prefix),
            None => Ok(publisher),
        }
    }

    /// Replaces the audit sink.
    #[must_use]
    pub fn with_audit(mut self, audit: Arc<dyn PublishAuditSink>) -> Self {
        self.audit = audit;
        self
    }

    /// Places every manifest key behind `prefix`.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::ObjectStore`] when the prefix is not a valid
    /// relative key.
    pub fn with_root_prefix(mut self, prefix: &str) -> Result<Self, PublishError> {
        self.root_prefix = normalize_prefix(prefix)?;
        Ok(self)
    }

    /// Publishes the manifest for `registry` to `target`.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError`] when key derivation, revision lookup,
    /// rendering, or the upload fails. Nothing is uploaded unless every
    /// earlier step succeeded.
    pub fn publish(
        &self,
        registry: &ContractRegistry,
        target: &PublishTarget,
    ) -> Result<PublishReceipt, PublishError> {
        let snapshot = registry.clone();
        let mut attempt = Attempt::default();
        let result = self.publish_snapshot(&snapshot, target, &mut attempt);
        let params = match &result {
            Ok(receipt) => PublishAuditEventParams {
                outcome: PublishOutcome::Published,
                bucket: receipt.bucket.clone(),
                key: Some(receipt.key.clone()),
                git_commit: Some(receipt.git_commit.clone()),
                contract_count: receipt.contract_count,
                manifest_bytes: Some(receipt.manifest_bytes),
                digest: Some(receipt.digest.clone()),
                error: None,
            },
            Err(err) => PublishAuditEventParams {
                outcome: PublishOutcome::Failed,
                bucket: target.bucket.clone(),
                key: attempt.key,
                git_commit: attempt.git_commit,
                contract_count: snapshot.len(),
                manifest_bytes: attempt.rendered.as_ref().map(|rendered| rendered.bytes.len()),
                digest: attempt.rendered.map(|rendered| rendered.digest),
                error: Some(err.to_string()),
            },
        };
        self.audit.record(&PublishAuditEvent::new(params));
        result
    }

    /// Runs the publish steps against an already-taken snapshot.
    fn publish_snapshot(
        &self,
        snapshot: &ContractRegistry,
        target: &PublishTarget,
        attempt: &mut Attempt,
    ) -> Result<PublishReceipt, PublishError> {
        let key = manifest_object_key(&self.root_prefix, &target.artifact_directory_name)?;
        attempt.key = Some(key.clone());
        let git_commit = self.revision.current_revision()?;
        attempt.git_commit = Some(git_commit.clone());
        let prepared = render(snapshot, git_commit.clone())?;
        attempt.rendered = Some(prepared.rendered.clone());

        let RenderedManifest {
            bytes,
            digest,
        } = prepared.rendered;
        let manifest_bytes = bytes.len();
        let mut metadata = BTreeMap::new();
        metadata.insert(DIGEST_METADATA_KEY.to_string(), digest.value.clone());
        self.store.put_object(PutObjectRequest {
            bucket: target.bucket.clone(),
            key: key.clone(),
            body: bytes,
            content_type: MANIFEST_CONTENT_TYPE.to_string(),
            metadata,
        })?;

        Ok(PublishReceipt {
            uri: format!("{}://{}/{}", self.store.scheme(), target.bucket, key),
            bucket: target.bucket.clone(),
            key,
            git_commit,
            contracts_version: CONTRACTS_VERSION.to_string(),
            contract_count: snapshot.len(),
            manifest_bytes,
            digest,
        })
    }
}

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Snapshots `registry`, resolves the revision, and renders the manifest
/// without uploading it.
///
/// # Errors
///
/// Returns [`PublishError`] when the revision lookup or rendering fails.
pub fn prepare_manifest(
    revision: &dyn RevisionSource,
    registry: &ContractRegistry,
) -> Result<PreparedManifest, PublishError> {
    let snapshot = registry.clone();
    let git_commit = revision.current_revision()?;
    render(&snapshot, git_commit)
}

/// Builds and renders the manifest for a snapshot.
fn render(
    snapshot: &ContractRegistry,
    git_commit: String,
) -> Result<PreparedManifest, PublishError> {
    let manifest = ContractsManifest::new(snapshot, git_commit);
    let rendered = manifest.render().map_err(|err| PublishError::Manifest(err.to_string()))?;
    Ok(PreparedManifest {
        manifest,
        rendered,
    })
}
