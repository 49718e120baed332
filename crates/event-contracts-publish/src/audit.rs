// crates/event-contracts-publish/src/audit.rs
// ============================================================================
// Module: Publish Audit Logging
// Description: Structured audit events for manifest publication.
// Purpose: Record every publish attempt as a JSON line.
// Dependencies: event-contracts-core, serde
// ============================================================================

//! ## Overview
//! Each publish attempt produces exactly one [`PublishAuditEvent`], either
//! `manifest_published` or `manifest_publish_failed`. Sinks serialize events
//! as JSON lines to stderr or an append-only file so deployments can route
//! them to their own logging pipeline.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use event_contracts_config::AuditConfig;
use event_contracts_core::CONTRACTS_VERSION;
use event_contracts_core::HashDigest;
use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Outcome of a publish attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PublishOutcome {
    /// Manifest uploaded.
    Published,
    /// Publish aborted before or during upload.
    Failed,
}

/// Publish audit event payload.
#[derive(Debug, Clone, Serialize)]
pub struct PublishAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Attempt outcome.
    pub outcome: PublishOutcome,
    /// Destination bucket.
    pub bucket: String,
    /// Object key, once derived.
    pub key: Option<String>,
    /// Revision stamped into the manifest, once known.
    pub git_commit: Option<String>,
    /// Manifest format version.
    pub contracts_version: &'static str,
    /// Number of contracts in the snapshot.
    pub contract_count: usize,
    /// Canonical manifest size in bytes.
    pub manifest_bytes: Option<usize>,
    /// Manifest content digest.
    pub digest: Option<HashDigest>,
    /// Error message for failed attempts.
    pub error: Option<String>,
}

/// Inputs required to construct a publish audit event.
pub struct PublishAuditEventParams {
    /// Attempt outcome.
    pub outcome: PublishOutcome,
    /// Destination bucket.
    pub bucket: String,
    /// Object key, once derived.
    pub key: Option<String>,
    /// Revision, once known.
    pub git_commit: Option<String>,
    /// Number of contracts in the snapshot.
    pub contract_count: usize,
    /// Canonical manifest size in bytes.
    pub manifest_bytes: Option<usize>,
    /// Manifest content digest.
    pub digest: Option<HashDigest>,
    /// Error message for failed attempts.
    pub error: Option<String>,
}

impl PublishAuditEvent {
    /// Creates a new audit event with a consistent timestamp.
    #[must_use]
    pub fn new(params: PublishAuditEventParams) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        let event = match params.outcome {
            PublishOutcome::Published => "manifest_published",
            PublishOutcome::Failed => "manifest_publish_failed",
        };
        Self {
            event,
            timestamp_ms,
            outcome: params.outcome,
            bucket: params.bucket,
            key: params.key,
            git_commit: params.git_commit,
            contracts_version: CONTRACTS_VERSION,
            contract_count: params.contract_count,
            manifest_bytes: params.manifest_bytes,
            digest: params.digest,
            error: params.error,
        }
    }
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Audit sink for publish events.
pub trait PublishAuditSink: Send + Sync {
    /// Record an audit event.
    fn record(&self, event: &PublishAuditEvent);
}

/// Builds the configured audit sink.
///
/// A relative audit path is resolved against `base_dir`.
///
/// # Errors
///
/// Returns an error if the audit file cannot be opened.
pub fn sink_from_config(
    config: &AuditConfig,
    base_dir: Option<&Path>,
) -> io::Result<Arc<dyn PublishAuditSink>> {
    if !config.enabled {
        return Ok(Arc::new(NoopAuditSink));
    }
    match (&config.path, base_dir) {
        (Some(path), Some(base)) if path.is_relative() => {
            Ok(Arc::new(FileAuditSink::new(&base.join(path))?))
        }
        (Some(path), _) => Ok(Arc::new(FileAuditSink::new(path)?)),
        (None, _) => Ok(Arc::new(StderrAuditSink)),
    }
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl PublishAuditSink for StderrAuditSink {
    fn record(&self, event: &PublishAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl PublishAuditSink for FileAuditSink {
    fn record(&self, event: &PublishAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// No-op audit sink.
pub struct NoopAuditSink;

impl PublishAuditSink for NoopAuditSink {
    fn record(&self, _event: &PublishAuditEvent) {}
}
