// crates/event-contracts-publish/src/lib.rs
// ============================================================================
// Module: Event Contracts Publish Library
// Description: Deployment-time manifest publication to object storage.
// Purpose: Upload the compiled contracts manifest with revision and digest.
// Dependencies: event-contracts-core, event-contracts-config, aws-sdk-s3
// ============================================================================

//! ## Overview
//! This crate turns a [`event_contracts_core::ContractRegistry`] into an
//! uploaded `serverless-contracts.json` object. Revision lookup, object
//! storage, and audit output are injected traits so the publisher can be
//! exercised with in-memory fakes.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod object_store;
pub mod publisher;
pub mod revision;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::FileAuditSink;
pub use audit::NoopAuditSink;
pub use audit::PublishAuditEvent;
pub use audit::PublishAuditSink;
pub use audit::PublishOutcome;
pub use audit::StderrAuditSink;
pub use object_store::ObjectStoreClient;
pub use object_store::ObjectStoreError;
pub use object_store::PutObjectRequest;
pub use object_store::S3ObjectStoreClient;
pub use publisher::DIGEST_METADATA_KEY;
pub use publisher::ManifestPublisher;
pub use publisher::PreparedManifest;
pub use publisher::PublishError;
pub use publisher::PublishReceipt;
pub use publisher::prepare_manifest;
pub use revision::GitRevisionSource;
pub use revision::RevisionError;
pub use revision::RevisionSource;
pub use revision::StaticRevisionSource;
pub use revision::source_from_config;
