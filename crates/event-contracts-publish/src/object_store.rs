// crates/event-contracts-publish/src/object_store.rs
// ============================================================================
// Module: Manifest Object Storage
// Description: Object-store client abstraction and S3 backend for manifests.
// Purpose: Upload compiled contract manifests with strict key validation.
// Dependencies: event-contracts-config, aws-sdk-s3, tokio
// ============================================================================

//! ## Overview
//! [`ObjectStoreClient`] is the narrow upload seam used by the publisher. The
//! S3 implementation owns a private tokio runtime and blocks on each request
//! so callers stay synchronous. Manifest keys go through the same fragment
//! validation as configuration before any request is issued.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;

use aws_config::BehaviorVersion;
use aws_config::Region;
use aws_sdk_s3::Client;
use aws_sdk_s3::primitives::ByteStream;
use event_contracts_config::MAX_OBJECT_KEY_LENGTH;
use event_contracts_config::ObjectStoreConfig;
use event_contracts_config::ObjectStoreProvider;
use event_contracts_config::normalize_key_fragment;
use event_contracts_core::MANIFEST_FILE_NAME;
use tokio::runtime::Runtime;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Object-store errors for manifest uploads.
#[derive(Debug, thiserror::Error)]
pub enum ObjectStoreError {
    /// Invalid configuration or key input.
    #[error("object store invalid: {0}")]
    Invalid(String),
    /// Local I/O or runtime failure.
    #[error("object store io error: {0}")]
    Io(String),
    /// Backend returned an error.
    #[error("object store backend error: {0}")]
    Backend(String),
}

// ============================================================================
// SECTION: Requests
// ============================================================================

/// A single object upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutObjectRequest {
    /// Destination bucket.
    pub bucket: String,
    /// Full object key, including any root prefix.
    pub key: String,
    /// Object body.
    pub body: Vec<u8>,
    /// MIME content type.
    pub content_type: String,
    /// User metadata attached to the object.
    pub metadata: BTreeMap<String, String>,
}

// ============================================================================
// SECTION: Object Store Client
// ============================================================================

/// Minimal object-store client abstraction.
pub trait ObjectStoreClient: Send + Sync {
    /// Writes a single object to storage.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectStoreError`] when the upload fails.
    fn put_object(&self, request: PutObjectRequest) -> Result<(), ObjectStoreError>;

    /// Returns the URI scheme used when reporting object locations.
    fn scheme(&self) -> &'static str {
        "s3"
    }
}

/// Builds the configured object-store client.
///
/// # Errors
///
/// Returns [`ObjectStoreError`] when configuration or initialization fails.
pub fn client_from_config(
    config: &ObjectStoreConfig,
) -> Result<Arc<dyn ObjectStoreClient>, ObjectStoreError> {
    match config.provider {
        ObjectStoreProvider::S3 => Ok(Arc::new(S3ObjectStoreClient::new(config)?)),
    }
}

/// S3-backed object-store client.
///
/// Owns a current-thread runtime and blocks on each request. Callers must not
/// already be running inside a tokio runtime.
pub struct S3ObjectStoreClient {
    /// Underlying S3 client.
    client: Client,
    /// Runtime driving the SDK futures.
    runtime: Runtime,
}

impl S3ObjectStoreClient {
    /// Builds a new S3-backed object store client.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectStoreError`] when configuration or initialization fails.
    pub fn new(config: &ObjectStoreConfig) -> Result<Self, ObjectStoreError> {
        config.validate().map_err(|err| ObjectStoreError::Invalid(err.to_string()))?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|err| ObjectStoreError::Io(err.to_string()))?;
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint.trim());
        }
        let shared_config = runtime.block_on(loader.load());
        let s3_config = aws_sdk_s3::config::Builder::from(&shared_config)
            .force_path_style(config.force_path_style)
            .build();
        Ok(Self {
            client: Client::from_conf(s3_config),
            runtime,
        })
    }
}

impl ObjectStoreClient for S3ObjectStoreClient {
    fn put_object(&self, request: PutObjectRequest) -> Result<(), ObjectStoreError> {
        let PutObjectRequest {
            bucket,
            key,
            body,
            content_type,
            metadata,
        } = request;
        let upload = self
            .client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(body))
            .content_type(content_type)
            .set_metadata(Some(metadata.into_iter().collect()));
        self.runtime
            .block_on(upload.send())
            .map(|_| ())
            .map_err(|err| ObjectStoreError::Backend(err.to_string()))
    }
}

// ============================================================================
// SECTION: Key Helpers
// ============================================================================

/// Normalizes a root prefix for object storage.
///
/// Returns an empty string for an empty prefix, otherwise the prefix with a
/// single trailing `/`.
///
/// # Errors
///
/// Returns [`ObjectStoreError::Invalid`] when the prefix is not a valid key
/// fragment.
pub fn normalize_prefix(raw: &str) -> Result<String, ObjectStoreError> {
    if raw.is_empty() {
        return Ok(String::new());
    }
    let prefix = normalize_key_fragment(raw)
        .map_err(|err| ObjectStoreError::Invalid(format!("prefix {err}")))?;
    Ok(format!("{prefix}/"))
}

/// Builds `<root_prefix><artifact_directory>/serverless-contracts.json`.
///
/// # Errors
///
/// Returns [`ObjectStoreError::Invalid`] when the directory is not a valid
/// key fragment or the resulting key exceeds the S3 key length limit.
pub fn manifest_object_key(
    root_prefix: &str,
    artifact_directory_name: &str,
) -> Result<String, ObjectStoreError> {
    let directory = normalize_key_fragment(artifact_directory_name)
        .map_err(|err| ObjectStoreError::Invalid(format!("artifact directory {err}")))?;
    let key = format!("{root_prefix}{directory}/{MANIFEST_FILE_NAME}");
    if key.len() > MAX_OBJECT_KEY_LENGTH {
        return Err(ObjectStoreError::Invalid("object key exceeds length limit".to_string()));
    }
    Ok(key)
}

#[cfg(test)]
mod tests;
