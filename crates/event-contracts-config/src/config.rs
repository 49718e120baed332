// crates/event-contracts-config/src/config.rs
// ============================================================================
// Module: Event Contracts Configuration
// Description: Configuration loading and validation for the manifest publisher.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: serde, thiserror, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! Missing or invalid configuration fails closed. Publish targets (bucket and
//! artifact directory) may be left out of the file and supplied when the
//! deployment resolves them; [`PublishConfig::resolve_target`] enforces that
//! both are known before anything is uploaded.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::object_key::normalize_key_fragment;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "event-contracts.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "EVENT_CONTRACTS_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Minimum S3 bucket name length.
const MIN_BUCKET_NAME_LENGTH: usize = 3;
/// Maximum S3 bucket name length.
const MAX_BUCKET_NAME_LENGTH: usize = 63;

// ============================================================================
// SECTION: Root Config
// ============================================================================

/// Event Contracts configuration root.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EventContractsConfig {
    /// Contract declaration source.
    pub contracts: ContractsConfig,
    /// Manifest publishing configuration.
    #[serde(default)]
    pub publish: PublishConfig,
    /// Source-control revision lookup.
    #[serde(default)]
    pub revision: RevisionConfig,
    /// Audit logging configuration.
    #[serde(default)]
    pub audit: AuditConfig,
    /// Directory containing the loaded config file (not serialized).
    #[serde(skip)]
    pub config_dir: Option<PathBuf>,
}

impl EventContractsConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let mut config = Self::from_toml_str(content)?;
        config.config_dir = config_dir_of(&resolved);
        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.contracts.validate()?;
        self.publish.validate()?;
        self.revision.validate()?;
        self.audit.validate()
    }

    /// Returns the declarations path, resolved against the config directory.
    #[must_use]
    pub fn declarations_path(&self) -> PathBuf {
        match &self.config_dir {
            Some(dir) if self.contracts.declarations.is_relative() => {
                dir.join(&self.contracts.declarations)
            }
            _ => self.contracts.declarations.clone(),
        }
    }
}

// ============================================================================
// SECTION: Contracts
// ============================================================================

/// Contract declaration source configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContractsConfig {
    /// Path to the JSON or RON declaration file.
    pub declarations: PathBuf,
}

impl ContractsConfig {
    /// Validates the declaration path.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.declarations.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("contracts.declarations must be set".to_string()));
        }
        validate_path(&self.declarations)
    }
}

// ============================================================================
// SECTION: Publish
// ============================================================================

/// Manifest publishing configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PublishConfig {
    /// Deployment bucket (may be supplied at publish time instead).
    #[serde(default)]
    pub bucket: Option<String>,
    /// Deployment artifact directory name (may be supplied at publish time).
    #[serde(default)]
    pub artifact_directory_name: Option<String>,
    /// Object-store client settings.
    #[serde(default)]
    pub object_store: ObjectStoreConfig,
}

impl PublishConfig {
    /// Validates publish configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(bucket) = &self.bucket {
            validate_bucket_name(bucket)?;
        }
        if let Some(directory) = &self.artifact_directory_name {
            validate_relative_key(directory, "publish.artifact_directory_name")?;
        }
        self.object_store.validate()
    }

    /// Resolves the bucket and artifact directory, preferring overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when either value is missing or invalid.
    pub fn resolve_target(
        &self,
        bucket_override: Option<&str>,
        directory_override: Option<&str>,
    ) -> Result<PublishTarget, ConfigError> {
        let bucket = bucket_override.or(self.bucket.as_deref()).ok_or_else(|| {
            ConfigError::Invalid("publish.bucket must be set or supplied".to_string())
        })?;
        let directory =
            directory_override.or(self.artifact_directory_name.as_deref()).ok_or_else(|| {
                ConfigError::Invalid(
                    "publish.artifact_directory_name must be set or supplied".to_string(),
                )
            })?;
        validate_bucket_name(bucket)?;
        let directory = normalize_key_fragment(directory).map_err(|err| {
            ConfigError::Invalid(format!("publish.artifact_directory_name {err}"))
        })?;
        Ok(PublishTarget {
            bucket: bucket.to_string(),
            artifact_directory_name: directory.to_string(),
        })
    }
}

/// Resolved publish destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishTarget {
    /// Deployment bucket.
    pub bucket: String,
    /// Deployment artifact directory name, without trailing slash.
    pub artifact_directory_name: String,
}

/// Supported object-store providers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectStoreProvider {
    /// Amazon S3 compatible object storage.
    #[default]
    S3,
}

/// Object-store client configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObjectStoreConfig {
    /// Provider selection for the object store.
    #[serde(default)]
    pub provider: ObjectStoreProvider,
    /// Optional region (defaults to environment).
    #[serde(default)]
    pub region: Option<String>,
    /// Optional object-store endpoint (S3-compatible).
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Optional key prefix inside the bucket.
    #[serde(default)]
    pub prefix: Option<String>,
    /// Force path-style addressing (S3-compatible).
    #[serde(default)]
    pub force_path_style: bool,
    /// Allow non-TLS endpoints (explicit opt-in).
    #[serde(default)]
    pub allow_http: bool,
}

impl ObjectStoreConfig {
    /// Validates object-store configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when object-store settings are invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(region) = &self.region
            && region.trim().is_empty()
        {
            return Err(ConfigError::Invalid(
                "publish.object_store.region must be non-empty".to_string(),
            ));
        }
        if let Some(endpoint) = &self.endpoint {
            let trimmed = endpoint.trim();
            if !(trimmed.starts_with("https://") || trimmed.starts_with("http://")) {
                return Err(ConfigError::Invalid(
                    "publish.object_store.endpoint must include http:// or https://".to_string(),
                ));
            }
            if trimmed.starts_with("http://") && !self.allow_http {
                return Err(ConfigError::Invalid(
                    "publish.object_store.endpoint uses http:// without allow_http".to_string(),
                ));
            }
        }
        if let Some(prefix) = &self.prefix {
            validate_relative_key(prefix, "publish.object_store.prefix")?;
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Revision
// ============================================================================

/// Source-control revision lookup configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum RevisionConfig {
    /// Query the local git repository.
    Git {
        /// Repository directory (defaults to the working directory).
        #[serde(default)]
        repo_dir: Option<PathBuf>,
    },
    /// Use a fixed revision, typically injected by CI.
    Static {
        /// Full revision hash.
        value: String,
    },
}

impl Default for RevisionConfig {
    fn default() -> Self {
        Self::Git {
            repo_dir: None,
        }
    }
}

impl RevisionConfig {
    /// Validates revision configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::Git {
                repo_dir,
            } => repo_dir.as_deref().map_or(Ok(()), validate_path),
            Self::Static {
                value,
            } => {
                if is_full_revision_hash(value) {
                    Ok(())
                } else {
                    Err(ConfigError::Invalid(
                        "revision.value must be a full 40 or 64 character hex hash".to_string(),
                    ))
                }
            }
        }
    }
}

/// Returns true when `value` is a full SHA-1 or SHA-256 revision hash.
#[must_use]
pub fn is_full_revision_hash(value: &str) -> bool {
    matches!(value.len(), 40 | 64) && value.bytes().all(|byte| byte.is_ascii_hexdigit())
}

// ============================================================================
// SECTION: Audit
// ============================================================================

/// Audit logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditConfig {
    /// Whether publish audit events are emitted.
    #[serde(default = "default_audit_enabled")]
    pub enabled: bool,
    /// Optional JSON-lines file; stderr when unset.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: default_audit_enabled(),
            path: None,
        }
    }
}

impl AuditConfig {
    /// Validates audit configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        self.path.as_deref().map_or(Ok(()), validate_path)
    }
}

/// Default for [`AuditConfig::enabled`].
const fn default_audit_enabled() -> bool {
    true
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates a filesystem path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates an S3 bucket name (length and character set).
fn validate_bucket_name(value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Invalid("publish.bucket must be set".to_string()));
    }
    if !(MIN_BUCKET_NAME_LENGTH ..= MAX_BUCKET_NAME_LENGTH).contains(&value.len()) {
        return Err(ConfigError::Invalid("publish.bucket must be 3-63 characters".to_string()));
    }
    let valid_chars = value.bytes().all(|byte| {
        byte.is_ascii_lowercase() || byte.is_ascii_digit() || byte == b'.' || byte == b'-'
    });
    if !valid_chars {
        return Err(ConfigError::Invalid(
            "publish.bucket may only contain lowercase letters, digits, dots and hyphens"
                .to_string(),
        ));
    }
    Ok(())
}

/// Validates a relative object-key fragment (prefix or directory name).
fn validate_relative_key(value: &str, field: &str) -> Result<(), ConfigError> {
    normalize_key_fragment(value)
        .map(|_| ())
        .map_err(|err| ConfigError::Invalid(format!("{field} {err}")))
}

/// Directory holding the config file; `None` for a bare relative filename.
fn config_dir_of(path: &Path) -> Option<PathBuf> {
    path.parent().filter(|dir| !dir.as_os_str().is_empty()).map(Path::to_path_buf)
}

#[cfg(test)]
mod tests;
