// crates/event-contracts-publish/src/revision.rs
// ============================================================================
// Module: Revision Sources
// Description: Source-control revision lookup for published manifests.
// Purpose: Stamp manifests with the commit they were compiled from.
// Dependencies: event-contracts-config, thiserror
// ============================================================================

//! ## Overview
//! [`RevisionSource`] answers "which commit is being deployed". The git source
//! shells out to `git rev-parse HEAD`; the static source returns a value fixed
//! by configuration, typically injected by CI. Both reject anything other
//! than a full hex revision hash so abbreviated or symbolic refs never reach
//! a manifest.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::sync::Arc;

use event_contracts_config::RevisionConfig;
use event_contracts_config::is_full_revision_hash;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Revision lookup errors.
#[derive(Debug, thiserror::Error)]
pub enum RevisionError {
    /// The revision could not be queried.
    #[error("revision unavailable: {0}")]
    Unavailable(String),
    /// The revision was returned but is not a full hash.
    #[error("revision invalid: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Supplies the current source-control revision.
pub trait RevisionSource: Send + Sync {
    /// Returns the full revision hash being deployed.
    ///
    /// # Errors
    ///
    /// Returns [`RevisionError`] when the lookup fails or yields a malformed
    /// revision.
    fn current_revision(&self) -> Result<String, RevisionError>;
}

/// Builds the configured revision source.
///
/// A relative git repository directory is resolved against `base_dir`.
#[must_use]
pub fn source_from_config(
    config: &RevisionConfig,
    base_dir: Option<&Path>,
) -> Arc<dyn RevisionSource> {
    match config {
        RevisionConfig::Git {
            repo_dir,
        } => Arc::new(GitRevisionSource::new(git_repo_dir(repo_dir.as_deref(), base_dir))),
        RevisionConfig::Static {
            value,
        } => Arc::new(StaticRevisionSource::new(value.clone())),
    }
}

/// Working directory for git; empty paths mean the process working directory.
fn git_repo_dir(repo_dir: Option<&Path>, base_dir: Option<&Path>) -> Option<PathBuf> {
    let non_empty = |dir: &&Path| !dir.as_os_str().is_empty();
    let repo_dir = repo_dir.filter(non_empty);
    let base_dir = base_dir.filter(non_empty);
    match (repo_dir, base_dir) {
        (Some(dir), Some(base)) if dir.is_relative() => Some(base.join(dir)),
        (Some(dir), _) => Some(dir.to_path_buf()),
        (None, base) => base.map(Path::to_path_buf),
    }
}

// ============================================================================
// SECTION: Git
// ============================================================================

/// Revision source backed by the local git checkout.
#[derive(Debug, Clone, Default)]
pub struct GitRevisionSource {
    /// Working directory for the git invocation.
    repo_dir: Option<PathBuf>,
}

impl GitRevisionSource {
    /// Creates a git revision source rooted at `repo_dir` (or the process
    /// working directory when `None`).
    #[must_use]
    pub const fn new(repo_dir: Option<PathBuf>) -> Self {
        Self {
            repo_dir,
        }
    }
}

impl RevisionSource for GitRevisionSource {
    fn current_revision(&self) -> Result<String, RevisionError> {
        let mut command = Command::new("git");
        command.args(["rev-parse", "HEAD"]);
        if let Some(dir) = &self.repo_dir {
            command.current_dir(dir);
        }
        let output = command
            .output()
            .map_err(|err| RevisionError::Unavailable(format!("failed to run git: {err}")))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RevisionError::Unavailable(format!(
                "git rev-parse HEAD failed: {}",
                stderr.trim()
            )));
        }
        let stdout = String::from_utf8(output.stdout)
            .map_err(|_| RevisionError::Invalid("git output is not utf-8".to_string()))?;
        checked_revision(stdout.trim())
    }
}

// ============================================================================
// SECTION: Static
// ============================================================================

/// Revision source returning a fixed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticRevisionSource {
    /// Configured revision.
    value: String,
}

impl StaticRevisionSource {
    /// Creates a static revision source.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

impl RevisionSource for StaticRevisionSource {
    fn current_revision(&self) -> Result<String, RevisionError> {
        checked_revision(self.value.trim())
    }
}

/// Accepts only full hex revision hashes.
fn checked_revision(value: &str) -> Result<String, RevisionError> {
    if is_full_revision_hash(value) {
        Ok(value.to_string())
    } else {
        Err(RevisionError::Invalid(format!("expected a full revision hash, got {value:?}")))
    }
}
