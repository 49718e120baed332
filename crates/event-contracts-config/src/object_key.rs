// crates/event-contracts-config/src/object_key.rs
// ============================================================================
// Module: Object Key Fragments
// Description: Validation for bucket-relative object key fragments.
// Purpose: One rule set for artifact directories and key prefixes.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Artifact directory names and key prefixes end up inside S3 object keys.
//! [`normalize_key_fragment`] is the single gate both configuration and the
//! publisher pass them through: fragments are `/`-separated, relative, free
//! of `.`/`..` and empty segments, carry no surrounding whitespace, and stay
//! within S3 key length limits. Trailing slashes are stripped.

use thiserror::Error;

/// Maximum length of a single key segment.
pub const MAX_KEY_SEGMENT_LENGTH: usize = 255;
/// Maximum total object key length accepted by S3.
pub const MAX_OBJECT_KEY_LENGTH: usize = 1024;

/// Reasons a key fragment is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ObjectKeyError {
    /// Nothing left after trailing slashes are removed.
    #[error("must be non-empty")]
    Empty,
    /// Leading or trailing whitespace.
    #[error("must not have surrounding whitespace")]
    Whitespace,
    /// Windows-style separator.
    #[error("must not contain backslashes")]
    Backslash,
    /// Leading `/`.
    #[error("must be relative")]
    Absolute,
    /// `.`, `..`, or an empty segment.
    #[error("must be relative without traversal or empty segments")]
    Traversal,
    /// A segment longer than [`MAX_KEY_SEGMENT_LENGTH`].
    #[error("has a segment longer than {MAX_KEY_SEGMENT_LENGTH} bytes")]
    SegmentTooLong,
    /// Longer than [`MAX_OBJECT_KEY_LENGTH`].
    #[error("exceeds {MAX_OBJECT_KEY_LENGTH} bytes")]
    TooLong,
}

/// Validates a key fragment and returns it without trailing slashes.
///
/// # Errors
///
/// Returns [`ObjectKeyError`] describing the first rule the fragment breaks.
pub fn normalize_key_fragment(value: &str) -> Result<&str, ObjectKeyError> {
    if value.trim() != value {
        return Err(ObjectKeyError::Whitespace);
    }
    let normalized = value.trim_end_matches('/');
    if normalized.is_empty() {
        return Err(ObjectKeyError::Empty);
    }
    if normalized.contains('\\') {
        return Err(ObjectKeyError::Backslash);
    }
    if normalized.starts_with('/') {
        return Err(ObjectKeyError::Absolute);
    }
    if normalized.len() > MAX_OBJECT_KEY_LENGTH {
        return Err(ObjectKeyError::TooLong);
    }
    for segment in normalized.split('/') {
        if segment.is_empty() || segment == "." || segment == ".." {
            return Err(ObjectKeyError::Traversal);
        }
        if segment.len() > MAX_KEY_SEGMENT_LENGTH {
            return Err(ObjectKeyError::SegmentTooLong);
        }
    }
    Ok(normalized)
}
