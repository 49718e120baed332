// crates/event-contracts-core/src/declarations.rs
// ============================================================================
// Module: Contract Declarations
// Description: Parsing of contract declaration files into a registry.
// Purpose: Load a service's declared contracts from JSON or RON input.
// Dependencies: ron, serde, serde_json
// ============================================================================

//! ## Overview
//! Contracts can be declared in a file next to the service instead of in
//! code. JSON is the canonical format; RON is accepted for human-friendly
//! authoring. Every declaration must state `payloadSchema` explicitly: `null`
//! (JSON) or `None` (RON) marks an intentionally absent schema, and a missing
//! key is a parse error.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde::Deserializer;
use serde_json::Value;

use crate::ContractError;
use crate::core::descriptor::ContractDescriptor;
use crate::core::descriptor::PayloadSchema;
use crate::core::registry::ContractRegistry;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum size of a declaration file in bytes.
pub const MAX_DECLARATIONS_BYTES: usize = 1024 * 1024;

// ============================================================================
// SECTION: Formats
// ============================================================================

/// Supported declaration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationFormat {
    /// Canonical JSON format.
    Json,
    /// Human-friendly RON format.
    Ron,
}

impl DeclarationFormat {
    /// Returns the lowercase label for the format.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Ron => "ron",
        }
    }

    /// Parses a format from a file extension.
    #[must_use]
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "ron" => Some(Self::Ron),
            _ => None,
        }
    }
}

impl fmt::Display for DeclarationFormat {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.label())
    }
}

// ============================================================================
// SECTION: Declaration Shapes
// ============================================================================

/// Top-level declaration file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DeclarationFile {
    /// Declared contracts.
    contracts: Vec<ContractDeclaration>,
}

/// Single declared contract.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ContractDeclaration {
    /// Contract identifier.
    id: String,
    /// Allowed event sources.
    sources: Vec<String>,
    /// Event-type discriminator.
    event_type: String,
    /// Payload schema; must be present in the input.
    #[serde(deserialize_with = "explicit_payload_schema")]
    payload_schema: PayloadSchema,
}

impl From<ContractDeclaration> for ContractDescriptor {
    fn from(declaration: ContractDeclaration) -> Self {
        Self::new(
            declaration.id,
            declaration.sources,
            declaration.event_type,
            declaration.payload_schema,
        )
    }
}

/// Deserializes a payload schema whose key must appear in the input.
fn explicit_payload_schema<'de, D>(deserializer: D) -> Result<PayloadSchema, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Value>::deserialize(deserializer).map(PayloadSchema::from)
}

// ============================================================================
// SECTION: Public API
// ============================================================================

/// Detects the declaration format from a file path.
#[must_use]
pub fn detect_format(path: &Path) -> Option<DeclarationFormat> {
    path.extension()
        .and_then(|extension| extension.to_str())
        .and_then(DeclarationFormat::from_extension)
}

/// Parses declaration input into a registry.
///
/// # Errors
///
/// Returns [`ContractError`] when parsing fails or identifiers collide.
pub fn parse_declarations(
    input: &str,
    format: DeclarationFormat,
) -> Result<ContractRegistry, ContractError> {
    let file: DeclarationFile = match format {
        DeclarationFormat::Json => serde_json::from_str(input).map_err(|err| ContractError::Parse {
            format,
            error: err.to_string(),
        })?,
        DeclarationFormat::Ron => ron::from_str(input).map_err(|err| ContractError::Parse {
            format,
            error: err.to_string(),
        })?,
    };
    ContractRegistry::from_descriptors(file.contracts.into_iter().map(ContractDescriptor::from))
}

/// Loads a declaration file, detecting its format from the extension.
///
/// # Errors
///
/// Returns [`ContractError`] when the file is unreadable, too large, not
/// UTF-8, of unknown format, or fails to parse.
pub fn load_declarations(path: &Path) -> Result<ContractRegistry, ContractError> {
    let format = detect_format(path).ok_or_else(|| {
        ContractError::Invalid(format!(
            "unsupported declaration format: {} (expected .json or .ron)",
            path.display()
        ))
    })?;
    let bytes = fs::read(path).map_err(|err| ContractError::Io(err.to_string()))?;
    if bytes.len() > MAX_DECLARATIONS_BYTES {
        return Err(ContractError::Invalid(format!(
            "declaration file exceeds size limit ({} > {MAX_DECLARATIONS_BYTES})",
            bytes.len()
        )));
    }
    let input = std::str::from_utf8(&bytes)
        .map_err(|_| ContractError::Invalid("declaration file must be utf-8".to_string()))?;
    parse_declarations(input, format)
}
