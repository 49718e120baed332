// crates/event-contracts-core/src/lib.rs
// ============================================================================
// Module: Event Contracts Core Library
// Description: Public API surface for EventBridge contract descriptors.
// Purpose: Expose descriptors, derived patterns, manifests, and helpers.
// Dependencies: crate::{core, declarations, validation}, thiserror
// ============================================================================

//! ## Overview
//! Event Contracts core describes the typed contracts services exchange over
//! EventBridge. A [`ContractDescriptor`] captures identity, allowed sources,
//! the event-type discriminator, and an optional payload schema, and derives
//! the native and infrastructure-as-code event patterns from them. The
//! [`ContractsManifest`] collects every declared contract of a service into a
//! canonical, hashable document.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod declarations;
pub mod validation;

// ============================================================================
// SECTION: Errors
// ============================================================================

use thiserror::Error;

/// Errors raised by contract registries, declarations, and manifests.
///
/// # Invariants
/// - Variants carry human-readable context for diagnostics.
/// - Descriptor construction itself never produces an error.
#[derive(Debug, Error)]
pub enum ContractError {
    /// IO failure while reading declarations.
    #[error("io error: {0}")]
    Io(String),
    /// Serialization or canonicalization failure.
    #[error("serialization error: {0}")]
    Serialization(String),
    /// Declaration input failed to parse.
    #[error("failed to parse {format} declarations: {error}")]
    Parse {
        /// Format that failed to parse.
        format: DeclarationFormat,
        /// Underlying parse error message.
        error: String,
    },
    /// Declaration input rejected before parsing.
    #[error("invalid declarations: {0}")]
    Invalid(String),
    /// Two contracts share the same identifier.
    #[error("duplicate contract id: {0}")]
    DuplicateContract(ContractId),
    /// A payload schema could not be compiled.
    #[error("payload schema for {contract} failed to compile: {error}")]
    Schema {
        /// Contract owning the schema.
        contract: ContractId,
        /// Compilation error details.
        error: String,
    },
    /// An event payload does not satisfy the contract's schema.
    #[error("payload rejected by contract {contract}: {error}")]
    InvalidPayload {
        /// Contract whose schema rejected the payload.
        contract: ContractId,
        /// Validation error details.
        error: String,
    },
    /// An event source is not declared by the contract.
    #[error("source {source_name} is not declared by contract {contract}")]
    UndeclaredSource {
        /// Contract used to build the entry.
        contract: ContractId,
        /// Offending event source.
        source_name: String,
    },
}

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use declarations::DeclarationFormat;
pub use declarations::load_declarations;
pub use declarations::parse_declarations;
pub use validation::PayloadValidator;
pub use validation::compile_registry;
