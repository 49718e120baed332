// crates/event-contracts-core/src/core/mod.rs
// ============================================================================
// Module: Event Contracts Core Types
// Description: Canonical contract descriptor and manifest structures.
// Purpose: Provide stable, serializable types for contracts and manifests.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Core types define contract descriptors, the derived event patterns, the
//! registry of locally declared contracts, and the manifest uploaded at
//! deployment time. These types are the canonical source of truth for the
//! published manifest shape.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod descriptor;
pub mod entry;
pub mod hashing;
pub mod identifiers;
pub mod manifest;
pub mod pattern;
pub mod registry;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use descriptor::ContractDescriptor;
pub use descriptor::ContractType;
pub use descriptor::PayloadSchema;
pub use entry::PutEventsEntry;
pub use hashing::DEFAULT_HASH_ALGORITHM;
pub use hashing::HashAlgorithm;
pub use hashing::HashDigest;
pub use hashing::HashError;
pub use identifiers::ContractId;
pub use manifest::CONTRACTS_VERSION;
pub use manifest::ContractsManifest;
pub use manifest::MANIFEST_CONTENT_TYPE;
pub use manifest::MANIFEST_FILE_NAME;
pub use manifest::RenderedManifest;
pub use pattern::EventPattern;
pub use pattern::NativeEventPattern;
pub use registry::ContractRegistry;
