// crates/event-contracts-config/src/lib.rs
// ============================================================================
// Module: Event Contracts Config Library
// Description: Canonical config model and validation.
// Purpose: Single source of truth for event-contracts.toml semantics.
// Dependencies: serde, thiserror, toml
// ============================================================================

//! ## Overview
//! `event-contracts-config` defines the configuration consumed by the
//! manifest publisher and CLI. Loading is size-limited and validation fails
//! closed.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod examples;
pub mod object_key;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use examples::config_toml_example;
pub use object_key::MAX_OBJECT_KEY_LENGTH;
pub use object_key::ObjectKeyError;
pub use object_key::normalize_key_fragment;
