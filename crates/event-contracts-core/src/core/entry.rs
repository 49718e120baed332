// crates/event-contracts-core/src/core/entry.rs
// ============================================================================
// Module: Put-Events Entries
// Description: EventBridge put-events entries built from contracts.
// Purpose: Emit events whose source and detail type honor a contract.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! A [`PutEventsEntry`] is the request entry an emitting service sends to the
//! event bus. Building one through a contract pins the detail type to the
//! contract's event type and refuses sources the contract does not declare.
//! Payload validation is left to [`crate::PayloadValidator`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;

use crate::ContractError;
use crate::core::descriptor::ContractDescriptor;

// ============================================================================
// SECTION: Entry
// ============================================================================

/// Put-events request entry in the event bus's field naming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PutEventsEntry {
    /// Event source.
    pub source: String,
    /// Event detail type.
    pub detail_type: String,
    /// JSON-encoded event payload.
    pub detail: String,
    /// Target bus; `None` targets the account's default bus.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_bus_name: Option<String>,
}

impl PutEventsEntry {
    /// Builds an entry for `contract`, emitted from `source`.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::UndeclaredSource`] when `source` is not one of
    /// the contract's sources, or [`ContractError::Serialization`] when the
    /// payload cannot be encoded.
    pub fn for_contract<S, P>(
        contract: &ContractDescriptor<S>,
        source: &str,
        payload: &P,
    ) -> Result<Self, ContractError>
    where
        P: Serialize + ?Sized,
    {
        if !contract.sources().iter().any(|declared| declared == source) {
            return Err(ContractError::UndeclaredSource {
                contract: contract.id().clone(),
                source_name: source.to_string(),
            });
        }
        let detail = serde_json::to_string(payload)
            .map_err(|err| ContractError::Serialization(err.to_string()))?;
        Ok(Self {
            source: source.to_string(),
            detail_type: contract.event_type().to_string(),
            detail,
            event_bus_name: None,
        })
    }

    /// Targets a named event bus.
    #[must_use]
    pub fn with_event_bus(mut self, event_bus_name: impl Into<String>) -> Self {
        self.event_bus_name = Some(event_bus_name.into());
        self
    }
}
