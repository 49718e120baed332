// crates/event-contracts-core/src/core/descriptor.rs
// ============================================================================
// Module: Contract Descriptor
// Description: Immutable EventBridge contract descriptor.
// Purpose: Capture contract identity and derive its event patterns.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! A [`ContractDescriptor`] is declared once by the owning service. It stores
//! the identifier, the allowed event sources, the event-type discriminator and
//! an optional payload schema, and materializes the native and
//! infrastructure-as-code patterns at construction.
//!
//! Construction performs no validation. An empty source list is accepted even
//! though the resulting contract matches no real event;
//! [`ContractDescriptor::matches_nothing`] reports that case so tooling can
//! warn about it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde_json::Value;

use crate::ContractError;
use crate::core::identifiers::ContractId;
use crate::core::pattern::EventPattern;
use crate::core::pattern::NativeEventPattern;

// ============================================================================
// SECTION: Contract Type
// ============================================================================

/// Transport discriminator for a contract.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractType {
    /// Contract exchanged over an EventBridge bus.
    #[default]
    #[serde(rename = "eventBridge")]
    EventBridge,
}

impl ContractType {
    /// Returns the stable wire label for the contract type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EventBridge => "eventBridge",
        }
    }
}

// ============================================================================
// SECTION: Payload Schema
// ============================================================================

/// Payload schema reference, stated explicitly even when absent.
///
/// The schema is opaque to the descriptor. On the wire an absent schema is
/// `null` and a present schema is the schema value itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PayloadSchema<S = Value> {
    /// The contract intentionally carries no payload schema.
    Absent,
    /// Schema describing the event payload.
    Present(S),
}

impl<S> PayloadSchema<S> {
    /// Returns the schema when present.
    #[must_use]
    pub const fn as_present(&self) -> Option<&S> {
        match self {
            Self::Absent => None,
            Self::Present(schema) => Some(schema),
        }
    }

    /// Returns true when no schema is attached.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

impl<S> From<Option<S>> for PayloadSchema<S> {
    fn from(value: Option<S>) -> Self {
        value.map_or(Self::Absent, Self::Present)
    }
}

impl<S: Serialize> Serialize for PayloadSchema<S> {
    fn serialize<Z: Serializer>(&self, serializer: Z) -> Result<Z::Ok, Z::Error> {
        self.as_present().serialize(serializer)
    }
}

impl<'de, S: Deserialize<'de>> Deserialize<'de> for PayloadSchema<S> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<S>::deserialize(deserializer).map(Self::from)
    }
}

// ============================================================================
// SECTION: Contract Descriptor
// ============================================================================

/// Immutable EventBridge contract descriptor.
///
/// # Invariants
/// - `native_pattern.source` and `pattern.source` equal `sources`.
/// - `native_pattern.detail_type` and `pattern.detail_type` equal `[event_type]`.
/// - No field changes after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractDescriptor<S = Value> {
    /// Caller-supplied contract identifier.
    id: ContractId,
    /// Transport discriminator.
    contract_type: ContractType,
    /// Allowed event sources, in declaration order.
    sources: Vec<String>,
    /// Event-type discriminator.
    event_type: String,
    /// Payload schema reference.
    payload_schema: PayloadSchema<S>,
    /// Derived pattern in native naming.
    native_pattern: NativeEventPattern,
    /// Derived pattern in infrastructure-as-code naming.
    pattern: EventPattern,
}

impl<S> ContractDescriptor<S> {
    /// Creates a descriptor and derives both event patterns.
    pub fn new<I, T>(
        id: impl Into<ContractId>,
        sources: I,
        event_type: impl Into<String>,
        payload_schema: PayloadSchema<S>,
    ) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let sources: Vec<String> = sources.into_iter().map(Into::into).collect();
        let event_type = event_type.into();
        let native_pattern = NativeEventPattern::derive(&sources, &event_type);
        let pattern = EventPattern::derive(&sources, &event_type);
        Self {
            id: id.into(),
            contract_type: ContractType::EventBridge,
            sources,
            event_type,
            payload_schema,
            native_pattern,
            pattern,
        }
    }

    /// Returns the contract identifier.
    #[must_use]
    pub const fn id(&self) -> &ContractId {
        &self.id
    }

    /// Returns the transport discriminator.
    #[must_use]
    pub const fn contract_type(&self) -> ContractType {
        self.contract_type
    }

    /// Returns the allowed event sources.
    #[must_use]
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// Returns the event-type discriminator.
    #[must_use]
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// Returns the payload schema reference.
    #[must_use]
    pub const fn payload_schema(&self) -> &PayloadSchema<S> {
        &self.payload_schema
    }

    /// Returns the pattern in native naming.
    #[must_use]
    pub const fn native_pattern(&self) -> &NativeEventPattern {
        &self.native_pattern
    }

    /// Returns the pattern in infrastructure-as-code naming.
    #[must_use]
    pub const fn pattern(&self) -> &EventPattern {
        &self.pattern
    }

    /// Returns true when the contract declares no sources and can never match.
    #[must_use]
    pub fn matches_nothing(&self) -> bool {
        self.sources.is_empty()
    }
}

impl<S: Serialize> ContractDescriptor<S> {
    /// Converts a typed payload schema into its JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::Serialization`] when the schema cannot be
    /// represented as JSON.
    pub fn to_json_schema(&self) -> Result<ContractDescriptor<Value>, ContractError> {
        let payload_schema = match &self.payload_schema {
            PayloadSchema::Absent => PayloadSchema::Absent,
            PayloadSchema::Present(schema) => PayloadSchema::Present(
                serde_json::to_value(schema)
                    .map_err(|err| ContractError::Serialization(err.to_string()))?,
            ),
        };
        Ok(ContractDescriptor {
            id: self.id.clone(),
            contract_type: self.contract_type,
            sources: self.sources.clone(),
            event_type: self.event_type.clone(),
            payload_schema,
            native_pattern: self.native_pattern.clone(),
            pattern: self.pattern.clone(),
        })
    }
}

#[cfg(test)]
mod tests;
