// crates/event-contracts-core/src/core/pattern.rs
// ============================================================================
// Module: Event Patterns
// Description: Native and infrastructure-as-code event pattern shapes.
// Purpose: Provide the two matching-rule representations derived from a contract.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! EventBridge matching rules are expressed in two naming conventions. The
//! native form, consumed directly by the event bus, uses the hyphenated
//! `detail-type` key. The infrastructure-as-code form uses camel-case keys and
//! treats both fields as optional; an omitted field places no constraint on
//! the event.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Native Pattern
// ============================================================================

/// Event pattern in the event bus's native field naming.
///
/// # Invariants
/// - When derived from a contract, `detail_type` holds exactly one element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NativeEventPattern {
    /// Allowed event sources.
    pub source: Vec<String>,
    /// Allowed detail types.
    #[serde(rename = "detail-type")]
    pub detail_type: Vec<String>,
}

impl NativeEventPattern {
    /// Derives the native pattern for a contract's sources and event type.
    #[must_use]
    pub fn derive(sources: &[String], event_type: &str) -> Self {
        Self {
            source: sources.to_vec(),
            detail_type: vec![event_type.to_string()],
        }
    }

    /// Returns true when an event with the given source and detail type matches.
    ///
    /// Both fields are exact-match lists, so an empty source list matches no event.
    #[must_use]
    pub fn matches(&self, source: &str, detail_type: &str) -> bool {
        self.source.iter().any(|candidate| candidate == source)
            && self.detail_type.iter().any(|candidate| candidate == detail_type)
    }
}

// ============================================================================
// SECTION: Infrastructure-as-Code Pattern
// ============================================================================

/// Event pattern in the infrastructure-as-code (camel-case) naming.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPattern {
    /// Allowed event sources (`None` places no constraint).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Vec<String>>,
    /// Allowed detail types (`None` places no constraint).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail_type: Option<Vec<String>>,
}

impl EventPattern {
    /// Derives the infrastructure-as-code pattern for a contract.
    #[must_use]
    pub fn derive(sources: &[String], event_type: &str) -> Self {
        Self {
            source: Some(sources.to_vec()),
            detail_type: Some(vec![event_type.to_string()]),
        }
    }

    /// Returns true when an event with the given source and detail type matches.
    #[must_use]
    pub fn matches(&self, source: &str, detail_type: &str) -> bool {
        let source_ok = self
            .source
            .as_ref()
            .is_none_or(|allowed| allowed.iter().any(|candidate| candidate == source));
        let detail_ok = self
            .detail_type
            .as_ref()
            .is_none_or(|allowed| allowed.iter().any(|candidate| candidate == detail_type));
        source_ok && detail_ok
    }
}
