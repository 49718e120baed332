// crates/event-contracts-core/src/core/registry.rs
// ============================================================================
// Module: Contract Registry
// Description: Collection of the contracts a service declares locally.
// Purpose: Key descriptors by identifier and provide consistent snapshots.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! The registry holds every descriptor a service declares, keyed by contract
//! identifier and ordered deterministically. Descriptors with typed payload
//! schemas are converted to their JSON form on registration. Registering two
//! contracts with the same identifier fails instead of silently replacing one
//! of them in the published manifest.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use serde::Serialize;

use crate::ContractError;
use crate::core::descriptor::ContractDescriptor;
use crate::core::identifiers::ContractId;

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Locally declared contracts keyed by identifier.
///
/// # Invariants
/// - Identifiers are unique.
/// - Iteration order is the identifier's lexical order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContractRegistry {
    /// Registered descriptors.
    contracts: BTreeMap<ContractId, ContractDescriptor>,
}

impl ContractRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            contracts: BTreeMap::new(),
        }
    }

    /// Builds a registry from a sequence of descriptors.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError`] when identifiers collide or a schema cannot be
    /// converted to JSON.
    pub fn from_descriptors<S, I>(descriptors: I) -> Result<Self, ContractError>
    where
        S: Serialize,
        I: IntoIterator<Item = ContractDescriptor<S>>,
    {
        let mut registry = Self::new();
        for descriptor in descriptors {
            registry.register(&descriptor)?;
        }
        Ok(registry)
    }

    /// Registers a descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::DuplicateContract`] when the identifier is
    /// already registered.
    pub fn register<S: Serialize>(
        &mut self,
        descriptor: &ContractDescriptor<S>,
    ) -> Result<(), ContractError> {
        match self.contracts.entry(descriptor.id().clone()) {
            Entry::Occupied(entry) => Err(ContractError::DuplicateContract(entry.key().clone())),
            Entry::Vacant(entry) => {
                entry.insert(descriptor.to_json_schema()?);
                Ok(())
            }
        }
    }

    /// Returns the descriptor registered under `id`.
    #[must_use]
    pub fn get(&self, id: &ContractId) -> Option<&ContractDescriptor> {
        self.contracts.get(id)
    }

    /// Returns the number of registered contracts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    /// Returns true when no contracts are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }

    /// Iterates descriptors in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &ContractDescriptor> {
        self.contracts.values()
    }

    /// Returns identifiers of contracts that declare no sources.
    pub fn unmatchable(&self) -> impl Iterator<Item = &ContractId> {
        self.contracts
            .values()
            .filter(|descriptor| descriptor.matches_nothing())
            .map(ContractDescriptor::id)
    }

    /// Returns an owned, point-in-time copy of the registered contracts.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<ContractId, ContractDescriptor> {
        self.contracts.clone()
    }
}
