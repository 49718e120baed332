// crates/event-contracts-core/src/validation.rs
// ============================================================================
// Module: Payload Validation
// Description: JSON Schema validation of event payloads against contracts.
// Purpose: Delegate payload checks to the jsonschema crate.
// Dependencies: jsonschema, serde_json
// ============================================================================

//! ## Overview
//! The descriptor never interprets its payload schema. Services that want to
//! check payloads compile a [`PayloadValidator`] from a descriptor; schemas are
//! compiled as JSON Schema Draft 2020-12. A contract without a schema accepts
//! every payload.

// ============================================================================
// SECTION: Imports
// ============================================================================

use jsonschema::Draft;
use jsonschema::Validator;
use serde_json::Value;

use crate::ContractError;
use crate::core::descriptor::ContractDescriptor;
use crate::core::identifiers::ContractId;
use crate::core::registry::ContractRegistry;

// ============================================================================
// SECTION: Validator
// ============================================================================

/// Compiled payload validator for one contract.
pub struct PayloadValidator {
    /// Contract the validator belongs to.
    contract: ContractId,
    /// Compiled schema; `None` when the contract has no schema.
    validator: Option<Validator>,
}

impl PayloadValidator {
    /// Compiles the payload schema of `descriptor`.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::Schema`] when the schema does not compile.
    pub fn compile(descriptor: &ContractDescriptor) -> Result<Self, ContractError> {
        let validator = descriptor
            .payload_schema()
            .as_present()
            .map(|schema| {
                jsonschema::options().with_draft(Draft::Draft202012).build(schema).map_err(|err| {
                    ContractError::Schema {
                        contract: descriptor.id().clone(),
                        error: err.to_string(),
                    }
                })
            })
            .transpose()?;
        Ok(Self {
            contract: descriptor.id().clone(),
            validator,
        })
    }

    /// Returns the contract identifier.
    #[must_use]
    pub const fn contract(&self) -> &ContractId {
        &self.contract
    }

    /// Returns true when `payload` satisfies the schema.
    #[must_use]
    pub fn is_valid(&self, payload: &Value) -> bool {
        self.validator.as_ref().is_none_or(|validator| validator.is_valid(payload))
    }

    /// Validates `payload`, reporting every schema violation.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::InvalidPayload`] when the payload is rejected.
    pub fn validate(&self, payload: &Value) -> Result<(), ContractError> {
        let Some(validator) = &self.validator else {
            return Ok(());
        };
        let messages: Vec<String> =
            validator.iter_errors(payload).map(|err| err.to_string()).collect();
        if messages.is_empty() {
            return Ok(());
        }
        Err(ContractError::InvalidPayload {
            contract: self.contract.clone(),
            error: messages.join("; "),
        })
    }
}

/// Compiles the payload schema of every registered contract.
///
/// # Errors
///
/// Returns the first [`ContractError::Schema`] encountered.
pub fn compile_registry(
    registry: &ContractRegistry,
) -> Result<Vec<PayloadValidator>, ContractError> {
    registry.iter().map(PayloadValidator::compile).collect()
}
