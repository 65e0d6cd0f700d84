//! Validators bound to one contract.

use crate::core::contract::Contract;
use crate::core::error::{ValidationError, ValidationResult};
use crate::core::types::Action;
use crate::validation::action::validate_action;
use crate::validation::pipeline::validate_pipeline;

/// A contract paired with both validators.
///
/// Holds a shared borrow, so the contract is neither copied nor modified and
/// every call is equivalent to calling the free functions directly.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'c> {
    contract: &'c Contract,
}

impl<'c> Validator<'c> {
    /// Bind a contract.
    pub fn new(contract: &'c Contract) -> Self {
        Self { contract }
    }

    /// The bound contract.
    pub fn contract(&self) -> &'c Contract {
        self.contract
    }

    /// See [`validate_pipeline`].
    pub fn validate_pipeline(&self, actions: &[Action]) -> ValidationResult {
        validate_pipeline(actions, self.contract)
    }

    /// See [`validate_action`].
    pub fn validate_action(&self, action: &Action) -> ValidationResult {
        validate_action(action, self.contract)
    }

    /// Validate a pipeline, failing with its diagnostics.
    pub fn assert_valid_pipeline(&self, actions: &[Action]) -> Result<(), ValidationError> {
        self.validate_pipeline(actions).into_result()
    }

    /// Validate one action, failing with its diagnostics.
    pub fn assert_valid_action(&self, action: &Action) -> Result<(), ValidationError> {
        self.validate_action(action).into_result()
    }
}

/// Bind a contract to both validators for reuse.
pub fn create_validator(contract: &Contract) -> Validator<'_> {
    Validator::new(contract)
}
