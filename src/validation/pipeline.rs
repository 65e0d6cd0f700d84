//! Pipeline validation.

use crate::core::contract::Contract;
use crate::core::error::{StablyResult, ValidationResult};
use crate::core::types::Action;
use crate::validation::index::ContractIndex;
use crate::validation::stages::{
    AllowedTypeValidation, OrderConstraintValidation, RequiredStepValidation,
    TransitionValidation, ValidationStage,
};
use log::{debug, trace};

/// Multi-stage pipeline validator.
///
/// Runs every stage over the whole action sequence and concatenates their
/// violations. No stage is skipped because an earlier one failed.
pub struct PipelineValidator {
    stages: Vec<Box<dyn ValidationStage>>,
}

impl PipelineValidator {
    /// Create a validator with the given stages, run in order.
    pub fn new(stages: Vec<Box<dyn ValidationStage>>) -> Self {
        Self { stages }
    }

    /// Create the standard validator: allowed types, required steps, order
    /// constraints, transitions.
    pub fn default_pipeline() -> Self {
        Self {
            stages: vec![
                Box::new(AllowedTypeValidation),
                Box::new(RequiredStepValidation),
                Box::new(OrderConstraintValidation),
                Box::new(TransitionValidation),
            ],
        }
    }

    /// Append a stage after the existing ones.
    pub fn add_stage(&mut self, stage: Box<dyn ValidationStage>) {
        self.stages.push(stage);
    }

    /// Names of the stages in run order.
    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    /// Validate an action sequence against a contract.
    pub fn validate(&self, actions: &[Action], contract: &Contract) -> ValidationResult {
        debug!(
            "Validating pipeline of {} action(s) against contract \"{}\" ({} step(s))",
            actions.len(),
            contract.id,
            contract.steps.len()
        );
        log_inert_rules(contract);

        let index = ContractIndex::new(contract);
        let mut violations = Vec::new();

        for stage in &self.stages {
            let found = stage.check(actions, &index);
            trace!("{}: {} violation(s) {:?}", stage.name(), found.len(), found);
            violations.extend(found);
        }

        let result = ValidationResult::from_violations(violations);
        debug!(
            "Pipeline validation for contract \"{}\" finished with {} error(s)",
            contract.id,
            result.errors.len()
        );
        result
    }
}

impl Default for PipelineValidator {
    fn default() -> Self {
        Self::default_pipeline()
    }
}

fn log_inert_rules(contract: &Contract) {
    let Some(structural) = contract.structural.as_ref() else {
        return;
    };
    if let Some(allow) = structural.allow_dynamic_insertion {
        debug!("allowDynamicInsertion={} is accepted but not enforced", allow);
    }
    if let Some(depth) = structural.max_depth {
        debug!("maxDepth={} is accepted but not enforced", depth);
    }
}

/// Validate an ordered action sequence against a contract.
///
/// Errors accumulate in a fixed order: disallowed types, missing required
/// steps, order constraints, transitions. Identical input always yields an
/// identical result, and neither argument is modified.
pub fn validate_pipeline(actions: &[Action], contract: &Contract) -> ValidationResult {
    PipelineValidator::default_pipeline().validate(actions, contract)
}

/// Decode the JSON documents and run [`validate_pipeline`].
///
/// Only decoding can fail; structural problems come back in the result.
pub fn validate_pipeline_json(actions: &str, contract: &str) -> StablyResult<ValidationResult> {
    let actions = Action::list_from_json(actions)?;
    let contract = Contract::from_json(contract)?;
    Ok(validate_pipeline(&actions, &contract))
}
