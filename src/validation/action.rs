//! Single-action validation.
//!
//! A cheap local guard with no notion of position, required steps, ordering
//! or transitions. It does not replace [`validate_pipeline`].
//!
//! [`validate_pipeline`]: crate::validation::pipeline::validate_pipeline

use crate::core::contract::Contract;
use crate::core::error::{StablyResult, ValidationResult, Violation};
use crate::core::types::Action;
use log::debug;

/// Validate one action in isolation.
///
/// Both checks always run: the allowed-type list (when present and
/// non-empty), then whether any step declares the action's type.
pub fn validate_action(action: &Action, contract: &Contract) -> ValidationResult {
    debug!(
        "Validating action \"{}\" against contract \"{}\"",
        action.action_type, contract.id
    );

    let mut violations = Vec::new();

    let allowed = contract.allowed_action_types();
    if !allowed.is_empty() && !allowed.iter().any(|t| *t == action.action_type) {
        violations.push(Violation::DisallowedType {
            action_type: action.action_type.clone(),
        });
    }

    if !contract
        .steps
        .iter()
        .any(|step| step.action_type == action.action_type)
    {
        violations.push(Violation::NoStepForType {
            action_type: action.action_type.clone(),
        });
    }

    ValidationResult::from_violations(violations)
}

/// Decode the JSON documents and run [`validate_action`].
pub fn validate_action_json(action: &str, contract: &str) -> StablyResult<ValidationResult> {
    let action = Action::from_json(action)?;
    let contract = Contract::from_json(contract)?;
    Ok(validate_action(&action, &contract))
}
