//! Individual validation stages.
//!
//! Each stage checks one category of structural rule and returns every
//! violation it finds. Stages never stop early and never look at payloads.

use crate::core::error::Violation;
use crate::core::types::Action;
use crate::validation::index::ContractIndex;
use log::warn;
use std::collections::{HashMap, HashSet};

/// Trait for validation stages.
pub trait ValidationStage: Send + Sync {
    /// Name of this validation stage.
    fn name(&self) -> &str;

    /// Check the action sequence against the indexed contract.
    fn check(&self, actions: &[Action], index: &ContractIndex<'_>) -> Vec<Violation>;
}

/// Allowed-type validation.
///
/// Skipped when `allowedActionTypes` is absent or empty. Reports each
/// offending action with its 0-based position.
pub struct AllowedTypeValidation;

impl ValidationStage for AllowedTypeValidation {
    fn name(&self) -> &str {
        "Allowed Type Validation"
    }

    fn check(&self, actions: &[Action], index: &ContractIndex<'_>) -> Vec<Violation> {
        let allowed = index.contract().allowed_action_types();
        if allowed.is_empty() {
            return Vec::new();
        }
        let allowed: HashSet<&str> = allowed.iter().map(String::as_str).collect();

        actions
            .iter()
            .enumerate()
            .filter(|(_, action)| !allowed.contains(action.action_type.as_str()))
            .map(|(index, action)| Violation::DisallowedTypeAt {
                index,
                action_type: action.action_type.clone(),
            })
            .collect()
    }
}

/// Required-step validation.
///
/// An action counts towards every step that declares its type. Repeats are
/// fine; only a step with zero matches is reported.
pub struct RequiredStepValidation;

impl ValidationStage for RequiredStepValidation {
    fn name(&self) -> &str {
        "Required Step Validation"
    }

    fn check(&self, actions: &[Action], index: &ContractIndex<'_>) -> Vec<Violation> {
        let required = index.contract().required_steps();
        if required.is_empty() {
            return Vec::new();
        }

        let seen: HashSet<&str> = actions
            .iter()
            .flat_map(|action| index.steps_for_type(&action.action_type))
            .map(|step| step.id.as_str())
            .collect();

        let mut violations = Vec::new();
        for step_id in required {
            if !index.declares_step(step_id) {
                warn!(
                    "Required step \"{}\" is not declared by contract \"{}\"",
                    step_id,
                    index.contract().id
                );
            }
            if !seen.contains(step_id.as_str()) {
                violations.push(Violation::MissingRequiredStep {
                    step_id: step_id.clone(),
                });
            }
        }
        violations
    }
}

/// Order constraint validation.
///
/// Compares the last occurrence of `before` with the first occurrence of
/// `after`. A pair where either side never occurs is skipped; a missing
/// required step is already reported by [`RequiredStepValidation`].
pub struct OrderConstraintValidation;

impl ValidationStage for OrderConstraintValidation {
    fn name(&self) -> &str {
        "Order Constraint Validation"
    }

    fn check(&self, actions: &[Action], index: &ContractIndex<'_>) -> Vec<Violation> {
        let mut violations = Vec::new();

        for constraint in index.contract().order_constraints() {
            for step_id in [&constraint.before, &constraint.after] {
                if !index.declares_step(step_id) {
                    warn!("Order constraint references undeclared step \"{}\"", step_id);
                }
            }

            let last_before = last_position(actions, index, &constraint.before);
            let first_after = first_position(actions, index, &constraint.after);

            if let (Some(last_before), Some(first_after)) = (last_before, first_after) {
                if last_before > first_after {
                    violations.push(Violation::OrderViolated {
                        before: constraint.before.clone(),
                        after: constraint.after.clone(),
                    });
                }
            }
        }

        violations
    }
}

/// First position whose action type maps to `step_id`.
fn first_position(actions: &[Action], index: &ContractIndex<'_>, step_id: &str) -> Option<usize> {
    actions
        .iter()
        .position(|action| index.type_matches_step(&action.action_type, step_id))
}

/// Last position whose action type maps to `step_id`.
fn last_position(actions: &[Action], index: &ContractIndex<'_>, step_id: &str) -> Option<usize> {
    actions
        .iter()
        .rposition(|action| index.type_matches_step(&action.action_type, step_id))
}

/// Transition validation.
///
/// Each action resolves to the first step declared for its type. Adjacent
/// pairs are checked against the rule for the earlier step; steps without a
/// rule accept any successor and unresolved actions are skipped.
pub struct TransitionValidation;

impl ValidationStage for TransitionValidation {
    fn name(&self) -> &str {
        "Transition Validation"
    }

    fn check(&self, actions: &[Action], index: &ContractIndex<'_>) -> Vec<Violation> {
        let rules = index.contract().transitions();
        if rules.is_empty() {
            return Vec::new();
        }

        // A later rule for the same `from` replaces the earlier one.
        let mut allowed: HashMap<&str, HashSet<&str>> = HashMap::new();
        for rule in rules {
            for step_id in std::iter::once(&rule.from).chain(&rule.to) {
                if !index.declares_step(step_id) {
                    warn!("Transition rule references undeclared step \"{}\"", step_id);
                }
            }
            allowed.insert(
                rule.from.as_str(),
                rule.to.iter().map(String::as_str).collect(),
            );
        }

        let resolved: Vec<Option<&str>> = actions
            .iter()
            .map(|action| {
                index
                    .first_step_for_type(&action.action_type)
                    .map(|step| step.id.as_str())
            })
            .collect();

        let mut violations = Vec::new();
        for pair in resolved.windows(2) {
            if let &[Some(from), Some(to)] = pair {
                let permitted = allowed.get(from).map_or(true, |targets| targets.contains(to));
                if !permitted {
                    violations.push(Violation::TransitionNotAllowed {
                        from: from.to_string(),
                        to: to.to_string(),
                    });
                }
            }
        }
        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::contract::{Contract, ContractStep, StructuralRules, TransitionRule};

    fn actions(types: &[&str]) -> Vec<Action> {
        types.iter().map(|t| Action::new(*t)).collect()
    }

    fn base_contract() -> Contract {
        Contract::new("stages")
            .with_step(ContractStep::new("s1", "start"))
            .with_step(ContractStep::new("s2", "middle"))
            .with_step(ContractStep::new("s3", "end"))
    }

    #[test]
    fn test_allowed_types_reports_every_position() {
        let contract = base_contract().with_structural(
            StructuralRules::new().with_allowed_action_types(["start", "end"]),
        );
        let index = ContractIndex::new(&contract);

        let found = AllowedTypeValidation.check(&actions(&["x", "start", "y"]), &index);
        let positions: Vec<usize> = found
            .iter()
            .filter_map(|v| match v {
                Violation::DisallowedTypeAt { index, .. } => Some(*index),
                _ => None,
            })
            .collect();
        assert_eq!(found.len(), 2);
        assert_eq!(positions, vec![0, 2]);
    }

    #[test]
    fn test_empty_allow_list_is_unconstrained() {
        let contract = base_contract()
            .with_structural(StructuralRules::new().with_allowed_action_types(Vec::<String>::new()));
        let index = ContractIndex::new(&contract);

        assert!(AllowedTypeValidation.check(&actions(&["anything"]), &index).is_empty());
    }

    #[test]
    fn test_required_steps_satisfied_by_any_matching_step() {
        let contract = Contract::new("shared")
            .with_step(ContractStep::new("draft", "write"))
            .with_step(ContractStep::new("revise", "write"))
            .with_structural(StructuralRules::new().with_required_steps(["draft", "revise"]));
        let index = ContractIndex::new(&contract);

        assert!(RequiredStepValidation.check(&actions(&["write"]), &index).is_empty());
    }

    #[test]
    fn test_required_steps_in_declared_order() {
        let contract = base_contract()
            .with_structural(StructuralRules::new().with_required_steps(["s3", "s2", "s1"]));
        let index = ContractIndex::new(&contract);

        let found = RequiredStepValidation.check(&actions(&["middle"]), &index);
        assert_eq!(
            found,
            vec![
                Violation::MissingRequiredStep { step_id: "s3".to_string() },
                Violation::MissingRequiredStep { step_id: "s1".to_string() },
            ]
        );
    }

    #[test]
    fn test_undeclared_required_step_is_still_reported() {
        let contract =
            base_contract().with_structural(StructuralRules::new().with_required_steps(["ghost"]));
        let index = ContractIndex::new(&contract);

        let found = RequiredStepValidation.check(&actions(&["start"]), &index);
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_order_uses_last_before_and_first_after() {
        let contract =
            base_contract().with_structural(StructuralRules::new().with_order_constraint("s1", "s3"));
        let index = ContractIndex::new(&contract);

        // Interleaved occurrences: last start (2) > first end (1).
        let found = OrderConstraintValidation.check(&actions(&["start", "end", "start", "end"]), &index);
        assert_eq!(found.len(), 1);

        assert!(OrderConstraintValidation
            .check(&actions(&["start", "start", "middle", "end", "end"]), &index)
            .is_empty());
    }

    #[test]
    fn test_order_skips_absent_sides() {
        let contract =
            base_contract().with_structural(StructuralRules::new().with_order_constraint("s1", "s3"));
        let index = ContractIndex::new(&contract);

        assert!(OrderConstraintValidation.check(&actions(&["end"]), &index).is_empty());
        assert!(OrderConstraintValidation.check(&actions(&["start"]), &index).is_empty());
        assert!(OrderConstraintValidation.check(&[], &index).is_empty());
    }

    #[test]
    fn test_transitions_use_first_declared_step() {
        let contract = Contract::new("ambiguous")
            .with_step(ContractStep::new("draft", "write"))
            .with_step(ContractStep::new("revise", "write"))
            .with_step(ContractStep::new("check", "verify"))
            .with_transition(TransitionRule::new("draft", ["check"]))
            .with_transition(TransitionRule::new("revise", ["revise"]));
        let index = ContractIndex::new(&contract);

        // "write" resolves to "draft", so draft -> draft is rejected even
        // though the rule for "revise" would allow it.
        let found = TransitionValidation.check(&actions(&["write", "write", "verify"]), &index);
        assert_eq!(
            found,
            vec![Violation::TransitionNotAllowed {
                from: "draft".to_string(),
                to: "draft".to_string(),
            }]
        );
    }

    #[test]
    fn test_transitions_skip_unruled_and_unresolved() {
        let contract = base_contract().with_transition(TransitionRule::new("s1", ["s2"]));
        let index = ContractIndex::new(&contract);

        // s2 has no rule; "other" resolves to nothing.
        assert!(TransitionValidation
            .check(&actions(&["start", "middle", "start", "other", "end"]), &index)
            .is_empty());
    }

    #[test]
    fn test_later_transition_rule_replaces_earlier() {
        let contract = base_contract()
            .with_transition(TransitionRule::new("s1", ["s2"]))
            .with_transition(TransitionRule::new("s1", ["s3"]));
        let index = ContractIndex::new(&contract);

        assert!(TransitionValidation.check(&actions(&["start", "end"]), &index).is_empty());
        assert_eq!(TransitionValidation.check(&actions(&["start", "middle"]), &index).len(), 1);
    }

    #[test]
    fn test_stage_names() {
        let stages: [&dyn ValidationStage; 4] = [
            &AllowedTypeValidation,
            &RequiredStepValidation,
            &OrderConstraintValidation,
            &TransitionValidation,
        ];
        let names: Vec<&str> = stages.iter().map(|s| s.name()).collect();
        assert_eq!(names.len(), 4);
        assert!(names.iter().all(|n| n.ends_with("Validation")));
    }
}
