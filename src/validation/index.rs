//! Lookup tables built once per validation call.

use crate::core::contract::{Contract, ContractStep};
use indexmap::{IndexMap, IndexSet};

/// Index maps over a borrowed contract.
///
/// `steps_by_type` keeps every step declaring a type, in declaration order,
/// so ambiguous mappings stay visible to the checks that care about them.
/// Colliding step ids are recorded once.
#[derive(Debug, Clone)]
pub struct ContractIndex<'c> {
    contract: &'c Contract,
    declared_ids: IndexSet<&'c str>,
    steps_by_type: IndexMap<&'c str, Vec<&'c ContractStep>>,
}

impl<'c> ContractIndex<'c> {
    /// Build the index.
    pub fn new(contract: &'c Contract) -> Self {
        let mut declared_ids = IndexSet::new();
        let mut steps_by_type: IndexMap<&'c str, Vec<&'c ContractStep>> = IndexMap::new();

        for step in &contract.steps {
            declared_ids.insert(step.id.as_str());
            steps_by_type
                .entry(step.action_type.as_str())
                .or_default()
                .push(step);
        }

        Self {
            contract,
            declared_ids,
            steps_by_type,
        }
    }

    /// The indexed contract.
    pub fn contract(&self) -> &'c Contract {
        self.contract
    }

    /// Whether the contract declares a step with this id.
    pub fn declares_step(&self, id: &str) -> bool {
        self.declared_ids.contains(id)
    }

    /// All steps declaring `action_type`, in declaration order.
    pub fn steps_for_type(&self, action_type: &str) -> &[&'c ContractStep] {
        self.steps_by_type
            .get(action_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// First-declared step for `action_type`.
    pub fn first_step_for_type(&self, action_type: &str) -> Option<&'c ContractStep> {
        self.steps_for_type(action_type).first().copied()
    }

    /// Whether `action_type` maps to the step `step_id`.
    pub fn type_matches_step(&self, action_type: &str, step_id: &str) -> bool {
        self.steps_for_type(action_type)
            .iter()
            .any(|step| step.id == step_id)
    }
}
