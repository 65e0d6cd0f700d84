//! Incremental pipeline construction against one contract.
//!
//! A [`PipelineSession`] is what an orchestrator keeps while actions arrive
//! one tool call at a time: each candidate is checked with
//! [`validate_action`] before it is accepted, the whole sequence is checked
//! with [`validate_pipeline`] before it is walked, and [`generate`] walks it.
//! The session owns its action list and only borrows the contract.
//!
//! ```rust,ignore
//! let mut session = create_session(&contract);
//! let result = session.add_action(action);
//! if !result.ok {
//!     // surface result.errors to the caller
//! }
//! if session.is_valid() {
//!     for step in session.generate() {
//!         // hand `step` to a worker
//!     }
//! }
//! ```

use crate::core::contract::Contract;
use crate::core::error::{ValidationError, ValidationResult};
use crate::core::types::Action;
use crate::execution::generator::{generate, Generate};
use crate::validation::action::validate_action;
use crate::validation::pipeline::validate_pipeline;
use log::debug;
use std::slice;

/// Pipeline under construction.
#[derive(Debug, Clone)]
pub struct PipelineSession<'c> {
    contract: &'c Contract,
    actions: Vec<Action>,
}

impl<'c> PipelineSession<'c> {
    /// Create an empty session.
    pub fn new(contract: &'c Contract) -> Self {
        Self {
            contract,
            actions: Vec::new(),
        }
    }

    /// Adopt an existing sequence as-is. Nothing is validated.
    pub fn from_actions(contract: &'c Contract, actions: impl Into<Vec<Action>>) -> Self {
        Self {
            contract,
            actions: actions.into(),
        }
    }

    /// The contract this session validates against.
    pub fn contract(&self) -> &'c Contract {
        self.contract
    }

    // ========================================================================
    // Incremental Construction
    // ========================================================================

    /// Validate one action and append it if it passes.
    ///
    /// Returns the single-action result either way.
    pub fn add_action(&mut self, action: Action) -> ValidationResult {
        let result = validate_action(&action, self.contract);
        if result.ok {
            self.actions.push(action);
        } else {
            debug!(
                "Rejected action \"{}\": {} error(s)",
                action.action_type,
                result.errors.len()
            );
        }
        result
    }

    /// Append a batch atomically.
    ///
    /// Each action is checked with [`validate_action`]. The first failure is
    /// returned and nothing is appended. When all pass, the batch is committed
    /// and the result of validating the whole pipeline is returned.
    pub fn extend_actions<I>(&mut self, actions: I) -> ValidationResult
    where
        I: IntoIterator<Item = Action>,
    {
        let mut batch = Vec::new();
        for action in actions {
            let check = validate_action(&action, self.contract);
            if !check.ok {
                debug!(
                    "Rejected batch at action {} (\"{}\")",
                    batch.len(),
                    action.action_type
                );
                return check;
            }
            batch.push(action);
        }

        self.actions.extend(batch);
        validate_pipeline(&self.actions, self.contract)
    }

    /// Drop all actions, keeping the contract.
    pub fn clear(&mut self) {
        self.actions.clear();
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Validate every action accumulated so far.
    pub fn validate_pipeline(&self) -> ValidationResult {
        validate_pipeline(&self.actions, self.contract)
    }

    /// Whether the current pipeline is structurally valid.
    pub fn is_valid(&self) -> bool {
        self.validate_pipeline().ok
    }

    /// Validate the pipeline, failing with its diagnostics.
    pub fn assert_valid(&self) -> Result<(), ValidationError> {
        self.validate_pipeline().into_result()
    }

    // ========================================================================
    // Generation and Introspection
    // ========================================================================

    /// Walk the current actions. Does not validate.
    pub fn generate(&self) -> Generate<'_> {
        generate(&self.actions)
    }

    /// Copy of the current actions.
    pub fn snapshot(&self) -> Vec<Action> {
        self.actions.clone()
    }

    /// The current actions.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Iterate the current actions.
    pub fn iter(&self) -> slice::Iter<'_, Action> {
        self.actions.iter()
    }

    /// Number of actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether there are no actions.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Take the actions out of the session.
    pub fn into_actions(self) -> Vec<Action> {
        self.actions
    }
}

impl<'s> IntoIterator for &'s PipelineSession<'_> {
    type Item = &'s Action;
    type IntoIter = slice::Iter<'s, Action>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Start an empty session for `contract`.
pub fn create_session(contract: &Contract) -> PipelineSession<'_> {
    PipelineSession::new(contract)
}
