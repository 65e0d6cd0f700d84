//! Error types for Stably.
//!
//! There is one class of problem a validator reports: a structural
//! violation. Violations are never raised. They are collected into a
//! [`ValidationResult`] whose `errors` are the rendered diagnostics, in the
//! order the checks ran. The `Error` types here exist for callers who prefer
//! `?` over inspecting a result, and for the JSON boundary.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single structural violation.
///
/// The `Display` text of each variant is the diagnostic string that ends up
/// in [`ValidationResult::errors`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// A pipeline action whose type is outside the allow-list.
    #[error("Action at index {index} has disallowed type \"{action_type}\".")]
    DisallowedTypeAt {
        /// Position of the action in the pipeline.
        index: usize,
        /// The rejected type tag.
        action_type: String,
    },

    /// A single action whose type is outside the allow-list.
    #[error("Action has disallowed type \"{action_type}\".")]
    DisallowedType {
        /// The rejected type tag.
        action_type: String,
    },

    /// No contract step declares the action's type.
    #[error("No contract step found for action type \"{action_type}\".")]
    NoStepForType {
        /// The unmatched type tag.
        action_type: String,
    },

    /// A required step is matched by no action.
    #[error("Required step \"{step_id}\" does not appear in the pipeline instance.")]
    MissingRequiredStep {
        /// The missing step id.
        step_id: String,
    },

    /// An occurrence of `before` comes after the first `after`.
    #[error("Order constraint violated: step \"{before}\" must appear before \"{after}\".")]
    OrderViolated {
        /// Step id that must come first.
        before: String,
        /// Step id that must come later.
        after: String,
    },

    /// Two adjacent actions resolve to steps with no permitted transition.
    #[error("Transition from step \"{from}\" to \"{to}\" is not allowed by the contract.")]
    TransitionNotAllowed {
        /// Step of the earlier action.
        from: String,
        /// Step of the later action.
        to: String,
    },
}

/// Raised by the `assert_*` helpers when validation does not pass.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", render_errors(.errors))]
pub struct ValidationError {
    /// Diagnostics from the failed result.
    pub errors: Vec<String>,
}

fn render_errors(errors: &[String]) -> String {
    if errors.is_empty() {
        "Validation failed.".to_string()
    } else {
        errors.join("\n")
    }
}

/// Top-level error type for Stably.
#[derive(Error, Debug)]
pub enum StablyError {
    /// Validation did not pass.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A JSON document could not be read or written.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for Stably operations.
pub type StablyResult<T> = Result<T, StablyError>;

// ============================================================================
// Validation Result
// ============================================================================

/// Outcome of a structural validation.
///
/// Serializes to `{ "ok": bool, "errors": [string] }`. `ok` is true exactly
/// when `errors` is empty; build results through [`ValidationResult::success`]
/// or [`ValidationResult::from_violations`] to keep it that way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether validation passed.
    pub ok: bool,
    /// Diagnostics in check order.
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// A passing result.
    pub fn success() -> Self {
        Self {
            ok: true,
            errors: Vec::new(),
        }
    }

    /// Render violations into a result, preserving their order.
    pub fn from_violations<I>(violations: I) -> Self
    where
        I: IntoIterator<Item = Violation>,
    {
        let errors: Vec<String> = violations.into_iter().map(|v| v.to_string()).collect();
        Self {
            ok: errors.is_empty(),
            errors,
        }
    }

    /// Whether validation passed.
    pub fn is_ok(&self) -> bool {
        self.ok
    }

    /// Convert into a `Result`, failing with the collected diagnostics.
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.ok {
            Ok(())
        } else {
            Err(ValidationError {
                errors: self.errors,
            })
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::success()
    }
}
