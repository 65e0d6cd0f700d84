//! # Stably - Deterministic Pipeline Contracts
//!
//! Stably checks whether an ordered sequence of typed actions conforms to a
//! declarative contract, and walks the sequence once it is accepted.
//!
//! ## Features
//!
//! - **Structural Validation**: allowed action types, required steps,
//!   ordering constraints and step transitions, checked in a fixed order
//! - **Accumulated Diagnostics**: every violation is reported in one result,
//!   never one at a time
//! - **Deterministic**: identical input gives an identical result; contracts
//!   and actions are never modified
//! - **Incremental Sessions**: build a pipeline one action at a time against
//!   a contract
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stably::prelude::*;
//!
//! let contract = Contract::new("docs")
//!     .with_step(ContractStep::new("s1", "start"))
//!     .with_step(ContractStep::new("s2", "middle"))
//!     .with_step(ContractStep::new("s3", "end"))
//!     .with_structural(
//!         StructuralRules::new()
//!             .with_required_steps(["s1", "s3"])
//!             .with_order_constraint("s1", "s3"),
//!     );
//!
//! let actions = vec![Action::new("start"), Action::new("middle"), Action::new("end")];
//!
//! let result = validate_pipeline(&actions, &contract);
//! assert!(result.ok);
//!
//! for action in generate(&actions) {
//!     // hand each action to a worker
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: actions, contracts, errors and the validation result
//! - [`validation`]: pipeline and action validators and the validator factory
//! - [`execution`]: the sequence generator and pipeline sessions
//!
//! Payloads are never examined, nothing is executed, and no state is kept
//! between calls.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod core;
pub mod execution;
pub mod validation;

/// Prelude module for convenient imports.
///
/// Import everything commonly needed with:
/// ```rust,ignore
/// use stably::prelude::*;
/// ```
pub mod prelude {
    // Data model
    pub use crate::core::contract::{
        Contract, ContractStep, OrderConstraint, StructuralRules, TransitionRule,
    };
    pub use crate::core::types::Action;

    // Errors
    pub use crate::core::error::{
        StablyError, StablyResult, ValidationError, ValidationResult, Violation,
    };

    // Validation
    pub use crate::validation::action::{validate_action, validate_action_json};
    pub use crate::validation::factory::{create_validator, Validator};
    pub use crate::validation::pipeline::{
        validate_pipeline, validate_pipeline_json, PipelineValidator,
    };
    pub use crate::validation::stages::ValidationStage;

    // Execution
    pub use crate::execution::generator::{generate, Generate};
    pub use crate::execution::session::{create_session, PipelineSession};
}

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
