//! Core types for the Stably contract substrate.
//!
//! This module contains the data model everything else depends on:
//! - Actions (typed units of a pipeline instance)
//! - Contracts (steps, transitions, structural rules)
//! - Error types and the validation result document

pub mod contract;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use contract::{Contract, ContractStep, OrderConstraint, StructuralRules, TransitionRule};
pub use error::{StablyError, StablyResult, ValidationError, ValidationResult, Violation};
pub use types::Action;
