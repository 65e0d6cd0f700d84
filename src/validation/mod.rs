//! Structural validation of actions against a contract.
//!
//! [`validate_pipeline`] checks a whole sequence; [`validate_action`] is a
//! weaker per-action guard; [`create_validator`] binds a contract to both.

pub mod action;
pub mod factory;
pub mod index;
pub mod pipeline;
pub mod stages;

pub use action::{validate_action, validate_action_json};
pub use factory::{create_validator, Validator};
pub use index::ContractIndex;
pub use pipeline::{validate_pipeline, validate_pipeline_json, PipelineValidator};
pub use stages::{
    AllowedTypeValidation, OrderConstraintValidation, RequiredStepValidation,
    TransitionValidation, ValidationStage,
};
