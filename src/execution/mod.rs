//! Walking and building accepted pipelines.
//!
//! Provides:
//! - A lazy, restartable generator over an action sequence
//! - A session for building a sequence incrementally against one contract

pub mod generator;
pub mod session;

pub use generator::{generate, Generate};
pub use session::{create_session, PipelineSession};
