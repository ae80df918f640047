//! CLI command implementations.

pub mod env;
pub mod param;
pub mod progress;
pub mod training_result;
