//! Application-level configuration.
//!
//! - [`OrchestrationParams`] - per-run control (event buffer, run deadline)

pub mod orchestration_params;

pub use orchestration_params::OrchestrationParams;
