//! Run orchestration domain
//!
//! Stages, run lifecycle, and the immutable values a run produces.

pub mod entities;
pub mod value_objects;
