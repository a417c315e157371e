//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod aggregate;
pub mod dual_respond;
pub mod process_query;
pub mod resolve_records;
pub(crate) mod shared;
