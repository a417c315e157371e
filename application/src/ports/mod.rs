//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod completion;
pub mod event_log;
pub mod event_stream;
pub mod record_store;
