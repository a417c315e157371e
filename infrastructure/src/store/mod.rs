//! Record store adapters

mod memory;
mod seed;

pub use memory::{InMemoryRecordStore, StoreLoadError};
pub use seed::sample_flights;
