//! Record store port
//!
//! Defines the interface for looking up flight records.

use async_trait::async_trait;
use tandem_domain::{ExtractedFilter, FlightRecord};
use thiserror::Error;

/// Errors that can occur while querying the record store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Record store unavailable: {0}")]
    Unavailable(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),
}

/// Port for the structured record store
///
/// Matching contract:
/// - `origin` / `destination`: case-insensitive substring match
/// - `max_price`: inclusive upper bound, only when present
/// - destination without origin: matches records whose origin **or**
///   destination contains the value (direction unknown)
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn search(&self, filter: &ExtractedFilter) -> Result<Vec<FlightRecord>, StoreError>;
}
