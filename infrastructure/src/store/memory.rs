//! In-memory record store
//!
//! Holds an immutable table of flights and answers searches with the
//! record-store matching contract (case-insensitive substring match,
//! inclusive price bound, direction-agnostic single-city lookup).

use super::seed::sample_flights;
use async_trait::async_trait;
use std::path::Path;
use tandem_application::{RecordStore, StoreError};
use tandem_domain::{ExtractedFilter, FlightRecord};
use thiserror::Error;
use tracing::{debug, info};

/// Errors loading a flight data file
#[derive(Error, Debug)]
pub enum StoreLoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid flight data in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Record store backed by a fixed in-memory table
#[derive(Debug, Clone)]
pub struct InMemoryRecordStore {
    records: Vec<FlightRecord>,
}

impl InMemoryRecordStore {
    pub fn new(records: Vec<FlightRecord>) -> Self {
        Self { records }
    }

    /// Store seeded with the built-in sample flights.
    pub fn with_sample_data() -> Self {
        Self::new(sample_flights())
    }

    /// Load a JSON array of flight records.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, StoreLoadError> {
        let path = path.as_ref();
        let path_display = path.display().to_string();

        let content = std::fs::read_to_string(path).map_err(|source| StoreLoadError::Io {
            path: path_display.clone(),
            source,
        })?;
        let records: Vec<FlightRecord> =
            serde_json::from_str(&content).map_err(|source| StoreLoadError::Parse {
                path: path_display.clone(),
                source,
            })?;

        info!("Loaded {} flight record(s) from {}", records.len(), path_display);
        Ok(Self::new(records))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn matches(record: &FlightRecord, filter: &ExtractedFilter) -> bool {
        let origin = filter.origin.as_deref().map(str::to_lowercase);
        let destination = filter.destination.as_deref().map(str::to_lowercase);

        if let Some(origin) = &origin
            && !contains_ci(&record.origin, origin)
        {
            return false;
        }

        if let Some(destination) = &destination {
            let hit = if origin.is_none() {
                contains_ci(&record.destination, destination)
                    || contains_ci(&record.origin, destination)
            } else {
                contains_ci(&record.destination, destination)
            };
            if !hit {
                return false;
            }
        }

        match filter.max_price {
            Some(max_price) => record.price <= max_price,
            None => true,
        }
    }
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::with_sample_data()
    }
}

/// `needle` must already be lowercase.
fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn search(&self, filter: &ExtractedFilter) -> Result<Vec<FlightRecord>, StoreError> {
        let found: Vec<FlightRecord> = self
            .records
            .iter()
            .filter(|record| Self::matches(record, filter))
            .cloned()
            .collect();
        debug!("{} of {} record(s) match {}", found.len(), self.records.len(), filter);
        Ok(found)
    }
}
