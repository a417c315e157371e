//! Resolve Records use case
//!
//! Looks up flight records for an extracted filter.

use crate::ports::record_store::{RecordStore, StoreError};
use std::sync::Arc;
use tandem_domain::{ExtractedFilter, FlightRecord};
use thiserror::Error;
use tracing::{info, warn};

/// Why no usable records came back
///
/// The orchestrator answers both variants with the same "nothing found"
/// message; the distinction is kept for logs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("No records match the filter")]
    NoMatches,

    #[error("Record store error: {0}")]
    Store(#[from] StoreError),
}

/// Use case for resolving a filter to flight records
pub struct ResolveRecordsUseCase<S: RecordStore + 'static> {
    store: Arc<S>,
}

impl<S: RecordStore + 'static> ResolveRecordsUseCase<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Resolve `filter`; an empty result is reported as [`ResolveError::NoMatches`].
    pub async fn execute(
        &self,
        filter: &ExtractedFilter,
    ) -> Result<Vec<FlightRecord>, ResolveError> {
        info!("Resolving records for {}", filter);

        match self.store.search(filter).await {
            Ok(records) if records.is_empty() => {
                info!("Record store returned no matches for {}", filter);
                Err(ResolveError::NoMatches)
            }
            Ok(records) => {
                info!("Resolved {} record(s)", records.len());
                Ok(records)
            }
            Err(e) => {
                warn!("Record store lookup failed: {}", e);
                Err(ResolveError::Store(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FixedStore {
        result: Result<Vec<FlightRecord>, StoreError>,
        seen: Mutex<Vec<ExtractedFilter>>,
    }

    #[async_trait]
    impl RecordStore for FixedStore {
        async fn search(
            &self,
            filter: &ExtractedFilter,
        ) -> Result<Vec<FlightRecord>, StoreError> {
            self.seen.lock().unwrap().push(filter.clone());
            self.result.clone()
        }
    }

    fn record() -> FlightRecord {
        FlightRecord::new(
            "FL101",
            "Madrid",
            "Paris",
            "2025-08-10T09:00:00Z",
            "2025-08-10T11:00:00Z",
            120.0,
            50,
        )
    }

    #[tokio::test]
    async fn test_resolves_records() {
        let store = Arc::new(FixedStore {
            result: Ok(vec![record()]),
            seen: Mutex::new(Vec::new()),
        });
        let use_case = ResolveRecordsUseCase::new(store.clone());
        let filter = ExtractedFilter::new().with_origin("Madrid");

        let records = use_case.execute(&filter).await.unwrap();
        assert_eq!(records, vec![record()]);
        assert_eq!(store.seen.lock().unwrap().as_slice(), &[filter]);
    }

    #[tokio::test]
    async fn test_empty_is_no_matches() {
        let store = Arc::new(FixedStore {
            result: Ok(vec![]),
            seen: Mutex::new(Vec::new()),
        });
        let result = ResolveRecordsUseCase::new(store)
            .execute(&ExtractedFilter::default())
            .await;
        assert_eq!(result, Err(ResolveError::NoMatches));
    }

    #[tokio::test]
    async fn test_store_error_is_kept() {
        let store = Arc::new(FixedStore {
            result: Err(StoreError::Unavailable("down".to_string())),
            seen: Mutex::new(Vec::new()),
        });
        let result = ResolveRecordsUseCase::new(store)
            .execute(&ExtractedFilter::default())
            .await;
        assert_eq!(
            result,
            Err(ResolveError::Store(StoreError::Unavailable("down".to_string())))
        );
    }
}
