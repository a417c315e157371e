//! Orchestration parameters - per-run control.
//!
//! [`OrchestrationParams`] groups the static knobs of
//! [`ProcessQueryUseCase`](crate::use_cases::process_query::ProcessQueryUseCase).
//! These are application-layer concerns, not domain policy.

use crate::ports::event_stream::DEFAULT_EVENT_BUFFER;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Run control parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrchestrationParams {
    /// Capacity of the event channel between a run and its consumer.
    pub event_buffer: usize,
    /// Whole-run deadline; the run is cancelled when it elapses.
    pub run_timeout: Option<Duration>,
}

impl Default for OrchestrationParams {
    fn default() -> Self {
        Self {
            event_buffer: DEFAULT_EVENT_BUFFER,
            run_timeout: None,
        }
    }
}

impl OrchestrationParams {
    // ==================== Builder Methods ====================

    pub fn with_event_buffer(mut self, buffer: usize) -> Self {
        self.event_buffer = buffer.max(1);
        self
    }

    pub fn with_run_timeout(mut self, timeout: Duration) -> Self {
        self.run_timeout = Some(timeout);
        self
    }

    pub fn with_run_timeout_seconds(mut self, seconds: Option<u64>) -> Self {
        self.run_timeout = seconds.filter(|s| *s > 0).map(Duration::from_secs);
        self
    }
}
