//! Port for structured event transcripts.
//!
//! Defines the [`EventLogger`] trait for recording every published
//! [`ProgressEvent`] to a machine-readable log (JSONL).
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures exactly what
//! each run's caller received.

use tandem_domain::{ProgressEvent, Query};

/// Port for logging run events.
///
/// `log_*` methods are synchronous and non-fallible; logging failures never
/// disturb a run.
pub trait EventLogger: Send + Sync {
    /// A run started for `query`.
    fn log_run_start(&self, query: &Query);

    /// An event was published to the run's stream.
    fn log_event(&self, event: &ProgressEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoEventLogger;

impl EventLogger for NoEventLogger {
    fn log_run_start(&self, _query: &Query) {}
    fn log_event(&self, _event: &ProgressEvent) {}
}
