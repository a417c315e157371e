//! Application layer for tandem
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod publisher;
pub mod use_cases;

// Re-export commonly used types
pub use config::OrchestrationParams;
pub use ports::{
    completion::{CompletionError, CompletionService},
    event_log::{EventLogger, NoEventLogger},
    event_stream::{DEFAULT_EVENT_BUFFER, EventSink, EventStream, event_channel},
    record_store::{RecordStore, StoreError},
};
pub use publisher::{EventPublisher, PublishError};
pub use use_cases::aggregate::AggregateUseCase;
pub use use_cases::dual_respond::{DualRespondUseCase, StagePrompt, StagePrompts};
pub use use_cases::process_query::{ProcessQueryInput, ProcessQueryUseCase, StageServices};
pub use use_cases::resolve_records::{ResolveError, ResolveRecordsUseCase};
pub use use_cases::shared::{AbortOnDrop, Cancelled};
