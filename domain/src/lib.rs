//! Domain layer for tandem
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Run
//!
//! One [`Query`] drives one run: classify it, optionally resolve flight
//! records, answer it in two styles concurrently, then aggregate both answers
//! into a single terminal message. Every step is reported as a
//! [`ProgressEvent`].
//!
//! ## Lookup
//!
//! [`EntityExtractor`] turns flight queries into an [`ExtractedFilter`]
//! using immutable [`ExtractionRules`].

pub mod core;
pub mod lookup;
pub mod orchestration;
pub mod prompt;

// Re-export commonly used types
pub use core::{error::DomainError, language::Language, query::Query};
pub use lookup::{
    extractor::EntityExtractor,
    filter::ExtractedFilter,
    record::{FlightRecord, summarize_records},
    rules::ExtractionRules,
};
pub use orchestration::{
    entities::{RunOutcome, RunState, Stage},
    value_objects::{EventKind, ProgressEvent, StyleAnswer, fallback_text},
};
pub use prompt::{PromptSubject, PromptTemplate};
