//! Infrastructure layer for tandem
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod completion;
pub mod config;
pub mod logging;
pub mod store;

// Re-export commonly used types
pub use completion::{OpenAiCompletionService, OpenAiConfig};
pub use config::{
    ConfigLoader, ConfigValidationError, FileCompletionConfig, FileConfig, FileLookupConfig,
    FileOrchestrationConfig, FileStageModelsConfig, FileStoreConfig,
};
pub use logging::JsonlEventLogger;
pub use store::{InMemoryRecordStore, StoreLoadError, sample_flights};
