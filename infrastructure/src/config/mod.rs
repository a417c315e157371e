//! Configuration file loading for tandem
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `TANDEM_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./tandem.toml` or `./.tandem.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/tandem/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, DEFAULT_API_KEY_ENV, DEFAULT_ENDPOINT, DEFAULT_MODEL,
    FileCompletionConfig, FileConfig, FileLookupConfig, FileOrchestrationConfig,
    FileStageModelsConfig, FileStoreConfig,
};
pub use loader::ConfigLoader;
