//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted to application/domain types
//! at the edges (`to_params`, `to_rules`).

mod completion;
mod lookup;
mod orchestration;

pub use completion::{
    DEFAULT_API_KEY_ENV, DEFAULT_ENDPOINT, DEFAULT_MODEL, FileCompletionConfig,
    FileStageModelsConfig,
};
pub use lookup::FileLookupConfig;
pub use orchestration::FileOrchestrationConfig;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    #[error("{0} cannot be 0")]
    ZeroValue(&'static str),

    #[error("{0}: model name cannot be empty")]
    EmptyModelName(&'static str),

    #[error("completion.endpoint cannot be empty")]
    EmptyEndpoint,
}

/// Raw record store configuration (`[store]` section)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStoreConfig {
    /// JSON file with an array of flight records; built-in sample data when unset
    pub path: Option<PathBuf>,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Completion backend settings
    pub completion: FileCompletionConfig,
    /// Record store settings
    pub store: FileStoreConfig,
    /// Run control settings
    pub orchestration: FileOrchestrationConfig,
    /// Extraction rule extensions
    pub lookup: FileLookupConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();

        if self.completion.endpoint.trim().is_empty() {
            issues.push(ConfigValidationError::EmptyEndpoint);
        }
        if self.completion.timeout_seconds == Some(0) {
            issues.push(ConfigValidationError::ZeroValue("completion.timeout_seconds"));
        }
        for (field, model) in self.completion.models.entries() {
            if model.trim().is_empty() {
                issues.push(ConfigValidationError::EmptyModelName(field));
            }
        }

        if self.orchestration.event_buffer == 0 {
            issues.push(ConfigValidationError::ZeroValue("orchestration.event_buffer"));
        }
        if self.orchestration.run_timeout_seconds == Some(0) {
            issues.push(ConfigValidationError::ZeroValue(
                "orchestration.run_timeout_seconds",
            ));
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[completion]
endpoint = "http://localhost:8080/v1"
api_key_env = "LOCAL_KEY"
timeout_seconds = 30

[completion.models]
style_a = "small"
style_b = "small"
aggregator = "large"

[store]
path = "flights.json"

[orchestration]
event_buffer = 8
run_timeout_seconds = 300
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.completion.endpoint, "http://localhost:8080/v1");
        assert_eq!(config.completion.api_key_env, "LOCAL_KEY");
        assert_eq!(config.completion.timeout_seconds, Some(30));
        assert_eq!(config.completion.models.aggregator, "large");
        assert_eq!(config.store.path, Some(PathBuf::from("flights.json")));
        assert_eq!(config.orchestration.event_buffer, 8);
        assert_eq!(config.orchestration.run_timeout_seconds, Some(300));
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.completion.api_key_env, "OPENAI_API_KEY");
        assert!(config.store.path.is_none());
        assert!(config.orchestration.run_timeout_seconds.is_none());
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate_reports_every_issue() {
        let toml_str = r#"
[completion]
timeout_seconds = 0

[completion.models]
style_b = " "

[orchestration]
event_buffer = 0
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let issues = config.validate();

        assert_eq!(
            issues,
            vec![
                ConfigValidationError::ZeroValue("completion.timeout_seconds"),
                ConfigValidationError::EmptyModelName("completion.models.style_b"),
                ConfigValidationError::ZeroValue("orchestration.event_buffer"),
            ]
        );
        assert_eq!(issues[1].to_string(), "completion.models.style_b: model name cannot be empty");
    }
}
