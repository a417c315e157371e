//! Completion backend configuration from TOML (`[completion]` section)

use serde::{Deserialize, Serialize};

/// Default OpenAI-compatible API base URL
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";
/// Default environment variable holding the API key
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";
/// Default model for every stage
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Raw completion configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCompletionConfig {
    /// API base URL; `/chat/completions` is appended
    pub endpoint: String,
    /// Environment variable the API key is read from
    pub api_key_env: String,
    /// Per-request timeout in seconds
    pub timeout_seconds: Option<u64>,
    /// Per-stage model names
    pub models: FileStageModelsConfig,
}

impl Default for FileCompletionConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            timeout_seconds: Some(60),
            models: FileStageModelsConfig::default(),
        }
    }
}

/// Model used by each stage (`[completion.models]`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStageModelsConfig {
    pub style_a: String,
    pub style_b: String,
    pub aggregator: String,
}

impl Default for FileStageModelsConfig {
    fn default() -> Self {
        Self {
            style_a: DEFAULT_MODEL.to_string(),
            style_b: DEFAULT_MODEL.to_string(),
            aggregator: DEFAULT_MODEL.to_string(),
        }
    }
}

impl FileStageModelsConfig {
    /// `(field, value)` pairs, for validation.
    pub(super) fn entries(&self) -> [(&'static str, &str); 3] {
        [
            ("completion.models.style_a", &self.style_a),
            ("completion.models.style_b", &self.style_b),
            ("completion.models.aggregator", &self.aggregator),
        ]
    }
}
