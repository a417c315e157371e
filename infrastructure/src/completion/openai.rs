//! OpenAI-compatible chat completion adapter
//!
//! One `POST {endpoint}/chat/completions` per prompt with a single user
//! message. Failures are reported once and never retried.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tandem_application::{CompletionError, CompletionService};
use tracing::debug;

/// Connection settings for one model
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API base URL, e.g. `https://api.openai.com/v1`
    pub endpoint: String,
    /// Bearer key; `None` when the configured variable is unset
    pub api_key: Option<String>,
    /// Variable the key was read from, for error messages
    pub api_key_env: String,
    pub model: String,
    pub timeout: Option<Duration>,
}

impl OpenAiConfig {
    /// Read the key from `api_key_env`.
    pub fn from_env(
        endpoint: impl Into<String>,
        api_key_env: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        let api_key_env = api_key_env.into();
        let api_key = std::env::var(&api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty());
        Self {
            endpoint: endpoint.into(),
            api_key,
            api_key_env,
            model: model.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.endpoint.trim_end_matches('/'))
    }
}

/// Completion service for an OpenAI-compatible HTTP API
pub struct OpenAiCompletionService {
    client: reqwest::Client,
    config: OpenAiConfig,
}

impl OpenAiCompletionService {
    pub fn new(config: OpenAiConfig) -> Result<Self, CompletionError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| CompletionError::NotConfigured(e.to_string()))?;
        Ok(Self { client, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    #[serde(default)]
    content: Option<String>,
}

/// First non-empty choice content.
fn first_content(response: ChatResponse) -> Result<String, CompletionError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or(CompletionError::EmptyResponse)
}

fn map_send_error(e: reqwest::Error) -> CompletionError {
    if e.is_timeout() {
        CompletionError::Timeout
    } else if e.is_connect() {
        CompletionError::ConnectionError(e.to_string())
    } else {
        CompletionError::RequestFailed(e.to_string())
    }
}

#[async_trait]
impl CompletionService for OpenAiCompletionService {
    fn name(&self) -> &str {
        &self.config.model
    }

    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let Some(api_key) = &self.config.api_key else {
            return Err(CompletionError::NotConfigured(format!(
                "{} is not set",
                self.config.api_key_env
            )));
        };

        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        debug!("POST {} (model {})", self.config.completions_url(), self.config.model);
        let response = self
            .client
            .post(self.config.completions_url())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(CompletionError::RequestFailed(format!(
                "HTTP {}: {}",
                status, text
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::Other(format!("Invalid response body: {}", e)))?;
        first_content(parsed)
    }
}
