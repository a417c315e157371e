//! Completion service port
//!
//! Defines the interface for the text-completion backend that answers a prompt.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during a completion call
///
/// The orchestrator treats every variant the same way: a failed responder
/// stage becomes an error answer, a failed aggregation triggers the fallback.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompletionError {
    #[error("Completion service not configured: {0}")]
    NotConfigured(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Empty response from completion service")]
    EmptyResponse,

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// Text-completion backend
///
/// This port defines how the application layer obtains an answer for a prompt.
/// Implementations (adapters) live in the infrastructure layer. Callers may
/// drop the returned future at any await point to abandon the call.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Short name for logs (e.g. the model id)
    fn name(&self) -> &str;

    /// Send one prompt and wait for the full answer
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}
