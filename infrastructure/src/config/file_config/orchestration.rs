//! Orchestration configuration from TOML (`[orchestration]` section)

use serde::{Deserialize, Serialize};
use tandem_application::{DEFAULT_EVENT_BUFFER, OrchestrationParams};

/// Raw orchestration configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOrchestrationConfig {
    /// Event channel capacity
    pub event_buffer: usize,
    /// Whole-run deadline in seconds
    pub run_timeout_seconds: Option<u64>,
}

impl Default for FileOrchestrationConfig {
    fn default() -> Self {
        Self {
            event_buffer: DEFAULT_EVENT_BUFFER,
            run_timeout_seconds: None,
        }
    }
}

impl FileOrchestrationConfig {
    pub fn to_params(&self) -> OrchestrationParams {
        OrchestrationParams::default()
            .with_event_buffer(self.event_buffer)
            .with_run_timeout_seconds(self.run_timeout_seconds)
    }
}
