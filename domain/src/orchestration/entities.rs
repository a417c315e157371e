//! Orchestration domain entities

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// A completion stage of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// Concise, formal answer (or "list only" for flight queries)
    StyleA,
    /// Verbose, friendly answer (or "duration and cost" for flight queries)
    StyleB,
    /// Merges both style answers into one
    Aggregation,
}

impl Stage {
    pub fn as_str(&self) -> &str {
        match self {
            Stage::StyleA => "style_a",
            Stage::StyleB => "style_b",
            Stage::Aggregation => "aggregation",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Stage::StyleA => "stage A",
            Stage::StyleB => "stage B",
            Stage::Aggregation => "aggregation",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Lifecycle of one orchestration run
///
/// ```text
/// Received → Classifying → (ResolvingRecords) → Responding → Aggregating → Closed
/// ```
///
/// `Closed` is reachable from every state: normal completion, the early
/// "nothing found" exit, or cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunState {
    Received,
    Classifying,
    ResolvingRecords,
    Responding,
    Aggregating,
    Closed,
}

impl RunState {
    pub fn as_str(&self) -> &str {
        match self {
            RunState::Received => "received",
            RunState::Classifying => "classifying",
            RunState::ResolvingRecords => "resolving_records",
            RunState::Responding => "responding",
            RunState::Aggregating => "aggregating",
            RunState::Closed => "closed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Closed)
    }

    pub fn can_transition_to(&self, next: RunState) -> bool {
        use RunState::*;
        match (self, next) {
            (Closed, _) => false,
            (_, Closed) => true,
            (Received, Classifying) => true,
            (Classifying, ResolvingRecords) | (Classifying, Responding) => true,
            (ResolvingRecords, Responding) => true,
            (Responding, Aggregating) => true,
            _ => false,
        }
    }

    /// Move to `next`, rejecting transitions the lifecycle does not allow.
    pub fn transition(self, next: RunState) -> Result<RunState, DomainError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(DomainError::InvalidTransition {
                from: self.as_str().to_string(),
                to: next.as_str().to_string(),
            })
        }
    }
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a run ended, for logging and exit status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    /// Both stages ran and an aggregated answer was published
    Completed,
    /// Aggregation failed; the fallback concatenation was published
    CompletedWithFallback,
    /// Flight query with no usable records; one "nothing found" message published
    NothingFound,
    /// Cancelled before a terminal message was published
    Cancelled,
}

impl RunOutcome {
    /// True when a terminal message reached the stream.
    pub fn published_terminal(&self) -> bool {
        !matches!(self, RunOutcome::Cancelled)
    }
}
