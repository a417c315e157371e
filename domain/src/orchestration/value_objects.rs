//! Orchestration value objects - immutable outputs of a run.
//!
//! - [`StyleAnswer`] - one responder stage's answer, or its inline error
//! - [`ProgressEvent`] - a single entry of a run's ordered event stream
//! - [`fallback_text`] - deterministic combination used when aggregation fails

use super::entities::Stage;
use serde::{Deserialize, Serialize};

/// Answer produced by one responder stage.
///
/// A failed stage still yields an answer: its text is an inline error line
/// and [`is_error`](Self::is_error) is set, so it can take part in
/// aggregation without aborting the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleAnswer {
    stage: Stage,
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl StyleAnswer {
    pub fn success(stage: Stage, text: impl Into<String>) -> Self {
        Self {
            stage,
            text: text.into(),
            error: None,
        }
    }

    /// Wrap a stage failure as an inline error answer.
    pub fn failure(stage: Stage, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            stage,
            text: format!("[{} error] {}", stage.display_name(), message),
            error: Some(message),
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Text passed on to aggregation (the inline error line on failure).
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Tagged view: `Ok(answer)` or `Err(original error message)`.
    pub fn outcome(&self) -> Result<&str, &str> {
        match &self.error {
            None => Ok(&self.text),
            Some(message) => Err(message),
        }
    }
}

/// Deterministic combination of both answers, published when aggregation fails.
pub fn fallback_text(style_a: &StyleAnswer, style_b: &StyleAnswer) -> String {
    format!("Style A: {}\n\nStyle B: {}", style_a.text(), style_b.text())
}

/// Kind of progress event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// Intermediate progress notice
    Status,
    /// User-visible result; the terminal event of a run
    Message,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Status => "Status",
            EventKind::Message => "Message",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One event of a run's stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEvent {
    pub kind: EventKind,
    pub payload: String,
}

impl ProgressEvent {
    pub fn status(payload: impl Into<String>) -> Self {
        Self {
            kind: EventKind::Status,
            payload: payload.into(),
        }
    }

    pub fn message(payload: impl Into<String>) -> Self {
        Self {
            kind: EventKind::Message,
            payload: payload.into(),
        }
    }

    /// `Status` announcing a stage call.
    pub fn stage_invoked(stage: Stage, focus: &str) -> Self {
        if focus.is_empty() {
            Self::status(format!("Invoking {}", stage))
        } else {
            Self::status(format!("Invoking {} ({})", stage, focus))
        }
    }

    /// `Status` reporting that a stage call returned (successfully or not).
    pub fn stage_finished(stage: Stage) -> Self {
        Self::status(format!("Got response from {}", stage))
    }

    pub fn aggregation_failed() -> Self {
        Self::status("Aggregation failed, combining stage answers")
    }

    pub fn nothing_found() -> Self {
        Self::message("No flights found for your query.")
    }

    pub fn is_terminal(&self) -> bool {
        self.kind == EventKind::Message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_answer() {
        let answer = StyleAnswer::success(Stage::StyleA, "Paris.");
        assert_eq!(answer.text(), "Paris.");
        assert!(!answer.is_error());
        assert_eq!(answer.outcome(), Ok("Paris."));
    }

    #[test]
    fn test_failure_answer_is_inline() {
        let answer = StyleAnswer::failure(Stage::StyleB, "quota exceeded");
        assert!(answer.is_error());
        assert_eq!(answer.text(), "[stage B error] quota exceeded");
        assert_eq!(answer.outcome(), Err("quota exceeded"));
    }

    #[test]
    fn test_fallback_text_exact() {
        let a = StyleAnswer::success(Stage::StyleA, "short");
        let b = StyleAnswer::success(Stage::StyleB, "long and friendly");
        assert_eq!(
            fallback_text(&a, &b),
            "Style A: short\n\nStyle B: long and friendly"
        );
    }

    #[test]
    fn test_fallback_text_with_failed_stage() {
        let a = StyleAnswer::failure(Stage::StyleA, "timeout");
        let b = StyleAnswer::success(Stage::StyleB, "answer");
        assert_eq!(
            fallback_text(&a, &b),
            "Style A: [stage A error] timeout\n\nStyle B: answer"
        );
    }

    #[test]
    fn test_event_constructors() {
        assert_eq!(
            ProgressEvent::stage_invoked(Stage::StyleA, "concise, formal").payload,
            "Invoking stage A (concise, formal)"
        );
        assert_eq!(
            ProgressEvent::stage_invoked(Stage::Aggregation, "").payload,
            "Invoking aggregation"
        );
        assert_eq!(
            ProgressEvent::stage_finished(Stage::StyleB).payload,
            "Got response from stage B"
        );
        assert!(ProgressEvent::nothing_found().is_terminal());
        assert!(!ProgressEvent::aggregation_failed().is_terminal());
    }

    #[test]
    fn test_event_serializes_kind_name() {
        let json = serde_json::to_string(&ProgressEvent::status("x")).unwrap();
        assert_eq!(json, r#"{"kind":"Status","payload":"x"}"#);
    }
}
