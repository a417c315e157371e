//! Dual Respond use case
//!
//! Runs the style A and style B completions as two concurrently spawned
//! tasks sharing the run's cancellation token, then waits for both (a join
//! barrier, not a race).
//!
//! Each task publishes `Invoking …` before its call and `Got response …`
//! after it, whether the call succeeded or not. A failed call becomes an
//! error-flagged [`StyleAnswer`]; it never aborts the run. The two tasks'
//! events may interleave in any order, but all of them are published before
//! this use case returns.
//!
//! On cancellation the pending tasks are aborted (the [`JoinSet`] is dropped),
//! which drops their in-flight completion futures.

use crate::ports::completion::CompletionService;
use crate::publisher::EventPublisher;
use crate::use_cases::shared::{Cancelled, until_cancelled};
use std::collections::HashMap;
use std::sync::Arc;
use tandem_domain::{Language, ProgressEvent, PromptSubject, PromptTemplate, Stage, StyleAnswer};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Prompt plus the short framing label shown in status events
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagePrompt {
    pub prompt: String,
    pub focus: String,
}

/// Prompts for both responder stages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagePrompts {
    pub style_a: StagePrompt,
    pub style_b: StagePrompt,
}

impl StagePrompts {
    pub fn build(subject: &PromptSubject<'_>, language: Language) -> Self {
        Self {
            style_a: StagePrompt {
                prompt: PromptTemplate::style_a(subject, language),
                focus: PromptTemplate::focus(Stage::StyleA, subject).to_string(),
            },
            style_b: StagePrompt {
                prompt: PromptTemplate::style_b(subject, language),
                focus: PromptTemplate::focus(Stage::StyleB, subject).to_string(),
            },
        }
    }
}

/// Use case for answering both styles concurrently
pub struct DualRespondUseCase<C: CompletionService + 'static> {
    style_a: Arc<C>,
    style_b: Arc<C>,
}

impl<C: CompletionService + 'static> DualRespondUseCase<C> {
    pub fn new(style_a: Arc<C>, style_b: Arc<C>) -> Self {
        Self { style_a, style_b }
    }

    /// Run both stages and return `(style_a, style_b)` once both have finished.
    pub async fn run_both(
        &self,
        token: &CancellationToken,
        prompts: StagePrompts,
        publisher: &EventPublisher,
    ) -> Result<(StyleAnswer, StyleAnswer), Cancelled> {
        info!("Dispatching style A ({}) and style B ({})", self.style_a.name(), self.style_b.name());

        let mut join_set = JoinSet::new();
        let mut stages = HashMap::new();

        for (stage, service, prompt) in [
            (Stage::StyleA, Arc::clone(&self.style_a), prompts.style_a),
            (Stage::StyleB, Arc::clone(&self.style_b), prompts.style_b),
        ] {
            let publisher = publisher.clone();
            let token = token.clone();
            let handle = join_set.spawn(async move {
                respond(stage, service.as_ref(), prompt, &publisher, &token).await
            });
            stages.insert(handle.id(), stage);
        }

        let mut style_a = None;
        let mut style_b = None;

        while let Some(joined) = until_cancelled(token, join_set.join_next_with_id()).await? {
            let answer = match joined {
                Ok((_, Ok(answer))) => answer,
                Ok((_, Err(Cancelled))) => return Err(Cancelled),
                Err(e) if e.is_cancelled() => return Err(Cancelled),
                Err(e) => {
                    let Some(stage) = stages.get(&e.id()).copied() else {
                        warn!("Unknown responder task failed: {}", e);
                        continue;
                    };
                    warn!("{} task panicked: {}", stage, e);
                    publisher.publish(ProgressEvent::stage_finished(stage)).await?;
                    StyleAnswer::failure(stage, "stage task panicked")
                }
            };

            match answer.stage() {
                Stage::StyleA => style_a = Some(answer),
                Stage::StyleB => style_b = Some(answer),
                Stage::Aggregation => {}
            }
        }

        match (style_a, style_b) {
            (Some(a), Some(b)) => Ok((a, b)),
            _ => Err(Cancelled),
        }
    }
}

/// One responder task: announce, call, wrap, announce.
async fn respond<C: CompletionService + ?Sized>(
    stage: Stage,
    service: &C,
    prompt: StagePrompt,
    publisher: &EventPublisher,
    token: &CancellationToken,
) -> Result<StyleAnswer, Cancelled> {
    publisher
        .publish(ProgressEvent::stage_invoked(stage, &prompt.focus))
        .await?;
    debug!("{} prompt: {} bytes", stage, prompt.prompt.len());

    let answer = match until_cancelled(token, service.complete(&prompt.prompt)).await? {
        Ok(text) => {
            info!("{} responded ({} bytes)", stage, text.len());
            StyleAnswer::success(stage, text)
        }
        Err(e) => {
            warn!("{} failed: {}", stage, e);
            StyleAnswer::failure(stage, e.to_string())
        }
    };

    publisher.publish(ProgressEvent::stage_finished(stage)).await?;
    Ok(answer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::completion::CompletionError;
    use crate::ports::event_stream::event_channel;
    use async_trait::async_trait;
    use std::time::Duration;
    use tandem_domain::EventKind;
    use tokio::sync::Barrier;

    struct ScriptedCompletion {
        reply: Result<String, CompletionError>,
        barrier: Option<Arc<Barrier>>,
        delay: Option<Duration>,
    }

    impl ScriptedCompletion {
        fn ok(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                barrier: None,
                delay: None,
            }
        }

        fn failing(error: CompletionError) -> Self {
            Self {
                reply: Err(error),
                barrier: None,
                delay: None,
            }
        }
    }

    #[async_trait]
    impl CompletionService for ScriptedCompletion {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn complete(&self, _prompt: &str) -> Result<String, CompletionError> {
            if let Some(barrier) = &self.barrier {
                barrier.wait().await;
            }
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.reply.clone()
        }
    }

    fn prompts() -> StagePrompts {
        StagePrompts::build(&PromptSubject::Question("What is Rust?"), Language::English)
    }

    #[tokio::test]
    async fn test_both_answers_returned() {
        let (sink, stream) = event_channel(16);
        let token = CancellationToken::new();
        let publisher = EventPublisher::new(sink, token.clone());
        let use_case = DualRespondUseCase::new(
            Arc::new(ScriptedCompletion::ok("formal")),
            Arc::new(ScriptedCompletion::ok("friendly")),
        );

        let (a, b) = use_case.run_both(&token, prompts(), &publisher).await.unwrap();
        drop(publisher);

        assert_eq!(a.text(), "formal");
        assert_eq!(b.text(), "friendly");

        let events = stream.collect_all().await;
        assert_eq!(events.len(), 4);
        assert!(events.iter().all(|e| e.kind == EventKind::Status));
        assert!(events.contains(&ProgressEvent::stage_finished(Stage::StyleA)));
        assert!(events.contains(&ProgressEvent::stage_finished(Stage::StyleB)));
    }

    #[tokio::test]
    async fn test_stages_run_concurrently() {
        // Each call waits for the other: sequential execution would never finish.
        let barrier = Arc::new(Barrier::new(2));
        let make = |text: &str| ScriptedCompletion {
            reply: Ok(text.to_string()),
            barrier: Some(Arc::clone(&barrier)),
            delay: None,
        };
        let (sink, _stream) = event_channel(16);
        let token = CancellationToken::new();
        let publisher = EventPublisher::new(sink, token.clone());
        let use_case = DualRespondUseCase::new(Arc::new(make("a")), Arc::new(make("b")));

        let result = tokio::time::timeout(
            Duration::from_secs(5),
            use_case.run_both(&token, prompts(), &publisher),
        )
        .await
        .expect("stages must run concurrently");
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_failed_stage_becomes_error_answer() {
        let (sink, stream) = event_channel(16);
        let token = CancellationToken::new();
        let publisher = EventPublisher::new(sink, token.clone());
        let use_case = DualRespondUseCase::new(
            Arc::new(ScriptedCompletion::failing(CompletionError::Timeout)),
            Arc::new(ScriptedCompletion::ok("friendly")),
        );

        let (a, b) = use_case.run_both(&token, prompts(), &publisher).await.unwrap();
        drop(publisher);

        assert!(a.is_error());
        assert_eq!(a.text(), "[stage A error] Timeout");
        assert!(!b.is_error());

        // The failing stage still reports completion
        let events = stream.collect_all().await;
        assert!(events.contains(&ProgressEvent::stage_finished(Stage::StyleA)));
    }

    #[tokio::test]
    async fn test_cancellation_releases_slow_stages() {
        let slow = || ScriptedCompletion {
            reply: Ok("late".to_string()),
            barrier: None,
            delay: Some(Duration::from_secs(60)),
        };
        let (sink, _stream) = event_channel(16);
        let token = CancellationToken::new();
        let publisher = EventPublisher::new(sink, token.clone());
        let use_case = DualRespondUseCase::new(Arc::new(slow()), Arc::new(slow()));

        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            canceller.cancel();
        });

        let result = tokio::time::timeout(
            Duration::from_secs(5),
            use_case.run_both(&token, prompts(), &publisher),
        )
        .await
        .expect("cancellation must not wait for slow calls");
        assert_eq!(result, Err(Cancelled));
    }

    #[test]
    fn test_stage_prompts_for_flights() {
        let records = vec![tandem_domain::FlightRecord::new(
            "FL101",
            "Madrid",
            "Paris",
            "2025-08-10T09:00:00Z",
            "2025-08-10T11:00:00Z",
            120.0,
            50,
        )];
        let prompts = StagePrompts::build(&PromptSubject::Flights(&records), Language::English);
        assert_eq!(prompts.style_a.focus, "list available flights only");
        assert!(prompts.style_b.prompt.contains("Flight FL101"));
    }
}
