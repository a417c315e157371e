//! Aggregate use case
//!
//! Merges the two style answers with the aggregator completion and publishes
//! the run's terminal `Message`. If the aggregator fails (or answers with
//! nothing), the fallback concatenation is published instead, so a run that
//! reaches this stage always ends with exactly one message.

use crate::ports::completion::{CompletionError, CompletionService};
use crate::publisher::EventPublisher;
use crate::use_cases::shared::{Cancelled, until_cancelled};
use std::sync::Arc;
use tandem_domain::{
    Language, ProgressEvent, PromptTemplate, RunOutcome, Stage, StyleAnswer, fallback_text,
};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Use case for aggregating both style answers
pub struct AggregateUseCase<C: CompletionService + 'static> {
    aggregator: Arc<C>,
}

impl<C: CompletionService + 'static> AggregateUseCase<C> {
    pub fn new(aggregator: Arc<C>) -> Self {
        Self { aggregator }
    }

    /// Aggregate and publish the terminal message.
    ///
    /// Returns [`RunOutcome::Completed`] or [`RunOutcome::CompletedWithFallback`];
    /// `Err(Cancelled)` means no message was published.
    pub async fn aggregate(
        &self,
        token: &CancellationToken,
        style_a: &StyleAnswer,
        style_b: &StyleAnswer,
        flights: bool,
        language: Language,
        publisher: &EventPublisher,
    ) -> Result<RunOutcome, Cancelled> {
        publisher
            .publish(ProgressEvent::stage_invoked(Stage::Aggregation, ""))
            .await?;

        let prompt = PromptTemplate::aggregation(style_a.text(), style_b.text(), flights, language);
        let result = until_cancelled(token, self.aggregator.complete(&prompt)).await?;

        match non_empty(result) {
            Ok(text) => {
                info!("Aggregation succeeded ({} bytes)", text.len());
                publisher
                    .publish(ProgressEvent::stage_finished(Stage::Aggregation))
                    .await?;
                publisher.publish(ProgressEvent::message(text)).await?;
                Ok(RunOutcome::Completed)
            }
            Err(e) => {
                warn!("Aggregation failed, publishing fallback: {}", e);
                publisher.publish(ProgressEvent::aggregation_failed()).await?;
                publisher
                    .publish(ProgressEvent::message(fallback_text(style_a, style_b)))
                    .await?;
                Ok(RunOutcome::CompletedWithFallback)
            }
        }
    }
}

/// A blank aggregation is as useless as a failed one.
fn non_empty(result: Result<String, CompletionError>) -> Result<String, CompletionError> {
    match result {
        Ok(text) if text.trim().is_empty() => Err(CompletionError::EmptyResponse),
        other => other,
    }
}
