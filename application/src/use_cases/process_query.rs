//! Process Query use case
//!
//! Drives one run from query to terminal message:
//!
//! ```text
//! Received → Classifying → (ResolvingRecords) → Responding → Aggregating → Closed
//! ```
//!
//! Flight queries resolve records first; when none are usable the run ends
//! early with a single "nothing found" message. Everything else answers the
//! query in both styles concurrently and aggregates the two answers.
//!
//! The run works on a child of the caller's cancellation token. That token
//! is cancelled by the caller, by the optional run deadline, or when the
//! consumer drops its [`EventStream`]. A cancelled run publishes nothing
//! further and never reports an error to its (gone) consumer.

use crate::config::OrchestrationParams;
use crate::ports::completion::CompletionService;
use crate::ports::event_log::{EventLogger, NoEventLogger};
use crate::ports::event_stream::{EventSink, EventStream, event_channel};
use crate::ports::record_store::RecordStore;
use crate::publisher::EventPublisher;
use crate::use_cases::aggregate::AggregateUseCase;
use crate::use_cases::dual_respond::{DualRespondUseCase, StagePrompts};
use crate::use_cases::resolve_records::ResolveRecordsUseCase;
use crate::use_cases::shared::{Cancelled, cancel_after, check_cancelled, until_cancelled};
use std::sync::Arc;
use tandem_domain::{
    EntityExtractor, Language, ProgressEvent, PromptSubject, Query, RunOutcome, RunState,
};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Completion services for the three stages
///
/// The stages may share one service or use one each (e.g. different models).
pub struct StageServices<C: CompletionService + 'static> {
    pub style_a: Arc<C>,
    pub style_b: Arc<C>,
    pub aggregator: Arc<C>,
}

impl<C: CompletionService + 'static> StageServices<C> {
    /// Use the same service for every stage.
    pub fn shared(service: Arc<C>) -> Self {
        Self {
            style_a: Arc::clone(&service),
            style_b: Arc::clone(&service),
            aggregator: service,
        }
    }
}

/// Input for the ProcessQuery use case
#[derive(Debug, Clone)]
pub struct ProcessQueryInput {
    /// The user's query
    pub query: Query,
    /// Caller's cancellation (e.g. connection lifetime)
    pub cancellation: CancellationToken,
}

impl ProcessQueryInput {
    pub fn new(query: Query) -> Self {
        Self {
            query,
            cancellation: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }
}

/// Use case for processing one query into an event stream
pub struct ProcessQueryUseCase<C: CompletionService + 'static, S: RecordStore + 'static> {
    responders: DualRespondUseCase<C>,
    aggregator: AggregateUseCase<C>,
    resolver: ResolveRecordsUseCase<S>,
    extractor: EntityExtractor,
    params: OrchestrationParams,
    event_logger: Arc<dyn EventLogger>,
}

impl<C: CompletionService + 'static, S: RecordStore + 'static> ProcessQueryUseCase<C, S> {
    pub fn new(services: StageServices<C>, store: Arc<S>) -> Self {
        Self {
            responders: DualRespondUseCase::new(services.style_a, services.style_b),
            aggregator: AggregateUseCase::new(services.aggregator),
            resolver: ResolveRecordsUseCase::new(store),
            extractor: EntityExtractor::default(),
            params: OrchestrationParams::default(),
            event_logger: Arc::new(NoEventLogger),
        }
    }

    /// Replace the default extraction rules.
    pub fn with_extractor(mut self, extractor: EntityExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn with_params(mut self, params: OrchestrationParams) -> Self {
        self.params = params;
        self
    }

    /// Record every published event with `logger`.
    pub fn with_event_logger(mut self, logger: Arc<dyn EventLogger>) -> Self {
        self.event_logger = logger;
        self
    }

    /// Run the query, publishing to `sink`, and report how it ended.
    ///
    /// All user-visible output goes through the sink; the returned outcome is
    /// for logging and exit status only.
    pub async fn execute(&self, input: ProcessQueryInput, sink: EventSink) -> RunOutcome {
        let token = input.cancellation.child_token();
        let publisher = EventPublisher::new(sink, token.clone())
            .with_logger(Arc::clone(&self.event_logger));

        let _consumer_watch = publisher.watch_consumer();
        let _deadline = self
            .params
            .run_timeout
            .map(|timeout| cancel_after(token.clone(), timeout));

        self.event_logger.log_run_start(&input.query);
        info!("Processing query: {}", input.query);

        match self.run(&input.query, &token, &publisher).await {
            Ok(outcome) => {
                info!("Run finished: {:?}", outcome);
                outcome
            }
            Err(Cancelled) => {
                info!("Run cancelled before its terminal message");
                RunOutcome::Cancelled
            }
        }
    }

    async fn run(
        &self,
        query: &Query,
        token: &CancellationToken,
        publisher: &EventPublisher,
    ) -> Result<RunOutcome, Cancelled> {
        check_cancelled(token)?;
        let state = advance(RunState::Received, RunState::Classifying);

        let text = query.text();
        let language = Language::detect(text);
        let is_flight_query = self.extractor.classify(text);
        debug!("Language: {}, flight query: {}", language, is_flight_query);

        let (state, records) = if is_flight_query {
            let state = advance(state, RunState::ResolvingRecords);
            let filter = self.extractor.extract(text);
            info!("Flight query, extracted {}", filter);

            match until_cancelled(token, self.resolver.execute(&filter)).await? {
                Ok(records) => (state, Some(records)),
                Err(e) => {
                    info!("No usable records ({}), ending run", e);
                    publisher.publish(ProgressEvent::nothing_found()).await?;
                    advance(state, RunState::Closed);
                    return Ok(RunOutcome::NothingFound);
                }
            }
        } else {
            (state, None)
        };

        let subject = match &records {
            Some(records) => PromptSubject::Flights(records),
            None => PromptSubject::Question(text),
        };

        let state = advance(state, RunState::Responding);
        let prompts = StagePrompts::build(&subject, language);
        let (style_a, style_b) = self.responders.run_both(token, prompts, publisher).await?;

        check_cancelled(token)?;
        let state = advance(state, RunState::Aggregating);
        let outcome = self
            .aggregator
            .aggregate(
                token,
                &style_a,
                &style_b,
                subject.is_flights(),
                language,
                publisher,
            )
            .await?;

        advance(state, RunState::Closed);
        Ok(outcome)
    }

    /// Start a run on its own task.
    ///
    /// Returns the consumer's stream and the run's handle. Dropping the
    /// stream cancels the run.
    pub fn spawn(
        self: &Arc<Self>,
        input: ProcessQueryInput,
    ) -> (EventStream, JoinHandle<RunOutcome>) {
        let (sink, stream) = event_channel(self.params.event_buffer);
        let use_case = Arc::clone(self);
        let handle = tokio::spawn(async move { use_case.execute(input, sink).await });
        (stream, handle)
    }
}

fn advance(state: RunState, next: RunState) -> RunState {
    match state.transition(next) {
        Ok(next) => {
            debug!("Run state: {} -> {}", state, next);
            next
        }
        Err(e) => {
            warn!("{}", e);
            next
        }
    }
}
