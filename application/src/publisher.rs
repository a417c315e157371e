//! Event publisher
//!
//! [`EventPublisher`] is the single serialization point of a run: both
//! responder tasks and the orchestrator publish through clones of it, and
//! each event is delivered as one message on the underlying channel, so
//! concurrent publishes never interleave partially. Delivery and transcript
//! logging happen under one lock, so the transcript order is the stream
//! order.
//!
//! It owns no business logic, only ordering and closure:
//!
//! - once the run token is cancelled, nothing more is published;
//! - when the consumer is gone, the run token is cancelled, which stops the
//!   run as a normal (non-error) termination.

use crate::ports::event_log::{EventLogger, NoEventLogger};
use crate::ports::event_stream::EventSink;
use crate::use_cases::shared::AbortOnDrop;
use std::sync::Arc;
use tandem_domain::ProgressEvent;
use thiserror::Error;
use tokio::sync::{Mutex, mpsc};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Why an event was not published
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishError {
    #[error("Event consumer is gone")]
    Closed,

    #[error("Run cancelled")]
    Cancelled,
}

/// Publishing handle for one run
#[derive(Clone)]
pub struct EventPublisher {
    tx: mpsc::Sender<ProgressEvent>,
    token: CancellationToken,
    logger: Arc<dyn EventLogger>,
    order: Arc<Mutex<()>>,
}

impl EventPublisher {
    /// Bind a sink to the run's cancellation token.
    pub fn new(sink: EventSink, token: CancellationToken) -> Self {
        Self {
            tx: sink.tx,
            token,
            logger: Arc::new(NoEventLogger),
            order: Arc::new(Mutex::new(())),
        }
    }

    /// Record every delivered event with `logger`.
    pub fn with_logger(mut self, logger: Arc<dyn EventLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Publish one event.
    ///
    /// Waits for channel capacity, but gives up as soon as the run is
    /// cancelled. A closed channel cancels the run token.
    pub async fn publish(&self, event: ProgressEvent) -> Result<(), PublishError> {
        if self.token.is_cancelled() {
            return Err(PublishError::Cancelled);
        }

        // Held until the event is logged
        let _order = tokio::select! {
            biased;
            _ = self.token.cancelled() => return Err(PublishError::Cancelled),
            guard = self.order.lock() => guard,
        };

        let sent = tokio::select! {
            biased;
            _ = self.token.cancelled() => return Err(PublishError::Cancelled),
            sent = self.tx.send(event.clone()) => sent,
        };

        match sent {
            Ok(()) => {
                debug!("Published {}: {}", event.kind, event.payload);
                self.logger.log_event(&event);
                Ok(())
            }
            Err(_) => {
                debug!("Event consumer is gone, cancelling run");
                self.token.cancel();
                Err(PublishError::Closed)
            }
        }
    }

    /// Cancel the run as soon as the consumer drops its stream, even while
    /// no event is being published.
    ///
    /// The watcher stops when the returned guard is dropped.
    pub fn watch_consumer(&self) -> AbortOnDrop {
        let tx = self.tx.clone();
        let token = self.token.clone();
        AbortOnDrop::new(tokio::spawn(async move {
            tokio::select! {
                _ = tx.closed() => {
                    debug!("Event consumer disconnected");
                    token.cancel();
                }
                _ = token.cancelled() => {}
            }
        }))
    }
}
