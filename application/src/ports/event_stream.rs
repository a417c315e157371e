//! Event stream port
//!
//! The ordered channel between a run and its consumer (e.g. an HTTP
//! streaming response). [`event_channel`] creates both halves:
//!
//! - [`EventSink`] is handed to the run; the run publishes through it.
//! - [`EventStream`] is handed to the consumer, which owns wire encoding.
//!
//! The stream ends when the run finishes and every sender is dropped.
//! Dropping the [`EventStream`] tells the run its consumer is gone.

use futures::Stream;
use tandem_domain::ProgressEvent;
use tokio::sync::mpsc;

/// Default channel capacity.
pub const DEFAULT_EVENT_BUFFER: usize = 32;

/// Create a bounded event channel.
pub fn event_channel(buffer: usize) -> (EventSink, EventStream) {
    let (tx, rx) = mpsc::channel(buffer.max(1));
    (EventSink { tx }, EventStream { rx })
}

/// Sending half of a run's event channel
#[derive(Debug, Clone)]
pub struct EventSink {
    pub(crate) tx: mpsc::Sender<ProgressEvent>,
}

impl EventSink {
    /// True once the consumer dropped its [`EventStream`].
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Receiving half of a run's event channel
#[derive(Debug)]
pub struct EventStream {
    rx: mpsc::Receiver<ProgressEvent>,
}

impl EventStream {
    /// Receive the next event; `None` once the run has closed the stream.
    pub async fn recv(&mut self) -> Option<ProgressEvent> {
        self.rx.recv().await
    }

    /// Drain the stream until it is closed.
    pub async fn collect_all(mut self) -> Vec<ProgressEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.rx.recv().await {
            events.push(event);
        }
        events
    }

    /// Adapt into a [`futures::Stream`] for transport layers.
    pub fn into_stream(self) -> impl Stream<Item = ProgressEvent> + Send + 'static {
        futures::stream::unfold(self.rx, |mut rx| async move {
            rx.recv().await.map(|event| (event, rx))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[tokio::test]
    async fn test_events_arrive_in_order() {
        let (sink, stream) = event_channel(4);
        sink.tx.send(ProgressEvent::status("one")).await.unwrap();
        sink.tx.send(ProgressEvent::message("two")).await.unwrap();
        drop(sink);

        let events = stream.collect_all().await;
        assert_eq!(
            events,
            vec![ProgressEvent::status("one"), ProgressEvent::message("two")]
        );
    }

    #[tokio::test]
    async fn test_into_stream_ends_when_sink_dropped() {
        let (sink, stream) = event_channel(4);
        sink.tx.send(ProgressEvent::status("only")).await.unwrap();
        drop(sink);

        let events: Vec<_> = stream.into_stream().collect().await;
        assert_eq!(events.len(), 1);
    }

    #[tokio::test]
    async fn test_sink_sees_dropped_consumer() {
        let (sink, stream) = event_channel(4);
        assert!(!sink.is_closed());
        drop(stream);
        assert!(sink.is_closed());
    }

    #[test]
    fn test_zero_buffer_is_clamped() {
        // mpsc::channel panics on zero capacity
        let (_sink, _stream) = event_channel(0);
    }
}
