//! Consumers that drain a run's event stream

use crate::output::encoder::EventEncoder;
use crate::progress::reporter::StatusReporter;
use futures::StreamExt;
use std::io::{self, Write};
use tandem_application::EventStream;
use tandem_domain::{EventKind, ProgressEvent};

/// Write every event to `out` with `encoder`, flushing after each one.
///
/// Returns the terminal message, if the run published one. A write error
/// drops the stream, which cancels the run.
pub async fn write_encoded<W: Write>(
    stream: EventStream,
    encoder: &dyn EventEncoder,
    out: &mut W,
) -> io::Result<Option<ProgressEvent>> {
    let mut events = Box::pin(stream.into_stream());
    let mut terminal = None;

    while let Some(event) = events.next().await {
        out.write_all(encoder.encode(&event).as_bytes())?;
        out.flush()?;
        if event.kind == EventKind::Message {
            terminal = Some(event);
        }
    }

    Ok(terminal)
}

/// Feed `Status` events to `reporter` and return the terminal message.
pub async fn render_console(
    stream: EventStream,
    reporter: &dyn StatusReporter,
) -> Option<ProgressEvent> {
    let mut events = Box::pin(stream.into_stream());
    let mut terminal = None;

    while let Some(event) = events.next().await {
        match event.kind {
            EventKind::Status => reporter.on_status(&event.payload),
            EventKind::Message => terminal = Some(event),
        }
    }

    reporter.finish(terminal.is_some());
    terminal
}
