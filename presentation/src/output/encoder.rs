//! Wire encoders for the event stream

use tandem_domain::ProgressEvent;

/// Encodes one event as a self-contained chunk of output
pub trait EventEncoder: Send + Sync {
    fn encode(&self, event: &ProgressEvent) -> String;
}

/// Server-Sent-Events framing
///
/// ```text
/// event: Status
/// data: Invoking stage A (concise, formal)
///
/// ```
///
/// Payload lines become separate `data:` lines, which SSE clients join
/// back with `\n`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SseEncoder;

impl EventEncoder for SseEncoder {
    fn encode(&self, event: &ProgressEvent) -> String {
        let mut out = format!("event: {}\n", event.kind);
        // split('\n') keeps empty lines, lines() would drop a trailing one
        for line in event.payload.split('\n') {
            out.push_str("data: ");
            out.push_str(line.strip_suffix('\r').unwrap_or(line));
            out.push('\n');
        }
        out.push('\n');
        out
    }
}

/// One JSON object per line: `{"kind":"Status","payload":"..."}`
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonLinesEncoder;

impl EventEncoder for JsonLinesEncoder {
    fn encode(&self, event: &ProgressEvent) -> String {
        let json = serde_json::to_string(event).unwrap_or_else(|_| "{}".to_string());
        format!("{}\n", json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sse_single_line() {
        let encoded = SseEncoder.encode(&ProgressEvent::status("Invoking stage A (concise, formal)"));
        assert_eq!(
            encoded,
            "event: Status\ndata: Invoking stage A (concise, formal)\n\n"
        );
    }

    #[test]
    fn test_sse_multi_line_payload() {
        let encoded = SseEncoder.encode(&ProgressEvent::message("Style A: short\n\nStyle B: long"));
        assert_eq!(
            encoded,
            "event: Message\ndata: Style A: short\ndata: \ndata: Style B: long\n\n"
        );
    }

    #[test]
    fn test_sse_crlf_payload() {
        let encoded = SseEncoder.encode(&ProgressEvent::message("one\r\ntwo"));
        assert_eq!(encoded, "event: Message\ndata: one\ndata: two\n\n");
    }

    #[test]
    fn test_json_lines() {
        let encoded = JsonLinesEncoder.encode(&ProgressEvent::message("line one\nline two"));
        assert_eq!(
            encoded,
            "{\"kind\":\"Message\",\"payload\":\"line one\\nline two\"}\n"
        );
        assert_eq!(encoded.matches('\n').count(), 1);
    }
}
