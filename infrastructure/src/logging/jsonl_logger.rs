//! JSONL file writer for run events.
//!
//! Each record is a single JSON line with a `type` field and `timestamp`,
//! appended to the file via a buffered writer.

use serde_json::{Value, json};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tandem_application::EventLogger;
use tandem_domain::{ProgressEvent, Query};
use tracing::warn;

/// JSONL event logger that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes on `Drop`.
pub struct JsonlEventLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlEventLogger {
    /// Create a new logger writing to the given path.
    ///
    /// Creates the file (and parent directories) if they don't exist; an
    /// existing file is appended to. Returns `None` if the file cannot be
    /// opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create event log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open event log file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_record(&self, record_type: &str, mut record: Value) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        if let Value::Object(map) = &mut record {
            map.insert("type".to_string(), Value::String(record_type.to_string()));
            map.insert("timestamp".to_string(), Value::String(timestamp));
        }

        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            // JSONL is append-only; flush each line so a crash loses nothing
            let _ = writer.flush();
        }
    }
}

impl EventLogger for JsonlEventLogger {
    fn log_run_start(&self, query: &Query) {
        self.write_record("run_start", json!({ "query": query.text() }));
    }

    fn log_event(&self, event: &ProgressEvent) {
        let record = serde_json::to_value(event).unwrap_or_else(|_| json!({}));
        self.write_record("event", record);
    }
}

impl Drop for JsonlEventLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_lines(path: &Path) -> Vec<Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_jsonl_logger_writes_valid_jsonl() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.events.jsonl");
        let logger = JsonlEventLogger::new(&path).unwrap();

        logger.log_run_start(&Query::new("hay vuelos a londres?"));
        logger.log_event(&ProgressEvent::status("Invoking stage A (list available flights only)"));
        logger.log_event(&ProgressEvent::message("Two flights found."));
        drop(logger);

        let records = read_lines(&path);
        assert_eq!(records.len(), 3);
        for record in &records {
            assert!(record.get("timestamp").is_some());
        }

        assert_eq!(records[0]["type"], "run_start");
        assert_eq!(records[0]["query"], "hay vuelos a londres?");
        assert_eq!(records[1]["type"], "event");
        assert_eq!(records[1]["kind"], "Status");
        assert_eq!(records[2]["kind"], "Message");
        assert_eq!(records[2]["payload"], "Two flights found.");
    }

    #[test]
    fn test_jsonl_logger_appends_across_runs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.jsonl");

        let first = JsonlEventLogger::new(&path).unwrap();
        first.log_event(&ProgressEvent::message("first run"));
        drop(first);

        let second = JsonlEventLogger::new(&path).unwrap();
        second.log_event(&ProgressEvent::message("second run"));
        drop(second);

        let records = read_lines(&path);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["payload"], "first run");
        assert_eq!(records[1]["payload"], "second run");
    }

    #[test]
    fn test_jsonl_logger_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("logs").join("events.jsonl");

        let logger = JsonlEventLogger::new(&path).unwrap();
        assert_eq!(logger.path(), path.as_path());
        assert!(path.exists());
    }

    #[test]
    fn test_jsonl_logger_returns_none_when_path_is_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(JsonlEventLogger::new(dir.path()).is_none());
    }
}
