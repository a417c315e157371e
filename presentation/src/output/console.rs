//! Console output formatter for run results

use colored::Colorize;
use tandem_domain::ProgressEvent;

/// Formats a run's terminal message for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the final answer with a small header
    pub fn format_answer(question: &str, event: &ProgressEvent) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Tandem Answer"));
        output.push('\n');
        output.push_str(&format!("{} {}\n\n", "Q:".bold(), question));
        output.push_str(&event.payload);
        output.push('\n');
        output.push_str(&Self::footer());

        output
    }

    /// Plain answer text (for --quiet)
    pub fn format_plain(event: &ProgressEvent) -> String {
        format!("{}\n", event.payload)
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn footer() -> String {
        format!("{}\n", "=".repeat(60).cyan())
    }
}
