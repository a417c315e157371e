//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::net::SocketAddr;
use std::path::PathBuf;

/// How the event stream is written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Progress spinner on stderr, final answer on stdout
    Text,
    /// Server-Sent-Events framing (`event:` / `data:`)
    Sse,
    /// One JSON object per event
    Json,
}

/// CLI arguments for tandem
#[derive(Parser, Debug)]
#[command(name = "tandem")]
#[command(author, version, about = "Answer a question in two styles at once and merge the answers")]
#[command(long_about = r#"
Tandem answers a query through a small concurrent pipeline:

1. Classify: flight queries are detected by keyword and turned into a filter
   (origin, destination, max price); matching flights are looked up
2. Respond: two completions run concurrently, style A (concise, formal)
   and style B (verbose, friendly)
3. Aggregate: a third completion merges both answers; if it fails, both
   answers are printed one after the other

Every step is reported as a Status event; the run ends with one Message.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./tandem.toml       Project-level config
3. ~/.config/tandem/config.toml   Global config

With --serve, tandem instead listens for `POST /api` requests (query as the
raw body) and streams each run back as Server-Sent Events. A client that
disconnects cancels its run.

Example:
  tandem "Explain quantum teleportation in simple terms"
  tandem "hay vuelos a londres?"
  tandem -o sse "flights from Madrid to Paris under $140"
  tandem --serve 0.0.0.0:8080
"#)]
pub struct Cli {
    /// The query to answer
    #[arg(required_unless_present_any = ["serve", "show_config"])]
    pub question: Option<String>,

    /// Serve `POST /api` as an SSE endpoint instead of answering one query
    #[arg(
        long,
        value_name = "ADDR",
        num_args = 0..=1,
        default_missing_value = "127.0.0.1:8080",
        conflicts_with = "question"
    )]
    pub serve: Option<SocketAddr>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Flight data file (JSON array); overrides `[store] path`
    #[arg(long, value_name = "PATH")]
    pub store: Option<PathBuf>,

    /// Cancel the run after this many seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Write every published event to a JSONL file
    #[arg(long, value_name = "PATH")]
    pub event_log: Option<PathBuf>,

    /// Also write diagnostic logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::parse_from(["tandem", "What is Rust?"]);
        assert_eq!(cli.question.as_deref(), Some("What is Rust?"));
        assert_eq!(cli.output, OutputFormat::Text);
        assert_eq!(cli.verbose, 0);
        assert!(!cli.quiet);
        assert!(cli.timeout.is_none());
        assert!(cli.serve.is_none());
    }

    #[test]
    fn test_parse_serve() {
        let cli = Cli::parse_from(["tandem", "--serve"]);
        assert_eq!(cli.serve, Some("127.0.0.1:8080".parse().unwrap()));
        assert!(cli.question.is_none());

        let cli = Cli::parse_from(["tandem", "--serve", "0.0.0.0:9000"]);
        assert_eq!(cli.serve, Some("0.0.0.0:9000".parse().unwrap()));
    }

    #[test]
    fn test_question_required_without_serve() {
        assert!(Cli::try_parse_from(["tandem"]).is_err());
        assert!(Cli::try_parse_from(["tandem", "--show-config"]).is_ok());
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::parse_from([
            "tandem",
            "-vv",
            "-o",
            "sse",
            "--timeout",
            "30",
            "--event-log",
            "run.jsonl",
            "vuelos a Roma",
        ]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.output, OutputFormat::Sse);
        assert_eq!(cli.timeout, Some(30));
        assert_eq!(cli.event_log, Some(PathBuf::from("run.jsonl")));
        assert_eq!(cli.question.as_deref(), Some("vuelos a Roma"));
    }
}
