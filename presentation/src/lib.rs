//! Presentation layer for tandem
//!
//! This crate contains CLI definitions, event stream encoders,
//! console formatting, progress reporters and the HTTP streaming endpoint.

pub mod cli;
pub mod output;
pub mod progress;
pub mod server;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use output::encoder::{EventEncoder, JsonLinesEncoder, SseEncoder};
pub use output::writer::{render_console, write_encoded};
pub use progress::reporter::{NoStatus, ProgressReporter, SimpleProgress, StatusReporter};
pub use server::{ServerState, router, serve};
