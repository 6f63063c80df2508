//! Presentation layer for council-cli
//!
//! This crate contains CLI definitions, output formatters, streaming
//! progress reporters, and the interactive chat interface.

pub mod chat;
pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use chat::ChatRepl;
pub use cli::commands::{Cli, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{SimpleProgress, StreamProgressReporter};
