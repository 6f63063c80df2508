//! Streaming progress display.

pub mod reporter;

pub use reporter::{SimpleProgress, StreamProgressReporter};
