//! Infrastructure layer for council-cli
//!
//! This crate contains the adapters that implement the application-layer
//! ports: the HTTP/SSE gateway to the council backend, configuration file
//! loading, and the JSONL transcript logger.

pub mod api;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use api::client::HttpCouncilGateway;
pub use api::sse::{SseFrameParser, decode_event};
pub use config::{ConfigLoader, FileConfig, ServerConfig, TranscriptConfig};
pub use logging::{JsonlTranscriptLogger, default_transcript_path};
