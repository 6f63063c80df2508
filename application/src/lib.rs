//! Application layer for council-cli
//!
//! This crate contains the port definitions and the conversation
//! orchestrator use case. It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::council_gateway::{CouncilGateway, EventStreamHandle, GatewayError};
pub use ports::session_observer::{NoObserver, SessionObserver};
pub use ports::transcript_logger::{NoTranscript, TranscriptEvent, TranscriptLogger};
pub use use_cases::chat_session::{ChatSession, SessionError};
