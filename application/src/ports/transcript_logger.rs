//! Port for structured deliberation transcript logging.
//!
//! Separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, while this port captures the machine-readable
//! record of a deliberation (outgoing messages and every stream event).

use serde_json::Value;

/// A structured transcript event.
///
/// Each event has a type string and a JSON payload; the adapter stamps the
/// timestamp when the record is written.
pub struct TranscriptEvent {
    /// Event type identifier (e.g., "user_message", "stage1_complete").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl TranscriptEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for recording transcript events.
///
/// The `log` method is intentionally synchronous and non-fallible so that
/// logging can never disturb a send; adapters swallow their own failures.
pub trait TranscriptLogger: Send + Sync {
    fn log(&self, event: TranscriptEvent);
}

/// No-op implementation for tests and when transcripts are disabled.
pub struct NoTranscript;

impl TranscriptLogger for NoTranscript {
    fn log(&self, _event: TranscriptEvent) {}
}
