//! Session observation port.
//!
//! The presentation layer subscribes to orchestrator progress through this
//! interface, an explicit notification channel instead of a framework
//! re-render cycle. All methods default to no-ops so implementations only
//! override what they display.

use council_domain::{AssistantMessage, ConversationSummary};

/// Callbacks fired by the orchestrator while a send is in flight.
pub trait SessionObserver: Send + Sync {
    /// A stream event was applied to the in-flight assistant message.
    fn on_assistant_updated(&self, _conversation_id: &str, _message: &AssistantMessage) {}

    /// The conversation list was re-fetched.
    fn on_conversation_list_updated(&self, _summaries: &[ConversationSummary]) {}

    /// The server assigned a title to the conversation.
    fn on_title_assigned(&self, _conversation_id: &str, _title: &str) {}

    /// The send ended (terminal event, stream close, or transport failure).
    fn on_send_finished(&self, _conversation_id: &str) {}

    /// The producer reported a stream-level error.
    fn on_stream_error(&self, _conversation_id: &str, _message: &str) {}
}

/// No-op observer for headless runs and tests.
pub struct NoObserver;

impl SessionObserver for NoObserver {}
