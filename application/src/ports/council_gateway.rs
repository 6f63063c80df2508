//! Council gateway port.
//!
//! Defines how the application layer talks to the council backend. The HTTP
//! adapter lives in the infrastructure layer.

use async_trait::async_trait;
use council_domain::{AssistantMessage, Conversation, ConversationSummary, CouncilEvent};
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors from council backend operations.
///
/// Every variant carries the operation name so the message reads as the
/// greppable failure line for that call ("Failed to send message: ...").
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The backend answered with a non-success status.
    #[error("{operation}: HTTP {status}")]
    HttpStatus {
        operation: &'static str,
        status: u16,
    },

    /// The request never completed (connect, I/O, or protocol failure).
    #[error("{operation}: {detail}")]
    Connection {
        operation: &'static str,
        detail: String,
    },

    /// The response body did not match the expected shape.
    #[error("{operation}: invalid response: {detail}")]
    Decode {
        operation: &'static str,
        detail: String,
    },
}

/// Handle for receiving decoded stream events from an in-flight send.
///
/// Wraps an `mpsc::Receiver<CouncilEvent>`. The channel closes when the
/// underlying stream ends, whether or not a terminal event was seen; the
/// consumer treats an early close as a transport failure and keeps whatever
/// state it has folded so far.
pub struct EventStreamHandle {
    receiver: mpsc::Receiver<CouncilEvent>,
}

impl EventStreamHandle {
    pub fn new(receiver: mpsc::Receiver<CouncilEvent>) -> Self {
        Self { receiver }
    }

    /// Next decoded event, or `None` once the stream is exhausted.
    pub async fn next_event(&mut self) -> Option<CouncilEvent> {
        self.receiver.recv().await
    }
}

/// Gateway to the council backend.
///
/// This port defines how the application layer reaches the deliberation
/// server. Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait CouncilGateway: Send + Sync {
    /// Fetch the conversation list.
    async fn list_conversations(&self) -> Result<Vec<ConversationSummary>, GatewayError>;

    /// Create a new, empty conversation.
    async fn create_conversation(&self) -> Result<Conversation, GatewayError>;

    /// Fetch one conversation with its full message history.
    async fn get_conversation(&self, id: &str) -> Result<Conversation, GatewayError>;

    /// Non-streaming send: blocks for the fully-populated assistant message.
    async fn send_message(
        &self,
        id: &str,
        content: &str,
    ) -> Result<AssistantMessage, GatewayError>;

    /// Streaming send: opens the SSE request and returns the event stream.
    async fn open_message_stream(
        &self,
        id: &str,
        content: &str,
    ) -> Result<EventStreamHandle, GatewayError>;
}
