//! Conversation orchestrator use case.
//!
//! [`ChatSession`] owns the conversation list and the currently selected
//! conversation, and sequences create -> select -> send -> stream ->
//! finalize. It enforces a single in-flight send per conversation and folds
//! stream events into the trailing assistant message via the domain reducer.

use crate::ports::council_gateway::{CouncilGateway, GatewayError};
use crate::ports::session_observer::SessionObserver;
use crate::ports::transcript_logger::{NoTranscript, TranscriptEvent, TranscriptLogger};
use council_domain::{
    Conversation, ConversationSummary, CouncilEvent, ReducerEffect, reduce,
};
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Errors surfaced by orchestrator operations that callers must handle.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("No conversation selected")]
    NoConversation,

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Orchestrates conversations against a council backend.
pub struct ChatSession<G: CouncilGateway> {
    gateway: Arc<G>,
    transcript: Arc<dyn TranscriptLogger>,
    conversations: Vec<ConversationSummary>,
    current: Option<Conversation>,
    in_flight: HashSet<String>,
}

impl<G: CouncilGateway> ChatSession<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            transcript: Arc::new(NoTranscript),
            conversations: Vec::new(),
            current: None,
            in_flight: HashSet::new(),
        }
    }

    /// Record the deliberation transcript through the given logger.
    pub fn with_transcript(mut self, transcript: Arc<dyn TranscriptLogger>) -> Self {
        self.transcript = transcript;
        self
    }

    /// Cached conversation summaries (from the last refresh).
    pub fn conversations(&self) -> &[ConversationSummary] {
        &self.conversations
    }

    /// The currently selected conversation, if any.
    pub fn current(&self) -> Option<&Conversation> {
        self.current.as_ref()
    }

    /// Whether a send is in flight for `conversation_id`.
    pub fn is_sending(&self, conversation_id: &str) -> bool {
        self.in_flight.contains(conversation_id)
    }

    /// Re-fetch the conversation list from the backend.
    pub async fn refresh_conversations(
        &mut self,
    ) -> Result<&[ConversationSummary], GatewayError> {
        self.conversations = self.gateway.list_conversations().await?;
        Ok(&self.conversations)
    }

    /// Create a conversation on the backend and select it.
    pub async fn new_conversation(&mut self) -> Result<&Conversation, GatewayError> {
        let conversation = self.gateway.create_conversation().await?;
        info!("Created conversation {}", conversation.id);

        // Keep the cached list in step; a stale list is not worth failing
        // the creation over.
        if let Err(e) = self.refresh_conversations().await {
            warn!("Failed to refresh conversation list: {}", e);
        }

        Ok(self.current.insert(conversation))
    }

    /// Fetch a conversation with its history and make it current.
    pub async fn select_conversation(&mut self, id: &str) -> Result<&Conversation, GatewayError> {
        let conversation = self.gateway.get_conversation(id).await?;
        debug!("Selected conversation {}", conversation.id);
        Ok(self.current.insert(conversation))
    }

    /// Send `content` on the current conversation and drive the reply stream
    /// to its terminal event.
    ///
    /// Whitespace-only content and double-sends are rejected silently: no
    /// network call, no state change. Every other failure is caught and
    /// logged here; the assistant message keeps whatever partial state the
    /// stream reached, and the in-flight flag is always released so the user
    /// can retry.
    pub async fn send_message(&mut self, content: &str, observer: &dyn SessionObserver) {
        if content.trim().is_empty() {
            return;
        }

        let Some(conversation_id) = self.current.as_ref().map(|c| c.id.clone()) else {
            warn!("Failed to send message: no conversation selected");
            return;
        };

        if !self.in_flight.insert(conversation_id.clone()) {
            debug!("Send already in flight for conversation {}", conversation_id);
            return;
        }

        if let Err(e) = self.drive_send(&conversation_id, content, observer).await {
            error!("Failed to send message: {}", e);
        }

        self.in_flight.remove(&conversation_id);
        observer.on_send_finished(&conversation_id);
    }

    /// Non-streaming variant over the blocking endpoint: one request, one
    /// fully-populated assistant message.
    pub async fn send_message_blocking(&mut self, content: &str) -> Result<(), SessionError> {
        if content.trim().is_empty() {
            return Ok(());
        }

        let Some(conversation_id) = self.current.as_ref().map(|c| c.id.clone()) else {
            return Err(SessionError::NoConversation);
        };

        if !self.in_flight.insert(conversation_id.clone()) {
            debug!("Send already in flight for conversation {}", conversation_id);
            return Ok(());
        }

        let result = self.gateway.send_message(&conversation_id, content).await;
        self.in_flight.remove(&conversation_id);
        let message = result?;

        if let Some(conversation) = self.current.as_mut() {
            conversation.push_user(content);
            conversation
                .messages
                .push(council_domain::Message::Assistant(message.completed()));
        }

        Ok(())
    }

    /// One full streaming exchange: optimistic append, stream open, fold.
    async fn drive_send(
        &mut self,
        conversation_id: &str,
        content: &str,
        observer: &dyn SessionObserver,
    ) -> Result<(), GatewayError> {
        if let Some(conversation) = self.current.as_mut() {
            conversation.push_user(content);
            conversation.push_assistant_placeholder();
        }
        self.transcript.log(TranscriptEvent::new(
            "user_message",
            serde_json::json!({ "conversation_id": conversation_id, "content": content }),
        ));

        let mut stream = self
            .gateway
            .open_message_stream(conversation_id, content)
            .await?;

        while let Some(event) = stream.next_event().await {
            self.transcript.log(TranscriptEvent::new(
                event.type_name(),
                serde_json::to_value(&event).unwrap_or(serde_json::Value::Null),
            ));

            match self.apply_event(event) {
                Some(ReducerEffect::TitleAssigned(title)) => {
                    if let Some(conversation) = self.current.as_mut() {
                        conversation.title = title.clone();
                    }
                    // Titles are only known server-side; pick up the new one.
                    match self.refresh_conversations().await {
                        Ok(summaries) => observer.on_conversation_list_updated(summaries),
                        Err(e) => warn!("Failed to refresh conversation list: {}", e),
                    }
                    observer.on_title_assigned(conversation_id, &title);
                }
                Some(ReducerEffect::Finished) => {
                    self.notify_assistant(conversation_id, observer);
                    break;
                }
                Some(ReducerEffect::Failed(message)) => {
                    error!("Council stream error: {}", message);
                    observer.on_stream_error(conversation_id, &message);
                    self.notify_assistant(conversation_id, observer);
                    break;
                }
                None => self.notify_assistant(conversation_id, observer),
            }
        }

        Ok(())
    }

    /// Fold one event into the trailing assistant message.
    fn apply_event(&mut self, event: CouncilEvent) -> Option<ReducerEffect> {
        let conversation = self.current.as_mut()?;
        let slot = conversation.last_assistant_mut()?;
        let (next, effect) = reduce(std::mem::take(slot), event);
        *slot = next;
        effect
    }

    fn notify_assistant(&self, conversation_id: &str, observer: &dyn SessionObserver) {
        if let Some(message) = self.current.as_ref().and_then(Conversation::last_assistant) {
            observer.on_assistant_updated(conversation_id, message);
        }
    }
}
