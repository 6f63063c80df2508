//! Conversation domain entities.

use crate::stream::reducer::AssistantMessage;
use serde::{Deserialize, Serialize};

/// Summary row returned by the conversation list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub id: String,
    pub title: String,
    /// Server-side creation timestamp, carried verbatim.
    pub created_at: String,
    #[serde(default)]
    pub message_count: u32,
}

/// A message in a conversation, tagged by role on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Message {
    User { content: String },
    Assistant(AssistantMessage),
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Message::User {
            content: content.into(),
        }
    }

    pub fn as_assistant(&self) -> Option<&AssistantMessage> {
        match self {
            Message::Assistant(message) => Some(message),
            Message::User { .. } => None,
        }
    }
}

/// A council conversation: server-assigned identity plus ordered messages.
///
/// The client only ever appends messages or folds events into the last one;
/// conversations are never deleted here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl Conversation {
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(Message::user(content));
    }

    /// Append an empty assistant message ready to fold stream events.
    pub fn push_assistant_placeholder(&mut self) {
        self.messages
            .push(Message::Assistant(AssistantMessage::new()));
    }

    /// The trailing assistant message, when the last message is one.
    pub fn last_assistant_mut(&mut self) -> Option<&mut AssistantMessage> {
        match self.messages.last_mut() {
            Some(Message::Assistant(message)) => Some(message),
            _ => None,
        }
    }

    /// The trailing assistant message, read-only.
    pub fn last_assistant(&self) -> Option<&AssistantMessage> {
        self.messages.last().and_then(Message::as_assistant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_tag_by_role() {
        let user = Message::user("hello");
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["role"], "user");
        assert_eq!(json["content"], "hello");

        let assistant = Message::Assistant(AssistantMessage::new());
        let json = serde_json::to_value(&assistant).unwrap();
        assert_eq!(json["role"], "assistant");
    }

    #[test]
    fn history_with_assistant_fields_deserializes() {
        let json = serde_json::json!({
            "id": "conv-1",
            "title": "Test",
            "created_at": "2025-01-01T00:00:00",
            "messages": [
                { "role": "user", "content": "Q" },
                {
                    "role": "assistant",
                    "stage1": [{ "model": "m1", "response": "R1" }],
                    "stage3": { "model": "chair", "response": "Final" }
                }
            ]
        });
        let conversation: Conversation = serde_json::from_value(json).unwrap();
        assert_eq!(conversation.messages.len(), 2);
        let assistant = conversation.last_assistant().unwrap();
        assert_eq!(assistant.stage1.len(), 1);
        assert_eq!(assistant.stage3.as_ref().unwrap().response, "Final");
    }

    #[test]
    fn summary_message_count_defaults() {
        let json = serde_json::json!({
            "id": "conv-1",
            "title": "New Conversation",
            "created_at": "2025-01-01T00:00:00"
        });
        let summary: ConversationSummary = serde_json::from_value(json).unwrap();
        assert_eq!(summary.message_count, 0);
    }

    #[test]
    fn last_assistant_mut_skips_user_tail() {
        let mut conversation = Conversation {
            id: "c".to_string(),
            title: String::new(),
            created_at: String::new(),
            messages: vec![Message::user("hi")],
        };
        assert!(conversation.last_assistant_mut().is_none());
        conversation.push_assistant_placeholder();
        assert!(conversation.last_assistant_mut().is_some());
    }
}
