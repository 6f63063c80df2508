//! HTTP adapter for the council backend.
//!
//! Implements the [`CouncilGateway`] port with `reqwest`. The streaming
//! endpoint hands its byte stream to a background reader task that owns the
//! response body: chunks are parsed and decoded in arrival order and the
//! resulting events are pushed through an `mpsc` channel, so the orchestrator
//! sees them exactly as they appeared on the wire. On transport failure or
//! end-of-stream the task simply closes the channel.

use crate::api::sse::{SseFrameParser, decode_event};
use async_trait::async_trait;
use council_application::ports::council_gateway::{
    CouncilGateway, EventStreamHandle, GatewayError,
};
use council_domain::{AssistantMessage, Conversation, ConversationSummary};
use futures::StreamExt;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Capacity of the channel between the reader task and the orchestrator.
const EVENT_CHANNEL_CAPACITY: usize = 32;

/// HTTP client for the council backend.
pub struct HttpCouncilGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCouncilGateway {
    /// Create a gateway for the backend at `base_url` (trailing slashes are
    /// trimmed).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Check the status and decode the JSON body of a response.
    async fn read_json<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
        operation: &'static str,
    ) -> Result<T, GatewayError> {
        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::HttpStatus {
                operation,
                status: status.as_u16(),
            });
        }

        response.json::<T>().await.map_err(|e| GatewayError::Decode {
            operation,
            detail: e.to_string(),
        })
    }

    fn connection_error(operation: &'static str) -> impl FnOnce(reqwest::Error) -> GatewayError {
        move |e| GatewayError::Connection {
            operation,
            detail: e.to_string(),
        }
    }
}

#[async_trait]
impl CouncilGateway for HttpCouncilGateway {
    async fn list_conversations(&self) -> Result<Vec<ConversationSummary>, GatewayError> {
        const OPERATION: &str = "Failed to list conversations";
        let response = self
            .client
            .get(self.url("/api/conversations"))
            .send()
            .await
            .map_err(Self::connection_error(OPERATION))?;
        Self::read_json(response, OPERATION).await
    }

    async fn create_conversation(&self) -> Result<Conversation, GatewayError> {
        const OPERATION: &str = "Failed to create conversation";
        let response = self
            .client
            .post(self.url("/api/conversations"))
            .send()
            .await
            .map_err(Self::connection_error(OPERATION))?;
        Self::read_json(response, OPERATION).await
    }

    async fn get_conversation(&self, id: &str) -> Result<Conversation, GatewayError> {
        const OPERATION: &str = "Failed to get conversation";
        let response = self
            .client
            .get(self.url(&format!("/api/conversations/{}", id)))
            .send()
            .await
            .map_err(Self::connection_error(OPERATION))?;
        Self::read_json(response, OPERATION).await
    }

    async fn send_message(
        &self,
        id: &str,
        content: &str,
    ) -> Result<AssistantMessage, GatewayError> {
        const OPERATION: &str = "Failed to send message";
        let response = self
            .client
            .post(self.url(&format!("/api/conversations/{}/message", id)))
            .json(&serde_json::json!({ "content": content }))
            .send()
            .await
            .map_err(Self::connection_error(OPERATION))?;
        Self::read_json(response, OPERATION).await
    }

    async fn open_message_stream(
        &self,
        id: &str,
        content: &str,
    ) -> Result<EventStreamHandle, GatewayError> {
        const OPERATION: &str = "Failed to send message";
        let response = self
            .client
            .post(self.url(&format!("/api/conversations/{}/message/stream", id)))
            .json(&serde_json::json!({ "content": content }))
            .send()
            .await
            .map_err(Self::connection_error(OPERATION))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::HttpStatus {
                operation: OPERATION,
                status: status.as_u16(),
            });
        }

        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let mut body = response.bytes_stream();

        // One reader task per send owns the body until it is exhausted.
        tokio::spawn(async move {
            let mut parser = SseFrameParser::new();
            while let Some(chunk) = body.next().await {
                let bytes = match chunk {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        // Mid-stream transport failure: close the channel and
                        // let the consumer keep its partial fold.
                        warn!("Council stream transport error: {}", e);
                        return;
                    }
                };
                for frame in parser.feed(&bytes) {
                    if let Some(event) = decode_event(&frame)
                        && tx.send(event).await.is_err()
                    {
                        // Receiver dropped; nobody is listening anymore.
                        return;
                    }
                }
            }
            debug!("Council stream ended");
        });

        Ok(EventStreamHandle::new(rx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed_from_the_base_url() {
        let gateway = HttpCouncilGateway::new("http://127.0.0.1:8001/");
        assert_eq!(
            gateway.url("/api/conversations"),
            "http://127.0.0.1:8001/api/conversations"
        );
    }

    #[test]
    fn paths_append_to_the_base_url() {
        let gateway = HttpCouncilGateway::new("http://council.local:9000");
        assert_eq!(
            gateway.url("/api/conversations/abc/message/stream"),
            "http://council.local:9000/api/conversations/abc/message/stream"
        );
    }
}
