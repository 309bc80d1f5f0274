//! Caller side of the relay endpoint
//!
//! Maps relay responses and transport failures back into [`RelayError`] so
//! the session sees one error taxonomy whichever side failed.

use crate::api::{ChatRequest, ChatResponse, ErrorResponse};
use crate::llm::{ChatMessage, RelayError, UPSTREAM_ERROR_MESSAGE};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

pub const DEFAULT_RELAY_URL: &str = "http://127.0.0.1:8000/chat";

/// Something that can turn a transcript into the assistant's reply
#[async_trait]
pub trait RelayClient: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, RelayError>;
}

/// Relay client speaking JSON over HTTP
#[derive(Clone)]
pub struct HttpRelayClient {
    client: Client,
    url: String,
}

impl HttpRelayClient {
    pub fn new(url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(300))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            url: url.into(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(std::env::var("CHAT_RELAY_URL").unwrap_or_else(|_| DEFAULT_RELAY_URL.to_string()))
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl RelayClient for HttpRelayClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, RelayError> {
        let request = ChatRequest {
            messages: messages.to_vec(),
        };

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| RelayError::network(format!("Could not reach relay: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RelayError::network(format!("Failed to read relay response: {e}")))?;

        if status.is_success() {
            let parsed: ChatResponse = serde_json::from_str(&body)
                .map_err(|e| RelayError::network(format!("Unexpected relay response: {e}")))?;
            return Ok(parsed.message);
        }

        Err(match status {
            StatusCode::TOO_MANY_REQUESTS => RelayError::rate_limited(),
            StatusCode::PAYMENT_REQUIRED => RelayError::payment_required(),
            _ => {
                let message = serde_json::from_str::<ErrorResponse>(&body)
                    .map_or_else(|_| UPSTREAM_ERROR_MESSAGE.to_string(), |e| e.error);
                RelayError::upstream(message)
            }
        })
    }
}
