//! `OpenAI`-compatible AI gateway implementation

use super::types::{ChatMessage, CompletionRequest};
use super::{CompletionService, RelayError, UPSTREAM_ERROR_MESSAGE};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_GATEWAY_URL: &str = "https://ai.gateway.lovable.dev/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "google/gemini-2.5-flash";

/// Chat-completions gateway reached over HTTPS with a bearer credential
pub struct GatewayService {
    client: Client,
    url: String,
    model: String,
}

impl GatewayService {
    pub fn new(url: impl Into<String>, model: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(300))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            url: url.into(),
            model: model.into(),
        }
    }

    fn translate_request(&self, request: &CompletionRequest) -> GatewayRequest {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);

        messages.push(GatewayMessage {
            role: "system".to_string(),
            content: request.system.clone(),
        });
        messages.extend(request.messages.iter().map(translate_message));

        GatewayRequest {
            model: self.model.clone(),
            messages,
            stream: false,
        }
    }

    fn normalize_response(resp: GatewayResponse) -> Result<String, RelayError> {
        let choice = resp.choices.into_iter().next().ok_or_else(|| {
            tracing::error!("AI gateway returned no choices");
            RelayError::upstream(UPSTREAM_ERROR_MESSAGE)
        })?;

        choice.message.content.ok_or_else(|| {
            tracing::error!("AI gateway choice has no message content");
            RelayError::upstream(UPSTREAM_ERROR_MESSAGE)
        })
    }
}

fn translate_message(msg: &ChatMessage) -> GatewayMessage {
    GatewayMessage {
        role: msg.role.as_str().to_string(),
        content: msg.content.clone(),
    }
}

#[async_trait]
impl CompletionService for GatewayService {
    async fn complete(
        &self,
        api_key: &str,
        request: &CompletionRequest,
    ) -> Result<String, RelayError> {
        let gateway_request = self.translate_request(request);

        let response = self
            .client
            .post(&self.url)
            .header("Authorization", format!("Bearer {api_key}"))
            .header("Content-Type", "application/json")
            .json(&gateway_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RelayError::upstream(format!("Request timeout: {e}"))
                } else if e.is_connect() {
                    RelayError::upstream(format!("Connection failed: {e}"))
                } else {
                    RelayError::upstream(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RelayError::upstream(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(match status {
                StatusCode::TOO_MANY_REQUESTS => RelayError::rate_limited(),
                StatusCode::PAYMENT_REQUIRED => RelayError::payment_required(),
                _ => {
                    tracing::error!(status = status.as_u16(), body = %body, "AI gateway error");
                    RelayError::upstream(UPSTREAM_ERROR_MESSAGE)
                }
            });
        }

        let gateway_response: GatewayResponse = serde_json::from_str(&body).map_err(|e| {
            tracing::error!(error = %e, body = %body, "Failed to parse AI gateway response");
            RelayError::upstream(UPSTREAM_ERROR_MESSAGE)
        })?;

        Self::normalize_response(gateway_response)
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

// Gateway API types

#[derive(Debug, Serialize)]
struct GatewayRequest {
    model: String,
    messages: Vec<GatewayMessage>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct GatewayMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct GatewayResponse {
    #[serde(default)]
    choices: Vec<GatewayChoice>,
}

#[derive(Debug, Deserialize)]
struct GatewayChoice {
    message: GatewayReply,
}

#[derive(Debug, Deserialize)]
struct GatewayReply {
    #[serde(default)]
    content: Option<String>,
}
