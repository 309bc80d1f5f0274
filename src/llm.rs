//! Upstream completion service abstraction
//!
//! The relay talks to an OpenAI-compatible chat-completions gateway. The
//! service trait keeps the HTTP transport swappable for tests.

mod error;
mod gateway;
mod types;

pub use error::{
    RelayError, RelayErrorKind, PAYMENT_REQUIRED_MESSAGE, RATE_LIMITED_MESSAGE,
    UPSTREAM_ERROR_MESSAGE,
};
pub use gateway::{GatewayService, DEFAULT_GATEWAY_URL, DEFAULT_MODEL};
pub use types::*;

use async_trait::async_trait;
use std::sync::Arc;

/// Common interface for completion providers
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Make a single non-streaming completion request and return the reply text
    async fn complete(&self, api_key: &str, request: &CompletionRequest)
        -> Result<String, RelayError>;

    /// Get the upstream model name
    fn model_id(&self) -> &str;
}

/// Logging wrapper for completion services
pub struct LoggingService {
    inner: Arc<dyn CompletionService>,
    model_id: String,
}

impl LoggingService {
    pub fn new(inner: Arc<dyn CompletionService>) -> Self {
        let model_id = inner.model_id().to_string();
        Self { inner, model_id }
    }
}

#[async_trait]
impl CompletionService for LoggingService {
    async fn complete(
        &self,
        api_key: &str,
        request: &CompletionRequest,
    ) -> Result<String, RelayError> {
        let start = std::time::Instant::now();
        let result = self.inner.complete(api_key, request).await;
        let duration = start.elapsed();

        match &result {
            Ok(reply) => {
                tracing::info!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    messages = request.messages.len(),
                    reply_chars = reply.chars().count(),
                    "Completion request finished"
                );
            }
            Err(e) => {
                tracing::error!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    error = %e.message,
                    kind = e.kind.as_str(),
                    "Completion request failed"
                );
            }
        }

        result
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}
