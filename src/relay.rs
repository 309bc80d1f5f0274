//! Chat relay
//!
//! Turns a transcript plus an explicitly supplied credential into either the
//! assistant's reply text or a classified [`RelayError`]. The relay owns no
//! conversation state and never retries.

use crate::llm::{ChatMessage, CompletionRequest, CompletionService, RelayError};
use crate::persona::PERSONA_PROMPT;
use std::sync::Arc;

pub struct Relay {
    service: Arc<dyn CompletionService>,
    persona: &'static str,
}

impl Relay {
    pub fn new(service: Arc<dyn CompletionService>) -> Self {
        Self::with_persona(service, PERSONA_PROMPT)
    }

    pub fn with_persona(service: Arc<dyn CompletionService>, persona: &'static str) -> Self {
        Self { service, persona }
    }

    pub fn model_id(&self) -> &str {
        self.service.model_id()
    }

    /// Forward `transcript` upstream with the persona prepended.
    ///
    /// A missing credential fails with a configuration error before any
    /// network call; `credential_name` is only used for that message.
    pub async fn complete(
        &self,
        credential: Option<&str>,
        credential_name: &str,
        transcript: &[ChatMessage],
    ) -> Result<String, RelayError> {
        let Some(api_key) = credential else {
            return Err(RelayError::configuration(format!(
                "{credential_name} is not configured"
            )));
        };

        let request = CompletionRequest {
            system: self.persona.to_string(),
            messages: transcript.to_vec(),
        };

        self.service.complete(api_key, &request).await
    }
}
