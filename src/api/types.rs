//! API request and response types

use crate::llm::ChatMessage;
use serde::{Deserialize, Serialize};

/// Transcript posted by the chat widget
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
}

/// Assistant reply
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub message: String,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
