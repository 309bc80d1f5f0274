//! Events that can occur in a chat session

use crate::llm::RelayError;

/// Events that trigger state transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    // User events
    Submit { text: String },

    // Relay events
    RelaySucceeded { text: String },
    RelayFailed { error: RelayError },
}

impl Event {
    pub fn submit(text: impl Into<String>) -> Self {
        Event::Submit { text: text.into() }
    }

    /// Fold a relay outcome into the matching event
    pub fn from_relay(result: Result<String, RelayError>) -> Self {
        match result {
            Ok(text) => Event::RelaySucceeded { text },
            Err(error) => Event::RelayFailed { error },
        }
    }
}
