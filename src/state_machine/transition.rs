//! Pure state transition function

use super::{ChatState, Effect, Event, Notice};
use thiserror::Error;

/// Result of a state transition
#[derive(Debug, PartialEq, Eq)]
pub struct TransitionResult {
    pub new_state: ChatState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: ChatState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Errors that can occur during transition. A rejected event leaves the
/// session untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("Message is empty")]
    EmptyMessage,
    #[error("A reply is still on its way, wait for it before sending again")]
    Busy,
    #[error("No relay request is in flight")]
    NoRequestInFlight,
}

/// Pure transition function: same inputs, same outputs, no I/O.
pub fn transition(state: ChatState, event: Event) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        // Blank input is ignored whatever the state
        (_, Event::Submit { text }) if text.trim().is_empty() => Err(TransitionError::EmptyMessage),

        (ChatState::Idle, Event::Submit { text }) => Ok(TransitionResult::new(ChatState::Awaiting)
            .with_effect(Effect::append_user(text))
            .with_effect(Effect::ShowTyping)
            .with_effect(Effect::RequestRelay)),

        (ChatState::Awaiting, Event::Submit { .. }) => Err(TransitionError::Busy),

        // An empty reply would be indistinguishable from the typing placeholder
        (ChatState::Awaiting, Event::RelaySucceeded { text }) if text.is_empty() => {
            Ok(TransitionResult::new(ChatState::Idle)
                .with_effect(Effect::ClearTyping)
                .with_effect(Effect::notify(Notice::generic())))
        }

        (ChatState::Awaiting, Event::RelaySucceeded { text }) => {
            Ok(TransitionResult::new(ChatState::Idle).with_effect(Effect::append_assistant(text)))
        }

        (ChatState::Awaiting, Event::RelayFailed { error }) => {
            Ok(TransitionResult::new(ChatState::Idle)
                .with_effect(Effect::ClearTyping)
                .with_effect(Effect::notify(Notice::for_error(&error))))
        }

        (ChatState::Idle, Event::RelaySucceeded { .. } | Event::RelayFailed { .. }) => {
            Err(TransitionError::NoRequestInFlight)
        }
    }
}
