//! Chat session state

use std::fmt;

/// Whether a relay request is outstanding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatState {
    /// No request in flight, input accepted
    #[default]
    Idle,
    /// Exactly one request in flight, submissions rejected
    Awaiting,
}

impl ChatState {
    pub fn is_awaiting(self) -> bool {
        matches!(self, ChatState::Awaiting)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ChatState::Idle => "idle",
            ChatState::Awaiting => "awaiting",
        }
    }
}

impl fmt::Display for ChatState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
