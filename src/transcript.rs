//! In-memory transcript store for one chat session

use crate::llm::{ChatMessage, MessageRole};
use std::fmt;

/// Display identity of a turn, increasing in insertion order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TurnId(u64);

impl fmt::Display for TurnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "turn-{}", self.0)
    }
}

/// One message in the conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub id: TurnId,
    pub role: MessageRole,
    pub content: String,
}

impl Turn {
    /// Empty assistant turn shown while a reply is pending
    pub fn is_placeholder(&self) -> bool {
        self.role == MessageRole::Assistant && self.content.is_empty()
    }

    pub fn to_message(&self) -> ChatMessage {
        ChatMessage::new(self.role, self.content.clone())
    }
}

/// Ordered, append-only sequence of turns
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    turns: Vec<Turn>,
    typing: Option<Turn>,
    next_id: u64,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transcript seeded with a single assistant turn
    pub fn with_welcome(text: impl Into<String>) -> Self {
        let mut transcript = Self::new();
        transcript.append(MessageRole::Assistant, text);
        transcript
    }

    fn allocate_id(&mut self) -> TurnId {
        let id = TurnId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Append a turn at the end. A pending typing placeholder is dropped.
    pub fn append(&mut self, role: MessageRole, content: impl Into<String>) -> &Turn {
        self.typing = None;
        let id = self.allocate_id();
        self.turns.push(Turn {
            id,
            role,
            content: content.into(),
        });
        &self.turns[self.turns.len() - 1]
    }

    /// Show the transient "assistant is typing" turn
    pub fn show_typing(&mut self) {
        if self.typing.is_none() {
            let id = self.allocate_id();
            self.typing = Some(Turn {
                id,
                role: MessageRole::Assistant,
                content: String::new(),
            });
        }
    }

    pub fn clear_typing(&mut self) {
        self.typing = None;
    }

    pub fn is_typing(&self) -> bool {
        self.typing.is_some()
    }

    /// Appended turns in insertion order, excluding the placeholder
    pub fn snapshot(&self) -> Vec<ChatMessage> {
        self.turns.iter().map(Turn::to_message).collect()
    }

    /// Everything the message list should render, placeholder last
    pub fn display(&self) -> Vec<&Turn> {
        self.turns.iter().chain(self.typing.as_ref()).collect()
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
