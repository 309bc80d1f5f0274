//! Chat session: one transcript driven by one turn-taking state machine
//!
//! The session executes the effects the pure transition function returns.
//! Relay I/O stays with the caller so a UI can keep processing input while a
//! request is in flight; [`Session::exchange`] covers the simple
//! await-in-place case.

use crate::client::RelayClient;
use crate::llm::{ChatMessage, RelayError};
use crate::persona::WELCOME_MESSAGE;
use crate::state_machine::{transition, ChatState, Effect, Event, Notice, TransitionError};
use crate::transcript::Transcript;

/// What executing a transition asks of the caller
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Dispatch {
    /// Snapshot to send when a relay call should start
    pub relay_request: Option<Vec<ChatMessage>>,
    pub notices: Vec<Notice>,
}

#[derive(Debug, Clone)]
pub struct Session {
    transcript: Transcript,
    state: ChatState,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::with_transcript(Transcript::with_welcome(WELCOME_MESSAGE))
    }

    pub fn with_transcript(transcript: Transcript) -> Self {
        Self {
            transcript,
            state: ChatState::Idle,
        }
    }

    pub fn state(&self) -> ChatState {
        self.state
    }

    pub fn is_awaiting(&self) -> bool {
        self.state.is_awaiting()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Conversation starters are offered until the user has said anything
    pub fn show_starters(&self) -> bool {
        self.transcript.len() == 1 && !self.is_awaiting()
    }

    /// Apply one event. On error nothing has changed.
    pub fn dispatch(&mut self, event: Event) -> Result<Dispatch, TransitionError> {
        let result = transition(self.state, event)?;
        tracing::debug!(from = %self.state, to = %result.new_state, "Session transition");
        self.state = result.new_state;

        let mut dispatch = Dispatch::default();
        for effect in result.effects {
            match effect {
                Effect::AppendTurn { role, content } => {
                    self.transcript.append(role, content);
                }
                Effect::ShowTyping => self.transcript.show_typing(),
                Effect::ClearTyping => self.transcript.clear_typing(),
                Effect::RequestRelay => {
                    dispatch.relay_request = Some(self.transcript.snapshot());
                }
                Effect::Notify { notice } => dispatch.notices.push(notice),
            }
        }
        Ok(dispatch)
    }

    /// Accept a user message and return the transcript to relay
    pub fn submit(&mut self, text: &str) -> Result<Vec<ChatMessage>, TransitionError> {
        let dispatch = self.dispatch(Event::submit(text))?;
        Ok(dispatch.relay_request.unwrap_or_default())
    }

    /// Feed the outcome of the outstanding relay call back in
    pub fn resolve(
        &mut self,
        result: Result<String, RelayError>,
    ) -> Result<Option<Notice>, TransitionError> {
        let dispatch = self.dispatch(Event::from_relay(result))?;
        Ok(dispatch.notices.into_iter().next())
    }

    /// Submit and wait for the reply in one step
    pub async fn exchange(
        &mut self,
        client: &dyn RelayClient,
        text: &str,
    ) -> Result<Option<Notice>, TransitionError> {
        let messages = self.submit(text)?;
        let result = client.complete(&messages).await;
        self.resolve(result)
    }
}
