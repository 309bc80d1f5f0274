//! Effects produced by state transitions

use crate::llm::{MessageRole, RelayError, RelayErrorKind};

const OOPS_TITLE: &str = "Oops! 😅";
const GENERIC_DESCRIPTION: &str = "Something went wrong. Let's try that again!";

/// Effects to be executed after state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Append a turn to the transcript
    AppendTurn { role: MessageRole, content: String },

    /// Show the typing placeholder
    ShowTyping,

    /// Remove the typing placeholder without appending anything
    ClearTyping,

    /// Send the current transcript snapshot to the relay
    RequestRelay,

    /// Show a transient notification
    Notify { notice: Notice },
}

impl Effect {
    pub fn append_user(content: impl Into<String>) -> Self {
        Effect::AppendTurn {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn append_assistant(content: impl Into<String>) -> Self {
        Effect::AppendTurn {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }

    pub fn notify(notice: Notice) -> Self {
        Effect::Notify { notice }
    }
}

/// User-facing notification for a failed exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    /// The user may resend the same message as-is
    pub retryable: bool,
}

impl Notice {
    pub fn for_error(error: &RelayError) -> Self {
        let description = match error.kind {
            RelayErrorKind::RateLimited | RelayErrorKind::PaymentRequired => error.message.clone(),
            RelayErrorKind::Configuration | RelayErrorKind::Upstream | RelayErrorKind::Network => {
                GENERIC_DESCRIPTION.to_string()
            }
        };
        Self {
            title: OOPS_TITLE.to_string(),
            description,
            retryable: error.kind.is_retryable(),
        }
    }

    pub fn generic() -> Self {
        Self {
            title: OOPS_TITLE.to_string(),
            description: GENERIC_DESCRIPTION.to_string(),
            retryable: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::RATE_LIMITED_MESSAGE;

    #[test]
    fn quota_notices_carry_relay_message() {
        let notice = Notice::for_error(&RelayError::rate_limited());
        assert_eq!(notice.description, RATE_LIMITED_MESSAGE);
        assert!(notice.retryable);

        let notice = Notice::for_error(&RelayError::payment_required());
        assert!(!notice.retryable);
    }

    #[test]
    fn network_and_upstream_look_the_same() {
        let network = Notice::for_error(&RelayError::network("connection refused"));
        let upstream = Notice::for_error(&RelayError::upstream("AI gateway error"));
        assert_eq!(network, upstream);
        assert_eq!(network, Notice::generic());
    }
}
