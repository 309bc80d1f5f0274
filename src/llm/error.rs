//! Relay error types

use thiserror::Error;

pub const RATE_LIMITED_MESSAGE: &str = "Rate limits exceeded, please try again later.";
pub const PAYMENT_REQUIRED_MESSAGE: &str =
    "Payment required, please add funds to your Lovable AI workspace.";
pub const UPSTREAM_ERROR_MESSAGE: &str = "AI gateway error";

/// Relay error with classification
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct RelayError {
    pub kind: RelayErrorKind,
    pub message: String,
}

impl RelayError {
    pub fn new(kind: RelayErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(RelayErrorKind::Configuration, message)
    }

    pub fn rate_limited() -> Self {
        Self::new(RelayErrorKind::RateLimited, RATE_LIMITED_MESSAGE)
    }

    pub fn payment_required() -> Self {
        Self::new(RelayErrorKind::PaymentRequired, PAYMENT_REQUIRED_MESSAGE)
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::new(RelayErrorKind::Upstream, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(RelayErrorKind::Network, message)
    }
}

/// Error classification for the relay boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelayErrorKind {
    /// Credential or config missing - fails before any network call
    Configuration,
    /// Upstream request volume exhausted (429)
    RateLimited,
    /// Upstream quota/billing exhausted (402)
    PaymentRequired,
    /// Any other upstream failure
    Upstream,
    /// Caller could not reach the relay endpoint
    Network,
}

impl RelayErrorKind {
    /// HTTP status the relay endpoint answers with
    pub fn status_code(self) -> u16 {
        match self {
            Self::RateLimited => 429,
            Self::PaymentRequired => 402,
            Self::Configuration | Self::Upstream | Self::Network => 500,
        }
    }

    /// Whether the user can sensibly resend the same message later.
    /// Billing exhaustion needs action outside the conversation first.
    pub fn is_retryable(self) -> bool {
        !matches!(self, Self::PaymentRequired | Self::Configuration)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Configuration => "configuration",
            Self::RateLimited => "rate_limited",
            Self::PaymentRequired => "payment_required",
            Self::Upstream => "upstream",
            Self::Network => "network",
        }
    }
}
