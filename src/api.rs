//! HTTP API for the chat relay

mod handlers;
mod types;

pub use handlers::create_router;
pub use types::*;

use crate::config::CredentialSource;
use crate::relay::Relay;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<Relay>,
    /// Resolved on every request, never cached
    pub credentials: CredentialSource,
}

impl AppState {
    pub fn new(relay: Relay, credentials: CredentialSource) -> Self {
        Self {
            relay: Arc::new(relay),
            credentials,
        }
    }
}
