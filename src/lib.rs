//! Chat relay - a minimal chat widget backend
//!
//! A relay forwarding conversations to a hosted completion service, plus the
//! turn-taking session the widget drives it with.

// Public items are shared by the two in-tree binaries only; errors are typed
// (`RelayError`, `TransitionError`) and panics are limited to reqwest client setup.
#![allow(clippy::must_use_candidate, clippy::missing_errors_doc, clippy::missing_panics_doc)]

pub mod api;
pub mod client;
pub mod config;
pub mod llm;
pub mod persona;
pub mod relay;
pub mod session;
pub mod state_machine;
pub mod transcript;
pub mod tui;
