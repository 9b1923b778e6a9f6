//! Realtime two-party conversation.
//!
//! Messages live in a hosted document store and reach the view through a
//! live ordered subscription. Every snapshot replaces the local list; sends
//! are shown optimistically until the store acknowledges them.
//!
//! Layout follows the usual hexagonal split:
//!
//! - [`domain`]: identifiers, messages, record decoding, selection, the
//!   composer, presentation and the view state machine
//! - [`ports`]: store and clipboard contracts
//! - [`adapters`]: in-memory implementations
//! - [`services`]: the [`services::ChatController`]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use config::{ChatConfig, ConfigError};
pub use error::{ChatError, ChatResult};

#[cfg(test)]
mod tests;
