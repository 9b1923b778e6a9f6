//! Service-level error type for chat operations.
//!
//! Port errors convert into [`ChatError`] with `?`, so callers can match on
//! the failing capability.

use super::config::ConfigError;
use super::ports::{ClipboardError, SubscriptionError, WriteError};
use crate::session::ports::AuthError;
use thiserror::Error;

/// Errors returned by [`crate::chat::services::ChatController`].
#[derive(Debug, Error)]
pub enum ChatError {
    /// No user is signed in, so there is no sender.
    #[error("no user is signed in")]
    NotSignedIn,

    /// A previous send has not been acknowledged yet.
    #[error("a message is already being sent")]
    SendInFlight,

    /// The configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The live query could not be opened.
    #[error(transparent)]
    Subscription(#[from] SubscriptionError),

    /// A store write failed.
    #[error(transparent)]
    Write(#[from] WriteError),

    /// The clipboard rejected the copy.
    #[error(transparent)]
    Clipboard(#[from] ClipboardError),

    /// Signing out failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// A panic poisoned the shared view state.
    #[error("chat state lock poisoned")]
    StatePoisoned,
}

/// Result type for chat controller operations.
pub type ChatResult<T> = Result<T, ChatError>;
