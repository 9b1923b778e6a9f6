//! Session provider port for hosted authentication.

use crate::session::domain::{Credentials, Session, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for session provider operations.
pub type AuthResult<T> = Result<T, AuthError>;

/// Authentication contract implemented by the hosted identity service.
///
/// # Implementation Notes
///
/// Implementations must ensure:
/// - `current_user_id` reflects the most recent successful `authenticate`
/// - `current_user_id` returns `None` after `sign_out`
/// - Concurrent access is handled safely
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Authenticates a user and opens a session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] when the provider rejects
    /// the credentials, or a transport/provider error otherwise.
    async fn authenticate(&self, credentials: &Credentials) -> AuthResult<Session>;

    /// Returns the identifier of the signed-in user, if any.
    fn current_user_id(&self) -> Option<UserId>;

    /// Closes the current session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] when the provider fails to close the session.
    async fn sign_out(&self) -> AuthResult<()>;
}

/// Errors returned by session provider implementations.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The email or password was rejected.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The provider could not be reached.
    #[error("network error: {0}")]
    Network(String),

    /// Provider-side failure.
    #[error("provider error: {0}")]
    Provider(Arc<dyn std::error::Error + Send + Sync>),
}

impl AuthError {
    /// Creates a network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Wraps a provider error.
    pub fn provider(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Provider(Arc::new(err))
    }
}
