//! Login and logout orchestration over a session provider.

use crate::session::{
    domain::{Credentials, Session, SessionDomainError, UserId},
    ports::{AuthError, SessionProvider},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Message shown on the login screen for any failed attempt.
pub const LOGIN_FAILED_MESSAGE: &str = "Invalid credentials or network error";

/// Service-level errors for login operations.
#[derive(Debug, Error)]
pub enum LoginError {
    /// The submitted form failed local validation.
    #[error(transparent)]
    Validation(#[from] SessionDomainError),
    /// The session provider rejected the request.
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl LoginError {
    /// Returns the message to display on the login screen.
    ///
    /// Validation and provider failures are deliberately indistinguishable
    /// to the user.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        LOGIN_FAILED_MESSAGE
    }
}

/// Result type for login service operations.
pub type LoginResult<T> = Result<T, LoginError>;

/// Login orchestration service.
#[derive(Clone)]
pub struct LoginService<P>
where
    P: SessionProvider,
{
    provider: Arc<P>,
}

impl<P> LoginService<P>
where
    P: SessionProvider,
{
    /// Creates a new login service.
    #[must_use]
    pub const fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }

    /// Validates the form input and opens a session.
    ///
    /// # Errors
    ///
    /// Returns [`LoginError::Validation`] for malformed input and
    /// [`LoginError::Auth`] when the provider rejects the attempt.
    pub async fn login(&self, email: &str, password: &str) -> LoginResult<Session> {
        let credentials = Credentials::new(email, password).inspect_err(|err| {
            warn!(error = %err, "login form rejected");
        })?;

        match self.provider.authenticate(&credentials).await {
            Ok(session) => {
                debug!(user_id = %session.user_id(), "signed in");
                Ok(session)
            }
            Err(err) => {
                warn!(error = %err, "sign-in failed");
                Err(err.into())
            }
        }
    }

    /// Closes the current session.
    ///
    /// # Errors
    ///
    /// Returns [`LoginError::Auth`] when the provider fails to sign out.
    pub async fn logout(&self) -> LoginResult<()> {
        self.provider.sign_out().await.inspect_err(|err| {
            warn!(error = %err, "sign-out failed");
        })?;
        debug!("signed out");
        Ok(())
    }

    /// Returns the signed-in user, if any.
    #[must_use]
    pub fn current_user_id(&self) -> Option<UserId> {
        self.provider.current_user_id()
    }
}
