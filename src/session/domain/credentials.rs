//! Email and password pair submitted on login.

use super::SessionDomainError;
use std::fmt;

/// Credentials submitted to the session provider.
///
/// The password is never printed by the `Debug` implementation.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    /// Validates and creates a credentials pair.
    ///
    /// The email is trimmed and must contain an `@` with text on both sides.
    /// The password is kept verbatim but must not be empty.
    ///
    /// # Errors
    ///
    /// Returns [`SessionDomainError::InvalidEmail`] or
    /// [`SessionDomainError::EmptyPassword`].
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, SessionDomainError> {
        let raw_email = email.into();
        let trimmed = raw_email.trim();
        let well_formed = trimmed
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());
        if !well_formed {
            return Err(SessionDomainError::InvalidEmail(raw_email));
        }

        let password_value = password.into();
        if password_value.is_empty() {
            return Err(SessionDomainError::EmptyPassword);
        }

        Ok(Self {
            email: trimmed.to_owned(),
            password: password_value,
        })
    }

    /// Returns the normalised email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
