//! User identifier issued by the session provider.

use super::SessionDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of an authenticated user.
///
/// The value is owned by the external session provider; this crate only
/// guarantees that it is non-empty.
///
/// # Examples
///
/// ```
/// use pairchat::session::domain::UserId;
///
/// let id = UserId::new("ZyQCmlgKlxfv").expect("valid user id");
/// assert_eq!(id.as_str(), "ZyQCmlgKlxfv");
/// assert!(UserId::new("  ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Creates a user identifier, rejecting empty values.
    ///
    /// # Errors
    ///
    /// Returns [`SessionDomainError::EmptyUserId`] when the trimmed value is
    /// empty.
    pub fn new(value: impl Into<String>) -> Result<Self, SessionDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SessionDomainError::EmptyUserId);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = SessionDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
