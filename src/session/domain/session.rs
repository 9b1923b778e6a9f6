//! Authenticated session value.

use super::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// An authenticated session returned by the session provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    user_id: UserId,
    email: String,
    signed_in_at: DateTime<Utc>,
}

impl Session {
    /// Creates a session stamped with the clock's current time.
    #[must_use]
    pub fn new(user_id: UserId, email: impl Into<String>, clock: &impl Clock) -> Self {
        Self {
            user_id,
            email: email.into(),
            signed_in_at: clock.utc(),
        }
    }

    /// Returns the authenticated user.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the email the session was opened with.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns when the session was opened.
    #[must_use]
    pub const fn signed_in_at(&self) -> DateTime<Utc> {
        self.signed_in_at
    }
}
