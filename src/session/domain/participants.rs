//! Display names for the people taking part in a conversation.

use super::UserId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const DEFAULT_FALLBACK_NAME: &str = "Guest";

/// Directory mapping user identifiers to display names.
///
/// Unknown or signed-out users resolve to the fallback name.
///
/// # Examples
///
/// ```
/// use pairchat::session::domain::{Participants, UserId};
///
/// let alice = UserId::new("uid-alice").expect("valid user id");
/// let directory = Participants::default().with_name(alice.clone(), "Alice");
///
/// assert_eq!(directory.display_name(Some(&alice)), "Alice");
/// assert_eq!(directory.display_name(None), "Guest");
/// assert_eq!(directory.greeting(Some(&alice)), "Hello, Alice");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Participants {
    names: BTreeMap<UserId, String>,
    fallback: String,
}

impl Participants {
    /// Creates an empty directory with the given fallback name.
    #[must_use]
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            names: BTreeMap::new(),
            fallback: fallback.into(),
        }
    }

    /// Adds or replaces the display name of a user.
    #[must_use]
    pub fn with_name(mut self, user_id: UserId, name: impl Into<String>) -> Self {
        self.names.insert(user_id, name.into());
        self
    }

    /// Resolves a display name, falling back for unknown users.
    #[must_use]
    pub fn display_name(&self, user_id: Option<&UserId>) -> &str {
        user_id
            .and_then(|id| self.names.get(id))
            .map_or(self.fallback.as_str(), String::as_str)
    }

    /// Builds the chat header greeting for a user.
    #[must_use]
    pub fn greeting(&self, user_id: Option<&UserId>) -> String {
        format!("Hello, {}", self.display_name(user_id))
    }

    /// Returns the number of named participants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` when no participant has a display name.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for Participants {
    fn default() -> Self {
        Self::new(DEFAULT_FALLBACK_NAME)
    }
}
