//! Chat message value and its store-assigned timestamp.

use super::MessageId;
use crate::session::domain::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Timestamp of a message as known to the client.
///
/// The store assigns the time on its own clock, so a freshly written
/// message is `Pending` until the write is acknowledged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum MessageTimestamp {
    /// Not yet assigned by the store.
    Pending,
    /// Assigned by the store.
    Resolved(DateTime<Utc>),
    /// Stored value that could not be coerced to an instant.
    Invalid(String),
}

impl MessageTimestamp {
    /// Returns the resolved instant, if any.
    #[must_use]
    pub const fn resolved(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Resolved(at) => Some(*at),
            Self::Pending | Self::Invalid(_) => None,
        }
    }

    /// Returns `true` while the store has not assigned a time.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    const fn rank(&self) -> u8 {
        match self {
            Self::Invalid(_) => 0,
            Self::Resolved(_) => 1,
            Self::Pending => 2,
        }
    }

    /// Orders timestamps for display: invalid values first, resolved
    /// instants ascending, pending last.
    ///
    /// Values of equal rank without an instant compare equal so a stable
    /// sort keeps the store's native order among them.
    #[must_use]
    pub fn chronological_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Resolved(a), Self::Resolved(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl From<DateTime<Utc>> for MessageTimestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Resolved(value)
    }
}

/// A single chat message.
///
/// # Examples
///
/// ```
/// use pairchat::chat::domain::{Message, MessageTimestamp};
/// use pairchat::session::domain::UserId;
///
/// let sender = UserId::new("uid-alice").expect("valid user id");
/// let message = Message::provisional("hi", sender.clone());
///
/// assert!(message.is_provisional());
/// assert_eq!(message.timestamp(), &MessageTimestamp::Pending);
/// assert!(message.is_from(&sender));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    id: MessageId,
    text: String,
    sender: UserId,
    timestamp: MessageTimestamp,
}

impl Message {
    /// Creates a message from its parts.
    #[must_use]
    pub fn new(
        id: MessageId,
        text: impl Into<String>,
        sender: UserId,
        timestamp: MessageTimestamp,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            sender,
            timestamp,
        }
    }

    /// Creates the optimistic entry shown while a write is in flight.
    #[must_use]
    pub fn provisional(text: impl Into<String>, sender: UserId) -> Self {
        Self::new(
            MessageId::provisional(),
            text,
            sender,
            MessageTimestamp::Pending,
        )
    }

    /// Returns a copy carrying the store-assigned identity.
    #[must_use]
    pub fn confirmed(&self, id: MessageId, at: DateTime<Utc>) -> Self {
        Self {
            id,
            text: self.text.clone(),
            sender: self.sender.clone(),
            timestamp: MessageTimestamp::Resolved(at),
        }
    }

    /// Returns the message identifier.
    #[must_use]
    pub const fn id(&self) -> &MessageId {
        &self.id
    }

    /// Returns the message text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the sender.
    #[must_use]
    pub const fn sender(&self) -> &UserId {
        &self.sender
    }

    /// Returns the timestamp.
    #[must_use]
    pub const fn timestamp(&self) -> &MessageTimestamp {
        &self.timestamp
    }

    /// Returns `true` for the optimistic entry.
    #[must_use]
    pub fn is_provisional(&self) -> bool {
        self.id.is_provisional()
    }

    /// Returns `true` when `user` sent this message.
    #[must_use]
    pub fn is_from(&self, user: &UserId) -> bool {
        &self.sender == user
    }
}

/// Stably sorts messages into display order.
pub fn sort_chronologically(messages: &mut [Message]) {
    messages.sort_by(|a, b| a.timestamp.chronological_cmp(&b.timestamp));
}
