//! Identifier newtypes for conversations and messages.
//!
//! Both identifiers are strings owned by the document store. They are kept
//! distinct so a conversation key can never be passed where a message id is
//! expected.

use super::ChatDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

const PROVISIONAL_ID: &str = "provisional";
const DEFAULT_CONVERSATION: &str = "user1_user2";

/// Key of the message collection a chat view subscribes to.
///
/// The key is used as a single path segment of the store collection, so it
/// must be non-empty and must not contain `/`.
///
/// # Examples
///
/// ```
/// use pairchat::chat::domain::ConversationId;
///
/// let id = ConversationId::new("alice_bob").expect("valid conversation id");
/// assert_eq!(id.collection_path(), "chats/alice_bob/messages");
/// assert!(ConversationId::new("a/b").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ConversationId(String);

impl ConversationId {
    /// Creates a conversation identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ChatDomainError::InvalidConversationId`] when the value is
    /// blank or contains a path separator.
    pub fn new(value: impl Into<String>) -> Result<Self, ChatDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.contains('/') {
            return Err(ChatDomainError::InvalidConversationId(raw));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the store collection path holding this conversation's
    /// messages.
    #[must_use]
    pub fn collection_path(&self) -> String {
        format!("chats/{}/messages", self.0)
    }
}

impl Default for ConversationId {
    fn default() -> Self {
        Self(DEFAULT_CONVERSATION.to_owned())
    }
}

impl TryFrom<String> for ConversationId {
    type Error = ChatDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ConversationId> for String {
    fn from(value: ConversationId) -> Self {
        value.0
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Store-assigned identifier of a message.
///
/// A single reserved value marks the optimistic entry inserted before the
/// store has acknowledged a write; see [`MessageId::provisional`].
///
/// # Examples
///
/// ```
/// use pairchat::chat::domain::MessageId;
///
/// let id = MessageId::new("k3J9x").expect("valid message id");
/// assert!(!id.is_provisional());
/// assert!(MessageId::provisional().is_provisional());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MessageId(String);

impl MessageId {
    /// Creates a message identifier from a store-assigned value.
    ///
    /// # Errors
    ///
    /// Returns [`ChatDomainError::EmptyMessageId`] for blank values and
    /// [`ChatDomainError::ReservedMessageId`] for the provisional sentinel.
    pub fn new(value: impl Into<String>) -> Result<Self, ChatDomainError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(ChatDomainError::EmptyMessageId);
        }
        if raw == PROVISIONAL_ID {
            return Err(ChatDomainError::ReservedMessageId(raw));
        }
        Ok(Self(raw))
    }

    /// Returns the sentinel carried by the optimistic entry.
    #[must_use]
    pub fn provisional() -> Self {
        Self(PROVISIONAL_ID.to_owned())
    }

    /// Returns `true` for the provisional sentinel.
    #[must_use]
    pub fn is_provisional(&self) -> bool {
        self.0 == PROVISIONAL_ID
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for MessageId {
    type Error = ChatDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value == PROVISIONAL_ID {
            return Ok(Self(value));
        }
        Self::new(value)
    }
}

impl From<MessageId> for String {
    fn from(value: MessageId) -> Self {
        value.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
