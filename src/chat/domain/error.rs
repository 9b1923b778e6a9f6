//! Error types for chat domain construction and record decoding.

use thiserror::Error;

/// Errors returned while constructing chat domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChatDomainError {
    /// The conversation key is blank or contains a path separator.
    #[error("invalid conversation id '{0}'")]
    InvalidConversationId(String),

    /// The message identifier is blank.
    #[error("message id must not be empty")]
    EmptyMessageId,

    /// The value is reserved for the optimistic entry.
    #[error("message id '{0}' is reserved")]
    ReservedMessageId(String),
}

/// Errors returned while decoding a stored record into a message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecordDecodeError {
    /// A required field is absent or null.
    #[error("record {record} is missing field '{field}'")]
    MissingField {
        /// The offending record identifier.
        record: String,
        /// The missing field name.
        field: &'static str,
    },

    /// A field holds a value of the wrong shape.
    #[error("record {record} has invalid field '{field}': {reason}")]
    InvalidField {
        /// The offending record identifier.
        record: String,
        /// The invalid field name.
        field: &'static str,
        /// Description of the problem.
        reason: String,
    },
}
