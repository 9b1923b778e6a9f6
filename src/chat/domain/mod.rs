//! Domain types for the chat subsystem.
//!
//! Everything here is synchronous and free of I/O: identifiers, the message
//! value, store record decoding, selection, the composer, presentation
//! helpers and the [`ChatState`] machine that ties them together.

mod composer;
mod error;
mod ids;
mod message;
mod presentation;
mod record;
mod selection;
mod state;

pub use composer::{Composer, ComposerConfig};
pub use error::{ChatDomainError, RecordDecodeError};
pub use ids::{ConversationId, MessageId};
pub use message::{Message, MessageTimestamp, sort_chronologically};
pub use presentation::{
    EMPTY_CONVERSATION_PLACEHOLDER, INVALID_TIME_LABEL, LOADING_LABEL, SENDING_LABEL,
    TODAY_LABEL, TimelineContext, TimelineEntry, TimelineOptions, YESTERDAY_LABEL,
    build_timeline, date_label, format_time, local_day,
};
pub use record::{
    NewRecord, SENDER_FIELD, Snapshot, StoredRecord, TEXT_FIELD, TIMESTAMP_FIELD,
    TimestampDirective, decode_timestamp,
};
pub use selection::SelectionSet;
pub use state::{AvailableActions, ChatNotice, ChatState};
