//! Port trait definitions for the chat subsystem.
//!
//! Ports define the capabilities the chat view needs from the hosted
//! backend and the platform. They are injected into
//! [`crate::chat::services::ChatController`] rather than reached through
//! globals.

pub mod clipboard;
pub mod message_store;

pub use clipboard::{Clipboard, ClipboardError};
pub use message_store::{MessageStore, Subscription, SubscriptionError, WriteError, WriteResult};
