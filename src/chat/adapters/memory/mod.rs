//! In-memory adapter implementations for testing.
//!
//! These adapters provide simple, thread-safe implementations suitable for
//! unit testing without a hosted backend.

mod clipboard;
mod message_store;

pub use clipboard::InMemoryClipboard;
pub use message_store::InMemoryMessageStore;
