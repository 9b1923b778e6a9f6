//! Pairchat: client core for a two-person realtime chat.
//!
//! The crate keeps the view state of a single conversation in sync with a
//! hosted document store, sends messages optimistically, supports
//! long-press multi-selection with bulk delete and copy, and formats dates
//! and times for display.
//!
//! # Architecture
//!
//! Pairchat follows hexagonal architecture principles:
//!
//! - **Domain**: Pure state and presentation logic with no I/O
//! - **Ports**: Abstract trait interfaces for the store, clipboard and
//!   identity provider
//! - **Adapters**: Concrete implementations of ports (in-memory for now)
//!
//! # Modules
//!
//! - [`session`]: Credentials, sessions and the login flow
//! - [`chat`]: Message sync, sending, selection and presentation

pub mod chat;
pub mod session;
