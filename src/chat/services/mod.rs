//! Service layer for the chat view.

mod controller;
mod press;

pub use controller::{ChatController, SendOutcome};
pub use press::PressTimer;
