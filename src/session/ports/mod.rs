//! Port trait definitions for the session subsystem.

pub mod provider;

pub use provider::{AuthError, AuthResult, SessionProvider};
