//! System clipboard port.

use async_trait::async_trait;
use thiserror::Error;

/// Clipboard contract.
#[async_trait]
pub trait Clipboard: Send + Sync {
    /// Replaces the clipboard contents with `text`.
    ///
    /// # Errors
    ///
    /// Returns [`ClipboardError`] when the platform refuses the write.
    async fn write(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Errors raised by clipboard implementations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClipboardError {
    /// No clipboard is available in this environment.
    #[error("clipboard unavailable")]
    Unavailable,

    /// The platform denied access.
    #[error("clipboard access denied: {0}")]
    Denied(String),
}
