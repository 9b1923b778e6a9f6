//! In-memory clipboard.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::chat::ports::{Clipboard, ClipboardError};

/// Clipboard that keeps its contents in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryClipboard {
    state: Arc<RwLock<ClipboardState>>,
}

#[derive(Debug, Default)]
struct ClipboardState {
    contents: Option<String>,
    denied: bool,
}

impl InMemoryClipboard {
    /// Creates an empty clipboard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent writes fail with [`ClipboardError::Denied`].
    pub fn set_denied(&self, denied: bool) {
        if let Ok(mut state) = self.state.write() {
            state.denied = denied;
        }
    }

    /// Returns the last text written.
    #[must_use]
    pub fn contents(&self) -> Option<String> {
        self.state.read().ok().and_then(|state| state.contents.clone())
    }
}

#[async_trait]
impl Clipboard for InMemoryClipboard {
    async fn write(&self, text: &str) -> Result<(), ClipboardError> {
        let mut state = self
            .state
            .write()
            .map_err(|err| ClipboardError::Denied(err.to_string()))?;
        if state.denied {
            return Err(ClipboardError::Denied("write permission revoked".to_owned()));
        }
        state.contents = Some(text.to_owned());
        Ok(())
    }
}
