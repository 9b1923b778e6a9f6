//! Configuration for an open chat view.

use crate::chat::domain::{ComposerConfig, ConversationId, TimelineOptions};
use crate::session::domain::Participants;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

const MAX_DWELL_MS: u64 = 10_000;
const MAX_DEDUP_WINDOW_MS: u64 = 86_400_000;

/// Errors raised while loading or validating a [`ChatConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid JSON for this shape.
    #[error("invalid chat configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// The long-press dwell is zero or unreasonably long.
    #[error("long-press dwell must be between 1 and {max} ms, got {actual}")]
    InvalidDwell {
        /// Configured value.
        actual: u64,
        /// Upper bound.
        max: u64,
    },

    /// The dedup window exceeds one day.
    #[error("dedup window must be at most {max} ms, got {actual}")]
    InvalidDedupWindow {
        /// Configured value.
        actual: u64,
        /// Upper bound.
        max: u64,
    },
}

/// Settings of a chat view.
///
/// Every field has a default, so a partial JSON document is enough.
///
/// # Examples
///
/// ```
/// use pairchat::chat::ChatConfig;
/// use std::time::Duration;
///
/// let config = ChatConfig::from_json_str(r#"{ "conversation_id": "ana_ben" }"#)
///     .expect("valid configuration");
/// assert_eq!(config.conversation_id.as_str(), "ana_ben");
/// assert_eq!(config.long_press_dwell(), Duration::from_millis(500));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Conversation the view subscribes to.
    pub conversation_id: ConversationId,
    /// Hold time before a press toggles selection.
    pub long_press_dwell_ms: u64,
    /// How far a stored timestamp may drift from the local send time and
    /// still confirm the in-flight message.
    pub dedup_window_ms: u64,
    /// Emit a date separator before the first message too.
    pub leading_date_separator: bool,
    /// Composer sizing.
    pub composer: ComposerConfig,
    /// Display names for the header greeting.
    pub participants: Participants,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            conversation_id: ConversationId::default(),
            long_press_dwell_ms: 500,
            dedup_window_ms: 30_000,
            leading_date_separator: false,
            composer: ComposerConfig::default(),
            participants: Participants::default(),
        }
    }
}

impl ChatConfig {
    /// Parses and validates a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDwell`] or
    /// [`ConfigError::InvalidDedupWindow`].
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.long_press_dwell_ms == 0 || self.long_press_dwell_ms > MAX_DWELL_MS {
            return Err(ConfigError::InvalidDwell {
                actual: self.long_press_dwell_ms,
                max: MAX_DWELL_MS,
            });
        }
        if self.dedup_window_ms > MAX_DEDUP_WINDOW_MS {
            return Err(ConfigError::InvalidDedupWindow {
                actual: self.dedup_window_ms,
                max: MAX_DEDUP_WINDOW_MS,
            });
        }
        Ok(())
    }

    /// Sets the conversation.
    #[must_use]
    pub fn with_conversation(mut self, conversation_id: ConversationId) -> Self {
        self.conversation_id = conversation_id;
        self
    }

    /// Sets the long-press dwell.
    #[must_use]
    pub fn with_long_press_dwell(mut self, dwell: Duration) -> Self {
        self.long_press_dwell_ms = u64::try_from(dwell.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Sets the dedup window.
    #[must_use]
    pub fn with_dedup_window(mut self, window: Duration) -> Self {
        self.dedup_window_ms = u64::try_from(window.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Sets the participant directory.
    #[must_use]
    pub fn with_participants(mut self, participants: Participants) -> Self {
        self.participants = participants;
        self
    }

    /// Enables or disables the leading date separator.
    #[must_use]
    pub const fn with_leading_date_separator(mut self, enabled: bool) -> Self {
        self.leading_date_separator = enabled;
        self
    }

    /// Returns the long-press dwell.
    #[must_use]
    pub const fn long_press_dwell(&self) -> Duration {
        Duration::from_millis(self.long_press_dwell_ms)
    }

    /// Returns the dedup window as a signed time delta.
    #[must_use]
    pub fn dedup_window(&self) -> chrono::Duration {
        i64::try_from(self.dedup_window_ms)
            .ok()
            .and_then(chrono::Duration::try_milliseconds)
            .unwrap_or_default()
    }

    /// Returns the timeline layout options.
    #[must_use]
    pub const fn timeline_options(&self) -> TimelineOptions {
        TimelineOptions {
            leading_separator: self.leading_date_separator,
        }
    }
}
