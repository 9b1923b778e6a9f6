//! Pending input of the message composer and its auto-grow height.

use serde::{Deserialize, Serialize};

/// Sizing rules for the composer input surface.
///
/// # Examples
///
/// ```
/// use pairchat::chat::domain::ComposerConfig;
///
/// let config = ComposerConfig::default();
/// assert_eq!(config.min_height_px, 40);
/// assert_eq!(config.max_height_px, 200);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposerConfig {
    /// Smallest height of the input surface in pixels.
    pub min_height_px: u32,
    /// Largest height before the surface stops growing.
    pub max_height_px: u32,
    /// Height of one visual line.
    pub line_height_px: u32,
    /// Combined top and bottom padding.
    pub vertical_padding_px: u32,
    /// Characters per visual line before soft wrapping.
    pub wrap_columns: usize,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            min_height_px: 40,
            max_height_px: 200,
            line_height_px: 24,
            vertical_padding_px: 16,
            wrap_columns: 48,
        }
    }
}

/// Input being typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Composer {
    input: String,
    config: ComposerConfig,
}

impl Composer {
    /// Creates an empty composer.
    #[must_use]
    pub fn new(config: ComposerConfig) -> Self {
        Self {
            input: String::new(),
            config,
        }
    }

    /// Replaces the pending input and returns the new surface height.
    pub fn set_input(&mut self, input: impl Into<String>) -> u32 {
        self.input = input.into();
        self.height_px()
    }

    /// Returns the raw pending input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Returns the trimmed input, or `None` when there is nothing to send.
    #[must_use]
    pub fn pending_text(&self) -> Option<&str> {
        let trimmed = self.input.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    /// Clears the pending input.
    pub fn clear(&mut self) {
        self.input.clear();
    }

    /// Returns the number of visual lines the input occupies.
    #[must_use]
    pub fn visual_lines(&self) -> usize {
        let columns = self.config.wrap_columns.max(1);
        self.input
            .split('\n')
            .map(|line| line.chars().count().div_ceil(columns).max(1))
            .sum()
    }

    /// Returns the height the input surface should take to fit its content.
    #[must_use]
    pub fn height_px(&self) -> u32 {
        let lines = u32::try_from(self.visual_lines()).unwrap_or(u32::MAX);
        let content = lines
            .saturating_mul(self.config.line_height_px)
            .saturating_add(self.config.vertical_padding_px);
        content.clamp(
            self.config.min_height_px,
            self.config.max_height_px.max(self.config.min_height_px),
        )
    }

    /// Returns `true` once the content is taller than the maximum height.
    #[must_use]
    pub fn is_overflowing(&self) -> bool {
        let lines = u32::try_from(self.visual_lines()).unwrap_or(u32::MAX);
        lines
            .saturating_mul(self.config.line_height_px)
            .saturating_add(self.config.vertical_padding_px)
            > self.config.max_height_px
    }
}
