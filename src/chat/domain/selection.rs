//! Set of messages picked for a bulk action.

use super::{Message, MessageId};
use std::collections::BTreeSet;

/// Message identifiers selected by long-press.
///
/// Membership is keyed by id so that selections survive list reordering
/// while new messages arrive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: BTreeSet<MessageId>,
}

impl SelectionSet {
    /// Creates an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `id` if absent, removes it otherwise. Returns whether the id is
    /// selected afterwards.
    pub fn toggle(&mut self, id: &MessageId) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.clone());
            true
        }
    }

    /// Returns `true` when `id` is selected.
    #[must_use]
    pub fn contains(&self, id: &MessageId) -> bool {
        self.ids.contains(id)
    }

    /// Empties the selection.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Returns the number of selected messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` when nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns the selected identifiers.
    #[must_use]
    pub const fn ids(&self) -> &BTreeSet<MessageId> {
        &self.ids
    }

    /// Drops ids that no longer reference a message in `messages`.
    pub fn retain_present(&mut self, messages: &[Message]) {
        self.ids
            .retain(|id| messages.iter().any(|message| message.id() == id));
    }

    /// Joins the text of the selected messages in list order.
    ///
    /// Returns `None` when none of `messages` is selected.
    #[must_use]
    pub fn joined_text(&self, messages: &[Message]) -> Option<String> {
        let texts: Vec<&str> = messages
            .iter()
            .filter(|message| self.contains(message.id()))
            .map(Message::text)
            .collect();
        (!texts.is_empty()).then(|| texts.join("\n"))
    }
}
