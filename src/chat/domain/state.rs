//! Client-side state of an open conversation.
//!
//! `ChatState` is the single owner of the rendered message list. Snapshot
//! delivery, send completion and bulk actions all mutate it through the
//! methods below; none of them performs I/O.

use super::{
    Composer, ComposerConfig, Message, MessageId, MessageTimestamp, SelectionSet,
    sort_chronologically,
};
use crate::session::domain::UserId;
use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeSet;
use std::fmt;

/// User-visible condition raised by a background operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatNotice {
    /// A message could not be written.
    SendFailed,
    /// A bulk delete was rejected by the store.
    DeleteFailed,
}

impl ChatNotice {
    /// Returns the alert text for the notice.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::SendFailed => "Failed to send message. Please try again.",
            Self::DeleteFailed => "Failed to delete messages. Please try again.",
        }
    }
}

impl fmt::Display for ChatNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Bookkeeping for the single write in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
struct InFlightSend {
    provisional: Message,
    started_at: DateTime<Utc>,
    known_ids: BTreeSet<MessageId>,
    confirmed_id: Option<MessageId>,
}

impl InFlightSend {
    /// Returns `true` when `candidate` is the stored copy of this send.
    fn is_confirmed_by(&self, candidate: &Message, window: Duration) -> bool {
        if let Some(confirmed) = &self.confirmed_id {
            return candidate.id() == confirmed;
        }
        if candidate.is_provisional() || self.known_ids.contains(candidate.id()) {
            return false;
        }
        let same_content = candidate.sender() == self.provisional.sender()
            && candidate.text() == self.provisional.text();
        let close_in_time = match candidate.timestamp() {
            MessageTimestamp::Pending => true,
            MessageTimestamp::Resolved(at) => (*at - self.started_at).abs() <= window,
            MessageTimestamp::Invalid(_) => false,
        };
        same_content && close_in_time
    }
}

/// Operations currently applicable to the selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AvailableActions {
    /// Bulk delete is possible.
    pub delete: bool,
    /// Copy to clipboard is possible.
    pub copy: bool,
}

/// Rendered conversation state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatState {
    messages: Vec<Message>,
    selection: SelectionSet,
    composer: Composer,
    in_flight: Option<InFlightSend>,
    notices: Vec<ChatNotice>,
    last_subscription_error: Option<String>,
    dedup_window: Duration,
}

impl ChatState {
    /// Creates an empty state.
    #[must_use]
    pub fn new(composer: ComposerConfig, dedup_window: Duration) -> Self {
        Self {
            messages: Vec::new(),
            selection: SelectionSet::new(),
            composer: Composer::new(composer),
            in_flight: None,
            notices: Vec::new(),
            last_subscription_error: None,
            dedup_window,
        }
    }

    /// Returns the rendered messages in display order.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns the selection.
    #[must_use]
    pub const fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Returns the composer.
    #[must_use]
    pub const fn composer(&self) -> &Composer {
        &self.composer
    }

    /// Returns the composer for editing.
    pub const fn composer_mut(&mut self) -> &mut Composer {
        &mut self.composer
    }

    /// Returns `true` while a write is awaiting acknowledgement.
    #[must_use]
    pub const fn has_send_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Returns the description of the most recent subscription failure.
    #[must_use]
    pub fn last_subscription_error(&self) -> Option<&str> {
        self.last_subscription_error.as_deref()
    }

    /// Replaces the list with the decoded contents of a snapshot.
    ///
    /// `messages` must already be in display order. The in-flight
    /// provisional entry is re-appended unless the snapshot already holds
    /// its stored copy, and the selection is pruned to ids still present.
    pub fn apply_snapshot(&mut self, messages: Vec<Message>) {
        self.messages = messages;
        if let Some(in_flight) = self.in_flight.as_mut() {
            let window = self.dedup_window;
            let stored = self
                .messages
                .iter()
                .find(|candidate| in_flight.is_confirmed_by(candidate, window))
                .map(|candidate| candidate.id().clone());
            match stored {
                Some(id) => in_flight.confirmed_id = Some(id),
                None => self.messages.push(in_flight.provisional.clone()),
            }
        }
        self.selection.retain_present(&self.messages);
        self.last_subscription_error = None;
    }

    /// Records a subscription failure; the list is left untouched.
    pub fn record_subscription_error(&mut self, description: impl Into<String>) {
        self.last_subscription_error = Some(description.into());
    }

    /// Inserts the optimistic entry for `text` at the end of the list.
    ///
    /// Returns `false` without changing anything when a send is already in
    /// flight.
    pub fn begin_send(&mut self, text: &str, sender: UserId, now: DateTime<Utc>) -> bool {
        if self.in_flight.is_some() {
            return false;
        }
        let provisional = Message::provisional(text, sender);
        let known_ids = self
            .messages
            .iter()
            .map(|message| message.id().clone())
            .collect();
        self.messages.push(provisional.clone());
        self.in_flight = Some(InFlightSend {
            provisional,
            started_at: now,
            known_ids,
            confirmed_id: None,
        });
        true
    }

    /// Reconciles the optimistic entry with the acknowledged write.
    ///
    /// If a snapshot already delivered the stored copy, the provisional
    /// entry is dropped; otherwise it takes the store id and `at`. When a
    /// snapshot matched a different record by content, the acknowledged
    /// message is added alongside it.
    pub fn confirm_send(&mut self, id: MessageId, at: DateTime<Utc>) {
        let Some(in_flight) = self.in_flight.take() else {
            return;
        };
        let already_listed = self
            .messages
            .iter()
            .any(|message| !message.is_provisional() && message.id() == &id);
        if already_listed {
            self.messages.retain(|message| !message.is_provisional());
        } else if let Some(slot) = self
            .messages
            .iter_mut()
            .find(|message| message.is_provisional())
        {
            *slot = in_flight.provisional.confirmed(id, at);
        } else if in_flight.confirmed_id.as_ref() != Some(&id) {
            self.messages.push(in_flight.provisional.confirmed(id, at));
        }
        sort_chronologically(&mut self.messages);
    }

    /// Drops the optimistic entry after a failed write and raises a notice.
    pub fn fail_send(&mut self) {
        self.abandon_send();
        self.notices.push(ChatNotice::SendFailed);
    }

    /// Forgets the in-flight send and drops its optimistic entry without
    /// raising a notice.
    pub fn abandon_send(&mut self) {
        self.in_flight = None;
        self.messages.retain(|message| !message.is_provisional());
    }

    /// Toggles selection of `id`.
    ///
    /// Ids absent from the list and the provisional entry cannot be
    /// selected. Returns whether `id` is selected afterwards.
    pub fn toggle_selection(&mut self, id: &MessageId) -> bool {
        let selectable = !id.is_provisional()
            && self.messages.iter().any(|message| message.id() == id);
        if selectable {
            self.selection.toggle(id)
        } else {
            self.selection.contains(id)
        }
    }

    /// Empties the selection.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Removes deleted messages and clears the selection.
    pub fn remove_messages(&mut self, ids: &BTreeSet<MessageId>) {
        self.messages.retain(|message| !ids.contains(message.id()));
        self.selection.clear();
    }

    /// Returns the selected texts joined by newlines in display order.
    #[must_use]
    pub fn selected_text(&self) -> Option<String> {
        self.selection.joined_text(&self.messages)
    }

    /// Returns which bulk actions apply to the selection.
    #[must_use]
    pub fn available_actions(&self) -> AvailableActions {
        let any = !self.selection.is_empty();
        AvailableActions {
            delete: any,
            copy: any,
        }
    }

    /// Raises a user-visible notice.
    pub fn push_notice(&mut self, notice: ChatNotice) {
        self.notices.push(notice);
    }

    /// Drains raised notices.
    pub fn take_notices(&mut self) -> Vec<ChatNotice> {
        std::mem::take(&mut self.notices)
    }
}
