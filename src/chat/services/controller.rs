//! Chat view controller.
//!
//! Binds one conversation's live subscription to a [`ChatState`] and runs
//! the user-facing operations against the injected ports: send, long-press
//! selection, bulk delete and copy.

use crate::chat::config::ChatConfig;
use crate::chat::domain::{
    AvailableActions, ChatNotice, ChatState, ConversationId, Message, MessageId, NewRecord,
    SelectionSet, TIMESTAMP_FIELD, TimelineContext, TimelineEntry, build_timeline,
};
use crate::chat::error::{ChatError, ChatResult};
use crate::chat::ports::{Clipboard, MessageStore, Subscription};
use crate::chat::services::press::PressTimer;
use crate::session::ports::SessionProvider;
use chrono::{DateTime, TimeZone};
use mockable::Clock;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// Result of a send request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// The trimmed text was empty; nothing happened.
    Ignored,
    /// The store accepted the message under this id.
    Sent(MessageId),
}

/// Controller for an open chat view.
///
/// View state lives behind a mutex shared with the long-press timer task.
/// Locks are never held across an `.await`.
pub struct ChatController<S, P, B, K>
where
    S: MessageStore,
    P: SessionProvider,
    B: Clipboard,
    K: Clock + Send + Sync,
{
    store: Arc<S>,
    session: Arc<P>,
    clipboard: Arc<B>,
    clock: Arc<K>,
    config: ChatConfig,
    conversation: ConversationId,
    state: Arc<Mutex<ChatState>>,
    subscription: Mutex<Option<Subscription>>,
    press: PressTimer,
}

impl<S, P, B, K> ChatController<S, P, B, K>
where
    S: MessageStore,
    P: SessionProvider,
    B: Clipboard,
    K: Clock + Send + Sync,
{
    /// Validates `config` and subscribes to its conversation ordered by
    /// timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Config`] for an invalid configuration or
    /// [`ChatError::Subscription`] when the live query cannot be opened.
    pub async fn open(
        store: Arc<S>,
        session: Arc<P>,
        clipboard: Arc<B>,
        clock: Arc<K>,
        config: ChatConfig,
    ) -> ChatResult<Self> {
        config.validate()?;
        let conversation = config.conversation_id.clone();
        let subscription = store
            .subscribe_ordered(&conversation, TIMESTAMP_FIELD)
            .await?;
        info!(conversation = %conversation, "chat view opened");
        let state = ChatState::new(config.composer, config.dedup_window());
        Ok(Self {
            store,
            session,
            clipboard,
            clock,
            config,
            conversation,
            state: Arc::new(Mutex::new(state)),
            subscription: Mutex::new(Some(subscription)),
            press: PressTimer::new(),
        })
    }

    /// Returns the open conversation.
    #[must_use]
    pub const fn conversation_id(&self) -> &ConversationId {
        &self.conversation
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// Returns `true` while the live query is attached.
    #[must_use]
    pub fn is_subscribed(&self) -> bool {
        self.subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(Subscription::is_active)
    }

    /// Applies the newest unread snapshot, then records queued
    /// subscription errors. Returns how many deliveries were applied.
    ///
    /// Snapshots replace the message list. Errors are logged and recorded;
    /// the last good list stays in place.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::StatePoisoned`] if a lock is poisoned.
    pub fn pump(&self) -> ChatResult<usize> {
        let (snapshot, errors) = {
            let mut subscription = self
                .subscription
                .lock()
                .map_err(|_| ChatError::StatePoisoned)?;
            match subscription.as_mut() {
                Some(live) => {
                    let snapshot = live.latest_snapshot();
                    let errors: Vec<_> = std::iter::from_fn(|| live.try_next_error()).collect();
                    (snapshot, errors)
                }
                None => (None, Vec::new()),
            }
        };
        if snapshot.is_none() && errors.is_empty() {
            return Ok(0);
        }

        let count = usize::from(snapshot.is_some()) + errors.len();
        let mut state = self.lock_state()?;
        if let Some(snapshot) = snapshot {
            let messages = snapshot.decode();
            debug!(
                conversation = %self.conversation,
                messages = messages.len(),
                "applying snapshot"
            );
            state.apply_snapshot(messages);
        }
        for err in errors {
            warn!(
                conversation = %self.conversation,
                error = %err,
                "subscription error; keeping last snapshot"
            );
            state.record_subscription_error(err.to_string());
        }
        Ok(count)
    }

    /// Sends `text` as the signed-in user.
    ///
    /// A provisional entry appears before the store is contacted. On
    /// success the composer is cleared and the entry takes the stored id;
    /// on failure the entry is withdrawn, the composer keeps its text and
    /// a [`ChatNotice::SendFailed`] notice is raised. Dropping the returned
    /// future before the store answers withdraws the entry without a
    /// notice.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::NotSignedIn`], [`ChatError::SendInFlight`] or
    /// [`ChatError::Write`].
    pub async fn send(&self, text: &str) -> ChatResult<SendOutcome> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(SendOutcome::Ignored);
        }
        let sender = self
            .session
            .current_user_id()
            .ok_or(ChatError::NotSignedIn)?;

        {
            let mut state = self.lock_state()?;
            if !state.begin_send(trimmed, sender.clone(), self.clock.utc()) {
                return Err(ChatError::SendInFlight);
            }
        }
        let in_flight = InFlightGuard::new(&self.state);

        let record = NewRecord::server_timed(trimmed, sender);
        let written = self.store.append(&self.conversation, record).await;
        in_flight.disarm();
        match written {
            Ok(id) => {
                let mut state = self.lock_state()?;
                state.composer_mut().clear();
                state.confirm_send(id.clone(), self.clock.utc());
                debug!(conversation = %self.conversation, message_id = %id, "message sent");
                Ok(SendOutcome::Sent(id))
            }
            Err(err) => {
                warn!(conversation = %self.conversation, error = %err, "send failed");
                self.lock_state()?.fail_send();
                Err(err.into())
            }
        }
    }

    /// Sends the composer's trimmed input; blank input is ignored.
    ///
    /// # Errors
    ///
    /// See [`Self::send`].
    pub async fn submit(&self) -> ChatResult<SendOutcome> {
        let pending = self
            .lock_state()?
            .composer()
            .pending_text()
            .map(str::to_owned);
        match pending {
            Some(text) => self.send(&text).await,
            None => Ok(SendOutcome::Ignored),
        }
    }

    /// Replaces the composer input and returns the new height in pixels.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::StatePoisoned`] if the state lock is poisoned.
    pub fn set_input(&self, text: impl Into<String>) -> ChatResult<u32> {
        Ok(self.lock_state()?.composer_mut().set_input(text))
    }

    /// Starts a long press on `id`.
    ///
    /// Selection toggles once the configured dwell elapses, unless
    /// [`Self::end_press`] or another press intervenes. Must be called
    /// inside a tokio runtime.
    pub fn begin_press(&self, id: MessageId) {
        let state = Arc::clone(&self.state);
        self.press.start(self.config.long_press_dwell(), move || {
            let Ok(mut guard) = state.lock() else {
                warn!("chat state poisoned; long press ignored");
                return;
            };
            let selected = guard.toggle_selection(&id);
            debug!(message_id = %id, selected, "long press toggled selection");
        });
    }

    /// Ends the current press. Returns `true` if it was released before
    /// the dwell elapsed.
    pub fn end_press(&self) -> bool {
        self.press.cancel()
    }

    /// Returns `true` while a press is waiting for its dwell.
    #[must_use]
    pub fn is_press_pending(&self) -> bool {
        self.press.is_pending()
    }

    /// Toggles selection of `id` immediately.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::StatePoisoned`] if the state lock is poisoned.
    pub fn toggle_selection(&self, id: &MessageId) -> ChatResult<bool> {
        Ok(self.lock_state()?.toggle_selection(id))
    }

    /// Clears the selection.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::StatePoisoned`] if the state lock is poisoned.
    pub fn clear_selection(&self) -> ChatResult<()> {
        self.lock_state()?.clear_selection();
        Ok(())
    }

    /// Deletes every selected message in one atomic batch.
    ///
    /// On failure nothing changes locally apart from a
    /// [`ChatNotice::DeleteFailed`] notice.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Write`] when the batch fails.
    pub async fn bulk_delete(&self) -> ChatResult<usize> {
        let ids = self.lock_state()?.selection().ids().clone();
        if ids.is_empty() {
            return Ok(0);
        }
        match self.store.batch_delete(&self.conversation, &ids).await {
            Ok(()) => {
                self.lock_state()?.remove_messages(&ids);
                info!(conversation = %self.conversation, deleted = ids.len(), "messages deleted");
                Ok(ids.len())
            }
            Err(err) => {
                warn!(conversation = %self.conversation, error = %err, "bulk delete failed");
                self.lock_state()?.push_notice(ChatNotice::DeleteFailed);
                Err(err.into())
            }
        }
    }

    /// Copies the selected texts, newline-joined in list order, and
    /// clears the selection. Returns `None` when nothing is selected.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Clipboard`] when the write is refused; the
    /// selection is kept in that case.
    pub async fn copy_selection(&self) -> ChatResult<Option<String>> {
        let Some(text) = self.lock_state()?.selected_text() else {
            return Ok(None);
        };
        match self.clipboard.write(&text).await {
            Ok(()) => {
                self.lock_state()?.clear_selection();
                Ok(Some(text))
            }
            Err(err) => {
                warn!(error = %err, "copy to clipboard failed");
                Err(err.into())
            }
        }
    }

    /// Returns the current message list.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::StatePoisoned`] if the state lock is poisoned.
    pub fn messages(&self) -> ChatResult<Vec<Message>> {
        Ok(self.lock_state()?.messages().to_vec())
    }

    /// Returns the selected ids.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::StatePoisoned`] if the state lock is poisoned.
    pub fn selected_ids(&self) -> ChatResult<BTreeSet<MessageId>> {
        Ok(self.lock_state()?.selection().ids().clone())
    }

    /// Returns which bulk actions are offered.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::StatePoisoned`] if the state lock is poisoned.
    pub fn available_actions(&self) -> ChatResult<AvailableActions> {
        Ok(self.lock_state()?.available_actions())
    }

    /// Returns the composer input.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::StatePoisoned`] if the state lock is poisoned.
    pub fn composer_input(&self) -> ChatResult<String> {
        Ok(self.lock_state()?.composer().input().to_owned())
    }

    /// Returns the composer height in pixels.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::StatePoisoned`] if the state lock is poisoned.
    pub fn composer_height(&self) -> ChatResult<u32> {
        Ok(self.lock_state()?.composer().height_px())
    }

    /// Returns `true` while a send awaits acknowledgement.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::StatePoisoned`] if the state lock is poisoned.
    pub fn has_send_in_flight(&self) -> ChatResult<bool> {
        Ok(self.lock_state()?.has_send_in_flight())
    }

    /// Drains pending user notices.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::StatePoisoned`] if the state lock is poisoned.
    pub fn take_notices(&self) -> ChatResult<Vec<ChatNotice>> {
        Ok(self.lock_state()?.take_notices())
    }

    /// Returns the last subscription error not yet superseded by a
    /// snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::StatePoisoned`] if the state lock is poisoned.
    pub fn last_subscription_error(&self) -> ChatResult<Option<String>> {
        Ok(self
            .lock_state()?
            .last_subscription_error()
            .map(str::to_owned))
    }

    /// Returns the header greeting for the signed-in user.
    #[must_use]
    pub fn greeting(&self) -> String {
        let viewer = self.session.current_user_id();
        self.config.participants.greeting(viewer.as_ref())
    }

    /// Lays out the timeline in the clock's local zone and hands it to
    /// `render`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::StatePoisoned`] if the state lock is poisoned.
    pub fn with_timeline<R>(&self, render: impl FnOnce(&[TimelineEntry<'_>]) -> R) -> ChatResult<R> {
        self.with_timeline_at(self.clock.local(), render)
    }

    /// Lays out the timeline relative to `now`, whose zone is the display
    /// zone.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::StatePoisoned`] if the state lock is poisoned.
    pub fn with_timeline_at<Tz, R>(
        &self,
        now: DateTime<Tz>,
        render: impl FnOnce(&[TimelineEntry<'_>]) -> R,
    ) -> ChatResult<R>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let viewer = self.session.current_user_id();
        let state = self.lock_state()?;
        let selection: &SelectionSet = state.selection();
        let context = TimelineContext {
            now,
            viewer: viewer.as_ref(),
            selection,
            options: self.config.timeline_options(),
        };
        let entries = build_timeline(state.messages(), &context);
        Ok(render(&entries))
    }

    /// Detaches the subscription and cancels any pending press. Safe to
    /// call repeatedly.
    pub fn close(&self) {
        self.press.cancel();
        let detached = self
            .subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(mut subscription) = detached {
            subscription.unsubscribe();
            debug!(conversation = %self.conversation, "chat view closed");
        }
    }

    /// Closes the current conversation and opens `conversation` with a
    /// fresh view state.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Subscription`] when the new query cannot be
    /// opened; the controller stays closed in that case.
    pub async fn switch_conversation(&mut self, conversation: ConversationId) -> ChatResult<()> {
        self.close();
        let subscription = self
            .store
            .subscribe_ordered(&conversation, TIMESTAMP_FIELD)
            .await?;
        *self.lock_state()? = ChatState::new(self.config.composer, self.config.dedup_window());
        *self
            .subscription
            .get_mut()
            .map_err(|_| ChatError::StatePoisoned)? = Some(subscription);
        info!(from = %self.conversation, to = %conversation, "switched conversation");
        self.config.conversation_id = conversation.clone();
        self.conversation = conversation;
        Ok(())
    }

    /// Closes the view, then signs the user out.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Auth`] when the provider fails to sign out.
    pub async fn sign_out(self) -> ChatResult<()> {
        self.close();
        self.session.sign_out().await?;
        Ok(())
    }

    fn lock_state(&self) -> ChatResult<MutexGuard<'_, ChatState>> {
        self.state.lock().map_err(|_| ChatError::StatePoisoned)
    }
}

impl<S, P, B, K> Drop for ChatController<S, P, B, K>
where
    S: MessageStore,
    P: SessionProvider,
    B: Clipboard,
    K: Clock + Send + Sync,
{
    fn drop(&mut self) {
        self.close();
    }
}

/// Withdraws the provisional entry if a send is dropped while its write
/// is outstanding.
struct InFlightGuard<'a> {
    state: &'a Mutex<ChatState>,
    armed: bool,
}

impl<'a> InFlightGuard<'a> {
    const fn new(state: &'a Mutex<ChatState>) -> Self {
        Self { state, armed: true }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            debug!("send dropped before the store answered");
            self.state
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .abandon_send();
        }
    }
}
