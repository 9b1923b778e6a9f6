//! Message store port for the hosted realtime document database.

use crate::chat::domain::{ConversationId, MessageId, NewRecord, Snapshot};
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, watch};

/// Result type for store writes.
pub type WriteResult<T> = Result<T, WriteError>;

/// Document store contract used by the chat view.
///
/// # Implementation Notes
///
/// Implementations must ensure:
/// - A subscription delivers a complete snapshot on every change, ordered
///   ascending by the requested field with ties in insertion order
/// - `append` resolves [`crate::chat::domain::TimestampDirective::ServerTime`]
///   on the store's clock and never assigns the provisional id
/// - `batch_delete` is all-or-nothing
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Opens a live ordered query over a conversation's messages.
    ///
    /// # Errors
    ///
    /// Returns [`SubscriptionError`] when the query cannot be established.
    async fn subscribe_ordered(
        &self,
        conversation: &ConversationId,
        order_field: &str,
    ) -> Result<Subscription, SubscriptionError>;

    /// Creates a record and returns its store-assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError`] when the write is rejected or not delivered.
    async fn append(
        &self,
        conversation: &ConversationId,
        record: NewRecord,
    ) -> WriteResult<MessageId>;

    /// Deletes every record in `ids` in a single atomic batch.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError`] when the batch fails; no record is deleted in
    /// that case.
    async fn batch_delete(
        &self,
        conversation: &ConversationId,
        ids: &BTreeSet<MessageId>,
    ) -> WriteResult<()>;
}

type Teardown = Box<dyn FnOnce() + Send>;

/// Live query handle.
///
/// Only the latest snapshot is kept; a newer one replaces any snapshot
/// not yet read. Errors queue on a side channel. [`Subscription::unsubscribe`]
/// runs the store's teardown at most once; dropping the handle
/// unsubscribes as well.
pub struct Subscription {
    snapshots: watch::Receiver<Snapshot>,
    errors: mpsc::UnboundedReceiver<SubscriptionError>,
    teardown: Option<Teardown>,
}

impl Subscription {
    /// Wraps the snapshot and error channels and the store-side teardown.
    ///
    /// The value already held by `snapshots` counts as unread, so the
    /// first [`Self::latest_snapshot`] returns it.
    #[must_use]
    pub fn new(
        mut snapshots: watch::Receiver<Snapshot>,
        errors: mpsc::UnboundedReceiver<SubscriptionError>,
        teardown: impl FnOnce() + Send + 'static,
    ) -> Self {
        snapshots.mark_changed();
        Self {
            snapshots,
            errors,
            teardown: Some(Box::new(teardown)),
        }
    }

    /// Returns the newest snapshot if it has not been read yet.
    pub fn latest_snapshot(&mut self) -> Option<Snapshot> {
        if self.teardown.is_none() {
            return None;
        }
        let latest = self.snapshots.borrow_and_update();
        latest.has_changed().then(|| latest.clone())
    }

    /// Returns the next queued error without waiting.
    pub fn try_next_error(&mut self) -> Option<SubscriptionError> {
        if self.teardown.is_none() {
            return None;
        }
        self.errors.try_recv().ok()
    }

    /// Stops delivery. Calling it again has no effect.
    pub fn unsubscribe(&mut self) {
        if let Some(teardown) = self.teardown.take() {
            self.errors.close();
            teardown();
        }
    }

    /// Returns `true` until [`Self::unsubscribe`] has run.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.teardown.is_some()
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish_non_exhaustive()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

/// Errors raised by a live subscription.
#[derive(Debug, Clone, Error)]
pub enum SubscriptionError {
    /// The store refused the query, e.g. for lack of permission.
    #[error("subscription rejected: {0}")]
    Rejected(String),

    /// The connection to the store failed.
    #[error("subscription transport error: {0}")]
    Transport(String),

    /// Store-side failure.
    #[error("store error: {0}")]
    Store(Arc<dyn std::error::Error + Send + Sync>),
}

impl SubscriptionError {
    /// Creates a transport error.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Wraps a store error.
    pub fn store(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Store(Arc::new(err))
    }
}

/// Errors raised by store writes.
#[derive(Debug, Clone, Error)]
pub enum WriteError {
    /// The store refused the write.
    #[error("write rejected: {0}")]
    Rejected(String),

    /// The store could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Store-side failure.
    #[error("store error: {0}")]
    Store(Arc<dyn std::error::Error + Send + Sync>),
}

impl WriteError {
    /// Creates an unavailable error.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    /// Wraps a store error.
    pub fn store(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Store(Arc::new(err))
    }
}
