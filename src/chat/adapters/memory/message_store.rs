//! In-memory document store with live ordered subscriptions.

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, RwLock, Weak};
use tokio::sync::{mpsc, watch};
use tracing::debug;
use uuid::Uuid;

use crate::chat::{
    domain::{ConversationId, MessageId, NewRecord, Snapshot, StoredRecord, decode_timestamp},
    ports::{MessageStore, Subscription, SubscriptionError, WriteError, WriteResult},
};

/// Thread-safe in-memory message store.
///
/// Every change to a conversation publishes a fresh ordered snapshot to
/// each of its live subscribers, replacing any they have not read, and a
/// new subscriber starts with the current snapshot. Failures can be injected to exercise error paths.
pub struct InMemoryMessageStore<C: Clock = DefaultClock> {
    state: Arc<RwLock<StoreState>>,
    clock: Arc<C>,
}

impl<C: Clock> Clone for InMemoryMessageStore<C> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            clock: Arc::clone(&self.clock),
        }
    }
}

#[derive(Debug, Default)]
struct StoreState {
    conversations: HashMap<ConversationId, Vec<StoredRecord>>,
    subscribers: HashMap<ConversationId, Vec<Subscriber>>,
    next_subscriber: u64,
    fail_writes: bool,
    reject_subscriptions: bool,
}

#[derive(Debug)]
struct Subscriber {
    id: u64,
    order_field: String,
    snapshots: watch::Sender<Snapshot>,
    errors: mpsc::UnboundedSender<SubscriptionError>,
}

impl StoreState {
    fn ordered_snapshot(&self, conversation: &ConversationId, order_field: &str) -> Snapshot {
        let mut records = self
            .conversations
            .get(conversation)
            .cloned()
            .unwrap_or_default();
        records.sort_by(|a, b| {
            decode_timestamp(a.fields.get(order_field))
                .chronological_cmp(&decode_timestamp(b.fields.get(order_field)))
        });
        Snapshot::new(records)
    }

    fn broadcast(&mut self, conversation: &ConversationId) {
        let Some(subscribers) = self.subscribers.get(conversation) else {
            return;
        };
        let deliveries: Vec<(u64, Snapshot)> = subscribers
            .iter()
            .map(|sub| (sub.id, self.ordered_snapshot(conversation, &sub.order_field)))
            .collect();
        if let Some(subscribers) = self.subscribers.get_mut(conversation) {
            subscribers.retain(|sub| {
                deliveries
                    .iter()
                    .find(|(id, _)| *id == sub.id)
                    .is_none_or(|(_, snapshot)| sub.snapshots.send(snapshot.clone()).is_ok())
            });
        }
    }

    fn remove_subscriber(&mut self, conversation: &ConversationId, id: u64) {
        if let Some(subscribers) = self.subscribers.get_mut(conversation) {
            subscribers.retain(|sub| sub.id != id);
            if subscribers.is_empty() {
                self.subscribers.remove(conversation);
            }
        }
    }
}

impl InMemoryMessageStore<DefaultClock> {
    /// Creates an empty store using the system clock for server time.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }
}

impl Default for InMemoryMessageStore<DefaultClock> {
    fn default() -> Self {
        Self::new()
    }
}

fn write_poisoned(err: impl ToString) -> WriteError {
    WriteError::store(std::io::Error::other(err.to_string()))
}

fn subscription_poisoned(err: impl ToString) -> SubscriptionError {
    SubscriptionError::store(std::io::Error::other(err.to_string()))
}

impl<C: Clock> InMemoryMessageStore<C> {
    /// Creates an empty store resolving server time with `clock`.
    #[must_use]
    pub fn with_clock(clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(StoreState::default())),
            clock,
        }
    }

    /// Makes every subsequent write fail until reset.
    pub fn set_fail_writes(&self, fail: bool) {
        if let Ok(mut state) = self.state.write() {
            state.fail_writes = fail;
        }
    }

    /// Makes every subsequent subscription attempt fail until reset.
    pub fn set_reject_subscriptions(&self, reject: bool) {
        if let Ok(mut state) = self.state.write() {
            state.reject_subscriptions = reject;
        }
    }

    /// Stores a raw record as another client would and notifies
    /// subscribers.
    pub fn insert_record(&self, conversation: &ConversationId, record: StoredRecord) {
        if let Ok(mut state) = self.state.write() {
            state
                .conversations
                .entry(conversation.clone())
                .or_default()
                .push(record);
            state.broadcast(conversation);
        }
    }

    /// Delivers an error to every live subscriber of `conversation`.
    pub fn emit_subscription_error(&self, conversation: &ConversationId, error: &SubscriptionError) {
        if let Ok(state) = self.state.read()
            && let Some(subscribers) = state.subscribers.get(conversation)
        {
            for sub in subscribers {
                if sub.errors.send(error.clone()).is_err() {
                    debug!(subscriber = sub.id, "skipping closed subscriber");
                }
            }
        }
    }

    /// Returns the records of a conversation in insertion order.
    #[must_use]
    pub fn records(&self, conversation: &ConversationId) -> Vec<StoredRecord> {
        self.state
            .read()
            .ok()
            .and_then(|state| state.conversations.get(conversation).cloned())
            .unwrap_or_default()
    }

    /// Returns the number of live subscriptions on a conversation.
    #[must_use]
    pub fn subscriber_count(&self, conversation: &ConversationId) -> usize {
        self.state
            .read()
            .ok()
            .and_then(|state| state.subscribers.get(conversation).map(Vec::len))
            .unwrap_or(0)
    }
}

#[async_trait]
impl<C: Clock + Send + Sync> MessageStore for InMemoryMessageStore<C> {
    async fn subscribe_ordered(
        &self,
        conversation: &ConversationId,
        order_field: &str,
    ) -> Result<Subscription, SubscriptionError> {
        let mut state = self.state.write().map_err(subscription_poisoned)?;
        if state.reject_subscriptions {
            return Err(SubscriptionError::Rejected(format!(
                "missing permission for {}",
                conversation.collection_path()
            )));
        }

        let id = state.next_subscriber;
        state.next_subscriber = id.saturating_add(1);
        let initial = state.ordered_snapshot(conversation, order_field);
        let (snapshots, snapshot_receiver) = watch::channel(initial);
        let (errors, error_receiver) = mpsc::unbounded_channel();
        state
            .subscribers
            .entry(conversation.clone())
            .or_default()
            .push(Subscriber {
                id,
                order_field: order_field.to_owned(),
                snapshots,
                errors,
            });

        let weak: Weak<RwLock<StoreState>> = Arc::downgrade(&self.state);
        let key = conversation.clone();
        Ok(Subscription::new(snapshot_receiver, error_receiver, move || {
            if let Some(shared) = weak.upgrade()
                && let Ok(mut state) = shared.write()
            {
                state.remove_subscriber(&key, id);
            }
        }))
    }

    async fn append(
        &self,
        conversation: &ConversationId,
        record: NewRecord,
    ) -> WriteResult<MessageId> {
        let mut state = self.state.write().map_err(write_poisoned)?;
        if state.fail_writes {
            return Err(WriteError::unavailable("store is offline"));
        }

        let raw_id = Uuid::new_v4().simple().to_string();
        let id = MessageId::new(raw_id.clone()).map_err(WriteError::store)?;
        let stored = record.into_stored(raw_id, self.clock.utc());
        state
            .conversations
            .entry(conversation.clone())
            .or_default()
            .push(stored);
        state.broadcast(conversation);
        Ok(id)
    }

    async fn batch_delete(
        &self,
        conversation: &ConversationId,
        ids: &BTreeSet<MessageId>,
    ) -> WriteResult<()> {
        let mut state = self.state.write().map_err(write_poisoned)?;
        if state.fail_writes {
            return Err(WriteError::unavailable("store is offline"));
        }

        if let Some(records) = state.conversations.get_mut(conversation) {
            records.retain(|record| !ids.iter().any(|id| id.as_str() == record.id));
        }
        state.broadcast(conversation);
        Ok(())
    }
}
