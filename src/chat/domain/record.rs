//! Store document shapes and their decoding into messages.
//!
//! The document store hands back schemaless JSON objects. Decoding is
//! tolerant of the timestamp field, which may be absent while a server
//! time is being assigned, but strict about `text` and `sender`.

use super::{Message, MessageId, MessageTimestamp, RecordDecodeError, sort_chronologically};
use crate::session::domain::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

/// Field holding the message text.
pub const TEXT_FIELD: &str = "text";
/// Field holding the sender's user id.
pub const SENDER_FIELD: &str = "sender";
/// Field holding the store-assigned time; also the live query order field.
pub const TIMESTAMP_FIELD: &str = "timestamp";

/// A document as delivered by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    /// Store-assigned document identifier.
    pub id: String,
    /// Document fields.
    pub fields: Map<String, Value>,
}

impl StoredRecord {
    /// Creates a record from an id and a JSON object.
    #[must_use]
    pub fn new(id: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    fn string_field(&self, field: &'static str) -> Result<&str, RecordDecodeError> {
        match self.fields.get(field) {
            None | Some(Value::Null) => Err(RecordDecodeError::MissingField {
                record: self.id.clone(),
                field,
            }),
            Some(Value::String(value)) => Ok(value),
            Some(other) => Err(RecordDecodeError::InvalidField {
                record: self.id.clone(),
                field,
                reason: format!("expected string, found {other}"),
            }),
        }
    }
}

/// How the store should fill in the timestamp of a new record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampDirective {
    /// Use the store's own clock at commit time.
    ServerTime,
}

/// A record the client asks the store to create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecord {
    /// Message text, already trimmed.
    pub text: String,
    /// Sending user.
    pub sender: UserId,
    /// Timestamp directive.
    pub timestamp: TimestampDirective,
}

impl NewRecord {
    /// Creates a record stamped with the server time directive.
    #[must_use]
    pub fn server_timed(text: impl Into<String>, sender: UserId) -> Self {
        Self {
            text: text.into(),
            sender,
            timestamp: TimestampDirective::ServerTime,
        }
    }

    /// Materialises the record with the time the store resolved.
    #[must_use]
    pub fn into_stored(self, id: impl Into<String>, at: DateTime<Utc>) -> StoredRecord {
        let mut fields = Map::new();
        fields.insert(TEXT_FIELD.to_owned(), Value::String(self.text));
        fields.insert(
            SENDER_FIELD.to_owned(),
            Value::String(self.sender.into()),
        );
        fields.insert(TIMESTAMP_FIELD.to_owned(), Value::String(at.to_rfc3339()));
        StoredRecord::new(id, fields)
    }
}

/// Coerces a stored timestamp value.
///
/// Accepts RFC 3339 strings, integer epoch milliseconds and
/// `{ "seconds", "nanoseconds" }` objects. A missing or null value is
/// `Pending`; anything else is `Invalid`.
#[must_use]
pub fn decode_timestamp(value: Option<&Value>) -> MessageTimestamp {
    let invalid = |raw: &Value| MessageTimestamp::Invalid(raw.to_string());
    match value {
        None | Some(Value::Null) => MessageTimestamp::Pending,
        Some(raw @ Value::String(text)) => DateTime::parse_from_rfc3339(text)
            .map_or_else(|_| invalid(raw), |at| at.with_timezone(&Utc).into()),
        Some(raw @ Value::Number(number)) => number
            .as_i64()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .map_or_else(|| invalid(raw), MessageTimestamp::from),
        Some(raw @ Value::Object(object)) => {
            let seconds = object.get("seconds").and_then(Value::as_i64);
            let nanos = object
                .get("nanoseconds")
                .map_or(Some(0), Value::as_u64)
                .and_then(|n| u32::try_from(n).ok());
            seconds
                .zip(nanos)
                .and_then(|(secs, nsecs)| DateTime::<Utc>::from_timestamp(secs, nsecs))
                .map_or_else(|| invalid(raw), MessageTimestamp::from)
        }
        Some(raw) => invalid(raw),
    }
}

impl TryFrom<&StoredRecord> for Message {
    type Error = RecordDecodeError;

    fn try_from(record: &StoredRecord) -> Result<Self, Self::Error> {
        let id = MessageId::new(record.id.clone()).map_err(|err| {
            RecordDecodeError::InvalidField {
                record: record.id.clone(),
                field: "id",
                reason: err.to_string(),
            }
        })?;
        let text = record.string_field(TEXT_FIELD)?;
        let sender = UserId::new(record.string_field(SENDER_FIELD)?).map_err(|err| {
            RecordDecodeError::InvalidField {
                record: record.id.clone(),
                field: SENDER_FIELD,
                reason: err.to_string(),
            }
        })?;
        let timestamp = decode_timestamp(record.fields.get(TIMESTAMP_FIELD));
        Ok(Self::new(id, text, sender, timestamp))
    }
}

/// Complete result of the live ordered query at one point in time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    records: Vec<StoredRecord>,
}

impl Snapshot {
    /// Creates a snapshot from records in store order.
    #[must_use]
    pub const fn new(records: Vec<StoredRecord>) -> Self {
        Self { records }
    }

    /// Returns the records in store order.
    #[must_use]
    pub fn records(&self) -> &[StoredRecord] {
        &self.records
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` when the snapshot holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Decodes the records into messages in display order.
    ///
    /// Records that fail to decode are skipped and logged.
    #[must_use]
    pub fn decode(&self) -> Vec<Message> {
        let mut messages: Vec<Message> = self
            .records
            .iter()
            .filter_map(|record| {
                Message::try_from(record)
                    .inspect_err(|err| warn!(error = %err, "skipping undecodable record"))
                    .ok()
            })
            .collect();
        sort_chronologically(&mut messages);
        messages
    }
}
