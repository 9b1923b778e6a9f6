//! Unit tests for the chat module.

mod record_tests;

use crate::chat::domain::{Message, MessageId, MessageTimestamp};
use crate::session::domain::UserId;
use chrono::{DateTime, TimeZone, Utc};

pub(super) fn user(id: &str) -> UserId {
    UserId::new(id).expect("valid user id")
}

pub(super) fn message_id(id: &str) -> MessageId {
    MessageId::new(id).expect("valid message id")
}

pub(super) fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .expect("valid instant")
}

pub(super) fn message(id: &str, text: &str, sender: &str, timestamp: MessageTimestamp) -> Message {
    Message::new(message_id(id), text, user(sender), timestamp)
}

pub(super) fn resolved(id: &str, text: &str, sender: &str, when: DateTime<Utc>) -> Message {
    message(id, text, sender, MessageTimestamp::Resolved(when))
}
