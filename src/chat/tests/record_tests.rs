//! Tests for decoding store records.

use super::{at, user};
use crate::chat::domain::{
    Message, MessageTimestamp, NewRecord, RecordDecodeError, Snapshot, StoredRecord,
    TimestampDirective, decode_timestamp,
};
use rstest::rstest;
use serde_json::{Value, json};

fn record(id: &str, fields: Value) -> StoredRecord {
    let Value::Object(map) = fields else {
        panic!("record fields must be an object");
    };
    StoredRecord::new(id, map)
}

#[rstest]
#[case(None, MessageTimestamp::Pending)]
#[case(Some(json!(null)), MessageTimestamp::Pending)]
#[case(Some(json!("2024-01-01T09:30:00Z")), MessageTimestamp::Resolved(at(2024, 1, 1, 9, 30)))]
#[case(Some(json!("2024-01-01T10:30:00+01:00")), MessageTimestamp::Resolved(at(2024, 1, 1, 9, 30)))]
#[case(Some(json!(1_704_101_400_000_i64)), MessageTimestamp::Resolved(at(2024, 1, 1, 9, 30)))]
#[case(Some(json!({ "seconds": 1_704_101_400_i64, "nanoseconds": 0 })), MessageTimestamp::Resolved(at(2024, 1, 1, 9, 30)))]
fn decode_timestamp_accepts_supported_shapes(
    #[case] raw: Option<Value>,
    #[case] expected: MessageTimestamp,
) {
    assert_eq!(decode_timestamp(raw.as_ref()), expected);
}

#[rstest]
#[case(json!("yesterday"))]
#[case(json!(true))]
#[case(json!({ "seconds": "soon" }))]
#[case(json!([1, 2]))]
fn decode_timestamp_marks_unusable_values_invalid(#[case] raw: Value) {
    assert!(matches!(
        decode_timestamp(Some(&raw)),
        MessageTimestamp::Invalid(_)
    ));
}

#[rstest]
fn record_without_timestamp_decodes_as_pending() {
    let stored = record("m1", json!({ "text": "hi", "sender": "alice" }));

    let message = Message::try_from(&stored).expect("decodes");

    assert_eq!(message.text(), "hi");
    assert_eq!(message.sender(), &user("alice"));
    assert!(message.timestamp().is_pending());
}

#[rstest]
fn record_missing_text_is_rejected() {
    let stored = record("m1", json!({ "sender": "alice" }));

    let err = Message::try_from(&stored).expect_err("missing text");

    assert_eq!(
        err,
        RecordDecodeError::MissingField {
            record: "m1".into(),
            field: "text",
        }
    );
}

#[rstest]
fn record_with_non_string_sender_is_rejected() {
    let stored = record("m1", json!({ "text": "hi", "sender": 7 }));

    let err = Message::try_from(&stored).expect_err("bad sender");

    assert!(matches!(
        err,
        RecordDecodeError::InvalidField { field: "sender", .. }
    ));
}

#[rstest]
fn snapshot_decode_skips_bad_records_and_orders_by_time() {
    let snapshot = Snapshot::new(vec![
        record("late", json!({ "text": "b", "sender": "bob", "timestamp": "2024-01-01T10:00:00Z" })),
        record("broken", json!({ "sender": "bob" })),
        record("early", json!({ "text": "a", "sender": "alice", "timestamp": "2024-01-01T09:00:00Z" })),
    ]);

    let ids: Vec<String> = snapshot
        .decode()
        .iter()
        .map(|m| m.id().as_str().to_owned())
        .collect();

    assert_eq!(snapshot.len(), 3);
    assert_eq!(ids, ["early", "late"]);
}

#[rstest]
fn new_record_carries_server_time_directive_until_stored() {
    let record = NewRecord::server_timed("hello", user("alice"));
    assert_eq!(record.timestamp, TimestampDirective::ServerTime);

    let stored = record.into_stored("m9", at(2024, 3, 5, 14, 0));
    let message = Message::try_from(&stored).expect("decodes");

    assert_eq!(message.id().as_str(), "m9");
    assert_eq!(
        message.timestamp(),
        &MessageTimestamp::Resolved(at(2024, 3, 5, 14, 0))
    );
}
