//! Two participants exchanging messages through one store.

use super::helpers::{join, store, texts};
use pairchat::chat::{
    adapters::memory::InMemoryMessageStore,
    domain::{ConversationId, EMPTY_CONVERSATION_PLACEHOLDER, TimelineEntry},
    services::SendOutcome,
};
use rstest::rstest;

#[rstest]
#[tokio::test]
async fn message_sent_by_one_side_reaches_the_other(store: InMemoryMessageStore) {
    let alice = join(&store, "alice").await;
    let bob = join(&store, "bob").await;

    let outcome = alice.controller.send("hi Bob").await.expect("send succeeds");
    bob.controller.pump().expect("pump");

    assert!(matches!(outcome, SendOutcome::Sent(_)));
    assert_eq!(texts(&bob.controller), ["hi Bob"]);
    let own = bob
        .controller
        .with_timeline(|entries| {
            entries
                .iter()
                .filter(|entry| matches!(entry, TimelineEntry::Message { from_viewer: true, .. }))
                .count()
        })
        .expect("timeline");
    assert_eq!(own, 0);
}

#[rstest]
#[tokio::test]
async fn replies_interleave_in_store_order(store: InMemoryMessageStore) {
    let alice = join(&store, "alice").await;
    let bob = join(&store, "bob").await;

    alice.controller.send("one").await.expect("send");
    bob.controller.pump().expect("pump");
    bob.controller.send("two").await.expect("send");
    alice.controller.pump().expect("pump");
    alice.controller.send("three").await.expect("send");
    alice.controller.pump().expect("pump");
    bob.controller.pump().expect("pump");

    assert_eq!(texts(&alice.controller), ["one", "two", "three"]);
    assert_eq!(texts(&bob.controller), ["one", "two", "three"]);
    assert_eq!(store.records(&ConversationId::default()).len(), 3);
}

#[rstest]
#[tokio::test]
async fn bulk_delete_propagates_to_the_other_side(store: InMemoryMessageStore) {
    let alice = join(&store, "alice").await;
    let bob = join(&store, "bob").await;
    alice.controller.send("keep").await.expect("send");
    alice.controller.send("oops").await.expect("send");
    alice.controller.pump().expect("pump");
    let oops = alice
        .controller
        .messages()
        .expect("messages")
        .into_iter()
        .find(|message| message.text() == "oops")
        .expect("sent message listed");
    alice.controller.toggle_selection(oops.id()).expect("toggle");

    alice.controller.bulk_delete().await.expect("delete");
    bob.controller.pump().expect("pump");

    assert_eq!(texts(&alice.controller), ["keep"]);
    assert_eq!(texts(&bob.controller), ["keep"]);
}

#[rstest]
#[tokio::test]
async fn greeting_names_each_viewer(store: InMemoryMessageStore) {
    let alice = join(&store, "alice").await;
    let bob = join(&store, "bob").await;

    assert_eq!(alice.controller.greeting(), "Hello, Alice");
    assert_eq!(bob.controller.greeting(), "Hello, Bob");
    assert!(texts(&alice.controller).is_empty());
    assert_eq!(
        EMPTY_CONVERSATION_PLACEHOLDER,
        "No messages yet. Start the conversation!"
    );
}

#[rstest]
#[tokio::test]
async fn signing_out_stops_updates_for_that_side(store: InMemoryMessageStore) {
    let alice = join(&store, "alice").await;
    let bob = join(&store, "bob").await;
    let conversation = ConversationId::default();
    assert_eq!(store.subscriber_count(&conversation), 2);

    bob.controller.sign_out().await.expect("sign out");
    alice.controller.send("anyone?").await.expect("send");

    assert_eq!(store.subscriber_count(&conversation), 1);
    assert!(bob.provider.current_session().is_none());
    assert!(bob.clipboard.contents().is_none());
}
