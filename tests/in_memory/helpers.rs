//! Shared helpers for in-memory chat integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use pairchat::{
    chat::{
        ChatConfig,
        adapters::memory::{InMemoryClipboard, InMemoryMessageStore},
        services::ChatController,
    },
    session::{
        adapters::memory::InMemorySessionProvider,
        domain::{Participants, UserId},
        services::LoginService,
    },
};
use rstest::fixture;

/// Controller type wired to the in-memory adapters.
pub type TestController = ChatController<
    InMemoryMessageStore,
    InMemorySessionProvider,
    InMemoryClipboard,
    DefaultClock,
>;

/// One signed-in participant with their own view of the shared store.
pub struct Participant {
    pub provider: InMemorySessionProvider,
    pub clipboard: InMemoryClipboard,
    pub controller: TestController,
}

/// Provides a fresh shared store for each test.
#[fixture]
pub fn store() -> InMemoryMessageStore {
    InMemoryMessageStore::new()
}

/// Parses a user id.
///
/// # Panics
///
/// Panics if `raw` is blank.
#[must_use]
pub fn uid(raw: &str) -> UserId {
    UserId::new(raw).expect("valid user id")
}

/// Display names for both participants.
#[must_use]
pub fn participants() -> Participants {
    Participants::default()
        .with_name(uid("uid-alice"), "Alice")
        .with_name(uid("uid-bob"), "Bob")
}

/// Signs `name` in through the login service and opens the default
/// conversation against `store`.
///
/// # Panics
///
/// Panics if login or subscription fails.
pub async fn join(store: &InMemoryMessageStore, name: &str) -> Participant {
    let email = format!("{name}@example.com");
    let provider = InMemorySessionProvider::new().with_account(
        &email,
        "secret",
        uid(&format!("uid-{name}")),
    );
    LoginService::new(Arc::new(provider.clone()))
        .login(&email, "secret")
        .await
        .expect("login succeeds");
    let clipboard = InMemoryClipboard::new();
    let controller = ChatController::open(
        Arc::new(store.clone()),
        Arc::new(provider.clone()),
        Arc::new(clipboard.clone()),
        Arc::new(DefaultClock),
        ChatConfig::default().with_participants(participants()),
    )
    .await
    .expect("controller opens");
    controller.pump().expect("initial snapshot");
    Participant {
        provider,
        clipboard,
        controller,
    }
}

/// Returns the texts currently rendered by `controller`.
///
/// # Panics
///
/// Panics if the view state is poisoned.
#[must_use]
pub fn texts(controller: &TestController) -> Vec<String> {
    controller
        .messages()
        .expect("state readable")
        .iter()
        .map(|message| message.text().to_owned())
        .collect()
}
