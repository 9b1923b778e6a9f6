//! Shared world state for chat messaging BDD scenarios.

use std::sync::Arc;

use eyre::WrapErr;
use mockable::DefaultClock;
use pairchat::{
    chat::{
        ChatConfig, ChatError,
        adapters::memory::{InMemoryClipboard, InMemoryMessageStore},
        domain::MessageId,
        services::ChatController,
    },
    session::{
        adapters::memory::InMemorySessionProvider, domain::UserId, services::LoginService,
    },
};
use rstest::fixture;

/// Controller type used by the BDD world.
pub type TestController = ChatController<
    InMemoryMessageStore,
    InMemorySessionProvider,
    InMemoryClipboard,
    DefaultClock,
>;

/// A signed-in participant and their view.
pub struct Participant {
    pub clipboard: InMemoryClipboard,
    pub controller: TestController,
}

impl Participant {
    /// Returns the rendered message texts.
    pub fn texts(&self) -> Result<Vec<String>, eyre::Report> {
        Ok(self
            .controller
            .messages()?
            .iter()
            .map(|message| message.text().to_owned())
            .collect())
    }

    /// Finds the id of the rendered message with `text`.
    pub fn id_of(&self, text: &str) -> Result<MessageId, eyre::Report> {
        self.controller
            .messages()?
            .into_iter()
            .find(|message| message.text() == text)
            .map(|message| message.id().clone())
            .ok_or_else(|| eyre::eyre!("no message with text {text:?}"))
    }
}

/// Scenario world for chat messaging behaviour tests.
pub struct ChatWorld {
    pub store: InMemoryMessageStore,
    pub alice: Option<Participant>,
    pub bob: Option<Participant>,
    pub last_error: Option<ChatError>,
}

impl ChatWorld {
    /// Creates a world with an empty store and nobody signed in.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: InMemoryMessageStore::new(),
            alice: None,
            bob: None,
            last_error: None,
        }
    }

    /// Returns the named participant.
    pub fn participant(&self, who: &str) -> Result<&Participant, eyre::Report> {
        let slot = match who {
            "alice" => &self.alice,
            "bob" => &self.bob,
            other => return Err(eyre::eyre!("unknown participant {other:?}")),
        };
        slot.as_ref()
            .ok_or_else(|| eyre::eyre!("{who} has not joined the conversation"))
    }

    /// Brings every participant's view up to date.
    pub fn pump_all(&self) -> Result<(), eyre::Report> {
        for participant in self.alice.iter().chain(self.bob.iter()) {
            participant.controller.pump()?;
        }
        Ok(())
    }
}

impl Default for ChatWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ChatWorld {
    ChatWorld::default()
}

/// Signs `name` in and opens the default conversation.
pub async fn join(store: &InMemoryMessageStore, name: &str) -> Result<Participant, eyre::Report> {
    let email = format!("{name}@example.com");
    let user_id = UserId::new(format!("uid-{name}"))?;
    let provider = InMemorySessionProvider::new().with_account(&email, "secret", user_id);
    LoginService::new(Arc::new(provider.clone()))
        .login(&email, "secret")
        .await
        .wrap_err_with(|| format!("login for {name}"))?;
    let clipboard = InMemoryClipboard::new();
    let controller = ChatController::open(
        Arc::new(store.clone()),
        Arc::new(provider),
        Arc::new(clipboard.clone()),
        Arc::new(DefaultClock),
        ChatConfig::default(),
    )
    .await?;
    controller.pump()?;
    Ok(Participant {
        clipboard,
        controller,
    })
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
