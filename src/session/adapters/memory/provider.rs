//! In-memory session provider backed by a fixed account table.

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::session::{
    domain::{Credentials, Session, UserId},
    ports::{AuthError, AuthResult, SessionProvider},
};

/// Thread-safe in-memory session provider.
///
/// Accounts are registered up front with [`Self::with_account`]. The
/// provider can be switched offline to exercise network failures.
pub struct InMemorySessionProvider<C: Clock = DefaultClock> {
    state: Arc<RwLock<ProviderState>>,
    clock: Arc<C>,
}

impl<C: Clock> Clone for InMemorySessionProvider<C> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            clock: Arc::clone(&self.clock),
        }
    }
}

#[derive(Debug, Default)]
struct ProviderState {
    accounts: HashMap<String, Account>,
    current: Option<Session>,
    offline: bool,
}

#[derive(Debug)]
struct Account {
    password: String,
    user_id: UserId,
}

impl InMemorySessionProvider<DefaultClock> {
    /// Creates a provider with no accounts using the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }
}

impl Default for InMemorySessionProvider<DefaultClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> InMemorySessionProvider<C> {
    /// Creates a provider with no accounts using the given clock.
    #[must_use]
    pub fn with_clock(clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(ProviderState::default())),
            clock,
        }
    }

    /// Registers an account. Emails are matched case-insensitively.
    #[must_use]
    pub fn with_account(self, email: &str, password: &str, user_id: UserId) -> Self {
        if let Ok(mut state) = self.state.write() {
            state.accounts.insert(
                email.trim().to_ascii_lowercase(),
                Account {
                    password: password.to_owned(),
                    user_id,
                },
            );
        }
        self
    }

    /// Simulates losing or regaining connectivity to the provider.
    pub fn set_offline(&self, offline: bool) {
        if let Ok(mut state) = self.state.write() {
            state.offline = offline;
        }
    }

    /// Returns the currently open session, if any.
    #[must_use]
    pub fn current_session(&self) -> Option<Session> {
        self.state.read().ok().and_then(|state| state.current.clone())
    }
}

fn poisoned(err: impl ToString) -> AuthError {
    AuthError::provider(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl<C: Clock + Send + Sync> SessionProvider for InMemorySessionProvider<C> {
    async fn authenticate(&self, credentials: &Credentials) -> AuthResult<Session> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state.offline {
            return Err(AuthError::network("session provider unreachable"));
        }

        let key = credentials.email().to_ascii_lowercase();
        let user_id = match state.accounts.get(&key) {
            Some(account) if account.password == credentials.password() => account.user_id.clone(),
            _ => return Err(AuthError::InvalidCredentials),
        };

        let session = Session::new(user_id, credentials.email(), &*self.clock);
        state.current = Some(session.clone());
        Ok(session)
    }

    fn current_user_id(&self) -> Option<UserId> {
        self.state
            .read()
            .ok()
            .and_then(|state| state.current.as_ref().map(|s| s.user_id().clone()))
    }

    async fn sign_out(&self) -> AuthResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state.offline {
            return Err(AuthError::network("session provider unreachable"));
        }
        state.current = None;
        Ok(())
    }
}
