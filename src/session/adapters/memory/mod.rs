//! In-memory session adapters for tests and local runs.

mod provider;

pub use provider::InMemorySessionProvider;
