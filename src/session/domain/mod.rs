//! Domain types for users, credentials and sessions.

mod credentials;
mod error;
mod ids;
mod participants;
mod session;

pub use credentials::Credentials;
pub use error::SessionDomainError;
pub use ids::UserId;
pub use participants::Participants;
pub use session::Session;
