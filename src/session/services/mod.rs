//! Service layer for the session subsystem.

mod login;

pub use login::{LOGIN_FAILED_MESSAGE, LoginError, LoginResult, LoginService};
