//! In-memory adapter integration tests.
//!
//! Tests are organized into modules by functionality:
//! - `conversation_flow_tests`: Two participants sharing one store
//! - `login_flow_tests`: Sign-in failures and the user-facing message

mod in_memory {
    pub mod helpers;

    mod conversation_flow_tests;
    mod login_flow_tests;
}
