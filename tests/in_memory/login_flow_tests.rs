//! Login flow against the in-memory session provider.

use super::helpers::uid;
use pairchat::session::{
    adapters::memory::InMemorySessionProvider,
    services::{LOGIN_FAILED_MESSAGE, LoginService},
};
use rstest::rstest;
use std::sync::Arc;

#[rstest]
#[case("alice@example.com", "wrong")]
#[case("nobody@example.com", "secret")]
#[case("not-an-email", "secret")]
#[case("alice@example.com", "")]
#[tokio::test]
async fn every_login_failure_shows_the_same_message(#[case] email: &str, #[case] password: &str) {
    let provider = InMemorySessionProvider::new().with_account(
        "alice@example.com",
        "secret",
        uid("uid-alice"),
    );
    let service = LoginService::new(Arc::new(provider));

    let err = service.login(email, password).await.expect_err("login fails");

    assert_eq!(err.user_message(), LOGIN_FAILED_MESSAGE);
    assert!(service.current_user_id().is_none());
}

#[rstest]
#[tokio::test]
async fn offline_provider_reports_generic_failure() {
    let provider = InMemorySessionProvider::new().with_account(
        "alice@example.com",
        "secret",
        uid("uid-alice"),
    );
    provider.set_offline(true);
    let service = LoginService::new(Arc::new(provider));

    let err = service
        .login("alice@example.com", "secret")
        .await
        .expect_err("login fails");

    assert_eq!(err.user_message(), LOGIN_FAILED_MESSAGE);
}
