//! Login contract: identity resolution, degraded sessions, failure split.

#![allow(clippy::unwrap_used)]

use game_harbor_client::session::keys;
use game_harbor_client::{ApiError, AuthError, Identity, SessionStore};
use game_harbor_core::{AdminId, ClientId, Email, Role};
use game_harbor_integration_tests::{FakeBackend, TestContext};
use uuid::Uuid;

#[tokio::test]
async fn login_resolves_and_persists_identity() {
    let ctx = TestContext::start(
        FakeBackend::default().with_client(7, "Ana", "ana@example.com", "secret"),
    )
    .await;

    let email = Email::parse("ana@example.com").unwrap();
    let session = ctx.api.auth.login(&email, "secret", Role::Client).await.unwrap();

    assert_eq!(
        session.identity,
        Some(Identity::Client {
            id: ClientId::new(7),
            name: "Ana".to_string(),
        })
    );

    // The resolved identity is persisted field-per-field.
    assert_eq!(ctx.store.get(keys::AUTHENTICATED).as_deref(), Some("true"));
    assert_eq!(ctx.store.get(keys::USER_TYPE).as_deref(), Some("CLIENT"));
    assert_eq!(ctx.store.get(keys::USER_ID).as_deref(), Some("7"));
    assert_eq!(ctx.store.get(keys::USER_NAME).as_deref(), Some("Ana"));

    assert!(ctx.api.auth.is_authenticated());
    assert_eq!(ctx.api.auth.role(), Some(Role::Client));
}

#[tokio::test]
async fn login_matches_exact_email_among_many() {
    let email = format!("unique-{}@example.com", Uuid::new_v4());
    let ctx = TestContext::start(
        FakeBackend::default()
            .with_client(1, "Other", "other@example.com", "secret")
            .with_client(2, "Match", &email, "secret")
            .with_client(3, "Another", "another@example.com", "secret"),
    )
    .await;

    let email = Email::parse(&email).unwrap();
    let session = ctx.api.auth.login(&email, "secret", Role::Client).await.unwrap();

    assert_eq!(
        session.identity,
        Some(Identity::Client {
            id: ClientId::new(2),
            name: "Match".to_string(),
        })
    );
}

#[tokio::test]
async fn login_without_directory_record_is_degraded_but_authenticated() {
    let ctx = TestContext::start(
        FakeBackend::default().with_password_only("ghost@example.com", "secret"),
    )
    .await;

    let email = Email::parse("ghost@example.com").unwrap();
    let session = ctx.api.auth.login(&email, "secret", Role::Client).await.unwrap();

    // Authenticated, but no identity fields persisted.
    assert!(session.identity.is_none());
    assert_eq!(ctx.store.get(keys::AUTHENTICATED).as_deref(), Some("true"));
    assert!(ctx.store.get(keys::USER_ID).is_none());
    assert!(ctx.store.get(keys::USER_NAME).is_none());
    assert!(ctx.api.auth.is_authenticated());
}

#[tokio::test]
async fn admin_login_resolves_from_admin_directory() {
    let ctx = TestContext::start(
        FakeBackend::default().with_admin(4, "Root", "root@example.com", "hunter2"),
    )
    .await;

    let email = Email::parse("root@example.com").unwrap();
    let session = ctx.api.auth.login(&email, "hunter2", Role::Admin).await.unwrap();

    assert_eq!(
        session.identity,
        Some(Identity::Admin {
            id: AdminId::new(4),
            name: "Root".to_string(),
        })
    );
    assert_eq!(ctx.api.auth.role(), Some(Role::Admin));
}

#[tokio::test]
async fn wrong_password_is_invalid_credentials_and_persists_nothing() {
    let ctx = TestContext::start(
        FakeBackend::default().with_client(7, "Ana", "ana@example.com", "secret"),
    )
    .await;

    let email = Email::parse("ana@example.com").unwrap();
    let result = ctx.api.auth.login(&email, "wrong", Role::Client).await;

    assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    assert!(!ctx.api.auth.is_authenticated());
    assert!(ctx.store.get(keys::AUTHENTICATED).is_none());
}

#[tokio::test]
async fn unreachable_backend_is_distinct_from_bad_credentials() {
    use std::sync::Arc;

    use game_harbor_client::{ClientConfig, GameHarborApi, MemoryStore};

    let config = ClientConfig::new("http://127.0.0.1:9".parse().unwrap());
    let api = GameHarborApi::new(&config, Arc::new(MemoryStore::new()));

    let email = Email::parse("ana@example.com").unwrap();
    let result = api.auth.login(&email, "secret", Role::Client).await;

    // The operational failure keeps its transport classification.
    assert!(matches!(result, Err(AuthError::Api(ApiError::Network(_)))));
}

#[tokio::test]
async fn logout_clears_every_session_key() {
    let ctx = TestContext::start(
        FakeBackend::default().with_client(7, "Ana", "ana@example.com", "secret"),
    )
    .await;

    let email = Email::parse("ana@example.com").unwrap();
    ctx.api.auth.login(&email, "secret", Role::Client).await.unwrap();
    assert!(ctx.api.auth.is_authenticated());

    ctx.api.auth.logout().unwrap();

    assert!(!ctx.api.auth.is_authenticated());
    for key in [
        keys::AUTHENTICATED,
        keys::USER_TYPE,
        keys::USER_EMAIL,
        keys::USER_ID,
        keys::USER_NAME,
        keys::AUTH_TOKEN,
    ] {
        assert!(ctx.store.get(key).is_none(), "{key} survived logout");
    }
}
