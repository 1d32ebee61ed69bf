mod common;

use anyhow::Result;
use axum::http::Method;
use serde_json::json;

use common::{login_success, session_controller, signed_in_store, MockBackend, Reply};
use hrms_client::session::{Credentials, LogoutDecision, LogoutOutcome, Role, Route, SessionState};
use hrms_client::store::{CredentialStore, FileCredentialStore, MemoryCredentialStore, StoreKey};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[tokio::test]
async fn login_persists_session_and_credentials() -> Result<()> {
    let backend = MockBackend::start().await?;
    backend.on(
        Method::POST,
        "/login",
        vec![Reply::ok(json!({ "token": "abc", "user": { "id": 1, "name": "A" } }))],
    );

    let store = Arc::new(MemoryCredentialStore::new());
    let mut controller = session_controller(&backend, store.clone());

    let session = controller.login(Credentials::new(Role::Hr, "a@x.com", "secret")).await?;
    assert_eq!(session.token, "abc");
    assert_eq!(session.role, Role::Hr);

    let stored = store.snapshot().await;
    assert_eq!(stored.get(&StoreKey::UserToken).map(String::as_str), Some("abc"));
    assert_eq!(stored.get(&StoreKey::UserRole).map(String::as_str), Some("hr"));
    assert_eq!(stored.get(&StoreKey::Email).map(String::as_str), Some("a@x.com"));
    assert_eq!(stored.get(&StoreKey::Password).map(String::as_str), Some("secret"));
    assert!(controller.state().is_authenticated());
    assert_eq!(controller.navigator().last(), Some(Route::Landing));

    let hit = &backend.hits_to("/login")[0];
    assert_eq!(hit.body, Some(json!({ "role": "hr", "email": "a@x.com", "password": "secret" })));
    Ok(())
}

#[tokio::test]
async fn login_failure_leaves_store_untouched() -> Result<()> {
    let backend = MockBackend::start().await?;
    backend.on(
        Method::POST,
        "/login",
        vec![Reply::status(401, json!({ "message": "Invalid email or password" }))],
    );

    let store = signed_in_store();
    let before = store.snapshot().await;
    let mut controller = session_controller(&backend, store.clone());

    let err = controller
        .login(Credentials::new(Role::Admin, "x@y.com", "wrong"))
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), "Invalid email or password");
    assert_eq!(controller.state().error(), Some("Invalid email or password"));
    assert_eq!(store.snapshot().await, before);
    Ok(())
}

#[tokio::test]
async fn login_rejects_blank_fields_without_network() -> Result<()> {
    let backend = MockBackend::start().await?;
    let mut controller = session_controller(&backend, Arc::new(MemoryCredentialStore::new()));

    let err = controller.login(Credentials::new(Role::Hr, "  ", "secret")).await.unwrap_err();
    assert_eq!(err.user_message(), "Please enter both email and password");
    assert!(backend.hits().is_empty());
    Ok(())
}

#[tokio::test]
async fn cold_start_replays_stored_credentials() -> Result<()> {
    let backend = MockBackend::start().await?;
    backend.on(Method::POST, "/login", vec![Reply::ok(login_success("fresh-token", "hr"))]);

    let store = signed_in_store();
    let mut controller = session_controller(&backend, store.clone());

    assert!(controller.cold_start().await.is_authenticated());
    assert_eq!(controller.navigator().last(), Some(Route::Landing));

    let stored = store.snapshot().await;
    assert_eq!(stored.get(&StoreKey::UserToken).map(String::as_str), Some("fresh-token"));
    assert_eq!(stored.get(&StoreKey::Password).map(String::as_str), Some("secret"));

    let hit = &backend.hits_to("/login")[0];
    assert_eq!(hit.body.as_ref().and_then(|b| b.get("email")), Some(&json!("priya@example.com")));
    Ok(())
}

#[tokio::test]
async fn cold_start_purges_store_when_replay_is_rejected() -> Result<()> {
    let backend = MockBackend::start().await?;
    backend.on(Method::POST, "/login", vec![Reply::status(401, json!({}))]);

    let store = signed_in_store();
    let mut controller = session_controller(&backend, store.clone());

    let state = controller.cold_start().await.clone();
    assert_eq!(
        state,
        SessionState::Unauthenticated {
            error: Some("Session expired. Please log in again.".to_string())
        }
    );
    assert!(store.snapshot().await.is_empty());
    assert_eq!(
        controller.navigator().last(),
        Some(Route::Login {
            error: Some("Session expired. Please log in again.".to_string())
        })
    );
    Ok(())
}

#[tokio::test]
async fn cold_start_prefers_server_message() -> Result<()> {
    let backend = MockBackend::start().await?;
    backend.on(
        Method::POST,
        "/login",
        vec![Reply::status(403, json!({ "message": "Account blocked" }))],
    );

    let mut controller = session_controller(&backend, signed_in_store());
    assert_eq!(controller.cold_start().await.error(), Some("Account blocked"));
    Ok(())
}

#[tokio::test]
async fn cold_start_without_credentials_goes_to_login() -> Result<()> {
    let backend = MockBackend::start().await?;
    let store = Arc::new(MemoryCredentialStore::with_entries([(StoreKey::UserToken, "stale".to_string())]));
    let mut controller = session_controller(&backend, store.clone());

    let state = controller.cold_start().await.clone();
    assert_eq!(state, SessionState::Unauthenticated { error: None });
    assert!(store.snapshot().await.is_empty());
    assert!(backend.hits().is_empty());
    Ok(())
}

#[tokio::test]
async fn logout_cancel_and_confirm() -> Result<()> {
    let backend = MockBackend::start().await?;
    let store = signed_in_store();
    let mut controller = session_controller(&backend, store.clone());
    controller.resume().await;
    assert!(controller.state().is_authenticated());

    assert_eq!(controller.logout(LogoutDecision::Cancel).await?, LogoutOutcome::Cancelled);
    assert!(controller.state().is_authenticated());
    assert_eq!(store.snapshot().await.len(), 5);

    assert_eq!(controller.logout(LogoutDecision::Confirm).await?, LogoutOutcome::LoggedOut);
    assert_eq!(*controller.state(), SessionState::Unauthenticated { error: None });

    // Default policy only drops the session, keeping email and password
    let stored = store.snapshot().await;
    assert!(!stored.contains_key(&StoreKey::UserToken));
    assert!(!stored.contains_key(&StoreKey::UserData));
    assert!(!stored.contains_key(&StoreKey::UserRole));
    assert!(stored.contains_key(&StoreKey::Email));
    assert!(stored.contains_key(&StoreKey::Password));
    Ok(())
}

#[tokio::test]
async fn logout_failure_keeps_session() -> Result<()> {
    let backend = MockBackend::start().await?;
    let store = signed_in_store();
    let mut controller = session_controller(&backend, store.clone());
    controller.resume().await;

    store.set_unavailable(true);
    let err = controller.logout(LogoutDecision::Confirm).await.unwrap_err();
    assert_eq!(err.user_message(), "Failed to logout properly");
    assert!(controller.state().is_authenticated());
    Ok(())
}

#[tokio::test]
async fn cold_start_gives_up_after_reauth_timeout() -> Result<()> {
    let backend = MockBackend::start().await?;
    backend.on(
        Method::POST,
        "/login",
        vec![Reply::ok(login_success("slow-token", "hr")).delayed(Duration::from_millis(600))],
    );

    let mut config = backend.config();
    config.api.reauth_timeout_ms = 100;
    config.api.request_timeout_ms = 5_000;

    let store = signed_in_store();
    let mut controller = common::session_controller_with_config(&config, store.clone());

    let started = Instant::now();
    let state = controller.cold_start().await.clone();
    assert!(started.elapsed() < Duration::from_millis(500));
    assert_eq!(state.error(), Some("Session expired. Please log in again."));
    assert!(store.snapshot().await.is_empty());

    // Explicit login waits for the longer request timeout
    let session = controller.login(Credentials::new(Role::Hr, "priya@example.com", "secret")).await?;
    assert_eq!(session.token, "slow-token");
    Ok(())
}

#[tokio::test]
async fn cold_start_unreachable_server_expires_session() -> Result<()> {
    let config = common::closed_port_config();
    let store = signed_in_store();
    let mut controller = common::session_controller_with_config(&config, store.clone());

    let state = controller.cold_start().await.clone();
    assert_eq!(
        state,
        SessionState::Unauthenticated {
            error: Some("Session expired. Please log in again.".to_string())
        }
    );
    assert!(store.snapshot().await.is_empty());
    Ok(())
}

#[tokio::test]
async fn login_recovers_from_corrupt_credential_file() -> Result<()> {
    let backend = MockBackend::start().await?;
    backend.on(
        Method::POST,
        "/login",
        vec![Reply::ok(json!({ "token": "abc", "user": { "id": 1, "name": "A" } }))],
    );

    let dir = common::scratch_dir();
    std::fs::create_dir_all(&dir)?;
    std::fs::write(dir.join("credentials.json"), r#"{"userToken": "ab"#)?;
    let store: Arc<dyn CredentialStore> = Arc::new(FileCredentialStore::new(&dir));

    let mut controller = session_controller(&backend, store.clone());
    assert_eq!(*controller.cold_start().await, SessionState::Unauthenticated { error: None });

    controller.login(Credentials::new(Role::Hr, "a@x.com", "secret")).await?;
    assert_eq!(store.get(StoreKey::UserToken).await?, Some("abc".to_string()));

    // The next process start sees the saved session
    let mut restarted = session_controller(&backend, store.clone());
    assert!(restarted.resume().await.is_authenticated());

    let _ = std::fs::remove_dir_all(dir);
    Ok(())
}
