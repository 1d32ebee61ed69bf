mod common;

use std::time::Duration;

use anyhow::Result;
use axum::http::Method;
use serde_json::json;

use common::{api_for, closed_port_config, resource_controller, signed_in_store, MockBackend, Reply};
use hrms_client::api::{endpoints, RequestOptions};
use hrms_client::error::ApiError;
use hrms_client::models::DashboardSummary;
use hrms_client::screen::{ResourceController, Status};

#[tokio::test]
async fn slow_reply_is_a_timeout() -> Result<()> {
    let backend = MockBackend::start().await?;
    backend.on(
        Method::GET,
        "/dashboard",
        vec![Reply::ok(json!({ "success": true, "data": {} })).delayed(Duration::from_millis(500))],
    );

    let mut config = backend.config();
    config.api.request_timeout_ms = 100;
    let api = api_for(&config);

    let err = api.get("/dashboard", RequestOptions::new()).await.unwrap_err();
    assert_eq!(err, ApiError::Timeout);
    assert_eq!(err.user_message(), "Request timed out. Please try again.");

    // A per-request timeout overrides the default
    let ok = api
        .get("/dashboard", RequestOptions::new().timeout(Duration::from_secs(2)))
        .await?;
    assert_eq!(ok.status, 200);
    Ok(())
}

#[tokio::test]
async fn closed_port_is_network_unreachable() -> Result<()> {
    let api = api_for(&closed_port_config());

    let err = api.get("/dashboard", RequestOptions::new()).await.unwrap_err();
    assert!(matches!(err, ApiError::NetworkUnreachable(_)));
    assert_eq!(err.user_message(), "Network error. Please check your internet connection.");
    Ok(())
}

#[tokio::test]
async fn screen_shows_timeout_message() -> Result<()> {
    let backend = MockBackend::start().await?;
    backend.on(
        Method::GET,
        "/dashboard",
        vec![Reply::ok(json!({ "success": true, "data": {} })).delayed(Duration::from_millis(500))],
    );

    let mut config = backend.config();
    config.api.request_timeout_ms = 100;
    let controller: ResourceController<DashboardSummary> = ResourceController::new(
        api_for(&config),
        hrms_client::session::SessionContext::new(signed_in_store()),
        endpoints::dashboard(),
    );
    controller.load().await;

    let state = controller.state();
    assert_eq!(state.status, Status::Error);
    assert_eq!(state.error_message.as_deref(), Some("Request timed out. Please try again."));

    // Default config waits long enough
    let patient: ResourceController<DashboardSummary> =
        resource_controller(&backend, signed_in_store(), endpoints::dashboard());
    patient.load().await;
    assert_eq!(patient.state().status, Status::Ready);
    Ok(())
}
