mod common;

use axum::{Router, http::StatusCode, routing::get};
use axum_test::TestServer;
use portfolio_site::api::handlers::health_handler;

#[tokio::test]
async fn test_health_endpoint_success() {
    let (state, _rx) = common::create_test_state();
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["analytics_queue"]["status"], "ok");
    assert_eq!(json["checks"]["collectors"]["log"]["status"], "ok");
}

#[tokio::test]
async fn test_health_endpoint_structure() {
    let (state, _rx) = common::create_test_state();
    let server = common::test_server(state);

    let response = server.get("/health").await;

    let json = response.json::<serde_json::Value>();

    assert!(json.get("status").is_some());
    assert!(json.get("version").is_some());
    assert!(json["checks"].get("analytics_queue").is_some());
    assert!(json["checks"].get("page_views").is_some());
    assert!(json["checks"].get("collectors").is_some());
}

#[tokio::test]
async fn test_health_degraded_when_worker_stopped() {
    let (state, rx) = common::create_test_state();
    drop(rx);
    let server = common::test_server(state);

    let response = server.get("/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["analytics_queue"]["status"], "error");
}
