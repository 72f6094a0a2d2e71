mod common;

use axum::http::{StatusCode, header};
use portfolio_site::domain::repositories::PreferenceStore;
use portfolio_site::domain::repositories::preference_store::DEFAULT_LANDING_KEY;
use portfolio_site::infrastructure::preferences::MemoryPreferenceStore;
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn test_get_domain_defaults_to_cs() {
    let (state, _rx) = common::create_test_state();
    let server = common::test_server(state);

    let response = server.get("/api/domain").await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["domain"], "cs");
    assert_eq!(json["default_landing"], "cs");
    assert_eq!(json["explicit"], false);
}

#[tokio::test]
async fn test_get_domain_reads_cookie() {
    let (state, _rx) = common::create_test_state();
    let server = common::test_server(state);

    let response = server
        .get("/api/domain")
        .add_header(
            header::COOKIE,
            common::cookie_header("portfolio-domain", "mechanical"),
        )
        .await;

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["domain"], "mechanical");
    assert_eq!(json["explicit"], true);
}

#[tokio::test]
async fn test_malformed_cookie_falls_back_to_default_landing() {
    let settings = Arc::new(MemoryPreferenceStore::new());
    settings.set(DEFAULT_LANDING_KEY, "mechanical").unwrap();
    let (state, _rx) = common::create_test_state_with(settings);
    let server = common::test_server(state);

    let response = server
        .get("/api/domain")
        .add_header(
            header::COOKIE,
            common::cookie_header("portfolio-domain", "robotics"),
        )
        .await;

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["domain"], "mechanical");
    assert_eq!(json["default_landing"], "mechanical");
    assert_eq!(json["explicit"], false);
}

#[tokio::test]
async fn test_switch_domain_sets_cookie_and_tracks() {
    let (state, mut rx) = common::create_test_state();
    let server = common::test_server(state);

    let response = server
        .put("/api/domain")
        .json(&json!({ "domain": "mechanical" }))
        .await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["domain"], "mechanical");
    assert_eq!(json["previous"], "cs");
    assert_eq!(json["changed"], true);
    assert_eq!(
        common::set_cookie_value(&response, "portfolio-domain").as_deref(),
        Some("mechanical")
    );

    let events = common::drain_events(&mut rx);
    assert_eq!(common::actions(&events), vec!["domain_switch"]);
    assert_eq!(events[0].label.as_deref(), Some("cs_to_mechanical"));
}

#[tokio::test]
async fn test_switch_to_same_domain_is_not_tracked() {
    let (state, mut rx) = common::create_test_state();
    let server = common::test_server(state);

    let response = server
        .put("/api/domain")
        .add_header(header::COOKIE, common::cookie_header("portfolio-domain", "cs"))
        .json(&json!({ "domain": "cs" }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<serde_json::Value>()["changed"], false);
    assert!(common::drain_events(&mut rx).is_empty());
}

#[tokio::test]
async fn test_switch_rejects_unknown_domain() {
    let (state, mut rx) = common::create_test_state();
    let server = common::test_server(state);

    let response = server
        .put("/api/domain")
        .json(&json!({ "domain": "robotics" }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert!(common::drain_events(&mut rx).is_empty());
}

#[tokio::test]
async fn test_form_toggle_redirects_back() {
    let (state, mut rx) = common::create_test_state();
    let server = common::test_server(state);

    let response = server
        .post("/domain")
        .form(&[("domain", "mechanical"), ("return_to", "/#projects")])
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(common::location(&response), "/#projects");
    assert_eq!(
        common::set_cookie_value(&response, "portfolio-domain").as_deref(),
        Some("mechanical")
    );
    assert_eq!(
        common::actions(&common::drain_events(&mut rx)),
        vec!["domain_switch"]
    );
}

#[tokio::test]
async fn test_form_toggle_ignores_external_return_path() {
    let (state, _rx) = common::create_test_state();
    let server = common::test_server(state);

    let response = server
        .post("/domain")
        .form(&[("domain", "cs"), ("return_to", "https://evil.example.com")])
        .await;

    assert_eq!(common::location(&response), "/");
}
