mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};
use uuid::Uuid;

async fn open_view(server: &TestServer) -> String {
    common::page_view_id(&server.get("/").await.text())
}

fn scroll(scroll_top: f64, frame: u64) -> Value {
    json!({
        "kind": "scroll",
        "scroll_top": scroll_top,
        "document_height": 1800.0,
        "viewport_height": 800.0,
        "frame": frame,
    })
}

#[tokio::test]
async fn test_scroll_signals_emit_thresholds_once() {
    let (state, mut rx) = common::create_test_state();
    let server = common::test_server(state);
    let page_view = open_view(&server).await;
    common::drain_events(&mut rx);

    let response = server
        .post("/api/beacon")
        .json(&json!({
            "page_view": page_view,
            "signals": [scroll(300.0, 1), scroll(600.0, 2), scroll(800.0, 3)],
        }))
        .await;

    response.assert_status(StatusCode::ACCEPTED);
    let summary = response.json::<Value>();
    assert_eq!(summary["accepted"], 3);
    assert_eq!(summary["ignored"], 0);
    assert_eq!(summary["closed"], false);

    let events = common::drain_events(&mut rx);
    let values: Vec<Option<i64>> = events.iter().map(|e| e.value).collect();
    assert_eq!(common::actions(&events), vec!["scroll_depth"; 3]);
    assert_eq!(values, vec![Some(25), Some(50), Some(75)]);
}

#[tokio::test]
async fn test_stale_frames_are_skipped() {
    let (state, mut rx) = common::create_test_state();
    let server = common::test_server(state);
    let page_view = open_view(&server).await;
    common::drain_events(&mut rx);

    server
        .post("/api/beacon")
        .json(&json!({ "page_view": page_view, "signals": [scroll(100.0, 5)] }))
        .await;
    server
        .post("/api/beacon")
        .json(&json!({ "page_view": page_view, "signals": [scroll(1000.0, 4)] }))
        .await;

    assert!(common::drain_events(&mut rx).is_empty());
}

#[tokio::test]
async fn test_interactions_and_performance() {
    let (state, mut rx) = common::create_test_state();
    let server = common::test_server(state);
    let page_view = open_view(&server).await;
    common::drain_events(&mut rx);

    let lcp = json!({
        "kind": "performance",
        "entry": { "entry_type": "largest-contentful-paint", "start_time": 1234.4 },
    });
    let response = server
        .post("/api/beacon")
        .json(&json!({
            "page_view": page_view,
            "signals": [
                { "kind": "interaction", "event": { "type": "skill_hover", "skill": "Rust" } },
                lcp.clone(),
                lcp,
                { "kind": "performance", "entry": { "entry_type": "paint", "start_time": 10.0 } },
            ],
        }))
        .await;

    let summary = response.json::<Value>();
    assert_eq!(summary["accepted"], 3);
    assert_eq!(summary["ignored"], 1);
    assert_eq!(summary["events"], 2);

    let events = common::drain_events(&mut rx);
    assert_eq!(common::actions(&events), vec!["skill_hover", "performance"]);
    assert_eq!(events[0].label.as_deref(), Some("cs_Rust"));
    assert_eq!(events[1].label.as_deref(), Some("LCP"));
    assert_eq!(events[1].value, Some(1234));
}

#[tokio::test]
async fn test_unload_closes_the_view() {
    let (state, _rx) = common::create_test_state();
    let server = common::test_server(state.clone());
    let page_view = open_view(&server).await;

    let response = server
        .post("/api/beacon")
        .json(&json!({ "page_view": page_view, "signals": [{ "kind": "unload" }] }))
        .await;

    response.assert_status(StatusCode::ACCEPTED);
    assert_eq!(response.json::<Value>()["closed"], true);
    assert_eq!(state.page_views.open_count(), 0);

    server
        .post("/api/beacon")
        .json(&json!({ "page_view": page_view, "signals": [scroll(100.0, 1)] }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_page_view_is_not_found() {
    let (state, _rx) = common::create_test_state();
    let server = common::test_server(state);

    let response = server
        .post("/api/beacon")
        .json(&json!({ "page_view": Uuid::new_v4(), "signals": [{ "kind": "unload" }] }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_empty_batch_is_rejected() {
    let (state, _rx) = common::create_test_state();
    let server = common::test_server(state);
    let page_view = open_view(&server).await;

    server
        .post("/api/beacon")
        .json(&json!({ "page_view": page_view, "signals": [] }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}
