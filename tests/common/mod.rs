#![allow(dead_code)]

use axum::Router;
use axum::http::{HeaderValue, StatusCode, header};
use axum_test::TestServer;
use portfolio_site::application::services::AdminCredentials;
use portfolio_site::domain::analytics_event::AnalyticsEvent;
use portfolio_site::domain::content_store::ContentStore;
use portfolio_site::domain::entities::PortfolioDomain;
use portfolio_site::domain::repositories::PreferenceStore;
use portfolio_site::infrastructure::collectors::{AnalyticsCollector, LogCollector};
use portfolio_site::infrastructure::preferences::MemoryPreferenceStore;
use portfolio_site::routes;
use portfolio_site::state::{AppState, StateOptions};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

pub const ADMIN_USERNAME: &str = "owner";
pub const ADMIN_PASSWORD: &str = "correct-horse-battery";

pub fn create_test_state() -> (AppState, mpsc::Receiver<AnalyticsEvent>) {
    create_test_state_with(Arc::new(MemoryPreferenceStore::new()))
}

pub fn create_test_state_with(
    settings: Arc<dyn PreferenceStore>,
) -> (AppState, mpsc::Receiver<AnalyticsEvent>) {
    let (tx, rx) = mpsc::channel(1000);
    let collectors: Vec<Arc<dyn AnalyticsCollector>> = vec![Arc::new(LogCollector::new())];

    let state = AppState::new(
        StateOptions {
            content: ContentStore::builtin(),
            settings,
            default_domain: PortfolioDomain::Cs,
            collectors,
            credentials: Some(AdminCredentials {
                username: ADMIN_USERNAME.to_string(),
                password: ADMIN_PASSWORD.to_string(),
            }),
            signing_secret: "test-signing-secret".to_string(),
            session_ttl: chrono::Duration::minutes(30),
            page_view_idle: Duration::from_secs(1800),
            time_flush_period: Duration::from_secs(120),
            cookie_secure: false,
        },
        tx,
    );

    (state, rx)
}

/// The full application router without rate limits.
pub fn test_app(state: AppState) -> Router {
    routes::router(state, Path::new("static"), false)
}

pub fn test_server(state: AppState) -> TestServer {
    TestServer::new(test_app(state)).unwrap()
}

/// Every event queued so far.
pub fn drain_events(rx: &mut mpsc::Receiver<AnalyticsEvent>) -> Vec<AnalyticsEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

pub fn actions(events: &[AnalyticsEvent]) -> Vec<&str> {
    events.iter().map(|e| e.action.as_str()).collect()
}

pub fn cookie_header(name: &str, value: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("{name}={value}")).unwrap()
}

/// Logs in and returns the raw session token.
pub async fn login(server: &TestServer) -> String {
    let response = server
        .post("/admin/login")
        .form(&[("username", ADMIN_USERNAME), ("password", ADMIN_PASSWORD)])
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    set_cookie_value(&response, "admin_session").expect("session cookie")
}

/// Value of the first `Set-Cookie` for `name`.
pub fn set_cookie_value(response: &axum_test::TestResponse, name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(|v| v.strip_prefix(prefix.as_str()))
        .map(|rest| rest.split(';').next().unwrap_or_default().to_string())
}

pub fn location(response: &axum_test::TestResponse) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Extracts the page view id embedded in the portfolio page.
pub fn page_view_id(html: &str) -> String {
    let marker = "data-page-view=\"";
    let start = html.find(marker).expect("page view attribute") + marker.len();
    let end = html[start..].find('"').unwrap() + start;
    html[start..end].to_string()
}
