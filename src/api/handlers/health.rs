//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};
use std::collections::BTreeMap;

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Components Checked
///
/// 1. **Analytics queue**: Channel open, capacity and drop count
/// 2. **Page views**: Number of open page views
/// 3. **Collectors**: Whether each collector's last delivery succeeded
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "analytics_queue": { "status": "ok", "message": "Available: 10000/10000, dropped: 0" },
///     "page_views": { "status": "ok", "message": "Open: 3" },
///     "collectors": { "log": { "status": "ok", "message": "Delivering" } }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let queue_check = check_analytics_queue(&state);

    let page_views_check = CheckStatus::ok(format!("Open: {}", state.page_views.open_count()));

    let collector_checks = check_collectors(&state).await;

    let all_healthy = queue_check.is_ok() && collector_checks.values().all(CheckStatus::is_ok);

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            analytics_queue: queue_check,
            page_views: page_views_check,
            collectors: collector_checks,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Checks if the analytics queue is operational.
fn check_analytics_queue(state: &AppState) -> CheckStatus {
    if !state.analytics.is_running() {
        return CheckStatus::error("Analytics queue is closed");
    }
    let stats = state.analytics.stats();
    CheckStatus::ok(format!(
        "Available: {}/{}, dropped: {}",
        stats.available, stats.capacity, stats.dropped
    ))
}

/// Asks every collector whether its last delivery succeeded.
async fn check_collectors(state: &AppState) -> BTreeMap<&'static str, CheckStatus> {
    let mut checks = BTreeMap::new();
    for collector in state.collectors.iter() {
        let check = if collector.health_check().await {
            CheckStatus::ok("Delivering")
        } else {
            CheckStatus::error("Last delivery failed")
        };
        checks.insert(collector.name(), check);
    }
    checks
}
