//! Admin analytics report.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension,
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;

use super::{AdminNav, SelectOption};
use crate::domain::entities::AdminSession;
use crate::domain::workspace::{AnalyticsReport, TimeRange};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    pub range: Option<String>,
}

#[derive(Template, WebTemplate)]
#[template(path = "admin/analytics.html")]
pub struct AnalyticsTemplate {
    pub nav: AdminNav,
    pub ranges: Vec<SelectOption>,
    pub report: AnalyticsReport,
}

fn range_label(range: TimeRange) -> &'static str {
    match range {
        TimeRange::Last24h => "Last 24 hours",
        TimeRange::Last7d => "Last 7 days",
        TimeRange::Last30d => "Last 30 days",
    }
}

/// Renders the analytics report for a time range.
///
/// # Endpoint
///
/// `GET /admin/analytics?range=24h|7d|30d`
///
/// Unknown or missing ranges show the last 7 days.
pub async fn analytics_handler(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Query(query): Query<RangeQuery>,
) -> impl IntoResponse {
    let range = query
        .range
        .as_deref()
        .and_then(|r| r.parse::<TimeRange>().ok())
        .unwrap_or_default();

    let nav = state
        .workspaces
        .with(&session.token_hash, |ws| AdminNav::new(ws, &session, "analytics"));

    AnalyticsTemplate {
        nav,
        ranges: TimeRange::ALL
            .into_iter()
            .map(|r| SelectOption::new(r.as_str(), range_label(r), Some(range.as_str())))
            .collect(),
        report: AnalyticsReport::for_range(range),
    }
}
