//! Handler for browser page signals.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::beacon::BeaconRequest;
use crate::application::services::IngestSummary;
use crate::error::AppError;
use crate::state::AppState;

/// Feeds a batch of signals into the trackers of an open page view.
///
/// # Endpoint
///
/// `POST /api/beacon`
///
/// # Response
///
/// `202 Accepted` with a summary; events are delivered in the background.
///
/// ```json
/// { "accepted": 2, "ignored": 1, "events": 3, "closed": false }
/// ```
///
/// # Errors
///
/// - 400 Bad Request for an empty or oversized batch
/// - 404 Not Found if the page view is unknown or already closed
pub async fn beacon_handler(
    State(state): State<AppState>,
    Json(payload): Json<BeaconRequest>,
) -> Result<(StatusCode, Json<IngestSummary>), AppError> {
    payload.validate()?;

    let summary = state
        .page_views
        .ingest(payload.page_view, &payload.signals)?;

    Ok((StatusCode::ACCEPTED, Json(summary)))
}
