//! Handler for the per-domain content endpoint.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::json;

use crate::api::dto::content::ContentResponse;
use crate::domain::entities::PortfolioDomain;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the content shown for one domain.
///
/// # Endpoint
///
/// `GET /api/content/{domain}`
///
/// # Errors
///
/// Returns 400 Bad Request if `domain` is not `cs` or `mechanical`.
pub async fn content_handler(
    State(state): State<AppState>,
    Path(domain): Path<String>,
) -> Result<Json<ContentResponse>, AppError> {
    let domain: PortfolioDomain = domain
        .parse()
        .map_err(|e: crate::domain::entities::ParseDomainError| {
            AppError::bad_request(e.to_string(), json!({ "domain": e.0 }))
        })?;

    Ok(Json(ContentResponse::from_store(&state.content, domain)))
}
