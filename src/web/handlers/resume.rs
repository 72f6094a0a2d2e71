//! Resume download and view.

use axum::{
    extract::{Path, State},
    response::Redirect,
};
use serde_json::json;

use crate::domain::entities::{ParseDomainError, PortfolioDomain};
use crate::error::AppError;
use crate::state::AppState;

fn parse_domain(raw: &str) -> Result<PortfolioDomain, AppError> {
    raw.parse()
        .map_err(|e: ParseDomainError| AppError::not_found(e.to_string(), json!({ "domain": e.0 })))
}

/// Records a download and sends the browser to the domain's PDF.
///
/// # Endpoint
///
/// `GET /resume/{domain}`
///
/// # Errors
///
/// Returns 404 Not Found for an unknown domain.
pub async fn resume_download_handler(
    State(state): State<AppState>,
    Path(domain): Path<String>,
) -> Result<Redirect, AppError> {
    let domain = parse_domain(&domain)?;
    state.analytics.track_resume_download(domain);
    Ok(Redirect::to(&state.content.resume_path(domain)))
}

/// Records a view and opens the domain's PDF.
///
/// # Endpoint
///
/// `GET /resume/{domain}/view`
///
/// # Errors
///
/// Returns 404 Not Found for an unknown domain.
pub async fn resume_view_handler(
    State(state): State<AppState>,
    Path(domain): Path<String>,
) -> Result<Redirect, AppError> {
    let domain = parse_domain(&domain)?;
    state.analytics.track_resume_view(domain);
    Ok(Redirect::to(&state.content.resume_path(domain)))
}
