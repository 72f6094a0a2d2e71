//! Handlers for reading and switching the visitor's domain.

use axum::{
    Json,
    extract::State,
    http::HeaderMap,
    response::{AppendHeaders, IntoResponse},
};

use crate::api::dto::domain::{DomainResponse, SwitchDomainRequest, SwitchDomainResponse};
use crate::domain::repositories::PreferenceStore;
use crate::domain::repositories::preference_store::DOMAIN_KEY;
use crate::error::AppError;
use crate::state::AppState;
use crate::web::cookies::CookiePreferences;

/// Returns the visitor's active domain.
///
/// # Endpoint
///
/// `GET /api/domain`
///
/// # Response
///
/// ```json
/// { "domain": "mechanical", "default_landing": "cs", "explicit": true }
/// ```
pub async fn get_domain_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Json<DomainResponse> {
    let prefs = CookiePreferences::from_headers(&headers, state.cookie_secure);
    let domain = state.domain_selector.get_domain(&prefs);

    Json(DomainResponse {
        domain,
        default_landing: state.domain_selector.get_default_landing(),
        explicit: prefs.get(DOMAIN_KEY).is_some_and(|v| v == domain.as_str()),
    })
}

/// Switches the visitor's domain and persists it in a cookie.
///
/// # Endpoint
///
/// `PUT /api/domain`
///
/// # Request Body
///
/// ```json
/// { "domain": "mechanical" }
/// ```
///
/// A `domain_switch` event is recorded when the domain actually changes.
///
/// # Errors
///
/// Returns 422 Unprocessable Entity for an unknown domain and 500 if the
/// preference cannot be stored.
pub async fn switch_domain_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<SwitchDomainRequest>,
) -> Result<impl IntoResponse, AppError> {
    let prefs = CookiePreferences::from_headers(&headers, state.cookie_secure);
    let previous = state.domain_selector.get_domain(&prefs);

    state.domain_selector.set_domain(&prefs, payload.domain)?;
    let changed = previous != payload.domain;
    if changed {
        state.analytics.track_domain_switch(previous, payload.domain);
    }

    Ok((
        AppendHeaders(prefs.set_cookie_headers()),
        Json(SwitchDomainResponse {
            domain: payload.domain,
            previous,
            changed,
        }),
    ))
}
