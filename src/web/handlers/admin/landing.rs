//! Default landing domain settings.
//!
//! Unlike the edit buffers, the default landing is site-wide: saving it
//! writes the settings store and takes effect for every new visitor.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension, Form,
    extract::State,
    http::HeaderMap,
    response::{AppendHeaders, IntoResponse, Redirect},
};
use serde::Deserialize;

use super::{AdminNav, SelectOption};
use crate::domain::entities::{AdminSession, PortfolioDomain};
use crate::domain::workspace::Notice;
use crate::error::AppError;
use crate::state::AppState;
use crate::web::cookies::CookiePreferences;

const LANDING_PATH: &str = "/admin/landing";

#[derive(Template, WebTemplate)]
#[template(path = "admin/landing.html")]
pub struct LandingTemplate {
    pub nav: AdminNav,
    /// What this admin's browser currently shows.
    pub current: PortfolioDomain,
    pub configured: Option<PortfolioDomain>,
    pub effective: PortfolioDomain,
    pub fallback: PortfolioDomain,
    pub options: Vec<SelectOption>,
}

/// # Endpoint
///
/// `GET /admin/landing`
pub async fn landing_handler(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let prefs = CookiePreferences::from_headers(&headers, state.cookie_secure);
    let selector = &state.domain_selector;
    let effective = selector.get_default_landing();

    let nav = state
        .workspaces
        .with(&session.token_hash, |ws| AdminNav::new(ws, &session, "landing"));

    LandingTemplate {
        nav,
        current: selector.get_domain(&prefs),
        configured: selector.configured_default_landing(),
        effective,
        fallback: selector.fallback(),
        options: PortfolioDomain::ALL
            .into_iter()
            .map(|d| SelectOption::new(d.as_str(), d.label(), Some(effective.as_str())))
            .collect(),
    }
}

#[derive(Debug, Deserialize)]
pub struct LandingForm {
    pub domain: PortfolioDomain,
}

fn notify(state: &AppState, session: &AdminSession, result: Result<Notice, AppError>) {
    let notice = result.unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to update default landing domain");
        Notice::error("Error", e.message().to_string())
    });
    state
        .workspaces
        .with(&session.token_hash, |ws| ws.set_notice(notice));
}

/// `POST /admin/landing`
pub async fn save_landing_handler(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Form(form): Form<LandingForm>,
) -> Redirect {
    let result = state
        .domain_selector
        .set_default_landing(form.domain)
        .map(|_| {
            Notice::success(
                "Saved",
                format!("New visitors now land on {}", form.domain.label()),
            )
        });
    notify(&state, &session, result);
    Redirect::to(LANDING_PATH)
}

/// `POST /admin/landing/reset`
pub async fn reset_landing_handler(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
) -> Redirect {
    let fallback = state.domain_selector.fallback();
    let result = state.domain_selector.reset_default_landing().map(|_| {
        Notice::success(
            "Reset",
            format!("Default landing restored to {}", fallback.label()),
        )
    });
    notify(&state, &session, result);
    Redirect::to(LANDING_PATH)
}

/// Switches the admin's own browser to the effective default landing.
///
/// `POST /admin/landing/apply`
pub async fn apply_landing_handler(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let prefs = CookiePreferences::from_headers(&headers, state.cookie_secure);
    let landing = state.domain_selector.get_default_landing();

    let result = state
        .domain_selector
        .set_domain(&prefs, landing)
        .map(|_| Notice::success("Applied", format!("Now viewing {}", landing.label())));
    notify(&state, &session, result);

    (
        AppendHeaders(prefs.set_cookie_headers()),
        Redirect::to(LANDING_PATH),
    )
}
