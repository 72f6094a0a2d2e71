//! Admin login and logout.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::{HeaderMap, StatusCode, header::SET_COOKIE},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::state::AppState;
use crate::web::cookies::{SESSION_COOKIE, clear_cookie, read_cookie, session_cookie};
use crate::web::middleware::admin_auth::LOGIN_PATH;

/// Template for the login page.
///
/// Renders `templates/admin/login.html` with the last submitted username and,
/// after a failed attempt, a visible error.
#[derive(Template, WebTemplate)]
#[template(path = "admin/login.html")]
pub struct LoginTemplate {
    pub username: String,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Renders the login page, or goes straight to the dashboard for a live session.
///
/// # Endpoint
///
/// `GET /admin/login`
pub async fn login_page_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = read_cookie(&headers, SESSION_COOKIE)
        && state.auth_service.authenticate(&token).await.is_ok()
    {
        return Redirect::to("/admin").into_response();
    }

    LoginTemplate {
        username: String::new(),
        error: None,
    }
    .into_response()
}

/// Checks the credential pair.
///
/// # Endpoint
///
/// `POST /admin/login`
///
/// On success sets the `admin_session` cookie and redirects to `/admin`.
/// On failure re-renders the form with `401 Unauthorized` and an error
/// message; no session is created.
pub async fn login_handler(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Response {
    match state
        .auth_service
        .login(&form.username, &form.password)
        .await
    {
        Ok(outcome) => (
            AppendHeaders([(
                SET_COOKIE,
                session_cookie(&outcome.token, state.cookie_secure),
            )]),
            Redirect::to("/admin"),
        )
            .into_response(),
        Err(e) => (
            StatusCode::UNAUTHORIZED,
            LoginTemplate {
                username: form.username,
                error: Some(e.message().to_string()),
            },
        )
            .into_response(),
    }
}

/// Ends the admin session and drops its edit buffers.
///
/// # Endpoint
///
/// `POST /admin/logout`
pub async fn logout_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = read_cookie(&headers, SESSION_COOKIE) {
        match state.auth_service.logout(&token).await {
            Ok(Some(hash)) => {
                state.workspaces.discard(&hash);
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "Failed to end admin session"),
        }
    }

    (
        AppendHeaders([(SET_COOKIE, clear_cookie(SESSION_COOKIE, state.cookie_secure))]),
        Redirect::to(LOGIN_PATH),
    )
        .into_response()
}
