//! Domain switch from the header toggle.

use axum::{
    Form,
    extract::State,
    http::HeaderMap,
    response::{AppendHeaders, IntoResponse, Redirect},
};
use serde::Deserialize;

use crate::domain::entities::PortfolioDomain;
use crate::error::AppError;
use crate::state::AppState;
use crate::web::cookies::CookiePreferences;

#[derive(Debug, Deserialize)]
pub struct SwitchDomainForm {
    pub domain: PortfolioDomain,
    /// Local path to return to; anything else falls back to `/`.
    pub return_to: Option<String>,
}

/// Only same-site absolute paths are followed.
pub(crate) fn safe_return_path(candidate: Option<&str>) -> &str {
    match candidate {
        // Browsers read a backslash as a slash, so `/\host` is protocol-relative.
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.contains('\\')
                && !path.chars().any(char::is_control) =>
        {
            path
        }
        _ => "/",
    }
}

/// Switches the visitor's domain and redirects back.
///
/// # Endpoint
///
/// `POST /domain`
///
/// Records `domain_switch` when the domain actually changes.
pub async fn switch_domain_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<SwitchDomainForm>,
) -> Result<impl IntoResponse, AppError> {
    let prefs = CookiePreferences::from_headers(&headers, state.cookie_secure);
    let previous = state.domain_selector.get_domain(&prefs);

    state.domain_selector.set_domain(&prefs, form.domain)?;
    if previous != form.domain {
        state.analytics.track_domain_switch(previous, form.domain);
    }

    Ok((
        AppendHeaders(prefs.set_cookie_headers()),
        Redirect::to(safe_return_path(form.return_to.as_deref())),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_return_path() {
        assert_eq!(safe_return_path(Some("/#projects")), "/#projects");
        assert_eq!(safe_return_path(Some("//evil.example.com")), "/");
        assert_eq!(safe_return_path(Some("https://evil.example.com")), "/");
        assert_eq!(safe_return_path(Some("/\\evil.example.com")), "/");
        assert_eq!(safe_return_path(Some("/\\/evil.example.com")), "/");
        assert_eq!(safe_return_path(Some("/\t/evil.example.com")), "/");
        assert_eq!(safe_return_path(None), "/");
    }
}
