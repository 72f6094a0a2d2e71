//! Cookie consent banner submissions.

use axum::{
    Form,
    extract::State,
    http::HeaderMap,
    response::{AppendHeaders, IntoResponse, Redirect},
};
use serde::Deserialize;
use tracing::debug;

use super::domain::safe_return_path;
use crate::domain::entities::CookieConsent;
use crate::domain::repositories::PreferenceStore;
use crate::domain::repositories::preference_store::CONSENT_KEY;
use crate::error::AppError;
use crate::state::AppState;
use crate::web::cookies::CookiePreferences;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsentChoice {
    All,
    Necessary,
    Custom,
}

#[derive(Debug, Deserialize)]
pub struct ConsentForm {
    pub choice: ConsentChoice,
    /// Checkbox; present only when ticked.
    pub analytics: Option<String>,
    pub marketing: Option<String>,
    pub return_to: Option<String>,
}

impl ConsentForm {
    fn consent(&self) -> CookieConsent {
        match self.choice {
            ConsentChoice::All => CookieConsent::ALL,
            ConsentChoice::Necessary => CookieConsent::NECESSARY_ONLY,
            ConsentChoice::Custom => CookieConsent {
                analytics: self.analytics.is_some(),
                marketing: self.marketing.is_some(),
            },
        }
    }
}

/// The visitor's recorded decision, if any.
pub(crate) fn visitor_consent(visitor: &dyn PreferenceStore) -> Option<CookieConsent> {
    visitor
        .get(CONSENT_KEY)
        .as_deref()
        .and_then(CookieConsent::parse)
}

/// Records the visitor's cookie consent for a year and redirects back.
///
/// # Endpoint
///
/// `POST /consent`
pub async fn consent_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<ConsentForm>,
) -> Result<impl IntoResponse, AppError> {
    let prefs = CookiePreferences::from_headers(&headers, state.cookie_secure);
    let consent = form.consent();
    prefs.set(CONSENT_KEY, &consent.encode())?;
    debug!(
        analytics = consent.analytics,
        marketing = consent.marketing,
        "Cookie consent recorded"
    );

    Ok((
        AppendHeaders(prefs.set_cookie_headers()),
        Redirect::to(safe_return_path(form.return_to.as_deref())),
    ))
}
