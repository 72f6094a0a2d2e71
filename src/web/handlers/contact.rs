//! Contact form submission.

use axum::{Form, extract::State, response::Redirect};
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct ContactForm {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(max = 200))]
    #[serde(default)]
    pub subject: String,

    #[validate(length(min = 1, max = 5000))]
    pub message: String,
}

/// Accepts a contact message.
///
/// # Endpoint
///
/// `POST /contact`
///
/// Valid submissions record `contact_form_submit`. Nothing is stored or
/// sent; the visitor is redirected back to the contact section with a
/// status flag either way.
pub async fn contact_handler(
    State(state): State<AppState>,
    Form(form): Form<ContactForm>,
) -> Redirect {
    if let Err(errors) = form.validate() {
        let fields: Vec<String> = errors.field_errors().keys().map(|k| k.to_string()).collect();
        info!(?fields, "Contact form rejected");
        return Redirect::to("/?contact=invalid#contact");
    }

    state.analytics.track_contact_form_submit();
    info!("Contact form submitted");
    Redirect::to("/?contact=sent#contact")
}
