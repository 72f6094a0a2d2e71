//! Web route configuration.

use crate::state::AppState;
use crate::web::handlers::admin::{
    add_category_handler, add_certification_handler, add_project_handler, add_skill_handler,
    analytics_handler, apply_landing_handler, certifications_handler, content_handler,
    dashboard_handler, delete_certification_handler, delete_message_handler,
    delete_project_handler, delete_skill_handler, landing_handler, messages_handler,
    reply_message_handler, reset_certifications_handler, reset_content_handler,
    reset_landing_handler, reset_settings_handler, reset_skills_handler,
    save_certifications_handler, save_content_handler, save_landing_handler,
    save_settings_handler, save_skills_handler, set_message_status_handler, settings_handler,
    skills_handler, update_backup_handler, update_certification_handler,
    update_domain_text_handler, update_notifications_handler, update_performance_handler,
    update_personal_handler, update_project_handler, update_security_handler,
    update_skill_handler,
};
use crate::web::handlers::{
    consent_handler, contact_handler, login_handler, login_page_handler, logout_handler, portfolio_handler,
    resume_download_handler, resume_view_handler, switch_domain_handler,
};
use axum::{
    Router,
    routing::{get, post},
};

/// Public site routes.
///
/// # Endpoints
///
/// - `GET  /`                     - Portfolio page in the visitor's domain
/// - `POST /domain`               - Switch domain (header toggle)
/// - `GET  /resume/{domain}`      - Resume download
/// - `GET  /resume/{domain}/view` - Resume view
/// - `POST /contact`              - Contact form
/// - `POST /consent`              - Cookie consent banner
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(portfolio_handler))
        .route("/domain", post(switch_domain_handler))
        .route("/resume/{domain}", get(resume_download_handler))
        .route("/resume/{domain}/view", get(resume_view_handler))
        .route("/contact", post(contact_handler))
        .route("/consent", post(consent_handler))
}

/// Admin login page, nested under `/admin`.
///
/// # Endpoints
///
/// - `GET  /login` - Login form
/// - `POST /login` - Credential check
pub fn login_routes() -> Router<AppState> {
    Router::new().route("/login", get(login_page_handler).post(login_handler))
}

/// Admin panel routes requiring a session, nested under `/admin`.
///
/// Protected via [`crate::web::middleware::admin_auth`].
///
/// # Endpoints
///
/// - `GET /` - Dashboard
/// - `POST /logout`
/// - `/content*` - Personal info, domain texts and projects
/// - `/skills*` - Skills and categories
/// - `/certifications*` - Certifications
/// - `/messages*` - Contact inbox
/// - `GET /analytics` - Sample analytics report
/// - `/landing*` - Site-wide default landing domain
/// - `/settings*` - System settings and health
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard_handler))
        .route("/logout", post(logout_handler))
        .route("/content", get(content_handler))
        .route("/content/personal", post(update_personal_handler))
        .route("/content/text", post(update_domain_text_handler))
        .route("/content/projects", post(add_project_handler))
        .route(
            "/content/projects/{domain}/{index}",
            post(update_project_handler),
        )
        .route(
            "/content/projects/{domain}/{index}/delete",
            post(delete_project_handler),
        )
        .route("/content/save", post(save_content_handler))
        .route("/content/reset", post(reset_content_handler))
        .route("/skills", get(skills_handler).post(add_skill_handler))
        .route("/skills/categories", post(add_category_handler))
        .route("/skills/save", post(save_skills_handler))
        .route("/skills/reset", post(reset_skills_handler))
        .route("/skills/{id}", post(update_skill_handler))
        .route("/skills/{id}/delete", post(delete_skill_handler))
        .route(
            "/certifications",
            get(certifications_handler).post(add_certification_handler),
        )
        .route("/certifications/save", post(save_certifications_handler))
        .route("/certifications/reset", post(reset_certifications_handler))
        .route("/certifications/{id}", post(update_certification_handler))
        .route(
            "/certifications/{id}/delete",
            post(delete_certification_handler),
        )
        .route("/messages", get(messages_handler))
        .route("/messages/{id}/status", post(set_message_status_handler))
        .route("/messages/{id}/reply", post(reply_message_handler))
        .route("/messages/{id}/delete", post(delete_message_handler))
        .route("/analytics", get(analytics_handler))
        .route("/landing", get(landing_handler).post(save_landing_handler))
        .route("/landing/reset", post(reset_landing_handler))
        .route("/landing/apply", post(apply_landing_handler))
        .route("/settings", get(settings_handler))
        .route("/settings/notifications", post(update_notifications_handler))
        .route("/settings/security", post(update_security_handler))
        .route("/settings/performance", post(update_performance_handler))
        .route("/settings/backup", post(update_backup_handler))
        .route("/settings/save", post(save_settings_handler))
        .route("/settings/reset", post(reset_settings_handler))
}
