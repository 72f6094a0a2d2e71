//! Admin panel screens.
//!
//! Every screen reads from and writes to the session's
//! [`AdminWorkspace`]. Form posts apply one edit, store a one-shot
//! [`Notice`] and redirect back with `303 See Other`.

mod analytics;
mod certifications;
mod content;
mod dashboard;
mod landing;
mod messages;
mod settings;
mod skills;

pub use analytics::analytics_handler;
pub use certifications::{
    add_certification_handler, certifications_handler, delete_certification_handler,
    reset_certifications_handler, save_certifications_handler, update_certification_handler,
};
pub use content::{
    add_project_handler, content_handler, delete_project_handler, reset_content_handler,
    save_content_handler, update_domain_text_handler, update_personal_handler,
    update_project_handler,
};
pub use dashboard::dashboard_handler;
pub use landing::{
    apply_landing_handler, landing_handler, reset_landing_handler, save_landing_handler,
};
pub use messages::{
    delete_message_handler, messages_handler, reply_message_handler, set_message_status_handler,
};
pub use settings::{
    reset_settings_handler, save_settings_handler, settings_handler, update_backup_handler,
    update_notifications_handler, update_performance_handler, update_security_handler,
};
pub use skills::{
    add_category_handler, add_skill_handler, delete_skill_handler, reset_skills_handler,
    save_skills_handler, skills_handler, update_skill_handler,
};

use crate::domain::entities::AdminSession;
use crate::domain::workspace::{AdminWorkspace, EditError, Notice};
use crate::state::AppState;

/// Header, navigation and notice shared by every admin page.
#[derive(Debug, Clone)]
pub struct AdminNav {
    pub user_name: String,
    pub user_email: String,
    pub active: &'static str,
    pub unsaved: bool,
    pub unread: usize,
    pub notice: Option<Notice>,
}

impl AdminNav {
    /// Consumes the pending notice.
    pub fn new(workspace: &mut AdminWorkspace, session: &AdminSession, active: &'static str) -> Self {
        Self {
            user_name: session.user.name.clone(),
            user_email: session.user.email.clone(),
            active,
            unsaved: workspace.has_unsaved_changes(),
            unread: workspace.messages.unread_count(),
            notice: workspace.take_notice(),
        }
    }
}

/// A `<select>` option.
#[derive(Debug, Clone)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>, current: Option<&str>) -> Self {
        let value = value.into();
        Self {
            selected: current == Some(value.as_str()),
            label: label.into(),
            value,
        }
    }
}

/// Applies one edit to the session's workspace and records the outcome as a notice.
pub(crate) fn apply_edit<T>(
    state: &AppState,
    session: &AdminSession,
    success: impl FnOnce(&T) -> Notice,
    edit: impl FnOnce(&mut AdminWorkspace) -> Result<T, EditError>,
) {
    state.workspaces.with(&session.token_hash, |workspace| {
        let notice = match edit(workspace) {
            Ok(value) => success(&value),
            Err(e) => {
                tracing::debug!(error = %e, "Admin edit rejected");
                Notice::error("Error", e.to_string())
            }
        };
        workspace.set_notice(notice);
    });
}

/// Empty query values mean "no filter".
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Form text fields where an empty value means "none".
pub(crate) fn optional_field(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Checkboxes post `on` when ticked and nothing otherwise.
pub(crate) fn checkbox(value: &Option<String>) -> bool {
    value.is_some()
}
