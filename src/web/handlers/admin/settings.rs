//! System settings and health.
//!
//! Settings are a per-session edit buffer like content and skills. The
//! health panel reads live values from the running server.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension, Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;

use super::{AdminNav, SelectOption, apply_edit, checkbox};
use crate::domain::entities::AdminSession;
use crate::domain::workspace::settings::{
    RETENTION_DAYS, SESSION_TIMEOUT_MINUTES, parse_allowlist,
};
use crate::domain::workspace::{
    BackupFrequency, BackupSettings, EditError, Notice, NotificationSettings, PerformanceSettings,
    SecuritySettings, SystemSettings,
};
use crate::state::AppState;

const SETTINGS_PATH: &str = "/admin/settings";

#[derive(Debug, Clone)]
pub struct CollectorHealth {
    pub name: &'static str,
    pub healthy: bool,
}

/// Live server figures for the health panel.
#[derive(Debug, Clone)]
pub struct SystemHealth {
    pub healthy: bool,
    pub version: &'static str,
    pub queue_capacity: usize,
    pub queue_available: usize,
    pub events_dropped: u64,
    pub open_page_views: usize,
    pub admin_workspaces: usize,
    pub collectors: Vec<CollectorHealth>,
}

impl SystemHealth {
    async fn collect(state: &AppState) -> Self {
        let mut collectors = Vec::with_capacity(state.collectors.len());
        for collector in state.collectors.iter() {
            collectors.push(CollectorHealth {
                name: collector.name(),
                healthy: collector.health_check().await,
            });
        }
        let stats = state.analytics.stats();
        Self {
            healthy: state.analytics.is_running() && collectors.iter().all(|c| c.healthy),
            version: env!("CARGO_PKG_VERSION"),
            queue_capacity: stats.capacity,
            queue_available: stats.available,
            events_dropped: stats.dropped,
            open_page_views: state.page_views.open_count(),
            admin_workspaces: state.workspaces.count(),
            collectors,
        }
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "admin/settings.html")]
pub struct SettingsTemplate {
    pub nav: AdminNav,
    pub settings: SystemSettings,
    pub ip_allowlist: String,
    pub frequencies: Vec<SelectOption>,
    pub timeout_min: u32,
    pub timeout_max: u32,
    pub retention_min: u32,
    pub retention_max: u32,
    pub health: SystemHealth,
}

/// # Endpoint
///
/// `GET /admin/settings`
pub async fn settings_handler(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
) -> impl IntoResponse {
    let health = SystemHealth::collect(&state).await;

    state.workspaces.with(&session.token_hash, |ws| {
        let settings = ws.settings.settings().clone();
        SettingsTemplate {
            nav: AdminNav::new(ws, &session, "settings"),
            ip_allowlist: settings
                .security
                .ip_allowlist
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
            frequencies: BackupFrequency::ALL
                .iter()
                .map(|f| {
                    SelectOption::new(
                        f.as_str(),
                        f.label(),
                        Some(settings.backup.frequency.as_str()),
                    )
                })
                .collect(),
            timeout_min: *SESSION_TIMEOUT_MINUTES.start(),
            timeout_max: *SESSION_TIMEOUT_MINUTES.end(),
            retention_min: *RETENTION_DAYS.start(),
            retention_max: *RETENTION_DAYS.end(),
            settings,
            health,
        }
    })
}

#[derive(Debug, Deserialize)]
pub struct NotificationsForm {
    pub email_notifications: Option<String>,
    pub new_messages: Option<String>,
    pub weekly_reports: Option<String>,
    pub security_alerts: Option<String>,
}

impl From<NotificationsForm> for NotificationSettings {
    fn from(form: NotificationsForm) -> Self {
        Self {
            email_notifications: checkbox(&form.email_notifications),
            new_messages: checkbox(&form.new_messages),
            weekly_reports: checkbox(&form.weekly_reports),
            security_alerts: checkbox(&form.security_alerts),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SecurityForm {
    pub two_factor_auth: Option<String>,
    /// Posted as text so that a malformed number becomes a notice, not a 422.
    pub session_timeout_minutes: String,
    pub login_notifications: Option<String>,
    #[serde(default)]
    pub ip_allowlist: String,
}

impl TryFrom<SecurityForm> for SecuritySettings {
    type Error = EditError;

    fn try_from(form: SecurityForm) -> Result<Self, Self::Error> {
        Ok(Self {
            two_factor_auth: checkbox(&form.two_factor_auth),
            session_timeout_minutes: parse_number(&form.session_timeout_minutes, "Session timeout")?,
            login_notifications: checkbox(&form.login_notifications),
            ip_allowlist: parse_allowlist(&form.ip_allowlist)?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct PerformanceForm {
    pub cache_enabled: Option<String>,
    pub image_optimization: Option<String>,
    pub lazy_loading: Option<String>,
    pub compression_enabled: Option<String>,
}

impl From<PerformanceForm> for PerformanceSettings {
    fn from(form: PerformanceForm) -> Self {
        Self {
            cache_enabled: checkbox(&form.cache_enabled),
            image_optimization: checkbox(&form.image_optimization),
            lazy_loading: checkbox(&form.lazy_loading),
            compression_enabled: checkbox(&form.compression_enabled),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BackupForm {
    pub auto_backup: Option<String>,
    pub frequency: String,
    pub retention_days: String,
}

impl TryFrom<BackupForm> for BackupSettings {
    type Error = EditError;

    fn try_from(form: BackupForm) -> Result<Self, Self::Error> {
        Ok(Self {
            auto_backup: checkbox(&form.auto_backup),
            frequency: form.frequency.trim().parse()?,
            retention_days: parse_number(&form.retention_days, "Retention")?,
        })
    }
}

fn parse_number(raw: &str, field: &str) -> Result<u32, EditError> {
    raw.trim()
        .parse()
        .map_err(|_| EditError::Invalid(format!("{field} must be a whole number")))
}

fn updated(section: &str) -> Notice {
    Notice::success("Updated", format!("{section} settings updated"))
}

/// `POST /admin/settings/notifications`
pub async fn update_notifications_handler(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Form(form): Form<NotificationsForm>,
) -> Redirect {
    apply_edit(
        &state,
        &session,
        |_| updated("Notification"),
        |ws| {
            ws.settings.update_notifications(form.into());
            Ok(())
        },
    );
    Redirect::to(SETTINGS_PATH)
}

/// `POST /admin/settings/security`
pub async fn update_security_handler(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Form(form): Form<SecurityForm>,
) -> Redirect {
    apply_edit(
        &state,
        &session,
        |_| updated("Security"),
        |ws| ws.settings.update_security(form.try_into()?),
    );
    Redirect::to(SETTINGS_PATH)
}

/// `POST /admin/settings/performance`
pub async fn update_performance_handler(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Form(form): Form<PerformanceForm>,
) -> Redirect {
    apply_edit(
        &state,
        &session,
        |_| updated("Performance"),
        |ws| {
            ws.settings.update_performance(form.into());
            Ok(())
        },
    );
    Redirect::to(SETTINGS_PATH)
}

/// `POST /admin/settings/backup`
pub async fn update_backup_handler(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Form(form): Form<BackupForm>,
) -> Redirect {
    apply_edit(
        &state,
        &session,
        |_| updated("Backup"),
        |ws| ws.settings.update_backup(form.try_into()?),
    );
    Redirect::to(SETTINGS_PATH)
}

/// `POST /admin/settings/save`
pub async fn save_settings_handler(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
) -> Redirect {
    apply_edit(
        &state,
        &session,
        |_| Notice::success("Settings saved", "Your settings have been updated for this session"),
        |ws| {
            ws.settings.save();
            Ok(())
        },
    );
    Redirect::to(SETTINGS_PATH)
}

/// `POST /admin/settings/reset`
pub async fn reset_settings_handler(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
) -> Redirect {
    apply_edit(
        &state,
        &session,
        |_| Notice::success("Reset", "Settings restored"),
        |ws| {
            ws.settings.reset();
            Ok(())
        },
    );
    Redirect::to(SETTINGS_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn security(timeout: &str, allowlist: &str) -> SecurityForm {
        SecurityForm {
            two_factor_auth: Some("on".into()),
            session_timeout_minutes: timeout.into(),
            login_notifications: None,
            ip_allowlist: allowlist.into(),
        }
    }

    #[test]
    fn test_security_form_conversion() {
        let settings = SecuritySettings::try_from(security(" 60 ", "198.51.100.4")).unwrap();

        assert!(settings.two_factor_auth);
        assert!(!settings.login_notifications);
        assert_eq!(settings.session_timeout_minutes, 60);
        assert_eq!(settings.ip_allowlist.len(), 1);
    }

    #[test]
    fn test_malformed_numbers_are_edit_errors() {
        assert!(matches!(
            SecuritySettings::try_from(security("half an hour", "")),
            Err(EditError::Invalid(_))
        ));
        let backup = BackupForm {
            auto_backup: None,
            frequency: "weekly".into(),
            retention_days: "-3".into(),
        };
        assert!(BackupSettings::try_from(backup).is_err());
    }

    #[test]
    fn test_unticked_checkboxes_turn_settings_off() {
        let form = PerformanceForm {
            cache_enabled: None,
            image_optimization: Some("on".into()),
            lazy_loading: None,
            compression_enabled: None,
        };

        let settings = PerformanceSettings::from(form);

        assert!(!settings.cache_enabled);
        assert!(settings.image_optimization);
    }
}
