//! Edit buffer for the admin panel's system settings.
//!
//! Settings live in the session's workspace like every other buffer and do
//! not change how the running site behaves.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;
use std::ops::RangeInclusive;
use std::str::FromStr;

use super::EditError;

pub const SESSION_TIMEOUT_MINUTES: RangeInclusive<u32> = 5..=1440;
pub const RETENTION_DAYS: RangeInclusive<u32> = 1..=365;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NotificationSettings {
    pub email_notifications: bool,
    pub new_messages: bool,
    pub weekly_reports: bool,
    pub security_alerts: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecuritySettings {
    pub two_factor_auth: bool,
    pub session_timeout_minutes: u32,
    pub login_notifications: bool,
    /// Empty allows every address.
    pub ip_allowlist: Vec<IpAddr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PerformanceSettings {
    pub cache_enabled: bool,
    pub image_optimization: bool,
    pub lazy_loading: bool,
    pub compression_enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackupFrequency {
    Daily,
    Weekly,
    Monthly,
}

impl BackupFrequency {
    pub const ALL: [BackupFrequency; 3] = [
        BackupFrequency::Daily,
        BackupFrequency::Weekly,
        BackupFrequency::Monthly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BackupFrequency::Daily => "daily",
            BackupFrequency::Weekly => "weekly",
            BackupFrequency::Monthly => "monthly",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BackupFrequency::Daily => "Daily",
            BackupFrequency::Weekly => "Weekly",
            BackupFrequency::Monthly => "Monthly",
        }
    }
}

impl FromStr for BackupFrequency {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BackupFrequency::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| EditError::Invalid(format!("unknown backup frequency '{s}'")))
    }
}

impl fmt::Display for BackupFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BackupSettings {
    pub auto_backup: bool,
    pub frequency: BackupFrequency,
    pub retention_days: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SystemSettings {
    pub notifications: NotificationSettings,
    pub security: SecuritySettings,
    pub performance: PerformanceSettings,
    pub backup: BackupSettings,
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self {
            notifications: NotificationSettings {
                email_notifications: true,
                new_messages: true,
                weekly_reports: false,
                security_alerts: true,
            },
            security: SecuritySettings {
                two_factor_auth: false,
                session_timeout_minutes: 30,
                login_notifications: true,
                ip_allowlist: Vec::new(),
            },
            performance: PerformanceSettings {
                cache_enabled: true,
                image_optimization: true,
                lazy_loading: true,
                compression_enabled: true,
            },
            backup: BackupSettings {
                auto_backup: true,
                frequency: BackupFrequency::Daily,
                retention_days: 30,
            },
        }
    }
}

/// Parses a comma-separated address list; blanks are skipped.
///
/// # Errors
///
/// [`EditError::Invalid`] naming the first entry that is not an IP address.
pub fn parse_allowlist(raw: &str) -> Result<Vec<IpAddr>, EditError> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            entry
                .parse()
                .map_err(|_| EditError::Invalid(format!("'{entry}' is not an IP address")))
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct SettingsEditor {
    original: SystemSettings,
    current: SystemSettings,
    dirty: bool,
}

impl SettingsEditor {
    pub fn new(seed: SystemSettings) -> Self {
        Self {
            original: seed.clone(),
            current: seed,
            dirty: false,
        }
    }

    pub fn settings(&self) -> &SystemSettings {
        &self.current
    }

    pub fn has_changes(&self) -> bool {
        self.dirty
    }

    pub fn update_notifications(&mut self, notifications: NotificationSettings) {
        self.current.notifications = notifications;
        self.dirty = true;
    }

    /// # Errors
    ///
    /// [`EditError::Invalid`] if the timeout is outside 5 to 1440 minutes.
    pub fn update_security(&mut self, security: SecuritySettings) -> Result<(), EditError> {
        if !SESSION_TIMEOUT_MINUTES.contains(&security.session_timeout_minutes) {
            return Err(EditError::Invalid(format!(
                "Session timeout must be between {} and {} minutes",
                SESSION_TIMEOUT_MINUTES.start(),
                SESSION_TIMEOUT_MINUTES.end()
            )));
        }
        self.current.security = security;
        self.dirty = true;
        Ok(())
    }

    pub fn update_performance(&mut self, performance: PerformanceSettings) {
        self.current.performance = performance;
        self.dirty = true;
    }

    /// # Errors
    ///
    /// [`EditError::Invalid`] if retention is outside 1 to 365 days.
    pub fn update_backup(&mut self, backup: BackupSettings) -> Result<(), EditError> {
        if !RETENTION_DAYS.contains(&backup.retention_days) {
            return Err(EditError::Invalid(format!(
                "Retention must be between {} and {} days",
                RETENTION_DAYS.start(),
                RETENTION_DAYS.end()
            )));
        }
        self.current.backup = backup;
        self.dirty = true;
        Ok(())
    }

    pub fn save(&mut self) {
        self.dirty = false;
    }

    pub fn reset(&mut self) {
        self.current = self.original.clone();
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor() -> SettingsEditor {
        SettingsEditor::new(SystemSettings::default())
    }

    #[test]
    fn test_section_update_marks_changes() {
        let mut editor = editor();
        let mut notifications = editor.settings().notifications;
        notifications.weekly_reports = true;

        editor.update_notifications(notifications);

        assert!(editor.has_changes());
        assert!(editor.settings().notifications.weekly_reports);
        assert_eq!(
            editor.settings().performance,
            SystemSettings::default().performance
        );
    }

    #[test]
    fn test_out_of_range_values_leave_buffer_untouched() {
        let mut editor = editor();
        let mut security = editor.settings().security.clone();
        security.session_timeout_minutes = 2;
        let mut backup = editor.settings().backup;
        backup.retention_days = 0;

        assert!(matches!(
            editor.update_security(security),
            Err(EditError::Invalid(_))
        ));
        assert!(editor.update_backup(backup).is_err());
        assert!(!editor.has_changes());
        assert_eq!(editor.settings(), &SystemSettings::default());
    }

    #[test]
    fn test_allowlist_parsing() {
        assert_eq!(parse_allowlist(" ").unwrap(), Vec::<IpAddr>::new());
        assert_eq!(
            parse_allowlist("203.0.113.7, ::1,").unwrap(),
            vec![
                "203.0.113.7".parse::<IpAddr>().unwrap(),
                "::1".parse::<IpAddr>().unwrap()
            ]
        );
        assert_eq!(
            parse_allowlist("203.0.113.7, office"),
            Err(EditError::Invalid("'office' is not an IP address".into()))
        );
    }

    #[test]
    fn test_save_keeps_values_and_reset_restores_seed() {
        let mut editor = editor();
        let mut backup = editor.settings().backup;
        backup.frequency = BackupFrequency::Weekly;
        editor.update_backup(backup).unwrap();

        editor.save();
        assert!(!editor.has_changes());
        assert_eq!(editor.settings().backup.frequency, BackupFrequency::Weekly);

        editor.reset();
        assert_eq!(editor.settings().backup.frequency, BackupFrequency::Daily);
    }

    #[test]
    fn test_parse_frequency() {
        assert_eq!("monthly".parse::<BackupFrequency>(), Ok(BackupFrequency::Monthly));
        assert!("hourly".parse::<BackupFrequency>().is_err());
    }
}
