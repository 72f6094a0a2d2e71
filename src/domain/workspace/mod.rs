//! Admin edit buffers.
//!
//! Every admin session gets its own [`AdminWorkspace`], seeded from a
//! snapshot of the content store. Edits only ever touch the buffers; saving
//! clears the pending-changes flag and resetting restores the snapshot.

pub mod certifications;
pub mod content_editor;
pub mod messages;
pub mod reports;
pub mod settings;
pub mod skills;

use serde::Serialize;
use thiserror::Error;

use crate::domain::content_store::PortfolioContent;

pub use certifications::{
    CertCategory, CertStats, CertStatus, CertificationInput, CertificationRecord,
    CertificationsEditor,
};
pub use content_editor::ContentEditor;
pub use messages::{Message, MessageBoard, MessagePriority, MessageSource, MessageStatus};
pub use reports::{AnalyticsReport, DashboardOverview, TimeRange};
pub use settings::{
    BackupFrequency, BackupSettings, NotificationSettings, PerformanceSettings, SecuritySettings,
    SettingsEditor, SystemSettings,
};
pub use skills::{Skill, SkillGroup, SkillInput, SkillsEditor};

#[derive(Debug, Error, PartialEq)]
pub enum EditError {
    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },

    #[error("category '{0}' does not exist")]
    UnknownCategory(String),

    #[error("category '{0}' already exists")]
    DuplicateCategory(String),

    #[error("{0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
}

/// One-shot message shown on the next admin page render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub text: String,
}

impl Notice {
    pub fn success(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            title: title.into(),
            text: text.into(),
        }
    }

    pub fn error(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: title.into(),
            text: text.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

/// All edit buffers of one admin session.
#[derive(Debug, Clone)]
pub struct AdminWorkspace {
    pub content: ContentEditor,
    pub skills: SkillsEditor,
    pub certifications: CertificationsEditor,
    pub messages: MessageBoard,
    pub settings: SettingsEditor,
    notice: Option<Notice>,
}

impl AdminWorkspace {
    pub fn new(snapshot: PortfolioContent) -> Self {
        Self {
            skills: SkillsEditor::new(&snapshot.cs.skills, &snapshot.mechanical.skills),
            certifications: CertificationsEditor::new(&snapshot.certifications),
            messages: MessageBoard::seeded(),
            settings: SettingsEditor::new(SystemSettings::default()),
            content: ContentEditor::new(snapshot),
            notice: None,
        }
    }

    pub fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    /// Returns and clears the pending notice.
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.content.has_changes()
            || self.skills.has_changes()
            || self.certifications.has_changes()
            || self.settings.has_changes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::content_store::ContentStore;

    #[test]
    fn test_notice_is_taken_once() {
        let mut workspace = AdminWorkspace::new(ContentStore::builtin().snapshot());
        workspace.set_notice(Notice::success("Saved", "All good"));

        assert_eq!(workspace.take_notice().map(|n| n.kind), Some(NoticeKind::Success));
        assert_eq!(workspace.take_notice(), None);
    }

    #[test]
    fn test_fresh_workspace_has_no_changes() {
        let workspace = AdminWorkspace::new(ContentStore::builtin().snapshot());

        assert!(!workspace.has_unsaved_changes());
        assert_eq!(workspace.certifications.records().len(), 3);
        assert_eq!(workspace.messages.all().len(), 4);
    }

    #[test]
    fn test_settings_edit_counts_as_unsaved() {
        let mut workspace = AdminWorkspace::new(ContentStore::builtin().snapshot());
        let mut performance = workspace.settings.settings().performance;
        performance.cache_enabled = false;

        workspace.settings.update_performance(performance);

        assert!(workspace.has_unsaved_changes());
    }
}
