//! Business logic services for the application layer.

pub mod analytics_service;
pub mod auth_service;
pub mod domain_selector;
pub mod page_view_service;
pub mod workspace_service;

pub use analytics_service::{AnalyticsService, AnalyticsStats};
pub use auth_service::{AdminCredentials, AuthService, LoginOutcome};
pub use domain_selector::DomainSelector;
pub use page_view_service::{IngestSummary, PageViewService, SweepSummary};
pub use workspace_service::WorkspaceService;
