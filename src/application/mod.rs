//! Application layer services implementing business logic.
//!
//! Services coordinate domain types, storage traits and the analytics
//! channel, and give HTTP handlers a small API to call.
//!
//! # Available Services
//!
//! - [`services::domain_selector::DomainSelector`] - Active domain resolution
//! - [`services::analytics_service::AnalyticsService`] - Non-blocking event dispatch
//! - [`services::page_view_service::PageViewService`] - Open page views and beacons
//! - [`services::auth_service::AuthService`] - Admin login and sessions
//! - [`services::workspace_service::WorkspaceService`] - Admin edit buffers

pub mod services;
