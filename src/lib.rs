//! # Portfolio Site
//!
//! A personal portfolio that presents one of two audience-specific content
//! sets (computer science or mechanical engineering), built with Axum and
//! Askama.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Content model, analytics events, trackers and edit buffers
//! - **Application Layer** ([`application`]) - Domain selection, analytics dispatch, page views, admin auth
//! - **Infrastructure Layer** ([`infrastructure`]) - Analytics collectors, preference and session stores
//! - **API Layer** ([`api`]) - JSON API, beacon ingestion and middleware
//! - **Web Layer** ([`web`]) - Portfolio page and admin panel
//!
//! ## Features
//!
//! - Per-visitor domain selection with an admin-controlled default landing
//! - Asynchronous analytics fan-out to pluggable collectors
//! - Scroll depth, time on page and web vitals from browser beacons
//! - Cookie-session admin panel with per-session edit buffers
//! - Rate limiting and observability
//!
//! ## Quick Start
//!
//! ```bash
//! export ADMIN_USERNAME="owner"
//! export ADMIN_PASSWORD="change-me"
//! export SESSION_SIGNING_SECRET="$(openssl rand -base64 32)"
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;

pub mod config;
pub mod server;

pub mod routes;
pub mod web;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        AnalyticsService, AuthService, DomainSelector, PageViewService, WorkspaceService,
    };
    pub use crate::domain::analytics_event::AnalyticsEvent;
    pub use crate::domain::content_store::ContentStore;
    pub use crate::domain::entities::PortfolioDomain;
    pub use crate::error::AppError;
    pub use crate::state::{AppState, StateOptions};
}
