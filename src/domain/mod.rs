//! Domain layer containing the portfolio model and tracking logic.
//!
//! Nothing in this layer touches HTTP. Content is read-only data, trackers
//! are pure state machines, and storage is described by traits implemented
//! in [`crate::infrastructure`].
//!
//! # Architecture
//!
//! - [`entities`] - Content and admin data structures
//! - [`content_store`] - The static content record and its accessors
//! - [`tech_catalog`] - Icon and color table for technology badges
//! - [`repositories`] - Preference and session storage traits
//! - [`analytics_event`] - Analytics event model
//! - [`analytics_worker`] - Background delivery of events to collectors
//! - [`trackers`] - Scroll, time and performance trackers
//! - [`workspace`] - Admin edit buffers
//!
//! # Event Flow
//!
//! 1. A handler or tracker builds an [`analytics_event::AnalyticsEvent`]
//! 2. The event is pushed onto a bounded channel without waiting
//! 3. [`analytics_worker::run_analytics_worker`] hands it to every collector

pub mod analytics_event;
pub mod analytics_worker;
pub mod content_store;
pub mod entities;
pub mod repositories;
pub mod tech_catalog;
pub mod trackers;
pub mod workspace;
