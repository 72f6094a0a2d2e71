//! Infrastructure layer for storage and external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`collectors`] - Analytics delivery (HTTP endpoints and log fallback)
//! - [`preferences`] - Preference stores (process memory and JSON file)
//! - [`sessions`] - Admin session storage

pub mod collectors;
pub mod preferences;
pub mod sessions;
