//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod beacon;
pub mod content;
pub mod domain;
pub mod health;

pub use beacon::beacon_handler;
pub use content::content_handler;
pub use domain::{get_domain_handler, switch_domain_handler};
pub use health::health_handler;
