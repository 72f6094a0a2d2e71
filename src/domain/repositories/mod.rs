//! Storage trait definitions for the domain layer.
//!
//! These traits abstract the two kinds of state the portfolio keeps: small
//! string preferences (the visitor's domain flag, the admin default landing)
//! and admin sessions. Implementations live in `crate::infrastructure`.
//!
//! # Available Traits
//!
//! - [`PreferenceStore`] - String key/value preferences
//! - [`SessionRepository`] - Admin session records
//!
//! Mock implementations are generated via `mockall` for testing.

pub mod preference_store;
pub mod session_repository;

pub use preference_store::{PreferenceError, PreferenceStore};
pub use session_repository::SessionRepository;

#[cfg(test)]
pub use preference_store::MockPreferenceStore;
#[cfg(test)]
pub use session_repository::MockSessionRepository;
