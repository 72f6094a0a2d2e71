//! Repository trait for admin sessions.

use crate::domain::entities::AdminSession;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Repository interface for admin session management.
///
/// Sessions are keyed by the HMAC of the session token; raw tokens never reach
/// the repository.
///
/// # Implementations
///
/// - [`crate::infrastructure::sessions::InMemorySessionRepository`]
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Stores a new session.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if a session with the same hash exists.
    async fn create(&self, session: AdminSession) -> Result<(), AppError>;

    async fn find(&self, token_hash: &str) -> Result<Option<AdminSession>, AppError>;

    /// Updates `last_seen_at` and slides `expires_at` forward.
    async fn touch(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AppError>;

    /// Deletes a session. Returns whether it existed.
    async fn delete(&self, token_hash: &str) -> Result<bool, AppError>;

    /// Removes every session expired at `now`, returning their hashes.
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<Vec<String>, AppError>;
}
