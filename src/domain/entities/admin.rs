//! Admin identity and session records.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// The single admin account exposed after a successful login.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

/// A logged-in admin session.
///
/// Only the HMAC of the session token is kept; the raw token lives in the
/// browser cookie and is never stored server-side.
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub token_hash: String,
    pub user: AdminUser,
    pub created_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl AdminSession {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
