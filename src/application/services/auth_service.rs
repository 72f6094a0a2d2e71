//! Admin login and session authentication.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::entities::{AdminSession, AdminUser};
use crate::domain::repositories::SessionRepository;
use crate::error::AppError;
use serde_json::json;

type HmacSha256 = Hmac<Sha256>;

/// The configured admin credential pair.
///
/// This is a convenience gate for a personal site, not a security boundary.
#[derive(Clone)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// A freshly created session and the raw token for the cookie.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub session: AdminSession,
}

/// Service for the admin panel's login gate.
///
/// Session tokens are hashed with HMAC-SHA256 (keyed by `signing_secret`)
/// before storage and lookup.
pub struct AuthService<R: SessionRepository> {
    repository: Arc<R>,
    credentials: Option<AdminCredentials>,
    signing_secret: String,
    ttl: Duration,
}

impl<R: SessionRepository> AuthService<R> {
    /// Creates a new authentication service.
    ///
    /// With `credentials` set to `None` every login attempt fails.
    pub fn new(
        repository: Arc<R>,
        credentials: Option<AdminCredentials>,
        signing_secret: String,
        ttl: Duration,
    ) -> Self {
        Self {
            repository,
            credentials,
            signing_secret,
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn mac(&self, input: &str) -> HmacSha256 {
        let mut mac = HmacSha256::new_from_slice(self.signing_secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(input.as_bytes());
        mac
    }

    /// Hashes a raw token with HMAC-SHA256 using the server signing secret.
    ///
    /// Returns a 64-character lowercase hex-encoded MAC.
    pub fn hash_token(&self, token: &str) -> String {
        hex::encode(self.mac(token).finalize().into_bytes())
    }

    /// Compares in constant time by checking one MAC against the other.
    fn matches(&self, supplied: &str, expected: &str) -> bool {
        let expected = self.mac(expected).finalize().into_bytes();
        self.mac(supplied).verify_slice(&expected).is_ok()
    }

    fn generate_token() -> String {
        let mut bytes = [0u8; 32];
        rand::rng().fill_bytes(&mut bytes);
        URL_SAFE_NO_PAD.encode(bytes)
    }

    fn admin_user(username: &str) -> AdminUser {
        AdminUser {
            id: "1".to_string(),
            name: "Admin User".to_string(),
            email: format!("{username}@localhost"),
            role: "admin".to_string(),
        }
    }

    /// Checks the credential pair and opens a session.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] unless both values exactly match the
    /// configured pair. Returns [`AppError::Internal`] if the session cannot
    /// be stored.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome, AppError> {
        let Some(credentials) = &self.credentials else {
            warn!("Admin login attempted but no credentials are configured");
            return Err(Self::invalid_credentials());
        };

        let user_ok = self.matches(username, &credentials.username);
        let pass_ok = self.matches(password, &credentials.password);
        if !(user_ok && pass_ok) {
            metrics::counter!("admin_logins_total", "outcome" => "rejected").increment(1);
            return Err(Self::invalid_credentials());
        }

        let token = Self::generate_token();
        let now = Utc::now();
        let session = AdminSession {
            token_hash: self.hash_token(&token),
            user: Self::admin_user(&credentials.username),
            created_at: now,
            last_seen_at: now,
            expires_at: now + self.ttl,
        };
        self.repository.create(session.clone()).await?;

        metrics::counter!("admin_logins_total", "outcome" => "accepted").increment(1);
        info!(user = %session.user.email, "Admin logged in");
        Ok(LoginOutcome { token, session })
    }

    fn invalid_credentials() -> AppError {
        AppError::unauthorized(
            "Invalid credentials. Please try again.",
            json!({"reason": "Username or password does not match"}),
        )
    }

    /// Resolves a raw session token to a live session and slides its expiry.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is unknown or expired.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn authenticate(&self, token: &str) -> Result<AdminSession, AppError> {
        let token_hash = self.hash_token(token);
        let now = Utc::now();

        let session = self
            .repository
            .find(&token_hash)
            .await?
            .filter(|s| !s.is_expired(now))
            .ok_or_else(|| {
                AppError::unauthorized(
                    "Unauthorized",
                    json!({"reason": "Invalid or expired session"}),
                )
            })?;

        let expires_at = now + self.ttl;
        let _ = self.repository.touch(&token_hash, now, expires_at).await;

        Ok(AdminSession {
            last_seen_at: now,
            expires_at,
            ..session
        })
    }

    /// Ends the session behind `token`, returning its hash if it existed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn logout(&self, token: &str) -> Result<Option<String>, AppError> {
        let token_hash = self.hash_token(token);
        let existed = self.repository.delete(&token_hash).await?;
        if existed {
            info!("Admin logged out");
        }
        Ok(existed.then_some(token_hash))
    }

    /// Removes expired sessions, returning their hashes.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn purge_expired(&self) -> Result<Vec<String>, AppError> {
        self.repository.purge_expired(Utc::now()).await
    }
}
