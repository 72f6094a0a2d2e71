//! Key/value preference storage.

use thiserror::Error;

/// Key of the visitor's selected domain.
pub const DOMAIN_KEY: &str = "portfolio-domain";

/// Key of the visitor's cookie consent decision.
pub const CONSENT_KEY: &str = "cookie-consent";

/// Key of the admin-configured default landing domain.
pub const DEFAULT_LANDING_KEY: &str = "default-landing-domain";

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("preference storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("preference file is not valid JSON: {0}")]
    Format(#[from] serde_json::Error),

    #[error("preference storage unavailable: {0}")]
    Unavailable(String),
}

/// Persisted string preferences.
///
/// Reads never fail: an unreadable or missing value is reported as `None` and
/// callers fall back to their defaults. Writes report storage failures.
///
/// # Implementations
///
/// - [`crate::infrastructure::preferences::MemoryPreferenceStore`] - Process memory
/// - [`crate::infrastructure::preferences::FilePreferenceStore`] - JSON file on disk
/// - [`crate::web::cookies::CookiePreferences`] - One visitor's request cookies
#[cfg_attr(test, mockall::automock)]
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    /// # Errors
    ///
    /// Returns [`PreferenceError`] if the value cannot be persisted.
    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError>;

    /// Removes a key. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`PreferenceError`] if the change cannot be persisted.
    fn remove(&self, key: &str) -> Result<(), PreferenceError>;
}
