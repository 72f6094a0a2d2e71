//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Admin Login
//!
//! ```bash
//! export ADMIN_USERNAME="owner"
//! export ADMIN_PASSWORD="change-me"
//! export SESSION_SIGNING_SECRET="$(openssl rand -hex 32)"
//! ```
//!
//! Both credentials must be set together. When neither is set the admin panel
//! is still mounted but every login attempt fails. When
//! `SESSION_SIGNING_SECRET` is missing a random secret is generated, which
//! invalidates admin sessions on every restart.
//!
//! ## Analytics Collectors
//!
//! Events are always written to the log. Two HTTP collectors are optional:
//!
//! - `ANALYTICS_EVENTS_URL` - receives `{name, properties, timestamp}`
//! - `ANALYTICS_MEASUREMENT_URL` - receives `{events: [{name, params}]}`
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `DEFAULT_DOMAIN` - Landing domain when nothing else decides: `cs` or `mechanical` (default: `cs`)
//! - `CONTENT_PATH` - JSON file replacing the built-in content
//! - `PREFERENCES_PATH` - Site preference file (default: `data/preferences.json`)
//! - `STATIC_DIR` - Static asset directory (default: `static`)
//! - `ANALYTICS_QUEUE_CAPACITY` - Event buffer size (default: 10000, min: 100)
//! - `ANALYTICS_TIMEOUT_MS` - Per-collector call timeout (default: 5000)
//! - `TIME_FLUSH_SECONDS` - Time-on-page interval flush period (default: 120)
//! - `PAGE_VIEW_IDLE_SECONDS` - Idle page views are closed after this (default: 1800)
//! - `ADMIN_SESSION_TTL_MINUTES` - Sliding admin session lifetime (default: 30)
//! - `COOKIE_SECURE` - Mark cookies `Secure` (default: `false`)

use anyhow::{Context, Result};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::RngCore;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use url::Url;

use crate::application::services::AdminCredentials;
use crate::domain::entities::PortfolioDomain;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    pub default_domain: PortfolioDomain,
    pub content_path: Option<PathBuf>,
    pub preferences_path: PathBuf,
    pub static_dir: PathBuf,
    pub analytics_events_url: Option<String>,
    pub analytics_measurement_url: Option<String>,
    pub analytics_queue_capacity: usize,
    pub analytics_timeout_ms: u64,
    pub time_flush_seconds: u64,
    pub page_view_idle_seconds: u64,
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
    /// HMAC key for admin session tokens (`SESSION_SIGNING_SECRET`).
    pub session_signing_secret: String,
    /// True when the secret was generated because none was configured.
    pub session_secret_generated: bool,
    pub admin_session_ttl_minutes: i64,
    pub cookie_secure: bool,
}

fn parse_var<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn optional_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn generate_secret() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `DEFAULT_DOMAIN` is set to something other than
    /// `cs` or `mechanical`.
    pub fn from_env() -> Result<Self> {
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let default_domain = match optional_var("DEFAULT_DOMAIN") {
            Some(value) => value
                .parse::<PortfolioDomain>()
                .context("Invalid DEFAULT_DOMAIN")?,
            None => PortfolioDomain::default(),
        };

        let content_path = optional_var("CONTENT_PATH").map(PathBuf::from);
        let preferences_path = PathBuf::from(
            env::var("PREFERENCES_PATH").unwrap_or_else(|_| "data/preferences.json".to_string()),
        );
        let static_dir =
            PathBuf::from(env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string()));

        let (session_signing_secret, session_secret_generated) =
            match optional_var("SESSION_SIGNING_SECRET") {
                Some(secret) => (secret, false),
                None => (generate_secret(), true),
            };

        let cookie_secure = env::var("COOKIE_SECURE")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        Ok(Self {
            listen_addr,
            log_level,
            log_format,
            default_domain,
            content_path,
            preferences_path,
            static_dir,
            analytics_events_url: optional_var("ANALYTICS_EVENTS_URL"),
            analytics_measurement_url: optional_var("ANALYTICS_MEASUREMENT_URL"),
            analytics_queue_capacity: parse_var("ANALYTICS_QUEUE_CAPACITY", 10_000),
            analytics_timeout_ms: parse_var("ANALYTICS_TIMEOUT_MS", 5_000),
            time_flush_seconds: parse_var("TIME_FLUSH_SECONDS", 120),
            page_view_idle_seconds: parse_var("PAGE_VIEW_IDLE_SECONDS", 1_800),
            admin_username: optional_var("ADMIN_USERNAME"),
            admin_password: optional_var("ADMIN_PASSWORD"),
            session_signing_secret,
            session_secret_generated,
            admin_session_ttl_minutes: parse_var("ADMIN_SESSION_TTL_MINUTES", 30),
            cookie_secure,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `analytics_queue_capacity` is outside `100..=1_000_000`
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    /// - a collector URL is not `http(s)://`
    /// - a period or timeout is zero
    /// - only one of the admin credentials is set
    pub fn validate(&self) -> Result<()> {
        if self.analytics_queue_capacity < 100 {
            anyhow::bail!(
                "ANALYTICS_QUEUE_CAPACITY must be at least 100, got {}",
                self.analytics_queue_capacity
            );
        }

        if self.analytics_queue_capacity > 1_000_000 {
            anyhow::bail!(
                "ANALYTICS_QUEUE_CAPACITY is too large (max: 1000000), got {}",
                self.analytics_queue_capacity
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        for (name, value) in [
            ("ANALYTICS_EVENTS_URL", &self.analytics_events_url),
            ("ANALYTICS_MEASUREMENT_URL", &self.analytics_measurement_url),
        ] {
            let Some(raw) = value else { continue };
            let parsed = Url::parse(raw).with_context(|| format!("{name} is not a valid URL"))?;
            if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
                anyhow::bail!("{name} must be an http(s) URL with a host, got '{raw}'");
            }
        }

        if self.analytics_timeout_ms == 0 {
            anyhow::bail!("ANALYTICS_TIMEOUT_MS must be greater than 0");
        }
        if self.time_flush_seconds == 0 {
            anyhow::bail!("TIME_FLUSH_SECONDS must be greater than 0");
        }
        if self.page_view_idle_seconds == 0 {
            anyhow::bail!("PAGE_VIEW_IDLE_SECONDS must be greater than 0");
        }
        if self.admin_session_ttl_minutes <= 0 {
            anyhow::bail!(
                "ADMIN_SESSION_TTL_MINUTES must be greater than 0, got {}",
                self.admin_session_ttl_minutes
            );
        }

        if self.admin_username.is_some() != self.admin_password.is_some() {
            anyhow::bail!("ADMIN_USERNAME and ADMIN_PASSWORD must be set together");
        }

        if self.session_signing_secret.is_empty() {
            anyhow::bail!("SESSION_SIGNING_SECRET must not be empty");
        }

        Ok(())
    }

    /// The configured admin pair, if both halves are present.
    pub fn admin_credentials(&self) -> Option<AdminCredentials> {
        match (&self.admin_username, &self.admin_password) {
            (Some(username), Some(password)) => Some(AdminCredentials {
                username: username.clone(),
                password: password.clone(),
            }),
            _ => None,
        }
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Default domain: {}", self.default_domain);
        match &self.content_path {
            Some(path) => tracing::info!("  Content: {}", path.display()),
            None => tracing::info!("  Content: built-in"),
        }
        tracing::info!("  Preferences: {}", self.preferences_path.display());
        tracing::info!("  Static dir: {}", self.static_dir.display());
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!("  Analytics queue capacity: {}", self.analytics_queue_capacity);

        for (name, value) in [
            ("Events collector", &self.analytics_events_url),
            ("Measurement collector", &self.analytics_measurement_url),
        ] {
            match value {
                Some(url) => tracing::info!("  {name}: {}", mask_url_query(url)),
                None => tracing::info!("  {name}: disabled"),
            }
        }

        match &self.admin_username {
            Some(user) => tracing::info!("  Admin user: {user} (password: ***)"),
            None => tracing::warn!("  Admin login disabled: ADMIN_USERNAME/ADMIN_PASSWORD not set"),
        }
        if self.session_secret_generated {
            tracing::warn!(
                "  SESSION_SIGNING_SECRET not set, using a random secret; admin sessions will not survive a restart"
            );
        }
    }
}

/// Masks query parameter values in a collector URL for logging.
///
/// Measurement endpoints usually carry an API secret in the query string:
/// `https://host/mp/collect?api_secret=abc&id=1` → `https://host/mp/collect?api_secret=***&id=***`
fn mask_url_query(url: &str) -> String {
    match url.split_once('?') {
        Some((base, query)) => {
            let masked: Vec<String> = query
                .split('&')
                .map(|pair| match pair.split_once('=') {
                    Some((key, _)) => format!("{key}=***"),
                    None => pair.to_string(),
                })
                .collect();
            format!("{base}?{}", masked.join("&"))
        }
        None => url.to_string(),
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable is malformed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
