//! Cookie helpers and the per-request visitor preference store.

use axum::http::{HeaderMap, HeaderName, header::COOKIE, header::SET_COOKIE};
use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::repositories::preference_store::DOMAIN_KEY;
use crate::domain::repositories::{PreferenceError, PreferenceStore};

/// Cookie holding the visitor's selected domain.
pub const DOMAIN_COOKIE: &str = DOMAIN_KEY;

/// Cookie holding the raw admin session token.
pub const SESSION_COOKIE: &str = "admin_session";

/// One year, for the domain preference.
const PREFERENCE_MAX_AGE: i64 = 60 * 60 * 24 * 365;

/// Parses every `name=value` pair from the `Cookie` header.
fn parse_cookies(headers: &HeaderMap) -> HashMap<String, String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|raw| raw.split(';'))
        .filter_map(|cookie| {
            let mut parts = cookie.trim().splitn(2, '=');
            match (parts.next(), parts.next()) {
                (Some(name), Some(value)) if !name.is_empty() => {
                    Some((name.to_string(), value.to_string()))
                }
                _ => None,
            }
        })
        .collect()
}

/// Reads a single cookie value.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    parse_cookies(headers).remove(name)
}

/// Builds a `Set-Cookie` value for the admin session token.
///
/// No `Max-Age`: the server slides session expiry, the browser keeps the
/// cookie until it closes.
pub fn session_cookie(token: &str, secure: bool) -> String {
    let mut cookie = format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Strict");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Builds a `Set-Cookie` value that deletes `name`.
pub fn clear_cookie(name: &str, secure: bool) -> String {
    let mut cookie = format!("{name}=; Path=/; Max-Age=0; SameSite=Lax");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

fn preference_cookie(name: &str, value: &str, secure: bool) -> String {
    let mut cookie = format!("{name}={value}; Path=/; Max-Age={PREFERENCE_MAX_AGE}; SameSite=Lax");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// A visitor's preferences, read from request cookies.
///
/// Writes are recorded and turned into `Set-Cookie` headers with
/// [`CookiePreferences::set_cookie_headers`]; later reads within the same
/// request see the written value.
#[derive(Debug)]
pub struct CookiePreferences {
    incoming: HashMap<String, String>,
    pending: Mutex<Vec<(String, Option<String>)>>,
    secure: bool,
}

impl CookiePreferences {
    pub fn from_headers(headers: &HeaderMap, secure: bool) -> Self {
        Self {
            incoming: parse_cookies(headers),
            pending: Mutex::new(Vec::new()),
            secure,
        }
    }

    fn pending(&self) -> std::sync::MutexGuard<'_, Vec<(String, Option<String>)>> {
        self.pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// `Set-Cookie` headers for every write made through this store.
    pub fn set_cookie_headers(&self) -> Vec<(HeaderName, String)> {
        self.pending()
            .iter()
            .map(|(name, value)| {
                let cookie = match value {
                    Some(value) => preference_cookie(name, value, self.secure),
                    None => clear_cookie(name, self.secure),
                };
                (SET_COOKIE, cookie)
            })
            .collect()
    }
}

/// Cookie values must not carry separators or whitespace.
fn is_cookie_safe(value: &str) -> bool {
    value
        .bytes()
        .all(|b| b.is_ascii_graphic() && !matches!(b, b';' | b',' | b'"' | b'\\'))
}

impl PreferenceStore for CookiePreferences {
    fn get(&self, key: &str) -> Option<String> {
        if let Some((_, value)) = self.pending().iter().rev().find(|(name, _)| name == key) {
            return value.clone();
        }
        self.incoming.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        if !is_cookie_safe(key) || !is_cookie_safe(value) {
            return Err(PreferenceError::Unavailable(format!(
                "'{key}' cannot be stored in a cookie"
            )));
        }
        self.pending().push((key.to_string(), Some(value.to_string())));
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PreferenceError> {
        self.pending().push((key.to_string(), None));
        Ok(())
    }
}
