//! CSRF token lookup.
//!
//! The service issues the token as cookie [`CSRF_COOKIE`] and expects it echoed
//! back in header [`CSRF_HEADER`] on every mutating request. The client reads
//! the token through [`TokenProvider`] on every call and never caches it, so a
//! rotated cookie is picked up on the next request.

use std::sync::Arc;

use reqwest::cookie::{CookieStore, Jar};
use url::Url;

/// Cookie carrying the CSRF token.
pub const CSRF_COOKIE: &str = "XSRF-TOKEN";

/// Header echoing the CSRF token on mutating requests.
pub const CSRF_HEADER: &str = "X-XSRF-TOKEN";

/// Capability that yields the current CSRF token, if one has been issued.
///
/// # Implementations
///
/// - [`CookieJarTokenProvider`] - Reads the HTTP client's cookie jar
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
pub trait TokenProvider: Send + Sync {
    /// Returns the token as currently stored, or `None` if absent.
    fn token(&self) -> Option<String>;
}

/// Reads [`CSRF_COOKIE`] from the cookie jar shared with the HTTP client.
pub struct CookieJarTokenProvider {
    jar: Arc<Jar>,
    url: Url,
}

impl CookieJarTokenProvider {
    /// Creates a provider that looks up cookies applicable to `url`.
    pub fn new(jar: Arc<Jar>, url: Url) -> Self {
        Self { jar, url }
    }
}

impl TokenProvider for CookieJarTokenProvider {
    fn token(&self) -> Option<String> {
        let header = self.jar.cookies(&self.url)?;
        let raw = header.to_str().ok()?;
        cookie_value(raw, CSRF_COOKIE)
    }
}

/// Extracts a cookie value from a `Cookie` header string (`a=1; b=2`).
pub fn cookie_value(header: &str, name: &str) -> Option<String> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then(|| value.trim_matches('"').to_string())
    })
}
