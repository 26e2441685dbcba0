//! Client configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the first
//! request.
//!
//! ## Service location
//!
//! ```bash
//! export SHORTENER_ORIGIN="https://sho.rt"
//! export SHORTENER_API_BASE="/api"
//! ```
//!
//! `SHORTENER_API_BASE` is resolved against `SHORTENER_ORIGIN`. An absolute
//! URL in `SHORTENER_API_BASE` is used as-is and the origin is ignored.
//!
//! ## Optional Variables
//!
//! - `SHORTENER_ORIGIN` - Service origin (default: `http://localhost:8080`)
//! - `SHORTENER_API_BASE` - API base path or URL (default: `/api`)
//! - `REQUEST_TIMEOUT_SECS` - Per-request timeout (default: 10)
//! - `URL_DISPLAY_WIDTH` - Full URL column width in characters (default: 48, min: 8)
//! - `RUST_LOG` - Log level (default: `warn`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;
use url::Url;

pub const DEFAULT_ORIGIN: &str = "http://localhost:8080";
pub const DEFAULT_API_BASE: &str = "/api";

/// Client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub origin: String,
    /// Base path (`/api`) or absolute base URL of the REST API.
    pub api_base: String,
    pub request_timeout_secs: u64,
    pub url_display_width: usize,
    pub log_level: String,
    pub log_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            request_timeout_secs: 10,
            url_display_width: 48,
            log_level: "warn".to_string(),
            log_format: "text".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// Unset or unparsable numeric variables fall back to their defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let origin = env::var("SHORTENER_ORIGIN").unwrap_or(defaults.origin);
        let api_base = env::var("SHORTENER_API_BASE")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.api_base);
        let log_level = env::var("RUST_LOG").unwrap_or(defaults.log_level);
        let log_format = env::var("LOG_FORMAT").unwrap_or(defaults.log_format);

        let request_timeout_secs = env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.request_timeout_secs);

        let url_display_width = env::var("URL_DISPLAY_WIDTH")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.url_display_width);

        Self {
            origin,
            api_base,
            request_timeout_secs,
            url_display_width,
            log_level,
            log_format,
        }
    }

    /// Resolves the effective API base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the origin or the base cannot be parsed.
    pub fn api_base_url(&self) -> Result<Url> {
        if let Ok(absolute) = Url::parse(&self.api_base) {
            return Ok(absolute);
        }

        let origin = Url::parse(&self.origin)
            .with_context(|| format!("SHORTENER_ORIGIN is not a valid URL: '{}'", self.origin))?;
        origin
            .join(&self.api_base)
            .with_context(|| format!("SHORTENER_API_BASE is not a valid path: '{}'", self.api_base))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the origin is not `http://` or `https://`
    /// - the API base does not resolve to a URL
    /// - `request_timeout_secs` is 0
    /// - `url_display_width` is below 8
    /// - `log_format` is not `text` or `json`
    pub fn validate(&self) -> Result<()> {
        if !self.origin.starts_with("http://") && !self.origin.starts_with("https://") {
            anyhow::bail!(
                "SHORTENER_ORIGIN must start with 'http://' or 'https://', got '{}'",
                self.origin
            );
        }

        let base = self.api_base_url()?;
        if base.scheme() != "http" && base.scheme() != "https" {
            anyhow::bail!(
                "SHORTENER_API_BASE must resolve to an http(s) URL, got '{}'",
                base
            );
        }

        if self.request_timeout_secs == 0 {
            anyhow::bail!("REQUEST_TIMEOUT_SECS must be greater than 0");
        }

        if self.url_display_width < 8 {
            anyhow::bail!(
                "URL_DISPLAY_WIDTH must be at least 8, got {}",
                self.url_display_width
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        Ok(())
    }

    /// Logs a configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        match self.api_base_url() {
            Ok(url) => tracing::info!("  API base: {}", url),
            Err(e) => tracing::info!("  API base: unresolved ({e})"),
        }
        tracing::info!("  Request timeout: {}s", self.request_timeout_secs);
        tracing::info!("  URL display width: {}", self.url_display_width);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_api_base_url_resolves_against_origin() {
        let config = Config::default();
        assert_eq!(
            config.api_base_url().unwrap().as_str(),
            "http://localhost:8080/api"
        );
    }

    #[test]
    fn test_absolute_api_base_wins() {
        let config = Config {
            api_base: "https://api.sho.rt/v1".to_string(),
            ..Config::default()
        };
        assert_eq!(
            config.api_base_url().unwrap().as_str(),
            "https://api.sho.rt/v1"
        );
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.origin = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
        config.origin = DEFAULT_ORIGIN.to_string();

        config.request_timeout_secs = 0;
        assert!(config.validate().is_err());
        config.request_timeout_secs = 10;

        config.url_display_width = 4;
        assert!(config.validate().is_err());
        config.url_display_width = 48;

        config.log_format = "invalid".to_string();
        assert!(config.validate().is_err());

        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::remove_var("SHORTENER_ORIGIN");
            env::remove_var("SHORTENER_API_BASE");
            env::remove_var("REQUEST_TIMEOUT_SECS");
            env::remove_var("URL_DISPLAY_WIDTH");
        }

        let config = Config::from_env();
        assert_eq!(config.origin, DEFAULT_ORIGIN);
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.url_display_width, 48);
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("SHORTENER_ORIGIN", "https://sho.rt");
            env::set_var("SHORTENER_API_BASE", "/v2/api");
            env::set_var("REQUEST_TIMEOUT_SECS", "3");
            env::set_var("URL_DISPLAY_WIDTH", "not-a-number");
        }

        let config = Config::from_env();
        assert_eq!(
            config.api_base_url().unwrap().as_str(),
            "https://sho.rt/v2/api"
        );
        assert_eq!(config.request_timeout(), Duration::from_secs(3));
        assert_eq!(config.url_display_width, 48);

        // Cleanup
        unsafe {
            env::remove_var("SHORTENER_ORIGIN");
            env::remove_var("SHORTENER_API_BASE");
            env::remove_var("REQUEST_TIMEOUT_SECS");
            env::remove_var("URL_DISPLAY_WIDTH");
        }
    }
}
