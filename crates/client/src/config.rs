//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `GREENCART_BACKEND_URL` - Base URL of the storefront backend
//!
//! ## Optional
//! - `GREENCART_SESSION_COOKIE` - Cookie header sent with every request
//!   (e.g. `token=...`), the equivalent of a browser's stored credentials
//! - `GREENCART_CURRENCY` - Currency symbol for display (default: `$`)
//! - `GREENCART_SYNC_DEBOUNCE_MS` - Cart sync debounce window (default: 300)
//! - `GREENCART_HTTP_TIMEOUT_SECS` - Backend request timeout (default: 10)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

use crate::sync::SyncConfig;

const DEFAULT_CURRENCY: &str = "$";
const DEFAULT_SYNC_DEBOUNCE_MS: &str = "300";
const DEFAULT_HTTP_TIMEOUT_SECS: &str = "10";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Client application configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend connection settings
    pub backend: BackendConfig,
    /// Currency symbol shown before amounts
    pub currency: String,
    /// Cart sync settings
    pub sync: SyncConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Storefront backend connection settings.
///
/// Implements `Debug` manually to redact the session cookie.
#[derive(Clone)]
pub struct BackendConfig {
    /// Base URL, always ending in `/` so endpoint paths join beneath it
    pub base_url: Url,
    /// Cookie header value carrying the session token
    pub session_cookie: Option<SecretString>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendConfig")
            .field("base_url", &self.base_url.as_str())
            .field(
                "session_cookie",
                &self.session_cookie.as_ref().map(|_| "[REDACTED]"),
            )
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let backend = BackendConfig::from_env()?;
        let currency = get_env_or_default("GREENCART_CURRENCY", DEFAULT_CURRENCY);
        let debounce_ms = parse_u64(
            "GREENCART_SYNC_DEBOUNCE_MS",
            &get_env_or_default("GREENCART_SYNC_DEBOUNCE_MS", DEFAULT_SYNC_DEBOUNCE_MS),
        )?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            backend,
            currency,
            sync: SyncConfig {
                debounce: Duration::from_millis(debounce_ms),
            },
            sentry_dsn,
        })
    }
}

impl BackendConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base_url = parse_base_url(
            "GREENCART_BACKEND_URL",
            &get_required_env("GREENCART_BACKEND_URL")?,
        )?;
        let session_cookie = get_optional_env("GREENCART_SESSION_COOKIE").map(SecretString::from);
        let timeout_secs = parse_u64(
            "GREENCART_HTTP_TIMEOUT_SECS",
            &get_env_or_default("GREENCART_HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS),
        )?;

        Ok(Self {
            base_url,
            session_cookie,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_u64(key: &str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse an http(s) base URL and make sure it ends with a slash.
fn parse_base_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    let mut url =
        Url::parse(value).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_base_url_adds_trailing_slash() {
        let url = parse_base_url("TEST_URL", "http://localhost:4000").unwrap();
        assert_eq!(url.as_str(), "http://localhost:4000/");

        let url = parse_base_url("TEST_URL", "https://shop.example.com/backend").unwrap();
        assert_eq!(url.as_str(), "https://shop.example.com/backend/");
    }

    #[test]
    fn test_parse_base_url_rejects_garbage() {
        let err = parse_base_url("TEST_URL", "not a url").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "TEST_URL"));
    }

    #[test]
    fn test_parse_base_url_rejects_non_http_scheme() {
        assert!(parse_base_url("TEST_URL", "ftp://example.com/").is_err());
    }

    #[test]
    fn test_parse_u64() {
        assert_eq!(parse_u64("TEST_MS", " 250 ").unwrap(), 250);
        assert!(matches!(
            parse_u64("TEST_MS", "-1"),
            Err(ConfigError::InvalidEnvVar(_, _))
        ));
    }

    #[test]
    fn test_backend_config_debug_redacts_cookie() {
        let config = BackendConfig {
            base_url: Url::parse("http://localhost:4000/").unwrap(),
            session_cookie: Some(SecretString::from("token=super_secret_session")),
            timeout: Duration::from_secs(10),
        };

        let debug_output = format!("{config:?}");

        assert!(debug_output.contains("localhost:4000"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_session"));
    }
}
