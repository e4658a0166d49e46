//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `LAREK_API_URL` - Base URL of the order API (e.g. `https://larek.example/api/weblarek`)
//! - `LAREK_CDN_URL` - Base URL for product images (e.g. `https://larek.example/content/weblarek`)
//!
//! ## Optional
//! - `LAREK_TIMEOUT_SECS` - HTTP request timeout in seconds (default: 10)

use std::env;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront client configuration.
#[derive(Debug, Clone)]
pub struct LarekConfig {
    /// Base URL of the order API, with a trailing slash.
    pub api_url: Url,
    /// Base URL for product images, with a trailing slash.
    pub cdn_url: Url,
    /// HTTP request timeout.
    pub timeout: Duration,
}

impl LarekConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a value does
    /// not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_url = require_url("LAREK_API_URL")?;
        let cdn_url = require_url("LAREK_CDN_URL")?;

        let timeout_secs = match env::var("LAREK_TIMEOUT_SECS") {
            Ok(value) => value.parse::<u64>().map_err(|e| {
                ConfigError::InvalidEnvVar("LAREK_TIMEOUT_SECS".to_owned(), e.to_string())
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_url,
            cdn_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Build a configuration directly (tests, tools).
    #[must_use]
    pub fn new(api_url: Url, cdn_url: Url) -> Self {
        Self {
            api_url: with_trailing_slash(api_url),
            cdn_url: with_trailing_slash(cdn_url),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

fn require_url(name: &str) -> Result<Url, ConfigError> {
    let value = env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_owned()))?;
    let url = Url::parse(&value)
        .map_err(|e| ConfigError::InvalidEnvVar(name.to_owned(), e.to_string()))?;
    Ok(with_trailing_slash(url))
}

/// `Url::join` treats a base without a trailing slash as a file, so
/// normalize bases to directory form.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_normalization() {
        let url = Url::parse("https://larek.example/api/weblarek").unwrap();
        assert_eq!(
            with_trailing_slash(url).as_str(),
            "https://larek.example/api/weblarek/"
        );

        let url = Url::parse("https://larek.example/api/weblarek/").unwrap();
        assert_eq!(
            with_trailing_slash(url).as_str(),
            "https://larek.example/api/weblarek/"
        );
    }

    #[test]
    fn test_join_after_normalization() {
        let config = LarekConfig::new(
            Url::parse("https://larek.example/api/weblarek").unwrap(),
            Url::parse("https://larek.example/content/weblarek").unwrap(),
        );
        assert_eq!(
            config.api_url.join("product/").unwrap().as_str(),
            "https://larek.example/api/weblarek/product/"
        );
    }
}
