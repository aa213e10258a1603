//! Public configuration for the transport client.

use std::time::Duration;

use thiserror::Error;

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Per-request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "IOTWATCH_API_BASE_URL";

/// Environment variable overriding the timeout, in whole seconds.
pub const TIMEOUT_ENV: &str = "IOTWATCH_TIMEOUT_SECS";

/// Configuration for the transport client.
///
/// # Example
///
/// ```
/// use iotwatch_http::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::new()
///     .with_base_url("https://iot.example.com/api")
///     .with_timeout(Duration::from_secs(5));
/// assert_eq!(config.base_url(), "https://iot.example.com/api");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub(crate) base_url: String,
    pub(crate) user_agent: String,
    pub(crate) timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: concat!("iotwatch/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Create a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `IOTWATCH_API_BASE_URL` and
    /// `IOTWATCH_TIMEOUT_SECS` when they are set.
    ///
    /// An unparsable timeout is ignored with a warning.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(url) = lookup(BASE_URL_ENV).filter(|u| !u.trim().is_empty()) {
            config.base_url = url.trim().to_string();
        }
        if let Some(raw) = lookup(TIMEOUT_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = Duration::from_secs(secs),
                _ => tracing::warn!(value = %raw, "Ignoring invalid {TIMEOUT_ENV}"),
            }
        }
        config
    }

    /// Set the base URL every request path is resolved against.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the per-request timeout.
    ///
    /// Defaults to 10 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// The client could not be constructed.
#[derive(Debug, Error)]
pub enum ClientBuildError {
    #[error("Invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Failed to create HTTP client: {0}")]
    Backend(#[from] reqwest::Error),
}
