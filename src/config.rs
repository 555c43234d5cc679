//! Client configuration.
//!
//! [`KiteConfig`] collects the base URLs, timeouts, connection-pool limits and
//! retry policy used to build a [`KiteClient`](crate::client::KiteClient).
//! Every field has a default taken from [`crate::constants`].

use std::time::Duration;

use url::Url;

use crate::constants::{
    API_URL, DEFAULT_CONNECT_TIMEOUT, DEFAULT_POOL_IDLE_TIMEOUT, DEFAULT_POOL_MAX_IDLE_PER_HOST,
    DEFAULT_TIMEOUT, ROOT_URL, USER_AGENT,
};
use crate::error::Result;
use crate::retry::RetryConfig;

/// Settings for the HTTP session and endpoint locations.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use kite_rs::{KiteConfig, RetryConfig};
///
/// let config = KiteConfig::default()
///     .with_timeout(Duration::from_secs(10))
///     .with_retry(RetryConfig::exponential(3));
/// assert_eq!(config.retry.max_retries, 3);
/// ```
#[derive(Debug, Clone)]
pub struct KiteConfig {
    /// Base URL of the order-management endpoints (orders, user, portfolio, historical).
    pub root_url: String,
    /// Base URL of the public API host (instrument dump, quotes).
    pub api_url: String,
    /// Total time allowed for one HTTP attempt.
    pub timeout: Duration,
    /// Time allowed to establish a connection.
    pub connect_timeout: Duration,
    /// Idle keep-alive connections kept per host.
    pub pool_max_idle_per_host: usize,
    /// How long idle pooled connections live.
    pub pool_idle_timeout: Duration,
    /// Value of the `User-Agent` header.
    pub user_agent: String,
    /// Transport retry policy.
    pub retry: RetryConfig,
}

impl Default for KiteConfig {
    fn default() -> Self {
        Self {
            root_url: ROOT_URL.to_owned(),
            api_url: API_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            pool_max_idle_per_host: DEFAULT_POOL_MAX_IDLE_PER_HOST,
            pool_idle_timeout: DEFAULT_POOL_IDLE_TIMEOUT,
            user_agent: USER_AGENT.to_owned(),
            retry: RetryConfig::default(),
        }
    }
}

impl KiteConfig {
    /// Point the order-management endpoints somewhere else (e.g. a mock server).
    pub fn with_root_url(mut self, url: impl Into<String>) -> Self {
        self.root_url = url.into();
        self
    }

    /// Point the instrument dump and quote endpoints somewhere else.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_pool_max_idle_per_host(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = max;
        self
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Check both base URLs parse, returning them without a trailing slash.
    pub(crate) fn validated_urls(&self) -> Result<(String, String)> {
        Url::parse(&self.root_url)?;
        Url::parse(&self.api_url)?;
        Ok((
            self.root_url.trim_end_matches('/').to_owned(),
            self.api_url.trim_end_matches('/').to_owned(),
        ))
    }
}
