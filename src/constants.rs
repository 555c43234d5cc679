//! Constants for the Kite API.
//!
//! Contains base URLs and the transport defaults used by
//! [`KiteConfig::default`](crate::config::KiteConfig). They are exported for
//! advanced usage.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Base URLs
// ---------------------------------------------------------------------------

/// Base URL for the order management (OMS) endpoints.
pub const ROOT_URL: &str = "https://kite.zerodha.com/oms";

/// Base URL for the public API host (instrument dump, quotes).
pub const API_URL: &str = "https://api.kite.trade";

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

/// Scheme prefix of the `Authorization` header value.
pub const AUTH_SCHEME: &str = "enctoken";

/// Environment variable read by [`EnvToken`](crate::auth::EnvToken).
pub const ENCTOKEN_ENV_VAR: &str = "KITE_ENCTOKEN";

// ---------------------------------------------------------------------------
// Transport defaults
// ---------------------------------------------------------------------------

/// Total time allowed for a single HTTP attempt, body included.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Time allowed to establish a TCP/TLS connection.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Idle keep-alive connections retained per host.
pub const DEFAULT_POOL_MAX_IDLE_PER_HOST: usize = 4;

/// How long an idle pooled connection is kept before being dropped.
pub const DEFAULT_POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("kite-rs/", env!("CARGO_PKG_VERSION"));

/// Retry defaults for the session transport.
pub mod retry {
    use std::time::Duration;

    /// Retries after the initial attempt.
    pub const MAX_RETRIES: u32 = 5;
    /// First backoff delay; doubled on each further retry.
    pub const BACKOFF_BASE: Duration = Duration::from_secs(1);
    /// Upper bound for any single backoff delay.
    pub const BACKOFF_MAX: Duration = Duration::from_secs(120);
    /// Status codes treated as transient.
    pub const RETRY_ON_STATUS: [u16; 5] = [429, 500, 502, 503, 504];
    /// Statuses whose `Retry-After` header overrides the backoff.
    pub const RETRY_AFTER_STATUS: [u16; 3] = [413, 429, 503];
}
