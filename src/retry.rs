//! Retry policy for the session transport.
//!
//! [`RetryConfig`] decides whether a response or connection failure is retried
//! and how long to wait before the next attempt. The policy itself is applied
//! by [`Session::send`](crate::session::Session::send).

use std::time::Duration;

use reqwest::Method;

use crate::constants::retry::{
    BACKOFF_BASE, BACKOFF_MAX, MAX_RETRIES, RETRY_AFTER_STATUS, RETRY_ON_STATUS,
};

/// Backoff strategy between retries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Backoff {
    /// Uses a fixed delay between retries.
    Fixed {
        /// Delay between retries.
        delay: Duration,
    },
    /// Uses an exponential delay between retries.
    ///
    /// The delay is calculated as `base * (factor ^ attempt)`, clamped to
    /// `0..=max`.
    Exponential {
        /// The initial backoff duration.
        base: Duration,
        /// The multiplicative factor for each subsequent retry.
        factor: f64,
        /// The maximum duration to wait between retries.
        max: Duration,
    },
}

impl Default for Backoff {
    fn default() -> Self {
        Self::Exponential {
            base: BACKOFF_BASE,
            factor: 2.0,
            max: BACKOFF_MAX,
        }
    }
}

impl Backoff {
    /// Delay before retry number `attempt` (0-based).
    pub fn delay(self, attempt: u32) -> Duration {
        match self {
            Self::Fixed { delay } => delay,
            Self::Exponential { base, factor, max } => {
                let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
                let seconds = (base.as_secs_f64() * factor.powi(exponent)).max(0.0);
                Duration::try_from_secs_f64(seconds).map_or(max, |delay| delay.min(max))
            }
        }
    }

    /// Largest delay this strategy will ever produce.
    pub fn max_delay(self) -> Duration {
        match self {
            Self::Fixed { delay } => delay,
            Self::Exponential { max, .. } => max,
        }
    }
}

/// Configuration for the automatic retry mechanism.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retries after the initial attempt. Total attempts = `max_retries + 1`.
    pub max_retries: u32,
    /// The backoff strategy to use between retries.
    pub backoff: Backoff,
    /// HTTP status codes that trigger a retry.
    pub retry_on_status: Vec<u16>,
    /// Methods eligible for status-based retries.
    ///
    /// POST is left out by default: a retried order placement could place
    /// the order twice.
    pub retry_methods: Vec<Method>,
    /// Retry when the connection could not be established.
    pub retry_on_connect: bool,
    /// Honour an integer `Retry-After` header on 413, 429 and 503 responses,
    /// capped at the backoff maximum. Other statuses always use the backoff.
    pub respect_retry_after: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: MAX_RETRIES,
            backoff: Backoff::default(),
            retry_on_status: RETRY_ON_STATUS.to_vec(),
            retry_methods: vec![
                Method::GET,
                Method::HEAD,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
                Method::TRACE,
            ],
            retry_on_connect: true,
            respect_retry_after: true,
        }
    }
}

impl RetryConfig {
    /// Default policy with a different retry bound.
    pub fn exponential(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Self::default()
        }
    }

    /// Default policy with a fixed delay between retries.
    pub fn fixed(delay: Duration, max_retries: u32) -> Self {
        Self {
            max_retries,
            backoff: Backoff::Fixed { delay },
            ..Self::default()
        }
    }

    /// Disable retries.
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Check if a given HTTP status code should trigger a retry.
    pub fn should_retry_status(&self, status: u16) -> bool {
        self.retry_on_status.contains(&status)
    }

    /// Check if requests with this method may be retried on status.
    pub fn allows_method(&self, method: &Method) -> bool {
        self.retry_methods.contains(method)
    }

    /// Calculate the delay for a given retry attempt.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        self.backoff.delay(attempt)
    }

    /// Delay requested by the server for a `status` response, bounded by the
    /// backoff maximum.
    pub fn retry_after(&self, status: u16, header: Option<&str>) -> Option<Duration> {
        if !self.respect_retry_after || !RETRY_AFTER_STATUS.contains(&status) {
            return None;
        }
        let seconds: u64 = header?.trim().parse().ok()?;
        Some(Duration::from_secs(seconds).min(self.backoff.max_delay()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_backoff() {
        let backoff = Backoff::Fixed {
            delay: Duration::from_millis(100),
        };

        assert_eq!(backoff.delay(0), Duration::from_millis(100));
        assert_eq!(backoff.delay(7), Duration::from_millis(100));
    }

    #[test]
    fn test_default_backoff_doubles_from_one_second() {
        let backoff = Backoff::default();

        assert_eq!(backoff.delay(0), Duration::from_secs(1));
        assert_eq!(backoff.delay(1), Duration::from_secs(2));
        assert_eq!(backoff.delay(2), Duration::from_secs(4));
        assert_eq!(backoff.delay(3), Duration::from_secs(8));
        assert_eq!(backoff.delay(4), Duration::from_secs(16));
        assert_eq!(backoff.delay(10), Duration::from_secs(120)); // capped
    }

    #[test]
    fn test_default_retry_config() {
        let config = RetryConfig::default();

        assert_eq!(config.max_retries, 5);
        for status in [429, 500, 502, 503, 504] {
            assert!(config.should_retry_status(status), "{status} should retry");
        }
        assert!(!config.should_retry_status(400));
        assert!(!config.should_retry_status(403));
        assert!(config.allows_method(&Method::GET));
        assert!(config.allows_method(&Method::PUT));
        assert!(config.allows_method(&Method::DELETE));
        assert!(!config.allows_method(&Method::POST));
        assert!(config.retry_on_connect);
    }

    #[test]
    fn test_retry_after_is_capped() {
        let config = RetryConfig::fixed(Duration::from_secs(3), 2);

        assert_eq!(config.retry_after(429, Some("1")), Some(Duration::from_secs(1)));
        assert_eq!(config.retry_after(503, Some("60")), Some(Duration::from_secs(3)));
        assert_eq!(config.retry_after(429, Some("Wed, 21 Oct 2015 07:28:00 GMT")), None);
        assert_eq!(config.retry_after(429, None), None);
    }

    #[test]
    fn test_retry_after_only_on_throttling_statuses() {
        let config = RetryConfig::default();

        assert_eq!(config.retry_after(413, Some("2")), Some(Duration::from_secs(2)));
        assert_eq!(config.retry_after(500, Some("2")), None);
        assert_eq!(config.retry_after(502, Some("2")), None);
        assert_eq!(config.retry_after(504, Some("2")), None);
    }

    #[test]
    fn test_exponential_backoff_never_panics() {
        let negative = Backoff::Exponential {
            base: Duration::from_secs(1),
            factor: -2.0,
            max: Duration::from_secs(10),
        };
        assert_eq!(negative.delay(1), Duration::ZERO);
        assert_eq!(negative.delay(2), Duration::from_secs(4));

        let unbounded = Backoff::Exponential {
            base: Duration::from_secs(1),
            factor: 2.0,
            max: Duration::MAX,
        };
        assert_eq!(unbounded.delay(3), Duration::from_secs(8));
        assert_eq!(unbounded.delay(u32::MAX), Duration::MAX);
    }

    #[test]
    fn test_retry_after_can_be_ignored() {
        let config = RetryConfig {
            respect_retry_after: false,
            ..RetryConfig::default()
        };
        assert_eq!(config.retry_after(429, Some("1")), None);
    }

    #[test]
    fn test_retry_config_no_retry() {
        let config = RetryConfig::no_retry();
        assert_eq!(config.max_retries, 0);
    }
}
