//! Authenticated HTTP session with bounded automatic retries.
//!
//! A [`Session`] owns the `reqwest::Client` (timeouts and pool limits from
//! [`KiteConfig`]), the cached `Authorization: enctoken <token>` header, and
//! the [`RetryConfig`]. Retries happen entirely inside [`Session::send`]:
//! once attempts run out on a retryable status, the last response is returned
//! as-is rather than turned into an error.

use reqwest::header::{self, HeaderValue};
use reqwest::{Method, RequestBuilder, Response};

use crate::config::KiteConfig;
use crate::constants::AUTH_SCHEME;
use crate::error::{KiteError, Result};
use crate::retry::RetryConfig;

/// Long-lived HTTP context shared by every API call of a client.
#[derive(Debug, Clone)]
pub struct Session {
    http: reqwest::Client,
    /// `enctoken <token>`, marked sensitive.
    auth_header: HeaderValue,
    retry: RetryConfig,
}

impl Session {
    /// Build the HTTP client and auth header for `enctoken`.
    pub fn new(enctoken: &str, config: &KiteConfig) -> Result<Self> {
        let mut auth_header = HeaderValue::from_str(&format!("{AUTH_SCHEME} {enctoken}"))
            .map_err(|_| {
                KiteError::InvalidArgument("enctoken contains invalid header characters".into())
            })?;
        auth_header.set_sensitive(true);

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .pool_idle_timeout(config.pool_idle_timeout)
            .build()?;

        Ok(Self {
            http,
            auth_header,
            retry: config.retry.clone(),
        })
    }

    /// Start a request to an absolute URL with the auth header attached.
    pub fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .header(header::AUTHORIZATION, self.auth_header.clone())
    }

    pub fn get(&self, url: &str) -> RequestBuilder {
        self.request(Method::GET, url)
    }

    pub fn post(&self, url: &str) -> RequestBuilder {
        self.request(Method::POST, url)
    }

    pub fn put(&self, url: &str) -> RequestBuilder {
        self.request(Method::PUT, url)
    }

    pub fn delete(&self, url: &str) -> RequestBuilder {
        self.request(Method::DELETE, url)
    }

    /// Execute a request, retrying transient failures per the [`RetryConfig`].
    ///
    /// Status-based retries only apply to methods in
    /// [`RetryConfig::retry_methods`]. Connection failures are retried for any
    /// method since the request never reached the server. A request whose
    /// body cannot be cloned is sent exactly once.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let request = builder.build()?;
        let method = request.method().clone();
        let url = request.url().clone();
        let status_retry = self.retry.allows_method(&method);

        let mut attempt: u32 = 0;
        loop {
            let Some(next) = request.try_clone() else {
                return Ok(self.http.execute(request).await?);
            };
            let exhausted = attempt >= self.retry.max_retries;

            let delay = match self.http.execute(next).await {
                Ok(resp) => {
                    let status = resp.status();
                    if exhausted
                        || !status_retry
                        || !self.retry.should_retry_status(status.as_u16())
                    {
                        return Ok(resp);
                    }
                    let retry_after = resp
                        .headers()
                        .get(header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok());
                    let delay = self
                        .retry
                        .retry_after(status.as_u16(), retry_after)
                        .unwrap_or_else(|| self.retry.delay_for_attempt(attempt));
                    tracing::warn!(%method, %url, %status, attempt, ?delay, "retrying request");
                    delay
                }
                Err(err) if err.is_connect() && self.retry.retry_on_connect && !exhausted => {
                    let delay = self.retry.delay_for_attempt(attempt);
                    tracing::warn!(%method, %url, error = %err, attempt, ?delay, "retrying request");
                    delay
                }
                Err(err) => return Err(err.into()),
            };

            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}
