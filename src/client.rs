//! Core HTTP client for the Kite REST API.
//!
//! The [`KiteClient`] struct is the main entry point for interacting with all
//! Kite endpoints. It composes a [`Session`] (auth header, timeouts, retries)
//! with the two base URLs and provides `get`, `post_form`, `put_form` and
//! `delete_form` helpers that unwrap the `data` envelope of every JSON
//! response.
//!
//! API endpoint methods are added to `KiteClient` via `impl` blocks in the
//! [`crate::api`] module.

use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::auth::Login;
use crate::config::KiteConfig;
use crate::error::{KiteError, Result};
use crate::session::Session;

/// JSON success envelope: `{"status": "success", "data": ...}`.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Option<T>,
}

/// Core HTTP client for the Kite REST API.
///
/// Cloning is cheap; clones share the same connection pool.
///
/// # Example
///
/// ```no_run
/// use kite_rs::auth::StaticToken;
/// use kite_rs::client::KiteClient;
///
/// # #[tokio::main]
/// # async fn main() -> kite_rs::error::Result<()> {
/// let client = KiteClient::connect(&StaticToken("your-enctoken".into())).await?;
/// let positions = client.positions().await?;
/// println!("{} net positions", positions.net.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct KiteClient {
    session: Session,
    /// Base URL for order-management requests (no trailing slash).
    root_url: String,
    /// Base URL for the instrument dump and quotes (no trailing slash).
    api_url: String,
}

impl KiteClient {
    /// Log in through `login` and build a client with the default configuration.
    pub async fn connect<L: Login>(login: &L) -> Result<Self> {
        Self::connect_with_config(login, KiteConfig::default()).await
    }

    /// Log in through `login` and build a client with `config`.
    ///
    /// Any failure of the login collaborator, or an empty token, is returned
    /// as [`KiteError::Auth`]. Login is never retried.
    pub async fn connect_with_config<L: Login>(login: &L, config: KiteConfig) -> Result<Self> {
        let credentials = login.login().await.map_err(|e| match e {
            KiteError::Auth(_) => e,
            other => KiteError::Auth(other.to_string()),
        })?;
        if credentials.enctoken.is_empty() {
            return Err(KiteError::Auth("login returned an empty enctoken".into()));
        }
        tracing::debug!(user_id = ?credentials.user_id, "login succeeded");
        Self::with_config(&credentials.enctoken, config)
    }

    /// Build a client from an already obtained enctoken.
    pub fn new(enctoken: &str) -> Result<Self> {
        Self::with_config(enctoken, KiteConfig::default())
    }

    /// Build a client from an enctoken and a custom configuration.
    ///
    /// Useful for testing against a mock server.
    pub fn with_config(enctoken: &str, config: KiteConfig) -> Result<Self> {
        let (root_url, api_url) = config.validated_urls()?;
        let session = Session::new(enctoken, &config)?;
        tracing::debug!(%root_url, %api_url, "kite client ready");
        Ok(Self {
            session,
            root_url,
            api_url,
        })
    }

    /// Returns the underlying session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn root_url(&self) -> &str {
        &self.root_url
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Release the client.
    ///
    /// Pooled connections are dropped with the last clone; there is nothing
    /// to flush.
    pub fn close(self) {
        tracing::debug!("kite client closed");
    }

    // -----------------------------------------------------------------------
    // Generic HTTP helpers (paths are relative to the root URL)
    // -----------------------------------------------------------------------

    /// Perform a GET request and return the response's `data` field.
    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");
        self.send_json(self.session.get(&url)).await
    }

    /// Perform a GET request with query parameters and return `data`.
    pub async fn get_query<Q: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<R> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");
        self.send_json(self.session.get(&url).query(query)).await
    }

    /// Perform a POST request with a form body and return `data`.
    pub async fn post_form<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R> {
        let url = self.url(path);
        tracing::debug!(%url, "POST");
        self.send_json(self.session.post(&url).form(body)).await
    }

    /// Perform a PUT request with a form body and return `data`.
    pub async fn put_form<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R> {
        let url = self.url(path);
        tracing::debug!(%url, "PUT");
        self.send_json(self.session.put(&url).form(body)).await
    }

    /// Perform a DELETE request with a form body and return `data`.
    pub async fn delete_form<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R> {
        let url = self.url(path);
        tracing::debug!(%url, "DELETE");
        self.send_json(self.session.delete(&url).form(body)).await
    }

    // -----------------------------------------------------------------------
    // Crate helpers
    // -----------------------------------------------------------------------

    /// Build a URL on the public API host.
    pub(crate) fn api_endpoint(&self, path: &str) -> String {
        join(&self.api_url, path)
    }

    /// Send a request and return the body text of a success response.
    pub(crate) async fn send_text(&self, builder: RequestBuilder) -> Result<String> {
        let resp = self.session.send(builder).await?;
        let status = resp.status();
        let body = resp.text().await?;
        if status.is_success() {
            Ok(body)
        } else {
            Err(KiteError::from_response(status, &body))
        }
    }

    /// Send a request and unwrap the `data` field of the JSON response.
    pub(crate) async fn send_json<R: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<R> {
        let resp = self.session.send(builder).await?;
        Self::handle_response(resp).await
    }

    // -----------------------------------------------------------------------
    // Private helpers
    // -----------------------------------------------------------------------

    /// Build the full URL from a path relative to the root URL.
    fn url(&self, path: &str) -> String {
        join(&self.root_url, path)
    }

    /// Read a response, returning either its `data` payload or a `KiteError`.
    async fn handle_response<R: DeserializeOwned>(resp: Response) -> Result<R> {
        let status = resp.status();
        let bytes = resp.bytes().await?;

        if !status.is_success() {
            let body = String::from_utf8_lossy(&bytes);
            return Err(KiteError::from_response(status, &body));
        }

        let envelope: Envelope<R> = serde_json::from_slice(&bytes)?;
        envelope
            .data
            .ok_or_else(|| KiteError::Shape("response has no `data` field".into()))
    }
}

fn join(base: &str, path: &str) -> String {
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}
