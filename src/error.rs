//! Error types for the `kite-rs` crate.
//!
//! All fallible operations in this crate return [`Result<T>`], which is an
//! alias for `std::result::Result<T, KiteError>`.
//!
//! [`KiteError`] covers:
//! - **Authentication errors**: The login collaborator failed or returned an unusable token
//! - **Transport errors**: Network, TLS, timeout failures
//! - **API errors**: Non-success responses from Kite (after transport retries)
//! - **Shape errors**: A response decoded but lacks an expected field or row shape
//! - **JSON errors**: Deserialization failures
//! - **URL errors**: Malformed base URLs in configuration
//! - **Invalid arguments**: Client-side validation errors

use serde::Deserialize;

/// Error envelope returned by Kite for failed requests.
///
/// `{"status": "error", "message": "...", "error_type": "TokenException"}`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error_type: Option<String>,
}

/// All possible errors produced by the `kite-rs` client.
#[derive(Debug, thiserror::Error)]
pub enum KiteError {
    /// The login collaborator failed, or returned an empty token.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// A network or transport-level error from `reqwest`.
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("API error (HTTP {status}): {}", api_message(.error_type, .message))]
    Api {
        /// The HTTP status code of the final response.
        status: reqwest::StatusCode,
        /// Kite exception class (e.g. `TokenException`, `InputException`).
        error_type: Option<String>,
        /// The `message` field of the error body, or the raw body text.
        message: String,
    },

    /// The response was valid JSON/CSV but did not have the expected shape.
    #[error("unexpected response shape: {0}")]
    Shape(String),

    /// Failed to deserialize a JSON response body.
    #[error("JSON deserialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// An error parsing a configured base URL.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// The caller provided an invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl KiteError {
    /// Build an [`KiteError::Api`] from a failed response's status and body.
    pub(crate) fn from_response(status: reqwest::StatusCode, body: &str) -> Self {
        match serde_json::from_str::<ApiErrorBody>(body) {
            Ok(ApiErrorBody {
                message: Some(message),
                error_type,
            }) => Self::Api {
                status,
                error_type,
                message,
            },
            _ => Self::Api {
                status,
                error_type: None,
                message: body.to_owned(),
            },
        }
    }

    /// The HTTP status of an [`KiteError::Api`] error, if this is one.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(err) => err.status(),
            _ => None,
        }
    }
}

fn api_message(error_type: &Option<String>, message: &str) -> String {
    match error_type {
        Some(kind) => format!("[{kind}] {message}"),
        None => message.to_owned(),
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, KiteError>;
