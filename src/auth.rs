//! Credential collaborator.
//!
//! Obtaining an `enctoken` (password + TOTP login, token caching) happens
//! outside this crate. [`KiteClient::connect`](crate::client::KiteClient::connect)
//! only needs something implementing [`Login`] that hands back
//! [`Credentials`]; a failure there is fatal and is not retried.

use std::future::Future;

use crate::constants::ENCTOKEN_ENV_VAR;
use crate::error::{KiteError, Result};

/// Result of a successful login. Only `enctoken` is used by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub enctoken: String,
    pub user_id: Option<String>,
}

impl Credentials {
    pub fn new(enctoken: impl Into<String>) -> Self {
        Self {
            enctoken: enctoken.into(),
            user_id: None,
        }
    }
}

/// Source of an authentication token.
///
/// # Example
///
/// ```
/// use kite_rs::auth::{Credentials, Login};
///
/// struct Vault;
///
/// impl Login for Vault {
///     async fn login(&self) -> kite_rs::Result<Credentials> {
///         Ok(Credentials::new("token-from-vault"))
///     }
/// }
/// ```
pub trait Login {
    fn login(&self) -> impl Future<Output = Result<Credentials>> + Send;
}

/// A token that is already known.
#[derive(Debug, Clone)]
pub struct StaticToken(pub String);

impl Login for StaticToken {
    async fn login(&self) -> Result<Credentials> {
        Ok(Credentials::new(self.0.clone()))
    }
}

/// Reads the token from an environment variable (`KITE_ENCTOKEN` by default).
#[derive(Debug, Clone)]
pub struct EnvToken {
    var: String,
}

impl EnvToken {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvToken {
    fn default() -> Self {
        Self::new(ENCTOKEN_ENV_VAR)
    }
}

impl Login for EnvToken {
    async fn login(&self) -> Result<Credentials> {
        let token = std::env::var(&self.var)
            .map_err(|e| KiteError::Auth(format!("{}: {e}", self.var)))?;
        Ok(Credentials::new(token))
    }
}
