//! User endpoints: Profile, Margins.

use reqwest::StatusCode;

use crate::client::KiteClient;
use crate::error::{KiteError, Result};
use crate::types::user::{Margins, Profile};

impl KiteClient {
    /// Retrieve the user profile.
    ///
    /// **Endpoint:** `GET /user/profile`
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use kite_rs::client::KiteClient;
    /// # #[tokio::main]
    /// # async fn main() -> kite_rs::error::Result<()> {
    /// let client = KiteClient::new("your-enctoken")?;
    /// let profile = client.profile().await?;
    /// println!("Exchanges enabled: {:?}", profile.exchanges);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn profile(&self) -> Result<Profile> {
        self.get("/user/profile").await
    }

    /// Retrieve funds and margin usage for the equity and commodity segments.
    ///
    /// **Endpoint:** `GET /user/margins`
    pub async fn margins(&self) -> Result<Margins> {
        self.get("/user/margins").await
    }

    /// Check whether the session's token is still accepted.
    ///
    /// Returns `Ok(false)` when the profile endpoint answers 401 or 403;
    /// any other failure is returned as an error.
    pub async fn validate_token(&self) -> Result<bool> {
        match self.profile().await {
            Ok(_) => Ok(true),
            Err(KiteError::Api { status, .. })
                if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN =>
            {
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}
