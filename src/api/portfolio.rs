//! Portfolio endpoints: Positions.

use crate::client::KiteClient;
use crate::error::Result;
use crate::types::portfolio::Positions;

impl KiteClient {
    /// Retrieve net and day positions.
    ///
    /// **Endpoint:** `GET /portfolio/positions`
    pub async fn positions(&self) -> Result<Positions> {
        self.get("/portfolio/positions").await
    }
}
