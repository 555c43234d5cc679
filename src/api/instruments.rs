//! Instrument dump endpoint.

use crate::client::KiteClient;
use crate::error::Result;
use crate::types::enums::Exchange;
use crate::types::instruments::{Instrument, parse_instruments};

impl KiteClient {
    /// Download and parse the full instrument list, optionally for one exchange.
    ///
    /// The dump is fetched on every call; nothing is cached.
    ///
    /// **Endpoint:** `GET {api_url}/instruments` (CSV)
    pub async fn instruments(&self, exchange: Option<Exchange>) -> Result<Vec<Instrument>> {
        let url = self.api_endpoint("/instruments");
        tracing::debug!(%url, ?exchange, "GET");

        let csv = self.send_text(self.session().get(&url)).await?;
        let instruments = parse_instruments(&csv, exchange)?;
        tracing::debug!(count = instruments.len(), "parsed instruments");
        Ok(instruments)
    }
}
