//! Market Quote endpoint.

use crate::client::KiteClient;
use crate::error::Result;
use crate::types::market_quote::QuoteMap;

impl KiteClient {
    /// Retrieve full quotes for `EXCHANGE:TRADINGSYMBOL` identifiers
    /// (e.g. `NSE:INFY`) or instrument tokens.
    ///
    /// Each identifier is sent as a separate `i` query parameter.
    ///
    /// **Endpoint:** `GET {api_url}/quote?i=...`
    pub async fn quote<S: AsRef<str>>(&self, instruments: &[S]) -> Result<QuoteMap> {
        let url = self.api_endpoint("/quote");
        tracing::debug!(%url, count = instruments.len(), "GET");

        let query: Vec<(&str, &str)> = instruments.iter().map(|i| ("i", i.as_ref())).collect();
        self.send_json(self.session().get(&url).query(&query)).await
    }
}
