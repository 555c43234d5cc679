//! Historical Data endpoint: OHLCV candles.

use chrono::{Local, TimeDelta};

use crate::client::KiteClient;
use crate::error::{KiteError, Result};
use crate::types::enums::Interval;
use crate::types::historical::*;

/// Date-time layout accepted by the `from`/`to` parameters.
const QUERY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

impl KiteClient {
    /// Retrieve candles for an instrument over a date range.
    ///
    /// Rows come back in server order. A 7-column row (requested with
    /// `oi = true`) fills [`Candle::oi`]; any row that is not 6 or 7 columns
    /// is a [`KiteError::Shape`] error.
    ///
    /// **Endpoint:** `GET /instruments/historical/{instrument_token}/{interval}`
    pub async fn historical_data(&self, req: &HistoricalDataRequest) -> Result<Vec<Candle>> {
        let path = format!(
            "/instruments/historical/{}/{}",
            req.instrument_token, req.interval
        );
        let data: HistoricalData = self.get_query(&path, &req.query()).await?;
        parse_candles(data.candles)
    }

    /// Retrieve the last `days` days of candles up to now.
    pub async fn recent_candles(
        &self,
        instrument_token: u64,
        interval: Interval,
        days: u32,
    ) -> Result<Vec<Candle>> {
        let to = Local::now().naive_local();
        let from = TimeDelta::try_days(i64::from(days))
            .and_then(|span| to.checked_sub_signed(span))
            .ok_or_else(|| KiteError::InvalidArgument(format!("{days} days is out of range")))?;
        let req = HistoricalDataRequest::new(
            instrument_token,
            from.format(QUERY_TIME_FORMAT).to_string(),
            to.format(QUERY_TIME_FORMAT).to_string(),
            interval,
        );
        self.historical_data(&req).await
    }
}
