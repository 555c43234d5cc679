//! Historical Data types: candle request and rows.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{KiteError, Result};
use crate::types::enums::Interval;

/// Timestamp layout of candle rows, e.g. `2023-01-01T09:15:00+0530`.
const CANDLE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// Parameters for `GET /instruments/historical/{token}/{interval}`.
///
/// `from` and `to` are passed through verbatim; the API accepts `yyyy-mm-dd`
/// or `yyyy-mm-dd hh:mm:ss`.
#[derive(Debug, Clone)]
pub struct HistoricalDataRequest {
    pub instrument_token: u64,
    pub from: String,
    pub to: String,
    pub interval: Interval,
    /// Stitch expired futures into a continuous series.
    pub continuous: bool,
    /// Include open interest as a 7th column.
    pub oi: bool,
}

impl HistoricalDataRequest {
    pub fn new(
        instrument_token: u64,
        from: impl Into<String>,
        to: impl Into<String>,
        interval: Interval,
    ) -> Self {
        Self {
            instrument_token,
            from: from.into(),
            to: to.into(),
            interval,
            continuous: false,
            oi: false,
        }
    }

    pub fn continuous(mut self, continuous: bool) -> Self {
        self.continuous = continuous;
        self
    }

    pub fn oi(mut self, oi: bool) -> Self {
        self.oi = oi;
        self
    }

    pub(crate) fn query(&self) -> HistoricalQuery<'_> {
        HistoricalQuery {
            from: &self.from,
            to: &self.to,
            interval: self.interval,
            continuous: u8::from(self.continuous),
            oi: u8::from(self.oi),
        }
    }
}

/// Query string form of [`HistoricalDataRequest`]; flags are sent as `1`/`0`.
#[derive(Debug, Serialize)]
pub(crate) struct HistoricalQuery<'a> {
    from: &'a str,
    to: &'a str,
    interval: Interval,
    continuous: u8,
    oi: u8,
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

/// `data` payload of the historical endpoint.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct HistoricalData {
    pub candles: Vec<Vec<Value>>,
}

/// One OHLCV candle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candle {
    pub date: DateTime<FixedOffset>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
    /// Open interest; present only when the row carried a 7th column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oi: Option<i64>,
}

/// A raw candle row, classified by arity.
#[derive(Debug, Clone, PartialEq)]
pub enum CandleRow {
    /// `[date, open, high, low, close, volume]`
    WithoutOi([Value; 6]),
    /// `[date, open, high, low, close, volume, oi]`
    WithOi([Value; 7]),
}

impl TryFrom<Vec<Value>> for CandleRow {
    type Error = KiteError;

    fn try_from(row: Vec<Value>) -> Result<Self> {
        let len = row.len();
        let classified = match len {
            6 => <[Value; 6]>::try_from(row).ok().map(Self::WithoutOi),
            7 => <[Value; 7]>::try_from(row).ok().map(Self::WithOi),
            _ => None,
        };
        classified
            .ok_or_else(|| KiteError::Shape(format!("candle row has {len} fields, expected 6 or 7")))
    }
}

impl TryFrom<CandleRow> for Candle {
    type Error = KiteError;

    fn try_from(row: CandleRow) -> Result<Self> {
        let (fields, oi) = match &row {
            CandleRow::WithoutOi(f) => (&f[..], None),
            CandleRow::WithOi(f) => (&f[..6], Some(integer(&f[6], "oi")?)),
        };

        let raw_date = fields[0]
            .as_str()
            .ok_or_else(|| KiteError::Shape("candle `date` is not a string".into()))?;
        let date = DateTime::parse_from_str(raw_date, CANDLE_TIME_FORMAT)
            .map_err(|e| KiteError::Shape(format!("candle `date` {raw_date:?}: {e}")))?;

        Ok(Self {
            date,
            open: float(&fields[1], "open")?,
            high: float(&fields[2], "high")?,
            low: float(&fields[3], "low")?,
            close: float(&fields[4], "close")?,
            volume: integer(&fields[5], "volume")?,
            oi,
        })
    }
}

/// Convert the `candles` array into records, preserving order.
pub fn parse_candles(rows: Vec<Vec<Value>>) -> Result<Vec<Candle>> {
    rows.into_iter()
        .enumerate()
        .map(|(idx, row)| {
            CandleRow::try_from(row)
                .and_then(Candle::try_from)
                .map_err(|e| match e {
                    KiteError::Shape(msg) => KiteError::Shape(format!("candle {idx}: {msg}")),
                    other => other,
                })
        })
        .collect()
}

fn float(value: &Value, field: &str) -> Result<f64> {
    value
        .as_f64()
        .ok_or_else(|| KiteError::Shape(format!("candle `{field}` is not a number: {value}")))
}

/// Integers may arrive as `1000` or `1000.0`.
fn integer(value: &Value, field: &str) -> Result<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
        .ok_or_else(|| KiteError::Shape(format!("candle `{field}` is not an integer: {value}")))
}
