//! Instrument dump types and CSV parsing.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{KiteError, Result};
use crate::types::enums::Exchange;

/// Number of comma-separated columns in each instrument row.
const FIELD_COUNT: usize = 12;

/// One row of the bulk instrument dump.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    /// Numeric id used by historical data and the ticker.
    pub instrument_token: u64,
    pub exchange_token: String,
    pub tradingsymbol: String,
    pub name: String,
    pub last_price: f64,
    /// Expiry for derivatives, `None` for cash instruments.
    pub expiry: Option<NaiveDate>,
    pub strike: f64,
    pub tick_size: f64,
    pub lot_size: u64,
    /// e.g. `EQ`, `FUT`, `CE`, `PE`.
    pub instrument_type: String,
    /// e.g. `NSE`, `NFO-OPT`, `INDICES`.
    pub segment: String,
    pub exchange: String,
}

/// Parse the instrument CSV dump.
///
/// The first line is the header and is skipped, as are blank lines (the dump
/// ends with a newline). Each row is split on `,` without quote handling;
/// the `name` column has exactly one character trimmed from each end to drop
/// its quotes. When `exchange` is given, only rows whose `exchange` column
/// equals its code are returned; rows of other exchanges are skipped before
/// they are validated.
///
/// A selected row without exactly 12 columns, or with an unparsable number or
/// date, fails the whole parse with [`KiteError::Shape`] naming the line.
pub fn parse_instruments(csv: &str, exchange: Option<Exchange>) -> Result<Vec<Instrument>> {
    let mut instruments = Vec::new();

    for (idx, line) in csv.split('\n').enumerate().skip(1) {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.is_empty() {
            continue;
        }

        let row: Vec<&str> = line.split(',').collect();
        // The exchange is the last column even when a name spills over a comma.
        if let Some(filter) = exchange {
            if row.last().copied() != Some(filter.as_str()) {
                continue;
            }
        }

        if row.len() != FIELD_COUNT {
            return Err(KiteError::Shape(format!(
                "instrument line {}: expected {FIELD_COUNT} fields, found {}",
                idx + 1,
                row.len()
            )));
        }

        instruments.push(parse_row(&row).map_err(|field| {
            KiteError::Shape(format!("instrument line {}: invalid `{field}`", idx + 1))
        })?);
    }

    Ok(instruments)
}

/// Build an [`Instrument`] from a 12-column row, naming the bad column on error.
fn parse_row(row: &[&str]) -> std::result::Result<Instrument, &'static str> {
    let expiry = match row[5] {
        "" => None,
        raw => Some(NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| "expiry")?),
    };

    Ok(Instrument {
        instrument_token: row[0].parse().map_err(|_| "instrument_token")?,
        exchange_token: row[1].to_owned(),
        tradingsymbol: row[2].to_owned(),
        name: strip_quotes(row[3]).to_owned(),
        last_price: row[4].parse().map_err(|_| "last_price")?,
        expiry,
        strike: row[6].parse().map_err(|_| "strike")?,
        tick_size: row[7].parse().map_err(|_| "tick_size")?,
        lot_size: row[8].parse().map_err(|_| "lot_size")?,
        instrument_type: row[9].to_owned(),
        segment: row[10].to_owned(),
        exchange: row[11].to_owned(),
    })
}

/// Drop exactly one leading and one trailing character.
fn strip_quotes(field: &str) -> &str {
    let mut chars = field.chars();
    chars.next();
    chars.next_back();
    chars.as_str()
}
