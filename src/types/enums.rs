//! Shared enum types that map directly to Kite API string values.
//!
//! Variant names use `SCREAMING_SNAKE_CASE` to match the wire format expected
//! by Kite wherever the wire value is a valid identifier, so we suppress the
//! Rust naming convention lint.
#![allow(non_camel_case_types)]

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::KiteError;

/// Implements `as_str`, `Display` and `FromStr` from a variant → wire table.
macro_rules! wire_strings {
    ($ty:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        impl $ty {
            /// The value sent to and received from the API.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = KiteError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok(Self::$variant),)+
                    other => Err(KiteError::InvalidArgument(format!(
                        concat!("unknown ", stringify!($ty), " `{}`"),
                        other
                    ))),
                }
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Exchange
// ---------------------------------------------------------------------------

/// Exchange code, as found in the instrument dump's `exchange` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Exchange {
    /// National Stock Exchange, equity.
    NSE,
    /// Bombay Stock Exchange, equity.
    BSE,
    /// NSE futures & options.
    NFO,
    /// NSE currency derivatives.
    CDS,
    /// BSE futures & options.
    BFO,
    /// Multi Commodity Exchange.
    MCX,
    /// BSE currency derivatives.
    BCD,
    /// NSE commodity derivatives.
    NCO,
}

wire_strings!(Exchange {
    NSE => "NSE",
    BSE => "BSE",
    NFO => "NFO",
    CDS => "CDS",
    BFO => "BFO",
    MCX => "MCX",
    BCD => "BCD",
    NCO => "NCO",
});

// ---------------------------------------------------------------------------
// Transaction Type
// ---------------------------------------------------------------------------

/// Buy or sell side of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    BUY,
    SELL,
}

wire_strings!(TransactionType {
    BUY => "BUY",
    SELL => "SELL",
});

// ---------------------------------------------------------------------------
// Product
// ---------------------------------------------------------------------------

/// Margin / settlement product for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Product {
    /// Margin intraday squareoff.
    MIS,
    /// Cash & carry for equity deliveries.
    CNC,
    /// Normal carry-forward for futures & options.
    NRML,
    /// Cover order.
    CO,
}

wire_strings!(Product {
    MIS => "MIS",
    CNC => "CNC",
    NRML => "NRML",
    CO => "CO",
});

// ---------------------------------------------------------------------------
// Order Type
// ---------------------------------------------------------------------------

/// Type of order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderType {
    MARKET,
    LIMIT,
    /// Stop-loss limit.
    SL,
    /// Stop-loss market.
    #[serde(rename = "SL-M")]
    SL_M,
}

wire_strings!(OrderType {
    MARKET => "MARKET",
    LIMIT => "LIMIT",
    SL => "SL",
    SL_M => "SL-M",
});

// ---------------------------------------------------------------------------
// Variety
// ---------------------------------------------------------------------------

/// Order routing category. Also the path segment of order endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variety {
    REGULAR,
    /// Cover order.
    CO,
    /// After-market order.
    AMO,
}

wire_strings!(Variety {
    REGULAR => "regular",
    CO => "co",
    AMO => "amo",
});

// ---------------------------------------------------------------------------
// Validity
// ---------------------------------------------------------------------------

/// Order validity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Validity {
    /// Valid for the trading day.
    DAY,
    /// Immediate or Cancel.
    IOC,
}

wire_strings!(Validity {
    DAY => "DAY",
    IOC => "IOC",
});

// ---------------------------------------------------------------------------
// Candle Interval
// ---------------------------------------------------------------------------

/// Candle interval for historical data. Also a path segment of the endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval {
    #[serde(rename = "minute")]
    Minute,
    #[serde(rename = "3minute")]
    Minute3,
    #[serde(rename = "5minute")]
    Minute5,
    #[serde(rename = "10minute")]
    Minute10,
    #[serde(rename = "15minute")]
    Minute15,
    #[serde(rename = "30minute")]
    Minute30,
    #[serde(rename = "60minute")]
    Minute60,
    #[serde(rename = "day")]
    Day,
}

impl Interval {
    /// The value sent to the API.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Minute => "minute",
            Self::Minute3 => "3minute",
            Self::Minute5 => "5minute",
            Self::Minute10 => "10minute",
            Self::Minute15 => "15minute",
            Self::Minute30 => "30minute",
            Self::Minute60 => "60minute",
            Self::Day => "day",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts the wire names as well as the `1m`/`5m`/`1h` shorthand.
impl FromStr for Interval {
    type Err = KiteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "minute" | "1m" => Ok(Self::Minute),
            "3minute" | "3m" => Ok(Self::Minute3),
            "5minute" | "5m" => Ok(Self::Minute5),
            "10minute" | "10m" => Ok(Self::Minute10),
            "15minute" | "15m" => Ok(Self::Minute15),
            "30minute" | "30m" => Ok(Self::Minute30),
            "60minute" | "60m" | "1h" => Ok(Self::Minute60),
            "day" | "1d" => Ok(Self::Day),
            other => Err(KiteError::InvalidArgument(format!(
                "unsupported timeframe `{other}`"
            ))),
        }
    }
}
