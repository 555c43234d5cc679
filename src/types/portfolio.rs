#![allow(missing_docs)]
//! Portfolio types: Positions.

use serde::Deserialize;

/// Net and day-wise positions.
///
/// Returned by `GET /portfolio/positions`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Positions {
    /// Positions carried over plus today's, netted.
    #[serde(default)]
    pub net: Vec<Position>,
    /// Today's positions only.
    #[serde(default)]
    pub day: Vec<Position>,
}

/// A single position.
#[derive(Debug, Clone, Deserialize)]
pub struct Position {
    pub tradingsymbol: String,
    pub exchange: String,
    pub instrument_token: u64,
    pub product: String,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub overnight_quantity: Option<i64>,
    #[serde(default)]
    pub multiplier: Option<f64>,
    #[serde(default)]
    pub average_price: Option<f64>,
    #[serde(default)]
    pub close_price: Option<f64>,
    #[serde(default)]
    pub last_price: Option<f64>,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub pnl: Option<f64>,
    #[serde(default)]
    pub m2m: Option<f64>,
    #[serde(default)]
    pub unrealised: Option<f64>,
    #[serde(default)]
    pub realised: Option<f64>,
    #[serde(default)]
    pub buy_quantity: Option<i64>,
    #[serde(default)]
    pub buy_price: Option<f64>,
    #[serde(default)]
    pub buy_value: Option<f64>,
    #[serde(default)]
    pub sell_quantity: Option<i64>,
    #[serde(default)]
    pub sell_price: Option<f64>,
    #[serde(default)]
    pub sell_value: Option<f64>,
}
