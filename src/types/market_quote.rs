#![allow(missing_docs)]
//! Market Quote types: full quote snapshots.

use std::collections::HashMap;

use serde::Deserialize;

/// Quotes keyed by the requested instrument identifier (e.g. `NSE:INFY`).
pub type QuoteMap = HashMap<String, Quote>;

/// OHLC values.
#[derive(Debug, Clone, Deserialize)]
pub struct Ohlc {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// A single level of market depth.
#[derive(Debug, Clone, Deserialize)]
pub struct DepthLevel {
    pub price: f64,
    pub quantity: i64,
    pub orders: i64,
}

/// Buy and sell depth.
#[derive(Debug, Clone, Deserialize)]
pub struct Depth {
    #[serde(default)]
    pub buy: Vec<DepthLevel>,
    #[serde(default)]
    pub sell: Vec<DepthLevel>,
}

/// Full quote for a single instrument.
#[derive(Debug, Clone, Deserialize)]
pub struct Quote {
    pub instrument_token: u64,
    pub last_price: f64,
    pub timestamp: Option<String>,
    pub last_trade_time: Option<String>,
    #[serde(default)]
    pub last_quantity: Option<i64>,
    #[serde(default)]
    pub average_price: Option<f64>,
    #[serde(default)]
    pub volume: Option<i64>,
    #[serde(default)]
    pub buy_quantity: Option<i64>,
    #[serde(default)]
    pub sell_quantity: Option<i64>,
    pub ohlc: Option<Ohlc>,
    #[serde(default)]
    pub net_change: Option<f64>,
    #[serde(default)]
    pub oi: Option<f64>,
    #[serde(default)]
    pub oi_day_high: Option<f64>,
    #[serde(default)]
    pub oi_day_low: Option<f64>,
    #[serde(default)]
    pub lower_circuit_limit: Option<f64>,
    #[serde(default)]
    pub upper_circuit_limit: Option<f64>,
    pub depth: Option<Depth>,
}
