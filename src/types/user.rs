#![allow(missing_docs)]
//! User types: Profile and Margins.

use std::collections::HashMap;

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

/// The logged-in user's profile.
///
/// Returned by `GET /user/profile`.
#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    pub user_id: Option<String>,
    pub user_name: Option<String>,
    pub user_shortname: Option<String>,
    pub user_type: Option<String>,
    pub email: Option<String>,
    pub broker: Option<String>,
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub exchanges: Vec<String>,
    #[serde(default)]
    pub products: Vec<String>,
    #[serde(default)]
    pub order_types: Vec<String>,
}

// ---------------------------------------------------------------------------
// Margins
// ---------------------------------------------------------------------------

/// Funds and margin usage per segment.
///
/// Returned by `GET /user/margins`.
#[derive(Debug, Clone, Deserialize)]
pub struct Margins {
    pub equity: Option<SegmentMargin>,
    pub commodity: Option<SegmentMargin>,
}

/// Margin summary for one segment.
#[derive(Debug, Clone, Deserialize)]
pub struct SegmentMargin {
    #[serde(default)]
    pub enabled: bool,
    /// Net cash balance available for trading.
    #[serde(default)]
    pub net: f64,
    pub available: Option<AvailableMargin>,
    /// Utilised amounts by component (`debits`, `exposure`, `span`, `m2m_realised`, ...).
    #[serde(default)]
    pub utilised: HashMap<String, f64>,
}

/// Funds available in a segment.
#[derive(Debug, Clone, Deserialize)]
pub struct AvailableMargin {
    #[serde(default)]
    pub adhoc_margin: f64,
    #[serde(default)]
    pub cash: f64,
    #[serde(default)]
    pub opening_balance: f64,
    #[serde(default)]
    pub live_balance: f64,
    #[serde(default)]
    pub collateral: f64,
    #[serde(default)]
    pub intraday_payin: f64,
}
