//! Request and response types for the Kite API.
//!
//! ## Organization
//!
//! - [`enums`]: Shared enumerations (exchange, product, order type, variety, ...)
//! - [`instruments`]: Instrument dump records and the CSV parser
//! - [`historical`]: Candle request, row classification and records
//! - [`market_quote`]: Full quote snapshots
//! - [`orders`]: Place / modify / cancel bodies, order ids, order book rows
//! - [`portfolio`]: Net and day positions
//! - [`user`]: Profile and margins
//!
//! All enums are re-exported at the module root via `pub use enums::*`.

pub mod enums;
pub mod historical;
pub mod instruments;
pub mod market_quote;
pub mod orders;
pub mod portfolio;
pub mod user;

pub use enums::*;
