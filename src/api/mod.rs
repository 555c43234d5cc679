//! REST API endpoint implementations.
//!
//! Each sub-module adds high-level `async` methods to
//! [`KiteClient`](crate::client::KiteClient) via `impl` blocks. All methods
//! handle parameter encoding, HTTP transport, `data` unwrapping, and error
//! mapping automatically.
//!
//! ## Usage
//!
//! ```no_run
//! use kite_rs::KiteClient;
//!
//! # #[tokio::main]
//! # async fn main() -> kite_rs::Result<()> {
//! let client = KiteClient::new("enctoken")?;
//! let orders = client.orders().await?;
//! let positions = client.positions().await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! | Module | Endpoints | Description |
//! |---|---|---|
//! | [`instruments`] | 1 | Bulk instrument dump (CSV) |
//! | [`historical`] | 1 | Historical candles |
//! | [`market_quote`] | 1 | Full quotes |
//! | [`user`] | 2 | Profile, margins, token check |
//! | [`orders`] | 4 | Order book, place, modify, cancel |
//! | [`portfolio`] | 1 | Positions |

pub mod historical;
pub mod instruments;
pub mod market_quote;
pub mod orders;
pub mod portfolio;
pub mod user;
