//! # kite-rs
//!
//! A Rust client library for the Zerodha Kite trading API.
//!
//! ## Quick Start
//!
//! ```no_run
//! use kite_rs::auth::EnvToken;
//! use kite_rs::client::KiteClient;
//!
//! #[tokio::main]
//! async fn main() -> kite_rs::error::Result<()> {
//!     let client = KiteClient::connect(&EnvToken::default()).await?;
//!     let profile = client.profile().await?;
//!     println!("logged in as {:?}", profile.user_id);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod retry;
pub mod session;
pub mod types;

/// Re-export the main client type at crate root for convenience.
pub use client::KiteClient;
/// Re-export the configuration types.
pub use config::KiteConfig;
pub use retry::{Backoff, RetryConfig};
/// Re-export the error type and Result alias.
pub use error::{KiteError, Result};
