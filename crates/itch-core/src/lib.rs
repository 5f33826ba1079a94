//! # itch-core
//!
//! Core domain types for the itchlob limit order book toolkit.
//!
//! This crate provides:
//! - Fixed-point market data types: `Price`, `Volume`, `Timestamp`
//! - Venue identifiers: `OrderRef`, `MatchNumber`, `StockSymbol`, `Mpid`
//! - Market state types: `Side`, `TradingStatus`
//! - Zero-copy serialization support via `rkyv`
//!
//! ## Example
//!
//! ```rust
//! use itch_core::types::{Price, Side, StockSymbol, Timestamp, Volume};
//!
//! let price = Price::from_raw(1_000_000); // $100.0000
//! let volume = Volume::new(500);
//! let side = Side::Bid;
//! let symbol = StockSymbol::new("AAPL");
//! let ts = Timestamp::from_nanos(34_200_000_000_000); // 09:30:00
//! assert_eq!(price.as_f64(), 100.0);
//! assert_eq!(symbol.trimmed(), "AAPL");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod constants;
pub mod types;

pub use constants::*;
pub use types::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::constants::*;
    pub use crate::types::*;
}
