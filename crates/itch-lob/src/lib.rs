//! # itch-lob
//!
//! Price-time priority limit order book for market data reconstruction.
//!
//! This crate provides:
//! - `OrderBook`: two price-ordered sides of FIFO levels with an O(1)
//!   reference index
//! - Typed mutation records (`Execution`, `Cancellation`, `Deletion`,
//!   `Replacement`) for downstream event fanout
//! - Depth-limited `BookSnapshot` captures with optional per-order detail
//!
//! The book applies what the feed dictates and nothing more: it is not a
//! matching engine, and crossed or locked states from a raw feed are kept
//! as-is.
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use itch_core::types::*;
//! use itch_lob::OrderBook;
//!
//! let mut book = OrderBook::new(
//!     StockSymbol::new("AAPL"),
//!     NaiveDate::from_ymd_opt(2026, 1, 2).unwrap(),
//! );
//! book.add(
//!     OrderRef::new(1),
//!     Side::Bid,
//!     Price::from_raw(1_000_000),
//!     Volume::new(500),
//!     Timestamp::from_nanos(1_000),
//!     None,
//! )
//! .unwrap();
//! assert_eq!(book.best_bid().unwrap().0, Price::from_raw(1_000_000));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod book;
pub mod error;
pub mod level;
pub mod snapshot;

pub use book::{Cancellation, Deletion, Execution, OrderBook, Replacement};
pub use error::{BookError, BookResult};
pub use level::{BookOrder, PriceLevel};
pub use snapshot::{BookSnapshot, LevelSnapshot, OrderSnapshot, SnapshotRow};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::book::{Cancellation, Deletion, Execution, OrderBook, Replacement};
    pub use crate::error::{BookError, BookResult};
    pub use crate::level::{BookOrder, PriceLevel};
    pub use crate::snapshot::{BookSnapshot, LevelSnapshot, OrderSnapshot, SnapshotRow};
}
