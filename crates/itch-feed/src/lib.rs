//! # itch-feed
//!
//! NASDAQ TotalView-ITCH 5.0 wire format: decoding, encoding, and filtering.
//!
//! This crate provides:
//! - `ItchMessage`: a tagged model of the 23 ITCH 5.0 record kinds
//! - A byte-exact binary decoder with length-prefixed and tagged framing
//! - A streaming reader over any `std::io::Read` byte source
//! - A symbol-filter passthrough writer that emits replayable subset feeds
//! - A seeded synthetic feed generator for tests and benchmarks
//!
//! ## Example
//!
//! ```rust
//! use itch_feed::decoder::decode_message;
//! use itch_feed::messages::{AddOrder, ItchMessage};
//!
//! let add = ItchMessage::AddOrder(AddOrder {
//!     stock_locate: 1,
//!     tracking_number: 0,
//!     timestamp: 34_200_000_000_000,
//!     order_ref: 42,
//!     buy_sell: b'B',
//!     shares: 100,
//!     stock: *b"AAPL    ",
//!     price: 1_000_000,
//! });
//! let bytes = add.to_bytes();
//! assert_eq!(decode_message(&bytes).unwrap(), add);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod decoder;
pub mod error;
pub mod messages;
pub mod reader;
pub mod synthetic;
pub mod writer;

pub use decoder::{decode_message, Framing};
pub use error::{FeedError, FeedResult};
pub use messages::ItchMessage;
pub use reader::FeedReader;
pub use writer::{FilterWriter, SymbolFilter};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::decoder::{decode_message, Framing};
    pub use crate::error::{FeedError, FeedResult};
    pub use crate::messages::*;
    pub use crate::reader::FeedReader;
    pub use crate::writer::{FilterWriter, SymbolFilter};
}
