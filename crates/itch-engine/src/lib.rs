//! # itch-engine
//!
//! Per-symbol market processor and event-handler fanout for limit order
//! book reconstruction.
//!
//! This crate provides:
//! - `MarketProcessor`: a per-symbol, per-day state machine applying
//!   decoded messages to an `itch_lob::OrderBook`
//! - `MarketEventHandler`: the observer trait downstream recorders
//!   implement, with handler dispatch and scheduled snapshots
//! - Example recorders: scheduled snapshots, top-of-book messages,
//!   order-flow imbalance
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use itch_core::types::StockSymbol;
//! use itch_engine::{MarketProcessor, SnapshotRecorder};
//! use itch_feed::synthetic::{SyntheticConfig, SyntheticFeed};
//!
//! let mut feed = SyntheticFeed::new(SyntheticConfig {
//!     stock: *b"AAPL    ",
//!     ..SyntheticConfig::default()
//! });
//! let mut processor = MarketProcessor::new(
//!     StockSymbol::new("AAPL"),
//!     NaiveDate::from_ymd_opt(2026, 1, 2).unwrap(),
//! );
//! processor.register_handler(Box::new(SnapshotRecorder::new()));
//! for message in feed.session(1_000) {
//!     processor.process(&message).unwrap();
//! }
//! let book = processor.finalize();
//! assert!(book.update_count() > 0);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod handlers;
pub mod processor;
pub mod recorders;

pub use handlers::{
    AddEvent, CrossEvent, HandlerDispatch, MarketEventHandler, TradeEvent,
};
pub use processor::{MarketProcessor, ProcessError, ProcessorConfig};
pub use recorders::{
    OfiRecorder, OfiSample, SnapshotRecorder, TopOfBookKind, TopOfBookRecord, TopOfBookRecorder,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::handlers::{
        AddEvent, CrossEvent, HandlerDispatch, MarketEventHandler, TradeEvent,
    };
    pub use crate::processor::{MarketProcessor, ProcessError, ProcessorConfig};
    pub use crate::recorders::{
        OfiRecorder, OfiSample, SnapshotRecorder, TopOfBookKind, TopOfBookRecord,
        TopOfBookRecorder,
    };
}
