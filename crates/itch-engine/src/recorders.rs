//! Example recorders built on the handler trait.
//!
//! These cover the common downstream uses: collecting scheduled snapshots,
//! recording messages that move the top of the book, and the Cont et al.
//! (2013, eq. 10) order-flow imbalance over best-level changes, extended to
//! hidden trades.

use itch_core::types::{OrderRef, Price, Side, Timestamp, TradingStatus, Volume};
use itch_feed::messages::ItchMessage;
use itch_lob::{
    BookSnapshot, Cancellation, Deletion, Execution, OrderBook, Replacement,
};
use serde::{Deserialize, Serialize};

use crate::handlers::{AddEvent, MarketEventHandler, TradeEvent};

/// Collects scheduled snapshots, optionally depth-trimmed.
#[derive(Default)]
pub struct SnapshotRecorder {
    max_depth: Option<usize>,
    snapshots: Vec<BookSnapshot>,
}

impl SnapshotRecorder {
    /// Create a recorder keeping full depth
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a recorder trimming each snapshot to `max_depth` levels
    #[must_use]
    pub fn with_depth(max_depth: usize) -> Self {
        Self {
            max_depth: Some(max_depth),
            snapshots: Vec::new(),
        }
    }

    /// Snapshots collected so far
    #[must_use]
    pub fn snapshots(&self) -> &[BookSnapshot] {
        &self.snapshots
    }

    /// Consume the recorder, returning the snapshots
    #[must_use]
    pub fn into_snapshots(self) -> Vec<BookSnapshot> {
        self.snapshots
    }
}

impl MarketEventHandler for SnapshotRecorder {
    fn on_snapshot(&mut self, snapshot: &BookSnapshot) {
        let mut snapshot = snapshot.clone();
        if let Some(depth) = self.max_depth {
            snapshot.bids.truncate(depth);
            snapshot.asks.truncate(depth);
        }
        self.snapshots.push(snapshot);
    }
}

/// Kind of a top-of-book message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TopOfBookKind {
    /// An add at or inside the current best price
    Add,
    /// An execution against displayed liquidity
    Execute,
    /// A hidden execution (trade print with no visible reference)
    HiddenExecute,
}

/// One recorded top-of-book message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopOfBookRecord {
    /// Message timestamp
    pub timestamp: Timestamp,
    /// What moved the top
    pub kind: TopOfBookKind,
    /// Affected side
    pub side: Side,
    /// Price of the event
    pub price: Price,
    /// Volume of the event
    pub volume: Volume,
    /// Order reference, absent for hidden executions
    pub reference: Option<OrderRef>,
}

/// Records messages that affect the best bid or ask.
///
/// Adds are recorded when they price at or inside the current best level;
/// executions against displayed orders always touch the top by price
/// priority; hidden trade prints are recorded at their print price.
#[derive(Default)]
pub struct TopOfBookRecorder {
    records: Vec<TopOfBookRecord>,
}

impl TopOfBookRecorder {
    /// Create an empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records collected so far
    #[must_use]
    pub fn records(&self) -> &[TopOfBookRecord] {
        &self.records
    }

    /// Consume the recorder, returning the records
    #[must_use]
    pub fn into_records(self) -> Vec<TopOfBookRecord> {
        self.records
    }

    fn add_touches_top(book: &OrderBook, side: Side, price: Price) -> bool {
        match book.top(side) {
            None => true,
            Some((best, _, _)) => match side {
                Side::Bid => price >= best,
                Side::Ask => price <= best,
            },
        }
    }
}

impl MarketEventHandler for TopOfBookRecorder {
    fn on_message(&mut self, book: &OrderBook, _status: TradingStatus, message: &ItchMessage) {
        // The book has not applied this message yet, so comparisons run
        // against the pre-message top
        match message {
            ItchMessage::AddOrder(m) if m.stock == *book.symbol().as_bytes() => {
                if let Some(side) = m.side() {
                    let price = Price::from_raw(m.price);
                    if Self::add_touches_top(book, side, price) {
                        self.records.push(TopOfBookRecord {
                            timestamp: message.timestamp(),
                            kind: TopOfBookKind::Add,
                            side,
                            price,
                            volume: Volume::new(m.shares),
                            reference: Some(OrderRef::new(m.order_ref)),
                        });
                    }
                }
            }
            ItchMessage::AddOrderMpid(m) if m.stock == *book.symbol().as_bytes() => {
                if let Some(side) = m.side() {
                    let price = Price::from_raw(m.price);
                    if Self::add_touches_top(book, side, price) {
                        self.records.push(TopOfBookRecord {
                            timestamp: message.timestamp(),
                            kind: TopOfBookKind::Add,
                            side,
                            price,
                            volume: Volume::new(m.shares),
                            reference: Some(OrderRef::new(m.order_ref)),
                        });
                    }
                }
            }
            _ => {}
        }
    }

    fn on_execute(&mut self, _book: &OrderBook, timestamp: Timestamp, execution: &Execution) {
        // Price priority puts every displayed execution at the top
        self.records.push(TopOfBookRecord {
            timestamp,
            kind: TopOfBookKind::Execute,
            side: execution.side,
            price: execution.print_price.unwrap_or(execution.price),
            volume: execution.executed,
            reference: Some(execution.reference),
        });
    }

    fn on_trade(&mut self, _book: &OrderBook, event: &TradeEvent) {
        if let Some(side) = event.side {
            self.records.push(TopOfBookRecord {
                timestamp: event.timestamp,
                kind: TopOfBookKind::HiddenExecute,
                side,
                price: event.price,
                volume: event.volume,
                reference: None,
            });
        }
    }
}

/// One order-flow imbalance sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfiSample {
    /// Sample timestamp
    pub timestamp: Timestamp,
    /// Imbalance contribution `e_n`, positive for buy pressure
    pub e_n: i64,
}

/// Order-flow imbalance recorder.
///
/// Samples the best levels after every book event and accumulates the
/// per-event contribution of Cont et al. (2013), eq. 10. Hidden trades
/// contribute their signed volume directly, since the displayed book does
/// not move for them.
#[derive(Default)]
pub struct OfiRecorder {
    previous_bid: Option<(Price, Volume)>,
    previous_ask: Option<(Price, Volume)>,
    samples: Vec<OfiSample>,
}

impl OfiRecorder {
    /// Create an empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Samples collected so far
    #[must_use]
    pub fn samples(&self) -> &[OfiSample] {
        &self.samples
    }

    /// Sum of all contributions
    #[must_use]
    pub fn total(&self) -> i64 {
        self.samples.iter().map(|s| s.e_n).sum()
    }

    fn sample(&mut self, book: &OrderBook, timestamp: Timestamp) {
        let bid = book.best_bid();
        let ask = book.best_ask();

        let mut e_n = 0i64;
        match (bid, self.previous_bid) {
            (Some((price, volume)), Some((prev_price, prev_volume))) => {
                if price >= prev_price {
                    e_n += volume.as_i64();
                }
                if price <= prev_price {
                    e_n -= prev_volume.as_i64();
                }
            }
            (Some((_, volume)), None) => e_n += volume.as_i64(),
            (None, Some((_, prev_volume))) => e_n -= prev_volume.as_i64(),
            (None, None) => {}
        }
        match (ask, self.previous_ask) {
            (Some((price, volume)), Some((prev_price, prev_volume))) => {
                if price <= prev_price {
                    e_n -= volume.as_i64();
                }
                if price >= prev_price {
                    e_n += prev_volume.as_i64();
                }
            }
            (Some((_, volume)), None) => e_n -= volume.as_i64(),
            (None, Some((_, prev_volume))) => e_n += prev_volume.as_i64(),
            (None, None) => {}
        }

        self.previous_bid = bid;
        self.previous_ask = ask;
        self.samples.push(OfiSample { timestamp, e_n });
    }
}

impl MarketEventHandler for OfiRecorder {
    fn on_add(&mut self, book: &OrderBook, event: &AddEvent) {
        self.sample(book, event.timestamp);
    }

    fn on_execute(&mut self, book: &OrderBook, timestamp: Timestamp, _execution: &Execution) {
        self.sample(book, timestamp);
    }

    fn on_cancel(&mut self, book: &OrderBook, timestamp: Timestamp, _cancellation: &Cancellation) {
        self.sample(book, timestamp);
    }

    fn on_delete(&mut self, book: &OrderBook, timestamp: Timestamp, _deletion: &Deletion) {
        self.sample(book, timestamp);
    }

    fn on_replace(&mut self, book: &OrderBook, timestamp: Timestamp, _replacement: &Replacement) {
        self.sample(book, timestamp);
    }

    fn on_trade(&mut self, _book: &OrderBook, event: &TradeEvent) {
        // Hidden liquidity: the displayed book is unchanged, the signed
        // trade volume is the whole contribution
        let e_n = match event.side {
            Some(Side::Bid) => -event.volume.as_i64(),
            Some(Side::Ask) => event.volume.as_i64(),
            None => 0,
        };
        self.samples.push(OfiSample {
            timestamp: event.timestamp,
            e_n,
        });
    }
}
