//! Depth snapshots of the book.

use itch_core::types::{OrderRef, Price, Side, StockSymbol, Timestamp, Volume};
use serde::{Deserialize, Serialize};

use crate::level::PriceLevel;

/// One order inside a level snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSnapshot {
    /// Order reference
    pub reference: OrderRef,
    /// Remaining volume
    pub volume: Volume,
    /// Arrival timestamp
    pub timestamp: Timestamp,
}

/// One price level inside a book snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSnapshot {
    /// Level price
    pub price: Price,
    /// Aggregate volume
    pub volume: Volume,
    /// Number of queued orders
    pub order_count: usize,
    /// Per-order detail, present when requested
    pub orders: Option<Vec<OrderSnapshot>>,
}

impl LevelSnapshot {
    pub(crate) fn capture(level: &PriceLevel, include_orders: bool) -> Self {
        Self {
            price: level.price(),
            volume: level.volume(),
            order_count: level.order_count(),
            orders: include_orders.then(|| {
                level
                    .orders()
                    .map(|o| OrderSnapshot {
                        reference: o.reference,
                        volume: o.volume,
                        timestamp: o.timestamp,
                    })
                    .collect()
            }),
        }
    }
}

/// A flattened snapshot row for tabular writers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotRow {
    /// Snapshot timestamp
    pub timestamp: Timestamp,
    /// Book side
    pub side: Side,
    /// 1-based level number, best first
    pub level: usize,
    /// Level price
    pub price: Price,
    /// Aggregate level volume
    pub volume: Volume,
    /// Number of queued orders
    pub order_count: usize,
}

/// Point-in-time state of the book, best levels first on both sides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSnapshot {
    /// Symbol the book belongs to
    pub symbol: StockSymbol,
    /// Timestamp the snapshot represents
    pub timestamp: Timestamp,
    /// Bid levels, highest price first
    pub bids: Vec<LevelSnapshot>,
    /// Ask levels, lowest price first
    pub asks: Vec<LevelSnapshot>,
}

impl BookSnapshot {
    /// Best bid level, when one exists
    #[must_use]
    pub fn best_bid(&self) -> Option<&LevelSnapshot> {
        self.bids.first()
    }

    /// Best ask level, when one exists
    #[must_use]
    pub fn best_ask(&self) -> Option<&LevelSnapshot> {
        self.asks.first()
    }

    /// Flatten to per-level rows: asks then bids, best levels first.
    #[must_use]
    pub fn rows(&self) -> Vec<SnapshotRow> {
        let mut rows = Vec::with_capacity(self.asks.len() + self.bids.len());
        for (i, level) in self.asks.iter().enumerate() {
            rows.push(SnapshotRow {
                timestamp: self.timestamp,
                side: Side::Ask,
                level: i + 1,
                price: level.price,
                volume: level.volume,
                order_count: level.order_count,
            });
        }
        for (i, level) in self.bids.iter().enumerate() {
            rows.push(SnapshotRow {
                timestamp: self.timestamp,
                side: Side::Bid,
                level: i + 1,
                price: level.price,
                volume: level.volume,
                order_count: level.order_count,
            });
        }
        rows
    }
}
