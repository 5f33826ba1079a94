//! A single price level and its FIFO order queue.

use std::collections::VecDeque;

use itch_core::types::{Mpid, OrderRef, Price, Timestamp, Volume};
use serde::{Deserialize, Serialize};

/// An order resting on the book.
///
/// Side and price are properties of the level the order sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookOrder {
    /// Venue-assigned reference
    pub reference: OrderRef,
    /// Remaining volume, always positive while the order is live
    pub volume: Volume,
    /// Arrival timestamp
    pub timestamp: Timestamp,
    /// Market participant attribution, when the add carried one
    pub attribution: Option<Mpid>,
}

/// A price level: insertion-ordered queue of orders at one price.
///
/// Queue position is time priority. Partial executions and partial cancels
/// never reorder the queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceLevel {
    price: Price,
    queue: VecDeque<BookOrder>,
}

impl PriceLevel {
    /// Create an empty level at a price
    #[must_use]
    pub fn new(price: Price) -> Self {
        Self {
            price,
            queue: VecDeque::new(),
        }
    }

    /// Price of this level
    #[inline]
    #[must_use]
    pub const fn price(&self) -> Price {
        self.price
    }

    /// Number of orders queued
    #[inline]
    #[must_use]
    pub fn order_count(&self) -> usize {
        self.queue.len()
    }

    /// Whether the level has no orders
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Aggregate volume across the queue
    #[must_use]
    pub fn volume(&self) -> Volume {
        self.queue
            .iter()
            .fold(Volume::ZERO, |acc, o| acc.saturating_add(o.volume))
    }

    /// Append an order at the back of the queue (time priority)
    pub fn push_back(&mut self, order: BookOrder) {
        self.queue.push_back(order);
    }

    /// Queue position of an order, front = highest priority
    #[must_use]
    pub fn position(&self, reference: OrderRef) -> Option<usize> {
        self.queue.iter().position(|o| o.reference == reference)
    }

    /// Order at a queue position
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&BookOrder> {
        self.queue.get(index)
    }

    /// Mutable order at a queue position
    pub fn get_mut(&mut self, index: usize) -> Option<&mut BookOrder> {
        self.queue.get_mut(index)
    }

    /// Order at the front of the queue
    #[must_use]
    pub fn front(&self) -> Option<&BookOrder> {
        self.queue.front()
    }

    /// Remove the order at a queue position.
    ///
    /// Removal at the front is O(1); priority of the others is preserved.
    pub fn remove(&mut self, index: usize) -> Option<BookOrder> {
        self.queue.remove(index)
    }

    /// Iterate orders in priority order
    pub fn orders(&self) -> impl Iterator<Item = &BookOrder> {
        self.queue.iter()
    }
}
