//! Two-sided price-time priority limit order book.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use itch_core::types::{
    MatchNumber, Mpid, OrderRef, Price, Side, StockSymbol, Timestamp, Volume,
};
use serde::{Deserialize, Serialize};

use crate::error::{BookError, BookResult};
use crate::level::{BookOrder, PriceLevel};
use crate::snapshot::{BookSnapshot, LevelSnapshot};

/// Applied execution, returned by [`OrderBook::execute`] and
/// [`OrderBook::execute_with_price`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Execution {
    /// Executed order reference
    pub reference: OrderRef,
    /// Side the order rested on
    pub side: Side,
    /// Resting price of the order
    pub price: Price,
    /// Executed volume
    pub executed: Volume,
    /// Volume remaining after the execution
    pub remaining: Volume,
    /// Match number of the print
    pub match_number: MatchNumber,
    /// Print price when it differs from the resting price (tag `C`)
    pub print_price: Option<Price>,
    /// Whether the print is eligible for the tape (`false` only for
    /// non-printable executions with price)
    pub printable: bool,
    /// Whether the order left the book
    pub removed: bool,
}

/// Applied partial or full cancel, returned by [`OrderBook::cancel`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cancellation {
    /// Cancelled order reference
    pub reference: OrderRef,
    /// Side the order rests on
    pub side: Side,
    /// Resting price
    pub price: Price,
    /// Cancelled volume
    pub canceled: Volume,
    /// Volume remaining after the cancel
    pub remaining: Volume,
    /// Whether the order left the book
    pub removed: bool,
}

/// Applied delete, returned by [`OrderBook::delete`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deletion {
    /// Deleted order reference
    pub reference: OrderRef,
    /// Side the order rested on
    pub side: Side,
    /// Resting price
    pub price: Price,
    /// Volume outstanding at deletion
    pub volume: Volume,
    /// Arrival timestamp of the deleted order
    pub timestamp: Timestamp,
    /// Attribution of the deleted order
    pub attribution: Option<Mpid>,
}

/// Applied replace, returned by [`OrderBook::replace`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
    /// Retired order reference
    pub original: OrderRef,
    /// New order reference
    pub new: OrderRef,
    /// Side, inherited from the original order
    pub side: Side,
    /// New price
    pub price: Price,
    /// New volume
    pub volume: Volume,
    /// Timestamp of the replacement (queue priority is lost)
    pub timestamp: Timestamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct OrderLocator {
    side: Side,
    price: Price,
}

/// A per-symbol, per-day limit order book.
///
/// Both sides are price-ordered maps of FIFO levels; an order index maps
/// live references to their level in O(1). Crossed and locked states are
/// representable: raw feeds produce them transiently and the book never
/// rejects on that basis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderBook {
    symbol: StockSymbol,
    book_date: NaiveDate,
    /// Bid levels, iterated best-first via `.rev()`
    bids: BTreeMap<Price, PriceLevel>,
    /// Ask levels, iterated best-first in natural order
    asks: BTreeMap<Price, PriceLevel>,
    index: HashMap<OrderRef, OrderLocator>,
    update_count: u64,
}

impl OrderBook {
    /// Create an empty book for a symbol and trading date
    #[must_use]
    pub fn new(symbol: StockSymbol, book_date: NaiveDate) -> Self {
        Self {
            symbol,
            book_date,
            bids: BTreeMap::new(),
            asks: BTreeMap::new(),
            index: HashMap::new(),
            update_count: 0,
        }
    }

    /// Symbol this book belongs to
    #[must_use]
    pub const fn symbol(&self) -> StockSymbol {
        self.symbol
    }

    /// Trading date this book belongs to
    #[must_use]
    pub const fn book_date(&self) -> NaiveDate {
        self.book_date
    }

    /// Number of applied mutations
    #[must_use]
    pub const fn update_count(&self) -> u64 {
        self.update_count
    }

    fn side_levels(&self, side: Side) -> &BTreeMap<Price, PriceLevel> {
        match side {
            Side::Bid => &self.bids,
            Side::Ask => &self.asks,
        }
    }

    fn side_levels_mut(&mut self, side: Side) -> &mut BTreeMap<Price, PriceLevel> {
        match side {
            Side::Bid => &mut self.bids,
            Side::Ask => &mut self.asks,
        }
    }

    /// Whether a reference is live on the book
    #[must_use]
    pub fn contains(&self, reference: OrderRef) -> bool {
        self.index.contains_key(&reference)
    }

    /// Side and resting price of a live order
    #[must_use]
    pub fn locate(&self, reference: OrderRef) -> Option<(Side, Price)> {
        self.index.get(&reference).map(|l| (l.side, l.price))
    }

    /// Number of live orders
    #[must_use]
    pub fn order_count(&self) -> usize {
        self.index.len()
    }

    /// Whether both sides are empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Enter a new order at its price level, at the back of the queue.
    ///
    /// # Errors
    ///
    /// `DuplicateRef` when the reference is already live.
    pub fn add(
        &mut self,
        reference: OrderRef,
        side: Side,
        price: Price,
        volume: Volume,
        timestamp: Timestamp,
        attribution: Option<Mpid>,
    ) -> BookResult<()> {
        if self.index.contains_key(&reference) {
            return Err(BookError::DuplicateRef(reference));
        }
        self.side_levels_mut(side)
            .entry(price)
            .or_insert_with(|| PriceLevel::new(price))
            .push_back(BookOrder {
                reference,
                volume,
                timestamp,
                attribution,
            });
        self.index.insert(reference, OrderLocator { side, price });
        self.update_count += 1;
        Ok(())
    }

    // Decrement a live order, removing it (and its level, and its index
    // entry) when it reaches zero. Checks run before any mutation.
    fn reduce(
        &mut self,
        reference: OrderRef,
        shares: Volume,
        over_error: fn(OrderRef, Volume, Volume) -> BookError,
    ) -> BookResult<(Side, Price, Volume, bool)> {
        let locator = *self
            .index
            .get(&reference)
            .ok_or(BookError::UnknownRef(reference))?;
        let level = self
            .side_levels_mut(locator.side)
            .get_mut(&locator.price)
            .ok_or(BookError::Inconsistent("indexed level missing"))?;
        let position = level
            .position(reference)
            .ok_or(BookError::Inconsistent("indexed order missing from level"))?;
        let remaining = level
            .get(position)
            .ok_or(BookError::Inconsistent("queue position vanished"))?
            .volume;

        let Some(left) = remaining.checked_sub(shares) else {
            return Err(over_error(reference, shares, remaining));
        };

        let removed = left.is_zero();
        if removed {
            let _ = level.remove(position);
            if level.is_empty() {
                self.side_levels_mut(locator.side).remove(&locator.price);
            }
            self.index.remove(&reference);
        } else {
            let order = level
                .get_mut(position)
                .ok_or(BookError::Inconsistent("queue position vanished"))?;
            order.volume = left;
        }
        self.update_count += 1;
        Ok((locator.side, locator.price, left, removed))
    }

    /// Execute shares against a live order at its resting price.
    ///
    /// # Errors
    ///
    /// `UnknownRef` for a reference not on the book, `OverExecuted` when the
    /// execution exceeds the remaining volume.
    pub fn execute(
        &mut self,
        reference: OrderRef,
        shares: Volume,
        match_number: MatchNumber,
    ) -> BookResult<Execution> {
        let (side, price, remaining, removed) =
            self.reduce(reference, shares, |reference, requested, remaining| {
                BookError::OverExecuted {
                    reference,
                    requested,
                    remaining,
                }
            })?;
        Ok(Execution {
            reference,
            side,
            price,
            executed: shares,
            remaining,
            match_number,
            print_price: None,
            printable: true,
            removed,
        })
    }

    /// Execute shares against a live order at an explicit print price.
    ///
    /// The print price is recorded on the returned execution; the resting
    /// order's price never changes.
    ///
    /// # Errors
    ///
    /// As [`OrderBook::execute`].
    pub fn execute_with_price(
        &mut self,
        reference: OrderRef,
        shares: Volume,
        printable: bool,
        price: Price,
        match_number: MatchNumber,
    ) -> BookResult<Execution> {
        let (side, resting_price, remaining, removed) =
            self.reduce(reference, shares, |reference, requested, remaining| {
                BookError::OverExecuted {
                    reference,
                    requested,
                    remaining,
                }
            })?;
        Ok(Execution {
            reference,
            side,
            price: resting_price,
            executed: shares,
            remaining,
            match_number,
            print_price: Some(price),
            printable,
            removed,
        })
    }

    /// Cancel shares off a live order, removing it only at zero remaining.
    ///
    /// # Errors
    ///
    /// `UnknownRef` for a reference not on the book, `OverCancelled` when
    /// the cancel exceeds the remaining volume.
    pub fn cancel(&mut self, reference: OrderRef, shares: Volume) -> BookResult<Cancellation> {
        let (side, price, remaining, removed) =
            self.reduce(reference, shares, |reference, requested, remaining| {
                BookError::OverCancelled {
                    reference,
                    requested,
                    remaining,
                }
            })?;
        Ok(Cancellation {
            reference,
            side,
            price,
            canceled: shares,
            remaining,
            removed,
        })
    }

    /// Remove a live order entirely, regardless of remaining volume.
    ///
    /// # Errors
    ///
    /// `UnknownRef` for a reference not on the book.
    pub fn delete(&mut self, reference: OrderRef) -> BookResult<Deletion> {
        let locator = *self
            .index
            .get(&reference)
            .ok_or(BookError::UnknownRef(reference))?;
        let level = self
            .side_levels_mut(locator.side)
            .get_mut(&locator.price)
            .ok_or(BookError::Inconsistent("indexed level missing"))?;
        let position = level
            .position(reference)
            .ok_or(BookError::Inconsistent("indexed order missing from level"))?;
        let order = level
            .remove(position)
            .ok_or(BookError::Inconsistent("queue position vanished"))?;
        if level.is_empty() {
            self.side_levels_mut(locator.side).remove(&locator.price);
        }
        self.index.remove(&reference);
        self.update_count += 1;
        Ok(Deletion {
            reference,
            side: locator.side,
            price: locator.price,
            volume: order.volume,
            timestamp: order.timestamp,
            attribution: order.attribution,
        })
    }

    /// Atomically replace a live order with a new reference, price, and
    /// volume on the same side.
    ///
    /// The replacement joins the back of its new level with the replace
    /// message's timestamp: queue priority is lost, consistent with venue
    /// semantics. Attribution carries over from the original order.
    ///
    /// # Errors
    ///
    /// `UnknownRef` when the original is not live, `DuplicateRef` when the
    /// new reference already is. Neither leaves a partial mutation.
    pub fn replace(
        &mut self,
        original: OrderRef,
        new: OrderRef,
        volume: Volume,
        price: Price,
        timestamp: Timestamp,
    ) -> BookResult<Replacement> {
        if !self.index.contains_key(&original) {
            return Err(BookError::UnknownRef(original));
        }
        if new != original && self.index.contains_key(&new) {
            return Err(BookError::DuplicateRef(new));
        }
        let deleted = self.delete(original)?;
        self.add(new, deleted.side, price, volume, timestamp, deleted.attribution)?;
        Ok(Replacement {
            original,
            new,
            side: deleted.side,
            price,
            volume,
            timestamp,
        })
    }

    /// Best level of a side: price, aggregate volume, order count
    #[must_use]
    pub fn top(&self, side: Side) -> Option<(Price, Volume, usize)> {
        let level = match side {
            Side::Bid => self.bids.values().next_back(),
            Side::Ask => self.asks.values().next(),
        }?;
        Some((level.price(), level.volume(), level.order_count()))
    }

    /// Best bid price and volume
    #[must_use]
    pub fn best_bid(&self) -> Option<(Price, Volume)> {
        self.top(Side::Bid).map(|(p, v, _)| (p, v))
    }

    /// Best ask price and volume
    #[must_use]
    pub fn best_ask(&self) -> Option<(Price, Volume)> {
        self.top(Side::Ask).map(|(p, v, _)| (p, v))
    }

    /// Mid price, when both sides are populated
    #[must_use]
    pub fn mid_price(&self) -> Option<f64> {
        match (self.best_bid(), self.best_ask()) {
            (Some((bid, _)), Some((ask, _))) => Some((bid.as_f64() + ask.as_f64()) / 2.0),
            _ => None,
        }
    }

    /// Bid-ask spread in raw price units; negative for crossed books
    #[must_use]
    pub fn spread(&self) -> Option<i64> {
        match (self.best_bid(), self.best_ask()) {
            (Some((bid, _)), Some((ask, _))) => {
                Some(i64::from(ask.raw()) - i64::from(bid.raw()))
            }
            _ => None,
        }
    }

    /// Whether the best bid meets or exceeds the best ask
    #[must_use]
    pub fn is_crossed(&self) -> bool {
        matches!(self.spread(), Some(s) if s <= 0)
    }

    /// Number of price levels on a side
    #[must_use]
    pub fn depth(&self, side: Side) -> usize {
        self.side_levels(side).len()
    }

    /// Aggregate volume over the best `levels` levels of a side
    #[must_use]
    pub fn volume_at(&self, side: Side, levels: usize) -> Volume {
        let fold = |acc: Volume, l: &PriceLevel| acc.saturating_add(l.volume());
        match side {
            Side::Bid => self.bids.values().rev().take(levels).fold(Volume::ZERO, fold),
            Side::Ask => self.asks.values().take(levels).fold(Volume::ZERO, fold),
        }
    }

    /// Bid levels, best (highest price) first
    pub fn bid_levels(&self) -> impl Iterator<Item = &PriceLevel> {
        self.bids.values().rev()
    }

    /// Ask levels, best (lowest price) first
    pub fn ask_levels(&self) -> impl Iterator<Item = &PriceLevel> {
        self.asks.values()
    }

    /// Capture a snapshot of up to `max_depth` levels per side.
    ///
    /// `at` stamps the snapshot; scheduled snapshots are stamped with their
    /// scheduled time rather than the clock of the triggering message.
    #[must_use]
    pub fn snapshot(
        &self,
        at: Timestamp,
        max_depth: Option<usize>,
        include_orders: bool,
    ) -> BookSnapshot {
        let depth = max_depth.unwrap_or(usize::MAX);
        BookSnapshot {
            symbol: self.symbol,
            timestamp: at,
            bids: self
                .bid_levels()
                .take(depth)
                .map(|l| LevelSnapshot::capture(l, include_orders))
                .collect(),
            asks: self
                .ask_levels()
                .take(depth)
                .map(|l| LevelSnapshot::capture(l, include_orders))
                .collect(),
        }
    }

    /// Verify the internal invariants: every indexed order exists exactly
    /// once at its stated level, every resting volume is positive, and no
    /// level is empty.
    ///
    /// # Errors
    ///
    /// `Inconsistent` describing the first violation found.
    pub fn check_consistency(&self) -> BookResult<()> {
        let mut seen = 0usize;
        for (side, levels) in [(Side::Bid, &self.bids), (Side::Ask, &self.asks)] {
            for (price, level) in levels {
                if level.is_empty() {
                    return Err(BookError::Inconsistent("empty level retained"));
                }
                if level.price() != *price {
                    return Err(BookError::Inconsistent("level keyed under wrong price"));
                }
                for order in level.orders() {
                    if order.volume.is_zero() {
                        return Err(BookError::Inconsistent("zero-volume resting order"));
                    }
                    match self.index.get(&order.reference) {
                        Some(locator) if locator.side == side && locator.price == *price => {}
                        Some(_) => {
                            return Err(BookError::Inconsistent("index points at wrong level"))
                        }
                        None => return Err(BookError::Inconsistent("resting order not indexed")),
                    }
                    seen += 1;
                }
            }
        }
        if seen != self.index.len() {
            return Err(BookError::Inconsistent("index size disagrees with levels"));
        }
        Ok(())
    }
}
