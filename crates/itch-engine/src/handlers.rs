//! Event-handler trait and fanout dispatch.
//!
//! Handlers run synchronously on the processor's call stack, in registration
//! order. Every trait method defaults to a no-op so recorders implement only
//! what they observe. Book references handed to handlers are pre-captured
//! views of the live book; handlers never mutate it.

use itch_core::types::{
    MatchNumber, Mpid, OrderRef, Price, Side, Timestamp, TradingStatus, Volume,
};
use itch_feed::messages::ItchMessage;
use itch_lob::{
    BookError, BookSnapshot, Cancellation, Deletion, Execution, OrderBook, Replacement,
};
use serde::{Deserialize, Serialize};

/// A new order entering the book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddEvent {
    /// Event timestamp
    pub timestamp: Timestamp,
    /// Order reference
    pub reference: OrderRef,
    /// Book side
    pub side: Side,
    /// Limit price
    pub price: Price,
    /// Displayed volume
    pub volume: Volume,
    /// Attribution, when the add carried one
    pub attribution: Option<Mpid>,
}

/// A trade print with no book effect (tag `P`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeEvent {
    /// Event timestamp
    pub timestamp: Timestamp,
    /// Resting order reference; zero when fully hidden
    pub reference: OrderRef,
    /// Side of the resting order, when the indicator is valid
    pub side: Option<Side>,
    /// Traded volume
    pub volume: Volume,
    /// Print price
    pub price: Price,
    /// Match number
    pub match_number: MatchNumber,
}

impl TradeEvent {
    /// Whether the resting liquidity was hidden
    #[must_use]
    pub const fn is_hidden(&self) -> bool {
        self.reference.value() == 0
    }
}

/// An auction cross print (tag `Q`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossEvent {
    /// Event timestamp
    pub timestamp: Timestamp,
    /// Shares matched in the cross
    pub shares: u64,
    /// Cross price
    pub price: Price,
    /// Match number
    pub match_number: MatchNumber,
    /// Cross type code
    pub cross_type: u8,
}

/// Observer of processor events.
///
/// All methods default to no-ops. `active_during` restricts delivery of
/// book events and snapshots by trading status; raw messages, clock ticks,
/// status changes, and errors are always delivered.
#[allow(unused_variables)]
pub trait MarketEventHandler {
    /// Restrict book-event recording to certain trading statuses
    fn active_during(&self, status: TradingStatus) -> bool {
        true
    }

    /// Every decoded message, before any mutation it dictates
    fn on_message(&mut self, book: &OrderBook, status: TradingStatus, message: &ItchMessage) {}

    /// An order entered the book
    fn on_add(&mut self, book: &OrderBook, event: &AddEvent) {}

    /// A resting order executed (tags `E` and `C`)
    fn on_execute(&mut self, book: &OrderBook, timestamp: Timestamp, execution: &Execution) {}

    /// A resting order was partially cancelled
    fn on_cancel(&mut self, book: &OrderBook, timestamp: Timestamp, cancellation: &Cancellation) {}

    /// A resting order left the book
    fn on_delete(&mut self, book: &OrderBook, timestamp: Timestamp, deletion: &Deletion) {}

    /// A resting order was replaced
    fn on_replace(&mut self, book: &OrderBook, timestamp: Timestamp, replacement: &Replacement) {}

    /// A non-displayed trade printed; the book did not change
    fn on_trade(&mut self, book: &OrderBook, event: &TradeEvent) {}

    /// An auction cross printed; the book did not change
    fn on_cross(&mut self, book: &OrderBook, event: &CrossEvent) {}

    /// The resolved trading status changed
    fn on_status_change(&mut self, timestamp: Timestamp, old: TradingStatus, new: TradingStatus) {}

    /// A message advanced the processor clock
    fn on_tick(&mut self, timestamp: Timestamp) {}

    /// A tolerated book error; the mutation was rejected
    fn on_error(&mut self, timestamp: Timestamp, error: &BookError) {}

    /// An order-keyed message referenced an order the book has never seen
    fn on_stale_reference(&mut self, timestamp: Timestamp, reference: OrderRef) {}

    /// A scheduled snapshot fired; `snapshot.timestamp` is the scheduled
    /// time, not the clock of the triggering message
    fn on_snapshot(&mut self, snapshot: &BookSnapshot) {}

    /// Processing finished; last chance to flush
    fn on_finalize(&mut self, book: &OrderBook) {}
}

struct HandlerEntry {
    handler: Box<dyn MarketEventHandler>,
    /// Scheduled snapshot timestamps, sorted ascending
    schedule: Vec<Timestamp>,
    cursor: usize,
}

/// Ordered handler list with per-handler snapshot schedules.
#[derive(Default)]
pub struct HandlerDispatch {
    entries: Vec<HandlerEntry>,
}

impl HandlerDispatch {
    /// Create an empty dispatch
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler with no snapshot schedule
    pub fn register(&mut self, handler: Box<dyn MarketEventHandler>) {
        self.register_scheduled(handler, Vec::new());
    }

    /// Register a handler with scheduled snapshot timestamps.
    ///
    /// The schedule is sorted internally; duplicates fire once each.
    pub fn register_scheduled(
        &mut self,
        handler: Box<dyn MarketEventHandler>,
        mut schedule: Vec<Timestamp>,
    ) {
        schedule.sort_unstable();
        self.entries.push(HandlerEntry {
            handler,
            schedule,
            cursor: 0,
        });
    }

    /// Number of registered handlers
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no handlers are registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fire every schedule entry strictly older than `next_timestamp`.
    ///
    /// Called before the triggering message mutates the book, so each fired
    /// entry `t` sees the state formed by all messages with timestamp ≤ t.
    /// Entries skipped by a feed gap fire in order against that same state,
    /// each stamped with its own scheduled time.
    pub(crate) fn fire_due_snapshots(
        &mut self,
        book: &OrderBook,
        status: TradingStatus,
        next_timestamp: Timestamp,
    ) {
        for entry in &mut self.entries {
            while entry.cursor < entry.schedule.len()
                && next_timestamp > entry.schedule[entry.cursor]
            {
                let at = entry.schedule[entry.cursor];
                entry.cursor += 1;
                if entry.handler.active_during(status) {
                    let snapshot = book.snapshot(at, None, true);
                    entry.handler.on_snapshot(&snapshot);
                }
            }
        }
    }

    /// Fire all remaining schedule entries against the final book state.
    pub(crate) fn flush_schedules(&mut self, book: &OrderBook, status: TradingStatus) {
        for entry in &mut self.entries {
            while entry.cursor < entry.schedule.len() {
                let at = entry.schedule[entry.cursor];
                entry.cursor += 1;
                if entry.handler.active_during(status) {
                    let snapshot = book.snapshot(at, None, true);
                    entry.handler.on_snapshot(&snapshot);
                }
            }
        }
    }

    pub(crate) fn each_message(
        &mut self,
        book: &OrderBook,
        status: TradingStatus,
        message: &ItchMessage,
    ) {
        for entry in &mut self.entries {
            entry.handler.on_message(book, status, message);
        }
    }

    pub(crate) fn each_add(&mut self, book: &OrderBook, status: TradingStatus, event: &AddEvent) {
        for entry in &mut self.entries {
            if entry.handler.active_during(status) {
                entry.handler.on_add(book, event);
            }
        }
    }

    pub(crate) fn each_execute(
        &mut self,
        book: &OrderBook,
        status: TradingStatus,
        timestamp: Timestamp,
        execution: &Execution,
    ) {
        for entry in &mut self.entries {
            if entry.handler.active_during(status) {
                entry.handler.on_execute(book, timestamp, execution);
            }
        }
    }

    pub(crate) fn each_cancel(
        &mut self,
        book: &OrderBook,
        status: TradingStatus,
        timestamp: Timestamp,
        cancellation: &Cancellation,
    ) {
        for entry in &mut self.entries {
            if entry.handler.active_during(status) {
                entry.handler.on_cancel(book, timestamp, cancellation);
            }
        }
    }

    pub(crate) fn each_delete(
        &mut self,
        book: &OrderBook,
        status: TradingStatus,
        timestamp: Timestamp,
        deletion: &Deletion,
    ) {
        for entry in &mut self.entries {
            if entry.handler.active_during(status) {
                entry.handler.on_delete(book, timestamp, deletion);
            }
        }
    }

    pub(crate) fn each_replace(
        &mut self,
        book: &OrderBook,
        status: TradingStatus,
        timestamp: Timestamp,
        replacement: &Replacement,
    ) {
        for entry in &mut self.entries {
            if entry.handler.active_during(status) {
                entry.handler.on_replace(book, timestamp, replacement);
            }
        }
    }

    pub(crate) fn each_trade(&mut self, book: &OrderBook, status: TradingStatus, event: &TradeEvent) {
        for entry in &mut self.entries {
            if entry.handler.active_during(status) {
                entry.handler.on_trade(book, event);
            }
        }
    }

    pub(crate) fn each_cross(&mut self, book: &OrderBook, status: TradingStatus, event: &CrossEvent) {
        for entry in &mut self.entries {
            if entry.handler.active_during(status) {
                entry.handler.on_cross(book, event);
            }
        }
    }

    pub(crate) fn each_status_change(
        &mut self,
        timestamp: Timestamp,
        old: TradingStatus,
        new: TradingStatus,
    ) {
        for entry in &mut self.entries {
            entry.handler.on_status_change(timestamp, old, new);
        }
    }

    pub(crate) fn each_tick(&mut self, timestamp: Timestamp) {
        for entry in &mut self.entries {
            entry.handler.on_tick(timestamp);
        }
    }

    pub(crate) fn each_error(&mut self, timestamp: Timestamp, error: &BookError) {
        for entry in &mut self.entries {
            entry.handler.on_error(timestamp, error);
        }
    }

    pub(crate) fn each_stale_reference(&mut self, timestamp: Timestamp, reference: OrderRef) {
        for entry in &mut self.entries {
            entry.handler.on_stale_reference(timestamp, reference);
        }
    }

    pub(crate) fn each_finalize(&mut self, book: &OrderBook) {
        for entry in &mut self.entries {
            entry.handler.on_finalize(book);
        }
    }
}
