//! Per-symbol market processor.
//!
//! Consumes decoded messages in arrival order, maintains the limit order
//! book and the symbol's trading status, and fans events out to registered
//! handlers. One processor instance reconstructs one symbol on one trading
//! day; parallelism across symbols means independent instances.

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, warn};

use itch_core::types::{
    MatchNumber, OrderRef, Price, StockSymbol, Timestamp, TradingStatus, Volume,
};
use itch_feed::messages::{ItchMessage, TypedAdd, TypedExecution};
use itch_lob::{BookError, OrderBook};

use crate::handlers::{
    AddEvent, CrossEvent, HandlerDispatch, MarketEventHandler, TradeEvent,
};

/// Processor configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessorConfig {
    /// Halt on any book error instead of tolerating it.
    ///
    /// Production feeds contain mid-day start-up anomalies, so the default
    /// logs the error, notifies handlers, and continues.
    pub strict: bool,
}

/// A fatal processing failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProcessError {
    /// A rejected book mutation, fatal in strict mode or on inconsistency
    #[error(transparent)]
    Book(#[from] BookError),

    /// An add or trade carried a buy/sell indicator that is neither `B`
    /// nor `S`
    #[error("invalid buy/sell indicator 0x{0:02x}")]
    InvalidIndicator(u8),

    /// The processor refused input after an earlier fatal error
    #[error("processor poisoned by earlier fatal error")]
    Poisoned,
}

/// A per-symbol, per-day market state machine.
///
/// Not thread-safe; owned by one logical task. Messages for other symbols
/// are discarded, except market-wide status messages which always apply.
pub struct MarketProcessor {
    symbol: StockSymbol,
    book: OrderBook,
    dispatch: HandlerDispatch,
    status: TradingStatus,
    /// Last system event code seen (0 before the first)
    system_code: u8,
    /// Last stock trading state seen for this symbol (0 before the first)
    stock_state: u8,
    operational_halt: bool,
    mwcb_breached: bool,
    last_timestamp: Timestamp,
    strict: bool,
    poisoned: bool,
}

impl MarketProcessor {
    /// Create a processor with the default (tolerant) configuration
    #[must_use]
    pub fn new(symbol: StockSymbol, book_date: NaiveDate) -> Self {
        Self::with_config(symbol, book_date, ProcessorConfig::default())
    }

    /// Create a processor with an explicit configuration
    #[must_use]
    pub fn with_config(symbol: StockSymbol, book_date: NaiveDate, config: ProcessorConfig) -> Self {
        Self {
            symbol,
            book: OrderBook::new(symbol, book_date),
            dispatch: HandlerDispatch::new(),
            status: TradingStatus::default(),
            system_code: 0,
            stock_state: 0,
            operational_halt: false,
            mwcb_breached: false,
            last_timestamp: Timestamp::MIDNIGHT,
            strict: config.strict,
            poisoned: false,
        }
    }

    /// Symbol this processor reconstructs
    #[must_use]
    pub const fn symbol(&self) -> StockSymbol {
        self.symbol
    }

    /// Current book state
    #[must_use]
    pub const fn book(&self) -> &OrderBook {
        &self.book
    }

    /// Resolved trading status
    #[must_use]
    pub const fn status(&self) -> TradingStatus {
        self.status
    }

    /// Timestamp of the latest message seen
    #[must_use]
    pub const fn last_timestamp(&self) -> Timestamp {
        self.last_timestamp
    }

    /// Register a handler with no snapshot schedule
    pub fn register_handler(&mut self, handler: Box<dyn MarketEventHandler>) {
        self.dispatch.register(handler);
    }

    /// Register a handler that receives snapshots at scheduled timestamps.
    ///
    /// A schedule entry `t` fires on the first message with timestamp
    /// strictly greater than `t`, before that message's mutation, so the
    /// snapshot reflects exactly the messages with timestamp ≤ t.
    pub fn register_scheduled_handler(
        &mut self,
        handler: Box<dyn MarketEventHandler>,
        schedule: Vec<Timestamp>,
    ) {
        self.dispatch.register_scheduled(handler, schedule);
    }

    fn matches_symbol(&self, stock: &[u8; 8]) -> bool {
        StockSymbol::from_bytes(*stock) == self.symbol
    }

    /// Tolerated book errors notify handlers and continue; strict mode and
    /// internal inconsistencies poison the processor instead.
    fn handle_book_error(&mut self, timestamp: Timestamp, error: BookError) -> Result<(), ProcessError> {
        self.dispatch.each_error(timestamp, &error);
        let fatal = self.strict || matches!(error, BookError::Inconsistent(_));
        if fatal {
            self.poisoned = true;
            Err(ProcessError::Book(error))
        } else {
            warn!(symbol = %self.symbol, %error, "book error tolerated");
            Ok(())
        }
    }

    /// An order-keyed message referenced an order the book has never had.
    /// Feeds that begin mid-day produce these in bulk at start-of-day.
    fn handle_stale_reference(&mut self, timestamp: Timestamp, reference: OrderRef) {
        debug!(symbol = %self.symbol, %reference, "stale order reference");
        self.dispatch.each_stale_reference(timestamp, reference);
    }

    fn handle_invalid_indicator(
        &mut self,
        indicator: u8,
    ) -> Result<(), ProcessError> {
        if self.strict {
            self.poisoned = true;
            return Err(ProcessError::InvalidIndicator(indicator));
        }
        warn!(symbol = %self.symbol, indicator, "invalid buy/sell indicator ignored");
        Ok(())
    }

    fn resolve_status(&self) -> TradingStatus {
        if self.mwcb_breached || self.operational_halt || matches!(self.stock_state, b'H' | b'P') {
            TradingStatus::Halted
        } else if self.stock_state == b'Q' {
            TradingStatus::QuoteOnly
        } else {
            match self.system_code {
                b'Q' => TradingStatus::Trading,
                b'M' | b'E' => TradingStatus::PostTrade,
                b'C' => TradingStatus::Closed,
                // 'O', 'S', or nothing seen yet
                _ => TradingStatus::PreTrade,
            }
        }
    }

    fn update_status(&mut self, timestamp: Timestamp) {
        let new = self.resolve_status();
        if new != self.status {
            let old = self.status;
            self.status = new;
            self.dispatch.each_status_change(timestamp, old, new);
        }
    }

    fn apply_add(&mut self, typed: Option<TypedAdd>, indicator: u8) -> Result<(), ProcessError> {
        let Some(add) = typed else {
            return self.handle_invalid_indicator(indicator);
        };
        match self.book.add(
            add.reference,
            add.side,
            add.price,
            add.volume,
            add.timestamp,
            add.attribution,
        ) {
            Ok(()) => {
                let event = AddEvent {
                    timestamp: add.timestamp,
                    reference: add.reference,
                    side: add.side,
                    price: add.price,
                    volume: add.volume,
                    attribution: add.attribution,
                };
                self.dispatch.each_add(&self.book, self.status, &event);
                Ok(())
            }
            Err(e) => self.handle_book_error(add.timestamp, e),
        }
    }

    /// Process one message in arrival order.
    ///
    /// # Errors
    ///
    /// `Poisoned` after a prior fatal error; `Book` / `InvalidIndicator`
    /// when a fatal error occurs on this message (strict mode, or an
    /// internal inconsistency in any mode). Tolerated errors return `Ok`.
    #[allow(clippy::too_many_lines)]
    pub fn process(&mut self, message: &ItchMessage) -> Result<(), ProcessError> {
        if self.poisoned {
            return Err(ProcessError::Poisoned);
        }
        let timestamp = message.timestamp();

        // Scheduled snapshots fire before this message's mutation, against
        // the state formed by everything that came before it
        self.dispatch
            .fire_due_snapshots(&self.book, self.status, timestamp);

        self.dispatch.each_message(&self.book, self.status, message);

        match message {
            ItchMessage::AddOrder(m) => {
                if self.matches_symbol(&m.stock) {
                    self.apply_add(TypedAdd::from_add(m), m.buy_sell)?;
                }
            }
            ItchMessage::AddOrderMpid(m) => {
                if self.matches_symbol(&m.stock) {
                    self.apply_add(TypedAdd::from_add_mpid(m), m.buy_sell)?;
                }
            }
            ItchMessage::OrderExecuted(m) => {
                let typed = TypedExecution::from(m);
                if self.book.contains(typed.reference) {
                    match self
                        .book
                        .execute(typed.reference, typed.volume, typed.match_number)
                    {
                        Ok(execution) => self.dispatch.each_execute(
                            &self.book,
                            self.status,
                            timestamp,
                            &execution,
                        ),
                        Err(e) => self.handle_book_error(timestamp, e)?,
                    }
                } else {
                    self.handle_stale_reference(timestamp, typed.reference);
                }
            }
            ItchMessage::OrderExecutedWithPrice(m) => {
                let reference = OrderRef::new(m.order_ref);
                if self.book.contains(reference) {
                    match self.book.execute_with_price(
                        reference,
                        Volume::new(m.executed_shares),
                        m.is_printable(),
                        Price::from_raw(m.execution_price),
                        MatchNumber::new(m.match_number),
                    ) {
                        Ok(execution) => self.dispatch.each_execute(
                            &self.book,
                            self.status,
                            timestamp,
                            &execution,
                        ),
                        Err(e) => self.handle_book_error(timestamp, e)?,
                    }
                } else {
                    self.handle_stale_reference(timestamp, reference);
                }
            }
            ItchMessage::OrderCancel(m) => {
                let reference = OrderRef::new(m.order_ref);
                if self.book.contains(reference) {
                    match self.book.cancel(reference, Volume::new(m.canceled_shares)) {
                        Ok(cancellation) => self.dispatch.each_cancel(
                            &self.book,
                            self.status,
                            timestamp,
                            &cancellation,
                        ),
                        Err(e) => self.handle_book_error(timestamp, e)?,
                    }
                } else {
                    self.handle_stale_reference(timestamp, reference);
                }
            }
            ItchMessage::OrderDelete(m) => {
                let reference = OrderRef::new(m.order_ref);
                if self.book.contains(reference) {
                    match self.book.delete(reference) {
                        Ok(deletion) => self.dispatch.each_delete(
                            &self.book,
                            self.status,
                            timestamp,
                            &deletion,
                        ),
                        Err(e) => self.handle_book_error(timestamp, e)?,
                    }
                } else {
                    self.handle_stale_reference(timestamp, reference);
                }
            }
            ItchMessage::OrderReplace(m) => {
                let original = OrderRef::new(m.original_ref);
                if self.book.contains(original) {
                    match self.book.replace(
                        original,
                        OrderRef::new(m.new_ref),
                        Volume::new(m.shares),
                        Price::from_raw(m.price),
                        timestamp,
                    ) {
                        Ok(replacement) => self.dispatch.each_replace(
                            &self.book,
                            self.status,
                            timestamp,
                            &replacement,
                        ),
                        Err(e) => self.handle_book_error(timestamp, e)?,
                    }
                } else {
                    self.handle_stale_reference(timestamp, original);
                }
            }
            ItchMessage::Trade(m) => {
                // Hidden executions change no book state
                if self.matches_symbol(&m.stock) {
                    let event = TradeEvent {
                        timestamp,
                        reference: OrderRef::new(m.order_ref),
                        side: m.side(),
                        volume: Volume::new(m.shares),
                        price: Price::from_raw(m.price),
                        match_number: MatchNumber::new(m.match_number),
                    };
                    self.dispatch.each_trade(&self.book, self.status, &event);
                }
            }
            ItchMessage::CrossTrade(m) => {
                if self.matches_symbol(&m.stock) {
                    let event = CrossEvent {
                        timestamp,
                        shares: m.shares,
                        price: Price::from_raw(m.cross_price),
                        match_number: MatchNumber::new(m.match_number),
                        cross_type: m.cross_type,
                    };
                    self.dispatch.each_cross(&self.book, self.status, &event);
                }
            }
            ItchMessage::SystemEvent(m) => {
                if matches!(m.code, b'O' | b'S' | b'Q' | b'M' | b'E' | b'C') {
                    self.system_code = m.code;
                    self.update_status(timestamp);
                } else {
                    warn!(symbol = %self.symbol, code = m.code, "unknown system event code");
                }
            }
            ItchMessage::StockTradingAction(m) => {
                if self.matches_symbol(&m.stock) {
                    if matches!(m.trading_state, b'H' | b'P' | b'Q' | b'T') {
                        self.stock_state = m.trading_state;
                        self.update_status(timestamp);
                    } else {
                        warn!(symbol = %self.symbol, state = m.trading_state, "unknown trading state");
                    }
                }
            }
            ItchMessage::OperationalHalt(m) => {
                if self.matches_symbol(&m.stock) {
                    match m.halt_action {
                        b'H' => {
                            self.operational_halt = true;
                            self.update_status(timestamp);
                        }
                        b'T' => {
                            self.operational_halt = false;
                            self.update_status(timestamp);
                        }
                        other => {
                            warn!(symbol = %self.symbol, action = other, "unknown halt action");
                        }
                    }
                }
            }
            ItchMessage::MwcbBreach(_) => {
                self.mwcb_breached = true;
                self.update_status(timestamp);
            }
            // Directory, Reg SHO, participant, MWCB levels, IPO, LULD,
            // NOII, RPII, DLCR, and broken trades carry no book state;
            // handlers see them through the raw message event
            _ => {}
        }

        if timestamp > self.last_timestamp {
            self.last_timestamp = timestamp;
            self.dispatch.each_tick(timestamp);
        }
        Ok(())
    }

    /// Finish processing: fire unfired scheduled snapshots against the
    /// final book state, notify handlers, and release the book.
    #[must_use]
    pub fn finalize(mut self) -> OrderBook {
        self.dispatch.flush_schedules(&self.book, self.status);
        self.dispatch.each_finalize(&self.book);
        self.book
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itch_feed::messages::{
        AddOrder, OrderDelete, OrderExecuted, StockTradingAction, SystemEvent,
    };

    fn processor() -> MarketProcessor {
        MarketProcessor::new(
            StockSymbol::new("AAPL"),
            NaiveDate::from_ymd_opt(2026, 1, 2).unwrap(),
        )
    }

    fn add(order_ref: u64, stock: &[u8; 8], ts: u64) -> ItchMessage {
        ItchMessage::AddOrder(AddOrder {
            stock_locate: 1,
            tracking_number: 0,
            timestamp: ts,
            order_ref,
            buy_sell: b'B',
            shares: 100,
            stock: *stock,
            price: 1_000_000,
        })
    }

    fn system(code: u8, ts: u64) -> ItchMessage {
        ItchMessage::SystemEvent(SystemEvent {
            stock_locate: 0,
            tracking_number: 0,
            timestamp: ts,
            code,
        })
    }

    #[test]
    fn test_other_symbol_discarded() {
        let mut p = processor();
        p.process(&add(1, b"AAPL    ", 1_000)).unwrap();
        p.process(&add(2, b"GOOG    ", 1_100)).unwrap();
        assert_eq!(p.book().order_count(), 1);
        assert!(p.book().contains(OrderRef::new(1)));
    }

    #[test]
    fn test_status_resolution() {
        let mut p = processor();
        assert_eq!(p.status(), TradingStatus::PreTrade);

        p.process(&system(b'O', 100)).unwrap();
        assert_eq!(p.status(), TradingStatus::PreTrade);
        p.process(&system(b'Q', 200)).unwrap();
        assert_eq!(p.status(), TradingStatus::Trading);

        p.process(&ItchMessage::StockTradingAction(StockTradingAction {
            stock_locate: 1,
            tracking_number: 0,
            timestamp: 300,
            stock: *b"AAPL    ",
            trading_state: b'H',
            reserved: b' ',
            reason: *b"T1  ",
        }))
        .unwrap();
        assert_eq!(p.status(), TradingStatus::Halted);

        p.process(&ItchMessage::StockTradingAction(StockTradingAction {
            stock_locate: 1,
            tracking_number: 0,
            timestamp: 400,
            stock: *b"AAPL    ",
            trading_state: b'T',
            reserved: b' ',
            reason: *b"    ",
        }))
        .unwrap();
        assert_eq!(p.status(), TradingStatus::Trading);

        p.process(&system(b'M', 500)).unwrap();
        assert_eq!(p.status(), TradingStatus::PostTrade);
        p.process(&system(b'E', 600)).unwrap();
        assert_eq!(p.status(), TradingStatus::PostTrade);
        p.process(&system(b'C', 700)).unwrap();
        assert_eq!(p.status(), TradingStatus::Closed);
    }

    #[test]
    fn test_halt_never_suppresses_book_mutations() {
        let mut p = processor();
        p.process(&ItchMessage::StockTradingAction(StockTradingAction {
            stock_locate: 1,
            tracking_number: 0,
            timestamp: 100,
            stock: *b"AAPL    ",
            trading_state: b'H',
            reserved: b' ',
            reason: *b"T1  ",
        }))
        .unwrap();
        p.process(&add(1, b"AAPL    ", 200)).unwrap();
        assert_eq!(p.book().order_count(), 1);
    }

    #[test]
    fn test_stale_reference_is_tolerated() {
        let mut p = processor();
        // Feed starting mid-day: execution for an order never added
        p.process(&ItchMessage::OrderExecuted(OrderExecuted {
            stock_locate: 1,
            tracking_number: 0,
            timestamp: 1_000,
            order_ref: 777,
            executed_shares: 100,
            match_number: 1,
        }))
        .unwrap();
        assert!(p.book().is_empty());
        assert_eq!(p.last_timestamp(), Timestamp::from_nanos(1_000));
    }

    #[test]
    fn test_strict_mode_poisons_on_duplicate_ref() {
        let mut p = MarketProcessor::with_config(
            StockSymbol::new("AAPL"),
            NaiveDate::from_ymd_opt(2026, 1, 2).unwrap(),
            ProcessorConfig { strict: true },
        );
        p.process(&add(1, b"AAPL    ", 1_000)).unwrap();
        let err = p.process(&add(1, b"AAPL    ", 1_100)).unwrap_err();
        assert!(matches!(err, ProcessError::Book(BookError::DuplicateRef(_))));
        // Refuses all further input
        assert_eq!(
            p.process(&add(2, b"AAPL    ", 1_200)).unwrap_err(),
            ProcessError::Poisoned
        );
    }

    #[test]
    fn test_tolerant_mode_continues_on_duplicate_ref() {
        let mut p = processor();
        p.process(&add(1, b"AAPL    ", 1_000)).unwrap();
        p.process(&add(1, b"AAPL    ", 1_100)).unwrap();
        p.process(&add(2, b"AAPL    ", 1_200)).unwrap();
        assert_eq!(p.book().order_count(), 2);
    }

    #[test]
    fn test_finalize_returns_book() {
        let mut p = processor();
        p.process(&add(1, b"AAPL    ", 1_000)).unwrap();
        p.process(&ItchMessage::OrderDelete(OrderDelete {
            stock_locate: 1,
            tracking_number: 0,
            timestamp: 2_000,
            order_ref: 1,
        }))
        .unwrap();
        let book = p.finalize();
        assert!(book.is_empty());
        assert_eq!(book.update_count(), 2);
    }
}
