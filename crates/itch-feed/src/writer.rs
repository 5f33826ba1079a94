//! Symbol-filtered feed passthrough writer.
//!
//! Re-serializes decoded messages into a length-prefixed subset feed that is
//! itself replayable. What separates a valid filtered feed from a broken one
//! is the reference discipline: an order-keyed message may only be emitted
//! if the add that created its reference was emitted, and a broken-trade
//! message only if its match number was.

use std::collections::HashSet;
use std::io::Write;

use itch_core::types::StockSymbol;

use crate::messages::ItchMessage;

/// Membership set over 8-byte stock symbols
#[derive(Debug, Clone, Default)]
pub struct SymbolFilter {
    symbols: HashSet<StockSymbol>,
}

impl SymbolFilter {
    /// Create an empty filter (matches nothing)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a filter from symbol strings
    #[must_use]
    pub fn from_symbols<'a, I: IntoIterator<Item = &'a str>>(symbols: I) -> Self {
        Self {
            symbols: symbols.into_iter().map(StockSymbol::new).collect(),
        }
    }

    /// Add a symbol to the filter
    pub fn insert(&mut self, symbol: StockSymbol) {
        self.symbols.insert(symbol);
    }

    /// Check membership
    #[must_use]
    pub fn contains(&self, symbol: &StockSymbol) -> bool {
        self.symbols.contains(symbol)
    }

    /// Number of symbols in the filter
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether the filter is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Write one message to a sink with the 16-bit big-endian length prefix.
///
/// # Errors
///
/// Propagates sink write failures.
pub fn write_framed<W: Write>(sink: &mut W, message: &ItchMessage) -> std::io::Result<()> {
    let bytes = message.to_bytes();
    sink.write_all(&(bytes.len() as u16).to_be_bytes())?;
    sink.write_all(&bytes)
}

/// Symbol-filter passthrough writer.
///
/// Emission policy:
/// - system-wide messages (`S`, `V`, `W`) pass unconditionally;
/// - symbol-keyed messages pass iff the symbol is in the filter;
/// - order-keyed messages (`E`, `C`, `X`, `D`, `U`) pass iff their order
///   reference was previously emitted — `U` retires the old reference and
///   registers the new one, `D` retires;
/// - broken trades (`B`) pass iff the match number was previously emitted.
pub struct FilterWriter<W: Write> {
    sink: W,
    filter: SymbolFilter,
    emitted_refs: HashSet<u64>,
    emitted_matches: HashSet<u64>,
    messages_written: u64,
}

impl<W: Write> FilterWriter<W> {
    /// Create a passthrough writer over a sink
    pub fn new(sink: W, filter: SymbolFilter) -> Self {
        Self {
            sink,
            filter,
            emitted_refs: HashSet::new(),
            emitted_matches: HashSet::new(),
            messages_written: 0,
        }
    }

    /// Process one message, emitting it when the policy allows.
    ///
    /// Returns whether the message was written.
    ///
    /// # Errors
    ///
    /// Propagates sink write failures.
    pub fn process(&mut self, message: &ItchMessage) -> std::io::Result<bool> {
        let keep = match message {
            m if m.is_system_wide() => true,
            ItchMessage::AddOrder(m) => {
                let keep = self.filter.contains(&StockSymbol::from_bytes(m.stock));
                if keep {
                    self.emitted_refs.insert(m.order_ref);
                }
                keep
            }
            ItchMessage::AddOrderMpid(m) => {
                let keep = self.filter.contains(&StockSymbol::from_bytes(m.stock));
                if keep {
                    self.emitted_refs.insert(m.order_ref);
                }
                keep
            }
            ItchMessage::OrderExecuted(m) => {
                let keep = self.emitted_refs.contains(&m.order_ref);
                if keep {
                    self.emitted_matches.insert(m.match_number);
                }
                keep
            }
            ItchMessage::OrderExecutedWithPrice(m) => {
                let keep = self.emitted_refs.contains(&m.order_ref);
                if keep {
                    self.emitted_matches.insert(m.match_number);
                }
                keep
            }
            ItchMessage::OrderCancel(m) => self.emitted_refs.contains(&m.order_ref),
            ItchMessage::OrderDelete(m) => {
                let keep = self.emitted_refs.contains(&m.order_ref);
                if keep {
                    self.emitted_refs.remove(&m.order_ref);
                }
                keep
            }
            ItchMessage::OrderReplace(m) => {
                let keep = self.emitted_refs.contains(&m.original_ref);
                if keep {
                    self.emitted_refs.remove(&m.original_ref);
                    self.emitted_refs.insert(m.new_ref);
                }
                keep
            }
            ItchMessage::Trade(m) => {
                let keep = self.filter.contains(&StockSymbol::from_bytes(m.stock));
                if keep {
                    self.emitted_matches.insert(m.match_number);
                }
                keep
            }
            ItchMessage::CrossTrade(m) => self.filter.contains(&StockSymbol::from_bytes(m.stock)),
            ItchMessage::BrokenTrade(m) => self.emitted_matches.contains(&m.match_number),
            m => match m.symbol() {
                Some(symbol) => self.filter.contains(&symbol),
                None => false,
            },
        };

        if keep {
            write_framed(&mut self.sink, message)?;
            self.messages_written += 1;
        }
        Ok(keep)
    }

    /// Number of messages written so far
    #[must_use]
    pub fn messages_written(&self) -> u64 {
        self.messages_written
    }

    /// Flush the sink
    ///
    /// # Errors
    ///
    /// Propagates sink flush failures.
    pub fn flush(&mut self) -> std::io::Result<()> {
        self.sink.flush()
    }

    /// Flush and return the sink
    ///
    /// # Errors
    ///
    /// Propagates sink flush failures.
    pub fn finish(mut self) -> std::io::Result<W> {
        self.sink.flush()?;
        Ok(self.sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::{decode_all, Framing};
    use crate::messages::*;

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

    fn exec(order_ref: u64, match_number: u64, ts: u64) -> ItchMessage {
        ItchMessage::OrderExecuted(OrderExecuted {
            stock_locate: 1,
            tracking_number: 0,
            timestamp: ts,
            order_ref,
            executed_shares: 50,
            match_number,
        })
    }

    #[test]
    fn test_symbol_filter() {
        let filter = SymbolFilter::from_symbols(["AAPL", "MSFT"]);
        assert!(filter.contains(&StockSymbol::new("AAPL")));
        assert!(!filter.contains(&StockSymbol::new("GOOG")));
        assert_eq!(filter.len(), 2);
    }

    #[test]
    fn test_passthrough_keeps_filtered_symbol() {
        let filter = SymbolFilter::from_symbols(["AAPL"]);
        let mut writer = FilterWriter::new(Vec::new(), filter);

        assert!(writer.process(&add(1, b"AAPL    ", 100)).unwrap());
        assert!(!writer.process(&add(2, b"GOOG    ", 200)).unwrap());
        // Execution against the kept order passes, against the dropped one not
        assert!(writer.process(&exec(1, 900, 300)).unwrap());
        assert!(!writer.process(&exec(2, 901, 400)).unwrap());

        let sink = writer.finish().unwrap();
        let replay = decode_all(&sink, Framing::LengthPrefixed).unwrap();
        assert_eq!(replay.len(), 2);
        assert_eq!(replay[0].order_ref(), Some(1));
        assert_eq!(replay[1].match_number(), Some(900));
    }

    #[test]
    fn test_passthrough_system_wide_unconditional() {
        let mut writer = FilterWriter::new(Vec::new(), SymbolFilter::new());
        let event = ItchMessage::SystemEvent(SystemEvent {
            stock_locate: 0,
            tracking_number: 0,
            timestamp: 1,
            code: b'O',
        });
        assert!(writer.process(&event).unwrap());
    }

    #[test]
    fn test_passthrough_replace_moves_reference() {
        let filter = SymbolFilter::from_symbols(["AAPL"]);
        let mut writer = FilterWriter::new(Vec::new(), filter);

        writer.process(&add(10, b"AAPL    ", 100)).unwrap();
        let replace = ItchMessage::OrderReplace(OrderReplace {
            stock_locate: 1,
            tracking_number: 0,
            timestamp: 200,
            original_ref: 10,
            new_ref: 11,
            shares: 150,
            price: 1_005_000,
        });
        assert!(writer.process(&replace).unwrap());
        // Old reference retired, new one live
        assert!(!writer.process(&exec(10, 902, 300)).unwrap());
        assert!(writer.process(&exec(11, 903, 400)).unwrap());
    }

    #[test]
    fn test_passthrough_broken_trade_follows_match() {
        let filter = SymbolFilter::from_symbols(["AAPL"]);
        let mut writer = FilterWriter::new(Vec::new(), filter);

        writer.process(&add(1, b"AAPL    ", 100)).unwrap();
        writer.process(&exec(1, 900, 200)).unwrap();

        let broken_kept = ItchMessage::BrokenTrade(BrokenTrade {
            stock_locate: 1,
            tracking_number: 0,
            timestamp: 300,
            match_number: 900,
        });
        let broken_dropped = ItchMessage::BrokenTrade(BrokenTrade {
            stock_locate: 1,
            tracking_number: 0,
            timestamp: 400,
            match_number: 999,
        });
        assert!(writer.process(&broken_kept).unwrap());
        assert!(!writer.process(&broken_dropped).unwrap());
    }

    #[test]
    fn test_cross_trade_does_not_register_match() {
        let filter = SymbolFilter::from_symbols(["AAPL"]);
        let mut writer = FilterWriter::new(Vec::new(), filter);

        let cross = ItchMessage::CrossTrade(CrossTrade {
            stock_locate: 1,
            tracking_number: 0,
            timestamp: 100,
            shares: 100_000,
            stock: *b"AAPL    ",
            cross_price: 1_000_000,
            match_number: 905,
            cross_type: b'O',
        });
        assert!(writer.process(&cross).unwrap());

        // The cross itself passes on symbol, but its match number is not
        // registered, so a follow-up break is dropped
        let broken = ItchMessage::BrokenTrade(BrokenTrade {
            stock_locate: 1,
            tracking_number: 0,
            timestamp: 200,
            match_number: 905,
        });
        assert!(!writer.process(&broken).unwrap());
    }

    #[test]
    fn test_passthrough_delete_retires_reference() {
        let filter = SymbolFilter::from_symbols(["AAPL"]);
        let mut writer = FilterWriter::new(Vec::new(), filter);

        writer.process(&add(1, b"AAPL    ", 100)).unwrap();
        let delete = ItchMessage::OrderDelete(OrderDelete {
            stock_locate: 1,
            tracking_number: 0,
            timestamp: 200,
            order_ref: 1,
        });
        assert!(writer.process(&delete).unwrap());
        assert!(!writer.process(&exec(1, 904, 300)).unwrap());
    }
}
