//! Per-symbol trading status.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Trading status of a single symbol.
///
/// Resolved by the market processor from system events, stock trading
/// actions, operational halts, and market-wide circuit breaker breaches.
/// `ClosingAuction` is representable for venues whose feeds flag the
/// closing auction period; ITCH 5.0 reports the closing cross itself as a
/// cross trade message instead.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TradingStatus {
    /// Before the start of market hours
    PreTrade,
    /// Continuous trading
    Trading,
    /// Trading halted or paused
    Halted,
    /// Quotation-only period
    QuoteOnly,
    /// Closing auction period
    ClosingAuction,
    /// After the end of market hours
    PostTrade,
    /// System closed for the day
    Closed,
}

impl TradingStatus {
    /// Check whether continuous trading is active
    #[inline]
    #[must_use]
    pub const fn is_trading(self) -> bool {
        matches!(self, TradingStatus::Trading)
    }

    /// Check whether the symbol is halted
    #[inline]
    #[must_use]
    pub const fn is_halted(self) -> bool {
        matches!(self, TradingStatus::Halted)
    }
}

impl Default for TradingStatus {
    fn default() -> Self {
        TradingStatus::PreTrade
    }
}

impl fmt::Debug for TradingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for TradingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TradingStatus::PreTrade => "Pre-Trade",
            TradingStatus::Trading => "Trading",
            TradingStatus::Halted => "Halted",
            TradingStatus::QuoteOnly => "Quote-Only",
            TradingStatus::ClosingAuction => "Closing Auction",
            TradingStatus::PostTrade => "Post-Trade",
            TradingStatus::Closed => "Closed",
        };
        write!(f, "{name}")
    }
}
