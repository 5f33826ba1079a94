//! Book side (Bid/Ask) type.

use std::fmt;
use std::ops::Not;

use rkyv::{Archive, Deserialize as RkyvDeserialize, Serialize as RkyvSerialize};
use serde::{Deserialize, Serialize};

/// Side of the book an order rests on
#[derive(
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Archive,
    RkyvSerialize,
    RkyvDeserialize,
)]
#[archive(check_bytes)]
#[repr(u8)]
pub enum Side {
    /// Buy side
    Bid = 0,
    /// Sell side
    Ask = 1,
}

impl Side {
    /// Check if this is the bid side
    #[inline]
    #[must_use]
    pub const fn is_bid(self) -> bool {
        matches!(self, Side::Bid)
    }

    /// Check if this is the ask side
    #[inline]
    #[must_use]
    pub const fn is_ask(self) -> bool {
        matches!(self, Side::Ask)
    }

    /// Get the opposite side
    #[inline]
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Side::Bid => Side::Ask,
            Side::Ask => Side::Bid,
        }
    }

    /// Sign multiplier (1 for bids, -1 for asks)
    #[inline]
    #[must_use]
    pub const fn sign(self) -> i64 {
        match self {
            Side::Bid => 1,
            Side::Ask => -1,
        }
    }

    /// Create from the wire buy/sell indicator (`B` or `S`)
    #[inline]
    #[must_use]
    pub const fn from_indicator(indicator: u8) -> Option<Self> {
        match indicator {
            b'B' => Some(Side::Bid),
            b'S' => Some(Side::Ask),
            _ => None,
        }
    }

    /// Convert to the wire buy/sell indicator
    #[inline]
    #[must_use]
    pub const fn indicator(self) -> u8 {
        match self {
            Side::Bid => b'B',
            Side::Ask => b'S',
        }
    }
}

impl Not for Side {
    type Output = Self;

    #[inline]
    fn not(self) -> Self::Output {
        self.opposite()
    }
}

impl fmt::Debug for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Bid => write!(f, "Bid"),
            Side::Ask => write!(f, "Ask"),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Bid => write!(f, "BID"),
            Side::Ask => write!(f, "ASK"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Bid.opposite(), Side::Ask);
        assert_eq!(!Side::Ask, Side::Bid);
    }

    #[test]
    fn test_side_from_indicator() {
        assert_eq!(Side::from_indicator(b'B'), Some(Side::Bid));
        assert_eq!(Side::from_indicator(b'S'), Some(Side::Ask));
        assert_eq!(Side::from_indicator(b'X'), None);
    }

    #[test]
    fn test_side_indicator_roundtrip() {
        assert_eq!(Side::from_indicator(Side::Bid.indicator()), Some(Side::Bid));
        assert_eq!(Side::from_indicator(Side::Ask.indicator()), Some(Side::Ask));
    }
}
