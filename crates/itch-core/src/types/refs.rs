//! Venue-assigned reference numbers.

use std::fmt;

use rkyv::{Archive, Deserialize as RkyvDeserialize, Serialize as RkyvSerialize};
use serde::{Deserialize, Serialize};

/// Venue-assigned order reference number, unique within a trading day.
#[derive(
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Archive,
    RkyvSerialize,
    RkyvDeserialize,
)]
#[archive(check_bytes)]
pub struct OrderRef(u64);

impl OrderRef {
    /// Create a new order reference
    #[inline]
    #[must_use]
    pub const fn new(reference: u64) -> Self {
        Self(reference)
    }

    /// Get the raw value
    #[inline]
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl From<u64> for OrderRef {
    fn from(reference: u64) -> Self {
        Self(reference)
    }
}

impl From<OrderRef> for u64 {
    fn from(reference: OrderRef) -> Self {
        reference.0
    }
}

impl fmt::Debug for OrderRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OrderRef({})", self.0)
    }
}

impl fmt::Display for OrderRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Venue-assigned match number, unique per execution or trade print.
///
/// Broken-trade messages retract a print by its match number.
#[derive(
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Archive,
    RkyvSerialize,
    RkyvDeserialize,
)]
#[archive(check_bytes)]
pub struct MatchNumber(u64);

impl MatchNumber {
    /// Create a new match number
    #[inline]
    #[must_use]
    pub const fn new(number: u64) -> Self {
        Self(number)
    }

    /// Get the raw value
    #[inline]
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl From<u64> for MatchNumber {
    fn from(number: u64) -> Self {
        Self(number)
    }
}

impl fmt::Debug for MatchNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MatchNumber({})", self.0)
    }
}

impl fmt::Display for MatchNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_ref_conversion() {
        let reference = OrderRef::new(42);
        assert_eq!(reference.value(), 42);
        assert_eq!(u64::from(reference), 42);
        assert_eq!(OrderRef::from(42u64), reference);
    }

    #[test]
    fn test_match_number() {
        let number = MatchNumber::new(7);
        assert_eq!(number.value(), 7);
        assert!(MatchNumber::new(8) > number);
    }
}
