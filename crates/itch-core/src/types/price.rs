//! Fixed-point price type for equity market data.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Sub};

use rkyv::{Archive, Deserialize as RkyvDeserialize, Serialize as RkyvSerialize};
use serde::{Deserialize, Serialize};

use crate::constants::PRICE_SCALE;

/// Fixed-point price with 4 implied decimal places.
///
/// Wire prices are unsigned 32-bit integers scaled by 10^4; the book stores
/// the raw integer and division happens only at presentation.
///
/// # Example
///
/// ```rust
/// use itch_core::types::Price;
///
/// let price = Price::from_raw(1_002_500); // $100.2500
/// assert_eq!(price.as_f64(), 100.25);
/// assert_eq!(format!("{price}"), "100.2500");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[derive(Archive, RkyvSerialize, RkyvDeserialize)]
#[archive(check_bytes)]
pub struct Price(u32);

impl Price {
    /// Zero price constant
    pub const ZERO: Self = Self(0);

    /// Maximum representable price
    pub const MAX: Self = Self(u32::MAX);

    /// Create a price from its raw wire value
    #[inline]
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Create a price from a floating-point dollar value
    #[inline]
    #[must_use]
    pub fn from_f64(value: f64) -> Self {
        Self((value * f64::from(PRICE_SCALE)).round() as u32)
    }

    /// Get the raw wire value
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Convert to a floating-point dollar value
    #[inline]
    #[must_use]
    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / f64::from(PRICE_SCALE)
    }

    /// Check if the price is zero
    #[inline]
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Saturating addition
    #[inline]
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Saturating subtraction
    #[inline]
    #[must_use]
    pub const fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Checked subtraction
    #[inline]
    #[must_use]
    pub const fn checked_sub(self, other: Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }
}

impl PartialOrd for Price {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Price {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl Add for Price {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl Sub for Price {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl From<u32> for Price {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Debug for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Price({})", self.0)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:04}", self.0 / PRICE_SCALE, self.0 % PRICE_SCALE)
    }
}
