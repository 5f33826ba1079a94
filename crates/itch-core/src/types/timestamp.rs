//! Nanoseconds-since-midnight timestamp type.

use std::cmp::Ordering;
use std::fmt;

use rkyv::{Archive, Deserialize as RkyvDeserialize, Serialize as RkyvSerialize};
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_TIMESTAMP, NS_PER_SEC};

/// Nanoseconds since midnight of the trading day.
///
/// ITCH encodes timestamps as 48-bit big-endian integers; the trading day
/// itself is known from context and never encoded per message.
///
/// # Example
///
/// ```rust
/// use itch_core::types::Timestamp;
///
/// let ts = Timestamp::from_nanos(34_200_000_000_000);
/// assert_eq!(format!("{ts}"), "09:30:00.000000000");
/// ```
#[derive(
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Archive,
    RkyvSerialize,
    RkyvDeserialize,
)]
#[archive(check_bytes)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Midnight of the trading day
    pub const MIDNIGHT: Self = Self(0);

    /// Largest wire-representable timestamp
    pub const MAX: Self = Self(MAX_TIMESTAMP);

    /// Create a timestamp from nanoseconds since midnight
    #[inline]
    #[must_use]
    pub const fn from_nanos(nanos: u64) -> Self {
        Self(nanos)
    }

    /// Create a timestamp from seconds since midnight
    #[inline]
    #[must_use]
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs * NS_PER_SEC)
    }

    /// Get nanoseconds since midnight
    #[inline]
    #[must_use]
    pub const fn as_nanos(self) -> u64 {
        self.0
    }

    /// Get whole seconds since midnight
    #[inline]
    #[must_use]
    pub const fn as_secs(self) -> u64 {
        self.0 / NS_PER_SEC
    }

    /// Get the sub-second nanosecond component
    #[inline]
    #[must_use]
    pub const fn subsec_nanos(self) -> u32 {
        (self.0 % NS_PER_SEC) as u32
    }

    /// Add nanoseconds
    #[inline]
    #[must_use]
    pub const fn add_nanos(self, nanos: u64) -> Self {
        Self(self.0 + nanos)
    }

    /// Nanoseconds elapsed since an earlier timestamp
    #[inline]
    #[must_use]
    pub const fn nanos_since(self, earlier: Self) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// Convert to a chrono `NaiveTime` for display purposes
    #[inline]
    #[must_use]
    pub fn to_naive_time(self) -> chrono::NaiveTime {
        chrono::NaiveTime::from_num_seconds_from_midnight_opt(
            (self.as_secs() % 86_400) as u32,
            self.subsec_nanos(),
        )
        .unwrap_or_default()
    }
}

impl PartialOrd for Timestamp {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timestamp {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl From<u64> for Timestamp {
    fn from(nanos: u64) -> Self {
        Self(nanos)
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({}ns)", self.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_naive_time().format("%H:%M:%S%.9f"))
    }
}
