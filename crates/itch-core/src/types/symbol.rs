//! Fixed-width ASCII identifiers: stock symbols and MPIDs.

use std::fmt;

use rkyv::{Archive, Deserialize as RkyvDeserialize, Serialize as RkyvSerialize};
use serde::{Deserialize, Serialize};

use crate::constants::{MPID_LEN, SYMBOL_LEN};

/// An 8-byte right-space-padded ASCII stock symbol.
///
/// Symbols compare bytewise, exactly as they appear on the wire; trimming
/// the padding is a presentation concern.
#[derive(
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Archive,
    RkyvSerialize,
    RkyvDeserialize,
)]
#[archive(check_bytes)]
pub struct StockSymbol([u8; SYMBOL_LEN]);

impl StockSymbol {
    /// Create a symbol from a string, right-padding with spaces.
    ///
    /// Input longer than 8 bytes is truncated.
    #[must_use]
    pub fn new(symbol: &str) -> Self {
        let mut bytes = [b' '; SYMBOL_LEN];
        for (dst, src) in bytes.iter_mut().zip(symbol.bytes()) {
            *dst = src;
        }
        Self(bytes)
    }

    /// Create a symbol from raw wire bytes
    #[inline]
    #[must_use]
    pub const fn from_bytes(bytes: [u8; SYMBOL_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the raw padded bytes
    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; SYMBOL_LEN] {
        &self.0
    }

    /// Get the symbol with trailing padding removed
    #[must_use]
    pub fn trimmed(&self) -> &str {
        std::str::from_utf8(&self.0)
            .unwrap_or("")
            .trim_end_matches(' ')
    }
}

impl From<[u8; SYMBOL_LEN]> for StockSymbol {
    fn from(bytes: [u8; SYMBOL_LEN]) -> Self {
        Self(bytes)
    }
}

impl fmt::Debug for StockSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StockSymbol({:?})", self.trimmed())
    }
}

impl fmt::Display for StockSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.trimmed())
    }
}

/// A 4-byte ASCII market participant identifier (broker code).
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
pub struct Mpid([u8; MPID_LEN]);

impl Mpid {
    /// Create an MPID from a string, right-padding with spaces
    #[must_use]
    pub fn new(mpid: &str) -> Self {
        let mut bytes = [b' '; MPID_LEN];
        for (dst, src) in bytes.iter_mut().zip(mpid.bytes()) {
            *dst = src;
        }
        Self(bytes)
    }

    /// Create an MPID from raw wire bytes
    #[inline]
    #[must_use]
    pub const fn from_bytes(bytes: [u8; MPID_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the raw padded bytes
    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; MPID_LEN] {
        &self.0
    }

    /// Get the MPID with trailing padding removed
    #[must_use]
    pub fn trimmed(&self) -> &str {
        std::str::from_utf8(&self.0)
            .unwrap_or("")
            .trim_end_matches(' ')
    }
}

impl From<[u8; MPID_LEN]> for Mpid {
    fn from(bytes: [u8; MPID_LEN]) -> Self {
        Self(bytes)
    }
}

impl fmt::Debug for Mpid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mpid({:?})", self.trimmed())
    }
}

impl fmt::Display for Mpid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.trimmed())
    }
}
