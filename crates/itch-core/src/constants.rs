//! Constants used throughout the itchlob toolkit.

/// Scale factor for 4-implied-decimal wire prices
pub const PRICE_SCALE: u32 = 10_000;

/// Number of implied decimal places in a wire price
pub const PRICE_DECIMALS: u8 = 4;

/// Length of a stock symbol field on the wire (space-padded ASCII)
pub const SYMBOL_LEN: usize = 8;

/// Length of a market participant identifier on the wire
pub const MPID_LEN: usize = 4;

/// Width of a wire timestamp in bits (nanoseconds since midnight)
pub const TIMESTAMP_BITS: u32 = 48;

/// Largest representable wire timestamp
pub const MAX_TIMESTAMP: u64 = (1 << TIMESTAMP_BITS) - 1;

/// Nanoseconds per microsecond
pub const NS_PER_US: u64 = 1_000;

/// Nanoseconds per millisecond
pub const NS_PER_MS: u64 = 1_000_000;

/// Nanoseconds per second
pub const NS_PER_SEC: u64 = 1_000_000_000;
