//! ITCH 5.0 message types.
//!
//! Every message shares a common header (stock locate, tracking number, and
//! a 48-bit nanosecond timestamp) after the single-byte type tag. Structs
//! store raw wire integers and byte arrays; typed accessors convert to the
//! `itch-core` domain types on demand.

use itch_core::types::{MatchNumber, Mpid, OrderRef, Price, Side, StockSymbol, Timestamp, Volume};
use serde::{Deserialize, Serialize};

/// Code tables from the venue specification.
pub mod codes {
    /// System event codes carried by tag `S`
    pub const SYSTEM_EVENT: &[u8] = b"OSQMEC";
    /// Trading states carried by tag `H`
    pub const TRADING_STATE: &[u8] = b"HPQT";
    /// Cross types carried by tags `Q` and `I`
    pub const CROSS_TYPE: &[u8] = b"OCHI";
    /// Imbalance directions carried by tag `I`
    pub const IMBALANCE_DIRECTION: &[u8] = b"BSNO";
    /// Retail interest flags carried by tag `N`
    pub const RPI_INTEREST: &[u8] = b"BSAN";

    /// Check a code against one of the tables above
    #[must_use]
    pub fn is_valid(code: u8, table: &[u8]) -> bool {
        table.contains(&code)
    }
}

fn put_header(buf: &mut Vec<u8>, tag: u8, stock_locate: u16, tracking_number: u16, timestamp: u64) {
    buf.push(tag);
    buf.extend_from_slice(&stock_locate.to_be_bytes());
    buf.extend_from_slice(&tracking_number.to_be_bytes());
    // 48-bit timestamp: high 16 bits then low 32 bits
    buf.extend_from_slice(&((timestamp >> 32) as u16).to_be_bytes());
    buf.extend_from_slice(&(timestamp as u32).to_be_bytes());
}

/// System event message (tag `S`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemEvent {
    /// Stock locate code
    pub stock_locate: u16,
    /// Venue tracking number
    pub tracking_number: u16,
    /// Nanoseconds since midnight
    pub timestamp: u64,
    /// Event code (`O`, `S`, `Q`, `M`, `E`, `C`)
    pub code: u8,
}

impl SystemEvent {
    /// Serialize to the wire representation
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(12);
        put_header(&mut buf, b'S', self.stock_locate, self.tracking_number, self.timestamp);
        buf.push(self.code);
        buf
    }
}

/// Stock directory message (tag `R`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockDirectory {
    /// Stock locate code
    pub stock_locate: u16,
    /// Venue tracking number
    pub tracking_number: u16,
    /// Nanoseconds since midnight
    pub timestamp: u64,
    /// Stock symbol, space-padded
    pub stock: [u8; 8],
    /// Listing market category
    pub market_category: u8,
    /// Financial status indicator
    pub financial_status: u8,
    /// Round lot size in shares
    pub round_lot_size: u32,
    /// Whether only round lots are accepted
    pub round_lots_only: u8,
    /// Issue classification
    pub issue_classification: u8,
    /// Issue sub-type
    pub issue_subtype: [u8; 2],
    /// Live/test authenticity flag
    pub authenticity: u8,
    /// Reg SHO short sale threshold flag
    pub short_sale_threshold: u8,
    /// IPO flag
    pub ipo_flag: u8,
    /// LULD reference price tier
    pub luld_reference_tier: u8,
    /// Exchange traded product flag
    pub etp_flag: u8,
    /// ETP leverage factor
    pub etp_leverage_factor: u32,
    /// Inverse ETP indicator
    pub inverse_indicator: u8,
}

impl StockDirectory {
    /// Serialize to the wire representation
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(39);
        put_header(&mut buf, b'R', self.stock_locate, self.tracking_number, self.timestamp);
        buf.extend_from_slice(&self.stock);
        buf.push(self.market_category);
        buf.push(self.financial_status);
        buf.extend_from_slice(&self.round_lot_size.to_be_bytes());
        buf.push(self.round_lots_only);
        buf.push(self.issue_classification);
        buf.extend_from_slice(&self.issue_subtype);
        buf.push(self.authenticity);
        buf.push(self.short_sale_threshold);
        buf.push(self.ipo_flag);
        buf.push(self.luld_reference_tier);
        buf.push(self.etp_flag);
        buf.extend_from_slice(&self.etp_leverage_factor.to_be_bytes());
        buf.push(self.inverse_indicator);
        buf
    }
}

/// Stock trading action message (tag `H`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockTradingAction {
    /// Stock locate code
    pub stock_locate: u16,
    /// Venue tracking number
    pub tracking_number: u16,
    /// Nanoseconds since midnight
    pub timestamp: u64,
    /// Stock symbol, space-padded
    pub stock: [u8; 8],
    /// Trading state (`H`, `P`, `Q`, `T`)
    pub trading_state: u8,
    /// Reserved byte
    pub reserved: u8,
    /// Trading action reason
    pub reason: [u8; 4],
}

impl StockTradingAction {
    /// Serialize to the wire representation
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(25);
        put_header(&mut buf, b'H', self.stock_locate, self.tracking_number, self.timestamp);
        buf.extend_from_slice(&self.stock);
        buf.push(self.trading_state);
        buf.push(self.reserved);
        buf.extend_from_slice(&self.reason);
        buf
    }
}

/// Reg SHO short sale restriction message (tag `Y`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegShoRestriction {
    /// Stock locate code
    pub stock_locate: u16,
    /// Venue tracking number
    pub tracking_number: u16,
    /// Nanoseconds since midnight
    pub timestamp: u64,
    /// Stock symbol, space-padded
    pub stock: [u8; 8],
    /// Restriction action
    pub action: u8,
}

impl RegShoRestriction {
    /// Serialize to the wire representation
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(20);
        put_header(&mut buf, b'Y', self.stock_locate, self.tracking_number, self.timestamp);
        buf.extend_from_slice(&self.stock);
        buf.push(self.action);
        buf
    }
}

/// Market participant position message (tag `L`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketParticipantPosition {
    /// Stock locate code
    pub stock_locate: u16,
    /// Venue tracking number
    pub tracking_number: u16,
    /// Nanoseconds since midnight
    pub timestamp: u64,
    /// Market participant identifier
    pub mpid: [u8; 4],
    /// Stock symbol, space-padded
    pub stock: [u8; 8],
    /// Primary market maker flag
    pub primary_market_maker: u8,
    /// Market maker mode
    pub market_maker_mode: u8,
    /// Participant state
    pub participant_state: u8,
}

impl MarketParticipantPosition {
    /// Serialize to the wire representation
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(26);
        put_header(&mut buf, b'L', self.stock_locate, self.tracking_number, self.timestamp);
        buf.extend_from_slice(&self.mpid);
        buf.extend_from_slice(&self.stock);
        buf.push(self.primary_market_maker);
        buf.push(self.market_maker_mode);
        buf.push(self.participant_state);
        buf
    }
}

/// Market-wide circuit breaker decline levels (tag `V`)
///
/// Levels are 8-byte prices with 8 implied decimal places; they stay raw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MwcbDeclineLevel {
    /// Stock locate code
    pub stock_locate: u16,
    /// Venue tracking number
    pub tracking_number: u16,
    /// Nanoseconds since midnight
    pub timestamp: u64,
    /// Level 1 decline price
    pub level1: u64,
    /// Level 2 decline price
    pub level2: u64,
    /// Level 3 decline price
    pub level3: u64,
}

impl MwcbDeclineLevel {
    /// Serialize to the wire representation
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(35);
        put_header(&mut buf, b'V', self.stock_locate, self.tracking_number, self.timestamp);
        buf.extend_from_slice(&self.level1.to_be_bytes());
        buf.extend_from_slice(&self.level2.to_be_bytes());
        buf.extend_from_slice(&self.level3.to_be_bytes());
        buf
    }
}

/// Market-wide circuit breaker breach (tag `W`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MwcbBreach {
    /// Stock locate code
    pub stock_locate: u16,
    /// Venue tracking number
    pub tracking_number: u16,
    /// Nanoseconds since midnight
    pub timestamp: u64,
    /// Breached level (`1`, `2`, `3`)
    pub breached_level: u8,
}

impl MwcbBreach {
    /// Serialize to the wire representation
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(12);
        put_header(&mut buf, b'W', self.stock_locate, self.tracking_number, self.timestamp);
        buf.push(self.breached_level);
        buf
    }
}

/// IPO quoting period update (tag `K`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpoQuotingPeriodUpdate {
    /// Stock locate code
    pub stock_locate: u16,
    /// Venue tracking number
    pub tracking_number: u16,
    /// Nanoseconds since midnight
    pub timestamp: u64,
    /// Stock symbol, space-padded
    pub stock: [u8; 8],
    /// Quotation release time, seconds since midnight
    pub release_time: u32,
    /// Release qualifier
    pub release_qualifier: u8,
    /// IPO price, 4 implied decimals
    pub ipo_price: u32,
}

impl IpoQuotingPeriodUpdate {
    /// Serialize to the wire representation
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(28);
        put_header(&mut buf, b'K', self.stock_locate, self.tracking_number, self.timestamp);
        buf.extend_from_slice(&self.stock);
        buf.extend_from_slice(&self.release_time.to_be_bytes());
        buf.push(self.release_qualifier);
        buf.extend_from_slice(&self.ipo_price.to_be_bytes());
        buf
    }
}

/// LULD auction collar message (tag `J`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LuldAuctionCollar {
    /// Stock locate code
    pub stock_locate: u16,
    /// Venue tracking number
    pub tracking_number: u16,
    /// Nanoseconds since midnight
    pub timestamp: u64,
    /// Stock symbol, space-padded
    pub stock: [u8; 8],
    /// Auction collar reference price
    pub reference_price: u32,
    /// Upper auction collar price
    pub upper_price: u32,
    /// Lower auction collar price
    pub lower_price: u32,
    /// Auction collar extension counter
    pub extension: u32,
}

impl LuldAuctionCollar {
    /// Serialize to the wire representation
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(35);
        put_header(&mut buf, b'J', self.stock_locate, self.tracking_number, self.timestamp);
        buf.extend_from_slice(&self.stock);
        buf.extend_from_slice(&self.reference_price.to_be_bytes());
        buf.extend_from_slice(&self.upper_price.to_be_bytes());
        buf.extend_from_slice(&self.lower_price.to_be_bytes());
        buf.extend_from_slice(&self.extension.to_be_bytes());
        buf
    }
}

/// Operational halt message (tag `h`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationalHalt {
    /// Stock locate code
    pub stock_locate: u16,
    /// Venue tracking number
    pub tracking_number: u16,
    /// Nanoseconds since midnight
    pub timestamp: u64,
    /// Stock symbol, space-padded
    pub stock: [u8; 8],
    /// Market on which the halt applies
    pub market_code: u8,
    /// Halt action (`H` halted, `T` resumed)
    pub halt_action: u8,
}

impl OperationalHalt {
    /// Serialize to the wire representation
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(21);
        put_header(&mut buf, b'h', self.stock_locate, self.tracking_number, self.timestamp);
        buf.extend_from_slice(&self.stock);
        buf.push(self.market_code);
        buf.push(self.halt_action);
        buf
    }
}

/// Add order message without attribution (tag `A`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddOrder {
    /// Stock locate code
    pub stock_locate: u16,
    /// Venue tracking number
    pub tracking_number: u16,
    /// Nanoseconds since midnight
    pub timestamp: u64,
    /// Order reference number
    pub order_ref: u64,
    /// Buy/sell indicator (`B` or `S`)
    pub buy_sell: u8,
    /// Displayed share count
    pub shares: u32,
    /// Stock symbol, space-padded
    pub stock: [u8; 8],
    /// Limit price, 4 implied decimals
    pub price: u32,
}

impl AddOrder {
    /// Serialize to the wire representation
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(36);
        put_header(&mut buf, b'A', self.stock_locate, self.tracking_number, self.timestamp);
        buf.extend_from_slice(&self.order_ref.to_be_bytes());
        buf.push(self.buy_sell);
        buf.extend_from_slice(&self.shares.to_be_bytes());
        buf.extend_from_slice(&self.stock);
        buf.extend_from_slice(&self.price.to_be_bytes());
        buf
    }

    /// Book side of the new order
    #[must_use]
    pub const fn side(&self) -> Option<Side> {
        Side::from_indicator(self.buy_sell)
    }
}

/// Add order message with MPID attribution (tag `F`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddOrderMpid {
    /// Stock locate code
    pub stock_locate: u16,
    /// Venue tracking number
    pub tracking_number: u16,
    /// Nanoseconds since midnight
    pub timestamp: u64,
    /// Order reference number
    pub order_ref: u64,
    /// Buy/sell indicator (`B` or `S`)
    pub buy_sell: u8,
    /// Displayed share count
    pub shares: u32,
    /// Stock symbol, space-padded
    pub stock: [u8; 8],
    /// Limit price, 4 implied decimals
    pub price: u32,
    /// Market participant attribution
    pub attribution: [u8; 4],
}

impl AddOrderMpid {
    /// Serialize to the wire representation
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(40);
        put_header(&mut buf, b'F', self.stock_locate, self.tracking_number, self.timestamp);
        buf.extend_from_slice(&self.order_ref.to_be_bytes());
        buf.push(self.buy_sell);
        buf.extend_from_slice(&self.shares.to_be_bytes());
        buf.extend_from_slice(&self.stock);
        buf.extend_from_slice(&self.price.to_be_bytes());
        buf.extend_from_slice(&self.attribution);
        buf
    }

    /// Book side of the new order
    #[must_use]
    pub const fn side(&self) -> Option<Side> {
        Side::from_indicator(self.buy_sell)
    }
}

/// Order executed message (tag `E`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderExecuted {
    /// Stock locate code
    pub stock_locate: u16,
    /// Venue tracking number
    pub tracking_number: u16,
    /// Nanoseconds since midnight
    pub timestamp: u64,
    /// Order reference number
    pub order_ref: u64,
    /// Shares executed
    pub executed_shares: u32,
    /// Match number of the print
    pub match_number: u64,
}

impl OrderExecuted {
    /// Serialize to the wire representation
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(31);
        put_header(&mut buf, b'E', self.stock_locate, self.tracking_number, self.timestamp);
        buf.extend_from_slice(&self.order_ref.to_be_bytes());
        buf.extend_from_slice(&self.executed_shares.to_be_bytes());
        buf.extend_from_slice(&self.match_number.to_be_bytes());
        buf
    }
}

/// Order executed with price message (tag `C`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderExecutedWithPrice {
    /// Stock locate code
    pub stock_locate: u16,
    /// Venue tracking number
    pub tracking_number: u16,
    /// Nanoseconds since midnight
    pub timestamp: u64,
    /// Order reference number
    pub order_ref: u64,
    /// Shares executed
    pub executed_shares: u32,
    /// Match number of the print
    pub match_number: u64,
    /// Printable flag (`Y` or `N`)
    pub printable: u8,
    /// Execution price, may differ from the resting price
    pub execution_price: u32,
}

impl OrderExecutedWithPrice {
    /// Serialize to the wire representation
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(36);
        put_header(&mut buf, b'C', self.stock_locate, self.tracking_number, self.timestamp);
        buf.extend_from_slice(&self.order_ref.to_be_bytes());
        buf.extend_from_slice(&self.executed_shares.to_be_bytes());
        buf.extend_from_slice(&self.match_number.to_be_bytes());
        buf.push(self.printable);
        buf.extend_from_slice(&self.execution_price.to_be_bytes());
        buf
    }

    /// Whether this execution is a printable trade
    #[must_use]
    pub const fn is_printable(&self) -> bool {
        self.printable == b'Y'
    }
}

/// Order cancel message (tag `X`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCancel {
    /// Stock locate code
    pub stock_locate: u16,
    /// Venue tracking number
    pub tracking_number: u16,
    /// Nanoseconds since midnight
    pub timestamp: u64,
    /// Order reference number
    pub order_ref: u64,
    /// Shares removed from the order
    pub canceled_shares: u32,
}

impl OrderCancel {
    /// Serialize to the wire representation
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(23);
        put_header(&mut buf, b'X', self.stock_locate, self.tracking_number, self.timestamp);
        buf.extend_from_slice(&self.order_ref.to_be_bytes());
        buf.extend_from_slice(&self.canceled_shares.to_be_bytes());
        buf
    }
}

/// Order delete message (tag `D`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDelete {
    /// Stock locate code
    pub stock_locate: u16,
    /// Venue tracking number
    pub tracking_number: u16,
    /// Nanoseconds since midnight
    pub timestamp: u64,
    /// Order reference number
    pub order_ref: u64,
}

impl OrderDelete {
    /// Serialize to the wire representation
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(19);
        put_header(&mut buf, b'D', self.stock_locate, self.tracking_number, self.timestamp);
        buf.extend_from_slice(&self.order_ref.to_be_bytes());
        buf
    }
}

/// Order replace message (tag `U`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReplace {
    /// Stock locate code
    pub stock_locate: u16,
    /// Venue tracking number
    pub tracking_number: u16,
    /// Nanoseconds since midnight
    pub timestamp: u64,
    /// Order reference being replaced
    pub original_ref: u64,
    /// Replacement order reference
    pub new_ref: u64,
    /// New displayed share count
    pub shares: u32,
    /// New limit price, 4 implied decimals
    pub price: u32,
}

impl OrderReplace {
    /// Serialize to the wire representation
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(35);
        put_header(&mut buf, b'U', self.stock_locate, self.tracking_number, self.timestamp);
        buf.extend_from_slice(&self.original_ref.to_be_bytes());
        buf.extend_from_slice(&self.new_ref.to_be_bytes());
        buf.extend_from_slice(&self.shares.to_be_bytes());
        buf.extend_from_slice(&self.price.to_be_bytes());
        buf
    }
}

/// Trade message for non-displayed executions (tag `P`)
///
/// The order reference may be zero for fully hidden liquidity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    /// Stock locate code
    pub stock_locate: u16,
    /// Venue tracking number
    pub tracking_number: u16,
    /// Nanoseconds since midnight
    pub timestamp: u64,
    /// Order reference number, zero when hidden
    pub order_ref: u64,
    /// Buy/sell indicator of the resting order
    pub buy_sell: u8,
    /// Shares traded
    pub shares: u32,
    /// Stock symbol, space-padded
    pub stock: [u8; 8],
    /// Trade price, 4 implied decimals
    pub price: u32,
    /// Match number of the print
    pub match_number: u64,
}

impl Trade {
    /// Serialize to the wire representation
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(44);
        put_header(&mut buf, b'P', self.stock_locate, self.tracking_number, self.timestamp);
        buf.extend_from_slice(&self.order_ref.to_be_bytes());
        buf.push(self.buy_sell);
        buf.extend_from_slice(&self.shares.to_be_bytes());
        buf.extend_from_slice(&self.stock);
        buf.extend_from_slice(&self.price.to_be_bytes());
        buf.extend_from_slice(&self.match_number.to_be_bytes());
        buf
    }

    /// Side of the resting order
    #[must_use]
    pub const fn side(&self) -> Option<Side> {
        Side::from_indicator(self.buy_sell)
    }

    /// Whether the resting order is hidden (no visible reference)
    #[must_use]
    pub const fn is_hidden(&self) -> bool {
        self.order_ref == 0
    }
}

/// Cross trade message (tag `Q`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossTrade {
    /// Stock locate code
    pub stock_locate: u16,
    /// Venue tracking number
    pub tracking_number: u16,
    /// Nanoseconds since midnight
    pub timestamp: u64,
    /// Shares matched in the cross
    pub shares: u64,
    /// Stock symbol, space-padded
    pub stock: [u8; 8],
    /// Cross price, 4 implied decimals
    pub cross_price: u32,
    /// Match number of the print
    pub match_number: u64,
    /// Cross type (`O`, `C`, `H`, `I`)
    pub cross_type: u8,
}

impl CrossTrade {
    /// Serialize to the wire representation
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(40);
        put_header(&mut buf, b'Q', self.stock_locate, self.tracking_number, self.timestamp);
        buf.extend_from_slice(&self.shares.to_be_bytes());
        buf.extend_from_slice(&self.stock);
        buf.extend_from_slice(&self.cross_price.to_be_bytes());
        buf.extend_from_slice(&self.match_number.to_be_bytes());
        buf.push(self.cross_type);
        buf
    }
}

/// Broken trade message (tag `B`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokenTrade {
    /// Stock locate code
    pub stock_locate: u16,
    /// Venue tracking number
    pub tracking_number: u16,
    /// Nanoseconds since midnight
    pub timestamp: u64,
    /// Match number of the print being broken
    pub match_number: u64,
}

impl BrokenTrade {
    /// Serialize to the wire representation
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(19);
        put_header(&mut buf, b'B', self.stock_locate, self.tracking_number, self.timestamp);
        buf.extend_from_slice(&self.match_number.to_be_bytes());
        buf
    }
}

/// Net order imbalance indicator message (tag `I`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Noii {
    /// Stock locate code
    pub stock_locate: u16,
    /// Venue tracking number
    pub tracking_number: u16,
    /// Nanoseconds since midnight
    pub timestamp: u64,
    /// Shares paired at the reference price
    pub paired_shares: u64,
    /// Imbalance share count
    pub imbalance_shares: u64,
    /// Imbalance direction (`B`, `S`, `N`, `O`)
    pub imbalance_direction: u8,
    /// Stock symbol, space-padded
    pub stock: [u8; 8],
    /// Far indicative clearing price
    pub far_price: u32,
    /// Near indicative clearing price
    pub near_price: u32,
    /// Current reference price
    pub current_reference_price: u32,
    /// Cross type the imbalance applies to
    pub cross_type: u8,
    /// Price variation indicator
    pub price_variation_indicator: u8,
}

impl Noii {
    /// Serialize to the wire representation
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(50);
        put_header(&mut buf, b'I', self.stock_locate, self.tracking_number, self.timestamp);
        buf.extend_from_slice(&self.paired_shares.to_be_bytes());
        buf.extend_from_slice(&self.imbalance_shares.to_be_bytes());
        buf.push(self.imbalance_direction);
        buf.extend_from_slice(&self.stock);
        buf.extend_from_slice(&self.far_price.to_be_bytes());
        buf.extend_from_slice(&self.near_price.to_be_bytes());
        buf.extend_from_slice(&self.current_reference_price.to_be_bytes());
        buf.push(self.cross_type);
        buf.push(self.price_variation_indicator);
        buf
    }
}

/// Retail price improvement indicator message (tag `N`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rpii {
    /// Stock locate code
    pub stock_locate: u16,
    /// Venue tracking number
    pub tracking_number: u16,
    /// Nanoseconds since midnight
    pub timestamp: u64,
    /// Stock symbol, space-padded
    pub stock: [u8; 8],
    /// Interest flag (`B`, `S`, `A`, `N`)
    pub interest: u8,
}

impl Rpii {
    /// Serialize to the wire representation
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(20);
        put_header(&mut buf, b'N', self.stock_locate, self.tracking_number, self.timestamp);
        buf.extend_from_slice(&self.stock);
        buf.push(self.interest);
        buf
    }
}

/// Direct listing with capital raise message (tag `O`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectListingCapitalRaise {
    /// Stock locate code
    pub stock_locate: u16,
    /// Venue tracking number
    pub tracking_number: u16,
    /// Nanoseconds since midnight
    pub timestamp: u64,
    /// Stock symbol, space-padded
    pub stock: [u8; 8],
    /// DLCR event type
    pub event_type: u8,
    /// Reference price
    pub reference_price: u32,
    /// Upper price limit
    pub upper_price_limit: u32,
    /// Lower price limit
    pub lower_price_limit: u32,
    /// Maximum price variation
    pub max_price_variation: u32,
    /// Offered share quantity
    pub quantity: u64,
    /// Quantity limit
    pub quantity_limit: u32,
    /// Quantity limit type
    pub quantity_limit_type: u32,
}

impl DirectListingCapitalRaise {
    /// Serialize to the wire representation
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(52);
        put_header(&mut buf, b'O', self.stock_locate, self.tracking_number, self.timestamp);
        buf.extend_from_slice(&self.stock);
        buf.push(self.event_type);
        buf.extend_from_slice(&self.reference_price.to_be_bytes());
        buf.extend_from_slice(&self.upper_price_limit.to_be_bytes());
        buf.extend_from_slice(&self.lower_price_limit.to_be_bytes());
        buf.extend_from_slice(&self.max_price_variation.to_be_bytes());
        buf.extend_from_slice(&self.quantity.to_be_bytes());
        buf.extend_from_slice(&self.quantity_limit.to_be_bytes());
        buf.extend_from_slice(&self.quantity_limit_type.to_be_bytes());
        buf
    }
}

/// A decoded ITCH 5.0 message
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ItchMessage {
    /// System event (tag `S`)
    SystemEvent(SystemEvent),
    /// Stock directory entry (tag `R`)
    StockDirectory(StockDirectory),
    /// Stock trading action (tag `H`)
    StockTradingAction(StockTradingAction),
    /// Reg SHO restriction (tag `Y`)
    RegShoRestriction(RegShoRestriction),
    /// Market participant position (tag `L`)
    MarketParticipantPosition(MarketParticipantPosition),
    /// MWCB decline levels (tag `V`)
    MwcbDeclineLevel(MwcbDeclineLevel),
    /// MWCB breach (tag `W`)
    MwcbBreach(MwcbBreach),
    /// IPO quoting period update (tag `K`)
    IpoQuotingPeriodUpdate(IpoQuotingPeriodUpdate),
    /// LULD auction collar (tag `J`)
    LuldAuctionCollar(LuldAuctionCollar),
    /// Operational halt (tag `h`)
    OperationalHalt(OperationalHalt),
    /// Add order (tag `A`)
    AddOrder(AddOrder),
    /// Add order with MPID (tag `F`)
    AddOrderMpid(AddOrderMpid),
    /// Order executed (tag `E`)
    OrderExecuted(OrderExecuted),
    /// Order executed with price (tag `C`)
    OrderExecutedWithPrice(OrderExecutedWithPrice),
    /// Order cancel (tag `X`)
    OrderCancel(OrderCancel),
    /// Order delete (tag `D`)
    OrderDelete(OrderDelete),
    /// Order replace (tag `U`)
    OrderReplace(OrderReplace),
    /// Non-displayed trade (tag `P`)
    Trade(Trade),
    /// Cross trade (tag `Q`)
    CrossTrade(CrossTrade),
    /// Broken trade (tag `B`)
    BrokenTrade(BrokenTrade),
    /// Net order imbalance indicator (tag `I`)
    Noii(Noii),
    /// Retail price improvement indicator (tag `N`)
    Rpii(Rpii),
    /// Direct listing with capital raise (tag `O`)
    DirectListingCapitalRaise(DirectListingCapitalRaise),
}

impl ItchMessage {
    /// Wire type tag of this message
    #[must_use]
    pub const fn tag(&self) -> u8 {
        match self {
            ItchMessage::SystemEvent(_) => b'S',
            ItchMessage::StockDirectory(_) => b'R',
            ItchMessage::StockTradingAction(_) => b'H',
            ItchMessage::RegShoRestriction(_) => b'Y',
            ItchMessage::MarketParticipantPosition(_) => b'L',
            ItchMessage::MwcbDeclineLevel(_) => b'V',
            ItchMessage::MwcbBreach(_) => b'W',
            ItchMessage::IpoQuotingPeriodUpdate(_) => b'K',
            ItchMessage::LuldAuctionCollar(_) => b'J',
            ItchMessage::OperationalHalt(_) => b'h',
            ItchMessage::AddOrder(_) => b'A',
            ItchMessage::AddOrderMpid(_) => b'F',
            ItchMessage::OrderExecuted(_) => b'E',
            ItchMessage::OrderExecutedWithPrice(_) => b'C',
            ItchMessage::OrderCancel(_) => b'X',
            ItchMessage::OrderDelete(_) => b'D',
            ItchMessage::OrderReplace(_) => b'U',
            ItchMessage::Trade(_) => b'P',
            ItchMessage::CrossTrade(_) => b'Q',
            ItchMessage::BrokenTrade(_) => b'B',
            ItchMessage::Noii(_) => b'I',
            ItchMessage::Rpii(_) => b'N',
            ItchMessage::DirectListingCapitalRaise(_) => b'O',
        }
    }

    /// Raw 48-bit nanosecond timestamp
    #[must_use]
    pub const fn raw_timestamp(&self) -> u64 {
        match self {
            ItchMessage::SystemEvent(m) => m.timestamp,
            ItchMessage::StockDirectory(m) => m.timestamp,
            ItchMessage::StockTradingAction(m) => m.timestamp,
            ItchMessage::RegShoRestriction(m) => m.timestamp,
            ItchMessage::MarketParticipantPosition(m) => m.timestamp,
            ItchMessage::MwcbDeclineLevel(m) => m.timestamp,
            ItchMessage::MwcbBreach(m) => m.timestamp,
            ItchMessage::IpoQuotingPeriodUpdate(m) => m.timestamp,
            ItchMessage::LuldAuctionCollar(m) => m.timestamp,
            ItchMessage::OperationalHalt(m) => m.timestamp,
            ItchMessage::AddOrder(m) => m.timestamp,
            ItchMessage::AddOrderMpid(m) => m.timestamp,
            ItchMessage::OrderExecuted(m) => m.timestamp,
            ItchMessage::OrderExecutedWithPrice(m) => m.timestamp,
            ItchMessage::OrderCancel(m) => m.timestamp,
            ItchMessage::OrderDelete(m) => m.timestamp,
            ItchMessage::OrderReplace(m) => m.timestamp,
            ItchMessage::Trade(m) => m.timestamp,
            ItchMessage::CrossTrade(m) => m.timestamp,
            ItchMessage::BrokenTrade(m) => m.timestamp,
            ItchMessage::Noii(m) => m.timestamp,
            ItchMessage::Rpii(m) => m.timestamp,
            ItchMessage::DirectListingCapitalRaise(m) => m.timestamp,
        }
    }

    /// Typed timestamp
    #[must_use]
    pub const fn timestamp(&self) -> Timestamp {
        Timestamp::from_nanos(self.raw_timestamp())
    }

    /// Stock symbol, for symbol-keyed messages
    #[must_use]
    pub const fn stock(&self) -> Option<&[u8; 8]> {
        match self {
            ItchMessage::StockDirectory(m) => Some(&m.stock),
            ItchMessage::StockTradingAction(m) => Some(&m.stock),
            ItchMessage::RegShoRestriction(m) => Some(&m.stock),
            ItchMessage::MarketParticipantPosition(m) => Some(&m.stock),
            ItchMessage::IpoQuotingPeriodUpdate(m) => Some(&m.stock),
            ItchMessage::LuldAuctionCollar(m) => Some(&m.stock),
            ItchMessage::OperationalHalt(m) => Some(&m.stock),
            ItchMessage::AddOrder(m) => Some(&m.stock),
            ItchMessage::AddOrderMpid(m) => Some(&m.stock),
            ItchMessage::Trade(m) => Some(&m.stock),
            ItchMessage::CrossTrade(m) => Some(&m.stock),
            ItchMessage::Noii(m) => Some(&m.stock),
            ItchMessage::Rpii(m) => Some(&m.stock),
            ItchMessage::DirectListingCapitalRaise(m) => Some(&m.stock),
            _ => None,
        }
    }

    /// Typed stock symbol, for symbol-keyed messages
    #[must_use]
    pub fn symbol(&self) -> Option<StockSymbol> {
        self.stock().map(|s| StockSymbol::from_bytes(*s))
    }

    /// Order reference, for order-keyed messages
    ///
    /// Replace messages answer with the original reference.
    #[must_use]
    pub const fn order_ref(&self) -> Option<u64> {
        match self {
            ItchMessage::AddOrder(m) => Some(m.order_ref),
            ItchMessage::AddOrderMpid(m) => Some(m.order_ref),
            ItchMessage::OrderExecuted(m) => Some(m.order_ref),
            ItchMessage::OrderExecutedWithPrice(m) => Some(m.order_ref),
            ItchMessage::OrderCancel(m) => Some(m.order_ref),
            ItchMessage::OrderDelete(m) => Some(m.order_ref),
            ItchMessage::OrderReplace(m) => Some(m.original_ref),
            ItchMessage::Trade(m) => Some(m.order_ref),
            _ => None,
        }
    }

    /// Match number, for print-producing and print-breaking messages
    #[must_use]
    pub const fn match_number(&self) -> Option<u64> {
        match self {
            ItchMessage::OrderExecuted(m) => Some(m.match_number),
            ItchMessage::OrderExecutedWithPrice(m) => Some(m.match_number),
            ItchMessage::Trade(m) => Some(m.match_number),
            ItchMessage::CrossTrade(m) => Some(m.match_number),
            ItchMessage::BrokenTrade(m) => Some(m.match_number),
            _ => None,
        }
    }

    /// Whether the message applies market-wide rather than to one symbol
    #[must_use]
    pub const fn is_system_wide(&self) -> bool {
        matches!(
            self,
            ItchMessage::SystemEvent(_) | ItchMessage::MwcbDeclineLevel(_) | ItchMessage::MwcbBreach(_)
        )
    }

    /// Serialize to the wire representation (tag byte included)
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            ItchMessage::SystemEvent(m) => m.to_bytes(),
            ItchMessage::StockDirectory(m) => m.to_bytes(),
            ItchMessage::StockTradingAction(m) => m.to_bytes(),
            ItchMessage::RegShoRestriction(m) => m.to_bytes(),
            ItchMessage::MarketParticipantPosition(m) => m.to_bytes(),
            ItchMessage::MwcbDeclineLevel(m) => m.to_bytes(),
            ItchMessage::MwcbBreach(m) => m.to_bytes(),
            ItchMessage::IpoQuotingPeriodUpdate(m) => m.to_bytes(),
            ItchMessage::LuldAuctionCollar(m) => m.to_bytes(),
            ItchMessage::OperationalHalt(m) => m.to_bytes(),
            ItchMessage::AddOrder(m) => m.to_bytes(),
            ItchMessage::AddOrderMpid(m) => m.to_bytes(),
            ItchMessage::OrderExecuted(m) => m.to_bytes(),
            ItchMessage::OrderExecutedWithPrice(m) => m.to_bytes(),
            ItchMessage::OrderCancel(m) => m.to_bytes(),
            ItchMessage::OrderDelete(m) => m.to_bytes(),
            ItchMessage::OrderReplace(m) => m.to_bytes(),
            ItchMessage::Trade(m) => m.to_bytes(),
            ItchMessage::CrossTrade(m) => m.to_bytes(),
            ItchMessage::BrokenTrade(m) => m.to_bytes(),
            ItchMessage::Noii(m) => m.to_bytes(),
            ItchMessage::Rpii(m) => m.to_bytes(),
            ItchMessage::DirectListingCapitalRaise(m) => m.to_bytes(),
        }
    }

    /// Validate venue code fields against the known code tables
    #[must_use]
    pub fn validate(&self) -> bool {
        match self {
            ItchMessage::SystemEvent(m) => codes::is_valid(m.code, codes::SYSTEM_EVENT),
            ItchMessage::StockTradingAction(m) => {
                codes::is_valid(m.trading_state, codes::TRADING_STATE)
            }
            ItchMessage::CrossTrade(m) => codes::is_valid(m.cross_type, codes::CROSS_TYPE),
            ItchMessage::Noii(m) => {
                codes::is_valid(m.cross_type, codes::CROSS_TYPE)
                    && codes::is_valid(m.imbalance_direction, codes::IMBALANCE_DIRECTION)
            }
            ItchMessage::Rpii(m) => codes::is_valid(m.interest, codes::RPI_INTEREST),
            ItchMessage::AddOrder(m) => m.side().is_some(),
            ItchMessage::AddOrderMpid(m) => m.side().is_some(),
            _ => true,
        }
    }
}

/// Typed view of an add order, shared by tags `A` and `F`.
///
/// Converts the raw wire fields to domain types once, at the book boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypedAdd {
    /// Order reference
    pub reference: OrderRef,
    /// Book side
    pub side: Side,
    /// Limit price
    pub price: Price,
    /// Displayed volume
    pub volume: Volume,
    /// Entry timestamp
    pub timestamp: Timestamp,
    /// Attribution, present only on tag `F`
    pub attribution: Option<Mpid>,
}

impl TypedAdd {
    /// View an unattributed add order
    #[must_use]
    pub fn from_add(msg: &AddOrder) -> Option<Self> {
        Some(Self {
            reference: OrderRef::new(msg.order_ref),
            side: msg.side()?,
            price: Price::from_raw(msg.price),
            volume: Volume::new(msg.shares),
            timestamp: Timestamp::from_nanos(msg.timestamp),
            attribution: None,
        })
    }

    /// View an attributed add order
    #[must_use]
    pub fn from_add_mpid(msg: &AddOrderMpid) -> Option<Self> {
        Some(Self {
            reference: OrderRef::new(msg.order_ref),
            side: msg.side()?,
            price: Price::from_raw(msg.price),
            volume: Volume::new(msg.shares),
            timestamp: Timestamp::from_nanos(msg.timestamp),
            attribution: Some(Mpid::from_bytes(msg.attribution)),
        })
    }
}

/// Typed view of an execution's identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypedExecution {
    /// Executed order reference
    pub reference: OrderRef,
    /// Executed volume
    pub volume: Volume,
    /// Match number of the print
    pub match_number: MatchNumber,
}

impl From<&OrderExecuted> for TypedExecution {
    fn from(msg: &OrderExecuted) -> Self {
        Self {
            reference: OrderRef::new(msg.order_ref),
            volume: Volume::new(msg.executed_shares),
            match_number: MatchNumber::new(msg.match_number),
        }
    }
}
