//! Core domain types for limit order book reconstruction.

mod price;
mod refs;
mod side;
mod status;
mod symbol;
mod timestamp;
mod volume;

pub use price::Price;
pub use refs::{MatchNumber, OrderRef};
pub use side::Side;
pub use status::TradingStatus;
pub use symbol::{Mpid, StockSymbol};
pub use timestamp::Timestamp;
pub use volume::Volume;
