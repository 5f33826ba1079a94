//! ITCH 5.0 binary decoder.
//!
//! Records start with a one-byte ASCII tag; every tag has a fixed total
//! length. All integers are big-endian and timestamps are 48-bit values
//! carried as a 16-bit high part and a 32-bit low part. The decoder must be
//! exact to the byte: any misalignment corrupts every subsequent record.

use nom::{
    bytes::complete::take,
    number::complete::{be_u16, be_u32, be_u64, be_u8},
    IResult,
};

use crate::error::{FeedError, FeedResult};
use crate::messages::*;

/// Fixed total length (tag byte included) for a message tag.
///
/// This table is the single parameterization point for the wire revision:
/// a different protocol version swaps the table, not the parsers' shape.
#[must_use]
pub const fn message_length(tag: u8) -> Option<usize> {
    match tag {
        b'S' => Some(12),
        b'R' => Some(39),
        b'H' => Some(25),
        b'Y' => Some(20),
        b'L' => Some(26),
        b'V' => Some(35),
        b'W' => Some(12),
        b'K' => Some(28),
        b'J' => Some(35),
        b'h' => Some(21),
        b'A' => Some(36),
        b'F' => Some(40),
        b'E' => Some(31),
        b'C' => Some(36),
        b'X' => Some(23),
        b'D' => Some(19),
        b'U' => Some(35),
        b'P' => Some(44),
        b'Q' => Some(40),
        b'B' => Some(19),
        b'I' => Some(50),
        b'N' => Some(20),
        b'O' => Some(52),
        _ => None,
    }
}

/// Framing mode of the byte stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Framing {
    /// Each record preceded by a 16-bit big-endian length (persisted feeds)
    #[default]
    LengthPrefixed,
    /// Records follow each other directly; lengths come from the tag table
    Tagged,
}

fn parse_timestamp(input: &[u8]) -> IResult<&[u8], u64> {
    let (input, high) = be_u16(input)?;
    let (input, low) = be_u32(input)?;
    Ok((input, (u64::from(high) << 32) | u64::from(low)))
}

fn parse_header(input: &[u8]) -> IResult<&[u8], (u16, u16, u64)> {
    let (input, stock_locate) = be_u16(input)?;
    let (input, tracking_number) = be_u16(input)?;
    let (input, timestamp) = parse_timestamp(input)?;
    Ok((input, (stock_locate, tracking_number, timestamp)))
}

fn take_array<const N: usize>(input: &[u8]) -> IResult<&[u8], [u8; N]> {
    let (input, bytes) = take(N)(input)?;
    let mut out = [0u8; N];
    out.copy_from_slice(bytes);
    Ok((input, out))
}

fn parse_system_event(input: &[u8]) -> IResult<&[u8], SystemEvent> {
    let (input, (stock_locate, tracking_number, timestamp)) = parse_header(input)?;
    let (input, code) = be_u8(input)?;
    Ok((
        input,
        SystemEvent {
            stock_locate,
            tracking_number,
            timestamp,
            code,
        },
    ))
}

fn parse_stock_directory(input: &[u8]) -> IResult<&[u8], StockDirectory> {
    let (input, (stock_locate, tracking_number, timestamp)) = parse_header(input)?;
    let (input, stock) = take_array::<8>(input)?;
    let (input, market_category) = be_u8(input)?;
    let (input, financial_status) = be_u8(input)?;
    let (input, round_lot_size) = be_u32(input)?;
    let (input, round_lots_only) = be_u8(input)?;
    let (input, issue_classification) = be_u8(input)?;
    let (input, issue_subtype) = take_array::<2>(input)?;
    let (input, authenticity) = be_u8(input)?;
    let (input, short_sale_threshold) = be_u8(input)?;
    let (input, ipo_flag) = be_u8(input)?;
    let (input, luld_reference_tier) = be_u8(input)?;
    let (input, etp_flag) = be_u8(input)?;
    let (input, etp_leverage_factor) = be_u32(input)?;
    let (input, inverse_indicator) = be_u8(input)?;
    Ok((
        input,
        StockDirectory {
            stock_locate,
            tracking_number,
            timestamp,
            stock,
            market_category,
            financial_status,
            round_lot_size,
            round_lots_only,
            issue_classification,
            issue_subtype,
            authenticity,
            short_sale_threshold,
            ipo_flag,
            luld_reference_tier,
            etp_flag,
            etp_leverage_factor,
            inverse_indicator,
        },
    ))
}

fn parse_stock_trading_action(input: &[u8]) -> IResult<&[u8], StockTradingAction> {
    let (input, (stock_locate, tracking_number, timestamp)) = parse_header(input)?;
    let (input, stock) = take_array::<8>(input)?;
    let (input, trading_state) = be_u8(input)?;
    let (input, reserved) = be_u8(input)?;
    let (input, reason) = take_array::<4>(input)?;
    Ok((
        input,
        StockTradingAction {
            stock_locate,
            tracking_number,
            timestamp,
            stock,
            trading_state,
            reserved,
            reason,
        },
    ))
}

fn parse_reg_sho(input: &[u8]) -> IResult<&[u8], RegShoRestriction> {
    let (input, (stock_locate, tracking_number, timestamp)) = parse_header(input)?;
    let (input, stock) = take_array::<8>(input)?;
    let (input, action) = be_u8(input)?;
    Ok((
        input,
        RegShoRestriction {
            stock_locate,
            tracking_number,
            timestamp,
            stock,
            action,
        },
    ))
}

fn parse_market_participant(input: &[u8]) -> IResult<&[u8], MarketParticipantPosition> {
    let (input, (stock_locate, tracking_number, timestamp)) = parse_header(input)?;
    let (input, mpid) = take_array::<4>(input)?;
    let (input, stock) = take_array::<8>(input)?;
    let (input, primary_market_maker) = be_u8(input)?;
    let (input, market_maker_mode) = be_u8(input)?;
    let (input, participant_state) = be_u8(input)?;
    Ok((
        input,
        MarketParticipantPosition {
            stock_locate,
            tracking_number,
            timestamp,
            mpid,
            stock,
            primary_market_maker,
            market_maker_mode,
            participant_state,
        },
    ))
}

fn parse_mwcb_decline(input: &[u8]) -> IResult<&[u8], MwcbDeclineLevel> {
    let (input, (stock_locate, tracking_number, timestamp)) = parse_header(input)?;
    let (input, level1) = be_u64(input)?;
    let (input, level2) = be_u64(input)?;
    let (input, level3) = be_u64(input)?;
    Ok((
        input,
        MwcbDeclineLevel {
            stock_locate,
            tracking_number,
            timestamp,
            level1,
            level2,
            level3,
        },
    ))
}

fn parse_mwcb_breach(input: &[u8]) -> IResult<&[u8], MwcbBreach> {
    let (input, (stock_locate, tracking_number, timestamp)) = parse_header(input)?;
    let (input, breached_level) = be_u8(input)?;
    Ok((
        input,
        MwcbBreach {
            stock_locate,
            tracking_number,
            timestamp,
            breached_level,
        },
    ))
}

fn parse_ipo_quoting(input: &[u8]) -> IResult<&[u8], IpoQuotingPeriodUpdate> {
    let (input, (stock_locate, tracking_number, timestamp)) = parse_header(input)?;
    let (input, stock) = take_array::<8>(input)?;
    let (input, release_time) = be_u32(input)?;
    let (input, release_qualifier) = be_u8(input)?;
    let (input, ipo_price) = be_u32(input)?;
    Ok((
        input,
        IpoQuotingPeriodUpdate {
            stock_locate,
            tracking_number,
            timestamp,
            stock,
            release_time,
            release_qualifier,
            ipo_price,
        },
    ))
}

fn parse_luld_collar(input: &[u8]) -> IResult<&[u8], LuldAuctionCollar> {
    let (input, (stock_locate, tracking_number, timestamp)) = parse_header(input)?;
    let (input, stock) = take_array::<8>(input)?;
    let (input, reference_price) = be_u32(input)?;
    let (input, upper_price) = be_u32(input)?;
    let (input, lower_price) = be_u32(input)?;
    let (input, extension) = be_u32(input)?;
    Ok((
        input,
        LuldAuctionCollar {
            stock_locate,
            tracking_number,
            timestamp,
            stock,
            reference_price,
            upper_price,
            lower_price,
            extension,
        },
    ))
}

fn parse_operational_halt(input: &[u8]) -> IResult<&[u8], OperationalHalt> {
    let (input, (stock_locate, tracking_number, timestamp)) = parse_header(input)?;
    let (input, stock) = take_array::<8>(input)?;
    let (input, market_code) = be_u8(input)?;
    let (input, halt_action) = be_u8(input)?;
    Ok((
        input,
        OperationalHalt {
            stock_locate,
            tracking_number,
            timestamp,
            stock,
            market_code,
            halt_action,
        },
    ))
}

fn parse_add_order(input: &[u8]) -> IResult<&[u8], AddOrder> {
    let (input, (stock_locate, tracking_number, timestamp)) = parse_header(input)?;
    let (input, order_ref) = be_u64(input)?;
    let (input, buy_sell) = be_u8(input)?;
    let (input, shares) = be_u32(input)?;
    let (input, stock) = take_array::<8>(input)?;
    let (input, price) = be_u32(input)?;
    Ok((
        input,
        AddOrder {
            stock_locate,
            tracking_number,
            timestamp,
            order_ref,
            buy_sell,
            shares,
            stock,
            price,
        },
    ))
}

fn parse_add_order_mpid(input: &[u8]) -> IResult<&[u8], AddOrderMpid> {
    let (input, add) = parse_add_order(input)?;
    let (input, attribution) = take_array::<4>(input)?;
    Ok((
        input,
        AddOrderMpid {
            stock_locate: add.stock_locate,
            tracking_number: add.tracking_number,
            timestamp: add.timestamp,
            order_ref: add.order_ref,
            buy_sell: add.buy_sell,
            shares: add.shares,
            stock: add.stock,
            price: add.price,
            attribution,
        },
    ))
}

fn parse_order_executed(input: &[u8]) -> IResult<&[u8], OrderExecuted> {
    let (input, (stock_locate, tracking_number, timestamp)) = parse_header(input)?;
    let (input, order_ref) = be_u64(input)?;
    let (input, executed_shares) = be_u32(input)?;
    let (input, match_number) = be_u64(input)?;
    Ok((
        input,
        OrderExecuted {
            stock_locate,
            tracking_number,
            timestamp,
            order_ref,
            executed_shares,
            match_number,
        },
    ))
}

fn parse_order_executed_with_price(input: &[u8]) -> IResult<&[u8], OrderExecutedWithPrice> {
    let (input, exec) = parse_order_executed(input)?;
    let (input, printable) = be_u8(input)?;
    let (input, execution_price) = be_u32(input)?;
    Ok((
        input,
        OrderExecutedWithPrice {
            stock_locate: exec.stock_locate,
            tracking_number: exec.tracking_number,
            timestamp: exec.timestamp,
            order_ref: exec.order_ref,
            executed_shares: exec.executed_shares,
            match_number: exec.match_number,
            printable,
            execution_price,
        },
    ))
}

fn parse_order_cancel(input: &[u8]) -> IResult<&[u8], OrderCancel> {
    let (input, (stock_locate, tracking_number, timestamp)) = parse_header(input)?;
    let (input, order_ref) = be_u64(input)?;
    let (input, canceled_shares) = be_u32(input)?;
    Ok((
        input,
        OrderCancel {
            stock_locate,
            tracking_number,
            timestamp,
            order_ref,
            canceled_shares,
        },
    ))
}

fn parse_order_delete(input: &[u8]) -> IResult<&[u8], OrderDelete> {
    let (input, (stock_locate, tracking_number, timestamp)) = parse_header(input)?;
    let (input, order_ref) = be_u64(input)?;
    Ok((
        input,
        OrderDelete {
            stock_locate,
            tracking_number,
            timestamp,
            order_ref,
        },
    ))
}

fn parse_order_replace(input: &[u8]) -> IResult<&[u8], OrderReplace> {
    let (input, (stock_locate, tracking_number, timestamp)) = parse_header(input)?;
    let (input, original_ref) = be_u64(input)?;
    let (input, new_ref) = be_u64(input)?;
    let (input, shares) = be_u32(input)?;
    let (input, price) = be_u32(input)?;
    Ok((
        input,
        OrderReplace {
            stock_locate,
            tracking_number,
            timestamp,
            original_ref,
            new_ref,
            shares,
            price,
        },
    ))
}

fn parse_trade(input: &[u8]) -> IResult<&[u8], Trade> {
    let (input, (stock_locate, tracking_number, timestamp)) = parse_header(input)?;
    let (input, order_ref) = be_u64(input)?;
    let (input, buy_sell) = be_u8(input)?;
    let (input, shares) = be_u32(input)?;
    let (input, stock) = take_array::<8>(input)?;
    let (input, price) = be_u32(input)?;
    let (input, match_number) = be_u64(input)?;
    Ok((
        input,
        Trade {
            stock_locate,
            tracking_number,
            timestamp,
            order_ref,
            buy_sell,
            shares,
            stock,
            price,
            match_number,
        },
    ))
}

fn parse_cross_trade(input: &[u8]) -> IResult<&[u8], CrossTrade> {
    let (input, (stock_locate, tracking_number, timestamp)) = parse_header(input)?;
    let (input, shares) = be_u64(input)?;
    let (input, stock) = take_array::<8>(input)?;
    let (input, cross_price) = be_u32(input)?;
    let (input, match_number) = be_u64(input)?;
    let (input, cross_type) = be_u8(input)?;
    Ok((
        input,
        CrossTrade {
            stock_locate,
            tracking_number,
            timestamp,
            shares,
            stock,
            cross_price,
            match_number,
            cross_type,
        },
    ))
}

fn parse_broken_trade(input: &[u8]) -> IResult<&[u8], BrokenTrade> {
    let (input, (stock_locate, tracking_number, timestamp)) = parse_header(input)?;
    let (input, match_number) = be_u64(input)?;
    Ok((
        input,
        BrokenTrade {
            stock_locate,
            tracking_number,
            timestamp,
            match_number,
        },
    ))
}

fn parse_noii(input: &[u8]) -> IResult<&[u8], Noii> {
    let (input, (stock_locate, tracking_number, timestamp)) = parse_header(input)?;
    let (input, paired_shares) = be_u64(input)?;
    let (input, imbalance_shares) = be_u64(input)?;
    let (input, imbalance_direction) = be_u8(input)?;
    let (input, stock) = take_array::<8>(input)?;
    let (input, far_price) = be_u32(input)?;
    let (input, near_price) = be_u32(input)?;
    let (input, current_reference_price) = be_u32(input)?;
    let (input, cross_type) = be_u8(input)?;
    let (input, price_variation_indicator) = be_u8(input)?;
    Ok((
        input,
        Noii {
            stock_locate,
            tracking_number,
            timestamp,
            paired_shares,
            imbalance_shares,
            imbalance_direction,
            stock,
            far_price,
            near_price,
            current_reference_price,
            cross_type,
            price_variation_indicator,
        },
    ))
}

fn parse_rpii(input: &[u8]) -> IResult<&[u8], Rpii> {
    let (input, (stock_locate, tracking_number, timestamp)) = parse_header(input)?;
    let (input, stock) = take_array::<8>(input)?;
    let (input, interest) = be_u8(input)?;
    Ok((
        input,
        Rpii {
            stock_locate,
            tracking_number,
            timestamp,
            stock,
            interest,
        },
    ))
}

fn parse_dlcr(input: &[u8]) -> IResult<&[u8], DirectListingCapitalRaise> {
    let (input, (stock_locate, tracking_number, timestamp)) = parse_header(input)?;
    let (input, stock) = take_array::<8>(input)?;
    let (input, event_type) = be_u8(input)?;
    let (input, reference_price) = be_u32(input)?;
    let (input, upper_price_limit) = be_u32(input)?;
    let (input, lower_price_limit) = be_u32(input)?;
    let (input, max_price_variation) = be_u32(input)?;
    let (input, quantity) = be_u64(input)?;
    let (input, quantity_limit) = be_u32(input)?;
    let (input, quantity_limit_type) = be_u32(input)?;
    Ok((
        input,
        DirectListingCapitalRaise {
            stock_locate,
            tracking_number,
            timestamp,
            stock,
            event_type,
            reference_price,
            upper_price_limit,
            lower_price_limit,
            max_price_variation,
            quantity,
            quantity_limit,
            quantity_limit_type,
        },
    ))
}

/// Decode one message from its wire payload (tag byte included).
///
/// The payload length must equal the tag's fixed length exactly.
///
/// # Errors
///
/// `UnknownType` for an unrecognized tag, `LengthMismatch` when the payload
/// length disagrees with the tag table, `TruncatedStream` on an empty
/// payload, `Parse` on a malformed body.
pub fn decode_message(payload: &[u8]) -> FeedResult<ItchMessage> {
    let Some(&tag) = payload.first() else {
        return Err(FeedError::TruncatedStream { needed: 1 });
    };
    let expected = message_length(tag).ok_or(FeedError::UnknownType(tag))?;
    if payload.len() != expected {
        return Err(FeedError::LengthMismatch {
            expected,
            actual: payload.len(),
        });
    }
    let body = &payload[1..];

    let message = match tag {
        b'S' => ItchMessage::SystemEvent(parse_system_event(body)?.1),
        b'R' => ItchMessage::StockDirectory(parse_stock_directory(body)?.1),
        b'H' => ItchMessage::StockTradingAction(parse_stock_trading_action(body)?.1),
        b'Y' => ItchMessage::RegShoRestriction(parse_reg_sho(body)?.1),
        b'L' => ItchMessage::MarketParticipantPosition(parse_market_participant(body)?.1),
        b'V' => ItchMessage::MwcbDeclineLevel(parse_mwcb_decline(body)?.1),
        b'W' => ItchMessage::MwcbBreach(parse_mwcb_breach(body)?.1),
        b'K' => ItchMessage::IpoQuotingPeriodUpdate(parse_ipo_quoting(body)?.1),
        b'J' => ItchMessage::LuldAuctionCollar(parse_luld_collar(body)?.1),
        b'h' => ItchMessage::OperationalHalt(parse_operational_halt(body)?.1),
        b'A' => ItchMessage::AddOrder(parse_add_order(body)?.1),
        b'F' => ItchMessage::AddOrderMpid(parse_add_order_mpid(body)?.1),
        b'E' => ItchMessage::OrderExecuted(parse_order_executed(body)?.1),
        b'C' => ItchMessage::OrderExecutedWithPrice(parse_order_executed_with_price(body)?.1),
        b'X' => ItchMessage::OrderCancel(parse_order_cancel(body)?.1),
        b'D' => ItchMessage::OrderDelete(parse_order_delete(body)?.1),
        b'U' => ItchMessage::OrderReplace(parse_order_replace(body)?.1),
        b'P' => ItchMessage::Trade(parse_trade(body)?.1),
        b'Q' => ItchMessage::CrossTrade(parse_cross_trade(body)?.1),
        b'B' => ItchMessage::BrokenTrade(parse_broken_trade(body)?.1),
        b'I' => ItchMessage::Noii(parse_noii(body)?.1),
        b'N' => ItchMessage::Rpii(parse_rpii(body)?.1),
        b'O' => ItchMessage::DirectListingCapitalRaise(parse_dlcr(body)?.1),
        _ => return Err(FeedError::UnknownType(tag)),
    };

    Ok(message)
}

/// Step one frame off the front of a buffer.
///
/// Returns the decoded message and the remaining input.
///
/// # Errors
///
/// `TruncatedStream` when the buffer ends mid-record; decode errors pass
/// through from [`decode_message`].
pub fn next_frame(input: &[u8], framing: Framing) -> FeedResult<(ItchMessage, &[u8])> {
    match framing {
        Framing::LengthPrefixed => {
            if input.len() < 2 {
                return Err(FeedError::TruncatedStream {
                    needed: 2 - input.len(),
                });
            }
            let length = usize::from(u16::from_be_bytes([input[0], input[1]]));
            let end = 2 + length;
            if input.len() < end {
                return Err(FeedError::TruncatedStream {
                    needed: end - input.len(),
                });
            }
            let message = decode_message(&input[2..end])?;
            Ok((message, &input[end..]))
        }
        Framing::Tagged => {
            let Some(&tag) = input.first() else {
                return Err(FeedError::TruncatedStream { needed: 1 });
            };
            let length = message_length(tag).ok_or(FeedError::UnknownType(tag))?;
            if input.len() < length {
                return Err(FeedError::TruncatedStream {
                    needed: length - input.len(),
                });
            }
            let message = decode_message(&input[..length])?;
            Ok((message, &input[length..]))
        }
    }
}

/// Decode every frame in a buffer.
///
/// # Errors
///
/// Any frame error ends decoding; frames decoded so far are discarded with
/// the error, since a misaligned stream cannot be trusted.
pub fn decode_all(mut input: &[u8], framing: Framing) -> FeedResult<Vec<ItchMessage>> {
    let mut messages = Vec::new();
    while !input.is_empty() {
        let (message, rest) = next_frame(input, framing)?;
        messages.push(message);
        input = rest;
    }
    Ok(messages)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_add() -> AddOrder {
        AddOrder {
            stock_locate: 7,
            tracking_number: 2,
            timestamp: 34_200_000_000_123,
            order_ref: 1_234_567,
            buy_sell: b'B',
            shares: 500,
            stock: *b"AAPL    ",
            price: 1_000_000,
        }
    }

    fn all_variants() -> Vec<ItchMessage> {
        vec![
            ItchMessage::SystemEvent(SystemEvent {
                stock_locate: 0,
                tracking_number: 0,
                timestamp: 100,
                code: b'Q',
            }),
            ItchMessage::StockDirectory(StockDirectory {
                stock_locate: 1,
                tracking_number: 0,
                timestamp: 200,
                stock: *b"AAPL    ",
                market_category: b'Q',
                financial_status: b'N',
                round_lot_size: 100,
                round_lots_only: b'N',
                issue_classification: b'C',
                issue_subtype: *b"Z ",
                authenticity: b'P',
                short_sale_threshold: b'N',
                ipo_flag: b'N',
                luld_reference_tier: b'1',
                etp_flag: b'N',
                etp_leverage_factor: 0,
                inverse_indicator: b'N',
            }),
            ItchMessage::StockTradingAction(StockTradingAction {
                stock_locate: 1,
                tracking_number: 0,
                timestamp: 300,
                stock: *b"AAPL    ",
                trading_state: b'T',
                reserved: b' ',
                reason: *b"    ",
            }),
            ItchMessage::RegShoRestriction(RegShoRestriction {
                stock_locate: 1,
                tracking_number: 0,
                timestamp: 400,
                stock: *b"AAPL    ",
                action: b'0',
            }),
            ItchMessage::MarketParticipantPosition(MarketParticipantPosition {
                stock_locate: 1,
                tracking_number: 0,
                timestamp: 500,
                mpid: *b"GSCO",
                stock: *b"AAPL    ",
                primary_market_maker: b'Y',
                market_maker_mode: b'N',
                participant_state: b'A',
            }),
            ItchMessage::MwcbDeclineLevel(MwcbDeclineLevel {
                stock_locate: 0,
                tracking_number: 0,
                timestamp: 600,
                level1: 3_500_000_000_000,
                level2: 3_300_000_000_000,
                level3: 3_000_000_000_000,
            }),
            ItchMessage::MwcbBreach(MwcbBreach {
                stock_locate: 0,
                tracking_number: 0,
                timestamp: 700,
                breached_level: b'1',
            }),
            ItchMessage::IpoQuotingPeriodUpdate(IpoQuotingPeriodUpdate {
                stock_locate: 1,
                tracking_number: 0,
                timestamp: 800,
                stock: *b"NEWCO   ",
                release_time: 34_200,
                release_qualifier: b'A',
                ipo_price: 180_000,
            }),
            ItchMessage::LuldAuctionCollar(LuldAuctionCollar {
                stock_locate: 1,
                tracking_number: 0,
                timestamp: 900,
                stock: *b"AAPL    ",
                reference_price: 1_000_000,
                upper_price: 1_100_000,
                lower_price: 900_000,
                extension: 0,
            }),
            ItchMessage::OperationalHalt(OperationalHalt {
                stock_locate: 1,
                tracking_number: 0,
                timestamp: 1_000,
                stock: *b"AAPL    ",
                market_code: b'Q',
                halt_action: b'H',
            }),
            ItchMessage::AddOrder(sample_add()),
            ItchMessage::AddOrderMpid(AddOrderMpid {
                stock_locate: 7,
                tracking_number: 2,
                timestamp: 1_200,
                order_ref: 1_234_568,
                buy_sell: b'S',
                shares: 300,
                stock: *b"AAPL    ",
                price: 1_001_000,
                attribution: *b"JPMS",
            }),
            ItchMessage::OrderExecuted(OrderExecuted {
                stock_locate: 7,
                tracking_number: 2,
                timestamp: 1_300,
                order_ref: 1_234_567,
                executed_shares: 200,
                match_number: 9_001,
            }),
            ItchMessage::OrderExecutedWithPrice(OrderExecutedWithPrice {
                stock_locate: 7,
                tracking_number: 2,
                timestamp: 1_400,
                order_ref: 1_234_567,
                executed_shares: 100,
                match_number: 9_002,
                printable: b'Y',
                execution_price: 1_000_500,
            }),
            ItchMessage::OrderCancel(OrderCancel {
                stock_locate: 7,
                tracking_number: 2,
                timestamp: 1_500,
                order_ref: 1_234_568,
                canceled_shares: 100,
            }),
            ItchMessage::OrderDelete(OrderDelete {
                stock_locate: 7,
                tracking_number: 2,
                timestamp: 1_600,
                order_ref: 1_234_568,
            }),
            ItchMessage::OrderReplace(OrderReplace {
                stock_locate: 7,
                tracking_number: 2,
                timestamp: 1_700,
                original_ref: 1_234_567,
                new_ref: 1_234_569,
                shares: 150,
                price: 1_005_000,
            }),
            ItchMessage::Trade(Trade {
                stock_locate: 7,
                tracking_number: 2,
                timestamp: 1_800,
                order_ref: 0,
                buy_sell: b'B',
                shares: 50,
                stock: *b"AAPL    ",
                price: 1_001_000,
                match_number: 9_003,
            }),
            ItchMessage::CrossTrade(CrossTrade {
                stock_locate: 7,
                tracking_number: 2,
                timestamp: 1_900,
                shares: 100_000,
                stock: *b"AAPL    ",
                cross_price: 1_000_000,
                match_number: 9_004,
                cross_type: b'O',
            }),
            ItchMessage::BrokenTrade(BrokenTrade {
                stock_locate: 7,
                tracking_number: 2,
                timestamp: 2_000,
                match_number: 9_003,
            }),
            ItchMessage::Noii(Noii {
                stock_locate: 7,
                tracking_number: 2,
                timestamp: 2_100,
                paired_shares: 10_000,
                imbalance_shares: 500,
                imbalance_direction: b'B',
                stock: *b"AAPL    ",
                far_price: 1_000_000,
                near_price: 1_000_500,
                current_reference_price: 1_000_000,
                cross_type: b'O',
                price_variation_indicator: b'L',
            }),
            ItchMessage::Rpii(Rpii {
                stock_locate: 7,
                tracking_number: 2,
                timestamp: 2_200,
                stock: *b"AAPL    ",
                interest: b'A',
            }),
            ItchMessage::DirectListingCapitalRaise(DirectListingCapitalRaise {
                stock_locate: 7,
                tracking_number: 2,
                timestamp: 2_300,
                stock: *b"NEWCO   ",
                event_type: b'O',
                reference_price: 180_000,
                upper_price_limit: 200_000,
                lower_price_limit: 160_000,
                max_price_variation: 10_000,
                quantity: 1_000_000,
                quantity_limit: 500_000,
                quantity_limit_type: 1,
            }),
        ]
    }

    #[test]
    fn test_roundtrip_all_variants() {
        for message in all_variants() {
            let bytes = message.to_bytes();
            assert_eq!(
                bytes.len(),
                message_length(message.tag()).unwrap(),
                "wire length for tag {}",
                message.tag() as char
            );
            let decoded = decode_message(&bytes).unwrap();
            assert_eq!(decoded, message, "roundtrip for tag {}", message.tag() as char);
        }
    }

    #[test]
    fn test_encode_decode_bytes_identical() {
        for message in all_variants() {
            let bytes = message.to_bytes();
            let decoded = decode_message(&bytes).unwrap();
            assert_eq!(decoded.to_bytes(), bytes);
        }
    }

    #[test]
    fn test_unknown_type() {
        let payload = [b'z', 0, 0, 0, 0];
        assert_eq!(decode_message(&payload), Err(FeedError::UnknownType(b'z')));
    }

    #[test]
    fn test_length_mismatch() {
        let mut bytes = ItchMessage::AddOrder(sample_add()).to_bytes();
        bytes.pop();
        assert_eq!(
            decode_message(&bytes),
            Err(FeedError::LengthMismatch {
                expected: 36,
                actual: 35
            })
        );
    }

    #[test]
    fn test_48_bit_timestamp() {
        let mut add = sample_add();
        add.timestamp = (1 << 48) - 1;
        let decoded = decode_message(&add.to_bytes()).unwrap();
        assert_eq!(decoded.raw_timestamp(), (1 << 48) - 1);
    }

    #[test]
    fn test_length_prefixed_stream() {
        let mut stream = Vec::new();
        for message in all_variants() {
            let bytes = message.to_bytes();
            stream.extend_from_slice(&(bytes.len() as u16).to_be_bytes());
            stream.extend_from_slice(&bytes);
        }
        let decoded = decode_all(&stream, Framing::LengthPrefixed).unwrap();
        assert_eq!(decoded, all_variants());
    }

    #[test]
    fn test_tagged_stream() {
        let mut stream = Vec::new();
        for message in all_variants() {
            stream.extend_from_slice(&message.to_bytes());
        }
        let decoded = decode_all(&stream, Framing::Tagged).unwrap();
        assert_eq!(decoded, all_variants());
    }

    #[test]
    fn test_truncated_stream() {
        let bytes = ItchMessage::AddOrder(sample_add()).to_bytes();
        let mut stream = Vec::new();
        stream.extend_from_slice(&(bytes.len() as u16).to_be_bytes());
        stream.extend_from_slice(&bytes[..10]);
        let err = decode_all(&stream, Framing::LengthPrefixed).unwrap_err();
        assert!(matches!(err, FeedError::TruncatedStream { .. }));
    }
}
