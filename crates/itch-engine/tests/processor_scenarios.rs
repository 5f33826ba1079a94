//! End-to-end processor scenarios over hand-built and synthetic feeds.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::NaiveDate;
use itch_core::types::{OrderRef, Price, StockSymbol, Timestamp, Volume};
use itch_engine::{MarketEventHandler, MarketProcessor, SnapshotRecorder, TradeEvent};
use itch_feed::decoder::{decode_all, Framing};
use itch_feed::messages::*;
use itch_feed::synthetic::{SyntheticConfig, SyntheticFeed};
use itch_feed::writer::{FilterWriter, SymbolFilter};
use itch_lob::{BookSnapshot, OrderBook};

const STOCK: &[u8; 8] = b"AAPL    ";

fn processor() -> MarketProcessor {
    MarketProcessor::new(
        StockSymbol::new("AAPL"),
        NaiveDate::from_ymd_opt(2026, 1, 2).unwrap(),
    )
}

fn add(order_ref: u64, buy_sell: u8, price: u32, shares: u32, ts: u64) -> ItchMessage {
    ItchMessage::AddOrder(AddOrder {
        stock_locate: 1,
        tracking_number: 0,
        timestamp: ts,
        order_ref,
        buy_sell,
        shares,
        stock: *STOCK,
        price,
    })
}

fn exec(order_ref: u64, shares: u32, match_number: u64, ts: u64) -> ItchMessage {
    ItchMessage::OrderExecuted(OrderExecuted {
        stock_locate: 1,
        tracking_number: 0,
        timestamp: ts,
        order_ref,
        executed_shares: shares,
        match_number,
    })
}

#[test]
fn partial_execution_preserves_queue() {
    let mut p = processor();
    p.process(&add(1, b'B', 1_000_000, 500, 1_000)).unwrap();
    p.process(&add(2, b'B', 1_000_000, 300, 1_100)).unwrap();
    p.process(&exec(1, 200, 1, 1_200)).unwrap();

    let (price, volume, count) = p.book().top(itch_core::types::Side::Bid).unwrap();
    assert_eq!(price, Price::from_raw(1_000_000));
    assert_eq!(volume, Volume::new(600));
    assert_eq!(count, 2);

    let level = p.book().bid_levels().next().unwrap();
    let orders: Vec<_> = level.orders().collect();
    assert_eq!(orders[0].reference, OrderRef::new(1));
    assert_eq!(orders[0].volume, Volume::new(300));
    assert_eq!(orders[1].reference, OrderRef::new(2));
    assert_eq!(orders[1].volume, Volume::new(300));
}

#[test]
fn full_execution_removes_from_index_and_level() {
    let mut p = processor();
    p.process(&add(1, b'B', 1_000_000, 500, 1_000)).unwrap();
    p.process(&add(2, b'B', 1_000_000, 300, 1_100)).unwrap();
    p.process(&exec(1, 200, 1, 1_200)).unwrap();
    p.process(&exec(1, 300, 2, 1_300)).unwrap();

    assert!(!p.book().contains(OrderRef::new(1)));
    let level = p.book().bid_levels().next().unwrap();
    assert_eq!(level.order_count(), 1);
    assert_eq!(level.front().unwrap().reference, OrderRef::new(2));
    assert_eq!(level.front().unwrap().volume, Volume::new(300));
}

#[test]
fn replace_moves_price_and_resets_timestamp() {
    let mut p = processor();
    p.process(&add(10, b'S', 1_010_000, 100, 2_000)).unwrap();
    p.process(&ItchMessage::OrderReplace(OrderReplace {
        stock_locate: 1,
        tracking_number: 0,
        timestamp: 2_100,
        original_ref: 10,
        new_ref: 11,
        shares: 150,
        price: 1_005_000,
    }))
    .unwrap();

    assert!(!p.book().contains(OrderRef::new(10)));
    assert_eq!(p.book().depth(itch_core::types::Side::Ask), 1);
    let level = p.book().ask_levels().next().unwrap();
    assert_eq!(level.price(), Price::from_raw(1_005_000));
    let order = level.front().unwrap();
    assert_eq!(order.reference, OrderRef::new(11));
    assert_eq!(order.volume, Volume::new(150));
    assert_eq!(order.timestamp, Timestamp::from_nanos(2_100));
}

#[test]
fn cancel_to_zero_removes_order_and_level() {
    let mut p = processor();
    p.process(&add(5, b'B', 990_000, 100, 500)).unwrap();
    p.process(&ItchMessage::OrderCancel(OrderCancel {
        stock_locate: 1,
        tracking_number: 0,
        timestamp: 600,
        order_ref: 5,
        canceled_shares: 100,
    }))
    .unwrap();

    assert!(!p.book().contains(OrderRef::new(5)));
    assert_eq!(p.book().depth(itch_core::types::Side::Bid), 0);
}

#[test]
fn scheduled_snapshot_fires_before_next_mutation() {
    let mut p = processor();
    let recorder = SnapshotRecorder::new();
    p.register_scheduled_handler(Box::new(recorder), vec![Timestamp::from_nanos(1_500)]);

    // The recorder is boxed away; observe through a second scheduled probe
    // backed by shared state
    let fired: Rc<RefCell<Vec<BookSnapshot>>> = Rc::new(RefCell::new(Vec::new()));
    struct Probe(Rc<RefCell<Vec<BookSnapshot>>>);
    impl MarketEventHandler for Probe {
        fn on_snapshot(&mut self, snapshot: &BookSnapshot) {
            self.0.borrow_mut().push(snapshot.clone());
        }
    }
    p.register_scheduled_handler(
        Box::new(Probe(Rc::clone(&fired))),
        vec![Timestamp::from_nanos(1_500)],
    );

    p.process(&add(7, b'B', 1_000_000, 100, 1_000)).unwrap();
    assert!(fired.borrow().is_empty());

    p.process(&add(8, b'B', 990_000, 50, 2_000)).unwrap();
    let snapshots = fired.borrow();
    assert_eq!(snapshots.len(), 1);
    let snapshot = &snapshots[0];
    // Stamped with the scheduled time, showing only ref=7
    assert_eq!(snapshot.timestamp, Timestamp::from_nanos(1_500));
    assert_eq!(snapshot.bids.len(), 1);
    let orders = snapshot.bids[0].orders.as_ref().unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].reference, OrderRef::new(7));
}

#[test]
fn snapshot_gap_fires_all_with_same_state() {
    let fired: Rc<RefCell<Vec<BookSnapshot>>> = Rc::new(RefCell::new(Vec::new()));
    struct Probe(Rc<RefCell<Vec<BookSnapshot>>>);
    impl MarketEventHandler for Probe {
        fn on_snapshot(&mut self, snapshot: &BookSnapshot) {
            self.0.borrow_mut().push(snapshot.clone());
        }
    }

    let mut p = processor();
    p.register_scheduled_handler(
        Box::new(Probe(Rc::clone(&fired))),
        vec![
            Timestamp::from_nanos(1_200),
            Timestamp::from_nanos(1_400),
            Timestamp::from_nanos(1_600),
        ],
    );

    p.process(&add(1, b'B', 1_000_000, 100, 1_000)).unwrap();
    // One message jumps the whole schedule
    p.process(&add(2, b'B', 990_000, 50, 5_000)).unwrap();

    let snapshots = fired.borrow();
    assert_eq!(snapshots.len(), 3);
    let stamps: Vec<_> = snapshots.iter().map(|s| s.timestamp.as_nanos()).collect();
    assert_eq!(stamps, vec![1_200, 1_400, 1_600]);
    for snapshot in snapshots.iter() {
        // All three reflect only the ts=1000 add
        assert_eq!(snapshot.bids.len(), 1);
        assert_eq!(snapshot.bids[0].volume, Volume::new(100));
    }
}

#[test]
fn snapshot_timing_boundary() {
    // t1 <= t < t2: the snapshot reflects every mutation at t1 and none at
    // t2, including when t == t1 exactly
    for scheduled in [1_000u64, 1_500] {
        let fired: Rc<RefCell<Vec<BookSnapshot>>> = Rc::new(RefCell::new(Vec::new()));
        struct Probe(Rc<RefCell<Vec<BookSnapshot>>>);
        impl MarketEventHandler for Probe {
            fn on_snapshot(&mut self, snapshot: &BookSnapshot) {
                self.0.borrow_mut().push(snapshot.clone());
            }
        }
        let mut p = processor();
        p.register_scheduled_handler(
            Box::new(Probe(Rc::clone(&fired))),
            vec![Timestamp::from_nanos(scheduled)],
        );
        p.process(&add(1, b'B', 1_000_000, 100, 1_000)).unwrap();
        p.process(&add(2, b'B', 990_000, 50, 2_000)).unwrap();

        let snapshots = fired.borrow();
        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].bids.len(), 1, "scheduled at {scheduled}");
        assert_eq!(snapshots[0].bids[0].price, Price::from_raw(1_000_000));
    }
}

#[test]
fn hidden_trade_changes_no_book_state() {
    let trades: Rc<RefCell<Vec<TradeEvent>>> = Rc::new(RefCell::new(Vec::new()));
    struct Probe(Rc<RefCell<Vec<TradeEvent>>>);
    impl MarketEventHandler for Probe {
        fn on_trade(&mut self, _book: &OrderBook, event: &TradeEvent) {
            self.0.borrow_mut().push(*event);
        }
    }

    let mut p = processor();
    p.register_handler(Box::new(Probe(Rc::clone(&trades))));

    p.process(&add(1, b'B', 1_000_000, 100, 1_000)).unwrap();
    p.process(&ItchMessage::Trade(Trade {
        stock_locate: 1,
        tracking_number: 0,
        timestamp: 1_100,
        order_ref: 0,
        buy_sell: b'B',
        shares: 50,
        stock: *STOCK,
        price: 1_001_000,
        match_number: 7,
    }))
    .unwrap();

    // Book unchanged, event delivered with ref=0
    assert_eq!(p.book().order_count(), 1);
    assert_eq!(p.book().top(itch_core::types::Side::Bid).unwrap().1, Volume::new(100));
    let trades = trades.borrow();
    assert_eq!(trades.len(), 1);
    assert!(trades[0].is_hidden());
    assert_eq!(trades[0].volume, Volume::new(50));
    assert_eq!(trades[0].match_number.value(), 7);
}

#[test]
fn finalize_flushes_unreached_schedules() {
    let fired: Rc<RefCell<Vec<BookSnapshot>>> = Rc::new(RefCell::new(Vec::new()));
    struct Probe(Rc<RefCell<Vec<BookSnapshot>>>);
    impl MarketEventHandler for Probe {
        fn on_snapshot(&mut self, snapshot: &BookSnapshot) {
            self.0.borrow_mut().push(snapshot.clone());
        }
    }

    let mut p = processor();
    p.register_scheduled_handler(
        Box::new(Probe(Rc::clone(&fired))),
        vec![Timestamp::from_nanos(9_000_000)],
    );
    p.process(&add(1, b'B', 1_000_000, 100, 1_000)).unwrap();
    let _book = p.finalize();

    let snapshots = fired.borrow();
    assert_eq!(snapshots.len(), 1);
    assert_eq!(snapshots[0].timestamp, Timestamp::from_nanos(9_000_000));
    assert_eq!(snapshots[0].bids.len(), 1);
}

#[test]
fn synthetic_replay_stays_consistent() {
    let mut feed = SyntheticFeed::new(SyntheticConfig {
        stock: *STOCK,
        ..SyntheticConfig::default()
    });
    let mut p = processor();
    for message in feed.session(5_000) {
        p.process(&message).unwrap();
    }
    let live: Vec<u64> = feed.live_refs();
    let book = p.finalize();
    book.check_consistency().unwrap();
    assert_eq!(book.order_count(), live.len());
    for reference in live {
        assert!(book.contains(OrderRef::new(reference)));
    }
}

#[test]
fn filtered_feed_replays_to_same_book() {
    // A feed with two symbols interleaved; the filtered subset must
    // reconstruct the same AAPL book as the unfiltered feed
    let mut aapl = SyntheticFeed::with_seed(
        SyntheticConfig {
            stock: *STOCK,
            ..SyntheticConfig::default()
        },
        1,
    );
    let mut msft = SyntheticFeed::with_seed(
        SyntheticConfig {
            stock: *b"MSFT    ",
            ..SyntheticConfig::default()
        },
        2,
    );

    // Interleave by timestamp; MSFT references are offset to avoid
    // colliding with AAPL's day-unique reference space
    let offset = 1_000_000u64;
    let mut merged: Vec<ItchMessage> = Vec::new();
    for _ in 0..2_000 {
        merged.push(aapl.next_message());
        let mut other = msft.next_message();
        match &mut other {
            ItchMessage::AddOrder(m) => m.order_ref += offset,
            ItchMessage::OrderExecuted(m) => m.order_ref += offset,
            ItchMessage::OrderCancel(m) => m.order_ref += offset,
            ItchMessage::OrderDelete(m) => m.order_ref += offset,
            ItchMessage::OrderReplace(m) => {
                m.original_ref += offset;
                m.new_ref += offset;
            }
            _ => {}
        }
        merged.push(other);
    }
    merged.sort_by_key(ItchMessage::raw_timestamp);

    let mut writer = FilterWriter::new(Vec::new(), SymbolFilter::from_symbols(["AAPL"]));
    let mut full = processor();
    for message in &merged {
        full.process(message).unwrap();
        writer.process(message).unwrap();
    }

    let filtered_bytes = writer.finish().unwrap();
    let mut filtered = processor();
    for message in decode_all(&filtered_bytes, Framing::LengthPrefixed).unwrap() {
        filtered.process(&message).unwrap();
    }

    let full_book = full.finalize();
    let filtered_book = filtered.finalize();
    let at = Timestamp::from_nanos(0);
    assert_eq!(
        full_book.snapshot(at, None, true),
        filtered_book.snapshot(at, None, true)
    );
    assert!(!full_book.is_empty());
}
