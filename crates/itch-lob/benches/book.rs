//! Benchmarks for order book mutations.

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use itch_core::types::{MatchNumber, OrderRef, Price, Side, StockSymbol, Timestamp, Volume};
use itch_lob::OrderBook;

fn populated_book(orders_per_side: u64) -> OrderBook {
    let mut book = OrderBook::new(
        StockSymbol::new("BENCH"),
        NaiveDate::from_ymd_opt(2026, 1, 2).unwrap(),
    );
    for i in 0..orders_per_side {
        book.add(
            OrderRef::new(i + 1),
            Side::Bid,
            Price::from_raw(1_000_000 - (i as u32 % 50) * 100),
            Volume::new(100),
            Timestamp::from_nanos(1_000 + i),
            None,
        )
        .unwrap();
        book.add(
            OrderRef::new(100_000 + i + 1),
            Side::Ask,
            Price::from_raw(1_010_000 + (i as u32 % 50) * 100),
            Volume::new(100),
            Timestamp::from_nanos(1_000 + i),
            None,
        )
        .unwrap();
    }
    book
}

fn bench_book(c: &mut Criterion) {
    let mut group = c.benchmark_group("book");

    group.bench_function("add_delete_cycle", |b| {
        let mut book = populated_book(1_000);
        let mut next = 500_000u64;
        b.iter(|| {
            next += 1;
            book.add(
                OrderRef::new(next),
                Side::Bid,
                Price::from_raw(995_000),
                Volume::new(100),
                Timestamp::from_nanos(next),
                None,
            )
            .unwrap();
            book.delete(OrderRef::new(next)).unwrap();
        });
    });

    group.bench_function("execute_partial", |b| {
        let mut book = populated_book(1_000);
        let mut match_number = 0u64;
        b.iter(|| {
            match_number += 1;
            // One-share partials never drain the resting order
            let _ = book.execute(
                OrderRef::new(1),
                Volume::new(1),
                MatchNumber::new(match_number),
            );
        });
    });

    group.bench_function("top_of_book", |b| {
        let book = populated_book(1_000);
        b.iter(|| {
            let _ = black_box(book.best_bid());
            let _ = black_box(book.best_ask());
        });
    });

    group.bench_function("snapshot_depth_10", |b| {
        let book = populated_book(1_000);
        b.iter(|| book.snapshot(Timestamp::from_nanos(1), black_box(Some(10)), false));
    });

    group.finish();
}

criterion_group!(benches, bench_book);
criterion_main!(benches);
