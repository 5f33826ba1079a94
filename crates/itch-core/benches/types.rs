//! Benchmarks for core type operations.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use itch_core::types::{Price, StockSymbol, Timestamp, Volume};

fn bench_type_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("types");

    group.bench_function("price_from_raw", |b| {
        b.iter(|| Price::from_raw(black_box(1_002_500)));
    });

    group.bench_function("price_as_f64", |b| {
        let price = Price::from_raw(1_002_500);
        b.iter(|| black_box(price).as_f64());
    });

    group.bench_function("volume_checked_sub", |b| {
        let v1 = Volume::new(500);
        let v2 = Volume::new(200);
        b.iter(|| black_box(v1).checked_sub(black_box(v2)));
    });

    group.bench_function("symbol_eq", |b| {
        let s1 = StockSymbol::new("AAPL");
        let s2 = StockSymbol::new("AAPL");
        b.iter(|| black_box(s1) == black_box(s2));
    });

    group.bench_function("timestamp_display", |b| {
        let ts = Timestamp::from_nanos(34_200_123_456_789);
        b.iter(|| format!("{}", black_box(ts)));
    });

    group.finish();
}

criterion_group!(benches, bench_type_operations);
criterion_main!(benches);
