//! Benchmarks for full-feed replay through the processor.

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use itch_core::types::StockSymbol;
use itch_engine::{MarketProcessor, OfiRecorder};
use itch_feed::messages::ItchMessage;
use itch_feed::synthetic::{SyntheticConfig, SyntheticFeed};

fn session(count: usize) -> Vec<ItchMessage> {
    let mut feed = SyntheticFeed::new(SyntheticConfig {
        stock: *b"BENCH   ",
        ..SyntheticConfig::default()
    });
    feed.session(count)
}

fn bench_replay(c: &mut Criterion) {
    let mut group = c.benchmark_group("replay");

    let messages = session(10_000);
    group.throughput(Throughput::Elements(messages.len() as u64));

    group.bench_function("process_10k_no_handlers", |b| {
        b.iter(|| {
            let mut processor = MarketProcessor::new(
                StockSymbol::new("BENCH"),
                NaiveDate::from_ymd_opt(2026, 1, 2).unwrap(),
            );
            for message in &messages {
                processor.process(black_box(message)).unwrap();
            }
            processor.finalize()
        });
    });

    group.bench_function("process_10k_with_ofi", |b| {
        b.iter(|| {
            let mut processor = MarketProcessor::new(
                StockSymbol::new("BENCH"),
                NaiveDate::from_ymd_opt(2026, 1, 2).unwrap(),
            );
            processor.register_handler(Box::new(OfiRecorder::new()));
            for message in &messages {
                processor.process(black_box(message)).unwrap();
            }
            processor.finalize()
        });
    });

    group.finish();
}

criterion_group!(benches, bench_replay);
criterion_main!(benches);
