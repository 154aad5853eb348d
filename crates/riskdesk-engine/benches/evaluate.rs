//! Benchmarks for the evaluation pipeline.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use riskdesk_core::types::{AssetHolding, Category, PortfolioSnapshot};
use riskdesk_engine::{evaluate, DecisionPolicy};
use rust_decimal::Decimal;

fn generate_snapshot(size: usize) -> PortfolioSnapshot {
    let holdings = (0..size)
        .map(|i| {
            let category = Category::ALL[i % Category::ALL.len()];
            AssetHolding::new(
                format!("SYM{}", i),
                Decimal::new(10_000 + i as i64 * 37, 2),
                (i as u64 + 1) * 100,
                Decimal::new(i as i64 % 20, 1),
                category,
            )
        })
        .collect();

    PortfolioSnapshot::new(
        holdings,
        Decimal::new(2_350_000, 0),
        Decimal::new(28_000, 0),
        Decimal::new(32_996, 0),
    )
}

fn benchmark_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");
    let policy = DecisionPolicy::default();

    for size in [7, 100, 1000].iter() {
        let snapshot = generate_snapshot(*size);

        group.bench_with_input(BenchmarkId::new("holdings", size), &snapshot, |b, snapshot| {
            b.iter(|| evaluate(black_box(snapshot), black_box(&policy)))
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_evaluate);
criterion_main!(benches);
