use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use wishlist_core::{ShortMonthYear, SummaryService};
use wishlist_domain::{Priority, Product, SavingsRate};

fn build_products(count: usize) -> Vec<Product> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    (0..count)
        .map(|idx| {
            let priority = Priority::ALL[idx % Priority::ALL.len()];
            Product::new(
                format!("Product {idx}"),
                50.0 + (idx % 500) as f64 * 7.5,
                start + Duration::hours(idx as i64),
            )
            .with_priority(priority)
        })
        .collect()
}

fn bench_projection(c: &mut Criterion) {
    let products = build_products(black_box(10_000));
    let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
    let rate = SavingsRate::new(350.0);

    c.bench_function("project_all_10k", |b| {
        b.iter(|| {
            let projections = SummaryService::project_all(&products, rate, now, &ShortMonthYear);
            black_box(SummaryService::summarize(&projections).total_value);
        })
    });
}

criterion_group!(benches, bench_projection);
criterion_main!(benches);
