use std::collections::BTreeMap;
use std::hint::black_box;

use ahorn_core::algorithms::{BoxPlotStats, Histogram};
use ahorn_core::core::domain::{DatasetSummary, NetworkType, NodeRange};
use ahorn_core::time::{aggregate, TimeUnit};
use ahorn_core::transformations::{filter_and_sort, SortDirection, SortField, ViewQuery};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

/// Degree-like sample: many small values, a long tail.
fn degree_sample(n: usize) -> Vec<f64> {
    (0..n).map(|i| ((i * 7919) % 97) as f64 + (i % 13) as f64 * 0.5).collect()
}

fn bench_box_plot(c: &mut Criterion) {
    let mut group = c.benchmark_group("box_plot");

    for size in [1_000usize, 100_000] {
        let values = degree_sample(size);
        group.bench_with_input(BenchmarkId::new("from_values", size), &values, |b, values| {
            b.iter(|| BoxPlotStats::from_values(black_box(values)));
        });

        // Same distribution folded into a value -> count histogram
        let mut counts: BTreeMap<u64, f64> = BTreeMap::new();
        for value in &values {
            *counts.entry(value.to_bits()).or_default() += 1.0;
        }
        let histogram =
            Histogram::from_pairs(counts.iter().map(|(bits, count)| (f64::from_bits(*bits), *count)));
        group.bench_with_input(
            BenchmarkId::new("from_histogram", size),
            &histogram,
            |b, histogram| {
                b.iter(|| BoxPlotStats::from_histogram(black_box(histogram)));
            },
        );
    }

    group.finish();
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("temporal_aggregate");

    let data: BTreeMap<String, f64> = (0..24 * 365)
        .map(|hour| {
            let day = hour / 24;
            let stamp = format!(
                "{}-{:02}-{:02} {:02}:00",
                2020 + day / 365,
                1 + (day % 365) / 31,
                1 + (day % 365) % 28,
                hour % 24
            );
            (stamp, (hour % 17) as f64)
        })
        .collect();

    for unit in [TimeUnit::Day, TimeUnit::Month, TimeUnit::Year] {
        group.bench_with_input(BenchmarkId::new("scalar", unit.as_str()), &unit, |b, unit| {
            b.iter(|| aggregate(black_box(&data), *unit));
        });
    }

    group.finish();
}

fn bench_filter_and_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("dataset_table");

    let datasets: Vec<DatasetSummary> = (0..2_000u64)
        .map(|i| {
            DatasetSummary::new(format!("dataset-{}", i), format!("Dataset {}", i))
                .with_tags(if i % 3 == 0 { vec!["social"] } else { vec!["biology", "temporal"] })
                .with_network_types([NetworkType::ALL[(i % 4) as usize]])
                .with_num_nodes((i * 37) % 50_000)
        })
        .collect();

    let mut query = ViewQuery::with_defaults(NodeRange::new(0, 50_000));
    query.search = "dataset 1".to_string();
    query.node_range = NodeRange::new(100, 40_000);
    query.sort_field = SortField::NumNodes;
    query.sort_direction = SortDirection::Desc;

    group.bench_function("filter_and_sort", |b| {
        b.iter(|| filter_and_sort(black_box(&datasets), black_box(&query)).len());
    });

    group.finish();
}

criterion_group!(benches, bench_box_plot, bench_aggregate, bench_filter_and_sort);
criterion_main!(benches);
