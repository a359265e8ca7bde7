//! Benchmarks for grid solving, caching, and placement.
//!
//! Run with: cargo bench -p gridwrap-layout

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use gridwrap_layout::{Axis, Grid, LayoutCache, Point, Size};
use std::hint::black_box;

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid/layout");
    let grid = Grid::new(Size::new(100.0, 100.0));

    for count in [9usize, 100, 10_000] {
        for axis in [Axis::RowMajor, Axis::ColumnMajor] {
            let grid = grid.axis(axis);
            group.bench_with_input(
                BenchmarkId::new(axis.as_str(), count),
                &count,
                |b, &count| {
                    b.iter(|| black_box(grid.layout(black_box(Size::new(1920.0, 1080.0)), 0..count)))
                },
            );
        }
    }

    group.finish();
}

fn bench_metrics_cache(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid/metrics");
    let grid = Grid::new(Size::new(100.0, 100.0));
    let sizes: Vec<Size> = (0..32)
        .map(|i| Size::new(800.0 + 10.0 * i as f64, 600.0))
        .collect();

    group.bench_function("uncached", |b| {
        b.iter(|| {
            for size in &sizes {
                black_box(grid.metrics(*size, 500));
            }
        })
    });

    let mut cache = LayoutCache::default();
    group.bench_function("cached", |b| {
        b.iter(|| {
            for size in &sizes {
                black_box(cache.metrics(&grid, *size, 500));
            }
        })
    });

    group.finish();
}

fn bench_placement(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid/place");
    let plan = Grid::new(Size::new(64.0, 48.0)).layout(Size::new(1920.0, 1080.0), 0..1_000);

    group.bench_function("1000_cells", |b| {
        b.iter(|| black_box(plan.place(Point::ORIGIN)))
    });

    group.finish();
}

criterion_group!(benches, bench_layout, bench_metrics_cache, bench_placement);
criterion_main!(benches);
