//! Criterion microbenches for candidate-pair selection.
//!
//! Run with: `cargo bench`
//!
//! These benchmarks measure the performance of:
//! - Exhaustive O(N²) pair selection
//! - Grid-indexed pair selection
//! - Delimited bounds-string parsing

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use std::hint::black_box;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use tilematch::geom::BoundingBox;
use tilematch::select::{select_pairs, select_pairs_indexed};

const TILE_COUNT: usize = 256;

/// A plausible montage: tiles scattered over a large section, each
/// overlapping only its spatial neighbours.
fn montage_boxes(count: usize) -> Vec<BoundingBox> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..count)
        .map(|_| {
            let from_x: f64 = rng.random_range(0.0..4000.0);
            let from_y: f64 = rng.random_range(0.0..4000.0);
            let width: f64 = rng.random_range(200.0..400.0);
            let height: f64 = rng.random_range(200.0..400.0);
            BoundingBox::new(from_x, from_x + width, from_y, from_y + height)
                .expect("valid box")
        })
        .collect()
}

/// Benchmark the exhaustive pairwise scan.
fn bench_select_exhaustive(c: &mut Criterion) {
    let boxes = montage_boxes(TILE_COUNT);

    let mut group = c.benchmark_group("pair_selection");
    group.throughput(Throughput::Elements(TILE_COUNT as u64));

    group.bench_function("exhaustive", |b| {
        b.iter(|| {
            let pairs = select_pairs(black_box(&boxes));
            black_box(pairs)
        })
    });

    group.finish();
}

/// Benchmark grid-indexed selection (build + query per iteration).
fn bench_select_grid(c: &mut Criterion) {
    let boxes = montage_boxes(TILE_COUNT);

    let mut group = c.benchmark_group("pair_selection");
    group.throughput(Throughput::Elements(TILE_COUNT as u64));

    group.bench_function("grid", |b| {
        b.iter(|| {
            let pairs = select_pairs_indexed(black_box(&boxes));
            black_box(pairs)
        })
    });

    group.finish();
}

/// Benchmark bounds-string parsing.
fn bench_bounds_parse(c: &mut Criterion) {
    const LINE: &str = "0.5 2047.5 -1024.25 1024.25";

    let mut group = c.benchmark_group("bounds_parse");
    group.throughput(Throughput::Bytes(LINE.len() as u64));

    group.bench_function("from_str", |b| {
        b.iter(|| {
            let bbox: BoundingBox = black_box(LINE).parse().unwrap();
            black_box(bbox)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_select_exhaustive,
    bench_select_grid,
    bench_bounds_parse,
);
criterion_main!(benches);
