//! AdaptiveUnsignedSet insert and lookup benchmark.
//!
//! Compares incremental construction across key layouts:
//! - sequential keys (dense, grow above the maximum)
//! - clustered keys in scrambled order (dense, occasional shifts)
//! - keys spread over the whole `u32` range (sparse after a few inserts)
//!
//! A `std::collections::HashSet` is built from the same keys as a baseline.

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use likely_dense::AdaptiveUnsignedSet;
use std::collections::HashSet;
use std::hint::black_box;

const SIZES: [u32; 3] = [100, 1_000, 10_000];

fn sequential_keys(size: u32) -> Vec<u32> {
    (0..size).collect()
}

/// Visits every key in `[1_000_000, 1_000_000 + size)` once, in a scrambled order.
fn clustered_keys(size: u32) -> Vec<u32> {
    (0..size).map(|step| 1_000_000 + step * 7_919 % size).collect()
}

fn spread_keys(size: u32) -> Vec<u32> {
    (0..size).map(|step| step.wrapping_mul(2_654_435_761) % (u32::MAX - 1)).collect()
}

fn batch_size_for(size: u32) -> BatchSize {
    if size < 1_000 {
        BatchSize::SmallInput
    } else {
        BatchSize::LargeInput
    }
}

fn benchmark_insert(criterion: &mut Criterion) {
    let layouts: [(&str, fn(u32) -> Vec<u32>); 3] = [
        ("sequential", sequential_keys),
        ("clustered", clustered_keys),
        ("spread", spread_keys),
    ];

    for (layout, generate) in layouts {
        let mut group = criterion.benchmark_group(format!("adaptive_set_insert_{layout}"));

        for size in SIZES {
            let base_vec = generate(size);

            group.bench_with_input(
                BenchmarkId::new("adaptive", size),
                &size,
                |bencher, &size| {
                    bencher.iter_batched(
                        || base_vec.clone(),
                        |keys| {
                            let mut set: AdaptiveUnsignedSet<u32> = AdaptiveUnsignedSet::new();
                            for key in keys {
                                set.insert(black_box(key));
                            }
                            black_box(set)
                        },
                        batch_size_for(size),
                    );
                },
            );

            group.bench_with_input(
                BenchmarkId::new("std_hash_set", size),
                &size,
                |bencher, &size| {
                    bencher.iter_batched(
                        || base_vec.clone(),
                        |keys| {
                            let mut set = HashSet::new();
                            for key in keys {
                                set.insert(black_box(key));
                            }
                            black_box(set)
                        },
                        batch_size_for(size),
                    );
                },
            );
        }

        group.finish();
    }
}

fn benchmark_contains(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("adaptive_set_contains");

    for size in SIZES {
        let dense: AdaptiveUnsignedSet<u32> = clustered_keys(size).into_iter().collect();
        let sparse: AdaptiveUnsignedSet<u32> = spread_keys(size).into_iter().collect();
        let probes = clustered_keys(size);

        group.bench_with_input(BenchmarkId::new("dense", size), &size, |bencher, _| {
            bencher.iter(|| probes.iter().filter(|&&key| dense.contains(black_box(key))).count());
        });

        group.bench_with_input(BenchmarkId::new("sparse", size), &size, |bencher, _| {
            bencher.iter(|| probes.iter().filter(|&&key| sparse.contains(black_box(key))).count());
        });
    }

    group.finish();
}

fn benchmark_iter(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("adaptive_set_iter");

    for size in SIZES {
        let dense: AdaptiveUnsignedSet<u32> = clustered_keys(size).into_iter().collect();
        let sparse: AdaptiveUnsignedSet<u32> = spread_keys(size).into_iter().collect();

        group.bench_with_input(BenchmarkId::new("dense", size), &size, |bencher, _| {
            bencher.iter(|| black_box(&dense).iter().map(u64::from).sum::<u64>());
        });

        group.bench_with_input(BenchmarkId::new("sparse", size), &size, |bencher, _| {
            bencher.iter(|| black_box(&sparse).iter().map(u64::from).sum::<u64>());
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_insert, benchmark_contains, benchmark_iter);

criterion_main!(benches);
