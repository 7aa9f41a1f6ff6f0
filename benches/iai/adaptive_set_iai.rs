//! IAI-Callgrind benchmark for AdaptiveUnsignedSet construction.
//!
//! Measures instruction counts for incremental insert in both representations,
//! including the dense to sparse and sparse to dense transitions.

use iai_callgrind::{library_benchmark, library_benchmark_group, main};
use likely_dense::AdaptiveUnsignedSet;
use std::hint::black_box;

// Setup functions for different key layouts
fn setup_sequential_1000() -> Vec<u32> {
    (0..1000).collect()
}

fn setup_descending_1000() -> Vec<u32> {
    (0..1000).rev().collect()
}

fn setup_spread_1000() -> Vec<u32> {
    (0..1000u32).map(|step| step.wrapping_mul(2_654_435_761) % (u32::MAX - 1)).collect()
}

/// Two far-apart keys followed by a fill of the gap between them.
fn setup_refill_1000() -> Vec<u32> {
    [0, 10_000].into_iter().chain(1..1000).collect()
}

fn build(keys: Vec<u32>) -> AdaptiveUnsignedSet<u32> {
    let mut set = AdaptiveUnsignedSet::new();
    for key in keys {
        set.insert(black_box(key));
    }
    set
}

#[library_benchmark]
#[bench::with_setup(setup_sequential_1000())]
fn insert_sequential_1000(keys: Vec<u32>) -> AdaptiveUnsignedSet<u32> {
    black_box(build(black_box(keys)))
}

#[library_benchmark]
#[bench::with_setup(setup_descending_1000())]
fn insert_descending_1000(keys: Vec<u32>) -> AdaptiveUnsignedSet<u32> {
    black_box(build(black_box(keys)))
}

#[library_benchmark]
#[bench::with_setup(setup_spread_1000())]
fn insert_spread_1000(keys: Vec<u32>) -> AdaptiveUnsignedSet<u32> {
    black_box(build(black_box(keys)))
}

#[library_benchmark]
#[bench::with_setup(setup_refill_1000())]
fn insert_refill_1000(keys: Vec<u32>) -> AdaptiveUnsignedSet<u32> {
    black_box(build(black_box(keys)))
}

#[library_benchmark]
#[bench::with_setup(setup_sequential_1000())]
fn contains_dense_1000(keys: Vec<u32>) -> usize {
    let set = build(keys.clone());
    black_box(keys.iter().filter(|&&key| set.contains(black_box(key))).count())
}

library_benchmark_group!(
    name = adaptive_set_group;
    benchmarks =
        insert_sequential_1000, insert_descending_1000, insert_spread_1000, insert_refill_1000,
        contains_dense_1000
);

main!(library_benchmark_groups = adaptive_set_group);
