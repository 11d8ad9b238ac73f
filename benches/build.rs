use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use int_perfect_hash::{DisplacementSearch, KeySet, OrderedConstruction, SlotFunction};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

const GEN_SEED: u64 = 42;

/// `n` unique keys below `bound`, deterministically.
fn gen_unique_keys(n: usize, bound: u64, seed: u64) -> KeySet {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut set = HashSet::with_capacity(n * 2);
    let mut keys = Vec::with_capacity(n);
    while keys.len() < n {
        let k = rng.gen_range(0..bound);
        if set.insert(k) {
            keys.push(k);
        }
    }
    KeySet::new(keys).expect("generated keys are unique and non-empty")
}

fn build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    group.sample_size(10);
    for n in [1_000usize, 10_000, 50_000] {
        let keys = gen_unique_keys(n, (n as u64) * 16, GEN_SEED);
        group.bench_with_input(BenchmarkId::new("displacement", n), &keys, |b, keys| {
            b.iter(|| DisplacementSearch::default().search(black_box(keys)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("ordered", n), &keys, |b, keys| {
            b.iter(|| OrderedConstruction::default().construct(black_box(keys)))
        });
    }
    group.finish();
}

fn lookup(c: &mut Criterion) {
    let keys = gen_unique_keys(50_000, 800_000, GEN_SEED);
    let minimal = DisplacementSearch::default().search(&keys).unwrap();
    let ordered = OrderedConstruction::default()
        .construct(&keys)
        .expect("default table factor builds");

    c.bench_function("lookup/displacement", |b| {
        b.iter(|| keys.iter().fold(0usize, |acc, k| acc ^ minimal.slot(black_box(k))))
    });
    c.bench_function("lookup/ordered", |b| {
        b.iter(|| keys.iter().fold(0usize, |acc, k| acc ^ ordered.slot(black_box(k))))
    });
}

criterion_group!(benches, build, lookup);
criterion_main!(benches);
