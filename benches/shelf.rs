//! Criterion benchmarks for the bookshelf LRU core.
//!
//! Three traffic shapes: insert churn through a full shelf (every add
//! evicts), hot-set accesses (every access hits and restamps), and pure
//! misses (clock-neutral path).

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shelfkit::policy::lru::ShelfCore;
use shelfkit::traits::BookShelf;

const CAPACITIES: [usize; 3] = [16, 128, 1024];

fn bench_add_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_churn");
    for capacity in CAPACITIES {
        group.bench_with_input(
            BenchmarkId::from_parameter(capacity),
            &capacity,
            |b, &capacity| {
                let mut shelf = ShelfCore::try_new(capacity).unwrap();
                let mut next_id: i64 = 0;
                b.iter(|| {
                    // Distinct ids so every add past warm-up evicts.
                    shelf.add(black_box(next_id), black_box(next_id));
                    next_id += 1;
                });
            },
        );
    }
    group.finish();
}

fn bench_access_hot(c: &mut Criterion) {
    let mut group = c.benchmark_group("access_hot");
    for capacity in CAPACITIES {
        group.bench_with_input(
            BenchmarkId::from_parameter(capacity),
            &capacity,
            |b, &capacity| {
                let mut shelf = ShelfCore::try_new(capacity).unwrap();
                for id in 0..capacity as i64 {
                    shelf.add(id, id);
                }
                let mut rng = StdRng::seed_from_u64(7);
                b.iter(|| {
                    let id = rng.gen_range(0..capacity as i64);
                    black_box(shelf.access(black_box(id)));
                });
            },
        );
    }
    group.finish();
}

fn bench_access_miss(c: &mut Criterion) {
    let mut group = c.benchmark_group("access_miss");
    for capacity in CAPACITIES {
        group.bench_with_input(
            BenchmarkId::from_parameter(capacity),
            &capacity,
            |b, &capacity| {
                let mut shelf = ShelfCore::try_new(capacity).unwrap();
                for id in 0..capacity as i64 {
                    shelf.add(id, id);
                }
                b.iter(|| {
                    // Ids outside the shelved range never hit.
                    black_box(shelf.access(black_box(-1)));
                });
            },
        );
    }
    group.finish();
}

fn bench_update_in_place(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_in_place");
    for capacity in CAPACITIES {
        group.bench_with_input(
            BenchmarkId::from_parameter(capacity),
            &capacity,
            |b, &capacity| {
                let mut shelf = ShelfCore::try_new(capacity).unwrap();
                for id in 0..capacity as i64 {
                    shelf.add(id, id);
                }
                let mut rng = StdRng::seed_from_u64(11);
                b.iter(|| {
                    let id = rng.gen_range(0..capacity as i64);
                    shelf.add(black_box(id), black_box(id + 1));
                });
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_add_churn,
    bench_access_hot,
    bench_access_miss,
    bench_update_in_place
);
criterion_main!(benches);
