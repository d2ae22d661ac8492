use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use double_hash_table::trace::TraceLog;
use double_hash_table::{DoubleHashTable, Policy, ReorganizeMode};
use std::time::Duration;

const N: usize = 10_000;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("u{:016x}", n)
}

fn filled(seed: u64, lf: f64, policy: Policy) -> (DoubleHashTable, Vec<String>) {
    let mut t = DoubleHashTable::with_policy(N, lf, policy).unwrap();
    let keys: Vec<String> = lcg(seed).take(N).map(key).collect();
    for k in &keys {
        let _ = t.insert(k).unwrap();
    }
    (t, keys)
}

fn bench_insert_10k(c: &mut Criterion) {
    for lf in [0.5, 0.9] {
        c.bench_function(&format!("table::insert_10k_lf{lf}"), |b| {
            b.iter_batched(
                || {
                    let keys: Vec<String> = lcg(1).take(N).map(key).collect();
                    (DoubleHashTable::new(N, lf).unwrap(), keys)
                },
                |(mut t, keys)| {
                    for k in &keys {
                        let _ = t.insert(k).unwrap();
                    }
                    black_box(t)
                },
                BatchSize::SmallInput,
            )
        });
    }
}

fn bench_search_hit_miss(c: &mut Criterion) {
    let (t, keys) = filled(7, 0.9, Policy::default());
    c.bench_function("table::search_hit_10k", |b| {
        b.iter(|| {
            for k in &keys {
                black_box(t.search(k).is_ok());
            }
        })
    });
    let misses: Vec<String> = lcg(0xdead_beef).take(N).map(key).collect();
    c.bench_function("table::search_miss_10k", |b| {
        b.iter(|| {
            for k in &misses {
                black_box(t.search(k).is_err());
            }
        })
    });
}

// Probe lengths after half the keys are deleted, before and after a rehash.
fn bench_search_after_deletes(c: &mut Criterion) {
    let (mut t, keys) = filled(11, 0.9, Policy::default());
    for k in keys.iter().step_by(2) {
        let _ = t.remove(k).unwrap();
    }
    let survivors: Vec<&String> = keys.iter().skip(1).step_by(2).collect();

    let mut log = TraceLog::new();
    for k in &survivors {
        let _ = t.search_traced(k, &mut log);
    }
    eprintln!("probes with tombstones: {}", log.attempts());

    c.bench_function("table::search_with_tombstones", |b| {
        b.iter(|| {
            for k in &survivors {
                black_box(t.search(k).is_ok());
            }
        })
    });

    let _ = t.rehash();
    c.bench_function("table::search_after_rehash", |b| {
        b.iter(|| {
            for k in &survivors {
                black_box(t.search(k).is_ok());
            }
        })
    });
}

fn bench_rebuilds(c: &mut Criterion) {
    let compact = Policy {
        reorganize: ReorganizeMode::Compact,
        ..Policy::default()
    };
    c.bench_function("table::rehash_10k", |b| {
        b.iter_batched(
            || filled(3, 0.75, Policy::default()).0,
            |mut t| black_box(t.rehash()),
            BatchSize::SmallInput,
        )
    });
    c.bench_function("table::reorganize_compact_10k", |b| {
        b.iter_batched(
            || {
                let (mut t, keys) = filled(5, 0.75, compact);
                let _ = t.remove(&keys[0]).unwrap();
                t
            },
            |mut t| black_box(t.reorganize().unwrap()),
            BatchSize::SmallInput,
        )
    });
}

fn config() -> Criterion {
    Criterion::default()
        .sample_size(20)
        .warm_up_time(Duration::from_millis(500))
        .measurement_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = config();
    targets = bench_insert_10k, bench_search_hit_miss, bench_search_after_deletes, bench_rebuilds
}
criterion_main!(benches);
