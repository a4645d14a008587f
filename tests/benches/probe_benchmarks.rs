//! # Remote Coordination Benchmarks
//!
//! | Operation | Target |
//! |-----------|--------|
//! | Probe offsets, k = 14 | < 2µs |
//! | Add + Exists (in-memory store) | < 20µs |
//! | Acquire + Release (in-memory store) | < 20µs |

use std::sync::Arc;
use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;
use remote_bloom::domain::probe_locations;
use remote_bloom::MembershipFilter;
use remote_lock::ReentrantLock;
use shared_store::InMemoryAtomicStore;

fn bench_probe_locations(c: &mut Criterion) {
    let mut group = c.benchmark_group("probe-locations");
    group.measurement_time(Duration::from_secs(5));

    let mut rng = rand::thread_rng();
    for size in [16usize, 64, 256] {
        let value: Vec<u8> = (0..size).map(|_| rng.gen()).collect();
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("k14", size), &value, |b, value| {
            b.iter(|| black_box(probe_locations(value, 14, 2_000_000).unwrap()))
        });
    }

    group.finish();
}

fn bench_filter_roundtrip(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime");
    let store = Arc::new(InMemoryAtomicStore::new());
    let filter = MembershipFilter::new(store, "bench:seen", 2_000_000).expect("filter");

    c.bench_function("filter_add_exists", |b| {
        let mut i = 0u64;
        b.iter(|| {
            i += 1;
            let value = i.to_le_bytes();
            runtime.block_on(async {
                filter.add(&value).await.unwrap();
                black_box(filter.exists(&value).await.unwrap())
            })
        })
    });
}

fn bench_lock_cycle(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime");
    let store = Arc::new(InMemoryAtomicStore::new());
    let lock = ReentrantLock::new(store, "bench:lock").expect("lock");

    c.bench_function("lock_acquire_release", |b| {
        b.iter(|| {
            runtime.block_on(async {
                black_box(lock.acquire().await.unwrap());
                black_box(lock.release().await.unwrap());
            })
        })
    });

    c.bench_function("lock_nested_acquire_release", |b| {
        runtime.block_on(lock.acquire()).unwrap();
        b.iter(|| {
            runtime.block_on(async {
                black_box(lock.acquire().await.unwrap());
                black_box(lock.release().await.unwrap());
            })
        });
        runtime.block_on(lock.release()).unwrap();
    });
}

criterion_group!(
    benches,
    bench_probe_locations,
    bench_filter_roundtrip,
    bench_lock_cycle
);
criterion_main!(benches);
