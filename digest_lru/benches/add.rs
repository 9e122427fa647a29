//! Criterion benchmark for set / get / snapshot
//! Criterion 基准测试：set / get / snapshot

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use digest_lru::{Key, Lru};

const SAMPLE_SIZE: usize = 20;
const CAPS: &[usize] = &[10_000, 100_000, 1_000_000];
const SEED: u64 = 42;

/// `n` random keys
/// `n` 个随机键
fn gen_keys(n: usize) -> Vec<Key> {
  let mut rng = fastrand::Rng::with_seed(SEED);
  (0..n)
    .map(|_| {
      let mut bin = [0u8; 16];
      rng.fill(&mut bin);
      Key(bin)
    })
    .collect()
}

fn bench_set(c: &mut Criterion) {
  let mut group = c.benchmark_group("set");
  group.sample_size(SAMPLE_SIZE);
  for &cap in CAPS {
    // Twice the capacity so half the inserts evict
    // 容量两倍，一半插入会触发淘汰
    let keys = gen_keys(cap * 2);
    group.throughput(Throughput::Elements(keys.len() as u64));
    group.bench_with_input(BenchmarkId::from_parameter(cap), &keys, |b, keys| {
      b.iter(|| {
        let mut cache = Lru::new(cap);
        for &k in keys {
          cache.set(k, ());
        }
        black_box(cache.len())
      })
    });
  }
  group.finish();
}

fn bench_get(c: &mut Criterion) {
  let mut group = c.benchmark_group("get");
  group.sample_size(SAMPLE_SIZE);
  for &cap in CAPS {
    let keys = gen_keys(cap);
    let mut cache = Lru::new(cap);
    for &k in &keys {
      cache.set(k, ());
    }
    group.throughput(Throughput::Elements(keys.len() as u64));
    group.bench_function(BenchmarkId::from_parameter(cap), |b| {
      b.iter(|| {
        for k in &keys {
          black_box(cache.get(k));
        }
      })
    });
  }
  group.finish();
}

fn bench_snapshot(c: &mut Criterion) {
  let mut group = c.benchmark_group("snapshot");
  group.sample_size(SAMPLE_SIZE);
  for &cap in CAPS {
    let mut cache = Lru::new(cap);
    for k in gen_keys(cap) {
      cache.set(k, ());
    }
    group.throughput(Throughput::Bytes((cap * 16) as u64));
    group.bench_function(BenchmarkId::from_parameter(cap), |b| {
      b.iter(|| black_box(cache.snapshot().len()))
    });
  }
  group.finish();
}

criterion_group!(benches, bench_set, bench_get, bench_snapshot);
criterion_main!(benches);
