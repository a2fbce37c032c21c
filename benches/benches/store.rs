// Copyright 2025 the Pointmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::{Point, Size};
use pointmark_store::{AnnotationStore, LabelSet, SeedPoint};

const BOUNDS: Size = Size::new(4_096.0, 4_096.0);

fn seeds(len: usize) -> Vec<SeedPoint> {
    (0..len)
        .map(|i| {
            let x = (i * 37 % 4_096) as f64;
            let y = (i * 91 % 4_096) as f64;
            let label = if i % 3 == 0 { "Negative" } else { "Positive" };
            SeedPoint::new((x, y), label)
        })
        .collect()
}

fn seeded_store(len: usize) -> AnnotationStore {
    let mut store = AnnotationStore::new(LabelSet::new(["Positive", "Negative"]), BOUNDS);
    store.reseed(seeds(len)).unwrap();
    store
}

fn bench_promote(c: &mut Criterion) {
    let mut group = c.benchmark_group("store/promote");

    // Promoting the bottom point shifts every other point down by one.
    for len in [128usize, 1_024, 8_192] {
        let store = seeded_store(len);
        let bottom = store.iter().next().unwrap().id();
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::new("bottom", len), &store, |b, store| {
            b.iter_batched(
                || store.clone(),
                |mut store| {
                    store.promote(bottom).unwrap();
                    black_box(store);
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

fn bench_clamp(c: &mut Criterion) {
    let mut group = c.benchmark_group("store/clamp");

    for len in [1_024usize, 8_192] {
        let mut store = seeded_store(len);
        let ids: Vec<_> = store.iter().map(|p| p.id()).collect();
        for (i, id) in ids.iter().enumerate().step_by(4) {
            let offset = Point::new(-10.0 - i as f64, 5_000.0);
            store.update(*id, offset.into()).unwrap();
        }
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::new("quarter_out", len), &store, |b, store| {
            b.iter_batched(
                || store.clone(),
                |mut store| black_box(store.clamp_to_bounds()),
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

fn bench_reseed(c: &mut Criterion) {
    let mut group = c.benchmark_group("store/reseed");

    for len in [1_024usize, 8_192] {
        let input = seeds(len);
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &input, |b, input| {
            b.iter_batched(
                || (seeded_store(0), input.clone()),
                |(mut store, input)| {
                    store.reseed(input).unwrap();
                    black_box(store);
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_promote, bench_clamp, bench_reseed);
criterion_main!(benches);
