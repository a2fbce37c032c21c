// Copyright 2025 the Pointmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Size;
use pointmark_export::{
    AnnotationReport, PixelAnnotations, export_points, from_json, to_json, write_csv,
};
use pointmark_store::{AnnotationStore, LabelSet, SeedPoint};

fn store(len: usize) -> AnnotationStore {
    let labels = LabelSet::new(["Positive", "Negative", "Ignore"]);
    let names: Vec<String> = labels.iter().map(str::to_owned).collect();
    let mut store = AnnotationStore::new(labels, Size::new(8_192.0, 8_192.0));
    store
        .reseed((0..len).map(|i| {
            let pos = ((i * 13 % 8_192) as f64 + 0.5, (i * 7 % 8_192) as f64 + 0.25);
            SeedPoint::new(pos, names[i % names.len()].clone())
        }))
        .unwrap();
    store
}

fn bench_formats(c: &mut Criterion) {
    let mut group = c.benchmark_group("export/formats");

    for len in [1_024usize, 16_384] {
        let store = store(len);
        let exported = export_points(&store);
        let json = to_json(&exported).unwrap();
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::new("export_points", len), &store, |b, store| {
            b.iter(|| black_box(export_points(store)));
        });
        group.bench_with_input(BenchmarkId::new("to_json", len), &exported, |b, points| {
            b.iter(|| black_box(to_json(points).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("from_json", len), &json, |b, json| {
            b.iter(|| black_box(from_json(json).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("write_csv", len), &exported, |b, points| {
            b.iter(|| black_box(write_csv(points)));
        });
        group.bench_with_input(BenchmarkId::new("report", len), &exported, |b, points| {
            b.iter(|| black_box(AnnotationReport::new("bench", store.labels(), points)));
        });
    }

    group.finish();
}

fn bench_reconcile(c: &mut Criterion) {
    let mut group = c.benchmark_group("export/reconcile");

    for len in [1_024usize, 16_384] {
        let first = export_points(&store(len));
        // Drop every eighth record to model a session of deletions.
        let second: Vec<_> = first
            .iter()
            .enumerate()
            .filter(|(i, _)| i % 8 != 0)
            .map(|(_, p)| p.clone())
            .collect();
        let persisted = PixelAnnotations::from_points(&first);
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::from_parameter(len), &second, |b, second| {
            b.iter_batched(
                || persisted.clone(),
                |mut set| black_box(set.reconcile(second)),
                criterion::BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_formats, bench_reconcile);
criterion_main!(benches);
