// Copyright 2025 the Pointmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size};
use pointmark_interaction::{AnnotationController, HitParams, Mode, hit_test};
use pointmark_store::{AnnotationStore, LabelSet, SeedPoint};
use pointmark_view::ViewScale;

const BOUNDS: Size = Size::new(2_048.0, 2_048.0);

fn grid(len: usize) -> Vec<SeedPoint> {
    let side = (len as f64).sqrt().ceil() as usize;
    let step = BOUNDS.width / side as f64;
    (0..len)
        .map(|i| SeedPoint::new(((i % side) as f64 * step, (i / side) as f64 * step), "cell"))
        .collect()
}

fn bench_hit_test(c: &mut Criterion) {
    let mut group = c.benchmark_group("interaction/hit_test");
    let params = HitParams::default();
    let mut view = ViewScale::new(BOUNDS);
    view.set_zoom(0.5);

    // Points are scanned top-down, so a miss is the worst case.
    for len in [256usize, 4_096, 16_384] {
        let mut store = AnnotationStore::new(LabelSet::new(["cell"]), BOUNDS);
        store.reseed(grid(len)).unwrap();
        let bottom = view.image_to_view_point(store.iter().next().unwrap().position());
        let miss = Point::new(-100.0, -100.0);
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::new("bottom", len), &store, |b, store| {
            b.iter(|| black_box(hit_test(store, &view, bottom, &params)));
        });
        group.bench_with_input(BenchmarkId::new("miss", len), &store, |b, store| {
            b.iter(|| black_box(hit_test(store, &view, miss, &params)));
        });
    }

    group.finish();
}

fn bench_drag(c: &mut Criterion) {
    let mut group = c.benchmark_group("interaction/drag");

    for len in [256usize, 4_096] {
        let mut controller = AnnotationController::new(LabelSet::new(["cell"]), BOUNDS);
        controller.reseed(grid(len)).unwrap();
        controller.set_mode(Mode::Transform);
        let start = controller.store().iter().next().unwrap().position();
        group.throughput(Throughput::Elements(64));

        group.bench_function(BenchmarkId::from_parameter(len), |b| {
            b.iter(|| {
                let events = controller.pointer_down(start).unwrap();
                black_box(events);
                for step in 1..=64 {
                    let pos = start + (step as f64, step as f64 * 0.5);
                    black_box(controller.pointer_move(pos));
                }
                black_box(controller.pointer_up(start));
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_hit_test, bench_drag);
criterion_main!(benches);
