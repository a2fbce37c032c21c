// Copyright 2025 the Pointmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `pointmark_export` crate against a live store.

use kurbo::{Point, Size};
use pointmark_export::{
    AnnotationReport, ExportedPoint, PixelAnnotations, export_points, from_json, read_csv,
    seeds_from, to_json, write_csv,
};
use pointmark_store::{AnnotationStore, LabelSet};

fn labels() -> LabelSet {
    LabelSet::new(["Positive", "Negative", "Ignore"])
}

#[test]
fn import_then_export_round_trips() {
    let host_value = r#"[
        {"point": [12.5, 40.0], "label": "Negative", "label_id": 1},
        {"point": [0.0, 199.0], "label": "Positive", "label_id": 7},
        {"point": [300.0, 0.25], "label": "Ignore", "label_id": 2}
    ]"#;
    let imported = from_json(host_value).unwrap();

    let mut store = AnnotationStore::new(labels(), Size::new(300.0, 200.0));
    store.reseed(seeds_from(&imported)).unwrap();
    let exported = export_points(&store);

    assert_eq!(exported.len(), imported.len());
    for (before, after) in imported.iter().zip(&exported) {
        assert_eq!(before.position, after.position);
        assert_eq!(before.label, after.label);
        assert_eq!(after.label_index, store.labels().index_of(&after.label));
    }
    // The stale index supplied by the host is recomputed from the label set.
    assert_eq!(exported[1].label_index, Some(0));
}

#[test]
fn json_survives_encode_decode() {
    let mut store = AnnotationStore::new(labels(), Size::new(100.0, 100.0));
    store.add(Point::new(1.5, 2.5), "Ignore").unwrap();
    let exported = export_points(&store);

    let text = to_json(&exported).unwrap();
    assert_eq!(from_json(&text).unwrap(), exported);
}

#[test]
fn csv_and_report_describe_the_same_store() {
    let mut store = AnnotationStore::new(labels(), Size::new(100.0, 100.0));
    store.add(Point::new(10.7, 20.2), "Positive").unwrap();
    store.add(Point::new(30.0, 40.0), "Negative").unwrap();
    store.add(Point::new(50.0, 60.0), "Positive").unwrap();
    store.add(Point::new(70.0, 80.0), "Ignore").unwrap();
    let exported = export_points(&store);

    let csv = write_csv(&exported);
    let from_file = read_csv(&csv, store.labels()).unwrap();
    assert_eq!(from_file[0].position, [10.0, 20.0]);
    assert_eq!(from_file.len(), 4);

    let report = AnnotationReport::new("slide_07", store.labels(), &from_file).excluding(["Ignore"]);
    assert_eq!(report.count("Positive"), Some(2));
    assert_eq!(report.count("Negative"), Some(1));
    assert_eq!(report.total(), 3);
}

#[test]
fn reconciling_successive_exports() {
    let mut store = AnnotationStore::new(labels(), Size::new(100.0, 100.0));
    let a = store.add(Point::new(10.0, 10.0), "Positive").unwrap();
    store.add(Point::new(20.0, 20.0), "Negative").unwrap();

    let mut persisted = PixelAnnotations::from_points(&export_points(&store));
    assert_eq!(persisted.len(), 2);

    store.remove(a);
    store.add(Point::new(30.0, 30.0), "Ignore").unwrap();
    let summary = persisted.reconcile(&export_points(&store));
    assert_eq!((summary.added, summary.removed), (1, 1));

    let labels: Vec<String> = persisted
        .to_points(store.labels())
        .into_iter()
        .map(|p: ExportedPoint| p.label)
        .collect();
    assert_eq!(labels, ["Negative", "Ignore"]);
}
