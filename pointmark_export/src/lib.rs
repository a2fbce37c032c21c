// Copyright 2025 the Pointmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointmark Export: what leaves the annotation canvas, and in which shapes.
//!
//! The outbound contract is a flat, ordered list of [`ExportedPoint`]s, one
//! per annotation point in z-order:
//!
//! ```json
//! [{ "position": [50.0, 25.0], "label": "cat", "label_index": 0 }]
//! ```
//!
//! `label_index` is the label's position in the host's label list, or `-1`
//! when the label is not in it. Decoding also accepts the field names
//! `point` and `label_id` used by older hosts.
//!
//! Around that record this crate provides the host-side helpers an
//! annotation workflow needs:
//! - [`to_json`] / [`from_json`] for the record list itself.
//! - [`write_csv`] / [`read_csv`] for the `X,Y,Label` annotations file, with
//!   coordinates truncated to whole pixels.
//! - [`AnnotationReport`] for per-label counts and percentages.
//! - [`PixelAnnotations`] for folding successive exports into a persisted,
//!   pixel-keyed annotation set.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use pointmark_export::{export_points, read_csv, write_csv};
//! use pointmark_store::{AnnotationStore, LabelSet};
//!
//! let mut store = AnnotationStore::new(LabelSet::new(["cat", "dog"]), Size::new(300.0, 200.0));
//! store.add(Point::new(50.4, 25.9), "dog").unwrap();
//!
//! let records = export_points(&store);
//! assert_eq!(records[0].label_index, Some(1));
//!
//! let csv = write_csv(&records);
//! assert_eq!(csv, "X,Y,Label\n50,25,dog\n");
//!
//! let back = read_csv(&csv, store.labels()).unwrap();
//! assert_eq!(back[0].position, [50.0, 25.0]);
//! ```

mod csv;
mod error;
mod reconcile;
mod record;
mod report;

pub use csv::{read_csv, write_csv};
pub use error::ExportError;
pub use reconcile::{PixelAnnotations, PixelKey, ReconcileSummary};
pub use record::{ExportedPoint, export_points, from_json, seeds_from, to_json};
pub use report::{AnnotationReport, LabelCount};
