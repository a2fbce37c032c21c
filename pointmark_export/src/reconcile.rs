// Copyright 2025 the Pointmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pixel-keyed annotation sets that absorb successive exports.
//!
//! A host persisting annotations usually does not care about point ids, only
//! about which whole pixel is marked with which label. [`PixelAnnotations`]
//! folds each new export into that view: new pixels are added, pixels that
//! disappeared from the export are dropped, and pixels already known keep the
//! label they were first stored with.

use hashbrown::{HashMap, HashSet};
use pointmark_store::LabelSet;

use crate::ExportedPoint;

/// A whole-pixel position, truncated from image-space coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PixelKey {
    /// Column.
    pub x: i64,
    /// Row.
    pub y: i64,
}

impl PixelKey {
    /// Truncates an image-space position to its pixel.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "truncating to whole pixels is the keying rule"
    )]
    pub fn from_position(position: [f64; 2]) -> Self {
        Self {
            x: position[0].trunc() as i64,
            y: position[1].trunc() as i64,
        }
    }
}

/// What a call to [`PixelAnnotations::reconcile`] changed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    /// Pixels that were not present before.
    pub added: usize,
    /// Pixels that were dropped because the export no longer contains them.
    pub removed: usize,
}

impl ReconcileSummary {
    /// Returns `true` if nothing changed.
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        self.added == 0 && self.removed == 0
    }
}

/// Set of labeled pixels, reconciled against exports.
#[derive(Clone, Debug, Default)]
pub struct PixelAnnotations {
    labels: HashMap<PixelKey, String>,
}

impl PixelAnnotations {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from records; on pixel collisions the first record wins.
    #[must_use]
    pub fn from_points(points: &[ExportedPoint]) -> Self {
        let mut set = Self::new();
        set.reconcile(points);
        set
    }

    /// Returns the number of labeled pixels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns `true` if no pixel is labeled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Returns the label stored for `key`.
    #[must_use]
    pub fn label_at(&self, key: PixelKey) -> Option<&str> {
        self.labels.get(&key).map(String::as_str)
    }

    /// Folds `incoming` into the set.
    ///
    /// - Pixels in `incoming` that are not yet known are added with their label.
    /// - Known pixels keep their stored label.
    /// - Known pixels absent from `incoming` are removed.
    pub fn reconcile(&mut self, incoming: &[ExportedPoint]) -> ReconcileSummary {
        let mut summary = ReconcileSummary::default();
        let mut seen: HashSet<PixelKey> = HashSet::with_capacity(incoming.len());
        for point in incoming {
            let key = PixelKey::from_position(point.position);
            seen.insert(key);
            if !self.labels.contains_key(&key) {
                self.labels.insert(key, point.label.clone());
                summary.added += 1;
            }
        }
        let before = self.labels.len();
        self.labels.retain(|key, _| seen.contains(key));
        summary.removed = before - self.labels.len();
        log::debug!(
            "reconciled export: {} added, {} removed",
            summary.added,
            summary.removed
        );
        summary
    }

    /// Returns the set as records ordered by row, then column.
    #[must_use]
    pub fn to_points(&self, labels: &LabelSet) -> Vec<ExportedPoint> {
        let mut keys: Vec<PixelKey> = self.labels.keys().copied().collect();
        keys.sort_by_key(|key| (key.y, key.x));
        keys.into_iter()
            .map(|key| {
                let label = self.labels[&key].clone();
                let position = [key.x as f64, key.y as f64];
                ExportedPoint {
                    position,
                    label_index: labels.index_of(&label),
                    label,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: f64, y: f64, label: &str) -> ExportedPoint {
        ExportedPoint {
            position: [x, y],
            label: label.into(),
            label_index: None,
        }
    }

    #[test]
    fn adds_new_and_drops_missing_pixels() {
        let mut set = PixelAnnotations::from_points(&[point(1.2, 1.8, "a"), point(5.0, 5.0, "b")]);
        assert_eq!(set.len(), 2);

        let summary = set.reconcile(&[point(1.9, 1.1, "a"), point(9.0, 9.0, "b")]);
        assert_eq!(summary, ReconcileSummary { added: 1, removed: 1 });
        assert_eq!(set.label_at(PixelKey { x: 1, y: 1 }), Some("a"));
        assert_eq!(set.label_at(PixelKey { x: 5, y: 5 }), None);
        assert_eq!(set.label_at(PixelKey { x: 9, y: 9 }), Some("b"));
    }

    #[test]
    fn known_pixels_keep_their_label() {
        let mut set = PixelAnnotations::from_points(&[point(3.0, 3.0, "a")]);
        let summary = set.reconcile(&[point(3.4, 3.4, "b")]);
        assert!(summary.is_unchanged());
        assert_eq!(set.label_at(PixelKey { x: 3, y: 3 }), Some("a"));
    }

    #[test]
    fn empty_export_clears_everything() {
        let mut set = PixelAnnotations::from_points(&[point(3.0, 3.0, "a"), point(4.0, 3.0, "a")]);
        assert_eq!(set.reconcile(&[]).removed, 2);
        assert!(set.is_empty());
    }

    #[test]
    fn to_points_orders_by_row_then_column() {
        let labels = LabelSet::new(["a", "b"]);
        let set = PixelAnnotations::from_points(&[
            point(9.0, 1.0, "b"),
            point(2.0, 4.0, "a"),
            point(1.0, 1.0, "z"),
        ]);
        let points = set.to_points(&labels);
        let positions: Vec<_> = points.iter().map(|p| p.position).collect();
        assert_eq!(positions, [[1.0, 1.0], [9.0, 1.0], [2.0, 4.0]]);
        assert_eq!(points[0].label_index, None);
        assert_eq!(points[1].label_index, Some(1));
    }
}
