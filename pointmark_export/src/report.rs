// Copyright 2025 the Pointmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fmt;

use pointmark_store::LabelSet;

use crate::ExportedPoint;

/// Number of points carrying one label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelCount {
    /// The label.
    pub label: String,
    /// How many points carry it.
    pub count: usize,
}

/// Per-label summary of an annotated image.
///
/// Counts follow the order of the label set. Percentages are taken over the
/// labels the report keeps; see [`AnnotationReport::excluding`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnnotationReport {
    image_name: String,
    counts: Vec<LabelCount>,
}

impl AnnotationReport {
    /// Counts `points` per label of `labels`.
    ///
    /// Points whose label is not in the set are not counted.
    pub fn new(image_name: impl Into<String>, labels: &LabelSet, points: &[ExportedPoint]) -> Self {
        let mut counts: Vec<LabelCount> = labels
            .iter()
            .map(|label| LabelCount {
                label: label.to_owned(),
                count: 0,
            })
            .collect();
        for point in points {
            match labels.index_of(&point.label) {
                Some(idx) => counts[idx].count += 1,
                None => log::debug!("report skips unlabeled point {:?}", point.label),
            }
        }
        Self {
            image_name: image_name.into(),
            counts,
        }
    }

    /// Drops `labels` from the report, so they no longer count toward the total.
    #[must_use]
    pub fn excluding<'a>(mut self, labels: impl IntoIterator<Item = &'a str>) -> Self {
        let excluded: Vec<&str> = labels.into_iter().collect();
        self.counts
            .retain(|entry| !excluded.contains(&entry.label.as_str()));
        self
    }

    /// Returns the image name the report describes.
    #[must_use]
    pub fn image_name(&self) -> &str {
        &self.image_name
    }

    /// Returns the per-label counts in label-set order.
    #[must_use]
    pub fn counts(&self) -> &[LabelCount] {
        &self.counts
    }

    /// Returns the count for `label`, if the report includes it.
    #[must_use]
    pub fn count(&self, label: &str) -> Option<usize> {
        self.counts
            .iter()
            .find(|entry| entry.label == label)
            .map(|entry| entry.count)
    }

    /// Returns the number of counted points.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.iter().map(|entry| entry.count).sum()
    }

    /// Returns `label`'s share of the total in percent; `0.0` for an empty report.
    #[must_use]
    pub fn percentage(&self, label: &str) -> Option<f64> {
        let count = self.count(label)?;
        let total = self.total();
        if total == 0 {
            return Some(0.0);
        }
        Some(100.0 * count as f64 / total as f64)
    }
}

impl fmt::Display for AnnotationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Annotation report")?;
        writeln!(f, "=================")?;
        writeln!(f, "Image: {}", self.image_name)?;
        for entry in &self.counts {
            let pct = self.percentage(&entry.label).unwrap_or(0.0);
            writeln!(f, "{}: {} ({pct:.1}%)", entry.label, entry.count)?;
        }
        writeln!(f, "Total: {}", self.total())
    }
}
