// Copyright 2025 the Pointmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;
use pointmark_store::{AnnotationPoint, AnnotationStore, LabelSet, SeedPoint};
use serde::{Deserialize, Serialize};

use crate::ExportError;

/// One exported annotation point.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportedPoint {
    /// `[x, y]` in image pixel space.
    #[serde(alias = "point")]
    pub position: [f64; 2],
    /// The point's label.
    pub label: String,
    /// Position of `label` in the label set; encoded as `-1` when absent.
    #[serde(alias = "label_id", with = "label_index", default)]
    pub label_index: Option<usize>,
}

impl ExportedPoint {
    /// Builds the record for `point`, resolving its label against `labels`.
    #[must_use]
    pub fn from_point(point: &AnnotationPoint, labels: &LabelSet) -> Self {
        let position = point.position();
        Self {
            position: [position.x, position.y],
            label: point.label().to_owned(),
            label_index: labels.index_of(point.label()),
        }
    }

    /// Returns the position as a [`Point`].
    #[must_use]
    pub fn point(&self) -> Point {
        Point::new(self.position[0], self.position[1])
    }
}

/// Exports every point of `store` in z-order.
#[must_use]
pub fn export_points(store: &AnnotationStore) -> Vec<ExportedPoint> {
    store
        .iter()
        .map(|p| ExportedPoint::from_point(p, store.labels()))
        .collect()
}

/// Turns exported records back into seeds for
/// [`AnnotationStore::reseed`](pointmark_store::AnnotationStore::reseed).
///
/// `label_index` is not consulted; the store recomputes it from the label.
pub fn seeds_from(points: &[ExportedPoint]) -> impl Iterator<Item = SeedPoint> + '_ {
    points
        .iter()
        .map(|p| SeedPoint::new(p.point(), p.label.clone()))
}

/// Encodes records as a JSON array.
///
/// # Errors
///
/// Returns [`ExportError::Json`] if serialization fails.
pub fn to_json(points: &[ExportedPoint]) -> Result<String, ExportError> {
    Ok(serde_json::to_string(points)?)
}

/// Decodes a JSON array of records.
///
/// # Errors
///
/// Returns [`ExportError::Json`] if `text` is not a valid record array.
pub fn from_json(text: &str) -> Result<Vec<ExportedPoint>, ExportError> {
    Ok(serde_json::from_str(text)?)
}

mod label_index {
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(
        index: &Option<usize>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match index.and_then(|idx| i64::try_from(idx).ok()) {
            Some(idx) => serializer.serialize_i64(idx),
            None => serializer.serialize_i64(-1),
        }
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<usize>, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        Ok(usize::try_from(raw).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_label_encodes_as_minus_one() {
        let point = ExportedPoint {
            position: [1.0, 2.0],
            label: "bird".into(),
            label_index: None,
        };
        let json = to_json(&[point]).unwrap();
        assert_eq!(json, r#"[{"position":[1.0,2.0],"label":"bird","label_index":-1}]"#);
    }

    #[test]
    fn decodes_legacy_field_names() {
        let text = r#"[{"point":[3,4],"label_id":2,"label":"Ignore"},{"point":[5,6],"label_id":-1,"label":"x"}]"#;
        let points = from_json(text).unwrap();
        assert_eq!(points[0].position, [3.0, 4.0]);
        assert_eq!(points[0].label_index, Some(2));
        assert_eq!(points[1].label_index, None);
    }

    #[test]
    fn label_index_defaults_when_missing() {
        let points = from_json(r#"[{"position":[0,0],"label":"a"}]"#).unwrap();
        assert_eq!(points[0].label_index, None);
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(from_json("{"), Err(ExportError::Json(_))));
    }
}
