// Copyright 2025 the Pointmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hit testing of point glyphs in view space.
//!
//! Glyphs are circles drawn at a fixed view-pixel size regardless of zoom, so
//! hits are measured in view space after mapping each point through the
//! current [`ViewScale`].

use kurbo::Point;
use pointmark_store::{AnnotationStore, PointId};
use pointmark_view::ViewScale;

/// Size of a point glyph, in view pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HitParams {
    /// Radius of the glyph circle.
    pub point_size: f64,
    /// Width of the glyph outline; half of it extends past `point_size`.
    pub stroke_width: f64,
    /// Extra slack around the outline that still counts as a hit.
    pub tolerance: f64,
}

impl Default for HitParams {
    fn default() -> Self {
        Self {
            point_size: 5.0,
            stroke_width: 2.0,
            tolerance: 1.0,
        }
    }
}

impl HitParams {
    /// Returns the farthest a pointer may be from a point's center and still hit it.
    #[must_use]
    pub fn hit_radius(&self) -> f64 {
        (self.point_size + self.stroke_width * 0.5 + self.tolerance).max(0.0)
    }
}

/// The point a pointer landed on.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointHit {
    /// The point that was hit.
    pub id: PointId,
    /// Its z-order index at the time of the hit.
    pub index: usize,
    /// Distance from the pointer to the point's center, in view pixels.
    pub distance: f64,
}

/// Finds the topmost point whose glyph contains `view_pos`.
///
/// When glyphs overlap, the point last in z-order wins even if another center
/// is closer; this keeps the most recently touched point on top for both
/// drawing and picking.
#[must_use]
pub fn hit_test(
    store: &AnnotationStore,
    view: &ViewScale,
    view_pos: Point,
    params: &HitParams,
) -> Option<PointHit> {
    let radius = params.hit_radius();
    store
        .iter()
        .enumerate()
        .rev()
        .find_map(|(index, point)| {
            let center = view.image_to_view_point(point.position());
            let distance = center.distance(view_pos);
            (distance <= radius).then_some(PointHit {
                id: point.id(),
                index,
                distance,
            })
        })
}
