// Copyright 2025 the Pointmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag tracking for a single point.
//!
//! ## Usage
//!
//! 1) Start a drag with [`PointDrag::start`], passing the grabbed point, the
//!    pointer position in view space, and the point's image-space position.
//! 2) On each move, call [`PointDrag::target_position`] to get where the point
//!    should now be in image space.
//! 3) End the drag with [`PointDrag::end`].
//!
//! The grab offset is preserved: the point moves by exactly as much as the
//! pointer does, scaled into image space, instead of jumping so that its
//! center sits under the pointer.

use kurbo::{Point, Vec2};
use pointmark_store::PointId;
use pointmark_view::ViewScale;

/// Tracks the drag of one point across pointer moves.
#[derive(Debug, Clone, Default, Copy)]
pub struct PointDrag {
    /// The point being dragged.
    pub target: Option<PointId>,
    /// Pointer position (view space) where the drag started.
    pub start_pos: Option<Point>,
    /// Image-space position of the point when the drag started.
    pub origin: Option<Point>,
}

impl PointDrag {
    /// Starts dragging `target`, grabbed at `pointer` while it sat at `origin`.
    pub fn start(&mut self, target: PointId, pointer: Point, origin: Point) {
        self.target = Some(target);
        self.start_pos = Some(pointer);
        self.origin = Some(origin);
    }

    /// Re-anchors an active drag after the view scale changed.
    ///
    /// The point's current image position becomes the new origin, and the
    /// pointer position it is now drawn under becomes the new start.
    pub fn rebase(&mut self, pointer: Point, origin: Point) {
        if self.target.is_some() {
            self.start_pos = Some(pointer);
            self.origin = Some(origin);
        }
    }

    /// Returns the pointer's total view-space offset from the drag start.
    #[must_use]
    pub fn total_offset(&self, pointer: Point) -> Option<Vec2> {
        self.start_pos.map(|start| pointer - start)
    }

    /// Returns where the dragged point belongs in image space for `pointer`.
    ///
    /// The result is not clamped to the image.
    #[must_use]
    pub fn target_position(&self, pointer: Point, view: &ViewScale) -> Option<Point> {
        let origin = self.origin?;
        let offset = self.total_offset(pointer)?;
        Some(origin + offset / view.combined())
    }

    /// Ends the drag and returns the point that was being dragged.
    pub fn end(&mut self) -> Option<PointId> {
        self.start_pos = None;
        self.origin = None;
        self.target.take()
    }

    /// Returns `true` while a drag is active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.target.is_some()
    }
}
