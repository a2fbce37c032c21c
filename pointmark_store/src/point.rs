// Copyright 2025 the Pointmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

use kurbo::Point;

use crate::{LabelColor, PointId};

/// A labeled point in image space.
///
/// Points are only created by an [`AnnotationStore`](crate::AnnotationStore),
/// which guarantees a unique id and a label accepted by its label set. The
/// color always follows the label.
#[derive(Clone, Debug, PartialEq)]
pub struct AnnotationPoint {
    pub(crate) id: PointId,
    pub(crate) position: Point,
    pub(crate) label: String,
    pub(crate) color: LabelColor,
}

impl AnnotationPoint {
    /// Returns the point's identity.
    #[must_use]
    pub fn id(&self) -> PointId {
        self.id
    }

    /// Returns the position in image pixel space.
    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    /// Returns the label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the display color derived from the label.
    #[must_use]
    pub fn color(&self) -> LabelColor {
        self.color
    }
}

/// A replacement for one of a point's mutable fields.
#[derive(Clone, Debug, PartialEq)]
pub enum PointUpdate {
    /// Move the point to a new image-space position.
    Position(Point),
    /// Relabel the point; its color is re-derived from the new label.
    Label(String),
}

impl From<Point> for PointUpdate {
    fn from(position: Point) -> Self {
        Self::Position(position)
    }
}

/// A point supplied by the host when seeding a store.
#[derive(Clone, Debug, PartialEq)]
pub struct SeedPoint {
    /// Position in image pixel space.
    pub position: Point,
    /// Label; must be accepted by the store's label set.
    pub label: String,
}

impl SeedPoint {
    /// Creates a seed point.
    pub fn new(position: impl Into<Point>, label: impl Into<String>) -> Self {
        Self {
            position: position.into(),
            label: label.into(),
        }
    }
}
