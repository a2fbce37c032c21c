// Copyright 2025 the Pointmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use pointmark_export::ExportedPoint;
use pointmark_store::PointId;
use smallvec::SmallVec;

/// Something the host should react to after a controller call.
#[derive(Clone, Debug, PartialEq)]
pub enum AnnotatorEvent {
    /// A point was created.
    Created(PointId),
    /// A point became the selection.
    Selected(PointId),
    /// The selection was cleared.
    Deselected,
    /// A point was deleted.
    Removed(PointId),
    /// A dragged point moved. Not emitted for clamp corrections.
    Moved(PointId),
    /// A selected point's label should become the label selector's value.
    LabelSurfaced(String),
    /// The full point list for the host, in z-order.
    Exported(Vec<ExportedPoint>),
    /// The rendered canvas height changed.
    LayoutChanged {
        /// Image height times the combined view scale, in view pixels.
        frame_height: f64,
    },
}

/// Events produced by one controller call, in the order they happened.
pub type Events = SmallVec<[AnnotatorEvent; 4]>;
