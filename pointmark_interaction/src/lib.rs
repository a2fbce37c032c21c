// Copyright 2025 the Pointmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointmark Interaction: turns pointer and key input into annotation edits.
//!
//! This crate sits between a host's input events and an
//! [`AnnotationStore`](pointmark_store::AnnotationStore). It resolves each
//! press against the current [`Mode`] and the point under the pointer, keeps
//! the single-point [`Selection`], tracks drags, and decides when the host
//! receives the exported point list.
//!
//! The core type is [`AnnotationController`]:
//! - **Create** mode adds a point with the current label where the user clicks
//!   on empty canvas. If a point is already selected, the click only deselects.
//! - **Transform** mode selects the clicked point, brings it to the top of the
//!   z-order, surfaces its label, and lets the user drag it.
//! - **Delete** mode removes the clicked point.
//!
//! Every input method returns the [`AnnotatorEvent`]s it caused, in order.
//! Exports ([`AnnotatorEvent::Exported`]) follow the [`CommitPolicy`]: after
//! each settled change, or only when the host forwards the commit key. Points
//! are clamped to the image before every export; a drag may carry a point
//! outside the image until the pointer is released.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use pointmark_interaction::{AnnotationController, AnnotatorEvent, Mode};
//! use pointmark_store::LabelSet;
//!
//! let mut controller = AnnotationController::new(
//!     LabelSet::new(["cat", "dog"]),
//!     Size::new(300.0, 200.0),
//! );
//! controller.set_mode(Mode::Create);
//! controller.set_current_label("cat");
//!
//! let events = controller.pointer_down(Point::new(40.0, 30.0)).unwrap();
//! assert!(matches!(events[0], AnnotatorEvent::Created(_)));
//! assert!(matches!(events.last(), Some(AnnotatorEvent::Exported(points)) if points.len() == 1));
//! ```
//!
//! Hosts that receive configuration as JSON can build a controller with
//! [`AnnotatorConfig::from_json`] and [`AnnotationController::from_config`].

mod commit;
mod config;
mod controller;
mod drag;
mod event;
mod hit;
mod mode;
mod selection;

pub use commit::CommitPolicy;
pub use config::{AnnotatorConfig, ConfigError};
pub use controller::{AnnotationController, OverlayOpacity};
pub use drag::PointDrag;
pub use event::{AnnotatorEvent, Events};
pub use hit::{HitParams, PointHit, hit_test};
pub use mode::Mode;
pub use selection::Selection;
