// Copyright 2025 the Pointmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointmark Store: the ordered set of labeled points annotated on an image.
//!
//! This crate owns the _data_ side of a point-annotation canvas. It knows
//! nothing about rendering, pointer events, or how the host application
//! receives results; callers drive it from a controller (see
//! `pointmark_interaction`) and read it back through [`AnnotationStore::snapshot`].
//!
//! The core type is [`AnnotationStore`], which tracks:
//! - An ordered list of [`AnnotationPoint`]s. Order only matters for z-order:
//!   the last point is drawn and hit-tested on top of all others.
//! - The [`LabelSet`] every point label must belong to, plus its label→color
//!   mapping.
//! - The image bounds every point is clamped into.
//! - A monotonically increasing **revision** counter that bumps when the store
//!   changes.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use pointmark_store::{AnnotationStore, LabelSet};
//!
//! let labels = LabelSet::new(["cat", "dog"]);
//! let mut store = AnnotationStore::new(labels, Size::new(300.0, 200.0));
//!
//! let a = store.add(Point::new(10.0, 10.0), "cat").unwrap();
//! let b = store.add(Point::new(20.0, 20.0), "dog").unwrap();
//!
//! // Interacting with `a` brings it to the top of the z-order.
//! store.promote(a).unwrap();
//! let order: Vec<_> = store.iter().map(|p| p.id()).collect();
//! assert_eq!(order, [b, a]);
//!
//! // Out-of-range positions are corrected, never rejected.
//! store.update(b, Point::new(-5.0, 400.0).into()).unwrap();
//! store.clamp_to_bounds();
//! assert_eq!(store.get(b).unwrap().position(), Point::new(0.0, 200.0));
//! ```
//!
//! ## Labels
//!
//! A non-empty [`LabelSet`] is authoritative: [`AnnotationStore::add`] and
//! label updates fail with [`StoreError::InvalidLabel`] for anything outside
//! it, and no partially-initialized point is ever inserted. An empty set means
//! labels are not required at all.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
mod id;
mod label;
mod point;
mod store;

pub use error::StoreError;
pub use id::PointId;
pub use label::{LabelColor, LabelSet};
pub use point::{AnnotationPoint, PointUpdate, SeedPoint};
pub use store::AnnotationStore;
