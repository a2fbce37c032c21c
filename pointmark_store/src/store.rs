// Copyright 2025 the Pointmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Size};

use crate::{AnnotationPoint, LabelSet, PointId, PointUpdate, SeedPoint, StoreError};

/// Ordered collection of annotation points over an image of known size.
///
/// The store is the single source of truth for points; it is meant to have a
/// single writer (an interaction controller) while renderers and exporters
/// read owned copies via [`AnnotationStore::snapshot`].
///
/// Mutations never clamp on their own, so a drag may temporarily carry a
/// point outside the image. Writers run [`AnnotationStore::clamp_to_bounds`]
/// once a gesture completes, before anything observes the store.
#[derive(Clone, Debug)]
pub struct AnnotationStore {
    points: Vec<AnnotationPoint>,
    labels: LabelSet,
    bounds: Size,
    next_id: u64,
    revision: u64,
}

impl AnnotationStore {
    /// Creates an empty store over an image of size `bounds`.
    ///
    /// Negative dimensions are treated as zero.
    #[must_use]
    pub fn new(labels: LabelSet, bounds: Size) -> Self {
        Self {
            points: Vec::new(),
            labels,
            bounds: sanitize(bounds),
            next_id: 0,
            revision: 0,
        }
    }

    /// Returns the label set points are validated against.
    #[must_use]
    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    /// Returns the image bounds points are clamped into.
    #[must_use]
    pub fn bounds(&self) -> Size {
        self.bounds
    }

    /// Returns the number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the store holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the current revision counter.
    ///
    /// The revision is bumped only when a mutation changes the store's
    /// contents or order. No-op calls (promoting the topmost point, clamping
    /// points that are already in bounds, removing an absent id) leave it
    /// unchanged, so observers can compare revisions instead of contents.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Iterates over the points from bottom to top of the z-order.
    pub fn iter(&self) -> core::slice::Iter<'_, AnnotationPoint> {
        self.points.iter()
    }

    /// Returns the point with `id`, if present.
    #[must_use]
    pub fn get(&self, id: PointId) -> Option<&AnnotationPoint> {
        self.position_of(id).map(|idx| &self.points[idx])
    }

    /// Returns `true` if a point with `id` is present.
    #[must_use]
    pub fn contains(&self, id: PointId) -> bool {
        self.position_of(id).is_some()
    }

    /// Returns the z-order index of `id`; `len() - 1` is topmost.
    #[must_use]
    pub fn index_of(&self, id: PointId) -> Option<usize> {
        self.position_of(id)
    }

    /// Returns an owned copy of all points in z-order.
    ///
    /// The copy never aliases the store, so it may be held across later
    /// mutations.
    #[must_use]
    pub fn snapshot(&self) -> Vec<AnnotationPoint> {
        self.points.clone()
    }

    /// Appends a new point on top of the z-order and returns its fresh id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidLabel`] if the label set does not accept
    /// `label`. Nothing is inserted in that case.
    pub fn add(&mut self, position: Point, label: &str) -> Result<PointId, StoreError> {
        self.check_label(label)?;
        let id = self.allocate_id();
        let point = self.make_point(id, position, String::from(label));
        self.points.push(point);
        self.bump_revision();
        log::debug!("added {id} at ({}, {}) as {label:?}", position.x, position.y);
        Ok(id)
    }

    /// Removes the point with `id` and returns it.
    ///
    /// Removing an id that is not present is a no-op and returns `None`.
    pub fn remove(&mut self, id: PointId) -> Option<AnnotationPoint> {
        let idx = self.position_of(id)?;
        let removed = self.points.remove(idx);
        self.bump_revision();
        log::debug!("removed {id}");
        Some(removed)
    }

    /// Replaces one mutable field of the point with `id`.
    ///
    /// Positions are stored as given; out-of-range values are left for the
    /// next clamp pass.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if `id` is absent, or
    /// [`StoreError::InvalidLabel`] for a label the set does not accept.
    pub fn update(&mut self, id: PointId, update: PointUpdate) -> Result<(), StoreError> {
        let idx = self.require(id)?;
        match update {
            PointUpdate::Position(position) => {
                let point = &mut self.points[idx];
                if point.position == position {
                    return Ok(());
                }
                point.position = position;
            }
            PointUpdate::Label(label) => {
                self.check_label(&label)?;
                let color = self.labels.color_of(&label);
                let point = &mut self.points[idx];
                if point.label == label {
                    return Ok(());
                }
                point.label = label;
                point.color = color;
            }
        }
        self.bump_revision();
        Ok(())
    }

    /// Moves the point with `id` to the top of the z-order.
    ///
    /// Promoting the topmost point changes nothing, so calling this twice in a
    /// row is the same as calling it once.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if `id` is absent.
    pub fn promote(&mut self, id: PointId) -> Result<(), StoreError> {
        let idx = self.require(id)?;
        if idx + 1 == self.points.len() {
            return Ok(());
        }
        let point = self.points.remove(idx);
        self.points.push(point);
        self.bump_revision();
        Ok(())
    }

    /// Clamps every point into `[0, bounds.width] × [0, bounds.height]`.
    ///
    /// Returns how many points were moved. Running it again with the same
    /// bounds moves nothing.
    pub fn clamp(&mut self, bounds: Size) -> usize {
        let bounds = sanitize(bounds);
        let mut corrected = 0;
        for point in &mut self.points {
            let clamped = clamp_point(point.position, bounds);
            if clamped != point.position {
                log::debug!(
                    "clamped {} from ({}, {}) to ({}, {})",
                    point.id,
                    point.position.x,
                    point.position.y,
                    clamped.x,
                    clamped.y
                );
                point.position = clamped;
                corrected += 1;
            }
        }
        if corrected > 0 {
            self.bump_revision();
        }
        corrected
    }

    /// Clamps every point into the store's own bounds.
    pub fn clamp_to_bounds(&mut self) -> usize {
        self.clamp(self.bounds)
    }

    /// Replaces the image bounds and runs a clamp pass against them.
    ///
    /// Returns how many points were moved.
    pub fn set_bounds(&mut self, bounds: Size) -> usize {
        self.bounds = sanitize(bounds);
        self.clamp_to_bounds()
    }

    /// Replaces every point with the given seeds, for example when the host
    /// loads a new image.
    ///
    /// Seeds are validated before anything changes: if any label is rejected
    /// the store is left untouched. Accepted seeds get fresh ids in order and
    /// are clamped into the current bounds.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidLabel`] for the first seed whose label the
    /// set does not accept.
    pub fn reseed<I>(&mut self, seeds: I) -> Result<(), StoreError>
    where
        I: IntoIterator<Item = SeedPoint>,
    {
        let seeds: Vec<SeedPoint> = seeds.into_iter().collect();
        for seed in &seeds {
            self.check_label(&seed.label)?;
        }

        let mut points = Vec::with_capacity(seeds.len());
        for seed in seeds {
            let id = self.allocate_id();
            let position = clamp_point(seed.position, self.bounds);
            let point = self.make_point(id, position, seed.label);
            points.push(point);
        }
        self.points = points;
        self.bump_revision();
        log::debug!("reseeded store with {} points", self.points.len());
        Ok(())
    }

    fn check_label(&self, label: &str) -> Result<(), StoreError> {
        if self.labels.accepts(label) {
            Ok(())
        } else {
            log::warn!("rejecting label {label:?}");
            Err(StoreError::InvalidLabel(String::from(label)))
        }
    }

    fn make_point(&self, id: PointId, position: Point, label: String) -> AnnotationPoint {
        AnnotationPoint {
            id,
            position,
            color: self.labels.color_of(&label),
            label,
        }
    }

    fn allocate_id(&mut self) -> PointId {
        let id = PointId::from_raw(self.next_id);
        self.next_id += 1;
        id
    }

    fn require(&self, id: PointId) -> Result<usize, StoreError> {
        self.position_of(id).ok_or(StoreError::NotFound(id))
    }

    fn position_of(&self, id: PointId) -> Option<usize> {
        self.points.iter().position(|p| p.id == id)
    }

    fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

fn sanitize(bounds: Size) -> Size {
    Size::new(bounds.width.max(0.0), bounds.height.max(0.0))
}

// `f64::max`/`min` discard NaN, so a NaN coordinate heals to the lower bound.
fn clamp_point(position: Point, bounds: Size) -> Point {
    Point::new(
        position.x.max(0.0).min(bounds.width),
        position.y.max(0.0).min(bounds.height),
    )
}
