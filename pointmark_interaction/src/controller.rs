// Copyright 2025 the Pointmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Size};
use pointmark_export::{ExportedPoint, export_points, seeds_from};
use pointmark_store::{
    AnnotationPoint, AnnotationStore, LabelSet, PointId, PointUpdate, SeedPoint, StoreError,
};
use pointmark_view::ViewScale;

use crate::{
    AnnotatorConfig, AnnotatorEvent, CommitPolicy, ConfigError, Events, HitParams, Mode,
    PointDrag, Selection, hit_test,
};

/// Opacities of the optional mask and contour layers.
///
/// The controller only stores these for the renderer; they do not affect
/// any gesture.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OverlayOpacity {
    /// Mask layer opacity in `[0, 1]`.
    pub mask: f64,
    /// Contour layer opacity in `[0, 1]`.
    pub contour: f64,
}

impl OverlayOpacity {
    /// Creates overlay opacities, clamping both into `[0, 1]`.
    #[must_use]
    pub fn new(mask: f64, contour: f64) -> Self {
        Self {
            mask: unit(mask),
            contour: unit(contour),
        }
    }
}

impl Default for OverlayOpacity {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

// NaN heals to fully transparent.
fn unit(value: f64) -> f64 {
    value.max(0.0).min(1.0)
}

/// Resolves pointer and key input against the current mode and drives the
/// annotation store.
///
/// The controller is the store's only writer. Every input method returns the
/// [`Events`] it caused; exports are among them, timed by the
/// [`CommitPolicy`]. Before any export the store has been clamped to the image.
#[derive(Debug)]
pub struct AnnotationController {
    store: AnnotationStore,
    view: ViewScale,
    mode: Mode,
    current_label: String,
    selection: Selection,
    drag: PointDrag,
    hit: HitParams,
    commit: CommitPolicy,
    overlays: OverlayOpacity,
    settled_revision: u64,
    pending_commit: bool,
}

impl AnnotationController {
    /// Creates a controller over an empty store.
    #[must_use]
    pub fn new(labels: LabelSet, image_size: Size) -> Self {
        let store = AnnotationStore::new(labels, image_size);
        let settled_revision = store.revision();
        Self {
            view: ViewScale::new(store.bounds()),
            store,
            mode: Mode::default(),
            current_label: String::new(),
            selection: Selection::new(),
            drag: PointDrag::default(),
            hit: HitParams::default(),
            commit: CommitPolicy::default(),
            overlays: OverlayOpacity::default(),
            settled_revision,
            pending_commit: false,
        }
    }

    /// Creates a controller from host configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for an invalid image size, scale or color,
    /// or if the initial points carry labels outside the label list.
    pub fn from_config(config: &AnnotatorConfig) -> Result<Self, ConfigError> {
        let image_size = config.image_size()?;
        config.check_scales()?;
        let mut controller = Self::new(config.label_set()?, image_size);
        controller.store.reseed(seeds_from(&config.points))?;
        if let Some([min, max]) = config.zoom_limits {
            controller.view.set_zoom_limits(min, max);
        }
        controller.view.set_base_scale(config.base_scale);
        controller.view.set_zoom(config.zoom);
        controller.mode = config.mode;
        controller.current_label = config.label.clone();
        controller.hit = config.hit_params();
        controller.commit = config.commit_policy();
        controller.overlays = OverlayOpacity::new(config.mask_opacity, config.contour_opacity);
        controller.settled_revision = controller.store.revision();
        log::debug!(
            "annotator ready: {} points over {}x{}, mode {:?}, commit {:?}",
            controller.store.len(),
            image_size.width,
            image_size.height,
            controller.mode,
            controller.commit
        );
        Ok(controller)
    }

    /// Sets how glyphs are sized for hit testing.
    #[must_use]
    pub fn with_hit_params(mut self, hit: HitParams) -> Self {
        self.hit = hit;
        self
    }

    /// Sets when exports are emitted.
    #[must_use]
    pub fn with_commit_policy(mut self, commit: CommitPolicy) -> Self {
        self.commit = commit;
        self
    }

    /// Returns the store for reading.
    #[must_use]
    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }

    /// Returns the view scale.
    #[must_use]
    pub fn view(&self) -> &ViewScale {
        &self.view
    }

    /// Returns the current mode.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the label new points get.
    #[must_use]
    pub fn current_label(&self) -> &str {
        &self.current_label
    }

    /// Returns the selected point, if any.
    #[must_use]
    pub fn selection(&self) -> Option<PointId> {
        self.selection.get()
    }

    /// Returns a counter that changes whenever the selected point changes.
    ///
    /// Renderers can compare it between frames instead of diffing selections.
    #[must_use]
    pub fn selection_revision(&self) -> u64 {
        self.selection.revision()
    }

    /// Returns the hit-testing glyph size.
    #[must_use]
    pub fn hit_params(&self) -> HitParams {
        self.hit
    }

    /// Returns the commit policy.
    #[must_use]
    pub fn commit_policy(&self) -> &CommitPolicy {
        &self.commit
    }

    /// Returns the overlay opacities.
    #[must_use]
    pub fn overlays(&self) -> OverlayOpacity {
        self.overlays
    }

    /// Returns `true` while a point is being dragged.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Returns `true` if a deferred policy is holding back changes.
    #[must_use]
    pub fn has_pending_commit(&self) -> bool {
        self.pending_commit
    }

    /// Returns an owned copy of the points for rendering.
    #[must_use]
    pub fn snapshot(&self) -> Vec<AnnotationPoint> {
        self.store.snapshot()
    }

    /// Returns the export records for the current points.
    #[must_use]
    pub fn export(&self) -> Vec<ExportedPoint> {
        export_points(&self.store)
    }

    /// Returns the rendered canvas height in view pixels.
    #[must_use]
    pub fn frame_height(&self) -> f64 {
        self.view.frame_height()
    }

    /// Events a host needs right after construction: the layout height and,
    /// under an immediate policy, the initial export.
    #[must_use]
    pub fn initial_sync(&self) -> Events {
        let mut events = Events::new();
        events.push(AnnotatorEvent::LayoutChanged {
            frame_height: self.frame_height(),
        });
        if self.commit.is_immediate() {
            events.push(AnnotatorEvent::Exported(self.export()));
        }
        events
    }

    /// Switches the tool. Any drag in progress ends where it is.
    pub fn set_mode(&mut self, mode: Mode) -> Events {
        let mut events = Events::new();
        if self.mode == mode {
            return events;
        }
        self.end_drag();
        self.mode = mode;
        self.settle(&mut events);
        events
    }

    /// Sets the label new points get.
    ///
    /// The label is checked when a point is created, not here.
    pub fn set_current_label(&mut self, label: impl Into<String>) {
        self.current_label = label.into();
    }

    /// Replaces the commit policy.
    pub fn set_commit_policy(&mut self, commit: CommitPolicy) {
        self.commit = commit;
    }

    /// Replaces the overlay opacities.
    pub fn set_overlays(&mut self, overlays: OverlayOpacity) {
        self.overlays = OverlayOpacity::new(overlays.mask, overlays.contour);
    }

    /// Handles a pointer press at `view_pos` (canvas pixels).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidLabel`] if the press would create a point
    /// but the current label is not in the label set. Nothing changes then.
    pub fn pointer_down(&mut self, view_pos: Point) -> Result<Events, StoreError> {
        let mut events = Events::new();
        if self.drag.is_dragging() {
            log::warn!("pointer down during an active drag; ending the drag first");
            self.end_drag();
            self.settle(&mut events);
        }

        let Some(hit) = hit_test(&self.store, &self.view, view_pos, &self.hit) else {
            self.press_empty(view_pos, &mut events)?;
            self.settle(&mut events);
            return Ok(events);
        };

        match self.mode {
            Mode::Transform => {
                if self.selection.select(hit.id) {
                    events.push(AnnotatorEvent::Selected(hit.id));
                }
                self.store.promote(hit.id)?;
                if let Some(point) = self.store.get(hit.id) {
                    if point.label() != self.current_label {
                        self.current_label = point.label().to_owned();
                        events.push(AnnotatorEvent::LabelSurfaced(self.current_label.clone()));
                    }
                    self.drag.start(hit.id, view_pos, point.position());
                }
            }
            Mode::Delete => {
                self.store.remove(hit.id);
                if self.selection.is_selected(hit.id) {
                    self.selection.clear();
                    events.push(AnnotatorEvent::Deselected);
                }
                events.push(AnnotatorEvent::Removed(hit.id));
            }
            Mode::Create => {
                log::debug!("press on {} ignored in create mode", hit.id);
            }
        }
        self.settle(&mut events);
        Ok(events)
    }

    /// Handles pointer movement. Only matters while dragging.
    ///
    /// The dragged point follows the pointer without clamping; the correction
    /// happens when the drag ends.
    pub fn pointer_move(&mut self, view_pos: Point) -> Events {
        let mut events = Events::new();
        self.drag_to(view_pos, &mut events);
        events
    }

    /// Handles a pointer release, ending any drag at `view_pos`.
    pub fn pointer_up(&mut self, view_pos: Point) -> Events {
        let mut events = Events::new();
        if !self.drag.is_dragging() {
            return events;
        }
        self.drag_to(view_pos, &mut events);
        self.end_drag();
        self.settle(&mut events);
        events
    }

    /// Handles a key press forwarded by the host.
    ///
    /// Under [`CommitPolicy::Deferred`] the commit key emits the current
    /// points, whether or not anything changed since the last commit. A drag
    /// in progress ends first, so the export is clamped to the image.
    pub fn key_down(&mut self, key: &str) -> Events {
        let mut events = Events::new();
        if self.commit.is_commit_key(key) {
            self.end_drag();
            self.settle(&mut events);
            self.pending_commit = false;
            events.push(AnnotatorEvent::Exported(self.export()));
        }
        events
    }

    /// Sets the user zoom factor.
    ///
    /// A drag in progress continues from where the point is now drawn.
    pub fn set_zoom(&mut self, zoom: f64) -> Events {
        let changed = self.view.set_zoom(zoom);
        self.after_rescale(changed)
    }

    /// Sets the base scale.
    pub fn set_base_scale(&mut self, base: f64) -> Events {
        let changed = self.view.set_base_scale(base);
        self.after_rescale(changed)
    }

    /// Fits the image to a container `width` view pixels wide.
    pub fn fit_to_width(&mut self, width: f64) -> Events {
        let changed = self.view.fit_to_width(width);
        self.after_rescale(changed)
    }

    /// Changes the image size, clamping points into the new bounds.
    pub fn set_image_size(&mut self, size: Size) -> Events {
        let mut events = Events::new();
        if !self.view.set_image_size(size) {
            return events;
        }
        self.end_drag();
        self.store.set_bounds(self.view.image_size());
        events.push(AnnotatorEvent::LayoutChanged {
            frame_height: self.frame_height(),
        });
        self.settle(&mut events);
        events
    }

    /// Replaces all points, for example when the host loads a new image.
    ///
    /// Selection and any drag are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidLabel`] if any seed has a label outside the
    /// label set; the store is left untouched then.
    pub fn reseed<I>(&mut self, seeds: I) -> Result<Events, StoreError>
    where
        I: IntoIterator<Item = SeedPoint>,
    {
        self.store.reseed(seeds)?;
        let mut events = Events::new();
        self.drag.end();
        if self.selection.clear() {
            events.push(AnnotatorEvent::Deselected);
        }
        self.settle(&mut events);
        Ok(events)
    }

    fn press_empty(&mut self, view_pos: Point, events: &mut Events) -> Result<(), StoreError> {
        if self.mode == Mode::Create && self.selection.is_empty() {
            let position = self.view.view_to_image_point(view_pos);
            let id = self.store.add(position, &self.current_label)?;
            self.selection.select(id);
            events.push(AnnotatorEvent::Created(id));
            events.push(AnnotatorEvent::Selected(id));
        } else if self.selection.clear() {
            events.push(AnnotatorEvent::Deselected);
        }
        Ok(())
    }

    fn drag_to(&mut self, view_pos: Point, events: &mut Events) {
        let Some(id) = self.drag.target else {
            return;
        };
        let Some(position) = self.drag.target_position(view_pos, &self.view) else {
            return;
        };
        let before = self.store.revision();
        match self.store.update(id, PointUpdate::Position(position)) {
            Ok(()) if self.store.revision() != before => events.push(AnnotatorEvent::Moved(id)),
            Ok(()) => {}
            Err(err) => {
                log::warn!("dropping drag: {err}");
                self.drag.end();
            }
        }
    }

    // Keeps a dragged point under the pointer across a scale change.
    fn rebase_drag(&mut self) {
        let Some(id) = self.drag.target else {
            return;
        };
        if let Some(point) = self.store.get(id) {
            let position = point.position();
            self.drag
                .rebase(self.view.image_to_view_point(position), position);
        }
    }

    fn end_drag(&mut self) {
        if let Some(id) = self.drag.end() {
            log::debug!("drag of {id} ended");
        }
    }

    fn after_rescale(&mut self, changed: bool) -> Events {
        let mut events = Events::new();
        if changed {
            self.rebase_drag();
            events.push(AnnotatorEvent::LayoutChanged {
                frame_height: self.frame_height(),
            });
        }
        events
    }

    /// Runs the clamp pass and emits or defers an export if the store changed
    /// since the last settle. Does nothing mid-drag.
    fn settle(&mut self, events: &mut Events) {
        if self.drag.is_dragging() {
            return;
        }
        self.store.clamp_to_bounds();
        let revision = self.store.revision();
        if revision == self.settled_revision {
            return;
        }
        self.settled_revision = revision;
        if self.commit.is_immediate() {
            events.push(AnnotatorEvent::Exported(self.export()));
        } else {
            self.pending_commit = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> AnnotationController {
        let mut c = AnnotationController::new(LabelSet::new(["a"]), Size::new(100.0, 100.0));
        c.reseed([SeedPoint::new((10.0, 10.0), "a")]).unwrap();
        c
    }

    #[test]
    fn controller_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<AnnotationController>();
    }

    #[test]
    fn overlay_opacity_is_clamped() {
        let overlays = OverlayOpacity::new(-0.5, 3.0);
        assert_eq!((overlays.mask, overlays.contour), (0.0, 1.0));
        assert_eq!(OverlayOpacity::new(f64::NAN, 0.5).mask, 0.0);
    }

    #[test]
    fn press_during_drag_settles_the_old_drag() {
        let mut c = controller();
        c.pointer_down(Point::new(10.0, 10.0)).unwrap();
        c.pointer_move(Point::new(-50.0, 10.0));
        assert!(c.is_dragging());

        // The release was lost; the next press finishes the drag first.
        let events = c.pointer_down(Point::new(90.0, 90.0)).unwrap();
        assert!(!c.is_dragging());
        let id = c.store().iter().next().unwrap().id();
        assert_eq!(c.store().get(id).unwrap().position(), Point::new(0.0, 10.0));
        assert!(matches!(events[0], AnnotatorEvent::Exported(_)));
        assert_eq!(events[1], AnnotatorEvent::Deselected);
    }

    #[test]
    fn set_mode_ends_drag() {
        let mut c = controller();
        c.pointer_down(Point::new(10.0, 10.0)).unwrap();
        c.pointer_move(Point::new(20.0, 200.0));
        let events = c.set_mode(Mode::Delete);
        assert!(!c.is_dragging());
        assert!(matches!(events.as_slice(), [AnnotatorEvent::Exported(points)] if points[0].position == [20.0, 100.0]));
    }

    #[test]
    fn create_mode_ignores_point_hits() {
        let mut c = controller();
        c.set_mode(Mode::Create);
        c.set_current_label("a");
        let events = c.pointer_down(Point::new(10.0, 10.0)).unwrap();
        assert!(events.is_empty());
        assert_eq!(c.store().len(), 1);
    }
}
