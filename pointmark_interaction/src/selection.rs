// Copyright 2025 the Pointmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use pointmark_store::PointId;

/// At most one selected point, plus a revision counter.
///
/// Selection is ephemeral UI state: it is never exported and is dropped
/// whenever the store is reseeded.
#[derive(Clone, Debug, Default)]
pub struct Selection {
    current: Option<PointId>,
    revision: u64,
}

impl Selection {
    /// Creates an empty selection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current: None,
            revision: 0,
        }
    }

    /// Returns the selected point, if any.
    #[must_use]
    pub fn get(&self) -> Option<PointId> {
        self.current
    }

    /// Returns `true` if nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    /// Returns `true` if `id` is the selected point.
    #[must_use]
    pub fn is_selected(&self, id: PointId) -> bool {
        self.current == Some(id)
    }

    /// Returns the current revision counter.
    ///
    /// Bumped only when the selected point actually changes.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Selects `id`, replacing any previous selection. Returns `true` on change.
    pub fn select(&mut self, id: PointId) -> bool {
        if self.current == Some(id) {
            return false;
        }
        self.current = Some(id);
        self.bump_revision();
        true
    }

    /// Clears the selection. Returns `true` if something was selected.
    pub fn clear(&mut self) -> bool {
        if self.current.take().is_none() {
            return false;
        }
        self.bump_revision();
        true
    }

    fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Point, Size};
    use pointmark_store::{AnnotationStore, LabelSet};

    fn ids() -> (PointId, PointId) {
        let mut store = AnnotationStore::new(LabelSet::default(), Size::new(10.0, 10.0));
        let a = store.add(Point::ZERO, "").unwrap();
        let b = store.add(Point::ZERO, "").unwrap();
        (a, b)
    }

    #[test]
    fn revision_bumps_only_on_change() {
        let (a, b) = ids();
        let mut selection = Selection::new();
        assert_eq!(selection.revision(), 0);

        assert!(selection.select(a));
        assert_eq!(selection.revision(), 1);
        assert!(!selection.select(a));
        assert_eq!(selection.revision(), 1);

        assert!(selection.select(b));
        assert!(selection.is_selected(b));
        assert_eq!(selection.revision(), 2);
    }

    #[test]
    fn clear_on_empty_is_a_no_op() {
        let (a, _) = ids();
        let mut selection = Selection::new();
        assert!(!selection.clear());
        assert_eq!(selection.revision(), 0);

        selection.select(a);
        assert!(selection.clear());
        assert!(selection.is_empty());
        assert_eq!(selection.revision(), 2);
    }
}
