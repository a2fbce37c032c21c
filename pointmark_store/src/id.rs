// Copyright 2025 the Pointmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// Opaque identity of an annotation point.
///
/// Ids are handed out by a single [`AnnotationStore`](crate::AnnotationStore)
/// from a monotonically increasing counter and are never reused by that store,
/// not even after [`reseed`](crate::AnnotationStore::reseed). Comparing ids
/// from two different stores is meaningless.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PointId(u64);

impl PointId {
    /// Returns the raw counter value backing this id.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    pub(crate) const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "point-{}", self.0)
    }
}
