// Copyright 2025 the Pointmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use core::fmt;

use crate::PointId;

/// Error returned by store operations that cannot be corrected in place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreError {
    /// The operation referenced a point that is no longer in the store.
    ///
    /// [`AnnotationStore::remove`](crate::AnnotationStore::remove) never
    /// reports this; `update` and `promote` do, since for them a stale id
    /// means the caller lost track of the store.
    NotFound(PointId),
    /// The label is not part of the store's [`LabelSet`](crate::LabelSet).
    InvalidLabel(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "no annotation point with id {id}"),
            Self::InvalidLabel(label) => {
                write!(f, "label {label:?} is not in the configured label set")
            }
        }
    }
}

impl core::error::Error for StoreError {}
