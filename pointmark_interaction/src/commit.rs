// Copyright 2025 the Pointmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// When the controller hands the point list to the host.
///
/// Exactly one policy is active at a time; the controller never emits the
/// same change under both.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CommitPolicy {
    /// Emit after every settled store mutation.
    #[default]
    Immediate,
    /// Emit only when the host forwards a press of `key`.
    ///
    /// Mutations in between are held back and reported by
    /// [`AnnotationController::has_pending_commit`](crate::AnnotationController::has_pending_commit).
    Deferred {
        /// Key name as reported by the host, for example `" "` for the space bar.
        key: String,
    },
}

impl CommitPolicy {
    /// Defers commits to presses of `key`.
    pub fn on_key(key: impl Into<String>) -> Self {
        Self::Deferred { key: key.into() }
    }

    /// Defers commits to the space bar.
    #[must_use]
    pub fn on_space() -> Self {
        Self::on_key(" ")
    }

    /// Returns `true` if `key` commits under this policy.
    #[must_use]
    pub fn is_commit_key(&self, key: &str) -> bool {
        matches!(self, Self::Deferred { key: commit } if commit == key)
    }

    /// Returns `true` if mutations are emitted as they happen.
    #[must_use]
    pub fn is_immediate(&self) -> bool {
        matches!(self, Self::Immediate)
    }
}
