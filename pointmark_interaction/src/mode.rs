// Copyright 2025 the Pointmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use serde::{Deserialize, Serialize};

/// The tool the host has selected; decides what a pointer-down does.
///
/// The controller never changes the mode on its own.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// Clicking empty canvas creates a point with the current label.
    Create,
    /// Clicking a point selects it and brings it to the top; dragging moves it.
    #[default]
    Transform,
    /// Clicking a point removes it.
    #[serde(alias = "Del")]
    Delete,
}
