// SPDX-License-Identifier: GPL-3.0-only

//! The immutable display snapshot handed to the render bridge.

use serde::{Deserialize, Serialize};

/// Everything the renderer needs to draw one frame of the badge.
///
/// Produced by the controller after each tick; the renderer is purely
/// reactive to these values and holds no state of its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySnapshot {
    /// Left mouse button is down.
    pub left_down: bool,
    /// Right mouse button is down.
    pub right_down: bool,
    /// Key label text; empty when nothing is shown.
    pub label_text: String,
    /// Effective visibility of the overlay.
    pub visible: bool,
}

// ============================================================================
// Tests
// ============================================================================
