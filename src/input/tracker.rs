// SPDX-License-Identifier: GPL-3.0-only

//! Canonical "currently held" state for keys and mouse buttons.
//!
//! [`InputState`] is owned exclusively by the consumer tick; all mutation
//! happens there, so no locking is needed. Operations are total: releasing
//! an untracked key and pressing an untracked mouse button are both no-ops.

use crate::app_settings;
use crate::channel::MouseButton;
use crate::input::key::{self, KeyIdentity, RawKey};
use std::collections::{HashMap, HashSet};

/// Currently-pressed keys and mouse button state.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Identities of keys currently held.
    pressed: HashSet<KeyIdentity>,
    /// Last raw key seen for each identity. Never pruned on release: the
    /// hold window may still need to label a just-released key.
    key_for_identity: HashMap<KeyIdentity, RawKey>,
    left_down: bool,
    right_down: bool,
}

impl InputState {
    /// Create an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a key press or release.
    ///
    /// Press inserts the key's identity and records (or overwrites) the raw
    /// key for labeling. Release removes the identity; releasing a key that
    /// is not tracked is a no-op, so out-of-order or repeated releases are
    /// harmless.
    pub fn apply_key_event(&mut self, raw: &RawKey, pressed: bool) {
        let id = key::identity(raw);
        if pressed {
            self.key_for_identity.insert(id.clone(), raw.clone());
            self.pressed.insert(id);
        } else {
            self.pressed.remove(&id);
        }
    }

    /// Apply a mouse button press or release. Buttons other than left and
    /// right are not tracked and are skipped.
    pub fn apply_mouse_event(&mut self, button: MouseButton, pressed: bool) {
        match button {
            MouseButton::Left => self.left_down = pressed,
            MouseButton::Right => self.right_down = pressed,
            MouseButton::Other(code) => {
                tracing::trace!(code, pressed, "ignoring untracked mouse button");
            }
        }
    }

    /// Whether the left mouse button is down.
    #[must_use]
    pub fn left_down(&self) -> bool {
        self.left_down
    }

    /// Whether the right mouse button is down.
    #[must_use]
    pub fn right_down(&self) -> bool {
        self.right_down
    }

    /// Number of key identities currently held.
    #[must_use]
    pub fn pressed_count(&self) -> usize {
        self.pressed.len()
    }

    /// Whether the given identity is currently held.
    #[must_use]
    pub fn is_pressed(&self, id: &KeyIdentity) -> bool {
        self.pressed.contains(id)
    }

    /// Render the held keys as a display string.
    ///
    /// Labels are deduplicated (both Ctrl keys held shows one `"Ctrl"`),
    /// sorted modifiers-first with alphabetical tie-breaking, and joined
    /// with `" + "`. Returns the empty string when nothing displayable is
    /// held.
    #[must_use]
    pub fn current_label_string(&self) -> String {
        let mut labels: Vec<String> = Vec::new();
        for id in &self.pressed {
            let Some(raw) = self.key_for_identity.get(id) else {
                continue;
            };
            let label = key::label(raw);
            if !label.is_empty() && !labels.contains(&label) {
                labels.push(label);
            }
        }
        labels.sort_by(|a, b| {
            (key::label_rank(a), a.as_str()).cmp(&(key::label_rank(b), b.as_str()))
        });
        labels.join(app_settings::LABEL_SEPARATOR)
    }
}

// ============================================================================
// Tests
// ============================================================================
