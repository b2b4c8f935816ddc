// SPDX-License-Identifier: GPL-3.0-only

//! Input state for the overlay: key identity, labeling, and held-state
//! tracking.
//!
//! # Features
//!
//! - **Key identity**: derive a stable, collision-free identity from a raw
//!   key event, so press and release of the same physical key match
//! - **Labeling**: derive the short display label for a key, including the
//!   control-character decode for Ctrl+letter combinations
//! - **Held-state tracking**: [`InputState`] holds the set of pressed key
//!   identities and the two tracked mouse buttons, and renders the sorted
//!   label string
//!
//! Identity and labeling are pure functions; `InputState` is mutated only by
//! the consumer tick that owns it.

// Sub-modules
pub mod key;
pub mod tracker;

// Re-export public API
pub use key::{identity, label, label_rank, KeyIdentity, RawKey};
pub use tracker::InputState;

// ============================================================================
// Module Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Pressing Shift, Ctrl, then A through the public API renders the
    /// human-expected ordering, regardless of press order.
    #[test]
    fn test_end_to_end_label_ordering() {
        let mut state = InputState::new();
        state.apply_key_event(&RawKey::Named("shift_r".to_string()), true);
        state.apply_key_event(&RawKey::Named("ctrl_r".to_string()), true);
        state.apply_key_event(
            &RawKey::Character { vk: Some(65), ch: Some('\u{1}') },
            true,
        );

        assert_eq!(state.current_label_string(), "Ctrl + Shift + A");
    }

    /// A Ctrl+letter control character both identifies and labels correctly
    /// through the tracker.
    #[test]
    fn test_control_character_through_tracker() {
        let mut state = InputState::new();
        let raw = RawKey::Character { vk: None, ch: Some('\u{1a}') };

        state.apply_key_event(&raw, true);
        assert_eq!(state.current_label_string(), "Z");

        state.apply_key_event(&raw, false);
        assert_eq!(state.current_label_string(), "");
    }
}
