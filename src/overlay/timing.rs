// SPDX-License-Identifier: GPL-3.0-only

//! Hold-after-release timing policy for the key label.
//!
//! When the last key is released the label does not clear immediately:
//! it is held for a grace window so that fast sequential taps (ordinary
//! typing) do not flicker the badge empty between keystrokes. The clear
//! timer is a plain deadline evaluated on the consumer tick — no background
//! timer thread — so canceling it is just dropping the deadline.

use std::time::{Duration, Instant};

/// Phase of the key-label display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayPhase {
    /// At least one displayable key is held; the label is live.
    Live,
    /// All keys released; the last label is held inside the grace window.
    Holding,
    /// Nothing shown.
    Cleared,
}

/// Key-display timing state machine.
#[derive(Debug, Clone)]
pub struct KeyDisplay {
    hold: Duration,
    last_label: String,
    clear_deadline: Option<Instant>,
}

impl KeyDisplay {
    /// Create a cleared display with the given hold window.
    #[must_use]
    pub fn new(hold: Duration) -> Self {
        Self {
            hold,
            last_label: String::new(),
            clear_deadline: None,
        }
    }

    /// Fire the clear timer if its deadline has passed. Safe to call when no
    /// timer is armed. Returns `true` if the label was cleared.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.clear_deadline {
            Some(deadline) if now >= deadline => {
                self.clear_deadline = None;
                self.last_label.clear();
                true
            }
            _ => false,
        }
    }

    /// Evaluate the policy against the tracker's current label string and
    /// return the text to display this tick.
    ///
    /// A non-empty `current` goes (back) to [`DisplayPhase::Live`] and
    /// cancels any pending clear. An empty `current` keeps showing the last
    /// label and arms the clear timer if it is not already running.
    pub fn update(&mut self, current: &str, now: Instant) -> String {
        if !current.is_empty() {
            self.clear_deadline = None;
            if self.last_label != current {
                self.last_label = current.to_string();
            }
            return self.last_label.clone();
        }

        if self.last_label.is_empty() {
            return String::new();
        }

        if self.clear_deadline.is_none() {
            self.clear_deadline = Some(now + self.hold);
        }
        self.last_label.clone()
    }

    /// Cancel a pending clear timer. Safe no-op when none is armed.
    pub fn cancel(&mut self) {
        self.clear_deadline = None;
    }

    /// Current phase of the display.
    #[must_use]
    pub fn phase(&self) -> DisplayPhase {
        if self.clear_deadline.is_some() {
            DisplayPhase::Holding
        } else if self.last_label.is_empty() {
            DisplayPhase::Cleared
        } else {
            DisplayPhase::Live
        }
    }

    /// The label currently on display.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.last_label
    }
}

// ============================================================================
// Tests
// ============================================================================
