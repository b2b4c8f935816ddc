// SPDX-License-Identifier: GPL-3.0-only

//! Visibility state machine: manual toggle plus inactivity auto-hide.
//!
//! Effective visibility is `user_visible && !auto_hidden`. The manual
//! toggle takes precedence: while the user has hidden the overlay, no
//! amount of input activity shows it. The inactivity timer is a deadline
//! evaluated on the consumer tick, like the clear timer in
//! [`timing`](crate::overlay::timing).

use crate::config::InactivityTimeout;
use std::time::Instant;

/// Externally observable visibility phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityPhase {
    /// The overlay is visible.
    Shown,
    /// Hidden by the inactivity timer; any input shows it again.
    AutoHidden,
    /// Hidden by the user; only the manual toggle shows it again.
    UserHidden,
}

/// Visibility state owned by the consumer tick.
#[derive(Debug, Clone)]
pub struct VisibilityState {
    user_visible: bool,
    auto_hidden: bool,
    timeout: InactivityTimeout,
    inactivity_deadline: Option<Instant>,
}

impl VisibilityState {
    /// Create a shown overlay with the inactivity timer armed (unless the
    /// timeout is `Off`).
    #[must_use]
    pub fn new(timeout: InactivityTimeout, now: Instant) -> Self {
        let mut state = Self {
            user_visible: true,
            auto_hidden: false,
            timeout,
            inactivity_deadline: None,
        };
        state.rearm(now);
        state
    }

    fn rearm(&mut self, now: Instant) {
        self.inactivity_deadline = self.timeout.duration().map(|d| now + d);
    }

    /// Record a processed input event: clears auto-hide and restarts the
    /// inactivity timer.
    pub fn note_activity(&mut self, now: Instant) {
        self.auto_hidden = false;
        self.rearm(now);
    }

    /// Manual show/hide toggle. Turning the overlay back on counts as fresh
    /// activity, so it does not immediately auto-hide again.
    pub fn toggle(&mut self, now: Instant) {
        self.user_visible = !self.user_visible;
        tracing::debug!(visible = self.user_visible, "overlay visibility toggled");
        if self.user_visible {
            self.note_activity(now);
        }
    }

    /// Change the inactivity timeout: clears auto-hide and re-arms the
    /// timer under the new duration.
    pub fn set_timeout(&mut self, timeout: InactivityTimeout, now: Instant) {
        tracing::debug!(from = ?self.timeout, to = ?timeout, "inactivity timeout updated");
        self.timeout = timeout;
        self.auto_hidden = false;
        self.rearm(now);
    }

    /// Fire the inactivity timer if its deadline has passed. Safe no-op
    /// when no timer is armed. While the user has hidden the overlay the
    /// flag still flips, but has no visible effect.
    pub fn poll(&mut self, now: Instant) {
        if let Some(deadline) = self.inactivity_deadline {
            if now >= deadline {
                self.inactivity_deadline = None;
                self.auto_hidden = true;
            }
        }
    }

    /// Drop any pending inactivity deadline. Part of shutdown; safe no-op
    /// when none is armed.
    pub fn disarm(&mut self) {
        self.inactivity_deadline = None;
    }

    /// Effective visibility: user toggle AND not auto-hidden.
    #[must_use]
    pub fn effective(&self) -> bool {
        self.user_visible && !self.auto_hidden
    }

    /// Current phase; manual hide takes precedence over auto-hide.
    #[must_use]
    pub fn phase(&self) -> VisibilityPhase {
        if !self.user_visible {
            VisibilityPhase::UserHidden
        } else if self.auto_hidden {
            VisibilityPhase::AutoHidden
        } else {
            VisibilityPhase::Shown
        }
    }

    /// The configured inactivity timeout.
    #[must_use]
    pub fn timeout(&self) -> InactivityTimeout {
        self.timeout
    }
}

// ============================================================================
// Tests
// ============================================================================
