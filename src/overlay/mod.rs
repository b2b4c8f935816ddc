// SPDX-License-Identifier: GPL-3.0-only

//! The overlay state machines and the consumer that drives them.
//!
//! # Architecture
//!
//! - [`timing`]: hold-after-release policy for the key label
//! - [`visibility`]: manual toggle plus inactivity auto-hide
//! - [`snapshot`]: the immutable value handed to the render bridge
//! - [`controller`]: the single consumer tick that owns all of the above
//!
//! Both policies keep their timers as plain deadlines checked on the
//! consumer tick, so the whole overlay is single-writer and lock-free.

// Sub-modules
pub mod controller;
pub mod snapshot;
pub mod timing;
pub mod visibility;

// Re-export public API
pub use controller::{OverlayController, OverlayHandles, ShutdownHandle};
pub use snapshot::DisplaySnapshot;
pub use timing::{DisplayPhase, KeyDisplay};
pub use visibility::{VisibilityPhase, VisibilityState};

// ============================================================================
// Module Tests
// ============================================================================
