// SPDX-License-Identifier: GPL-3.0-only

//! Keyhalo - input-activity aggregation core for a floating overlay
//!
//! This crate implements the state machine behind a small always-on-top
//! badge that shows which keys and mouse buttons are currently held. It
//! receives raw press/release events from an input-capture subsystem,
//! tracks canonical held state, derives the label text to show (including a
//! hold window after release), and decides overlay visibility (manual
//! toggle plus inactivity auto-hide).
//!
//! # Architecture
//!
//! Capture threads and UI controls only ever enqueue onto channels; one
//! consumer tick owns every piece of mutable state, so the crate needs no
//! locks:
//!
//! ```text
//! capture ──► event channel ──► OverlayController.tick()
//! controls ─► control channel ─┘    │ apply events, run policies
//!                                   ▼
//!                          watch<DisplaySnapshot> ──► render bridge
//! ```
//!
//! The capture subsystem, the rendering surface and the tray/menu UI are
//! external collaborators: they embed this crate through the handles
//! returned by [`OverlayController::new`].
//!
//! # Modules
//!
//! - `app_settings`: centralized constants (hold window, tick interval, ...)
//! - `channel`: event and control channels between producers and the consumer
//! - `config`: overlay configuration and the inactivity timeout options
//! - `input`: key identity, labeling, and held-state tracking
//! - `overlay`: timing and visibility state machines, snapshot, controller

pub mod app_settings;
pub mod channel;
pub mod config;
pub mod input;
pub mod overlay;

// Re-export the types an embedder needs to wire the overlay up.
pub use crate::channel::{CaptureHandle, ControlHandle, MouseButton};
pub use crate::config::{InactivityTimeout, OverlayConfig};
pub use crate::input::RawKey;
pub use crate::overlay::{DisplaySnapshot, OverlayController, OverlayHandles, ShutdownHandle};

// ============================================================================
// Integration Tests
// ============================================================================
