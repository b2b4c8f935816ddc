// SPDX-License-Identifier: GPL-3.0-only

//! Channels between the outside world and the overlay consumer.
//!
//! # Architecture
//!
//! Two channels feed the single consumer tick:
//!
//! - **Event channel**: the capture subsystem's keyboard and mouse threads
//!   enqueue raw press/release events through a [`CaptureHandle`]. The
//!   channel is unbounded and FIFO, so producers never block and no event is
//!   dropped while the consumer is alive.
//! - **Control channel**: the tray menu (or any other UI) sends
//!   [`ControlCommand`]s through a [`ControlHandle`] to toggle visibility or
//!   change the inactivity timeout.
//!
//! The consumer drains both to empty on every tick; draining never blocks
//! and returns immediately with whatever has arrived. Sends after shutdown
//! fail with [`ChannelError::Closed`], which producers may ignore — the
//! worst outcome of a dropped event is a missing display update.

use crate::config::InactivityTimeout;
use crate::input::RawKey;
use futures::channel::mpsc;

/// Mouse buttons as reported by the capture subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    /// Left button; shown on the overlay badge.
    Left,
    /// Right button; shown on the overlay badge.
    Right,
    /// Any other button (middle, side, ...). Received but not tracked.
    Other(u8),
}

/// A single press/release event from the capture subsystem.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A keyboard key changed state.
    Key {
        /// The raw key value.
        key: RawKey,
        /// `true` for press, `false` for release.
        pressed: bool,
    },
    /// A mouse button changed state.
    Mouse {
        /// Which button.
        button: MouseButton,
        /// `true` for press, `false` for release.
        pressed: bool,
    },
}

/// Commands from the visibility controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCommand {
    /// Flip the user-visible flag.
    ToggleVisibility,
    /// Change the inactivity timeout for auto-hide.
    SetInactivity(InactivityTimeout),
}

/// Result type for channel operations.
pub type ChannelResult<T> = Result<T, ChannelError>;

/// Errors that can occur when enqueueing onto a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelError {
    /// The consumer is gone (shutdown); the message was dropped.
    Closed,
}

impl std::fmt::Display for ChannelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChannelError::Closed => write!(f, "overlay consumer is no longer running"),
        }
    }
}

impl std::error::Error for ChannelError {}

/// Consumer half of the event channel.
#[derive(Debug)]
pub struct EventChannel {
    rx: mpsc::UnboundedReceiver<InputEvent>,
}

impl EventChannel {
    /// Create the channel, returning the consumer half and a producer
    /// handle for the capture subsystem.
    #[must_use]
    pub fn new() -> (Self, CaptureHandle) {
        let (tx, rx) = mpsc::unbounded();
        (Self { rx }, CaptureHandle { tx })
    }

    /// Drain every queued event without blocking, in enqueue order.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();
        while let Ok(Some(event)) = self.rx.try_next() {
            events.push(event);
        }
        events
    }

    /// Close the channel. Later sends fail; already-enqueued events are
    /// discarded. Part of shutdown.
    pub fn close(&mut self) {
        self.rx.close();
    }
}

/// Producer handle for the capture subsystem; clonable, one per input
/// source. The two methods are the inbound registration points: the capture
/// callbacks do nothing but enqueue.
#[derive(Debug, Clone)]
pub struct CaptureHandle {
    tx: mpsc::UnboundedSender<InputEvent>,
}

impl CaptureHandle {
    /// Enqueue a key press/release. Never blocks.
    pub fn key_event(&self, key: RawKey, pressed: bool) -> ChannelResult<()> {
        self.send(InputEvent::Key { key, pressed })
    }

    /// Enqueue a mouse button press/release. Never blocks.
    pub fn mouse_event(&self, button: MouseButton, pressed: bool) -> ChannelResult<()> {
        self.send(InputEvent::Mouse { button, pressed })
    }

    fn send(&self, event: InputEvent) -> ChannelResult<()> {
        self.tx.unbounded_send(event).map_err(|_| {
            tracing::debug!("input event dropped: overlay consumer is gone");
            ChannelError::Closed
        })
    }
}

/// Consumer half of the control channel.
#[derive(Debug)]
pub struct ControlChannel {
    rx: mpsc::UnboundedReceiver<ControlCommand>,
}

impl ControlChannel {
    /// Create the channel, returning the consumer half and a handle for the
    /// visibility controls.
    #[must_use]
    pub fn new() -> (Self, ControlHandle) {
        let (tx, rx) = mpsc::unbounded();
        (Self { rx }, ControlHandle { tx })
    }

    /// Drain every queued command without blocking, in enqueue order.
    pub fn drain(&mut self) -> Vec<ControlCommand> {
        let mut commands = Vec::new();
        while let Ok(Some(command)) = self.rx.try_next() {
            commands.push(command);
        }
        commands
    }

    /// Close the channel. Part of shutdown.
    pub fn close(&mut self) {
        self.rx.close();
    }
}

/// Handle for the visibility controls; clonable.
#[derive(Debug, Clone)]
pub struct ControlHandle {
    tx: mpsc::UnboundedSender<ControlCommand>,
}

impl ControlHandle {
    /// Request a manual show/hide toggle.
    pub fn toggle_visibility(&self) -> ChannelResult<()> {
        self.send(ControlCommand::ToggleVisibility)
    }

    /// Request a change of the inactivity timeout.
    pub fn set_inactivity(&self, timeout: InactivityTimeout) -> ChannelResult<()> {
        self.send(ControlCommand::SetInactivity(timeout))
    }

    fn send(&self, command: ControlCommand) -> ChannelResult<()> {
        self.tx.unbounded_send(command).map_err(|_| {
            tracing::debug!(?command, "control command dropped: overlay consumer is gone");
            ChannelError::Closed
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
