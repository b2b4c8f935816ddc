// SPDX-License-Identifier: GPL-3.0-only

//! The overlay controller: single consumer that owns all mutable state.
//!
//! # Architecture
//!
//! The controller drains the event and control channels on a fixed-interval
//! tick, applies every event to the input tracker first, then evaluates the
//! timing and visibility policies and publishes a [`DisplaySnapshot`] over a
//! watch channel for the render bridge to observe. Because all state lives
//! on this one tick, no locks are needed anywhere.
//!
//! Within one tick all drained events are applied before the policies run,
//! so a press and release of the same key arriving together net out without
//! a one-frame flicker.
//!
//! Shutdown is a watch flag: [`ShutdownHandle::shutdown`] is idempotent,
//! stops the tick loop, drops pending deadlines and closes the inbound
//! channels so producers see failed sends.

use crate::channel::{
    CaptureHandle, ControlChannel, ControlCommand, ControlHandle, EventChannel, InputEvent,
};
use crate::config::OverlayConfig;
use crate::input::InputState;
use crate::overlay::snapshot::DisplaySnapshot;
use crate::overlay::timing::{DisplayPhase, KeyDisplay};
use crate::overlay::visibility::{VisibilityPhase, VisibilityState};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;

/// Handles handed to the external collaborators at construction.
#[derive(Debug, Clone)]
pub struct OverlayHandles {
    /// For the capture subsystem: enqueue key/mouse events.
    pub capture: CaptureHandle,
    /// For the tray/menu subsystem: visibility controls.
    pub controls: ControlHandle,
    /// For the render bridge: observe display snapshots.
    pub snapshots: watch::Receiver<DisplaySnapshot>,
    /// Stop the consumer loop.
    pub shutdown: ShutdownHandle,
}

/// Idempotent stop signal for the consumer loop.
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl ShutdownHandle {
    /// Request shutdown. Safe to call more than once.
    pub fn shutdown(&self) {
        let was_shutdown = self.tx.send_replace(true);
        if !was_shutdown {
            tracing::debug!("overlay shutdown requested");
        }
    }

    /// Whether shutdown has been requested.
    #[must_use]
    pub fn is_shutdown(&self) -> bool {
        *self.tx.borrow()
    }
}

/// The single consumer owning input, timing and visibility state.
#[derive(Debug)]
pub struct OverlayController {
    config: OverlayConfig,
    events: EventChannel,
    controls: ControlChannel,
    input: InputState,
    display: KeyDisplay,
    visibility: VisibilityState,
    snapshot_tx: watch::Sender<DisplaySnapshot>,
    shutdown_rx: watch::Receiver<bool>,
}

impl OverlayController {
    /// Create the controller and the handles for its collaborators.
    #[must_use]
    pub fn new(config: OverlayConfig) -> (Self, OverlayHandles) {
        let now = Instant::now();
        let (events, capture) = EventChannel::new();
        let (controls, control_handle) = ControlChannel::new();

        let input = InputState::new();
        let display = KeyDisplay::new(config.hold);
        let visibility = VisibilityState::new(config.inactivity, now);

        let initial = DisplaySnapshot {
            left_down: false,
            right_down: false,
            label_text: String::new(),
            visible: visibility.effective(),
        };
        let (snapshot_tx, snapshot_rx) = watch::channel(initial);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let controller = Self {
            config,
            events,
            controls,
            input,
            display,
            visibility,
            snapshot_tx,
            shutdown_rx,
        };
        let handles = OverlayHandles {
            capture,
            controls: control_handle,
            snapshots: snapshot_rx,
            shutdown: ShutdownHandle { tx: Arc::new(shutdown_tx) },
        };
        (controller, handles)
    }

    /// Run one processing step: drain both channels, apply everything to
    /// the input tracker, evaluate the policies, publish the snapshot.
    pub fn tick(&mut self, now: Instant) {
        for event in self.events.drain() {
            self.apply_event(event, now);
        }
        for command in self.controls.drain() {
            self.apply_command(command, now);
        }

        self.display.poll(now);
        self.visibility.poll(now);

        let label = self.display.update(&self.input.current_label_string(), now);
        self.publish(label);
    }

    fn apply_event(&mut self, event: InputEvent, now: Instant) {
        match event {
            InputEvent::Key { key, pressed } => self.input.apply_key_event(&key, pressed),
            InputEvent::Mouse { button, pressed } => {
                self.input.apply_mouse_event(button, pressed);
            }
        }
        // Every processed input event counts as activity for auto-hide.
        self.visibility.note_activity(now);
    }

    fn apply_command(&mut self, command: ControlCommand, now: Instant) {
        match command {
            ControlCommand::ToggleVisibility => self.visibility.toggle(now),
            ControlCommand::SetInactivity(timeout) => {
                self.visibility.set_timeout(timeout, now);
            }
        }
    }

    fn publish(&mut self, label_text: String) {
        let snapshot = DisplaySnapshot {
            left_down: self.input.left_down(),
            right_down: self.input.right_down(),
            label_text,
            visible: self.visibility.effective(),
        };
        // Only wake the renderer when something actually changed.
        self.snapshot_tx.send_if_modified(|current| {
            if *current == snapshot {
                false
            } else {
                *current = snapshot;
                true
            }
        });
    }

    /// Drive the consumer loop until shutdown is signaled (or every
    /// [`ShutdownHandle`] is dropped).
    ///
    /// Ticks at the configured interval; the only suspension point is the
    /// idle wait between ticks, which the shutdown signal cancels.
    pub async fn run(mut self) {
        let mut shutdown = self.shutdown_rx.clone();
        let mut ticker = tokio::time::interval(self.config.tick_interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        tracing::debug!(
            tick_interval = ?self.config.tick_interval,
            "overlay consumer started"
        );

        loop {
            tokio::select! {
                _ = ticker.tick() => self.tick(Instant::now()),
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        self.stop();
    }

    /// Stop future processing: drop pending deadlines and close the inbound
    /// channels so producers see failed sends. Already-enqueued events are
    /// discarded.
    fn stop(&mut self) {
        self.display.cancel();
        self.visibility.disarm();
        self.events.close();
        self.controls.close();
        tracing::debug!("overlay consumer stopped");
    }

    /// The most recently published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> DisplaySnapshot {
        self.snapshot_tx.borrow().clone()
    }

    /// Current phase of the key-label display.
    #[must_use]
    pub fn display_phase(&self) -> DisplayPhase {
        self.display.phase()
    }

    /// Current phase of the visibility state machine.
    #[must_use]
    pub fn visibility_phase(&self) -> VisibilityPhase {
        self.visibility.phase()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::MouseButton;
    use crate::config::InactivityTimeout;
    use crate::input::RawKey;
    use std::time::Duration;

    fn key(c: char) -> RawKey {
        RawKey::Character { vk: None, ch: Some(c) }
    }

    /// Test: a press and release arriving in the same tick net out, with no
    /// intermediate flicker of the surviving label.
    #[test]
    fn test_same_tick_press_release_nets_out() {
        let (mut controller, handles) = OverlayController::new(OverlayConfig::default());
        let start = Instant::now();

        handles
            .capture
            .key_event(RawKey::Named("ctrl_l".to_string()), true)
            .unwrap();
        controller.tick(start);
        assert_eq!(controller.snapshot().label_text, "Ctrl");

        // A tapped inside one tick while Ctrl stays held.
        handles.capture.key_event(key('a'), true).unwrap();
        handles.capture.key_event(key('a'), false).unwrap();
        controller.tick(start + Duration::from_millis(16));

        assert_eq!(
            controller.snapshot().label_text,
            "Ctrl",
            "The tap must not disturb the held label"
        );
        assert_eq!(controller.display_phase(), DisplayPhase::Live);
    }

    /// Test: a release observed in an earlier tick than its press is
    /// harmless, and the later press still registers.
    #[test]
    fn test_out_of_order_release_then_press() {
        let (mut controller, handles) = OverlayController::new(OverlayConfig::default());
        let start = Instant::now();

        handles.capture.key_event(key('a'), false).unwrap();
        controller.tick(start);
        assert_eq!(controller.snapshot().label_text, "");

        handles.capture.key_event(key('a'), true).unwrap();
        controller.tick(start + Duration::from_millis(16));
        assert_eq!(controller.snapshot().label_text, "A");
    }

    /// Test: mouse state flows into the snapshot; untracked buttons are
    /// skipped without stalling the drain.
    #[test]
    fn test_mouse_buttons_in_snapshot() {
        let (mut controller, handles) = OverlayController::new(OverlayConfig::default());
        let start = Instant::now();

        handles.capture.mouse_event(MouseButton::Left, true).unwrap();
        handles.capture.mouse_event(MouseButton::Other(9), true).unwrap();
        handles.capture.mouse_event(MouseButton::Right, true).unwrap();
        controller.tick(start);

        let snapshot = controller.snapshot();
        assert!(snapshot.left_down);
        assert!(snapshot.right_down, "Events after the odd button still apply");

        handles.capture.mouse_event(MouseButton::Left, false).unwrap();
        controller.tick(start + Duration::from_millis(16));
        assert!(!controller.snapshot().left_down);
        assert!(controller.snapshot().right_down);
    }

    /// Test: control commands take effect on the next tick.
    #[test]
    fn test_control_commands() {
        let (mut controller, handles) = OverlayController::new(OverlayConfig::default());
        let start = Instant::now();

        handles.controls.toggle_visibility().unwrap();
        controller.tick(start);
        assert!(!controller.snapshot().visible);
        assert_eq!(controller.visibility_phase(), VisibilityPhase::UserHidden);

        handles.controls.toggle_visibility().unwrap();
        handles.controls.set_inactivity(InactivityTimeout::Off).unwrap();
        controller.tick(start + Duration::from_millis(16));
        assert!(controller.snapshot().visible);

        // With the timer off, idle time never hides the overlay.
        controller.tick(start + Duration::from_secs(600));
        assert!(controller.snapshot().visible);
    }

    /// Test: the watch channel only signals on real snapshot changes.
    #[test]
    fn test_snapshot_published_only_on_change() {
        let (mut controller, mut handles) = OverlayController::new(OverlayConfig::default());
        let start = Instant::now();

        // Quiet ticks publish nothing new.
        controller.tick(start);
        controller.tick(start + Duration::from_millis(16));
        assert!(
            !handles.snapshots.has_changed().unwrap(),
            "Unchanged state must not wake the renderer"
        );

        handles.capture.key_event(key('q'), true).unwrap();
        controller.tick(start + Duration::from_millis(32));
        assert!(handles.snapshots.has_changed().unwrap());
        assert_eq!(
            handles.snapshots.borrow_and_update().label_text,
            "Q"
        );
    }

    /// Test: the run loop ticks on its own and stops on shutdown; shutdown
    /// is idempotent and later sends fail.
    #[tokio::test(start_paused = true)]
    async fn test_run_loop_shutdown() {
        let (controller, handles) = OverlayController::new(OverlayConfig::default());

        let join = tokio::spawn(controller.run());

        // Let the loop take a few ticks.
        tokio::time::sleep(Duration::from_millis(100)).await;

        handles.shutdown.shutdown();
        handles.shutdown.shutdown();
        assert!(handles.shutdown.is_shutdown());

        join.await.expect("consumer loop exits cleanly");

        assert!(
            handles.capture.key_event(key('a'), true).is_err(),
            "Events after shutdown are rejected"
        );
        assert!(
            handles.controls.toggle_visibility().is_err(),
            "Commands after shutdown are rejected"
        );
    }

    /// Test: the run loop processes events end to end.
    #[tokio::test(start_paused = true)]
    async fn test_run_loop_processes_events() {
        let (controller, mut handles) = OverlayController::new(OverlayConfig::default());

        let join = tokio::spawn(controller.run());

        handles.capture.key_event(key('a'), true).unwrap();
        handles.capture.mouse_event(MouseButton::Left, true).unwrap();

        // Wait for the snapshot to reflect the events.
        tokio::time::timeout(Duration::from_secs(1), async {
            loop {
                handles.snapshots.changed().await.expect("publisher alive");
                let snapshot = handles.snapshots.borrow_and_update().clone();
                if snapshot.label_text == "A" && snapshot.left_down {
                    break;
                }
            }
        })
        .await
        .expect("snapshot reflects enqueued events within a tick or two");

        handles.shutdown.shutdown();
        join.await.expect("consumer loop exits cleanly");
    }
}
