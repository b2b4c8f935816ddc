// SPDX-License-Identifier: GPL-3.0-only

//! Static overlay configuration, fixed at construction time.
//!
//! Persistence of settings between runs is explicitly out of scope; the
//! embedding application decides where these values come from. The
//! inactivity timeout is the one value that can still be changed at runtime,
//! through [`ControlCommand::SetInactivity`](crate::channel::ControlCommand).

use crate::app_settings;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Selectable inactivity timeouts for the auto-hide behavior.
///
/// The set is fixed so that a tray menu can enumerate it directly via
/// [`InactivityTimeout::ALL`]. `Off` disables the inactivity timer entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InactivityTimeout {
    /// Never auto-hide.
    Off,
    /// Auto-hide after 1 second without input.
    OneSecond,
    /// Auto-hide after 2 seconds without input.
    TwoSeconds,
    /// Auto-hide after 3 seconds without input.
    ThreeSeconds,
    /// Auto-hide after 5 seconds without input.
    FiveSeconds,
}

impl InactivityTimeout {
    /// Every selectable option, in menu order.
    pub const ALL: [InactivityTimeout; 5] = [
        InactivityTimeout::Off,
        InactivityTimeout::OneSecond,
        InactivityTimeout::TwoSeconds,
        InactivityTimeout::ThreeSeconds,
        InactivityTimeout::FiveSeconds,
    ];

    /// The timeout as a duration, or `None` for `Off`.
    #[must_use]
    pub fn duration(self) -> Option<Duration> {
        match self {
            InactivityTimeout::Off => None,
            InactivityTimeout::OneSecond => Some(Duration::from_millis(1000)),
            InactivityTimeout::TwoSeconds => Some(Duration::from_millis(2000)),
            InactivityTimeout::ThreeSeconds => Some(Duration::from_millis(3000)),
            InactivityTimeout::FiveSeconds => Some(Duration::from_millis(5000)),
        }
    }

    /// Human-readable name for menu construction.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            InactivityTimeout::Off => "Off",
            InactivityTimeout::OneSecond => "1 second",
            InactivityTimeout::TwoSeconds => "2 seconds",
            InactivityTimeout::ThreeSeconds => "3 seconds",
            InactivityTimeout::FiveSeconds => "5 seconds",
        }
    }
}

impl Default for InactivityTimeout {
    fn default() -> Self {
        InactivityTimeout::TwoSeconds
    }
}

/// Overlay configuration handed to the controller at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayConfig {
    /// How long the last label stays visible after all keys are released.
    pub hold: Duration,
    /// Initial inactivity timeout for auto-hide.
    pub inactivity: InactivityTimeout,
    /// Consumer tick interval; bounds display latency.
    pub tick_interval: Duration,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            hold: Duration::from_millis(app_settings::DEFAULT_HOLD_MS),
            inactivity: InactivityTimeout::default(),
            tick_interval: Duration::from_millis(app_settings::DEFAULT_TICK_INTERVAL_MS),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Test: default config matches the app_settings constants.
    #[test]
    fn test_default_config_matches_app_settings() {
        let config = OverlayConfig::default();

        assert_eq!(
            config.hold,
            Duration::from_millis(app_settings::DEFAULT_HOLD_MS),
            "Default hold window should come from app_settings"
        );
        assert_eq!(
            config.inactivity.duration(),
            Some(Duration::from_millis(app_settings::DEFAULT_INACTIVITY_MS)),
            "Default inactivity timeout should be 2 seconds"
        );
        assert_eq!(
            config.tick_interval,
            Duration::from_millis(app_settings::DEFAULT_TICK_INTERVAL_MS),
            "Default tick interval should come from app_settings"
        );
    }

    /// Test: the enumerated timeout set maps to the documented durations.
    #[test]
    fn test_timeout_durations() {
        assert_eq!(InactivityTimeout::Off.duration(), None);
        assert_eq!(
            InactivityTimeout::OneSecond.duration(),
            Some(Duration::from_millis(1000))
        );
        assert_eq!(
            InactivityTimeout::TwoSeconds.duration(),
            Some(Duration::from_millis(2000))
        );
        assert_eq!(
            InactivityTimeout::ThreeSeconds.duration(),
            Some(Duration::from_millis(3000))
        );
        assert_eq!(
            InactivityTimeout::FiveSeconds.duration(),
            Some(Duration::from_millis(5000))
        );
    }

    /// Test: ALL lists every option exactly once, with usable menu labels.
    #[test]
    fn test_all_options_enumerable() {
        assert_eq!(InactivityTimeout::ALL.len(), 5);

        for option in InactivityTimeout::ALL {
            assert!(
                !option.label().is_empty(),
                "Every option needs a menu label"
            );
        }

        // No duplicates.
        for (i, a) in InactivityTimeout::ALL.iter().enumerate() {
            for b in &InactivityTimeout::ALL[i + 1..] {
                assert_ne!(a, b, "Options must be distinct");
            }
        }
    }
}
