// SPDX-License-Identifier: GPL-3.0-only

//! Centralized application settings and constants.

/// Grace window after the last key is released, during which the previous
/// label keeps being shown (milliseconds).
pub const DEFAULT_HOLD_MS: u64 = 600;

/// Default inactivity window before the overlay auto-hides (milliseconds).
pub const DEFAULT_INACTIVITY_MS: u64 = 2000;

/// Interval between consumer ticks (milliseconds, ~60 Hz).
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 16;

/// Separator between key labels in the rendered string.
pub const LABEL_SEPARATOR: &str = " + ";

/// Sort rank for labels that are not modifiers. Modifier labels rank 0..=3
/// so they always sort ahead of everything else.
pub const NON_MODIFIER_RANK: u8 = 10;
