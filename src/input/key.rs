// SPDX-License-Identifier: GPL-3.0-only

//! Key identity and labeling.
//!
//! The capture subsystem reports keys in two shapes: named non-printable
//! keys (`"ctrl_l"`, `"enter"`, ...) and printable keys carrying a virtual
//! code and/or a character. This module derives two things from a raw key,
//! both as pure functions of the event:
//!
//! 1. A stable, collision-free [`KeyIdentity`] used to track whether the
//!    physically same key is currently held.
//! 2. A short display label (`"Ctrl"`, `"A"`, `"PgUp"`), where the empty
//!    string means "not displayable" and is filtered out before rendering.
//!
//! # Identity scheme
//!
//! - Named keys identify by their name, so `ctrl_l` and `ctrl_r` are
//!   distinct identities even though both label as `"Ctrl"`.
//! - Printable keys identify by virtual code when one is reported, else by
//!   character.
//! - A printable key reporting neither gets a fresh [`KeyIdentity::Opaque`]
//!   token per event, so its press and release never match. Held-state
//!   tracking for such keys is unreliable on purpose; they also label as
//!   `""` and are never rendered.

use crate::app_settings;
use std::sync::atomic::{AtomicU64, Ordering};

/// A raw key event value, as normalized by the capture subsystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawKey {
    /// A named, non-printable key such as `"ctrl_l"`, `"enter"` or `"f5"`.
    Named(String),
    /// A printable key. Either field may be missing depending on the
    /// platform hook.
    Character {
        /// Platform virtual key code, if reported.
        vk: Option<u32>,
        /// Character produced by the key, if reported.
        ch: Option<char>,
    },
}

/// Canonical identity of a key, usable as a set or map key.
///
/// Equal for the press and release of the physically same key (except for
/// the [`Opaque`](KeyIdentity::Opaque) fallback, see the module docs).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyIdentity {
    /// Named key, identified by its name.
    Named(String),
    /// Printable key with a known virtual code.
    VirtualCode(u32),
    /// Printable key identified only by its character.
    Character(char),
    /// Unidentifiable key; every occurrence gets a distinct token.
    Opaque(u64),
}

static OPAQUE_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Derive the canonical identity of a raw key.
///
/// Prefers the virtual code over the character so that a key reporting both
/// identifies the same way whether or not a modifier rewrites its character.
#[must_use]
pub fn identity(key: &RawKey) -> KeyIdentity {
    match key {
        RawKey::Named(name) => KeyIdentity::Named(name.clone()),
        RawKey::Character { vk: Some(vk), .. } => KeyIdentity::VirtualCode(*vk),
        RawKey::Character { vk: None, ch: Some(ch) } => KeyIdentity::Character(*ch),
        RawKey::Character { vk: None, ch: None } => {
            KeyIdentity::Opaque(OPAQUE_COUNTER.fetch_add(1, Ordering::Relaxed))
        }
    }
}

/// Derive the display label of a raw key.
///
/// Returns the empty string for keys with no sensible label; callers filter
/// those out before joining.
#[must_use]
pub fn label(key: &RawKey) -> String {
    match key {
        RawKey::Character { ch: Some(ch), .. } => {
            // Ctrl+A..Z may arrive as control chars 0x01..0x1A: restore A..Z.
            let code = *ch as u32;
            if (1..=26).contains(&code) {
                return char::from_u32(code + 64)
                    .map(String::from)
                    .unwrap_or_default();
            }
            ch.to_uppercase().collect()
        }
        // Some environments provide only the virtual code.
        RawKey::Character { vk: Some(vk), ch: None } => match vk {
            65..=90 => char::from(*vk as u8).to_string(),
            97..=122 => char::from(*vk as u8).to_ascii_uppercase().to_string(),
            _ => String::new(),
        },
        RawKey::Character { vk: None, ch: None } => String::new(),
        RawKey::Named(name) => named_label(name),
    }
}

/// Label for a named key, through the fixed table with a title-cased
/// fallback for names the table does not know.
fn named_label(name: &str) -> String {
    let mapped = match name {
        "ctrl_l" | "ctrl_r" => "Ctrl",
        "alt_l" | "alt_r" => "Alt",
        "shift_l" | "shift_r" => "Shift",
        "cmd" | "cmd_l" | "cmd_r" => "Win",
        "enter" | "return" => "Enter",
        "space" => "Space",
        "backspace" => "Backspace",
        "tab" => "Tab",
        "esc" => "Esc",
        "caps_lock" => "Caps",
        "page_up" => "PgUp",
        "page_down" => "PgDn",
        "delete" => "Del",
        "insert" => "Ins",
        "home" => "Home",
        "end" => "End",
        "up" => "Up",
        "down" => "Down",
        "left" => "Left",
        "right" => "Right",
        _ => return title_case(name),
    };
    mapped.to_string()
}

/// Title-case each alphabetic run of a key name: `"media_play"` becomes
/// `"Media_Play"`.
fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut start_of_word = true;
    for c in name.chars() {
        if c.is_alphabetic() {
            if start_of_word {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            start_of_word = false;
        } else {
            out.push(c);
            start_of_word = true;
        }
    }
    out
}

/// Sort rank of a label: modifiers first (Ctrl, Shift, Alt, Win), everything
/// else after. Ties are broken alphabetically by the caller.
#[must_use]
pub fn label_rank(label: &str) -> u8 {
    match label {
        "Ctrl" => 0,
        "Shift" => 1,
        "Alt" => 2,
        "Win" => 3,
        _ => app_settings::NON_MODIFIER_RANK,
    }
}

// ============================================================================
// Tests
// ============================================================================
