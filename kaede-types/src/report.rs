use serde::{Deserialize, Serialize};

use crate::keycode::KeyCode;
use crate::modifier::HidModifiers;

/// Number of key slots in a keyboard report.
pub const REPORT_KEY_SLOTS: usize = 6;

/// The 8-byte keyboard input report: modifier bitmask, reserved byte, six
/// key slots. Sent verbatim as the USB HID IN report and as the host-link
/// keyboard payload.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyboardReport {
    pub modifier: HidModifiers,
    pub reserved: u8,
    pub keycodes: [u8; REPORT_KEY_SLOTS],
}

impl KeyboardReport {
    pub const fn new() -> Self {
        Self {
            modifier: HidModifiers::new(),
            reserved: 0,
            keycodes: [0; REPORT_KEY_SLOTS],
        }
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Appends a key code if a slot remains; out of slots the key is
    /// silently dropped, matching the key-set overflow rule.
    pub fn push_key(&mut self, key: KeyCode) -> bool {
        for slot in self.keycodes.iter_mut() {
            if *slot == 0 {
                *slot = key as u8;
                return true;
            }
        }
        false
    }

    /// Number of occupied key slots.
    pub fn key_count(&self) -> usize {
        self.keycodes.iter().filter(|&&k| k != 0).count()
    }

    /// The exact wire format.
    pub fn as_bytes(&self) -> [u8; 8] {
        let mut bytes = [0u8; 8];
        bytes[0] = self.modifier.into_bits();
        bytes[1] = self.reserved;
        bytes[2..8].copy_from_slice(&self.keycodes);
        bytes
    }
}

/// Relative mouse report payload, forwarded over the host link and mapped
/// onto the USB composite mouse report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MouseReport {
    pub buttons: u8,
    pub x: i8,
    pub y: i8,
    pub wheel: i8,
}

impl MouseReport {
    pub fn as_bytes(&self) -> [u8; 4] {
        [self.buttons, self.x as u8, self.y as u8, self.wheel as u8]
    }
}
