use serde::{Deserialize, Serialize};
use strum::FromRepr;

use crate::modifier::HidModifiers;

/// Key codes handled by the firmware.
///
/// Values up to `RGui` are HID keyboard-page usages and may appear in a
/// report sent to the host. Values from `LeftFn` up are firmware-internal
/// control codes; they drive the engine and must never leak into a report.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, PartialOrd, Ord, FromRepr, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyCode {
    /// Reserved, no key.
    #[default]
    No = 0x00,
    /// Roll over error, too many keys pressed at once.
    ErrorRollover = 0x01,
    PostFail = 0x02,
    ErrorUndefined = 0x03,
    A = 0x04,
    B = 0x05,
    C = 0x06,
    D = 0x07,
    E = 0x08,
    F = 0x09,
    G = 0x0A,
    H = 0x0B,
    I = 0x0C,
    J = 0x0D,
    K = 0x0E,
    L = 0x0F,
    M = 0x10,
    N = 0x11,
    O = 0x12,
    P = 0x13,
    Q = 0x14,
    R = 0x15,
    S = 0x16,
    T = 0x17,
    U = 0x18,
    V = 0x19,
    W = 0x1A,
    X = 0x1B,
    Y = 0x1C,
    Z = 0x1D,
    Kc1 = 0x1E,
    Kc2 = 0x1F,
    Kc3 = 0x20,
    Kc4 = 0x21,
    Kc5 = 0x22,
    Kc6 = 0x23,
    Kc7 = 0x24,
    Kc8 = 0x25,
    Kc9 = 0x26,
    Kc0 = 0x27,
    Enter = 0x28,
    Escape = 0x29,
    Backspace = 0x2A,
    Tab = 0x2B,
    Space = 0x2C,
    Minus = 0x2D,
    Equal = 0x2E,
    LeftBracket = 0x2F,
    RightBracket = 0x30,
    Backslash = 0x31,
    /// Non-US `#` and `~`, the JIS `]` position.
    NonusHash = 0x32,
    Semicolon = 0x33,
    Quote = 0x34,
    Grave = 0x35,
    Comma = 0x36,
    Dot = 0x37,
    Slash = 0x38,
    CapsLock = 0x39,
    F1 = 0x3A,
    F2 = 0x3B,
    F3 = 0x3C,
    F4 = 0x3D,
    F5 = 0x3E,
    F6 = 0x3F,
    F7 = 0x40,
    F8 = 0x41,
    F9 = 0x42,
    F10 = 0x43,
    F11 = 0x44,
    F12 = 0x45,
    PrintScreen = 0x46,
    ScrollLock = 0x47,
    Pause = 0x48,
    Insert = 0x49,
    Home = 0x4A,
    PageUp = 0x4B,
    Delete = 0x4C,
    End = 0x4D,
    PageDown = 0x4E,
    Right = 0x4F,
    Left = 0x50,
    Down = 0x51,
    Up = 0x52,
    NumLock = 0x53,
    KpSlash = 0x54,
    KpAsterisk = 0x55,
    KpMinus = 0x56,
    KpPlus = 0x57,
    KpEnter = 0x58,
    Kp1 = 0x59,
    Kp2 = 0x5A,
    Kp3 = 0x5B,
    Kp4 = 0x5C,
    Kp5 = 0x5D,
    Kp6 = 0x5E,
    Kp7 = 0x5F,
    Kp8 = 0x60,
    Kp9 = 0x61,
    Kp0 = 0x62,
    KpDot = 0x63,
    /// Non-US `\` and `|`.
    NonusBackslash = 0x64,
    Application = 0x65,
    Power = 0x66,
    KpEqual = 0x67,
    F13 = 0x68,
    F14 = 0x69,
    F15 = 0x6A,
    F16 = 0x6B,
    F17 = 0x6C,
    F18 = 0x6D,
    F19 = 0x6E,
    F20 = 0x6F,
    F21 = 0x70,
    F22 = 0x71,
    F23 = 0x72,
    F24 = 0x73,
    Execute = 0x74,
    Help = 0x75,
    Menu = 0x76,
    Select = 0x77,
    Stop = 0x78,
    Again = 0x79,
    Undo = 0x7A,
    Cut = 0x7B,
    Copy = 0x7C,
    Paste = 0x7D,
    Find = 0x7E,
    Mute = 0x7F,
    VolumeUp = 0x80,
    VolumeDown = 0x81,
    LockingCapsLock = 0x82,
    LockingNumLock = 0x83,
    LockingScrollLock = 0x84,
    KpComma = 0x85,
    KpEqualSign = 0x86,
    /// JIS `ろ`/`_` key.
    International1 = 0x87,
    /// JIS katakana/hiragana key.
    International2 = 0x88,
    /// JIS `¥` key.
    International3 = 0x89,
    /// JIS henkan (convert) key.
    International4 = 0x8A,
    /// JIS muhenkan (no-convert) key.
    International5 = 0x8B,
    International6 = 0x8C,
    International7 = 0x8D,
    International8 = 0x8E,
    International9 = 0x8F,
    /// IME on. Rewritten per OS mode before transmission.
    Lang1 = 0x90,
    /// IME off. Rewritten per OS mode before transmission.
    Lang2 = 0x91,
    Lang3 = 0x92,
    Lang4 = 0x93,
    Lang5 = 0x94,
    Lang6 = 0x95,
    Lang7 = 0x96,
    Lang8 = 0x97,
    Lang9 = 0x98,
    AlternateErase = 0x99,
    SysReq = 0x9A,
    Cancel = 0x9B,
    Clear = 0x9C,
    Prior = 0x9D,
    Return = 0x9E,
    Separator = 0x9F,
    Out = 0xA0,
    Oper = 0xA1,
    ClearAgain = 0xA2,
    CrSel = 0xA3,
    ExSel = 0xA4,
    LCtrl = 0xE0,
    LShift = 0xE1,
    LAlt = 0xE2,
    LGui = 0xE3,
    RCtrl = 0xE4,
    RShift = 0xE5,
    RAlt = 0xE6,
    RGui = 0xE7,
    /// Left function-layer key. Internal, sets a flag bit instead of a slot.
    LeftFn = 0xF0,
    /// Right function-layer key.
    RightFn = 0xF1,
    /// Kana voicing mark, backspace-corrects the previous syllable.
    Dakuten = 0xF7,
    /// Kana half-voicing mark.
    Handaku = 0xF8,
    /// Calculator launcher, forwarded as a consumer-page usage.
    Calc = 0xFB,
}

impl KeyCode {
    /// Returns `true` for HID modifier usages (`LCtrl`..=`RGui`).
    pub fn is_modifier(self) -> bool {
        KeyCode::LCtrl <= self && self <= KeyCode::RGui
    }

    /// Returns `true` for firmware-internal control codes, which must never
    /// appear in a report.
    pub fn is_internal(self) -> bool {
        self as u8 >= KeyCode::LeftFn as u8
    }

    /// Returns `true` for the function-layer keys.
    pub fn is_fn(self) -> bool {
        self == KeyCode::LeftFn || self == KeyCode::RightFn
    }

    /// The modifier bit of a modifier usage, empty otherwise.
    pub fn to_modifiers(self) -> HidModifiers {
        if self.is_modifier() {
            HidModifiers::from_bits(1 << (self as u8 - KeyCode::LCtrl as u8))
        } else {
            HidModifiers::new()
        }
    }

    /// Looks a key code up from its raw byte, `No` for gaps in the table.
    pub fn from_u8(value: u8) -> Self {
        KeyCode::from_repr(value).unwrap_or(KeyCode::No)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn modifier_bits_match_hid_layout() {
        assert_eq!(KeyCode::LCtrl.to_modifiers().into_bits(), 0x01);
        assert_eq!(KeyCode::LShift.to_modifiers().into_bits(), 0x02);
        assert_eq!(KeyCode::RShift.to_modifiers().into_bits(), 0x20);
        assert_eq!(KeyCode::RGui.to_modifiers().into_bits(), 0x80);
        assert_eq!(KeyCode::A.to_modifiers().into_bits(), 0x00);
    }

    #[test]
    fn internal_codes_are_flagged() {
        assert!(KeyCode::LeftFn.is_internal());
        assert!(KeyCode::Dakuten.is_internal());
        assert!(!KeyCode::Lang1.is_internal());
        assert!(!KeyCode::RGui.is_internal());
    }
}
