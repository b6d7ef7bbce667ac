//! Persisted mode settings.
//!
//! Every setting is one byte in the settings store, mutated only by the
//! function-layer "cycle to next value" chords. A cycle echoes the new
//! mode's spelled-out name back to the host; that echo is the whole
//! configuration UI.

use kaede_types::keycode::KeyCode::{self, *};

use crate::channel::FLASH_CHANNEL;
use crate::layout::base::MOD_COLUMN_MAPS;
use crate::storage::FlashOperationMessage;

/// Number of byte slots in the settings store key space. Slot 7 is the BLE
/// pairing flag and slot 9 the trackpad play level; neither lives in
/// [`Settings`].
pub const SETTING_COUNT: usize = 10;

/// Store slot of each persisted byte.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingKey {
    BaseLayout = 0,
    KanaScheme = 1,
    OsMode = 2,
    RepeatDelay = 3,
    ModMap = 4,
    LedMode = 5,
    ImeMode = 6,
    BlePairing = 7,
    PrefixShift = 8,
    TrackpadPlay = 9,
}

macro_rules! setting_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[repr(u8)]
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            const ALL: &'static [$name] = &[$($name::$variant),+];
            pub const COUNT: u8 = Self::ALL.len() as u8;

            /// Decodes a persisted byte; out-of-range values self-heal to
            /// the first variant.
            pub fn from_byte(byte: u8) -> Self {
                *Self::ALL.get(byte as usize).unwrap_or(&Self::ALL[0])
            }

            /// The next value in cycle order.
            pub fn next(self) -> Self {
                Self::from_byte(if self as u8 + 1 >= Self::COUNT { 0 } else { self as u8 + 1 })
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::ALL[0]
            }
        }
    };
}

setting_enum! {
    /// Active base key table.
    BaseLayout { Qwerty, Dvorak, Colemak, Jis, NicolaF }
}

impl BaseLayout {
    pub fn is_japanese(self) -> bool {
        matches!(self, BaseLayout::Jis | BaseLayout::NicolaF)
    }

    pub fn name_keys(self) -> &'static [KeyCode] {
        match self {
            BaseLayout::Qwerty => &[U, S, Enter],
            BaseLayout::Dvorak => &[U, S, Minus, D, Enter],
            BaseLayout::Colemak => &[U, S, Minus, C, Enter],
            BaseLayout::Jis => &[J, P, Enter],
            BaseLayout::NicolaF => &[J, P, Minus, N, Enter],
        }
    }
}

setting_enum! {
    /// Active Japanese input scheme.
    KanaScheme { Romaji, Nicola, MType, Tron, Stickney, X6004 }
}

impl KanaScheme {
    pub fn name_keys(self) -> &'static [KeyCode] {
        match self {
            KanaScheme::Romaji => &[R, O, M, A, Enter],
            KanaScheme::Nicola => &[N, I, C, O, Enter],
            KanaScheme::MType => &[M, T, Y, P, E, Enter],
            KanaScheme::Tron => &[T, R, O, N, Enter],
            KanaScheme::Stickney => &[S, T, I, C, K, Enter],
            KanaScheme::X6004 => &[X, Kc6, Kc0, Kc0, Kc4, Enter],
        }
    }
}

setting_enum! {
    /// Host OS quirk mode; selects how the IME toggle keys are rewritten.
    OsMode {
        Pc,
        Mac,
        Win104A,
        Win104B,
        Win109,
        Win109A,
        Win109B,
        AltSpace,
        ShiftSpace,
        CtrlSpace,
    }
}

impl OsMode {
    pub fn is_pc(self) -> bool {
        self == OsMode::Pc
    }

    /// Japanese 109-keyboard OS modes.
    pub fn is_109(self) -> bool {
        matches!(self, OsMode::Win109 | OsMode::Win109A | OsMode::Win109B)
    }

    pub fn name_keys(self) -> &'static [KeyCode] {
        match self {
            OsMode::Pc => &[P, C, Enter],
            OsMode::Mac => &[M, A, C, Enter],
            OsMode::Win104A => &[Kc1, Kc0, Kc4, A, Enter],
            OsMode::Win104B => &[Kc1, Kc0, Kc4, B, Enter],
            OsMode::Win109 => &[Kc1, Kc0, Kc9, Enter],
            OsMode::Win109A => &[Kc1, Kc0, Kc9, A, Enter],
            OsMode::Win109B => &[Kc1, Kc0, Kc9, B, Enter],
            OsMode::AltSpace => &[A, Minus, S, P, Enter],
            OsMode::ShiftSpace => &[S, Minus, S, P, Enter],
            OsMode::CtrlSpace => &[C, Minus, S, P, Enter],
        }
    }
}

setting_enum! {
    /// Bottom-row modifier arrangement. The letter code matches the typed
    /// confirmation: C control-outside, S shift-outside, X swapped
    /// Backspace/Space, J Japanese Alt/IME mapping, A Apple variant.
    ModMap { C, S, Xc, Xs, Cj, Sj, Xcj, Xsj, Cja, Sja, Xcja, Xsja }
}

impl ModMap {
    /// Column permutation for the bottom row.
    pub fn columns(self) -> &'static [u8; 12] {
        &MOD_COLUMN_MAPS[(self as u8 % 4) as usize]
    }

    /// Japanese variants remap the Alt keys to IME toggles.
    pub fn is_japanese(self) -> bool {
        self as u8 >= 4
    }

    /// Apple variants additionally swap Application for Alt.
    pub fn is_mac(self) -> bool {
        self as u8 >= 8
    }

    /// Japanese variants make the Fn keys dual-role: tapped alone they send
    /// the IME toggles.
    pub fn has_dual_role_fn(self) -> bool {
        self.is_japanese()
    }

    pub fn name_keys(self) -> &'static [KeyCode] {
        match self {
            ModMap::C => &[C, Enter],
            ModMap::S => &[S, Enter],
            ModMap::Xc => &[X, C, Enter],
            ModMap::Xs => &[X, S, Enter],
            ModMap::Cj => &[C, J, Enter],
            ModMap::Sj => &[S, J, Enter],
            ModMap::Xcj => &[X, C, J, Enter],
            ModMap::Xsj => &[X, S, J, Enter],
            ModMap::Cja => &[C, J, A, Enter],
            ModMap::Sja => &[S, J, A, Enter],
            ModMap::Xcja => &[X, C, J, A, Enter],
            ModMap::Xsja => &[X, S, J, A, Enter],
        }
    }
}

setting_enum! {
    /// Extra scan cycles added to the hold threshold, for worn switches.
    RepeatDelay { D0, D12, D24, D36, D48 }
}

impl RepeatDelay {
    pub fn extra_ticks(self) -> u8 {
        self as u8 * 12
    }

    pub fn name_keys(self) -> &'static [KeyCode] {
        match self {
            RepeatDelay::D0 => &[D, Kc0, Enter],
            RepeatDelay::D12 => &[D, Kc1, Kc2, Enter],
            RepeatDelay::D24 => &[D, Kc2, Kc4, Enter],
            RepeatDelay::D36 => &[D, Kc3, Kc6, Enter],
            RepeatDelay::D48 => &[D, Kc4, Kc8, Enter],
        }
    }
}

setting_enum! {
    /// Which physical LED shows the kana indicator, and how.
    LedMode { Left, Center, Right, LeftNum, CenterCaps, RightScroll, Off }
}

impl LedMode {
    pub fn name_keys(self) -> &'static [KeyCode] {
        match self {
            LedMode::Left => &[L, Enter],
            LedMode::Center => &[C, Enter],
            LedMode::Right => &[R, Enter],
            LedMode::LeftNum => &[L, Minus, N, Enter],
            LedMode::CenterCaps => &[C, Minus, C, Enter],
            LedMode::RightScroll => &[R, Minus, S, Enter],
            LedMode::Off => &[O, F, F, Enter],
        }
    }
}

setting_enum! {
    /// Which IME's romaji spellings the kana engine emits.
    ImeMode { Ms, Atok, Google, Apple }
}

impl ImeMode {
    pub fn name_keys(self) -> &'static [KeyCode] {
        match self {
            ImeMode::Ms => &[M, S, Enter],
            ImeMode::Atok => &[A, T, O, K, Enter],
            ImeMode::Google => &[G, O, O, G, Enter],
            ImeMode::Apple => &[A, P, P, L, Enter],
        }
    }
}

setting_enum! {
    /// Prefix-shift: a tapped shift latches onto the next kana key.
    PrefixShift { Off, On, Led }
}

impl PrefixShift {
    pub fn is_enabled(self) -> bool {
        self != PrefixShift::Off
    }

    pub fn shows_led(self) -> bool {
        self == PrefixShift::Led
    }

    pub fn name_keys(self) -> &'static [KeyCode] {
        match self {
            PrefixShift::Off => &[O, F, F, Enter],
            PrefixShift::On => &[O, N, Enter],
            PrefixShift::Led => &[L, E, D, Enter],
        }
    }
}

/// The live settings record, loaded from the store at boot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Settings {
    pub base: BaseLayout,
    pub kana: KanaScheme,
    pub os: OsMode,
    pub delay: RepeatDelay,
    pub mod_map: ModMap,
    pub led: LedMode,
    pub ime: ImeMode,
    pub prefix_shift: PrefixShift,
}

impl Settings {
    /// Builds the record from the raw store bytes, slot-indexed by
    /// [`SettingKey`]. Corrupt bytes fall back to the default variant.
    pub fn from_bytes(bytes: &[u8; SETTING_COUNT]) -> Self {
        Self {
            base: BaseLayout::from_byte(bytes[SettingKey::BaseLayout as usize]),
            kana: KanaScheme::from_byte(bytes[SettingKey::KanaScheme as usize]),
            os: OsMode::from_byte(bytes[SettingKey::OsMode as usize]),
            delay: RepeatDelay::from_byte(bytes[SettingKey::RepeatDelay as usize]),
            mod_map: ModMap::from_byte(bytes[SettingKey::ModMap as usize]),
            led: LedMode::from_byte(bytes[SettingKey::LedMode as usize]),
            ime: ImeMode::from_byte(bytes[SettingKey::ImeMode as usize]),
            prefix_shift: PrefixShift::from_byte(bytes[SettingKey::PrefixShift as usize]),
        }
    }

    /// Queues one changed byte for the storage task. The scan loop must not
    /// block on flash, so a full queue only logs; the next cycle re-queues.
    pub(crate) fn persist(key: SettingKey, value: u8) {
        if FLASH_CHANNEL
            .try_send(FlashOperationMessage::SettingChange { key, value })
            .is_err()
        {
            warn!("flash queue full, setting {:?} not persisted", key);
        }
    }

    pub fn cycle_base(&mut self) -> BaseLayout {
        self.base = self.base.next();
        Self::persist(SettingKey::BaseLayout, self.base as u8);
        self.base
    }

    pub fn cycle_kana(&mut self) -> KanaScheme {
        self.kana = self.kana.next();
        Self::persist(SettingKey::KanaScheme, self.kana as u8);
        self.kana
    }

    pub fn cycle_os(&mut self) -> OsMode {
        self.os = self.os.next();
        Self::persist(SettingKey::OsMode, self.os as u8);
        self.os
    }

    pub fn cycle_delay(&mut self) -> RepeatDelay {
        self.delay = self.delay.next();
        Self::persist(SettingKey::RepeatDelay, self.delay as u8);
        self.delay
    }

    pub fn cycle_mod_map(&mut self) -> ModMap {
        self.mod_map = self.mod_map.next();
        Self::persist(SettingKey::ModMap, self.mod_map as u8);
        self.mod_map
    }

    pub fn cycle_led(&mut self) -> LedMode {
        self.led = self.led.next();
        Self::persist(SettingKey::LedMode, self.led as u8);
        self.led
    }

    pub fn cycle_ime(&mut self) -> ImeMode {
        self.ime = self.ime.next();
        Self::persist(SettingKey::ImeMode, self.ime as u8);
        self.ime
    }

    pub fn cycle_prefix_shift(&mut self) -> PrefixShift {
        self.prefix_shift = self.prefix_shift.next();
        Self::persist(SettingKey::PrefixShift, self.prefix_shift as u8);
        self.prefix_shift
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn corrupt_bytes_self_heal() {
        assert_eq!(BaseLayout::from_byte(200), BaseLayout::Qwerty);
        assert_eq!(KanaScheme::from_byte(6), KanaScheme::Romaji);
        assert_eq!(OsMode::from_byte(9), OsMode::CtrlSpace);
        assert_eq!(OsMode::from_byte(10), OsMode::Pc);
    }

    #[test]
    fn cycle_wraps() {
        let mut scheme = KanaScheme::X6004;
        scheme = scheme.next();
        assert_eq!(scheme, KanaScheme::Romaji);
    }

    #[test]
    fn mod_map_families() {
        assert!(!ModMap::Xs.is_japanese());
        assert!(ModMap::Cj.is_japanese());
        assert!(!ModMap::Cj.is_mac());
        assert!(ModMap::Cja.is_mac());
        assert_eq!(ModMap::Sja.columns(), &MOD_COLUMN_MAPS[1]);
    }
}
