//! The key-event-to-report translation engine.
//!
//! One [`Engine`] per device. The scan loop feeds it raw contacts through
//! [`Engine::on_pressed`] and closes each pass with [`Engine::make_report`],
//! which runs ghost rejection, the tap/hold state machine, layer and layout
//! resolution, kana composition and the OS-quirk rewrite, and reports how
//! the resulting bytes must be transmitted.

pub mod kana;

use kaede_types::keycode::KeyCode;
use kaede_types::led_indicator::LedIndicator;
use kaede_types::modifier::HidModifiers;
use kaede_types::report::KeyboardReport;

use crate::keyboard_macro::{num_keycode, MacroBuffer};
use crate::layout::base::{numpad_overlay, BaseMatrix, COLEMAK, DVORAK, JIS, NICOLA_F, QWERTY};
use crate::layout::fn_layer::fn_chord;
use crate::layout::{col_of, in_matrix, pos, row_of};
use crate::settings::{BaseLayout, KanaScheme, Settings};
use crate::{APP_VERSION, BOARD_REV, HOLD_TICKS, MATRIX_COLS, MATRIX_ROWS, VOID_POSITION};

use self::kana::KanaState;

/// Flag bits in byte 1 of a key-set.
pub(crate) mod flags {
    pub const LEFT_FN: u8 = 0x01;
    pub const RIGHT_FN: u8 = 0x02;
    pub const FN: u8 = LEFT_FN | RIGHT_FN;
    /// Trackpad touched: the mouse-key layer.
    pub const PAD: u8 = 0x04;
    /// The keypad-0 thumb position is down; shifts the Fn row into
    /// host-link profile selection.
    pub const KEYPAD0: u8 = 0x08;
}

/// One debounced scan image: modifier mask, flag byte, up to six matrix
/// positions. Unused position slots hold [`VOID_POSITION`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeySet {
    pub modifiers: HidModifiers,
    pub flags: u8,
    pub positions: [u8; 6],
}

impl KeySet {
    pub const fn empty() -> Self {
        Self {
            modifiers: HidModifiers::new(),
            flags: 0,
            positions: [VOID_POSITION; 6],
        }
    }

    fn is_quiescent(&self) -> bool {
        self.modifiers.is_empty() && self.flags == 0 && self.positions == [VOID_POSITION; 6]
    }
}

impl Default for KeySet {
    fn default() -> Self {
        Self::empty()
    }
}

/// How the synthesized report must be sent.
///
/// `InOrder` and `Macro` oblige the transport to write the queued key codes
/// strictly one report at a time in the given order; a kana correction is a
/// backspace followed by the replacement strokes and reordering or
/// coalescing them corrupts the host-side text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transmit {
    /// Nothing changed.
    None,
    /// A plain report, send as one unit.
    Normal,
    /// Abort auto-repeat: send the release image, keep state untouched.
    Break,
    /// Ordered kana sequence.
    InOrder,
    /// A settings echo is queued in the macro buffer.
    Macro,
}

/// Requests the engine cannot serve itself, drained by the main loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostRequest {
    /// Switch the BLE coprocessor to a bonding profile slot.
    SelectProfile(u8),
    /// Drop all BLE bonding data.
    ClearBonding,
}

pub struct Engine {
    pub settings: Settings,
    pub macros: MacroBuffer,

    // Scan accumulation, reset every pass.
    current: KeySet,
    count: usize,
    row_count: [u8; MATRIX_ROWS],
    col_count: [u8; MATRIX_COLS],

    // Tap/hold disambiguation.
    hold: KeySet,
    tick: u8,
    holding: bool,

    /// The key-set most recently synthesized into a report.
    processed: KeySet,

    // Kana input state.
    kana_led: bool,
    eisuu_mode: bool,
    pub(crate) kana: KanaState,

    // Prefix shift latch.
    prefix: HidModifiers,
    modifiers_prev: HidModifiers,

    // Dual-role Fn keys.
    dual_fn: u8,

    /// Lock-LED image last received from the host.
    led: LedIndicator,

    media_request: Option<u16>,
    host_request: Option<HostRequest>,
    pad_chord: Option<[u8; 6]>,
}

impl Engine {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            macros: MacroBuffer::new(),
            current: KeySet::empty(),
            count: 0,
            row_count: [0; MATRIX_ROWS],
            col_count: [0; MATRIX_COLS],
            hold: KeySet::empty(),
            tick: 0,
            holding: false,
            processed: KeySet::empty(),
            kana_led: false,
            eisuu_mode: false,
            kana: KanaState::default(),
            prefix: HidModifiers::new(),
            modifiers_prev: HidModifiers::new(),
            dual_fn: 0,
            led: LedIndicator::new(),
            media_request: None,
            host_request: None,
            pad_chord: None,
        }
    }

    /// Updates the lock-LED image received from the host (or the BLE
    /// coprocessor when that transport is active).
    pub fn set_leds(&mut self, led: LedIndicator) {
        self.led = led;
    }

    /// Pending consumer-page usage, if a media key fired.
    pub fn take_media_request(&mut self) -> Option<u16> {
        self.media_request.take()
    }

    /// Pending host-link request, if a profile/bonding chord fired.
    pub fn take_host_request(&mut self) -> Option<HostRequest> {
        self.host_request.take()
    }

    /// Positions held on the mouse-key layer this cycle, if any.
    pub fn take_pad_chord(&mut self) -> Option<[u8; 6]> {
        self.pad_chord.take()
    }

    fn base_table(&self) -> &'static BaseMatrix {
        match self.settings.base {
            BaseLayout::Qwerty => &QWERTY,
            BaseLayout::Dvorak => &DVORAK,
            BaseLayout::Colemak => &COLEMAK,
            BaseLayout::Jis => &JIS,
            BaseLayout::NicolaF => &NICOLA_F,
        }
    }

    /// Keypad overlay entry for a position while Num Lock is lit.
    pub(crate) fn key_numlock(&self, code: u8) -> KeyCode {
        if self.led.num_lock() {
            numpad_overlay(code)
        } else {
            KeyCode::No
        }
    }

    /// Modifier-map dependent remapping of Alt/GUI/Application keys.
    fn process_mod_key(&self, key: KeyCode) -> KeyCode {
        use KeyCode::*;
        if self.settings.mod_map.is_mac() {
            match key {
                RAlt => Lang1,
                LAlt => Lang2,
                Application => LAlt,
                other => other,
            }
        } else if self.settings.mod_map.is_japanese() {
            match key {
                RAlt => Lang1,
                LAlt => Lang2,
                LGui => LAlt,
                other => other,
            }
        } else {
            key
        }
    }

    /// Key code a position resolves to under the active base layout,
    /// keypad overlay included.
    pub fn key_at_base(&self, code: u8) -> KeyCode {
        if !in_matrix(code) {
            return KeyCode::No;
        }
        let key = self.key_numlock(code);
        if key != KeyCode::No {
            return key;
        }
        let key = self.base_table()[row_of(code)][col_of(code)];
        self.process_mod_key(key)
    }

    /// Registers one closed contact of the current scan pass.
    pub fn on_pressed(&mut self, row: u8, column: u8) {
        if row as usize >= MATRIX_ROWS || column as usize >= MATRIX_COLS {
            return;
        }
        self.row_count[row as usize] += 1;
        self.col_count[column as usize] += 1;

        let mut column = column;
        if row == 7 {
            column = self.settings.mod_map.columns()[column as usize];
        }
        let code = pos(row, column);

        let key = self.key_at_base(code);
        if key.is_modifier() {
            self.current.modifiers |= key.to_modifiers();
        } else if key.is_fn() {
            self.current.flags |= if key == KeyCode::LeftFn {
                flags::LEFT_FN
            } else {
                flags::RIGHT_FN
            };
        } else if self.count < 6 {
            self.current.positions[self.count] = code;
            self.count += 1;
        }

        if numpad_overlay(code) == KeyCode::Kp0 {
            self.current.flags |= flags::KEYPAD0;
        }
    }

    /// Phantom-contact check over the finished pass. A real 3-key chord on
    /// a rectangular intersection must not be reported as a 4th key.
    fn detect_ghost(&mut self) -> bool {
        let rows = self.row_count.iter().filter(|&&n| n >= 2).count();
        let cols = self.col_count.iter().filter(|&&n| n >= 2).count();
        self.row_count = [0; MATRIX_ROWS];
        self.col_count = [0; MATRIX_COLS];
        rows >= 2 && cols >= 2
    }

    fn reset_scan(&mut self) {
        self.current = KeySet::empty();
        self.count = 0;
    }

    fn fn_released(&self, current: &KeySet) -> bool {
        self.processed.flags & (flags::FN | flags::PAD) != 0 && current.flags & (flags::FN | flags::PAD) == 0
    }

    fn shift_released(&self, current: &KeySet) -> bool {
        (self.processed.modifiers.left_shift() && !current.modifiers.left_shift())
            || (self.processed.modifiers.right_shift() && !current.modifiers.right_shift())
    }

    /// Closes a scan pass and synthesizes a report when one is due.
    ///
    /// `touched` is the trackpad touch state; it routes held keys onto the
    /// mouse-key layer.
    pub fn make_report(&mut self, touched: bool, report: &mut KeyboardReport) -> Transmit {
        if self.detect_ghost() {
            trace!("ghosted scan pass dropped");
            self.reset_scan();
            return Transmit::None;
        }

        let mut current = self.current;
        if self.led.scroll_lock() {
            current.flags |= flags::LEFT_FN;
        }
        if touched {
            current.flags |= flags::PAD;
        }

        // Prefix shift: a tapped shift latches onto the next kana key.
        let scanned_modifiers = current.modifiers;
        if self.settings.prefix_shift.is_enabled() && self.is_kana_mode(&current) {
            current.modifiers |= self.prefix;
            if !self.modifiers_prev.left_shift() && scanned_modifiers.left_shift() {
                self.prefix = HidModifiers::from_bits(self.prefix.into_bits() ^ HidModifiers::LEFT_SHIFT.into_bits());
            }
            if !self.modifiers_prev.right_shift() && scanned_modifiers.right_shift() {
                self.prefix = HidModifiers::from_bits(self.prefix.into_bits() ^ HidModifiers::RIGHT_SHIFT.into_bits());
            }
        }
        self.modifiers_prev = scanned_modifiers;

        // Tap/hold: a changed set restarts the hold timer unless the Fn
        // flag or a shift modifier appeared or vanished relative to the
        // processed set, which must register instantly.
        let threshold = HOLD_TICKS + self.settings.delay.extra_ticks();
        if current != self.hold {
            if current.positions != self.hold.positions {
                self.tick = 0;
            }
            let fn_now = current.flags & flags::FN != 0;
            let fn_before = self.processed.flags & flags::FN != 0;
            let shift_now = current.modifiers.intersects(HidModifiers::SHIFT);
            let shift_before = self.processed.modifiers.intersects(HidModifiers::SHIFT);
            if (fn_now && !fn_before) || (shift_now && !shift_before) || self.fn_released(&current) || self.shift_released(&current) {
                self.holding = true;
            }
            self.hold = current;
        } else if self.tick < threshold {
            self.tick += 1;
        }

        let mut xmit = Transmit::None;
        if self.tick >= threshold || self.holding {
            let hold = self.hold;

            self.pad_chord = if hold.flags & (flags::FN | flags::PAD) == flags::PAD {
                Some(hold.positions)
            } else {
                None
            };

            if hold != self.processed {
                if hold.positions != self.processed.positions
                    || hold.positions[0] == VOID_POSITION
                    || hold.flags & (flags::FN | flags::PAD) != 0
                    || hold.modifiers.intersects(HidModifiers::SHIFT)
                {
                    if hold.positions[0] != VOID_POSITION {
                        self.prefix = HidModifiers::new();
                    }
                    xmit = self.process_keys(&hold, report);
                } else if self.fn_released(&hold) || (!self.settings.os.is_pc() && self.shift_released(&hold)) {
                    // A pure Fn/Shift release with an otherwise unchanged
                    // set is swallowed; several Japanese layouts type
                    // through shift releases.
                } else {
                    xmit = self.process_keys(&hold, report);
                }
                if xmit != Transmit::None {
                    self.process_os_mode(report);
                }
            }

            if self.holding && hold == self.processed && hold.is_quiescent() {
                self.holding = false;
            }
        }

        self.reset_scan();
        xmit
    }

    /// Synthesizes a report from a confirmed key-set. Updates the
    /// processed baseline only when the result is transmittable.
    pub fn process_keys(&mut self, current: &KeySet, report: &mut KeyboardReport) -> Transmit {
        if *current == self.processed {
            return Transmit::None;
        }
        report.clear();

        let xmit = if current.flags & flags::FN != 0 {
            self.process_fn_layer(current, report)
        } else if self.is_kana_mode(current) {
            self.process_keys_kana(current, report)
        } else {
            self.process_keys_base(current, report)
        };

        // Dual-role Fn: on Japanese modifier maps a tapped Fn key with no
        // intervening keys sends the IME toggle on release.
        if self.settings.mod_map.has_dual_role_fn() && !self.settings.os.is_pc() {
            if (current.flags ^ self.processed.flags) & flags::FN != 0 {
                let fn_now = current.flags & flags::FN;
                if fn_now != 0 {
                    self.dual_fn = fn_now;
                } else if self.dual_fn != 0 && xmit == Transmit::Normal && report.keycodes[0] == 0 {
                    let key = if self.dual_fn & flags::RIGHT_FN != 0 {
                        KeyCode::Lang1
                    } else {
                        KeyCode::Lang2
                    };
                    let key = self.toggle_kana_mode(key, current.modifiers, true);
                    report.keycodes[0] = key as u8;
                    self.processed = *current;
                    self.processed.flags |= self.dual_fn;
                    self.dual_fn = 0;
                    return xmit;
                }
            }
            if self.dual_fn != 0 && (xmit != Transmit::Normal || report.keycodes[0] != 0) {
                self.dual_fn = 0;
            }
        }

        if matches!(xmit, Transmit::Normal | Transmit::InOrder | Transmit::Macro) {
            self.processed = *current;
        } else if xmit == Transmit::Break {
            // Break aborts this cycle's output; the release image goes out
            // so the host drops auto-repeat.
            report.clear();
        }
        xmit
    }

    /// Whether the key-set types kana rather than the base layout.
    pub(crate) fn is_kana_mode(&self, current: &KeySet) -> bool {
        self.kana_led
            && !current
                .modifiers
                .intersects(HidModifiers::ALT | HidModifiers::CTRL | HidModifiers::GUI)
            && current.flags & (flags::FN | flags::PAD) == 0
            && self.settings.kana != KanaScheme::Romaji
            && (!self.eisuu_mode || !self.settings.os.is_109())
    }

    /// Tracks the host IME state from the toggle keys passing through, and
    /// applies the JIS shifted-zero quirk.
    pub(crate) fn toggle_kana_mode(&mut self, key: KeyCode, modifiers: HidModifiers, make: bool) -> KeyCode {
        match key {
            KeyCode::Lang1 => self.kana_led = true,
            KeyCode::Lang2 => {
                self.kana_led = false;
                self.prefix = HidModifiers::new();
            }
            KeyCode::CapsLock => {
                if make && self.settings.base.is_japanese() {
                    self.eisuu_mode = !self.eisuu_mode;
                }
            }
            KeyCode::Kc0 => {
                if modifiers.intersects(HidModifiers::SHIFT) && self.settings.base.is_japanese() {
                    return KeyCode::International1;
                }
            }
            _ => {}
        }
        key
    }

    /// The byte a key contributes to a report. Media sentinels become a
    /// consumer-page request; internal codes never leak.
    pub(crate) fn report_byte(&mut self, key: KeyCode) -> u8 {
        if key == KeyCode::Calc {
            self.media_request = Some(crate::hid::CONSUMER_CALCULATOR);
            return 0;
        }
        if key.is_internal() {
            return 0;
        }
        key as u8
    }

    fn process_fn_layer(&mut self, current: &KeySet, report: &mut KeyboardReport) -> Transmit {
        use KeyCode::*;
        let mut modifiers = current.modifiers;
        let profile_shift = current.flags & flags::KEYPAD0 != 0;
        let mut xmit = Transmit::Normal;
        let mut count = 0usize;

        for i in 0..6 {
            if xmit != Transmit::Normal {
                break;
            }
            let code = current.positions[i];
            let chord = fn_chord(code, self.settings.os.is_109());
            let make = !self.processed.positions.contains(&code);

            for &key in chord.iter() {
                if count >= 6 {
                    break;
                }
                match key {
                    No => {}
                    F1 => {
                        if make {
                            if profile_shift {
                                self.host_request = Some(HostRequest::SelectProfile(1));
                                modifiers &= !(HidModifiers::CTRL | HidModifiers::SHIFT);
                                xmit = Transmit::Break;
                            } else {
                                self.about();
                                xmit = Transmit::Macro;
                            }
                        }
                    }
                    F2 => {
                        if make {
                            if profile_shift {
                                self.host_request = Some(HostRequest::SelectProfile(2));
                                modifiers &= !(HidModifiers::CTRL | HidModifiers::SHIFT);
                                xmit = Transmit::Break;
                            } else {
                                let os = self.settings.cycle_os();
                                self.macros.emit_string(os.name_keys());
                                xmit = Transmit::Macro;
                            }
                        }
                    }
                    F3 => {
                        if make {
                            if profile_shift {
                                self.host_request = Some(HostRequest::SelectProfile(3));
                                modifiers &= !(HidModifiers::CTRL | HidModifiers::SHIFT);
                                xmit = Transmit::Break;
                            } else {
                                let base = self.settings.cycle_base();
                                self.macros.emit_string(base.name_keys());
                                xmit = Transmit::Macro;
                            }
                        }
                    }
                    F4 => {
                        if make {
                            if profile_shift {
                                self.host_request = Some(HostRequest::SelectProfile(0));
                                modifiers &= !(HidModifiers::CTRL | HidModifiers::SHIFT);
                                xmit = Transmit::Break;
                            } else {
                                let kana = self.settings.cycle_kana();
                                self.macros.emit_string(kana.name_keys());
                                xmit = Transmit::Macro;
                            }
                        }
                    }
                    F5 => {
                        if make {
                            let delay = self.settings.cycle_delay();
                            self.macros.emit_string(delay.name_keys());
                            xmit = Transmit::Macro;
                        }
                    }
                    F6 => {
                        if make {
                            let mod_map = self.settings.cycle_mod_map();
                            self.macros.emit_string(mod_map.name_keys());
                            xmit = Transmit::Macro;
                        }
                    }
                    F7 => {
                        if make {
                            let ime = self.settings.cycle_ime();
                            self.macros.emit_string(ime.name_keys());
                            xmit = Transmit::Macro;
                        }
                    }
                    F8 => {
                        if make {
                            let led = self.settings.cycle_led();
                            self.macros.emit_string(led.name_keys());
                            xmit = Transmit::Macro;
                        }
                    }
                    F9 => {
                        if make {
                            let prefix = self.settings.cycle_prefix_shift();
                            self.macros.emit_string(prefix.name_keys());
                            xmit = Transmit::Macro;
                        }
                    }
                    LCtrl => modifiers |= HidModifiers::LEFT_CTRL,
                    RCtrl => modifiers |= HidModifiers::RIGHT_CTRL,
                    LShift => modifiers |= HidModifiers::LEFT_SHIFT,
                    RShift => modifiers |= HidModifiers::RIGHT_SHIFT,
                    Escape => {
                        if make {
                            if profile_shift {
                                self.host_request = Some(HostRequest::ClearBonding);
                                modifiers &= !(HidModifiers::CTRL | HidModifiers::SHIFT);
                                xmit = Transmit::Break;
                            } else {
                                let key = self.toggle_kana_mode(key, current.modifiers, true);
                                let byte = self.report_byte(key);
                                report.keycodes[count] = byte;
                                count += 1;
                            }
                        }
                    }
                    other => {
                        let key = self.toggle_kana_mode(other, current.modifiers, make);
                        let byte = self.report_byte(key);
                        report.keycodes[count] = byte;
                        count += 1;
                    }
                }
            }
        }

        if count == 0 {
            modifiers &= !HidModifiers::SHIFT;
        }
        report.modifier = modifiers;
        xmit
    }

    fn process_keys_base(&mut self, current: &KeySet, report: &mut KeyboardReport) -> Transmit {
        let modifiers = current.modifiers;
        if current.flags & flags::PAD == 0 {
            for (slot, &code) in current.positions.iter().enumerate() {
                let key = self.key_at_base(code);
                let make = !self.processed.positions.contains(&code);
                let key = self.toggle_kana_mode(key, modifiers, make);
                report.keycodes[slot] = self.report_byte(key);
            }
        }
        report.modifier = modifiers;
        Transmit::Normal
    }

    /// Rewrites the IME toggle keys into whatever the selected host OS
    /// understands. Touches only the modifier byte and the matching slot.
    fn process_os_mode(&mut self, report: &mut KeyboardReport) {
        use crate::settings::OsMode;
        use KeyCode::*;
        for i in 0..report.keycodes.len() {
            let key = report.keycodes[i];
            match self.settings.os {
                OsMode::Pc => {
                    if key == Lang1 as u8 {
                        report.keycodes[i] = F13 as u8;
                    } else if key == Lang2 as u8 {
                        report.keycodes[i] = F14 as u8;
                    }
                }
                OsMode::Mac => {
                    if key == KpEnter as u8 {
                        report.keycodes[i] = Enter as u8;
                    }
                }
                OsMode::Win104A => {
                    if key == Lang1 as u8 {
                        report.keycodes[i] = Space as u8;
                        report.modifier |= HidModifiers::LEFT_SHIFT | HidModifiers::LEFT_CTRL;
                    } else if key == Lang2 as u8 {
                        report.keycodes[i] = Backspace as u8;
                        report.modifier |= HidModifiers::LEFT_SHIFT | HidModifiers::LEFT_CTRL;
                    }
                }
                OsMode::Win104B => {
                    if key == Lang1 as u8 || key == Lang2 as u8 {
                        report.keycodes[i] = Grave as u8;
                        report.modifier |= HidModifiers::LEFT_ALT;
                    }
                }
                OsMode::Win109 => {
                    if key == Lang1 as u8 {
                        report.keycodes[i] = International4 as u8;
                    } else if key == Lang2 as u8 {
                        report.keycodes[i] = International5 as u8;
                    }
                }
                OsMode::Win109A => {
                    if key == Lang1 as u8 {
                        report.keycodes[i] = International4 as u8;
                        report.modifier |= HidModifiers::LEFT_SHIFT | HidModifiers::LEFT_CTRL;
                    } else if key == Lang2 as u8 {
                        report.keycodes[i] = International5 as u8;
                        report.modifier |= HidModifiers::LEFT_SHIFT | HidModifiers::LEFT_CTRL;
                    }
                }
                OsMode::Win109B => {
                    if key == Lang1 as u8 || key == Lang2 as u8 {
                        report.keycodes[i] = Grave as u8;
                    }
                }
                OsMode::AltSpace => {
                    if key == Lang1 as u8 || key == Lang2 as u8 {
                        report.keycodes[i] = Space as u8;
                        report.modifier |= HidModifiers::LEFT_ALT;
                    }
                }
                OsMode::ShiftSpace => {
                    if key == Lang1 as u8 || key == Lang2 as u8 {
                        report.keycodes[i] = Space as u8;
                        report.modifier |= HidModifiers::LEFT_SHIFT;
                    }
                }
                OsMode::CtrlSpace => {
                    if key == Lang1 as u8 || key == Lang2 as u8 {
                        report.keycodes[i] = Space as u8;
                        report.modifier |= HidModifiers::LEFT_CTRL;
                    }
                }
            }
        }
    }

    /// Queues the device identity and current mode list as typed text.
    fn about(&mut self) {
        use KeyCode::*;
        self.macros.emit_string(&[K, A, E, D, E, Enter]);

        self.macros.emit_string(&[R, E, V, Dot, Space]);
        self.macros.emit_key(num_keycode(BOARD_REV));
        self.macros.emit_key(Enter);

        self.macros.emit_string(&[V, E, R, Dot, Space]);
        self.macros.emit_key(num_keycode(((APP_VERSION >> 8) & 0xf) as u8));
        self.macros.emit_key(Dot);
        self.macros.emit_key(num_keycode(((APP_VERSION >> 4) & 0xf) as u8));
        self.macros.emit_key(num_keycode((APP_VERSION & 0xf) as u8));
        self.macros.emit_key(Enter);

        self.macros.emit_string(&[F, Kc2, Space]);
        self.macros.emit_string(self.settings.os.name_keys());
        self.macros.emit_string(&[F, Kc3, Space]);
        self.macros.emit_string(self.settings.base.name_keys());
        self.macros.emit_string(&[F, Kc4, Space]);
        self.macros.emit_string(self.settings.kana.name_keys());
        self.macros.emit_string(&[F, Kc5, Space]);
        self.macros.emit_string(self.settings.delay.name_keys());
        self.macros.emit_string(&[F, Kc6, Space]);
        self.macros.emit_string(self.settings.mod_map.name_keys());
        self.macros.emit_string(&[F, Kc7, Space]);
        self.macros.emit_string(self.settings.ime.name_keys());
        self.macros.emit_string(&[F, Kc8, Space]);
        self.macros.emit_string(self.settings.led.name_keys());
        self.macros.emit_string(&[F, Kc9, Space]);
        self.macros.emit_string(self.settings.prefix_shift.name_keys());
    }

    /// Folds the kana indicator into the lock-LED image for the LED driver.
    pub fn indicator(&self, host_leds: LedIndicator) -> LedIndicator {
        use crate::settings::LedMode;
        let mut leds = host_leds;
        if self.settings.kana != KanaScheme::Romaji {
            match self.settings.led {
                LedMode::Left | LedMode::Center | LedMode::Right => {
                    let bit = self.settings.led as u8;
                    let cleared = leds.into_bits() & !(1 << bit);
                    leds = LedIndicator::from_bits(cleared | ((self.kana_led as u8) << bit));
                }
                LedMode::LeftNum | LedMode::CenterCaps | LedMode::RightScroll => {
                    let bit = self.settings.led as u8 - LedMode::LeftNum as u8;
                    leds = LedIndicator::from_bits(leds.into_bits() | ((self.kana_led as u8) << bit));
                }
                LedMode::Off => {}
            }
            if self.settings.prefix_shift.shows_led() {
                if self.prefix.left_shift() {
                    leds |= LedIndicator::NUM_LOCK;
                }
                if self.prefix.right_shift() {
                    leds |= LedIndicator::SCROLL_LOCK;
                }
            }
        }
        leds
    }

    #[cfg(any(test, feature = "std"))]
    pub fn kana_led(&self) -> bool {
        self.kana_led
    }

    #[cfg(any(test, feature = "std"))]
    pub fn processed_set(&self) -> &KeySet {
        &self.processed
    }
}
