//! Function-layer overlay.
//!
//! Keyed by matrix position, not key code, so the overlay stays put when
//! the base layout changes. Each entry is a chord of up to three key codes,
//! `No`-terminated. `F1`..`F9` in the first slot are settings actions
//! resolved by the engine, not literal keys.

use kaede_types::keycode::KeyCode::{self, *};

pub type FnChord = [KeyCode; 3];

const fn chord1(a: KeyCode) -> FnChord {
    [a, No, No]
}

const fn chord2(a: KeyCode, b: KeyCode) -> FnChord {
    [a, b, No]
}

const NONE: FnChord = [No, No, No];

#[rustfmt::skip]
pub static FN_LAYER: [[FnChord; 12]; 8] = [
    [chord2(LCtrl, LeftBracket), chord1(F2), chord1(F3), chord1(F4), chord1(F5), chord1(F6), chord1(F7), chord1(F8), chord1(F9), chord1(Mute), chord1(VolumeDown), chord1(Pause)],
    [chord1(Insert), chord1(F1), NONE, NONE, NONE, NONE, NONE, NONE, NONE, NONE, chord1(VolumeUp), chord1(ScrollLock)],
    [[LCtrl, LShift, Z], chord2(LCtrl, Kc1), NONE, NONE, NONE, NONE, NONE, NONE, NONE, NONE, chord2(LCtrl, Kc0), chord1(PrintScreen)],
    [chord1(Delete), chord2(LCtrl, Kc2), chord2(LCtrl, Kc3), chord2(LCtrl, Kc4), chord2(LCtrl, Kc5), NONE, NONE, chord2(LCtrl, Kc6), chord2(LCtrl, Kc7), chord2(LCtrl, Kc8), chord2(LCtrl, Kc9), chord1(NumLock)],
    [chord2(LCtrl, Y), chord2(LCtrl, W), chord1(PageUp), chord2(LCtrl, R), chord2(LCtrl, T), NONE, NONE, chord2(LCtrl, Home), chord2(LCtrl, Left), chord1(Up), chord2(LCtrl, Right), chord2(LCtrl, End)],
    [chord2(LCtrl, A), chord2(LCtrl, S), chord1(PageDown), chord2(LCtrl, F), chord2(LCtrl, G), chord1(Escape), chord1(CapsLock), chord1(Home), chord1(Left), chord1(Down), chord1(Right), chord1(End)],
    [chord2(LCtrl, Z), chord2(LCtrl, X), chord2(LCtrl, C), chord2(LCtrl, V), chord2(LCtrl, B), chord1(Tab), chord1(Enter), chord2(LCtrl, N), chord2(LShift, Left), chord2(LShift, Down), chord2(LShift, Right), chord2(LShift, End)],
    [NONE, NONE, NONE, NONE, chord2(LCtrl, Backspace), NONE, NONE, chord2(LCtrl, Space), NONE, NONE, NONE, NONE],
];

/// IME key overlay for the Japanese 109 OS modes, positions (6,8)..(6,11):
/// no-convert, convert, hiragana, zenkaku.
#[rustfmt::skip]
static FN_109: [FnChord; 4] = [
    chord1(International5),
    chord1(International4),
    chord1(International2),
    chord1(Grave),
];

/// Chord for a position, honoring the 109 overlay when active.
pub fn fn_chord(code: u8, use_109: bool) -> &'static FnChord {
    const BASE_109: u8 = 6 * 12 + 8;
    if use_109 && (BASE_109..BASE_109 + 4).contains(&code) {
        return &FN_109[(code - BASE_109) as usize];
    }
    &FN_LAYER[super::row_of(code)][super::col_of(code)]
}
