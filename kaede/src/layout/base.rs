//! Base key tables, one per selectable layout, plus the bottom-row modifier
//! permutations and the Num-Lock keypad overlay.

use kaede_types::keycode::KeyCode::{self, *};

pub type BaseMatrix = [[KeyCode; 12]; 8];

#[rustfmt::skip]
pub static QWERTY: BaseMatrix = [
    [LeftBracket, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, Equal],
    [Grave, F1, No, No, No, No, No, No, No, No, F12, Backslash],
    [RightBracket, Kc1, No, No, No, No, No, No, No, No, Kc0, Minus],
    [CapsLock, Kc2, Kc3, Kc4, Kc5, No, No, Kc6, Kc7, Kc8, Kc9, Quote],
    [Q, W, E, R, T, No, No, Y, U, I, O, P],
    [A, S, D, F, G, Escape, Application, H, J, K, L, Semicolon],
    [Z, X, C, V, B, Tab, Enter, N, M, Comma, Dot, Slash],
    [LCtrl, LGui, LeftFn, LShift, Backspace, LAlt, RAlt, Space, RShift, RightFn, RGui, RCtrl],
];

#[rustfmt::skip]
pub static DVORAK: BaseMatrix = [
    [LeftBracket, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, Backslash],
    [Grave, F1, No, No, No, No, No, No, No, No, F12, Equal],
    [RightBracket, Kc1, No, No, No, No, No, No, No, No, Kc0, Slash],
    [CapsLock, Kc2, Kc3, Kc4, Kc5, No, No, Kc6, Kc7, Kc8, Kc9, Minus],
    [Quote, Comma, Dot, P, Y, No, No, F, G, C, R, L],
    [A, O, E, U, I, Escape, Application, D, H, T, N, S],
    [Semicolon, Q, J, K, X, Tab, Enter, B, M, W, V, Z],
    [LCtrl, LGui, LeftFn, LShift, Backspace, LAlt, RAlt, Space, RShift, RightFn, RGui, RCtrl],
];

#[rustfmt::skip]
pub static COLEMAK: BaseMatrix = [
    [LeftBracket, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, Equal],
    [Grave, F1, No, No, No, No, No, No, No, No, F12, Backslash],
    [RightBracket, Kc1, No, No, No, No, No, No, No, No, Kc0, Minus],
    [Backspace, Kc2, Kc3, Kc4, Kc5, No, No, Kc6, Kc7, Kc8, Kc9, Quote],
    [Q, W, F, P, G, No, No, J, L, U, Y, Semicolon],
    [A, R, S, T, D, Escape, Application, H, N, E, I, O],
    [Z, X, C, V, B, Tab, Enter, K, M, Comma, Dot, Slash],
    [LCtrl, LGui, LeftFn, LShift, Space, LAlt, RAlt, Space, RShift, RightFn, RGui, RCtrl],
];

// Japanese layouts.
//
// [{   RightBracket
// ]}   NonusHash
// \|   International3
// @`   LeftBracket
// -=   Minus
// :*   Quote
// ^~   Equal
//  _   International1
// no-convert   International5
// convert      International4
// hiragana     International2
// zenkaku      Grave

#[rustfmt::skip]
pub static JIS: BaseMatrix = [
    [RightBracket, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, Equal],
    [International3, F1, No, No, No, No, No, No, No, No, F12, LeftBracket],
    [NonusHash, Kc1, No, No, No, No, No, No, No, No, Kc0, Minus],
    [CapsLock, Kc2, Kc3, Kc4, Kc5, No, No, Kc6, Kc7, Kc8, Kc9, Quote],
    [Q, W, E, R, T, No, No, Y, U, I, O, P],
    [A, S, D, F, G, Escape, Application, H, J, K, L, Semicolon],
    [Z, X, C, V, B, Tab, Enter, N, M, Comma, Dot, Slash],
    [LCtrl, LGui, LeftFn, LShift, Backspace, LAlt, RAlt, Space, RShift, RightFn, RGui, RCtrl],
];

#[rustfmt::skip]
pub static NICOLA_F: BaseMatrix = [
    [RightBracket, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, Minus],
    [International3, F1, No, No, No, No, No, No, No, No, F12, LeftBracket],
    [NonusHash, Kc1, No, No, No, No, No, No, No, No, Kc0, Quote],
    [Equal, Kc2, Kc3, Kc4, Kc5, No, No, Kc6, Kc7, Kc8, Kc9, Backspace],
    [Q, W, E, R, T, No, No, Y, U, I, O, P],
    [A, S, D, F, G, Escape, Application, H, J, K, L, Semicolon],
    [Z, X, C, V, B, Tab, Enter, N, M, Comma, Dot, Slash],
    [LCtrl, LGui, LeftFn, LShift, KpEnter, LAlt, RAlt, Space, RShift, RightFn, RGui, RCtrl],
];

/// Bottom-row column permutations selected by the modifier-map setting.
/// Index = column of the pressed key, value = column looked up instead.
///
/// Column meanings at identity: 0 LCtrl, 1 LGui, 2 LeftFn, 3 LShift,
/// 4 Backspace, 5 LAlt, 6 RAlt, 7 Space, 8 RShift, 9 RightFn, 10 RGui,
/// 11 RCtrl.
#[rustfmt::skip]
pub static MOD_COLUMN_MAPS: [[u8; 12]; 4] = [
    [0, 1, 2, 3, 4, 5, 6,  7,  8, 9, 10, 11],   // C
    [3, 1, 2, 0, 4, 5, 6,  7, 11, 9, 10,  8],   // S
    [0, 1, 2, 4, 3, 5, 6,  8,  7, 9, 10, 11],   // XC
    [3, 1, 2, 4, 0, 5, 6, 11,  7, 9, 10,  8],   // XS
];

/// Right-hand keypad overlay active while Num Lock is lit, rows 2..8,
/// columns 7..12.
#[rustfmt::skip]
static NUMPAD: [[KeyCode; 5]; 6] = [
    [No, No, No, Backspace, No],
    [Calc, Tab, KpSlash, KpAsterisk, No],
    [No, Kp7, Kp8, Kp9, KpMinus],
    [No, Kp4, Kp5, Kp6, KpPlus],
    [No, Kp1, Kp2, Kp3, Enter],
    [Kp0, Kp0, No, KpDot, Kp0],
];

/// The keypad overlay entry for a position, `No` outside the overlay.
/// Callers gate on the Num Lock LED.
pub fn numpad_overlay(code: u8) -> KeyCode {
    let row = super::row_of(code);
    let col = super::col_of(code);
    if (7..12).contains(&col) && (2..8).contains(&row) {
        NUMPAD[row - 2][col - 7]
    } else {
        No
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::layout::pos;

    #[test]
    fn numpad_overlay_covers_right_block_only() {
        assert_eq!(numpad_overlay(pos(4, 8)), Kp7);
        assert_eq!(numpad_overlay(pos(7, 7)), Kp0);
        assert_eq!(numpad_overlay(pos(4, 2)), No);
        assert_eq!(numpad_overlay(pos(1, 11)), No);
    }
}
