//! Static layout tables.
//!
//! Every table is indexed by the linearized matrix position
//! `12 * row + column` (0..96). The contents are hand-tuned hardware
//! mappings; changing an entry changes what the physical key types.

pub mod base;
pub mod fn_layer;
pub mod kana;

use crate::{MATRIX_COLS, MATRIX_ROWS};

/// Linearizes a matrix coordinate.
pub const fn pos(row: u8, col: u8) -> u8 {
    row * MATRIX_COLS as u8 + col
}

pub const fn row_of(code: u8) -> usize {
    (code / MATRIX_COLS as u8) as usize
}

pub const fn col_of(code: u8) -> usize {
    (code % MATRIX_COLS as u8) as usize
}

/// Whether a linear position is inside the matrix.
pub const fn in_matrix(code: u8) -> bool {
    (code as usize) < MATRIX_ROWS * MATRIX_COLS
}

/// Number-row positions that must type digits literally in kana mode when
/// the base layout is not Japanese.
pub const fn is_digit_position(code: u8) -> bool {
    code == 25 || code == 34 || (37 <= code && code <= 46)
}
