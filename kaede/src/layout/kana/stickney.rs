//! Stickney Next tables. Entries are JIS-kana direct positions; the host
//! IME runs in kana-input mode and the firmware only moves the syllables
//! that sit on different keys here than on a stock JIS board.

use super::roma::*;
use super::KanaMatrix;

#[rustfmt::skip]
pub static BASE: KanaMatrix = [
    [KANA_LCB, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [KANA_RCB, KANA_HO, 0, 0, 0, 0, 0, 0, 0, 0, 0, KANA_KUTEN],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, KANA_TOUTEN],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, KANA_DAKUTEN],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, KANA_WO, 0, 0, 0, 0, 0, 0, 0, 0, KANA_CHOUON],
];

#[rustfmt::skip]
pub static SHIFT: KanaMatrix = [
    [KANA_LCB, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [KANA_RCB, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, KANA_KUTEN],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, KANA_NAKAGURO],
    [0, 0, 0, KANA_SO, 0, 0, 0, 0, 0, 0, 0, KANA_HANDAKU],
    [0, 0, KANA_SE, KANA_HE, KANA_KE, 0, 0, 0, KANA_ME, KANA_NU, KANA_RO, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, KANA_MU, 0, 0, 0],
];
