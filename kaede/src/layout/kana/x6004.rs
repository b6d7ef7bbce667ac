//! JIS X 6004 (new JIS) kana tables.

use super::roma::*;
use super::KanaMatrix;

#[rustfmt::skip]
pub static BASE: KanaMatrix = [
    [LCB, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [RCB, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, TI],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, NA],
    [SO, KE, SE, TE, XYO, 0, 0, TU, NN, NO, WO, RI],
    [HA, KA, SI, TO, TA, 0, 0, KU, U, I, DAKUTEN, KI],
    [SU, KO, NI, SA, A, 0, 0, XTU, RU, TOUTEN, KUTEN, RE],
];

#[rustfmt::skip]
pub static SHIFT: KanaMatrix = [
    [LWCB, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [RWCB, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, LCB],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, RCB],
    [XA, HANDAKU, HO, HU, ME, 0, 0, HI, E, MI, YA, NU],
    [XI, HE, RA, XYU, YO, 0, 0, MA, O, MO, WA, YU],
    [XU, XE, XO, NE, XYA, 0, 0, MU, RO, NAKAGURO, CHOUON, QUESTION],
];
