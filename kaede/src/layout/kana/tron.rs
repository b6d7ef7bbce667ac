//! TRON kana tables.

use super::roma::*;
use super::KanaMatrix;

#[rustfmt::skip]
pub static BASE: KanaMatrix = [
    [LCB, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [RCB, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [RA, RU, KO, HA, XYO, 0, 0, KI, NO, KU, A, RE],
    [TA, TO, KA, TE, MO, 0, 0, WO, I, U, SI, NN],
    [MA, RI, NI, SA, NA, 0, 0, SU, TU, TOUTEN, KUTEN, XTU],
];

#[rustfmt::skip]
pub static LEFT: KanaMatrix = [
    [LCB, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [SANTEN, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [RCB, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [HI, SO, NAKAGURO, XYA, HO, 0, 0, GI, GE, GU, QUESTION, WYI],
    [NU, NE, XYU, YO, HU, 0, 0, DAKUTEN, DI, VU, ZI, WYE],
    [XE, XO, SE, YU, HE, 0, 0, ZU, DU, COMMA, PERIOD, XWA],
];

#[rustfmt::skip]
pub static RIGHT: KanaMatrix = [
    [LWCB, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [RWCB, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [BI, ZO, GO, BA, BO, 0, 0, E, KE, ME, MU, RO],
    [DA, DO, GA, DE, BU, 0, 0, O, TI, CHOUON, MI, YA],
    [XKA, XKE, ZE, ZA, BE, 0, 0, WA, XI, XA, HANDAKU, XU],
];
