//! NICOLA (thumb-shift) kana tables.

use super::roma::*;
use super::KanaMatrix;

#[rustfmt::skip]
pub static BASE: KanaMatrix = [
    [LCB, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, DAKUTEN],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [RCB, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, TOUTEN],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [KUTEN, KA, TA, KO, SA, 0, 0, RA, TI, KU, TU, TOUTEN],
    [U, SI, TE, KE, SE, 0, 0, HA, TO, KI, I, NN],
    [KUTEN, HI, SU, HU, HE, 0, 0, ME, SO, NE, HO, NAKAGURO],
];

#[rustfmt::skip]
pub static LEFT: KanaMatrix = [
    [LCB, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, DAKUTEN],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [RCB, QUESTION, 0, 0, 0, 0, 0, 0, 0, 0, 0, TOUTEN],
    [0, SLASH, NAMI, LCB, RCB, 0, 0, LSB, RSB, 0, 0, 0],
    [XA, E, RI, XYA, RE, 0, 0, PA, DI, GU, DU, PI],
    [WO, A, NA, XYU, MO, 0, 0, BA, DO, GI, PO, NN],
    [XU, CHOUON, RO, YA, XI, 0, 0, PU, ZO, PE, BO, NAKAGURO],
];

#[rustfmt::skip]
pub static RIGHT: KanaMatrix = [
    [LWCB, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, HANDAKU],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [RWCB, QUESTION, 0, 0, 0, 0, 0, 0, 0, 0, 0, TOUTEN],
    [0, SLASH, NAMI, LCB, RCB, 0, 0, LSB, RSB, 0, 0, 0],
    [KUTEN, GA, DA, GO, ZA, 0, 0, YO, NI, RU, MA, XE],
    [VU, ZI, DE, GE, ZE, 0, 0, MI, O, NO, XYO, XTU],
    [KUTEN, BI, ZU, BU, BE, 0, 0, NU, YU, MU, WA, XO],
];
