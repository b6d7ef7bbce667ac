//! Kana syllable code space and the per-scheme key tables.
//!
//! Kana tables do not hold key codes; they hold *syllable codes* (`roma`),
//! which the composition engine spells out as one to three key strokes.
//! Codes below [`roma::MTYPE_FIRST`] decompose arithmetically into a
//! consonant and a vowel (`code = 7 * consonant + vowel`); the blocks above
//! are table-driven: M-type multi-sound endings, common punctuation and
//! diacritic marks, JIS-kana direct positions for Stickney, and the
//! IME-specific bracket set.

pub mod mtype;
pub mod nicola;
pub mod stickney;
pub mod tron;
pub mod x6004;

use kaede_types::keycode::KeyCode::{self, *};

use crate::settings::ImeMode;

pub type KanaMatrix = [[u8; 12]; 7];

/// The three shift planes of one kana scheme.
pub struct KanaTables {
    pub base: &'static KanaMatrix,
    pub left: &'static KanaMatrix,
    pub right: &'static KanaMatrix,
}

#[allow(dead_code)]
pub mod roma {
    //! Syllable codes. The gojūon block is generated from the
    //! consonant/vowel grid; the named blocks follow it.

    const fn syl(consonant: u8, vowel: u8) -> u8 {
        7 * consonant + vowel
    }

    pub const A: u8 = syl(0, 1);
    pub const I: u8 = syl(0, 2);
    pub const U: u8 = syl(0, 3);
    pub const E: u8 = syl(0, 4);
    pub const O: u8 = syl(0, 5);

    pub const K: u8 = syl(1, 0);
    pub const KA: u8 = syl(1, 1);
    pub const KI: u8 = syl(1, 2);
    pub const KU: u8 = syl(1, 3);
    pub const KE: u8 = syl(1, 4);
    pub const KO: u8 = syl(1, 5);
    pub const KY: u8 = syl(1, 6);

    pub const S: u8 = syl(2, 0);
    pub const SA: u8 = syl(2, 1);
    pub const SI: u8 = syl(2, 2);
    pub const SU: u8 = syl(2, 3);
    pub const SE: u8 = syl(2, 4);
    pub const SO: u8 = syl(2, 5);
    pub const SY: u8 = syl(2, 6);

    pub const T: u8 = syl(3, 0);
    pub const TA: u8 = syl(3, 1);
    pub const TI: u8 = syl(3, 2);
    pub const TU: u8 = syl(3, 3);
    pub const TE: u8 = syl(3, 4);
    pub const TO: u8 = syl(3, 5);
    pub const TY: u8 = syl(3, 6);

    pub const N: u8 = syl(4, 0);
    pub const NA: u8 = syl(4, 1);
    pub const NI: u8 = syl(4, 2);
    pub const NU: u8 = syl(4, 3);
    pub const NE: u8 = syl(4, 4);
    pub const NO: u8 = syl(4, 5);
    pub const NY: u8 = syl(4, 6);

    pub const H: u8 = syl(5, 0);
    pub const HA: u8 = syl(5, 1);
    pub const HI: u8 = syl(5, 2);
    pub const HU: u8 = syl(5, 3);
    pub const HE: u8 = syl(5, 4);
    pub const HO: u8 = syl(5, 5);
    pub const HY: u8 = syl(5, 6);

    pub const M: u8 = syl(6, 0);
    pub const MA: u8 = syl(6, 1);
    pub const MI: u8 = syl(6, 2);
    pub const MU: u8 = syl(6, 3);
    pub const ME: u8 = syl(6, 4);
    pub const MO: u8 = syl(6, 5);
    pub const MY: u8 = syl(6, 6);

    pub const Y: u8 = syl(7, 0);
    pub const YA: u8 = syl(7, 1);
    pub const YU: u8 = syl(7, 3);
    pub const YO: u8 = syl(7, 5);

    pub const R: u8 = syl(8, 0);
    pub const RA: u8 = syl(8, 1);
    pub const RI: u8 = syl(8, 2);
    pub const RU: u8 = syl(8, 3);
    pub const RE: u8 = syl(8, 4);
    pub const RO: u8 = syl(8, 5);
    pub const RY: u8 = syl(8, 6);

    pub const W: u8 = syl(9, 0);
    pub const WA: u8 = syl(9, 1);
    pub const WO: u8 = syl(9, 5);

    pub const P: u8 = syl(10, 0);
    pub const PA: u8 = syl(10, 1);
    pub const PI: u8 = syl(10, 2);
    pub const PU: u8 = syl(10, 3);
    pub const PE: u8 = syl(10, 4);
    pub const PO: u8 = syl(10, 5);
    pub const PY: u8 = syl(10, 6);

    pub const G: u8 = syl(11, 0);
    pub const GA: u8 = syl(11, 1);
    pub const GI: u8 = syl(11, 2);
    pub const GU: u8 = syl(11, 3);
    pub const GE: u8 = syl(11, 4);
    pub const GO: u8 = syl(11, 5);
    pub const GY: u8 = syl(11, 6);

    pub const Z: u8 = syl(12, 0);
    pub const ZA: u8 = syl(12, 1);
    pub const ZI: u8 = syl(12, 2);
    pub const ZU: u8 = syl(12, 3);
    pub const ZE: u8 = syl(12, 4);
    pub const ZO: u8 = syl(12, 5);
    pub const ZY: u8 = syl(12, 6);

    pub const D: u8 = syl(13, 0);
    pub const DA: u8 = syl(13, 1);
    pub const DI: u8 = syl(13, 2);
    pub const DU: u8 = syl(13, 3);
    pub const DE: u8 = syl(13, 4);
    pub const DO: u8 = syl(13, 5);
    pub const DY: u8 = syl(13, 6);

    pub const B: u8 = syl(14, 0);
    pub const BA: u8 = syl(14, 1);
    pub const BI: u8 = syl(14, 2);
    pub const BU: u8 = syl(14, 3);
    pub const BE: u8 = syl(14, 4);
    pub const BO: u8 = syl(14, 5);
    pub const BY: u8 = syl(14, 6);

    pub const X: u8 = syl(15, 0);
    pub const XA: u8 = syl(15, 1);
    pub const XI: u8 = syl(15, 2);
    pub const XU: u8 = syl(15, 3);
    pub const XE: u8 = syl(15, 4);
    pub const XO: u8 = syl(15, 5);

    pub const XKA: u8 = syl(16, 1);
    pub const XKE: u8 = syl(16, 4);
    pub const XTU: u8 = syl(17, 3);
    pub const XYA: u8 = syl(18, 1);
    pub const XYU: u8 = syl(18, 3);
    pub const XYO: u8 = syl(18, 5);
    pub const XWA: u8 = syl(19, 1);
    pub const WYI: u8 = syl(20, 2);
    pub const WYE: u8 = syl(20, 4);
    pub const VU: u8 = syl(21, 3);
    pub const V: u8 = syl(21, 0);
    pub const L: u8 = syl(22, 0);

    // M-type multi-sound block.
    pub const MTYPE_FIRST: u8 = 161;
    pub const ANN: u8 = 161;
    pub const AKU: u8 = 162;
    pub const ATU: u8 = 163;
    pub const AI: u8 = 164;
    pub const INN: u8 = 165;
    pub const IKU: u8 = 166;
    pub const ITU: u8 = 167;
    pub const UNN: u8 = 168;
    pub const UKU: u8 = 169;
    pub const UTU: u8 = 170;
    pub const ENN: u8 = 171;
    pub const EKI: u8 = 172;
    pub const ETU: u8 = 173;
    pub const EI: u8 = 174;
    pub const ONN: u8 = 175;
    pub const OKU: u8 = 176;
    pub const OTU: u8 = 177;
    pub const OU: u8 = 178;
    pub const C: u8 = 179;
    pub const F: u8 = 180;
    pub const J: u8 = 181;
    pub const Q: u8 = 182;
    pub const MTYPE_LAST: u8 = Q;

    // Common punctuation and diacritics.
    pub const COMMON_FIRST: u8 = 183;
    pub const NN: u8 = 183;
    pub const CHOUON: u8 = 184;
    pub const DAKUTEN: u8 = 185;
    pub const HANDAKU: u8 = 186;
    pub const QUESTION: u8 = 187;
    pub const TOUTEN: u8 = 188;
    pub const KUTEN: u8 = 189;
    pub const LAB: u8 = 190;
    pub const RAB: u8 = 191;

    // JIS-kana direct positions, used by the Stickney scheme. Holding one
    // of these repeats like a plain key, unlike the syllable codes.
    pub const KANA_DAKUTEN: u8 = 192;
    pub const KANA_HANDAKU: u8 = 193;
    pub const KANA_LCB: u8 = 194;
    pub const KANA_RCB: u8 = 195;
    pub const KANA_KE: u8 = 196;
    pub const KANA_HE: u8 = 197;
    pub const KANA_HO: u8 = 198;
    pub const KANA_NU: u8 = 199;
    pub const KANA_ME: u8 = 200;
    pub const KANA_MU: u8 = 201;
    pub const KANA_WO: u8 = 202;
    pub const KANA_RO: u8 = 203;
    pub const KANA_TOUTEN: u8 = 204;
    pub const KANA_KUTEN: u8 = 205;
    pub const KANA_NAKAGURO: u8 = 206;
    pub const KANA_SE: u8 = 207;
    pub const KANA_SO: u8 = 208;
    pub const KANA_CHOUON: u8 = 209;

    pub const BANG: u8 = 210;
    pub const COMMON_LAST: u8 = BANG;

    // IME-dependent bracket/symbol block.
    pub const IME_FIRST: u8 = 211;
    pub const LCB: u8 = 211;
    pub const RCB: u8 = 212;
    pub const LWCB: u8 = 213;
    pub const RWCB: u8 = 214;
    pub const LSB: u8 = 215;
    pub const RSB: u8 = 216;
    pub const NAKAGURO: u8 = 217;
    pub const SLASH: u8 = 218;
    pub const SANTEN: u8 = 219;
    pub const COMMA: u8 = 220;
    pub const PERIOD: u8 = 221;
    pub const NAMI: u8 = 222;
    pub const IME_LAST: u8 = NAMI;
}

/// Whether a syllable code is repeat-suppressed while its key stays held.
/// The JIS-kana direct positions repeat like plain keys; everything else is
/// a composed syllable and must not auto-repeat.
pub fn is_no_repeat(code: u8) -> bool {
    code != 0 && !(roma::KANA_DAKUTEN..=roma::KANA_CHOUON).contains(&code)
}

/// Consonant spellings for the gojūon block, indexed by `code / 7`.
#[rustfmt::skip]
static CONSONANTS: [[KeyCode; 2]; 23] = [
    [No, No], [K, No], [S, No], [T, No], [N, No], [H, No], [M, No], [Y, No],
    [R, No], [W, No], [P, No], [G, No], [Z, No], [D, No], [B, No], [X, No],
    [X, K], [X, T], [X, Y], [X, W], [W, Y], [V, No], [L, No],
];

/// Vowel spellings, indexed by `code % 7`.
static VOWELS: [KeyCode; 7] = [No, A, I, U, E, O, Y];

/// M-type block spellings.
#[rustfmt::skip]
static MTYPE_SET: [[KeyCode; 3]; 22] = [
    [A, N, N], [A, K, U], [A, T, U], [A, I, No],
    [I, N, N], [I, K, U], [I, T, U],
    [U, N, N], [U, K, U], [U, T, U],
    [E, N, N], [E, K, I], [E, T, U], [E, I, No],
    [O, N, N], [O, K, U], [O, T, U], [O, U, No],
    [C, No, No], [F, No, No], [J, No, No], [Q, No, No],
];

/// Common block spellings, including the JIS-kana direct positions.
#[rustfmt::skip]
static COMMON_SET: [[KeyCode; 2]; 28] = [
    [N, N],                         // NN
    [Minus, No],                    // CHOUON
    [Dakuten, No],                  // DAKUTEN
    [Handaku, No],                  // HANDAKU
    [LShift, Slash],                // QUESTION
    [Comma, No],                    // TOUTEN
    [Dot, No],                      // KUTEN
    [LShift, Comma],                // LAB
    [LShift, Dot],                  // RAB
    [LeftBracket, No],              // KANA_DAKUTEN
    [RightBracket, No],             // KANA_HANDAKU
    [LShift, RightBracket],         // KANA_LCB
    [LShift, NonusHash],            // KANA_RCB
    [Quote, No],                    // KANA_KE
    [Equal, No],                    // KANA_HE
    [Minus, No],                    // KANA_HO
    [Kc1, No],                      // KANA_NU
    [Slash, No],                    // KANA_ME
    [NonusHash, No],                // KANA_MU
    [LShift, Kc0],                  // KANA_WO
    [International1, No],           // KANA_RO
    [LShift, Comma],                // KANA_TOUTEN
    [LShift, Dot],                  // KANA_KUTEN
    [LShift, Slash],                // KANA_NAKAGURO
    [P, No],                        // KANA_SE
    [C, No],                        // KANA_SO
    [International3, No],           // KANA_CHOUON
    [LShift, Kc1],                  // BANG
];

// IME bracket sets: how each IME spells 「」『』【】・/…、。〜 in romaji
// input mode.
#[rustfmt::skip]
static MS_SET: [[KeyCode; 3]; 12] = [
    [LeftBracket, No, No], [RightBracket, No, No],
    [LeftBracket, No, No], [RightBracket, No, No],
    [LeftBracket, No, No], [RightBracket, No, No],
    [Slash, No, No], [Slash, No, No], [Slash, Slash, Slash],
    [Comma, No, No], [Dot, No, No], [LShift, Grave, No],
];

#[rustfmt::skip]
static GOOGLE_SET: [[KeyCode; 3]; 12] = [
    [LeftBracket, No, No], [RightBracket, No, No],
    [Z, LeftBracket, No], [Z, RightBracket, No],
    [LeftBracket, No, No], [RightBracket, No, No],
    [Z, Slash, No], [Slash, No, No], [Z, Dot, No],
    [Comma, No, No], [Dot, No, No], [LShift, Grave, No],
];

#[rustfmt::skip]
static ATOK_SET: [[KeyCode; 3]; 12] = [
    [LeftBracket, No, No], [RightBracket, No, No],
    [LeftBracket, No, No], [RightBracket, No, No],
    [LeftBracket, No, No], [RightBracket, No, No],
    [Slash, No, No], [Slash, No, No], [Slash, Slash, Slash],
    [Comma, No, No], [Dot, No, No], [LShift, Grave, No],
];

#[rustfmt::skip]
static APPLE_SET: [[KeyCode; 3]; 12] = [
    [LeftBracket, No, No], [RightBracket, No, No],
    [LShift, LeftBracket, No], [LShift, RightBracket, No],
    [LAlt, LShift, Kc9], [LAlt, LShift, Kc0],
    [Slash, No, No], [Slash, No, No], [Slash, Slash, Slash],
    [Comma, No, No], [Dot, No, No], [LShift, Grave, No],
];

/// Spells a syllable code out as up to three key strokes.
///
/// `jp_base` rewrites the IME block for the JIS physical layout, where the
/// shifted digit and bracket usages sit on different keys.
pub fn decompose(code: u8, ime: ImeMode, jp_base: bool) -> [KeyCode; 3] {
    let mut out = [No; 3];
    if code < roma::MTYPE_FIRST {
        let consonant = CONSONANTS[(code / 7) as usize];
        let mut i = 0;
        for &c in consonant.iter() {
            if c == No {
                break;
            }
            out[i] = c;
            i += 1;
        }
        out[i] = VOWELS[(code % 7) as usize];
        return out;
    }
    if (roma::MTYPE_FIRST..=roma::MTYPE_LAST).contains(&code) {
        return MTYPE_SET[(code - roma::MTYPE_FIRST) as usize];
    }
    if (roma::COMMON_FIRST..=roma::COMMON_LAST).contains(&code) {
        let chord = COMMON_SET[(code - roma::COMMON_FIRST) as usize];
        return [chord[0], chord[1], No];
    }
    if (roma::IME_FIRST..=roma::IME_LAST).contains(&code) {
        let set = match ime {
            ImeMode::Google => &GOOGLE_SET,
            ImeMode::Apple => &APPLE_SET,
            ImeMode::Atok => &ATOK_SET,
            ImeMode::Ms => &MS_SET,
        };
        let chord = set[(code - roma::IME_FIRST) as usize];
        if jp_base {
            return chord.map(|key| match key {
                LeftBracket => RightBracket,
                RightBracket => NonusHash,
                Grave => Equal,
                Kc9 => Kc8,
                Kc0 => Kc9,
                other => other,
            });
        }
        return chord;
    }
    out
}

/// The table triple for a kana scheme. Schemes with a single shift plane
/// use it for both shift sides.
pub fn scheme_tables(scheme: crate::settings::KanaScheme) -> Option<KanaTables> {
    use crate::settings::KanaScheme;
    match scheme {
        KanaScheme::Romaji => None,
        KanaScheme::Nicola => Some(KanaTables {
            base: &nicola::BASE,
            left: &nicola::LEFT,
            right: &nicola::RIGHT,
        }),
        KanaScheme::MType => Some(KanaTables {
            base: &mtype::BASE,
            left: &mtype::SHIFT,
            right: &mtype::SHIFT,
        }),
        KanaScheme::Tron => Some(KanaTables {
            base: &tron::BASE,
            left: &tron::LEFT,
            right: &tron::RIGHT,
        }),
        KanaScheme::Stickney => Some(KanaTables {
            base: &stickney::BASE,
            left: &stickney::SHIFT,
            right: &stickney::SHIFT,
        }),
        KanaScheme::X6004 => Some(KanaTables {
            base: &x6004::BASE,
            left: &x6004::SHIFT,
            right: &x6004::SHIFT,
        }),
    }
}

#[cfg(test)]
mod test {
    use super::{decompose, is_no_repeat, roma};
    use crate::settings::ImeMode;
    use kaede_types::keycode::KeyCode::*;

    #[test]
    fn gojuon_decomposition() {
        assert_eq!(decompose(roma::KA, ImeMode::Ms, false), [K, A, No]);
        assert_eq!(decompose(roma::XTU, ImeMode::Ms, false), [X, T, U]);
        assert_eq!(decompose(roma::A, ImeMode::Ms, false), [A, No, No]);
        assert_eq!(decompose(roma::K, ImeMode::Ms, false), [K, No, No]);
    }

    #[test]
    fn ime_sets_differ_on_wide_brackets() {
        assert_eq!(decompose(roma::LWCB, ImeMode::Ms, false)[0], LeftBracket);
        assert_eq!(decompose(roma::LWCB, ImeMode::Google, false), [Z, LeftBracket, No]);
        assert_eq!(decompose(roma::LWCB, ImeMode::Apple, false), [LShift, LeftBracket, No]);
    }

    #[test]
    fn jis_base_rewrites_bracket_usages() {
        assert_eq!(decompose(roma::LCB, ImeMode::Ms, true), [RightBracket, No, No]);
        assert_eq!(decompose(roma::NAMI, ImeMode::Ms, true), [LShift, Equal, No]);
    }

    #[test]
    fn direct_positions_repeat() {
        assert!(!is_no_repeat(roma::KANA_HO));
        assert!(!is_no_repeat(0));
        assert!(is_no_repeat(roma::KA));
        assert!(is_no_repeat(roma::DAKUTEN));
    }
}
