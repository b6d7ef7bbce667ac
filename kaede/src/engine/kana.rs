//! Kana composition.
//!
//! Resolves held positions against the active scheme's shift-plane tables,
//! spells the syllables out as romaji strokes, corrects the previous
//! syllable when a dakuten/handaku mark follows it, and suppresses
//! auto-repeat across multi-stroke syllables.

use kaede_types::keycode::KeyCode;
use kaede_types::modifier::HidModifiers;
use kaede_types::report::KeyboardReport;

use crate::layout::kana::{decompose, is_no_repeat, scheme_tables, KanaTables};
use crate::layout::{col_of, is_digit_position, row_of};
use crate::VOID_POSITION;

use super::{Engine, KeySet, Transmit};

/// Voiceable consonants and their dakuten replacements: K→G, S→Z, T→D, H→B.
static DAKUON_FROM: [u8; 4] = [
    KeyCode::K as u8,
    KeyCode::S as u8,
    KeyCode::T as u8,
    KeyCode::H as u8,
];
static DAKUON_TO: [u8; 4] = [
    KeyCode::G as u8,
    KeyCode::Z as u8,
    KeyCode::D as u8,
    KeyCode::B as u8,
];

/// Cross-call kana state.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct KanaState {
    /// Strokes of the most recently fully transmitted syllable; a fresh
    /// press resolving to an overlapping sequence is a break.
    pub sent: [u8; 3],
    /// Strokes of the last emitted syllable, the dakuten correction target.
    pub last: [u8; 3],
    /// Modifier state when `last` was emitted; drives the de-shift rule.
    pub last_mod: HidModifiers,
}

impl Engine {
    /// Kana-mode entry point: dispatches on the active scheme.
    pub(crate) fn process_keys_kana(&mut self, current: &KeySet, report: &mut KeyboardReport) -> Transmit {
        match scheme_tables(self.settings.kana) {
            Some(tables) => self.process_kana(current, report, &tables),
            None => self.process_keys_base(current, report),
        }
    }

    fn process_kana(&mut self, current: &KeySet, report: &mut KeyboardReport, tables: &KanaTables) -> Transmit {
        let jp_base = self.settings.base.is_japanese();
        let mut plane_mod = current.modifiers;
        let mut modifiers = current.modifiers & !HidModifiers::SHIFT;
        let mut xmit = Transmit::Normal;
        let mut count = 0usize;

        for i in 0..current.positions.len() {
            if count >= report.keycodes.len() {
                break;
            }
            let mut code = current.positions[i];

            let key = self.key_numlock(code);
            if key != KeyCode::No {
                report.keycodes[count] = self.report_byte(key);
                count += 1;
                self.kana.last = [0; 3];
                self.kana.last_mod = current.modifiers;
                modifiers = current.modifiers;
                continue;
            }

            // Both shifts down: drop whichever side was already latched by
            // the previous stroke, so shift-chord rollover does not apply
            // the plane twice.
            if plane_mod.contains(HidModifiers::SHIFT) {
                if self.kana.last_mod.left_shift() {
                    plane_mod &= !HidModifiers::LEFT_SHIFT;
                } else if self.processed_modifiers().right_shift() {
                    plane_mod &= !HidModifiers::RIGHT_SHIFT;
                }
            }

            let row = row_of(code);
            let mut roma = if row >= 7 {
                0
            } else if !jp_base && is_digit_position(code) {
                // Digits type literally outside a Japanese base layout.
                0
            } else if plane_mod.left_shift() {
                tables.left[row][col_of(code)]
            } else if plane_mod.right_shift() {
                tables.right[row][col_of(code)]
            } else {
                tables.base[row][col_of(code)]
            };

            let mut no_repeat = false;
            if is_no_repeat(roma) {
                no_repeat = true;
                if self.processed_positions().contains(&code) {
                    code = VOID_POSITION;
                    roma = 0;
                }
            }

            let strokes = if roma != 0 {
                decompose(roma, self.settings.ime, jp_base)
            } else {
                [KeyCode::No; 3]
            };

            if roma == 0 || strokes[0] == KeyCode::No {
                // Unmapped position: fall back to the plain base layout so
                // punctuation typed alongside kana still works.
                let key = self.key_at_base(code);
                if key != KeyCode::No {
                    let make = !self.processed_positions().contains(&code);
                    let key = self.toggle_kana_mode(key, current.modifiers, make);
                    report.keycodes[count] = self.report_byte(key);
                    count += 1;
                    self.kana.last = [0; 3];
                    self.kana.last_mod = current.modifiers;
                    modifiers = current.modifiers;
                }
                continue;
            }

            if no_repeat {
                // A fresh press whose strokes overlap the sequence just
                // sent marks the release boundary of a multi-stroke
                // syllable; abort instead of emitting a malformed partial.
                for &sent in self.kana.sent.iter() {
                    if sent == 0 {
                        break;
                    }
                    for &stroke in strokes.iter() {
                        if stroke == KeyCode::No {
                            break;
                        }
                        if sent == stroke as u8 {
                            self.kana.sent = [0; 3];
                            return Transmit::Break;
                        }
                    }
                }
            }

            xmit = Transmit::InOrder;
            let mut emitted = strokes.map(|k| k as u8);
            for &stroke in strokes.iter() {
                if stroke == KeyCode::No || count >= report.keycodes.len() {
                    break;
                }
                match stroke {
                    KeyCode::Dakuten => {
                        if self.kana.last[0] != 0 {
                            if let Some(idx) = DAKUON_FROM.iter().position(|&c| c == self.kana.last[0]) {
                                if count + 3 <= report.keycodes.len() {
                                    report.keycodes[count] = KeyCode::Backspace as u8;
                                    report.keycodes[count + 1] = DAKUON_TO[idx];
                                    report.keycodes[count + 2] = self.kana.last[1];
                                    count += 3;
                                    // The corrected syllable is now what a
                                    // following mark would voice.
                                    emitted = [DAKUON_TO[idx], self.kana.last[1], 0];
                                }
                            }
                        }
                    }
                    KeyCode::Handaku => {
                        if self.kana.last[0] == KeyCode::H as u8 && count + 3 <= report.keycodes.len() {
                            report.keycodes[count] = KeyCode::Backspace as u8;
                            report.keycodes[count + 1] = KeyCode::P as u8;
                            report.keycodes[count + 2] = self.kana.last[1];
                            count += 3;
                            emitted = [KeyCode::P as u8, self.kana.last[1], 0];
                        }
                    }
                    KeyCode::LShift => modifiers |= HidModifiers::LEFT_SHIFT,
                    KeyCode::RShift => modifiers |= HidModifiers::RIGHT_SHIFT,
                    other => {
                        report.keycodes[count] = other as u8;
                        count += 1;
                    }
                }
            }
            self.kana.last = emitted;
            self.kana.last_mod = current.modifiers;
        }

        if count > 0 {
            self.kana.sent = self.kana.last;
            report.modifier = modifiers;
        } else {
            self.kana.sent = [0; 3];
            report.modifier = current.modifiers;
        }
        xmit
    }

    fn processed_modifiers(&self) -> HidModifiers {
        self.processed.modifiers
    }

    fn processed_positions(&self) -> [u8; 6] {
        self.processed.positions
    }
}
