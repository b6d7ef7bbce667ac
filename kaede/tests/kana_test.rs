mod common;

use common::{engine_with, hold_for, scan_pass, tap, SETTLE_CYCLES};
use kaede::engine::{Engine, Transmit};
use kaede::settings::{BaseLayout, KanaScheme, ModMap, OsMode, Settings};
use kaede_types::keycode::KeyCode::*;

/// An engine in NICOLA kana mode: Japanese modifier map so the right Alt
/// position types Lang1, which the engine tracks as "IME on".
fn kana_engine(scheme: KanaScheme) -> Engine {
    let settings = Settings {
        mod_map: ModMap::Cj,
        kana: scheme,
        os: OsMode::Win109,
        ..Settings::default()
    };
    let mut engine = engine_with(settings);
    tap(&mut engine, &[(7, 6)]); // Lang1: kana on
    assert!(engine.kana_led());
    engine
}

#[test]
fn nicola_base_plane_types_syllable_in_order() {
    let mut engine = kana_engine(KanaScheme::Nicola);
    // (4,1) carries KA on the NICOLA base plane.
    let sent = hold_for(&mut engine, &[(4, 1)], SETTLE_CYCLES);
    assert_eq!(sent.len(), 1);
    let (xmit, report) = sent[0];
    assert_eq!(xmit, Transmit::InOrder);
    assert_eq!(&report.keycodes[..2], &[K as u8, A as u8]);
    assert!(report.modifier.is_empty());
}

#[test]
fn nicola_thumb_shift_planes_select_voiced_rows() {
    let mut engine = kana_engine(KanaScheme::Nicola);
    // Cross shift: the right thumb plane voices (4,1) into GA.
    let (xmit, report) = scan_pass(&mut engine, &[(7, 8), (4, 1)]);
    assert_eq!(xmit, Transmit::InOrder);
    assert_eq!(&report.keycodes[..2], &[G as u8, A as u8]);
    // The shift is consumed by plane selection, not sent to the host.
    assert!(report.modifier.is_empty());

    // Same-side shift picks the left plane instead: (4,1) becomes E.
    let mut engine = kana_engine(KanaScheme::Nicola);
    let (_, report) = scan_pass(&mut engine, &[(7, 3), (4, 1)]);
    assert_eq!(report.keycodes[0], E as u8);
}

#[test]
fn dakuten_corrects_previous_syllable() {
    let mut engine = kana_engine(KanaScheme::Nicola);
    tap(&mut engine, &[(4, 1)]); // KA
    // (0,11) carries the dakuten mark on the base plane.
    let sent = hold_for(&mut engine, &[(0, 11)], SETTLE_CYCLES);
    assert_eq!(sent.len(), 1);
    let (xmit, report) = sent[0];
    assert_eq!(xmit, Transmit::InOrder);
    assert_eq!(&report.keycodes[..3], &[Backspace as u8, G as u8, A as u8]);
    assert_eq!(&report.keycodes[3..], &[0; 3]);
}

#[test]
fn handaku_only_voices_h_row() {
    let mut engine = kana_engine(KanaScheme::Nicola);
    tap(&mut engine, &[(5, 7)]); // HA
    // Handaku sits on the right thumb plane at (0,11).
    let (xmit, report) = scan_pass(&mut engine, &[(7, 8), (0, 11)]);
    assert_eq!(xmit, Transmit::InOrder);
    assert_eq!(&report.keycodes[..3], &[Backspace as u8, P as u8, A as u8]);

    // After a syllable that cannot take handaku, nothing is emitted.
    let mut engine = kana_engine(KanaScheme::Nicola);
    tap(&mut engine, &[(4, 1)]); // KA
    let (_, report) = scan_pass(&mut engine, &[(7, 8), (0, 11)]);
    assert_eq!(report.keycodes, [0; 6]);
}

#[test]
fn held_syllable_key_does_not_repeat_into_next_chord() {
    let mut engine = kana_engine(KanaScheme::Nicola);
    let sent = hold_for(&mut engine, &[(4, 1)], SETTLE_CYCLES);
    assert_eq!(sent.len(), 1);

    // Keep KA held and add TO; only TO may come out.
    let sent = hold_for(&mut engine, &[(4, 1), (5, 8)], SETTLE_CYCLES);
    assert_eq!(sent.len(), 1);
    let (xmit, report) = sent[0];
    assert_eq!(xmit, Transmit::InOrder);
    assert_eq!(&report.keycodes[..2], &[T as u8, O as u8]);
    assert_eq!(&report.keycodes[2..], &[0; 4]);
}

#[test]
fn overlapping_sequence_breaks_instead_of_partial_output() {
    let mut engine = kana_engine(KanaScheme::Nicola);
    let sent = hold_for(&mut engine, &[(4, 1)], SETTLE_CYCLES); // KA
    assert_eq!(sent.len(), 1);

    // KI shares the leading K stroke with the sequence just sent: the
    // first pass breaks (release image), the next one types KI cleanly.
    let sent = hold_for(&mut engine, &[(4, 1), (5, 9)], SETTLE_CYCLES);
    assert_eq!(sent.len(), 2);
    let (xmit, report) = sent[0];
    assert_eq!(xmit, Transmit::Break);
    assert_eq!(report.keycodes, [0; 6]);
    assert!(report.modifier.is_empty());
    let (xmit, report) = sent[1];
    assert_eq!(xmit, Transmit::InOrder);
    assert_eq!(&report.keycodes[..2], &[K as u8, I as u8]);
}

#[test]
fn unmapped_positions_fall_back_to_base_layout() {
    let mut engine = kana_engine(KanaScheme::Nicola);
    // (5,5) is Escape on QWERTY and empty in every NICOLA plane.
    let sent = hold_for(&mut engine, &[(5, 5)], SETTLE_CYCLES);
    assert_eq!(sent.len(), 1);
    let (xmit, report) = sent[0];
    assert_eq!(xmit, Transmit::Normal);
    assert_eq!(report.keycodes[0], Escape as u8);
}

#[test]
fn digits_bypass_kana_planes_on_us_base_layouts() {
    let mut engine = kana_engine(KanaScheme::Nicola);
    // Shift+(3,1): the NICOLA left plane has a symbol here, but on a US
    // base layout the digit must type literally.
    let (_, report) = scan_pass(&mut engine, &[(7, 3), (3, 1)]);
    assert_eq!(report.keycodes[0], Kc2 as u8);
    assert!(report.modifier.left_shift());
}

#[test]
fn digits_use_kana_planes_on_jis_base() {
    let settings = Settings {
        mod_map: ModMap::Cj,
        kana: KanaScheme::Nicola,
        base: BaseLayout::Jis,
        os: OsMode::Win109,
        ..Settings::default()
    };
    let mut engine = engine_with(settings);
    tap(&mut engine, &[(7, 6)]);
    assert!(engine.kana_led());

    let (xmit, report) = scan_pass(&mut engine, &[(7, 3), (3, 1)]);
    assert_eq!(xmit, Transmit::InOrder);
    assert_eq!(report.keycodes[0], Slash as u8);
    assert!(!report.modifier.left_shift());
}

#[test]
fn stickney_maps_to_jis_positions() {
    // Stickney targets a host in kana input mode, JIS base layout.
    let settings = Settings {
        mod_map: ModMap::Cj,
        kana: KanaScheme::Stickney,
        base: BaseLayout::Jis,
        os: OsMode::Win109,
        ..Settings::default()
    };
    let mut engine = engine_with(settings);
    tap(&mut engine, &[(7, 6)]);
    assert!(engine.kana_led());
    // (2,1) carries HO, which lives on the JIS minus key.
    let sent = hold_for(&mut engine, &[(2, 1)], SETTLE_CYCLES);
    assert_eq!(sent.len(), 1);
    let (xmit, report) = sent[0];
    assert_eq!(xmit, Transmit::InOrder);
    assert_eq!(report.keycodes[0], Minus as u8);
    let released = tap(&mut engine, &[]);
    assert!(released.is_empty() || released.iter().all(|(_, r)| r.keycodes == [0; 6]));

    // Shifted (6,8): MU on the JIS non-US-hash key.
    let (_, report) = scan_pass(&mut engine, &[(7, 3), (6, 8)]);
    assert_eq!(report.keycodes[0], NonusHash as u8);
}

#[test]
fn mtype_shift_plane_types_multi_sound_ending() {
    let mut engine = kana_engine(KanaScheme::MType);
    // Base plane (5,3) is the bare vowel A.
    let sent = hold_for(&mut engine, &[(5, 3)], SETTLE_CYCLES);
    assert_eq!(sent[0].1.keycodes[0], A as u8);

    // Shifted it becomes ANN: three strokes, in order.
    let (xmit, report) = scan_pass(&mut engine, &[(7, 3), (5, 3)]);
    assert_eq!(xmit, Transmit::InOrder);
    assert_eq!(&report.keycodes[..3], &[A as u8, N as u8, N as u8]);
}

#[test]
fn kana_mode_suspends_under_host_shortcut_modifiers() {
    let mut engine = kana_engine(KanaScheme::Nicola);
    // Ctrl+(4,1) must be Ctrl+Q, not a kana syllable.
    let sent = hold_for(&mut engine, &[(7, 0), (4, 1)], SETTLE_CYCLES);
    assert_eq!(sent.len(), 1);
    let (xmit, report) = sent[0];
    assert_eq!(xmit, Transmit::Normal);
    assert!(report.modifier.left_ctrl());
    assert_eq!(report.keycodes[0], W as u8);
}

#[test]
fn prefix_shift_latches_onto_the_next_key() {
    use kaede::settings::PrefixShift;
    let settings = Settings {
        mod_map: ModMap::Cj,
        kana: KanaScheme::Nicola,
        os: OsMode::Win109,
        prefix_shift: PrefixShift::On,
        ..Settings::default()
    };
    let mut engine = engine_with(settings);
    tap(&mut engine, &[(7, 6)]);
    assert!(engine.kana_led());

    // Tap left shift alone, then press a kana key: the latched shift
    // selects the left plane, (4,1) types E instead of KA.
    tap(&mut engine, &[(7, 3)]);
    let sent = hold_for(&mut engine, &[(4, 1)], SETTLE_CYCLES);
    let (_, report) = sent.iter().find(|(_, r)| r.keycodes[0] != 0).expect("latched stroke");
    assert_eq!(report.keycodes[0], E as u8);

    // The latch is consumed: the next press is back on the base plane.
    tap(&mut engine, &[]);
    let sent = hold_for(&mut engine, &[(5, 7)], SETTLE_CYCLES);
    let (_, report) = sent.iter().find(|(_, r)| r.keycodes[0] != 0).expect("base stroke");
    assert_eq!(&report.keycodes[..2], &[H as u8, A as u8]);
}

#[test]
fn lang2_turns_kana_mode_off() {
    let mut engine = kana_engine(KanaScheme::Nicola);
    // Left Alt position types Lang2 on Japanese modifier maps.
    tap(&mut engine, &[(7, 5)]);
    assert!(!engine.kana_led());

    // Back to plain typing.
    let sent = hold_for(&mut engine, &[(4, 1)], SETTLE_CYCLES);
    assert_eq!(sent[0].1.keycodes[0], W as u8);
}
