mod common;

use common::{valid_frame, ScriptedSpi};
use embassy_futures::block_on;
use kaede::hoslink::{led_phase, BleState, FrameType, HosError, HostLink, CMD_GET_STATUS};

#[test]
fn not_ready_coprocessor_gets_exactly_five_exchanges() {
    let spi = ScriptedSpi::constant(0xFF);
    let counter = spi.clone();
    let mut link = HostLink::new(spi);
    let result = block_on(link.report(FrameType::Default, CMD_GET_STATUS, &[]));
    assert_eq!(result, Err(HosError::NotReady));
    assert_eq!(counter.exchanges(), 5);
}

#[test]
fn ignored_transaction_default_character_also_retries_out() {
    let spi = ScriptedSpi::constant(0xAA);
    let counter = spi.clone();
    let mut link = HostLink::new(spi);
    assert_eq!(
        block_on(link.report(FrameType::Default, CMD_GET_STATUS, &[])),
        Err(HosError::NotReady)
    );
    assert_eq!(counter.exchanges(), 5);
}

#[test]
fn bad_profile_nibble_retries_until_a_valid_frame() {
    // First response fails the nibble self-check, second is good.
    let bad = vec![0x11u8; 16];
    let good = valid_frame(1, 0x02, 0, 7, 1, [2, 0, 3, 1]);
    let spi = ScriptedSpi::with_frames(vec![bad, good.clone()], good);
    let counter = spi.clone();
    let mut link = HostLink::new(spi);
    assert_eq!(block_on(link.get_status(FrameType::Info)), Ok(()));
    assert_eq!(counter.exchanges(), 2);

    assert_eq!(link.profile(), 1);
    assert!(link.led().caps_lock());
    assert_eq!(link.indication(), BleState::Connected);
    assert_eq!(link.revision(), 0x0200);
    assert_eq!(link.version(), 0x0301);
}

#[test]
fn failure_leaves_cached_status_untouched() {
    let good = valid_frame(2, 0x01, 0, 7, 0, [0; 4]);
    let spi = ScriptedSpi::with_frames(vec![good], vec![0xFFu8; 16]);
    let mut link = HostLink::new(spi);
    assert_eq!(block_on(link.get_status(FrameType::Default)), Ok(()));
    assert_eq!(link.profile(), 2);

    // The module stops answering: the call fails, the cache stays.
    assert_eq!(
        block_on(link.get_status(FrameType::Default)),
        Err(HosError::NotReady)
    );
    assert_eq!(link.profile(), 2);
    assert!(link.led().num_lock());
}

#[test]
fn battery_level_filter_converges_smoothly() {
    // Raw code 90 -> 2.70 V -> 95 %; the first sample jump-loads the
    // filter, later samples move by a quarter of the difference.
    let frames = vec![
        valid_frame(1, 0, 90, 7, 0, [0; 4]),
        valid_frame(1, 0, 0, 7, 0, [0; 4]), // battery level report ack
        valid_frame(1, 0, 94, 7, 0, [0; 4]),
    ];
    let fallback = valid_frame(1, 0, 94, 7, 0, [0; 4]);
    let spi = ScriptedSpi::with_frames(frames, fallback);
    let mut link = HostLink::new(spi);

    block_on(async {
        link.get_status(FrameType::Default).await.unwrap();
        link.update_battery(0).await.unwrap();
        assert_eq!(link.battery_voltage(), 270);
        assert_eq!(link.battery_level(), 95);

        link.get_status(FrameType::Default).await.unwrap();
        link.update_battery(0).await.unwrap();
        // 270 - 270/4 + 274/4, integer arithmetic.
        assert_eq!(link.battery_voltage(), 271);
    });
}

#[test]
fn battery_level_clamps_at_both_ends() {
    let spi = ScriptedSpi::constant(0xFF);
    let mut link = HostLink::new(spi);
    // Fresh link: 0 V reads as empty.
    assert_eq!(link.battery_level(), 0);
}

#[test]
fn advertising_blink_patterns() {
    // Fast advertising: 200 ms on, 800 ms off.
    assert_eq!(led_phase(BleState::Advertising, 100), Some(true));
    assert_eq!(led_phase(BleState::Advertising, 500), Some(false));
    assert_eq!(led_phase(BleState::Advertising, 1100), Some(true));
    // Bonding: even 100 ms duty.
    assert_eq!(led_phase(BleState::Bonding, 50), Some(true));
    assert_eq!(led_phase(BleState::Bonding, 150), Some(false));
    // Connected is steady, idle is dark.
    assert_eq!(led_phase(BleState::Connected, 0), None);
    assert_eq!(led_phase(BleState::Idle, 123), Some(false));
}

#[test]
fn trackpad_tail_is_captured_from_tsap_frames() {
    let good = valid_frame(1, 0, 0, 7, 2, [200, 100, 0x23, 0x01]);
    let spi = ScriptedSpi::with_frames(vec![good.clone()], good);
    let mut link = HostLink::new(spi);
    block_on(link.get_status(FrameType::Tsap)).unwrap();
    assert_eq!(link.trackpad_x(), 200);
    assert_eq!(link.trackpad_y(), 100);
    assert_eq!(link.touch(), 0x0123);
}
