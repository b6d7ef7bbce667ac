mod common;

use kaede::trackpad::{process_mouse_keys, set_play, Trackpad};
use kaede_types::report::MouseReport;

/// Serial reassembly, the dead-zone curve, resync, and the mouse-key
/// chords share module-level state, so they run as one sequence.
#[test]
fn serial_protocol_and_filter() {
    set_play(0);
    let mut pad = Trackpad::default();

    // Garbage before the sync bit is ignored.
    assert!(!pad.push_serial_byte(0x23));
    assert!(!pad.push_serial_byte(0x48));

    // x=200 (just outside the play radius), y=100 (inside), touch=0x123.
    let frame = [0x89, 0x23, 0x48, 0x64];
    let mut done = false;
    for &byte in &frame {
        done = pad.push_serial_byte(byte);
    }
    assert!(done);

    // Slow creep past the dead zone on x, nothing on y.
    assert_eq!(
        pad.report(),
        Some(MouseReport {
            buttons: 0,
            x: 1,
            y: 0,
            wheel: 0
        })
    );

    // A mid-frame resync restarts the unpacker.
    assert!(!pad.push_serial_byte(0x89));
    assert!(!pad.push_serial_byte(0x23));
    assert!(!pad.push_serial_byte(0x89)); // sync again
    assert!(!pad.push_serial_byte(0x23));
    assert!(!pad.push_serial_byte(0x48));
    assert!(pad.push_serial_byte(0x64));

    // Centered stick: no motion at all.
    let mut pad = Trackpad::default();
    pad.push_sample(128, 128, 0);
    assert_eq!(pad.report(), None);

    // Full deflection accelerates cubically.
    let mut pad = Trackpad::default();
    pad.push_sample(255, 128, 0);
    let report = pad.report().expect("full deflection");
    assert_eq!(report.x, 5);

    // Mouse-key chords: buttons gate on the touch state, which is off in
    // this sequence, so the report carries motion only.
    process_mouse_keys(&[kaede::layout::pos(5, 8), 14, 14, 14, 14, 14]);
    let report = pad.report().expect("still moving");
    assert_eq!(report.buttons, 0);

    // Play levels widen the dead zone and steepen the curve: the same
    // deflection moves faster on the tightest level.
    let mut pad = Trackpad::default();
    pad.push_sample(198, 128, 0);
    let slow = pad.report().expect("outside dead zone").x;

    set_play(3);
    let mut pad = Trackpad::default();
    pad.push_sample(198, 128, 0);
    let fast = pad.report().expect("outside dead zone").x;
    assert!(fast > slow, "expected acceleration, got {slow} vs {fast}");
    set_play(0);
}
