//! Trackpad filter: turns raw touch samples into relative mouse motion.
//!
//! Samples arrive either as a 4-byte serial stream from the pad controller
//! or pre-unpacked from the host link's status tail. The filter applies a
//! dead zone with a squared acceleration curve above it, and an adaptive
//! touch threshold re-armed from a low-passed baseline. While the pad is
//! touched, held matrix keys act as mouse buttons and wheel.

use core::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use kaede_types::report::MouseReport;

use crate::layout::pos;
use crate::settings::{SettingKey, Settings};

/// Dead-zone radius per play level; level is the persisted setting.
static PLAY_TABLE: [u8; 4] = [64, 56, 48, 40];
pub const PLAY_MAX: u8 = 4;

/// Motion below this is always ignored.
const PLAY_FLOOR: u16 = 24;

/// Mouse-key chord positions.
const CODE_F9: u8 = 8;
const CODE_F10: u8 = 9;
const CODE_F11: u8 = 10;
const CODE_F12: u8 = pos(1, 10);
const CODE_U: u8 = pos(4, 8);
const CODE_I: u8 = pos(4, 9);
const CODE_O: u8 = pos(4, 10);
const CODE_D: u8 = pos(5, 2);
const CODE_J: u8 = pos(5, 8);
const CODE_K: u8 = pos(5, 9);
const CODE_L: u8 = pos(5, 10);
const CODE_Z: u8 = pos(6, 0);
const CODE_X: u8 = pos(6, 1);
const CODE_C: u8 = pos(6, 2);
const CODE_V: u8 = pos(6, 3);
const CODE_B: u8 = pos(6, 4);
const CODE_COMMA: u8 = pos(6, 9);

/// Pad touch state, read by the scan loop to route keys onto the
/// mouse-key layer.
static TOUCHED: AtomicBool = AtomicBool::new(false);
/// Mouse-key chord outputs.
static BUTTONS: AtomicU8 = AtomicU8::new(0);
static WHEEL: AtomicU8 = AtomicU8::new(0);
/// Active play level, shared between the chord handler and the filter.
static PLAY: AtomicU8 = AtomicU8::new(0);

pub fn is_touched() -> bool {
    TOUCHED.load(Ordering::Relaxed)
}

pub fn set_play(level: u8) {
    let level = if level >= PLAY_MAX { 0 } else { level };
    PLAY.store(level, Ordering::Relaxed);
}

/// Applies a mouse-key chord: buttons, wheel, and the play-level keys.
/// Button state is replaced atomically each cycle, so releases need no
/// separate handling.
pub fn process_mouse_keys(chord: &[u8; 6]) {
    let mut buttons = 0u8;
    let mut wheel = 0i8;
    for &code in chord.iter() {
        match code {
            CODE_F9 => persist_play(3),
            CODE_F10 => persist_play(2),
            CODE_F11 => persist_play(1),
            CODE_F12 => persist_play(0),
            CODE_J | CODE_V => buttons |= 0x01,
            CODE_L | CODE_X => buttons |= 0x02,
            CODE_COMMA => buttons |= 0x04,
            CODE_U | CODE_Z => buttons |= 0x08,
            CODE_O | CODE_B => buttons |= 0x10,
            CODE_I | CODE_D => wheel = 1,
            CODE_K | CODE_C => wheel = -1,
            _ => {}
        }
    }
    BUTTONS.store(buttons, Ordering::Relaxed);
    WHEEL.store(wheel as u8, Ordering::Relaxed);
}

fn persist_play(level: u8) {
    if PLAY.load(Ordering::Relaxed) != level {
        set_play(level);
        Settings::persist(SettingKey::TrackpadPlay, level);
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct RawSample {
    count: u8,
    x: u8,
    y: u8,
    touch: u16,
}

#[derive(Clone, Copy, Debug, Default)]
struct TouchSensor {
    current: u16,
    thresh: u16,
    low: u16,
}

#[derive(Default)]
pub struct Trackpad {
    raw: RawSample,
    sensor: TouchSensor,
    x: i8,
    y: i8,
    tick: u8,
}

/// 3/4 old + 1/4 new.
fn low_pass(prev: u16, raw: u16) -> u16 {
    prev - (prev >> 2) + (raw >> 2)
}

impl Trackpad {
    pub fn new(play: u8) -> Self {
        set_play(play);
        Self::default()
    }

    /// Dead zone and acceleration: inside the play radius motion trickles
    /// out slowly (cubic, time-diluted); outside it grows cubically and
    /// saturates.
    fn trim(&self, raw: u8) -> i8 {
        let play = PLAY_TABLE[PLAY.load(Ordering::Relaxed) as usize % PLAY_TABLE.len()] as u16;
        let (sign, value) = if raw >= 128 {
            (1i16, raw as u16 - 128)
        } else {
            (-1i16, 128 - raw as u16)
        };
        if value < play / 2 || value < PLAY_FLOOR {
            return 0;
        }
        if value < play {
            let v = value * value / play * value / play * 10 / play;
            let v = if self.tick as u16 <= v { 1 } else { 0 };
            (sign * v as i16) as i8
        } else {
            let v = (value * value / (play * play)) * value / play;
            if v >= 128 {
                return if sign > 0 { 127 } else { -127 };
            }
            (sign * v as i16) as i8
        }
    }

    fn process_sample(&mut self) {
        self.x = self.trim(self.raw.x);
        self.y = self.trim(self.raw.y);

        self.sensor.current = low_pass(self.sensor.current, self.raw.touch);
        if self.sensor.current < self.sensor.low {
            self.sensor.low = self.sensor.current;
        }
        // Re-arm the threshold once the signal rises clear of the baseline.
        if self.sensor.low * 7 / 6 < self.sensor.current {
            self.sensor.thresh = (self.sensor.low + self.sensor.current) / 2;
            self.sensor.low = self.sensor.current;
        }
        TOUCHED.store(self.sensor.current < self.sensor.thresh, Ordering::Relaxed);

        self.tick += 1;
        if self.tick > 10 {
            self.tick = 0;
        }
    }

    /// Serial protocol unpacker. Frame of four 7-bit payload bytes, the
    /// first flagged by the top bit:
    ///
    /// ```text
    /// 1  tB tA t9 t8 t7 y7 x7
    /// 0  t6 t5 t4 t3 t2 t1 t0
    /// 0  x6 x5 x4 x3 x2 x1 x0
    /// 0  y6 y5 y4 y3 y2 y1 y0
    /// ```
    ///
    /// Returns `true` when a full frame was assembled and filtered.
    pub fn push_serial_byte(&mut self, data: u8) -> bool {
        if data & 0x80 != 0 {
            self.raw.count = 1;
        }
        match self.raw.count {
            1 => {
                self.raw.touch = ((data & 0x7c) as u16) << 5;
                self.raw.y = (data & 0x02) << 6;
                self.raw.x = (data & 0x01) << 7;
                self.raw.count += 1;
                false
            }
            2 => {
                self.raw.touch |= data as u16;
                self.raw.count += 1;
                false
            }
            3 => {
                self.raw.x |= data;
                self.raw.count += 1;
                false
            }
            4 => {
                self.raw.y |= data;
                self.raw.count = 0;
                self.process_sample();
                true
            }
            _ => false,
        }
    }

    /// Pre-unpacked sample from the host-link status tail.
    pub fn push_sample(&mut self, x: u8, y: u8, touch: u16) {
        self.raw.x = x;
        self.raw.y = y;
        self.raw.touch = touch;
        self.process_sample();
    }

    /// The mouse report for the current filter state; `None` when idle.
    pub fn report(&self) -> Option<MouseReport> {
        let touched = is_touched();
        let buttons = if touched { BUTTONS.load(Ordering::Relaxed) } else { 0 };
        let wheel = if touched { WHEEL.load(Ordering::Relaxed) as i8 } else { 0 };
        if self.x == 0 && self.y == 0 && buttons == 0 && wheel == 0 {
            return None;
        }
        Some(MouseReport {
            buttons,
            x: self.x,
            y: self.y,
            wheel,
        })
    }
}

/// Shared filter instance fed by the host-link poll loop.
static HOST_PAD: embassy_sync::blocking_mutex::Mutex<crate::RawMutex, core::cell::RefCell<Option<Trackpad>>> =
    embassy_sync::blocking_mutex::Mutex::new(core::cell::RefCell::new(None));

/// Routes a host-link trackpad sample through the shared filter and
/// returns the resulting motion, if any.
pub(crate) fn feed_from_host(x: u8, y: u8, touch: u16) -> Option<MouseReport> {
    HOST_PAD.lock(|pad| {
        let mut pad = pad.borrow_mut();
        let pad = pad.get_or_insert_with(Trackpad::default);
        pad.push_sample(x, y, touch);
        pad.report()
    })
}
