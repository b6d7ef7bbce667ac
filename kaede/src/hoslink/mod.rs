//! Host-link status engine: the SPI control channel to the BLE coprocessor.
//!
//! The keyboard MCU is the master and initiates every exchange. A frame is
//! `[type, command, length, data..]` padded with `CMD_NONE` filler; the
//! response is valid when its profile byte passes the nibble-complement
//! self-check. Invalid or not-ready responses are retried a bounded number
//! of times and then reported as a failure for this call; callers treat
//! that as "state unchanged, poll again later", never as fatal.

use core::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use embassy_futures::select::{select3, Either3};
use embassy_time::Timer;
use embedded_hal_async::spi::SpiDevice;
use kaede_types::led_indicator::LedIndicator;

use crate::channel::{HOST_EVENT_CHANNEL, KEYBOARD_REPORT_CHANNEL};
use crate::engine::HostRequest;
use crate::hid::Report;
use crate::{trackpad, LOCK_LED_STATES};

/// SPI default character: clocked out by the slave for ignored exchanges.
pub const DEF_CHARACTER: u8 = 0xAA;
/// All-ones response: the coprocessor is not ready.
pub const NOT_READY: u8 = 0xFF;

pub const CMD_NONE: u8 = 0x00;
pub const CMD_GET_STATUS: u8 = 0xF1;
pub const CMD_SET_EVENT: u8 = 0xF2;
pub const CMD_BATT_REPORT: u8 = 0xF3;
pub const CMD_MOUSE_REPORT: u8 = 0xF4;
pub const CMD_KEYBOARD_REPORT: u8 = 0xF5;

/// Response frame layout.
const STATE_PROFILE: usize = 0;
const STATE_LED: usize = 1;
const STATE_BATT: usize = 2;
const STATE_INDICATE: usize = 3;
const STATE_TYPE: usize = 4;
const STATE_TAIL: usize = 5;
/// Minimum exchange length: the full status vector plus the typed tail.
const FRAME_SIZE: usize = 9;
const MAX_FRAME: usize = 16;

const RETRY_MAX: usize = 5;
const RETRY_WAIT_US: u64 = 128;

/// Poll period of the status loop.
const POLL_INTERVAL_MS: u64 = 8;
/// Battery level measurement interval, in poll ticks (2 s).
const BATTERY_MEAS_TICKS: u16 = 2000 / POLL_INTERVAL_MS as u16;
/// Poll ticks the coprocessor gets to come up before the link is declared
/// dead (8 s).
const STARTUP_GRACE_TICKS: u16 = 1000;

/// Frame type selecting which tail the response carries.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameType {
    Default = 0,
    Info = 1,
    Tsap = 2,
}

/// Events sent with `CMD_SET_EVENT`.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HosEvent {
    Nothing = 0,
    Default = 1,
    ClearBondingData = 2,
    ClearAlert = 3,
    Disconnect = 4,
    Bond = 8,
    Reset = 9,
    Sleep = 10,
    Wakeup = 11,
    Dfu = 12,
    Key0 = 13,
}

/// BLE connection sub-state reported in the indication byte.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BleState {
    Idle = 0,
    Scanning = 1,
    Advertising = 2,
    AdvertisingWhitelist = 3,
    AdvertisingSlow = 4,
    AdvertisingDirected = 5,
    Bonding = 6,
    Connected = 7,
}

impl BleState {
    pub fn from_indication(byte: u8) -> Self {
        match byte & !(INDICATE_SUSPENDED | INDICATE_LESC) {
            1 => BleState::Scanning,
            2 => BleState::Advertising,
            3 => BleState::AdvertisingWhitelist,
            4 => BleState::AdvertisingSlow,
            5 => BleState::AdvertisingDirected,
            6 => BleState::Bonding,
            7 => BleState::Connected,
            _ => BleState::Idle,
        }
    }
}

const INDICATE_SUSPENDED: u8 = 0x40;
const INDICATE_LESC: u8 = 0x80;

#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HosError {
    /// No valid response within the retry budget.
    NotReady,
    /// SPI bus error.
    Bus,
}

#[derive(Clone, Copy, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
struct Info {
    revision_major: u8,
    revision_minor: u8,
    version_major: u8,
    version_minor: u8,
}

#[derive(Clone, Copy, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
struct Tsap {
    x: u8,
    y: u8,
    touch_lo: u8,
    touch_hi: u8,
}

/// Battery percentage per 0.01 V step from 2.00 V, measured discharge
/// curve of the stock cell pack.
#[rustfmt::skip]
static BATTERY_LEVELS: [u8; 100] = [
//  .00  .01  .02  .03  .04  .05  .06  .07  .08  .09
      0,   0,   0,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0,   0,   0,   1,   1,   1,   1,
      1,   1,   1,   1,   2,   2,   2,   2,   3,   3,
      4,   5,   5,   6,   7,   8,   9,  10,  11,  12,
     14,  15,  17,  18,  21,  24,  28,  33,  40,  47,
     54,  64,  72,  76,  78,  80,  82,  83,  85,  86,
     87,  88,  89,  90,  91,  92,  93,  93,  94,  95,
     95,  96,  96,  97,  97,  98,  98,  99,  99,  99,
    100, 100, 100, 100, 100, 100, 100, 100, 100, 100,
    100, 100, 100, 100, 100, 100, 100, 100, 100, 100,
];

/// Battery voltage offset in 1/100 V added to the raw ADC code.
const BATTERY_VOLTAGE_OFFSET: u16 = 180;

/// Last observed BLE indication byte, for the LED driver.
pub static HOS_INDICATION: AtomicU8 = AtomicU8::new(0);

/// Set when the coprocessor never answered within the startup grace
/// period; an unresponsive coprocessor makes the keyboard useless, so the
/// board-level supervisor should reset the device.
pub static RESET_REQUEST: AtomicBool = AtomicBool::new(false);

pub struct HostLink<S: SpiDevice<u8>> {
    spi: S,
    status: [u8; STATE_TAIL],
    info: Info,
    tsap: Tsap,
    battery_voltage: u16,
    battery_level: u8,
}

impl<S: SpiDevice<u8>> HostLink<S> {
    pub fn new(spi: S) -> Self {
        Self {
            spi,
            status: [0; STATE_TAIL],
            info: Info::default(),
            tsap: Tsap::default(),
            battery_voltage: 0,
            battery_level: 0,
        }
    }

    /// Profile-byte self check: the high nibble must be the complement of
    /// the low nibble.
    fn check_profile(profile: u8) -> bool {
        ((!profile >> 4) & 0x0f) == (profile & 0x0f)
    }

    /// One framed exchange with bounded retry. On success the cached
    /// status vector (and typed tail) is refreshed.
    pub async fn report(&mut self, frame_type: FrameType, command: u8, data: &[u8]) -> Result<(), HosError> {
        let len = data.len().min(MAX_FRAME - 3);
        let total = FRAME_SIZE.max(3 + len.max(1));

        let mut tx = [CMD_NONE; MAX_FRAME];
        tx[0] = frame_type as u8;
        tx[1] = command;
        tx[2] = len as u8;
        tx[3..3 + len].copy_from_slice(&data[..len]);

        for _ in 0..RETRY_MAX {
            let mut rx = [0u8; MAX_FRAME];
            self.spi
                .transfer(&mut rx[..total], &tx[..total])
                .await
                .map_err(|_| HosError::Bus)?;

            if rx[0] == DEF_CHARACTER || rx[0] == NOT_READY || !Self::check_profile(rx[STATE_PROFILE]) {
                Timer::after_micros(RETRY_WAIT_US).await;
                continue;
            }

            self.status.copy_from_slice(&rx[..STATE_TAIL]);
            match self.status[STATE_TYPE] {
                t if t == FrameType::Info as u8 => {
                    self.info = Info {
                        revision_major: rx[STATE_TAIL],
                        revision_minor: rx[STATE_TAIL + 1],
                        version_major: rx[STATE_TAIL + 2],
                        version_minor: rx[STATE_TAIL + 3],
                    };
                }
                t if t == FrameType::Tsap as u8 => {
                    self.tsap = Tsap {
                        x: rx[STATE_TAIL],
                        y: rx[STATE_TAIL + 1],
                        touch_lo: rx[STATE_TAIL + 2],
                        touch_hi: rx[STATE_TAIL + 3],
                    };
                }
                _ => {}
            }
            HOS_INDICATION.store(self.status[STATE_INDICATE], Ordering::Relaxed);
            return Ok(());
        }
        Err(HosError::NotReady)
    }

    pub async fn get_status(&mut self, frame_type: FrameType) -> Result<(), HosError> {
        self.report(frame_type, CMD_GET_STATUS, &[]).await
    }

    pub async fn set_event(&mut self, frame_type: FrameType, event: u8) -> Result<(), HosError> {
        self.report(frame_type, CMD_SET_EVENT, &[event]).await
    }

    /// Puts the module to sleep and clears the cached indication.
    pub async fn sleep(&mut self, frame_type: FrameType) -> Result<(), HosError> {
        self.set_event(frame_type, HosEvent::Sleep as u8).await?;
        self.status[STATE_INDICATE] = BleState::Idle as u8;
        HOS_INDICATION.store(0, Ordering::Relaxed);
        Ok(())
    }

    pub async fn set_battery_level(&mut self, level: u8) -> Result<(), HosError> {
        self.report(FrameType::Default, CMD_BATT_REPORT, &[level]).await
    }

    pub async fn forward_keyboard_report(&mut self, payload: &[u8; 8]) -> Result<(), HosError> {
        self.report(FrameType::Default, CMD_KEYBOARD_REPORT, payload).await
    }

    pub async fn forward_mouse_report(&mut self, payload: &[u8; 4]) -> Result<(), HosError> {
        self.report(FrameType::Default, CMD_MOUSE_REPORT, payload).await
    }

    pub fn led(&self) -> LedIndicator {
        LedIndicator::from_bits(self.status[STATE_LED])
    }

    pub fn profile(&self) -> u8 {
        self.status[STATE_PROFILE] & 0x0f
    }

    pub fn indication(&self) -> BleState {
        BleState::from_indication(self.status[STATE_INDICATE])
    }

    pub fn suspended(&self) -> bool {
        self.status[STATE_INDICATE] & INDICATE_SUSPENDED != 0
    }

    pub fn secure_connection(&self) -> bool {
        self.status[STATE_INDICATE] & INDICATE_LESC != 0
    }

    pub fn touch(&self) -> u16 {
        (self.tsap.touch_hi as u16) << 8 | self.tsap.touch_lo as u16
    }

    pub fn trackpad_x(&self) -> u8 {
        self.tsap.x
    }

    pub fn trackpad_y(&self) -> u8 {
        self.tsap.y
    }

    pub fn version(&self) -> u16 {
        (self.info.version_major as u16) << 8 | self.info.version_minor as u16
    }

    pub fn revision(&self) -> u16 {
        (self.info.revision_major as u16) << 8 | self.info.revision_minor as u16
    }

    pub fn battery_voltage(&self) -> u16 {
        self.battery_voltage
    }

    /// Battery percentage for the current filtered voltage.
    pub fn battery_level(&self) -> u8 {
        let voltage = self.battery_voltage;
        if voltage >= 300 {
            100
        } else if voltage < 200 {
            0
        } else {
            BATTERY_LEVELS[(voltage - 200) as usize]
        }
    }

    /// Periodic battery housekeeping: low-pass the reported voltage
    /// (3/4 old + 1/4 new, with a jump bypass for large steps) and push
    /// the level to the module when it moves.
    pub async fn update_battery(&mut self, tick: u16) -> Result<(), HosError> {
        if tick % BATTERY_MEAS_TICKS != 0 {
            return Ok(());
        }
        let v = BATTERY_VOLTAGE_OFFSET + self.status[STATE_BATT] as u16;
        let diff = self.battery_voltage.abs_diff(v);
        if diff > 50 {
            self.battery_voltage = v;
        } else {
            self.battery_voltage = self.battery_voltage - (self.battery_voltage >> 2) + (v >> 2);
        }

        let level = self.battery_level();
        if level != self.battery_level {
            self.battery_level = level;
            self.set_battery_level(level).await?;
        }
        Ok(())
    }

    async fn handle_request(&mut self, request: HostRequest) {
        let result = match request {
            HostRequest::SelectProfile(profile) => {
                self.set_event(FrameType::Default, HosEvent::Key0 as u8 + profile).await
            }
            HostRequest::ClearBonding => self.set_event(FrameType::Default, HosEvent::ClearBondingData as u8).await,
        };
        if result.is_err() {
            warn!("host-link request dropped, module not ready");
        }
    }

    /// The BLE-transport poll loop: forwards finished reports, polls
    /// status for LED/battery/trackpad state, and services profile and
    /// bonding requests. Runs instead of the USB writer when the link is
    /// the active transport.
    pub async fn run(&mut self) {
        let mut tick: u16 = 0;

        // Startup grace: the module may still be booting.
        let mut responded = false;
        for _ in 0..STARTUP_GRACE_TICKS {
            if self.get_status(FrameType::Info).await.is_ok() {
                responded = true;
                break;
            }
            Timer::after_millis(POLL_INTERVAL_MS).await;
        }
        if !responded {
            error!("BLE coprocessor unresponsive, requesting reset");
            RESET_REQUEST.store(true, Ordering::Relaxed);
        }

        loop {
            match select3(
                KEYBOARD_REPORT_CHANNEL.receive(),
                HOST_EVENT_CHANNEL.receive(),
                Timer::after_millis(POLL_INTERVAL_MS),
            )
            .await
            {
                Either3::First(report) => {
                    let result = match report {
                        Report::Keyboard(r) => self.forward_keyboard_report(&r.as_bytes()).await,
                        Report::Mouse(m) => self.forward_mouse_report(&m.as_bytes()).await,
                        // The consumer page is not carried by the link.
                        Report::Media(_) => Ok(()),
                    };
                    if result.is_err() {
                        debug!("report dropped, link not ready");
                    }
                }
                Either3::Second(request) => self.handle_request(request).await,
                Either3::Third(_) => {
                    tick = tick.wrapping_add(1);
                    let frame_type = if tick % 8 == 0 { FrameType::Tsap } else { FrameType::Default };
                    if self.get_status(frame_type).await.is_ok() {
                        let connected = self.indication() == BleState::Connected;
                        if connected {
                            LOCK_LED_STATES.store(self.led().into_bits(), Ordering::Relaxed);
                            let _ = self.update_battery(tick).await;
                        }
                        if frame_type == FrameType::Tsap {
                            let motion =
                                trackpad::feed_from_host(self.trackpad_x(), self.trackpad_y(), self.touch());
                            if connected {
                                if let Some(motion) = motion {
                                    let _ = self.forward_mouse_report(&motion.as_bytes()).await;
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// LED on/off phase for an advertising/bonding indication at `tick_ms`
/// since the pattern started. Returns `None` when the state has no blink
/// pattern (connected: steady, idle: off).
pub fn led_phase(state: BleState, tick_ms: u64) -> Option<bool> {
    let in_range = |on: u64, off: u64| Some(tick_ms % (on + off) < on);
    match state {
        BleState::Scanning | BleState::Advertising => in_range(200, 800),
        BleState::AdvertisingWhitelist => in_range(300, 700),
        BleState::AdvertisingSlow => in_range(100, 900),
        BleState::AdvertisingDirected => in_range(200, 200),
        BleState::Bonding => in_range(100, 100),
        BleState::Connected => None,
        BleState::Idle => Some(false),
    }
}
