#![cfg_attr(not(feature = "std"), no_std)]

//! # kaede
//!
//! Firmware core for a programmable split-ergonomic keyboard with native
//! Japanese kana input schemes. The crate owns everything between the raw
//! key matrix and the 8-byte HID report: scanning and ghost rejection,
//! tap/hold disambiguation, base-layout and function-layer resolution, the
//! kana composition engine with dakuten correction, persisted settings, and
//! the SPI link to the BLE coprocessor.
//!
//! Hardware bring-up (clocks, pins, the USB builder) stays in the board
//! crate; this crate only consumes `embedded-hal` traits and embassy-usb
//! endpoint halves.

#[macro_use]
mod fmt;

pub mod channel;
pub mod config;
pub mod engine;
pub mod hid;
pub mod hoslink;
pub mod keyboard;
pub mod keyboard_macro;
pub mod layout;
pub mod light;
pub mod matrix;
pub mod settings;
pub mod storage;
pub mod trackpad;
pub mod usb;

use core::sync::atomic::{AtomicBool, AtomicU8};

use embassy_futures::join::{join, join4};
use embassy_usb::driver::Driver;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_storage_async::nor_flash::NorFlash as AsyncNorFlash;

pub use kaede_types as types;

use crate::keyboard::{Keyboard, Runnable};
use crate::light::LightService;
use crate::storage::Storage;
use crate::usb::{UsbHidReader, UsbHidWriter};

pub type RawMutex = embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

/// Physical matrix dimensions.
pub const MATRIX_ROWS: usize = 8;
pub const MATRIX_COLS: usize = 12;

/// A matrix position with no key assigned; used as the key-set filler.
pub const VOID_POSITION: u8 = 14;

/// Scan cycles a changed key-set must stay stable before it is forwarded.
/// Deliberately tuned together with [`SCAN_INTERVAL_MS`]; chord timing is
/// user-perceptible.
pub const HOLD_TICKS: u8 = 10;

/// Matrix scan period in milliseconds.
pub const SCAN_INTERVAL_MS: u64 = 1;

/// Capacity of the ordered echo/macro key buffer.
pub const MACRO_SPACE_SIZE: usize = 256;

pub(crate) const REPORT_CHANNEL_SIZE: usize = 16;
pub(crate) const FLASH_CHANNEL_SIZE: usize = 4;

/// Firmware version, BCD-packed, typed out by the about report.
pub const APP_VERSION: u16 = 0x0301;
/// Board revision typed out by the about report.
pub const BOARD_REV: u8 = 3;

/// Whether a host connection is up; reports are dropped while false. The
/// board clears it on suspend and restores it on resume.
pub static CONNECTION_STATE: AtomicBool = AtomicBool::new(true);

/// Lock-LED image last received from the host, HID LED page bit order.
pub static LOCK_LED_STATES: AtomicU8 = AtomicU8::new(0);

/// Runs the keyboard with the USB transport: scan loop, HID writer/reader,
/// storage task and LED service, joined forever. The host-link poller, when
/// present, is joined by the board crate alongside this future.
pub async fn run_kaede<'d, D: Driver<'d>, F: AsyncNorFlash, In: InputPin, Out: OutputPin, Led: OutputPin>(
    mut keyboard: Keyboard<In, Out, MATRIX_ROWS, MATRIX_COLS>,
    mut hid_writer: UsbHidWriter<'d, D>,
    hid_reader: UsbHidReader<'d, D>,
    mut storage: Storage<F>,
    mut light_service: LightService<Led>,
) -> ! {
    join4(
        keyboard.run(),
        hid_writer.run(),
        hid_reader.run(),
        join(storage.run(), light_service.run()),
    )
    .await;
    unreachable!("keyboard tasks never return")
}
