//! # Kaede Types
//!
//! Fundamental type definitions shared between the kaede firmware core and
//! anything that speaks its wire formats (the USB HID report and the
//! host-link payloads).
//!
//! - [`keycode`] - key code definitions: HID usages plus firmware-internal
//!   control codes
//! - [`modifier`] - the HID modifier bitmask
//! - [`led_indicator`] - keyboard LED indicator states
//! - [`report`] - the 8-byte keyboard input report payload

#![no_std]

pub mod keycode;
pub mod led_indicator;
pub mod modifier;
pub mod report;
