//! Indicator LED driver.
//!
//! Three board LEDs mirror the lock/kana indicator image computed by the
//! engine, except while the BLE coprocessor is advertising or bonding, when
//! the pattern generator in [`crate::hoslink`] takes over all of them.

use core::sync::atomic::{AtomicU8, Ordering};

use embassy_time::{Instant, Timer};
use embedded_hal::digital::{OutputPin, PinState};
use kaede_types::led_indicator::LedIndicator;

use crate::hoslink::{led_phase, BleState, HOS_INDICATION};

/// Indicator image (kana fold applied) published by the scan loop.
pub static INDICATOR_LED_STATES: AtomicU8 = AtomicU8::new(0);

const REFRESH_MS: u64 = 50;

/// A single indicator LED.
struct SingleLed<P: OutputPin> {
    /// Pin state that turns the LED on.
    on_state: PinState,
    pin: P,
}

impl<P: OutputPin> SingleLed<P> {
    fn set(&mut self, on: bool) {
        let state = if on { self.on_state } else { !self.on_state };
        let _ = self.pin.set_state(state);
    }
}

pub struct LightService<P: OutputPin> {
    left: Option<SingleLed<P>>,
    center: Option<SingleLed<P>>,
    right: Option<SingleLed<P>>,
}

impl<P: OutputPin> LightService<P> {
    pub fn new(left: Option<P>, center: Option<P>, right: Option<P>, on_state: PinState) -> Self {
        let wrap = |pin: Option<P>| pin.map(|pin| SingleLed { on_state, pin });
        Self {
            left: wrap(left),
            center: wrap(center),
            right: wrap(right),
        }
    }

    fn apply(&mut self, leds: LedIndicator) {
        if let Some(led) = self.left.as_mut() {
            led.set(leds.num_lock());
        }
        if let Some(led) = self.center.as_mut() {
            led.set(leds.caps_lock());
        }
        if let Some(led) = self.right.as_mut() {
            led.set(leds.scroll_lock());
        }
    }

    fn apply_all(&mut self, on: bool) {
        for led in [self.left.as_mut(), self.center.as_mut(), self.right.as_mut()]
            .into_iter()
            .flatten()
        {
            led.set(on);
        }
    }

    pub async fn run(&mut self) {
        loop {
            let ble = BleState::from_indication(HOS_INDICATION.load(Ordering::Relaxed));
            match led_phase(ble, Instant::now().as_millis()) {
                Some(phase) if ble != BleState::Idle => self.apply_all(phase),
                _ => {
                    let leds = LedIndicator::from_bits(INDICATOR_LED_STATES.load(Ordering::Relaxed));
                    self.apply(leds);
                }
            }
            Timer::after_millis(REFRESH_MS).await;
        }
    }
}
