//! The scan-loop task: drives the matrix, runs the engine, and turns its
//! transmit verdicts into report sequences.

use core::sync::atomic::Ordering;

use embassy_time::Timer;
use embedded_hal::digital::{InputPin, OutputPin};
use kaede_types::led_indicator::LedIndicator;
use kaede_types::report::KeyboardReport;

use crate::channel::{HOST_EVENT_CHANNEL, KEYBOARD_REPORT_CHANNEL};
use crate::engine::{Engine, Transmit};
use crate::hid::Report;
use crate::light::INDICATOR_LED_STATES;
use crate::matrix::Matrix;
use crate::{trackpad, LOCK_LED_STATES, SCAN_INTERVAL_MS};

/// A forever-running task.
pub trait Runnable {
    async fn run(&mut self);
}

pub struct Keyboard<In: InputPin, Out: OutputPin, const ROW: usize, const COL: usize> {
    matrix: Matrix<In, Out, ROW, COL>,
    pub engine: Engine,
}

impl<In: InputPin, Out: OutputPin, const ROW: usize, const COL: usize> Runnable for Keyboard<In, Out, ROW, COL> {
    async fn run(&mut self) {
        loop {
            self.scan_cycle().await;
            Timer::after_millis(SCAN_INTERVAL_MS).await;
        }
    }
}

impl<In: InputPin, Out: OutputPin, const ROW: usize, const COL: usize> Keyboard<In, Out, ROW, COL> {
    pub fn new(matrix: Matrix<In, Out, ROW, COL>, engine: Engine) -> Self {
        Self { matrix, engine }
    }

    /// One scan pass: scan always precedes synthesis, synthesis precedes
    /// transmission.
    async fn scan_cycle(&mut self) {
        let host_leds = LedIndicator::from_bits(LOCK_LED_STATES.load(Ordering::Relaxed));
        self.engine.set_leds(host_leds);

        self.matrix.scan_into(&mut self.engine).await;

        let mut report = KeyboardReport::new();
        let xmit = self.engine.make_report(trackpad::is_touched(), &mut report);

        if let Some(chord) = self.engine.take_pad_chord() {
            trackpad::process_mouse_keys(&chord);
        }
        if let Some(request) = self.engine.take_host_request() {
            if HOST_EVENT_CHANNEL.try_send(request).is_err() {
                warn!("host-link request queue full");
            }
        }

        match xmit {
            Transmit::None => {}
            Transmit::Normal | Transmit::Break => self.send(Report::Keyboard(report)).await,
            Transmit::InOrder => self.send_in_order(report).await,
            Transmit::Macro => {
                self.send(Report::Keyboard(report)).await;
                self.drain_macros(report.modifier).await;
            }
        }

        if let Some(usage) = self.engine.take_media_request() {
            self.send(Report::Media(usage)).await;
            self.send(Report::Media(0)).await;
        }

        INDICATOR_LED_STATES.store(self.engine.indicator(host_leds).into_bits(), Ordering::Relaxed);
    }

    async fn send(&self, report: Report) {
        KEYBOARD_REPORT_CHANNEL.send(report).await;
    }

    /// Sends the report's key codes one report at a time in slot order,
    /// with a release wedged between repeated keys and a trailing release
    /// so the host never auto-repeats the tail of a composed sequence.
    async fn send_in_order(&mut self, report: KeyboardReport) {
        let modifier = report.modifier;
        let mut previous = 0u8;
        for &key in report.keycodes.iter() {
            if key == 0 {
                continue;
            }
            if key == previous {
                self.send(Report::Keyboard(KeyboardReport {
                    modifier,
                    ..KeyboardReport::new()
                }))
                .await;
            }
            let mut single = KeyboardReport::new();
            single.modifier = modifier;
            single.keycodes[0] = key;
            self.send(Report::Keyboard(single)).await;
            previous = key;
        }
        self.send(Report::Keyboard(KeyboardReport {
            modifier,
            ..KeyboardReport::new()
        }))
        .await;
    }

    /// Types the queued echo text, one key per report.
    async fn drain_macros(&mut self, modifier: kaede_types::modifier::HidModifiers) {
        let mut previous = 0u8;
        while let Some(key) = self.engine.macros.next_key() {
            if key == 0 {
                continue;
            }
            if key == previous {
                self.send(Report::Keyboard(KeyboardReport {
                    modifier,
                    ..KeyboardReport::new()
                }))
                .await;
            }
            let mut single = KeyboardReport::new();
            single.modifier = modifier;
            single.keycodes[0] = key;
            self.send(Report::Keyboard(single)).await;
            previous = key;
        }
        self.send(Report::Keyboard(KeyboardReport {
            modifier,
            ..KeyboardReport::new()
        }))
        .await;
    }
}
