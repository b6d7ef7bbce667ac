//! Key matrix scanning over `embedded-hal` pins.
//!
//! Col2row wiring: each column output is driven high in turn and the row
//! inputs sampled. The matrix has no diodes; ghost rejection happens in the
//! engine, which sees every closed contact of a pass.

use embassy_time::Timer;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::engine::Engine;

pub struct Matrix<In: InputPin, Out: OutputPin, const ROW: usize, const COL: usize> {
    row_pins: [In; ROW],
    col_pins: [Out; COL],
}

impl<In: InputPin, Out: OutputPin, const ROW: usize, const COL: usize> Matrix<In, Out, ROW, COL> {
    pub fn new(row_pins: [In; ROW], col_pins: [Out; COL]) -> Self {
        Self { row_pins, col_pins }
    }

    /// One full pass: reports every closed contact to the engine.
    pub async fn scan_into(&mut self, engine: &mut Engine) {
        for (col, col_pin) in self.col_pins.iter_mut().enumerate() {
            let _ = col_pin.set_high();
            // Output propagation settle time.
            Timer::after_micros(1).await;
            for (row, row_pin) in self.row_pins.iter_mut().enumerate() {
                if row_pin.is_high().unwrap_or_default() {
                    engine.on_pressed(row as u8, col as u8);
                }
            }
            let _ = col_pin.set_low();
        }
    }
}
