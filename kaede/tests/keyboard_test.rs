mod common;

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::convert::Infallible;
use std::rc::Rc;

use embassy_futures::block_on;
use embassy_futures::select::{select3, Either3};
use embassy_time::{Duration, Timer};
use kaede::channel::KEYBOARD_REPORT_CHANNEL;
use kaede::engine::Engine;
use kaede::hid::Report;
use kaede::keyboard::{Keyboard, Runnable};
use kaede::matrix::Matrix;
use kaede::settings::{ModMap, Settings};
use kaede::{MATRIX_COLS, MATRIX_ROWS};
use kaede_types::keycode::KeyCode::*;

/// Shared electrical state of the simulated matrix.
#[derive(Default)]
struct MatrixState {
    active_col: Cell<usize>,
    pressed: RefCell<HashSet<(usize, usize)>>,
}

impl MatrixState {
    fn press(&self, row: usize, col: usize) {
        self.pressed.borrow_mut().insert((row, col));
    }

    fn release_all(&self) {
        self.pressed.borrow_mut().clear();
    }
}

#[derive(Clone)]
struct ColPin {
    idx: usize,
    state: Rc<MatrixState>,
}

impl embedded_hal::digital::ErrorType for ColPin {
    type Error = Infallible;
}

impl embedded_hal::digital::OutputPin for ColPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.state.active_col.set(self.idx);
        Ok(())
    }
}

#[derive(Clone)]
struct RowPin {
    idx: usize,
    state: Rc<MatrixState>,
}

impl embedded_hal::digital::ErrorType for RowPin {
    type Error = Infallible;
}

impl embedded_hal::digital::InputPin for RowPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self
            .state
            .pressed
            .borrow()
            .contains(&(self.idx, self.state.active_col.get())))
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

fn simulated_keyboard(state: &Rc<MatrixState>, settings: Settings) -> Keyboard<RowPin, ColPin, MATRIX_ROWS, MATRIX_COLS> {
    let rows: [RowPin; MATRIX_ROWS] = core::array::from_fn(|idx| RowPin {
        idx,
        state: state.clone(),
    });
    let cols: [ColPin; MATRIX_COLS] = core::array::from_fn(|idx| ColPin {
        idx,
        state: state.clone(),
    });
    Keyboard::new(Matrix::new(rows, cols), Engine::new(settings))
}

async fn next_keyboard_report() -> [u8; 8] {
    loop {
        if let Report::Keyboard(report) = KEYBOARD_REPORT_CHANNEL.receive().await {
            return report.as_bytes();
        }
    }
}

async fn wait_for_release() {
    while next_keyboard_report().await != [0; 8] {}
}

/// Full loop over a simulated matrix, one scenario because the report
/// channel is a process-wide queue: a held key debounces into exactly one
/// report; a settings chord types its echo key by key; kana sequences and
/// the dakuten correction arrive as ordered single-key reports.
#[test]
fn scan_loop_end_to_end() {
    block_on(async {
        KEYBOARD_REPORT_CHANNEL.clear();
        let state = Rc::new(MatrixState::default());
        let settings = Settings {
            mod_map: ModMap::Cj,
            ..Settings::default()
        };
        let mut keyboard = simulated_keyboard(&state, settings);

        let scenario = async {
            // Press and release A at (5,0).
            state.press(5, 0);
            let report = next_keyboard_report().await;
            assert_eq!(report[2], A as u8);
            state.release_all();
            wait_for_release().await;

            // Fn+F4 cycles the kana scheme; the echo is typed out in order.
            state.press(7, 2);
            state.press(0, 3);
            let chord = next_keyboard_report().await;
            assert_eq!(chord[2..], [0; 6]);
            let mut typed = Vec::new();
            while typed.last() != Some(&(Enter as u8)) {
                let report = next_keyboard_report().await;
                if report[2] != 0 {
                    typed.push(report[2]);
                }
            }
            assert_eq!(typed, vec![N as u8, I as u8, C as u8, O as u8, Enter as u8]);
            state.release_all();
            wait_for_release().await;

            // Kana mode on via the Lang1 position (right Alt on the
            // Japanese modifier map); the PC OS mode rewrites it to F13.
            state.press(7, 6);
            loop {
                let report = next_keyboard_report().await;
                if report[2] == F13 as u8 {
                    break;
                }
            }
            state.release_all();
            wait_for_release().await;

            // KA arrives as two ordered single-key reports.
            state.press(4, 1);
            let mut keys = Vec::new();
            while keys.len() < 2 {
                let report = next_keyboard_report().await;
                if report[2] != 0 {
                    keys.push(report[2]);
                    assert_eq!(report[3..], [0; 5], "in-order reports carry one key");
                }
            }
            assert_eq!(keys, vec![K as u8, A as u8]);
            state.release_all();
            wait_for_release().await;

            // The dakuten mark corrects it to GA behind a backspace.
            state.press(0, 11);
            let mut keys = Vec::new();
            while keys.len() < 3 {
                let report = next_keyboard_report().await;
                if report[2] != 0 {
                    keys.push(report[2]);
                }
            }
            assert_eq!(keys, vec![Backspace as u8, G as u8, A as u8]);
            state.release_all();
        };

        let timeout = async {
            Timer::after(Duration::from_secs(10)).await;
            panic!("test timeout reached");
        };

        match select3(keyboard.run(), scenario, timeout).await {
            Either3::Second(_) => {}
            _ => panic!("scenario did not finish"),
        }
    });
}
