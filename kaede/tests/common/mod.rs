#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use kaede::engine::{Engine, Transmit};
use kaede::settings::Settings;
use kaede_types::report::KeyboardReport;

// Init logger for tests
#[ctor::ctor]
pub fn init_log() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

pub fn engine_with(settings: Settings) -> Engine {
    Engine::new(settings)
}

/// Runs one scan pass: registers the contacts and closes the pass.
pub fn scan_pass(engine: &mut Engine, contacts: &[(u8, u8)]) -> (Transmit, KeyboardReport) {
    let mut report = KeyboardReport::new();
    for &(row, col) in contacts {
        engine.on_pressed(row, col);
    }
    let xmit = engine.make_report(false, &mut report);
    (xmit, report)
}

/// Holds the contacts for `cycles` passes, returning every non-`None`
/// verdict in order.
pub fn hold_for(engine: &mut Engine, contacts: &[(u8, u8)], cycles: usize) -> Vec<(Transmit, KeyboardReport)> {
    let mut sent = Vec::new();
    for _ in 0..cycles {
        let (xmit, report) = scan_pass(engine, contacts);
        if xmit != Transmit::None {
            sent.push((xmit, report));
        }
    }
    sent
}

/// Comfortably past the hold threshold for every repeat-delay setting.
pub const SETTLE_CYCLES: usize = 64;

/// Presses the contacts until transmitted, then releases until the release
/// is transmitted. Returns all transmitted reports, presses first.
pub fn tap(engine: &mut Engine, contacts: &[(u8, u8)]) -> Vec<(Transmit, KeyboardReport)> {
    let mut sent = hold_for(engine, contacts, SETTLE_CYCLES);
    sent.extend(hold_for(engine, &[], SETTLE_CYCLES));
    sent
}

/// In-memory NOR flash for settings-store tests: 4 sectors of 4 KiB,
/// word-aligned writes, erase to 0xFF.
pub struct MemFlash {
    data: Vec<u8>,
}

#[derive(Debug)]
pub struct MemFlashError;

impl embedded_storage_async::nor_flash::NorFlashError for MemFlashError {
    fn kind(&self) -> embedded_storage_async::nor_flash::NorFlashErrorKind {
        embedded_storage_async::nor_flash::NorFlashErrorKind::Other
    }
}

impl MemFlash {
    pub const SECTOR: usize = 4096;

    pub fn new() -> Self {
        Self {
            data: vec![0xFF; 4 * Self::SECTOR],
        }
    }
}

impl embedded_storage_async::nor_flash::ErrorType for MemFlash {
    type Error = MemFlashError;
}

impl embedded_storage_async::nor_flash::ReadNorFlash for MemFlash {
    const READ_SIZE: usize = 1;

    async fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        let offset = offset as usize;
        if offset + bytes.len() > self.data.len() {
            return Err(MemFlashError);
        }
        bytes.copy_from_slice(&self.data[offset..offset + bytes.len()]);
        Ok(())
    }

    fn capacity(&self) -> usize {
        self.data.len()
    }
}

impl embedded_storage_async::nor_flash::NorFlash for MemFlash {
    const WRITE_SIZE: usize = 4;
    const ERASE_SIZE: usize = Self::SECTOR;

    async fn erase(&mut self, from: u32, to: u32) -> Result<(), Self::Error> {
        let (from, to) = (from as usize, to as usize);
        if from % Self::SECTOR != 0 || to % Self::SECTOR != 0 || to > self.data.len() {
            return Err(MemFlashError);
        }
        self.data[from..to].fill(0xFF);
        Ok(())
    }

    async fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
        let offset = offset as usize;
        if offset % Self::WRITE_SIZE != 0 || bytes.len() % Self::WRITE_SIZE != 0 || offset + bytes.len() > self.data.len() {
            return Err(MemFlashError);
        }
        for (slot, &byte) in self.data[offset..offset + bytes.len()].iter_mut().zip(bytes) {
            *slot &= byte;
        }
        Ok(())
    }
}

/// Scripted SPI slave standing in for the BLE coprocessor. Queued frames
/// answer exchanges in order; once drained, every exchange gets the
/// fallback frame. Counts exchanges for the retry-bound checks.
#[derive(Clone)]
pub struct ScriptedSpi {
    frames: Rc<RefCell<VecDeque<Vec<u8>>>>,
    fallback: Vec<u8>,
    exchanges: Rc<Cell<usize>>,
}

#[derive(Debug)]
pub struct ScriptedSpiError;

impl embedded_hal::spi::Error for ScriptedSpiError {
    fn kind(&self) -> embedded_hal::spi::ErrorKind {
        embedded_hal::spi::ErrorKind::Other
    }
}

impl ScriptedSpi {
    /// A slave answering every byte of every exchange with `byte`.
    pub fn constant(byte: u8) -> Self {
        Self {
            frames: Rc::new(RefCell::new(VecDeque::new())),
            fallback: vec![byte; 16],
            exchanges: Rc::new(Cell::new(0)),
        }
    }

    /// A slave answering with the queued frames, then `fallback`.
    pub fn with_frames(frames: Vec<Vec<u8>>, fallback: Vec<u8>) -> Self {
        Self {
            frames: Rc::new(RefCell::new(frames.into())),
            fallback,
            exchanges: Rc::new(Cell::new(0)),
        }
    }

    pub fn exchanges(&self) -> usize {
        self.exchanges.get()
    }

    fn respond(&mut self, read: &mut [u8]) {
        let frame = self.frames.borrow_mut().pop_front().unwrap_or_else(|| self.fallback.clone());
        for (slot, &byte) in read.iter_mut().zip(frame.iter()) {
            *slot = byte;
        }
        self.exchanges.set(self.exchanges.get() + 1);
    }
}

impl embedded_hal_async::spi::ErrorType for ScriptedSpi {
    type Error = ScriptedSpiError;
}

impl embedded_hal_async::spi::SpiDevice<u8> for ScriptedSpi {
    async fn transaction(
        &mut self,
        operations: &mut [embedded_hal::spi::Operation<'_, u8>],
    ) -> Result<(), Self::Error> {
        for operation in operations.iter_mut() {
            match operation {
                embedded_hal::spi::Operation::Transfer(read, _write) => self.respond(read),
                embedded_hal::spi::Operation::Read(read) => self.respond(read),
                embedded_hal::spi::Operation::TransferInPlace(buf) => {
                    let mut out = vec![0u8; buf.len()];
                    self.respond(&mut out);
                    buf.copy_from_slice(&out);
                }
                _ => {}
            }
        }
        Ok(())
    }
}

/// A response frame whose profile byte passes the nibble-complement check.
pub fn valid_frame(profile: u8, led: u8, batt: u8, indicate: u8, frame_type: u8, tail: [u8; 4]) -> Vec<u8> {
    let profile_byte = (!profile << 4) | (profile & 0x0f);
    let mut frame = vec![profile_byte, led, batt, indicate, frame_type];
    frame.extend_from_slice(&tail);
    frame.resize(16, 0);
    frame
}
