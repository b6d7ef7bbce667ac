//! Thin wrappers over the embassy-usb HID class. Enumeration, descriptors
//! and endpoint allocation belong to the board crate; this module only
//! moves finished reports to the endpoints and lock-LED reports back.

pub mod descriptor;

use core::sync::atomic::Ordering;

use embassy_usb::class::hid::{HidReader, HidWriter, ReportId, RequestHandler};
use embassy_usb::control::OutResponse;
use embassy_usb::driver::Driver;
use usbd_hid::descriptor::{MediaKeyboardReport, MouseReport};

use crate::channel::KEYBOARD_REPORT_CHANNEL;
use crate::hid::{HidError, HidWriterTrait, Report};
use crate::{CONNECTION_STATE, LOCK_LED_STATES};

pub struct UsbHidWriter<'d, D: Driver<'d>> {
    keyboard_writer: HidWriter<'d, D, 8>,
    mouse_writer: HidWriter<'d, D, 5>,
    media_writer: HidWriter<'d, D, 2>,
}

impl<'d, D: Driver<'d>> UsbHidWriter<'d, D> {
    pub fn new(
        keyboard_writer: HidWriter<'d, D, 8>,
        mouse_writer: HidWriter<'d, D, 5>,
        media_writer: HidWriter<'d, D, 2>,
    ) -> Self {
        Self {
            keyboard_writer,
            mouse_writer,
            media_writer,
        }
    }

    /// Drains the report channel in queue order for as long as the
    /// connection is up; reports arriving while disconnected are dropped.
    pub async fn run(&mut self) {
        loop {
            let report = KEYBOARD_REPORT_CHANNEL.receive().await;
            if !CONNECTION_STATE.load(Ordering::Acquire) {
                continue;
            }
            if self.write_report(report).await.is_err() {
                debug!("USB report dropped");
            }
        }
    }
}

impl<'d, D: Driver<'d>> HidWriterTrait for UsbHidWriter<'d, D> {
    type ReportType = Report;

    async fn write_report(&mut self, report: Self::ReportType) -> Result<usize, HidError> {
        match report {
            Report::Keyboard(r) => {
                self.keyboard_writer
                    .write(&r.as_bytes())
                    .await
                    .map_err(|_| HidError::UsbEndpointError)?;
                Ok(8)
            }
            Report::Mouse(m) => {
                self.mouse_writer
                    .write_serialize(&MouseReport {
                        buttons: m.buttons,
                        x: m.x,
                        y: m.y,
                        wheel: m.wheel,
                        pan: 0,
                    })
                    .await
                    .map_err(|_| HidError::UsbEndpointError)?;
                Ok(5)
            }
            Report::Media(usage_id) => {
                self.media_writer
                    .write_serialize(&MediaKeyboardReport { usage_id })
                    .await
                    .map_err(|_| HidError::UsbEndpointError)?;
                Ok(2)
            }
        }
    }
}

pub struct UsbHidReader<'d, D: Driver<'d>> {
    reader: HidReader<'d, D, 1>,
}

impl<'d, D: Driver<'d>> UsbHidReader<'d, D> {
    pub fn new(reader: HidReader<'d, D, 1>) -> Self {
        Self { reader }
    }

    /// Receives lock-LED output reports from the host forever.
    pub async fn run(self) {
        let mut handler = UsbRequestHandler {};
        self.reader.run(false, &mut handler).await;
    }
}

struct UsbRequestHandler {}

impl RequestHandler for UsbRequestHandler {
    fn get_report(&mut self, _id: ReportId, _buf: &mut [u8]) -> Option<usize> {
        None
    }

    fn set_report(&mut self, id: ReportId, data: &[u8]) -> OutResponse {
        if !data.is_empty() {
            debug!("lock LEDs: {:?} = {}", id, data[0]);
            LOCK_LED_STATES.store(data[0], Ordering::Relaxed);
        }
        OutResponse::Accepted
    }

    fn set_idle_ms(&mut self, _id: Option<ReportId>, _duration_ms: u32) {}

    fn get_idle_ms(&mut self, _id: Option<ReportId>) -> Option<u32> {
        None
    }
}
