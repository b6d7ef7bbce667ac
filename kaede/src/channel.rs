//! Exposed channels shared between the scan loop, the transports and the
//! storage task.

use embassy_sync::channel::Channel;

use crate::engine::HostRequest;
use crate::hid::Report;
use crate::storage::FlashOperationMessage;
use crate::{RawMutex, FLASH_CHANNEL_SIZE, REPORT_CHANNEL_SIZE};

/// Finished reports from the scan loop to the active transport (USB HID
/// writer or the host-link forwarder).
///
/// Reports queued here by one `Transmit::InOrder`/`Transmit::Macro` sequence
/// must be written to the host one by one in queue order; the transport must
/// never coalesce or reorder them.
pub static KEYBOARD_REPORT_CHANNEL: Channel<RawMutex, Report, REPORT_CHANNEL_SIZE> = Channel::new();

/// Settings bytes on their way to flash.
pub static FLASH_CHANNEL: Channel<RawMutex, FlashOperationMessage, FLASH_CHANNEL_SIZE> = Channel::new();

/// Profile/bonding chords on their way to the host-link poller.
pub static HOST_EVENT_CHANNEL: Channel<RawMutex, HostRequest, 2> = Channel::new();
