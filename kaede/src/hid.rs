//! Report types and the reporter/listener traits shared by the USB and
//! host-link transports.

use kaede_types::report::{KeyboardReport, MouseReport};

/// Consumer-page usage for the calculator launcher key.
pub const CONSUMER_CALCULATOR: u16 = 0x0192;

/// A finished input report on its way to the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Report {
    /// Normal keyboard hid report
    Keyboard(KeyboardReport),
    /// Relative mouse report from the trackpad
    Mouse(MouseReport),
    /// Consumer-page usage (media key), 0 releases
    Media(u16),
}

#[derive(Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HidError {
    UsbDisabled,
    UsbEndpointError,
    ReportSerializeError,
    HostLinkDown,
}

/// Writes reports to the host. Implementations must preserve the order in
/// which reports were queued; in-order kana sequences depend on it.
pub trait HidWriterTrait {
    type ReportType;

    async fn write_report(&mut self, report: Self::ReportType) -> Result<usize, HidError>;
}
