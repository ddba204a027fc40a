//! USB HID gamepad transport implementation.
//!
//! The controller never awaits the USB stack. Reports are handed to a writer
//! task through a [`HidLink`]; the writer signals completion back so the main
//! loop can chain the next report identity.

use defmt::{debug, info, warn};
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_usb::class::hid::{self, HidWriter, RequestHandler, State};
use embassy_usb::control::OutResponse;
use embassy_usb::{Builder, Handler};
use gamepad_core::{
    DeviceStatus, GamepadReport, HidRequests, ReportId, ReportTransport, ReportType,
    TransportError,
};
use portable_atomic::{AtomicBool, Ordering};

/// USB driver of the RP2040.
pub type UsbDriver<'d> = Driver<'d, USB>;

/// Report id byte followed by the gamepad payload.
pub const HID_REPORT_SIZE: usize = 1 + GamepadReport::SIZE;

/// Interrupt endpoint packet size.
pub const HID_PACKET_SIZE: usize = 16;

/// HID writer sized for the gamepad report.
pub type GamepadWriter<'d> = HidWriter<'d, UsbDriver<'d>, HID_PACKET_SIZE>;

/// HID Gamepad Report Descriptor.
///
/// One input report (id 1):
/// - 6 axes (X, Y, Z, Rz, Rx, Ry), 8-bit each
/// - hat switch, 8-bit (0 = centered, 1-8 = N..NW)
/// - 32 buttons
pub const REPORT_DESCRIPTOR: &[u8] = &[
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x05, // Usage (Gamepad)
    0xA1, 0x01, // Collection (Application)
    0x85, 0x01, //   Report ID (1)
    //
    // --- Axes ---
    0x05, 0x01, //   Usage Page (Generic Desktop)
    0x09, 0x30, //   Usage (X)
    0x09, 0x31, //   Usage (Y)
    0x09, 0x32, //   Usage (Z)
    0x09, 0x35, //   Usage (Rz)
    0x09, 0x33, //   Usage (Rx)
    0x09, 0x34, //   Usage (Ry)
    0x15, 0x81, //   Logical Minimum (-127)
    0x25, 0x7F, //   Logical Maximum (127)
    0x95, 0x06, //   Report Count (6)
    0x75, 0x08, //   Report Size (8)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    // --- Hat switch ---
    0x09, 0x39, //   Usage (Hat switch)
    0x15, 0x01, //   Logical Minimum (1)
    0x25, 0x08, //   Logical Maximum (8)
    0x35, 0x00, //   Physical Minimum (0)
    0x46, 0x3B, 0x01, //   Physical Maximum (315)
    0x65, 0x14, //   Unit (Degrees)
    0x95, 0x01, //   Report Count (1)
    0x75, 0x08, //   Report Size (8)
    0x81, 0x42, //   Input (Data, Variable, Absolute, Null State)
    0x65, 0x00, //   Unit (None)
    //
    // --- Buttons (32 buttons) ---
    0x05, 0x09, //   Usage Page (Button)
    0x19, 0x01, //   Usage Minimum (Button 1)
    0x29, 0x20, //   Usage Maximum (Button 32)
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x01, //   Logical Maximum (1)
    0x95, 0x20, //   Report Count (32)
    0x75, 0x01, //   Report Size (1)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    0xC0, // End Collection
];

/// A report waiting for the writer task.
#[derive(Clone, Copy, Debug, defmt::Format)]
pub struct OutboundReport {
    pub id: ReportId,
    pub payload: [u8; GamepadReport::SIZE],
}

impl OutboundReport {
    /// Report id prefix followed by the payload.
    #[must_use]
    pub fn as_bytes(&self) -> [u8; HID_REPORT_SIZE] {
        let mut buf = [0u8; HID_REPORT_SIZE];
        buf[0] = self.id.0;
        buf[1..].copy_from_slice(&self.payload);
        buf
    }
}

/// Hand-off between the gamepad loop and the USB tasks.
pub struct HidLink {
    outbox: Signal<CriticalSectionRawMutex, OutboundReport>,
    sent: Signal<CriticalSectionRawMutex, ReportId>,
    wakeup: Signal<CriticalSectionRawMutex, ()>,
    in_flight: AtomicBool,
}

impl HidLink {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            outbox: Signal::new(),
            sent: Signal::new(),
            wakeup: Signal::new(),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Take the id of the last completed report, if any.
    pub fn take_sent(&self) -> Option<ReportId> {
        self.sent.try_take()
    }

    /// Wait until the gamepad loop asks for a remote wakeup.
    pub async fn wakeup_requested(&self) {
        self.wakeup.wait().await;
    }

    /// Drop a wakeup request made while the bus was already resuming.
    pub fn clear_wakeup(&self) {
        self.wakeup.reset();
    }

    /// Write queued reports forever.
    pub async fn run_writer(&self, writer: &mut GamepadWriter<'_>) -> ! {
        writer.ready().await;
        info!("USB HID ready, forwarding gamepad reports...");

        loop {
            let report = self.outbox.wait().await;
            let result = writer.write(&report.as_bytes()).await;
            self.in_flight.store(false, Ordering::Release);
            match result {
                Ok(()) => self.sent.signal(report.id),
                Err(e) => warn!("HID write failed: {:?}", e),
            }
        }
    }
}

impl Default for HidLink {
    fn default() -> Self {
        Self::new()
    }
}

/// USB HID gamepad transport.
pub struct UsbTransport {
    link: &'static HidLink,
    status: &'static DeviceStatus,
}

impl UsbTransport {
    /// Create a new transport over the given link.
    #[must_use]
    pub fn new(link: &'static HidLink, status: &'static DeviceStatus) -> Self {
        Self { link, status }
    }
}

impl ReportTransport for UsbTransport {
    fn is_ready(&self) -> bool {
        self.status.state() == gamepad_core::ConnectionState::Mounted
            && !self.link.in_flight.load(Ordering::Acquire)
    }

    fn submit_report(&mut self, id: ReportId, payload: &[u8]) -> Result<(), TransportError> {
        if self.status.state() != gamepad_core::ConnectionState::Mounted {
            return Err(TransportError::NotReady);
        }
        let mut report = OutboundReport {
            id,
            payload: [0; GamepadReport::SIZE],
        };
        if payload.len() != report.payload.len() {
            return Err(TransportError::Io);
        }
        if self.link.in_flight.swap(true, Ordering::AcqRel) {
            return Err(TransportError::Busy);
        }
        report.payload.copy_from_slice(payload);
        self.link.outbox.signal(report);
        Ok(())
    }

    fn is_suspended(&self) -> bool {
        self.status.is_suspended()
    }

    fn request_remote_wakeup(&mut self) {
        if self.status.remote_wakeup_enabled() {
            self.link.wakeup.signal(());
        } else {
            debug!("Remote wakeup not enabled by host");
        }
    }
}

/// HID request handler (handles GET_REPORT, SET_REPORT, etc.).
pub struct GamepadRequestHandler {
    requests: HidRequests,
}

impl GamepadRequestHandler {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            requests: HidRequests,
        }
    }
}

impl Default for GamepadRequestHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn split_report_id(id: hid::ReportId) -> (ReportId, ReportType) {
    match id {
        hid::ReportId::In(id) => (ReportId(id), ReportType::Input),
        hid::ReportId::Out(id) => (ReportId(id), ReportType::Output),
        hid::ReportId::Feature(id) => (ReportId(id), ReportType::Feature),
    }
}

impl RequestHandler for GamepadRequestHandler {
    fn get_report(&mut self, id: hid::ReportId, buf: &mut [u8]) -> Option<usize> {
        let (id, kind) = split_report_id(id);
        match self.requests.get_report(id, kind, buf) {
            0 => None,
            len => Some(len),
        }
    }

    fn set_report(&mut self, id: hid::ReportId, data: &[u8]) -> OutResponse {
        let (id, kind) = split_report_id(id);
        self.requests.set_report(id, kind, data);
        OutResponse::Accepted
    }

    fn set_idle_ms(&mut self, _id: Option<hid::ReportId>, _duration_ms: u32) {}

    fn get_idle_ms(&mut self, _id: Option<hid::ReportId>) -> Option<u32> {
        None
    }
}

/// USB device event handler.
///
/// Only records bus state in [`DeviceStatus`]; the gamepad loop picks it up
/// on its next iteration.
pub struct UsbHandler {
    status: &'static DeviceStatus,
    remote_wakeup_enabled: bool,
}

impl UsbHandler {
    #[must_use]
    pub fn new(status: &'static DeviceStatus) -> Self {
        Self {
            status,
            remote_wakeup_enabled: false,
        }
    }
}

impl Handler for UsbHandler {
    fn enabled(&mut self, enabled: bool) {
        if !enabled {
            self.status.on_unmount();
        }
    }

    fn reset(&mut self) {
        self.remote_wakeup_enabled = false;
        self.status.on_unmount();
    }

    fn configured(&mut self, configured: bool) {
        if configured {
            self.status.on_mount();
        } else {
            self.status.on_unmount();
        }
    }

    fn suspended(&mut self, suspended: bool) {
        if suspended {
            self.status.on_suspend(self.remote_wakeup_enabled);
        } else {
            self.status.on_resume();
        }
    }

    fn remote_wakeup_enabled(&mut self, enabled: bool) {
        self.remote_wakeup_enabled = enabled;
        self.status.set_remote_wakeup_enabled(enabled);
    }
}

/// Configure the USB HID class in the USB builder.
///
/// Returns the HID writer for use by the application.
pub fn configure_usb_hid<'d>(
    builder: &mut Builder<'d, UsbDriver<'d>>,
    state: &'d mut State<'d>,
    request_handler: &'d mut GamepadRequestHandler,
) -> GamepadWriter<'d> {
    let config = hid::Config {
        report_descriptor: REPORT_DESCRIPTOR,
        request_handler: Some(request_handler),
        poll_ms: 1,
        max_packet_size: HID_PACKET_SIZE as u16,
        hid_subclass: hid::HidSubclass::No,
        hid_boot_protocol: hid::HidBootProtocol::None,
    };

    HidWriter::new(builder, state, config)
}
