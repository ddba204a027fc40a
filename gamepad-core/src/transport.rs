//! Report transport trait, error types and host request handling.

use crate::report::ReportId;

/// Error type for report submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// Device not ready (e.g., USB not configured).
    NotReady,
    /// A previous report is still in flight.
    Busy,
    /// USB/communication I/O error.
    Io,
}

/// Non-blocking access to the USB HID stack.
///
/// Submission hands the report off and returns immediately; completion is
/// reported back through [`GamepadController::on_report_sent`].
///
/// [`GamepadController::on_report_sent`]: crate::GamepadController::on_report_sent
pub trait ReportTransport {
    /// Check if the transport can accept a report right now.
    fn is_ready(&self) -> bool;

    /// Queue a report payload for transmission under `id`.
    fn submit_report(&mut self, id: ReportId, payload: &[u8]) -> Result<(), TransportError>;

    /// Check if the bus is suspended by the host.
    fn is_suspended(&self) -> bool;

    /// Ask the host to resume the bus.
    fn request_remote_wakeup(&mut self);
}

/// HID report type of a control request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReportType {
    Input,
    Output,
    Feature,
}

/// Answers to GET_REPORT / SET_REPORT control requests.
///
/// Reports are only delivered on the interrupt endpoint, so GET_REPORT
/// answers with zero bytes and SET_REPORT data is accepted and dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct HidRequests;

impl HidRequests {
    /// Fill `buf` for a GET_REPORT request. Returns the number of bytes written.
    pub fn get_report(&self, id: ReportId, kind: ReportType, buf: &mut [u8]) -> usize {
        trace!(
            "GET_REPORT id={} type={:?} capacity={}",
            id.0,
            kind,
            buf.len()
        );
        0
    }

    /// Handle a SET_REPORT request.
    pub fn set_report(&self, id: ReportId, kind: ReportType, data: &[u8]) {
        trace!("SET_REPORT id={} type={:?} len={}", id.0, kind, data.len());
    }
}
