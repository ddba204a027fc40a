//! The main-loop context: owns every piece of mutable state and runs the
//! periodic tasks.

use crate::config::ControllerConfig;
use crate::gate::{EdgeState, GateOutcome, ReportGate};
use crate::registry::InputRegistry;
use crate::report::{GamepadReport, ReportId};
use crate::sampler::{InputHardware, Sampler};
use crate::scheduler::{PeriodicTask, StatusIndicator};
use crate::status::DeviceStatus;
use crate::transport::ReportTransport;
use embedded_hal::digital::OutputPin;

/// One report identity and the inputs that feed it.
#[derive(Debug, Clone, Copy)]
pub struct ReportSlot<'a> {
    id: ReportId,
    registry: InputRegistry<'a>,
    gate: ReportGate,
}

impl<'a> ReportSlot<'a> {
    #[must_use]
    pub const fn new(id: ReportId, registry: InputRegistry<'a>) -> Self {
        Self {
            id,
            registry,
            gate: ReportGate::new(),
        }
    }

    #[inline]
    #[must_use]
    pub const fn id(&self) -> ReportId {
        self.id
    }

    #[inline]
    #[must_use]
    pub const fn registry(&self) -> &InputRegistry<'a> {
        &self.registry
    }

    #[inline]
    #[must_use]
    pub const fn state(&self) -> EdgeState {
        self.gate.state()
    }
}

/// What a due report cycle did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleOutcome {
    /// Bus suspended with a button held; asked the host to resume instead
    /// of reporting.
    WakeupRequested,
    /// The first report identity went through its gate.
    Report(GateOutcome),
}

/// Cooperative gamepad loop.
///
/// Call [`poll`](Self::poll) from the main loop with the current monotonic
/// time, and [`on_report_sent`](Self::on_report_sent) whenever the transport
/// finishes a report. Nothing here blocks.
///
/// Several report identities may be configured. The first one is sampled on
/// the report timer; each following one is sampled and sent when the one
/// before it completes.
pub struct GamepadController<'a, H, T, L, const N: usize> {
    slots: [ReportSlot<'a>; N],
    sampler: Sampler,
    hardware: H,
    transport: T,
    led: L,
    status: &'a DeviceStatus,
    report_task: PeriodicTask,
    indicator: StatusIndicator,
}

impl<'a, H, T, L, const N: usize> GamepadController<'a, H, T, L, N>
where
    H: InputHardware,
    T: ReportTransport,
    L: OutputPin,
{
    /// # Panics
    ///
    /// Panics if no report identity is configured.
    pub fn new(
        config: ControllerConfig,
        slots: [ReportSlot<'a>; N],
        hardware: H,
        transport: T,
        led: L,
        status: &'a DeviceStatus,
    ) -> Self {
        assert!(N > 0, "at least one report identity is required");
        Self {
            slots,
            sampler: Sampler::new(config.analog),
            hardware,
            transport,
            led,
            status,
            report_task: PeriodicTask::new(config.timing.report_interval_ms),
            indicator: StatusIndicator::new(config.timing.blink),
        }
    }

    /// Run one loop iteration at `now_ms`.
    ///
    /// Returns the report cycle outcome if the report task was due.
    pub fn poll(&mut self, now_ms: u32) -> Option<CycleOutcome> {
        self.indicator
            .poll(now_ms, self.status.state(), &mut self.led);

        if !self.report_task.poll(now_ms) {
            return None;
        }
        Some(self.report_cycle())
    }

    /// Sample the first report identity and gate it.
    pub fn report_cycle(&mut self) -> CycleOutcome {
        let slot = &mut self.slots[0];
        let report = self.sampler.assemble(&slot.registry, &mut self.hardware);

        if self.transport.is_suspended() && !report.buttons.is_empty() {
            debug!("button {:?} held while suspended, waking host", report.buttons);
            self.transport.request_remote_wakeup();
            return CycleOutcome::WakeupRequested;
        }

        CycleOutcome::Report(slot.gate.evaluate(slot.id, &report, &mut self.transport))
    }

    /// Transport finished sending report `id`.
    ///
    /// If another identity follows `id`, it is sampled and gated right away.
    /// Returns `None` when `id` is unknown or is the last identity.
    pub fn on_report_sent(&mut self, id: ReportId) -> Option<GateOutcome> {
        let index = self.slots.iter().position(|slot| slot.id == id)?;
        let next = self.slots.get_mut(index + 1)?;
        let report = self.sampler.assemble(&next.registry, &mut self.hardware);
        Some(next.gate.evaluate(next.id, &report, &mut self.transport))
    }

    /// Sample the inputs of `id` without touching any gate.
    pub fn sample(&mut self, id: ReportId) -> Option<GamepadReport> {
        let slot = self.slots.iter().find(|slot| slot.id == id)?;
        Some(self.sampler.assemble(&slot.registry, &mut self.hardware))
    }

    #[must_use]
    pub fn slot(&self, id: ReportId) -> Option<&ReportSlot<'a>> {
        self.slots.iter().find(|slot| slot.id == id)
    }

    #[inline]
    #[must_use]
    pub fn status(&self) -> &'a DeviceStatus {
        self.status
    }

    /// Get a mutable reference to the input hardware.
    pub fn hardware_mut(&mut self) -> &mut H {
        &mut self.hardware
    }

    /// Get a reference to the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Get a mutable reference to the transport.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Get a reference to the status LED.
    pub fn led(&self) -> &L {
        &self.led
    }

    /// Decompose the controller into its collaborators.
    pub fn into_parts(self) -> (H, T, L) {
        (self.hardware, self.transport, self.led)
    }
}
