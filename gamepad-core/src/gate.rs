//! Edge-triggered send/suppress policy.
//!
//! A report is sent on every cycle while input is active, once more when
//! input returns to neutral (the release report), and then suppressed until
//! input becomes active again.

use crate::report::{GamepadReport, ReportId};
use crate::transport::ReportTransport;

/// Transmission state of one report identity.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EdgeState {
    /// Host has seen neutral input.
    #[default]
    Idle,
    /// Last transmitted report was non-empty.
    Active,
}

/// What a cycle does with its report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GateAction {
    Suppress,
    Transmit,
    Release,
}

impl EdgeState {
    /// Transition table, evaluated once per cycle after sampling.
    #[must_use]
    pub const fn transition(self, report_empty: bool) -> (EdgeState, GateAction) {
        match (self, report_empty) {
            (EdgeState::Idle, true) => (EdgeState::Idle, GateAction::Suppress),
            (EdgeState::Idle, false) => (EdgeState::Active, GateAction::Transmit),
            (EdgeState::Active, false) => (EdgeState::Active, GateAction::Transmit),
            (EdgeState::Active, true) => (EdgeState::Idle, GateAction::Release),
        }
    }
}

/// Result of one gate evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GateOutcome {
    /// Transport not ready or submission refused; state unchanged.
    Skipped,
    /// Neutral input while idle; nothing sent.
    Suppressed,
    /// Non-empty report sent.
    Transmitted,
    /// Empty release report sent.
    Released,
}

impl GateOutcome {
    #[inline]
    #[must_use]
    pub const fn is_sent(self) -> bool {
        matches!(self, GateOutcome::Transmitted | GateOutcome::Released)
    }
}

/// Per-identity report gate.
#[derive(Clone, Copy, Default, Debug)]
pub struct ReportGate {
    state: EdgeState,
}

impl ReportGate {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: EdgeState::Idle,
        }
    }

    #[inline]
    #[must_use]
    pub const fn state(&self) -> EdgeState {
        self.state
    }

    /// Decide and, if needed, submit `report` under `id`.
    ///
    /// The state only advances once the transport has accepted the report.
    pub fn evaluate<T: ReportTransport>(
        &mut self,
        id: ReportId,
        report: &GamepadReport,
        transport: &mut T,
    ) -> GateOutcome {
        if !transport.is_ready() {
            return GateOutcome::Skipped;
        }

        let (next, action) = self.state.transition(report.is_empty());
        if action == GateAction::Suppress {
            return GateOutcome::Suppressed;
        }

        if let Err(e) = transport.submit_report(id, &report.as_bytes()) {
            warn!("report {} not submitted: {:?}", id.0, e);
            return GateOutcome::Skipped;
        }
        self.state = next;

        match action {
            GateAction::Release => {
                debug!("report {} released", id.0);
                GateOutcome::Released
            }
            _ => {
                trace!("report {}: {:?}", id.0, report);
                GateOutcome::Transmitted
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::tests::MockTransport;
    use crate::transport::TransportError;
    use crate::types::Buttons;

    fn pressed() -> GamepadReport {
        GamepadReport {
            buttons: Buttons::SOUTH,
            ..GamepadReport::neutral()
        }
    }

    #[test]
    fn test_transition_table() {
        assert_eq!(
            EdgeState::Idle.transition(true),
            (EdgeState::Idle, GateAction::Suppress)
        );
        assert_eq!(
            EdgeState::Idle.transition(false),
            (EdgeState::Active, GateAction::Transmit)
        );
        assert_eq!(
            EdgeState::Active.transition(false),
            (EdgeState::Active, GateAction::Transmit)
        );
        assert_eq!(
            EdgeState::Active.transition(true),
            (EdgeState::Idle, GateAction::Release)
        );
    }

    #[test]
    fn test_idle_empty_is_suppressed() {
        let mut gate = ReportGate::new();
        let mut transport = MockTransport::new();
        for _ in 0..5 {
            let outcome = gate.evaluate(ReportId::GAMEPAD, &GamepadReport::neutral(), &mut transport);
            assert_eq!(outcome, GateOutcome::Suppressed);
        }
        assert!(transport.sent.is_empty());
        assert_eq!(gate.state(), EdgeState::Idle);
    }

    #[test]
    fn test_active_run_then_single_release() {
        let mut gate = ReportGate::new();
        let mut transport = MockTransport::new();

        for _ in 0..3 {
            assert_eq!(
                gate.evaluate(ReportId::GAMEPAD, &pressed(), &mut transport),
                GateOutcome::Transmitted
            );
            assert_eq!(gate.state(), EdgeState::Active);
        }
        assert_eq!(
            gate.evaluate(ReportId::GAMEPAD, &GamepadReport::neutral(), &mut transport),
            GateOutcome::Released
        );
        for _ in 0..10 {
            assert_eq!(
                gate.evaluate(ReportId::GAMEPAD, &GamepadReport::neutral(), &mut transport),
                GateOutcome::Suppressed
            );
        }

        assert_eq!(transport.sent.len(), 4);
        let (id, payload) = &transport.sent[3];
        assert_eq!(*id, ReportId::GAMEPAD);
        assert_eq!(payload.as_slice(), &[0u8; GamepadReport::SIZE]);
        assert_eq!(transport.sent[0].1, pressed().as_bytes().to_vec());
    }

    #[test]
    fn test_not_ready_skips_without_state_change() {
        let mut gate = ReportGate::new();
        let mut transport = MockTransport::new();
        transport.ready = false;

        assert_eq!(
            gate.evaluate(ReportId::GAMEPAD, &pressed(), &mut transport),
            GateOutcome::Skipped
        );
        assert_eq!(gate.state(), EdgeState::Idle);

        transport.ready = true;
        gate.evaluate(ReportId::GAMEPAD, &pressed(), &mut transport);
        transport.ready = false;
        assert_eq!(
            gate.evaluate(ReportId::GAMEPAD, &GamepadReport::neutral(), &mut transport),
            GateOutcome::Skipped
        );
        assert_eq!(gate.state(), EdgeState::Active);

        // Release still goes out once the transport is back.
        transport.ready = true;
        assert_eq!(
            gate.evaluate(ReportId::GAMEPAD, &GamepadReport::neutral(), &mut transport),
            GateOutcome::Released
        );
    }

    #[test]
    fn test_submit_failure_is_retried() {
        let mut gate = ReportGate::new();
        let mut transport = MockTransport::new();
        gate.evaluate(ReportId::GAMEPAD, &pressed(), &mut transport);

        transport.fail_next = Some(TransportError::Busy);
        assert_eq!(
            gate.evaluate(ReportId::GAMEPAD, &GamepadReport::neutral(), &mut transport),
            GateOutcome::Skipped
        );
        assert_eq!(gate.state(), EdgeState::Active);
        assert_eq!(
            gate.evaluate(ReportId::GAMEPAD, &GamepadReport::neutral(), &mut transport),
            GateOutcome::Released
        );
        assert_eq!(transport.sent.len(), 2);
    }

    #[test]
    fn test_outcome_is_sent() {
        assert!(GateOutcome::Transmitted.is_sent());
        assert!(GateOutcome::Released.is_sent());
        assert!(!GateOutcome::Suppressed.is_sent());
        assert!(!GateOutcome::Skipped.is_sent());
    }
}
