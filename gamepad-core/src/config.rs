//! Timing and scaling configuration.

use crate::sampler::AnalogScale;
use crate::status::ConnectionState;

/// Status LED blink periods per connectivity state, in milliseconds.
///
/// A period of 0 turns the indicator off in that state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BlinkIntervals {
    pub not_mounted_ms: u32,
    pub mounted_ms: u32,
    pub suspended_ms: u32,
}

impl BlinkIntervals {
    pub const DEFAULT: Self = Self {
        not_mounted_ms: 250,
        mounted_ms: 1000,
        suspended_ms: 2500,
    };

    #[must_use]
    pub const fn for_state(&self, state: ConnectionState) -> u32 {
        match state {
            ConnectionState::NotMounted => self.not_mounted_ms,
            ConnectionState::Mounted => self.mounted_ms,
            ConnectionState::Suspended => self.suspended_ms,
        }
    }
}

impl Default for BlinkIntervals {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimingConfig {
    /// Period of the sample-and-report cycle.
    pub report_interval_ms: u32,
    pub blink: BlinkIntervals,
}

impl TimingConfig {
    pub const DEFAULT: Self = Self {
        report_interval_ms: 10,
        blink: BlinkIntervals::DEFAULT,
    };
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Everything the controller needs besides its collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControllerConfig {
    pub timing: TimingConfig,
    pub analog: AnalogScale,
}

impl ControllerConfig {
    pub const DEFAULT: Self = Self {
        timing: TimingConfig::DEFAULT,
        analog: AnalogScale::ADC12_TO_U8,
    };
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_blink_intervals() {
        let blink = BlinkIntervals::default();
        assert_eq!(blink.for_state(ConnectionState::NotMounted), 250);
        assert_eq!(blink.for_state(ConnectionState::Mounted), 1000);
        assert_eq!(blink.for_state(ConnectionState::Suspended), 2500);
    }

    #[test]
    fn test_default_timing() {
        let config = ControllerConfig::default();
        assert_eq!(config.timing.report_interval_ms, 10);
        assert_eq!(config.analog, AnalogScale::ADC12_TO_U8);
    }
}
