//! Reads every registered input once and folds it into a report.

use crate::registry::{InputRegistry, InputSource};
use crate::report::GamepadReport;
use crate::types::{AdcChannel, PinId};

/// Error type for a single hardware read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReadError {
    /// No pin or channel with this id on the board.
    Unmapped,
    /// GPIO read failed.
    Io,
    /// ADC conversion failed.
    Conversion,
}

/// Board-level access to the raw inputs.
///
/// Reads are synchronous and bounded. Implementations must not block.
pub trait InputHardware {
    /// Logic level of a digital pin (`true` = high).
    fn read_pin(&mut self, pin: PinId) -> Result<bool, ReadError>;

    /// Raw conversion result of an ADC channel, at native resolution.
    fn read_analog(&mut self, channel: AdcChannel) -> Result<u16, ReadError>;
}

/// Linear down-scaling from the ADC resolution to the report field width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnalogScale {
    pub raw_bits: u8,
    pub field_bits: u8,
}

impl AnalogScale {
    /// 12-bit ADC into an 8-bit field (divide by 16).
    pub const ADC12_TO_U8: Self = Self {
        raw_bits: 12,
        field_bits: 8,
    };

    /// Scale a raw sample, flooring. Raw values beyond `raw_bits` saturate.
    #[inline]
    #[must_use]
    pub const fn scale(self, raw: u16) -> u8 {
        let shift = self.raw_bits.saturating_sub(self.field_bits);
        let scaled = (raw as u32) >> shift;
        let field_max = if self.field_bits >= 8 {
            u8::MAX as u32
        } else {
            (1u32 << self.field_bits) - 1
        };
        if scaled > field_max {
            field_max as u8
        } else {
            scaled as u8
        }
    }
}

impl Default for AnalogScale {
    fn default() -> Self {
        Self::ADC12_TO_U8
    }
}

/// Turns raw hardware reads into report fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sampler {
    scale: AnalogScale,
}

impl Sampler {
    #[must_use]
    pub const fn new(scale: AnalogScale) -> Self {
        Self { scale }
    }

    #[inline]
    #[must_use]
    pub const fn scale(&self) -> AnalogScale {
        self.scale
    }

    /// Build a fresh report from the current hardware state.
    #[must_use]
    pub fn assemble<H: InputHardware>(
        &self,
        registry: &InputRegistry<'_>,
        hardware: &mut H,
    ) -> GamepadReport {
        let mut report = GamepadReport::neutral();
        self.sample(registry, hardware, &mut report);
        report
    }

    /// Read every source once and apply it to `report`.
    ///
    /// Buttons are pulled up: a pin reading low is pressed and ORs its action
    /// into the mask. A failed read leaves the field at its neutral value.
    pub fn sample<H: InputHardware>(
        &self,
        registry: &InputRegistry<'_>,
        hardware: &mut H,
        report: &mut GamepadReport,
    ) {
        for source in registry {
            match *source {
                InputSource::Button { action, pin } => match hardware.read_pin(pin) {
                    Ok(false) => report.buttons |= action,
                    Ok(true) => {}
                    Err(e) => warn!("pin {} read failed: {:?}", pin.0, e),
                },
                InputSource::Analog { axis, channel } => match hardware.read_analog(channel) {
                    Ok(raw) => report.set_axis(axis, self.scale.scale(raw)),
                    Err(e) => warn!("adc channel {} read failed: {:?}", channel.0, e),
                },
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    extern crate std;

    use super::*;
    use crate::types::{Axis, Buttons, Hat};
    use std::collections::BTreeMap;

    /// Board double: pins default high (released), channels default 0.
    #[derive(Default)]
    pub(crate) struct MockHardware {
        pub pins: BTreeMap<u8, Result<bool, ReadError>>,
        pub adc: BTreeMap<u8, Result<u16, ReadError>>,
        pub pin_reads: usize,
    }

    impl MockHardware {
        pub fn press(&mut self, pin: u8) {
            self.pins.insert(pin, Ok(false));
        }

        pub fn release(&mut self, pin: u8) {
            self.pins.insert(pin, Ok(true));
        }

        pub fn set_adc(&mut self, channel: u8, raw: u16) {
            self.adc.insert(channel, Ok(raw));
        }
    }

    impl InputHardware for MockHardware {
        fn read_pin(&mut self, pin: PinId) -> Result<bool, ReadError> {
            self.pin_reads += 1;
            self.pins.get(&pin.0).copied().unwrap_or(Ok(true))
        }

        fn read_analog(&mut self, channel: AdcChannel) -> Result<u16, ReadError> {
            self.adc.get(&channel.0).copied().unwrap_or(Ok(0))
        }
    }

    static SOURCES: [InputSource; 5] = [
        InputSource::button(Buttons::SOUTH, 7),
        InputSource::button(Buttons::EAST, 8),
        InputSource::button(Buttons::START, 21),
        InputSource::analog(Axis::X, 0),
        InputSource::analog(Axis::Y, 1),
    ];

    static REGISTRY: InputRegistry<'static> = InputRegistry::new(&SOURCES);

    #[test]
    fn test_scale_is_floor_divide_by_16() {
        let scale = AnalogScale::ADC12_TO_U8;
        for raw in 0..=4095u16 {
            assert_eq!(u16::from(scale.scale(raw)), raw / 16, "raw {raw}");
        }
    }

    #[test]
    fn test_scale_boundaries() {
        let scale = AnalogScale::default();
        assert_eq!(scale.scale(0), 0);
        assert_eq!(scale.scale(15), 0);
        assert_eq!(scale.scale(16), 1);
        assert_eq!(scale.scale(2048), 128);
        assert_eq!(scale.scale(4080), 255);
        assert_eq!(scale.scale(4095), 255);
    }

    #[test]
    fn test_scale_saturates_out_of_range_raw() {
        let scale = AnalogScale::ADC12_TO_U8;
        assert_eq!(scale.scale(4096), 255);
        assert_eq!(scale.scale(u16::MAX), 255);

        let narrow = AnalogScale {
            raw_bits: 10,
            field_bits: 4,
        };
        assert_eq!(narrow.scale(1023), 15);
        assert_eq!(narrow.scale(u16::MAX), 15);
    }

    #[test]
    fn test_released_board_gives_neutral_report() {
        let mut hw = MockHardware::default();
        let report = Sampler::default().assemble(&REGISTRY, &mut hw);
        assert!(report.is_empty());
        assert_eq!(hw.pin_reads, 3);
    }

    #[test]
    fn test_south_pressed_alone() {
        let mut hw = MockHardware::default();
        hw.press(7);
        let report = Sampler::default().assemble(&REGISTRY, &mut hw);
        assert_eq!(report.buttons, Buttons::SOUTH);
        assert_eq!(report.x, 0);
        assert_eq!(report.y, 0);
        assert_eq!(report.hat, Hat::Centered);
    }

    #[test]
    fn test_buttons_accumulate_without_overwrite() {
        let mut hw = MockHardware::default();
        hw.press(7);
        hw.press(21);
        hw.release(8);
        let report = Sampler::default().assemble(&REGISTRY, &mut hw);
        assert_eq!(report.buttons, Buttons::SOUTH | Buttons::START);
    }

    #[test]
    fn test_analog_axes_are_scaled() {
        let mut hw = MockHardware::default();
        hw.set_adc(0, 2048);
        hw.set_adc(1, 0);
        let report = Sampler::default().assemble(&REGISTRY, &mut hw);
        assert_eq!(report.x, 128);
        assert_eq!(report.y, 0);
        assert!(report.buttons.is_empty());
        assert!(!report.is_empty());
    }

    #[test]
    fn test_failed_reads_fall_back_to_neutral() {
        let mut hw = MockHardware::default();
        hw.pins.insert(7, Err(ReadError::Io));
        hw.press(8);
        hw.adc.insert(0, Err(ReadError::Conversion));
        hw.set_adc(1, 4095);
        let report = Sampler::default().assemble(&REGISTRY, &mut hw);
        assert_eq!(report.buttons, Buttons::EAST);
        assert_eq!(report.x, 0);
        assert_eq!(report.y, 255);
    }

    #[test]
    fn test_sample_only_sets_bits() {
        let mut hw = MockHardware::default();
        let mut report = GamepadReport::neutral();
        report.buttons = Buttons::MODE;
        Sampler::default().sample(&REGISTRY, &mut hw, &mut report);
        assert_eq!(report.buttons, Buttons::MODE);
    }
}
