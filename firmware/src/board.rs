//! Pin map and input hardware of the gamepad board.
//!
//! | Function | GPIO | Source |
//! |----------|------|--------|
//! | North    | 5    | button, pull-up |
//! | West     | 6    | button, pull-up |
//! | South    | 7    | button, pull-up |
//! | East     | 8    | button, pull-up |
//! | Mode     | 9    | button, pull-up |
//! | Select   | 20   | button, pull-up |
//! | Start    | 21   | button, pull-up |
//! | LED      | 18   | status indicator |
//! | Stick X  | 26   | ADC0 |
//! | Stick Y  | 27   | ADC1 |

use embassy_rp::adc::{Adc, Blocking, Channel};
use embassy_rp::gpio::Input;
use embedded_hal::digital::InputPin;
use gamepad_core::{
    AdcChannel, Axis, Buttons, InputHardware, InputRegistry, InputSource, PinId, ReadError,
};

pub const BUTTON_COUNT: usize = 7;
pub const STICK_COUNT: usize = 2;

pub static SOURCES: [InputSource; BUTTON_COUNT + STICK_COUNT] = [
    InputSource::button(Buttons::SOUTH, 7),
    InputSource::button(Buttons::EAST, 8),
    InputSource::button(Buttons::NORTH, 5),
    InputSource::button(Buttons::WEST, 6),
    InputSource::button(Buttons::MODE, 9),
    InputSource::button(Buttons::SELECT, 20),
    InputSource::button(Buttons::START, 21),
    InputSource::analog(Axis::X, 0),
    InputSource::analog(Axis::Y, 1),
];

/// Input map of the board, checked at build time.
pub static REGISTRY: InputRegistry<'static> = InputRegistry::new(&SOURCES);

/// Button GPIOs and stick ADC channels of the board.
pub struct BoardInputs<'d> {
    buttons: [(PinId, Input<'d>); BUTTON_COUNT],
    adc: Adc<'d, Blocking>,
    sticks: [(AdcChannel, Channel<'d>); STICK_COUNT],
}

impl<'d> BoardInputs<'d> {
    /// Create the board inputs. Buttons must be configured with pull-ups.
    #[must_use]
    pub fn new(
        buttons: [(PinId, Input<'d>); BUTTON_COUNT],
        adc: Adc<'d, Blocking>,
        sticks: [(AdcChannel, Channel<'d>); STICK_COUNT],
    ) -> Self {
        Self {
            buttons,
            adc,
            sticks,
        }
    }
}

impl InputHardware for BoardInputs<'_> {
    fn read_pin(&mut self, pin: PinId) -> Result<bool, ReadError> {
        let (_, input) = self
            .buttons
            .iter_mut()
            .find(|(id, _)| *id == pin)
            .ok_or(ReadError::Unmapped)?;
        InputPin::is_high(input).map_err(|_| ReadError::Io)
    }

    fn read_analog(&mut self, channel: AdcChannel) -> Result<u16, ReadError> {
        let (_, stick) = self
            .sticks
            .iter_mut()
            .find(|(id, _)| *id == channel)
            .ok_or(ReadError::Unmapped)?;
        self.adc
            .blocking_read(stick)
            .map_err(|_| ReadError::Conversion)
    }
}
