//! Gamepad report record and its wire encoding.

use crate::types::{Axis, Buttons, Hat};

/// Report identity, carried out-of-band by the transport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReportId(pub u8);

impl ReportId {
    /// Identity of the gamepad input report.
    pub const GAMEPAD: Self = Self(1);
}

/// Gamepad input report.
///
/// Wire layout (11 bytes, after the report id):
///
/// | Offset | Field |
/// |--------|-------|
/// | 0..6   | X, Y, Z, Rz, Rx, Ry (8-bit each) |
/// | 6      | Hat (0 = centered, 1-8 = direction) |
/// | 7..11  | Buttons (u32, little-endian) |
///
/// Axis fields hold the scaled sample (`0..=255`). The byte is sent as-is, so
/// the host sees the same bit pattern as a signed 8-bit value.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GamepadReport {
    /// Left stick X
    pub x: u8,
    /// Left stick Y
    pub y: u8,
    /// Right stick X
    pub z: u8,
    /// Right stick Y
    pub rz: u8,
    /// Left trigger
    pub rx: u8,
    /// Right trigger
    pub ry: u8,
    pub hat: Hat,
    pub buttons: Buttons,
}

impl GamepadReport {
    /// Size of the report payload in bytes.
    pub const SIZE: usize = 11;

    /// Neutral/zero report.
    #[must_use]
    pub const fn neutral() -> Self {
        Self {
            x: 0,
            y: 0,
            z: 0,
            rz: 0,
            rx: 0,
            ry: 0,
            hat: Hat::Centered,
            buttons: Buttons::NONE,
        }
    }

    /// True iff every field holds its neutral value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        Axis::ALL.iter().all(|&axis| self.axis(axis) == 0)
            && self.hat == Hat::Centered
            && self.buttons.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn axis(&self, axis: Axis) -> u8 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
            Axis::Rz => self.rz,
            Axis::Rx => self.rx,
            Axis::Ry => self.ry,
        }
    }

    #[inline]
    pub fn set_axis(&mut self, axis: Axis, value: u8) {
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
            Axis::Z => self.z = value,
            Axis::Rz => self.rz = value,
            Axis::Rx => self.rx = value,
            Axis::Ry => self.ry = value,
        }
    }

    /// Convert the report to its wire bytes.
    #[must_use]
    pub fn as_bytes(&self) -> [u8; Self::SIZE] {
        let buttons_bytes = self.buttons.raw().to_le_bytes();
        [
            self.x,
            self.y,
            self.z,
            self.rz,
            self.rx,
            self.ry,
            self.hat.raw(),
            buttons_bytes[0],
            buttons_bytes[1],
            buttons_bytes[2],
            buttons_bytes[3],
        ]
    }
}
