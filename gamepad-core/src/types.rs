//! Core gamepad types: Buttons, Hat, Axis and hardware addressing.

use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

/// Button state represented as a 32-bit action mask.
///
/// One bit per logical action. The named actions follow the conventional
/// HID gamepad layout (bit 0 = South / A).
///
/// # Example
///
/// ```
/// use gamepad_core::Buttons;
///
/// let buttons = Buttons::SOUTH | Buttons::EAST;
/// assert!(buttons.contains(Buttons::SOUTH));
/// assert!(!buttons.contains(Buttons::NORTH));
/// ```
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Buttons(pub u32);

impl Buttons {
    pub const SOUTH: Self = Self(1 << 0); // A
    pub const EAST: Self = Self(1 << 1); // B
    pub const C: Self = Self(1 << 2);
    pub const NORTH: Self = Self(1 << 3); // X
    pub const WEST: Self = Self(1 << 4); // Y
    pub const Z: Self = Self(1 << 5);
    pub const TL: Self = Self(1 << 6); // Left bumper
    pub const TR: Self = Self(1 << 7); // Right bumper
    pub const TL2: Self = Self(1 << 8);
    pub const TR2: Self = Self(1 << 9);
    pub const SELECT: Self = Self(1 << 10);
    pub const START: Self = Self(1 << 11);
    pub const MODE: Self = Self(1 << 12); // Home
    pub const THUMBL: Self = Self(1 << 13);
    pub const THUMBR: Self = Self(1 << 14);

    /// No buttons pressed.
    pub const NONE: Self = Self(0);

    /// Check if the given button(s) are pressed.
    #[inline]
    #[must_use]
    pub const fn contains(self, button: Buttons) -> bool {
        (self.0 & button.0) == button.0
    }

    /// Check if any bit is shared with `other`.
    #[inline]
    #[must_use]
    pub const fn intersects(self, other: Buttons) -> bool {
        (self.0 & other.0) != 0
    }

    /// Set or clear button(s).
    #[inline]
    pub fn set(&mut self, button: Buttons, pressed: bool) {
        if pressed {
            self.0 |= button.0;
        } else {
            self.0 &= !button.0;
        }
    }

    /// Get the raw u32 value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Check if no buttons are pressed.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Buttons {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Buttons {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Buttons {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl BitAndAssign for Buttons {
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl Not for Buttons {
    type Output = Self;

    #[inline]
    fn not(self) -> Self::Output {
        Self(!self.0)
    }
}

/// Hat switch (D-pad) direction.
///
/// `Centered` is the neutral value and encodes as 0 on the wire.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Hat {
    #[default]
    Centered = 0,
    Up = 1,
    UpRight = 2,
    Right = 3,
    DownRight = 4,
    Down = 5,
    DownLeft = 6,
    Left = 7,
    UpLeft = 8,
}

impl Hat {
    /// Decode a wire value. Returns `None` outside `0..=8`.
    #[must_use]
    pub const fn from_raw(raw: u8) -> Option<Self> {
        Some(match raw {
            0 => Hat::Centered,
            1 => Hat::Up,
            2 => Hat::UpRight,
            3 => Hat::Right,
            4 => Hat::DownRight,
            5 => Hat::Down,
            6 => Hat::DownLeft,
            7 => Hat::Left,
            8 => Hat::UpLeft,
            _ => return None,
        })
    }

    #[inline]
    #[must_use]
    pub const fn raw(self) -> u8 {
        self as u8
    }
}

/// Analog axis fields of the report, in wire order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Axis {
    /// Left stick horizontal.
    X = 0,
    /// Left stick vertical.
    Y = 1,
    /// Right stick horizontal.
    Z = 2,
    /// Right stick vertical.
    Rz = 3,
    /// Left trigger.
    Rx = 4,
    /// Right trigger.
    Ry = 5,
}

impl Axis {
    pub const ALL: [Axis; 6] = [Axis::X, Axis::Y, Axis::Z, Axis::Rz, Axis::Rx, Axis::Ry];

    /// Byte offset of this axis in the report payload.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// GPIO number of a digital input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinId(pub u8);

/// ADC input channel of an analog input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AdcChannel(pub u8);
