//! USB HID gamepad firmware for RP2040.
//!
//! This crate provides the board-specific half of the gamepad: GPIO and ADC
//! access, and the USB HID transport. All sampling, gating and scheduling
//! lives in [`gamepad_core`].
//!
//! # Overview
//!
//! The firmware runs on a Raspberry Pi Pico (RP2040) and:
//! 1. Samples seven buttons and one analog stick every 10 ms
//! 2. Sends a gamepad report while any input is active, plus one release
//!    report when input returns to neutral
//! 3. Blinks the status LED at a rate reflecting the USB state
//!    (250 ms not mounted, 1 s mounted, 2.5 s suspended)
//!
//! See [`board`] for the pin map.
//!
//! # Architecture
//!
//! The firmware uses the Embassy async runtime with three tasks:
//!
//! - **USB Task**: Runs the USB device stack and issues remote wakeups
//! - **HID Writer Task**: Writes queued reports and signals completion
//! - **Gamepad Task**: Cooperative loop polling the [`GamepadController`]
//!
//! The gamepad task never awaits the USB stack. Reports are handed over
//! through a [`HidLink`], and bus events land in a
//! [`DeviceStatus`](gamepad_core::DeviceStatus) the loop reads on its next
//! iteration.
//!
//! # Features
//!
//! - **`dev-panic`** (default): Use `panic-probe` for development (prints panic info via RTT)
//! - **`prod-panic`**: Use `panic-reset` for production (silent watchdog reset)

#![no_std]

#[cfg(all(feature = "dev-panic", feature = "prod-panic"))]
compile_error!("Cannot enable both `dev-panic` and `prod-panic` features");

// Re-export core types for convenience
pub use gamepad_core::{
    Buttons, ConnectionState, ControllerConfig, DeviceStatus, GamepadController, GamepadReport,
    InputRegistry, InputSource, ReportId, ReportSlot,
};

pub mod board;
pub mod usb_output;

pub use board::BoardInputs;
pub use usb_output::{
    configure_usb_hid, GamepadRequestHandler, GamepadWriter, HidLink, UsbDriver, UsbHandler,
    UsbTransport,
};
