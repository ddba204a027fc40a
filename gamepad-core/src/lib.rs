//! Platform-agnostic input sampling, report gating and scheduling for a USB
//! HID gamepad.
//!
//! This crate holds everything between the board's pins and the USB stack
//! without depending on either. It can be used both in embedded `no_std`
//! environments and on host for testing.
//!
//! # Overview
//!
//! One report cycle flows through the modules in order:
//!
//! - [`registry`]: static input map ([`InputRegistry`], [`InputSource`])
//! - [`sampler`]: reads the hardware into a report ([`Sampler`], [`InputHardware`])
//! - [`report`]: the 11-byte gamepad report ([`GamepadReport`])
//! - [`gate`]: send/suppress/release policy ([`ReportGate`])
//! - [`transport`]: USB stack interface ([`ReportTransport`])
//!
//! Around it, [`scheduler`] provides the periodic tasks, [`status`] the
//! connectivity flags written by USB callbacks, and [`controller`] the
//! context object that owns all of it ([`GamepadController`]).
//!
//! # Example
//!
//! ```
//! use gamepad_core::{Buttons, GamepadReport, Hat};
//!
//! let mut report = GamepadReport::neutral();
//! assert!(report.is_empty());
//!
//! report.buttons |= Buttons::SOUTH;
//! assert!(!report.is_empty());
//! assert_eq!(report.as_bytes()[7], 0x01);
//! assert_eq!(report.hat, Hat::Centered);
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Log through defmt and derive `defmt::Format` (embedded)
//! - **`log`**: Log through the `log` facade
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations,
//! making it suitable for embedded systems with limited resources.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

// This must go first so the logging macros are visible to the other modules.
mod fmt;

pub mod config;
pub mod controller;
pub mod gate;
pub mod registry;
pub mod report;
pub mod sampler;
pub mod scheduler;
pub mod status;
pub mod transport;
pub mod types;

// Re-export main types at crate root
pub use config::{BlinkIntervals, ControllerConfig, TimingConfig};
pub use controller::{CycleOutcome, GamepadController, ReportSlot};
pub use gate::{EdgeState, GateAction, GateOutcome, ReportGate};
pub use registry::{InputRegistry, InputSource, RegistryError};
pub use report::{GamepadReport, ReportId};
pub use sampler::{AnalogScale, InputHardware, ReadError, Sampler};
pub use scheduler::{PeriodicTask, StatusIndicator};
pub use status::{ConnectionState, DeviceStatus};
pub use transport::{HidRequests, ReportTransport, ReportType, TransportError};
pub use types::{AdcChannel, Axis, Buttons, Hat, PinId};
