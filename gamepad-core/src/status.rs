//! USB connectivity state shared between bus callbacks and the main loop.

use portable_atomic::{AtomicBool, AtomicU8, Ordering};

/// Bus connectivity as seen by the device.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ConnectionState {
    #[default]
    NotMounted = 0,
    Mounted = 1,
    Suspended = 2,
}

impl ConnectionState {
    const fn from_raw(raw: u8) -> Self {
        match raw {
            1 => ConnectionState::Mounted,
            2 => ConnectionState::Suspended,
            _ => ConnectionState::NotMounted,
        }
    }
}

/// Connectivity flags written from USB notifications.
///
/// Every notification is a single atomic store, so it is safe to call from
/// the USB stack's context. The main loop observes the result on its next
/// iteration.
#[derive(Debug)]
pub struct DeviceStatus {
    state: AtomicU8,
    remote_wakeup_enabled: AtomicBool,
}

impl DeviceStatus {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: AtomicU8::new(ConnectionState::NotMounted as u8),
            remote_wakeup_enabled: AtomicBool::new(false),
        }
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> ConnectionState {
        ConnectionState::from_raw(self.state.load(Ordering::Acquire))
    }

    #[inline]
    #[must_use]
    pub fn is_suspended(&self) -> bool {
        self.state() == ConnectionState::Suspended
    }

    #[inline]
    #[must_use]
    pub fn remote_wakeup_enabled(&self) -> bool {
        self.remote_wakeup_enabled.load(Ordering::Acquire)
    }

    /// Device configured by the host.
    pub fn on_mount(&self) {
        self.set(ConnectionState::Mounted);
    }

    /// Device deconfigured or unplugged.
    pub fn on_unmount(&self) {
        self.set(ConnectionState::NotMounted);
    }

    /// Bus suspended. `remote_wakeup_enabled` is the host's permission for
    /// this device to signal resume.
    pub fn on_suspend(&self, remote_wakeup_enabled: bool) {
        self.remote_wakeup_enabled
            .store(remote_wakeup_enabled, Ordering::Release);
        self.set(ConnectionState::Suspended);
    }

    /// Bus resumed.
    pub fn on_resume(&self) {
        self.set(ConnectionState::Mounted);
    }

    /// Host changed the remote wakeup feature outside of a suspend.
    pub fn set_remote_wakeup_enabled(&self, enabled: bool) {
        self.remote_wakeup_enabled.store(enabled, Ordering::Release);
    }

    fn set(&self, state: ConnectionState) {
        let previous = self.state.swap(state as u8, Ordering::AcqRel);
        if previous != state as u8 {
            info!("usb {:?}", state);
        }
    }
}

impl Default for DeviceStatus {
    fn default() -> Self {
        Self::new()
    }
}
