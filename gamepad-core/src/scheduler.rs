//! Non-blocking periodic tasks driven by a wrapping millisecond clock.

use crate::config::BlinkIntervals;
use crate::status::ConnectionState;
use embedded_hal::digital::{OutputPin, PinState};

/// A periodic activity: fires when `interval_ms` has elapsed since the
/// previous firing.
///
/// Timestamps are `u32` milliseconds compared with wrapping subtraction, so
/// the clock may wrap. `last_fire_ms` advances by exact multiples of the
/// interval, never to "now", so a long cycle does not shift the cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PeriodicTask {
    interval_ms: u32,
    last_fire_ms: u32,
}

impl PeriodicTask {
    /// Task with the given period, anchored at t = 0.
    ///
    /// An interval of 0 disables the task.
    #[must_use]
    pub const fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            last_fire_ms: 0,
        }
    }

    /// Task with the given period whose first firing is due at
    /// `now_ms + interval_ms`.
    #[must_use]
    pub const fn starting_at(interval_ms: u32, now_ms: u32) -> Self {
        Self {
            interval_ms,
            last_fire_ms: now_ms,
        }
    }

    #[inline]
    #[must_use]
    pub const fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    #[inline]
    #[must_use]
    pub const fn last_fire_ms(&self) -> u32 {
        self.last_fire_ms
    }

    #[inline]
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.interval_ms != 0
    }

    /// Change the period without moving the last firing time.
    #[inline]
    pub fn set_interval(&mut self, interval_ms: u32) {
        self.interval_ms = interval_ms;
    }

    /// Returns `true` if the task is due at `now_ms`, and consumes that tick.
    ///
    /// After an overrun of several intervals, whole intervals are dropped so
    /// that at most one catch-up tick follows.
    pub fn poll(&mut self, now_ms: u32) -> bool {
        let interval = self.interval_ms;
        if interval == 0 || now_ms.wrapping_sub(self.last_fire_ms) < interval {
            return false;
        }
        self.last_fire_ms = self.last_fire_ms.wrapping_add(interval);

        let missed = now_ms.wrapping_sub(self.last_fire_ms) / interval;
        if missed > 1 {
            self.last_fire_ms = self
                .last_fire_ms
                .wrapping_add((missed - 1).wrapping_mul(interval));
        }
        true
    }
}

/// Blinks a status LED at a rate reflecting the connectivity state.
#[derive(Debug, Clone, Copy)]
pub struct StatusIndicator {
    task: PeriodicTask,
    intervals: BlinkIntervals,
    lit: bool,
}

impl StatusIndicator {
    #[must_use]
    pub const fn new(intervals: BlinkIntervals) -> Self {
        Self {
            task: PeriodicTask::new(intervals.not_mounted_ms),
            intervals,
            lit: false,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_lit(&self) -> bool {
        self.lit
    }

    #[inline]
    #[must_use]
    pub const fn task(&self) -> &PeriodicTask {
        &self.task
    }

    /// Toggle `led` if the blink period for `state` has elapsed.
    ///
    /// Returns `true` if the LED was written.
    pub fn poll<L: OutputPin>(&mut self, now_ms: u32, state: ConnectionState, led: &mut L) -> bool {
        self.task.set_interval(self.intervals.for_state(state));
        if !self.task.poll(now_ms) {
            return false;
        }
        // A failed write only costs one blink.
        let _ = led.set_state(PinState::from(self.lit));
        self.lit = !self.lit;
        true
    }
}
