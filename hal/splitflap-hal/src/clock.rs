//! Step timing abstraction
//!
//! Stepper motors lose steps silently when phases are applied faster than
//! the rotor can follow. All motion goes through a [`StepClock`] so the
//! inter-phase delay is fixed in one place and can be simulated in tests.

use embedded_hal::delay::DelayNs;

/// Default inter-phase delay for a 28BYJ-48 in half-step mode
pub const DEFAULT_STEP_INTERVAL_US: u32 = 2_000;

/// Blocking delay between two consecutive motor phases
pub trait StepClock {
    /// Block until the next phase may be applied
    fn wait_step(&mut self);
}

/// [`StepClock`] backed by any blocking `embedded-hal` delay provider
pub struct DelayClock<D> {
    delay: D,
    interval_us: u32,
}

impl<D: DelayNs> DelayClock<D> {
    /// Create a clock that waits `interval_us` microseconds per step
    pub fn new(delay: D, interval_us: u32) -> Self {
        Self { delay, interval_us }
    }

    /// Configured inter-phase delay in microseconds
    pub fn interval_us(&self) -> u32 {
        self.interval_us
    }
}

impl<D: DelayNs> StepClock for DelayClock<D> {
    fn wait_step(&mut self) {
        self.delay.delay_us(self.interval_us);
    }
}
