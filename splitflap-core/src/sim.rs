//! Simulated flap wheel for host tests
//!
//! The wheel counts phase-steps applied by [`SimCoils`] and reports the
//! magnet through [`SimSensor`] whenever its angle falls inside the magnet
//! window.

use core::cell::Cell;

use splitflap_hal::StepClock;

use crate::traits::{HomeSensor, PhaseDriver};

/// Steps for which the magnet stays under the sensor
const MAGNET_WIDTH: u32 = 3;

pub struct SimWheel {
    total: Cell<u32>,
    counted: Cell<u32>,
    revolution: u32,
    magnet: Option<u32>,
}

impl SimWheel {
    /// Wheel of `revolution` phase-steps with the magnet starting at `magnet`
    pub fn new(revolution: u32, magnet: Option<u32>) -> Self {
        Self {
            total: Cell::new(0),
            counted: Cell::new(0),
            revolution,
            magnet,
        }
    }

    /// Steps applied since creation or the last [`reset_steps`](Self::reset_steps)
    pub fn steps(&self) -> u32 {
        self.counted.get()
    }

    pub fn reset_steps(&self) {
        self.counted.set(0);
    }

    /// Mechanical angle in phase-steps
    pub fn angle(&self) -> u32 {
        self.total.get() % self.revolution
    }

    fn advance(&self) {
        self.total.set(self.total.get() + 1);
        self.counted.set(self.counted.get() + 1);
    }

    fn magnet_present(&self) -> bool {
        match self.magnet {
            Some(start) => {
                let angle = self.angle();
                angle >= start && angle < start + MAGNET_WIDTH
            }
            None => false,
        }
    }
}

pub struct SimCoils<'a> {
    wheel: &'a SimWheel,
    last_phase: Option<usize>,
}

impl<'a> SimCoils<'a> {
    pub fn new(wheel: &'a SimWheel) -> Self {
        Self {
            wheel,
            last_phase: None,
        }
    }

    pub fn last_phase(&self) -> Option<usize> {
        self.last_phase
    }
}

impl PhaseDriver for SimCoils<'_> {
    fn apply_phase(&mut self, index: usize) {
        self.last_phase = Some(index);
        self.wheel.advance();
    }
}

pub struct SimSensor<'a> {
    wheel: &'a SimWheel,
}

impl<'a> SimSensor<'a> {
    pub fn new(wheel: &'a SimWheel) -> Self {
        Self { wheel }
    }
}

impl HomeSensor for SimSensor<'_> {
    fn is_home(&mut self) -> bool {
        self.wheel.magnet_present()
    }
}

pub struct SimClock {
    ticks: u32,
}

impl SimClock {
    pub fn new() -> Self {
        Self { ticks: 0 }
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }
}

impl StepClock for SimClock {
    fn wait_step(&mut self) {
        self.ticks += 1;
    }
}
