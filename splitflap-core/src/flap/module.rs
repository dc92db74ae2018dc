//! Flap module state machine
//!
//! Tracks the believed flap position of one wheel and turns it forward
//! only. The position is updated after the motion has completed, so
//! it always describes the wheel at rest.

use splitflap_hal::StepClock;

use super::calibration::Calibration;
use super::charmap::CharacterMap;
use crate::motion::HomingState;
use crate::traits::{HomeSensor, PhaseDriver};

/// Errors from flap module moves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlapError {
    /// The module has never been homed, its position is unknown
    NotHomed,
    /// Target flap does not exist on this wheel
    InvalidTarget,
}

/// How far the module trusts its position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModuleState {
    /// Not homed since power-up
    Uninitialized,
    /// Homed on the sensor edge
    Homed,
    /// Homing gave up and the position was forced to 0
    Unverified,
}

impl ModuleState {
    /// Check if moves are allowed
    pub fn is_ready(&self) -> bool {
        !matches!(self, ModuleState::Uninitialized)
    }
}

/// Result of a homing run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HomeOutcome {
    /// Edge found after `seek_steps`, then aligned to flap 0
    Found {
        /// Phase-steps spent before the edge was seen
        seek_steps: u32,
    },
    /// No edge within the homing limit; position forced to 0
    Failsafe,
}

/// Result of a character move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CharMove {
    /// The wheel turned by `steps` phase-steps (possibly 0)
    Moved {
        /// Phase-steps issued
        steps: u32,
    },
    /// No flap carries the character, nothing moved
    Ignored,
}

/// One flap wheel with its coil driver and home sensor
pub struct FlapModule<D, S> {
    driver: D,
    sensor: S,
    calibration: Calibration,
    /// Next phase index to apply, free-running across moves
    phase: usize,
    position: u8,
    state: ModuleState,
}

impl<D: PhaseDriver, S: HomeSensor> FlapModule<D, S> {
    /// Create an unhomed module
    pub fn new(driver: D, sensor: S, calibration: Calibration) -> Self {
        Self {
            driver,
            sensor,
            calibration,
            phase: 0,
            position: 0,
            state: ModuleState::Uninitialized,
        }
    }

    /// Believed flap position
    pub fn position(&self) -> u8 {
        self.position
    }

    /// Character currently shown, if the position maps to one
    pub fn current_char(&self) -> Option<char> {
        CharacterMap::char_at(self.position)
    }

    /// Homing state
    pub fn state(&self) -> ModuleState {
        self.state
    }

    /// Calibration constants
    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// Coil driver
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Home sensor
    pub fn sensor(&self) -> &S {
        &self.sensor
    }

    /// Advance the wheel by `steps` phases
    ///
    /// Blocks for `steps` step intervals.
    pub fn rotate_steps<C: StepClock>(&mut self, steps: u32, clock: &mut C) {
        for _ in 0..steps {
            self.driver.apply_phase(self.phase);
            self.phase = (self.phase + 1) % crate::motion::PHASE_COUNT;
            clock.wait_step();
        }
    }

    /// Find the sensor edge and align the wheel to flap 0
    ///
    /// Always leaves the position at 0. When the edge is not found within
    /// the homing limit the module is marked unverified but still usable.
    pub fn home<C: StepClock>(&mut self, clock: &mut C) -> HomeOutcome {
        let mut state = HomingState::start();
        let mut seek_steps = 0;
        let mut outcome = HomeOutcome::Failsafe;

        while seek_steps < self.calibration.homing_limit {
            state = state.observe(self.sensor.is_home());
            if state.is_found() {
                let align = self.calibration.alignment_steps();
                self.rotate_steps(align, clock);
                outcome = HomeOutcome::Found { seek_steps };
                break;
            }
            self.rotate_steps(1, clock);
            seek_steps += 1;
        }

        self.position = 0;
        self.state = match outcome {
            HomeOutcome::Found { .. } => ModuleState::Homed,
            HomeOutcome::Failsafe => ModuleState::Unverified,
        };
        outcome
    }

    /// Turn forward to flap `target`
    ///
    /// Returns the phase-steps issued.
    pub fn move_to<C: StepClock>(&mut self, target: u8, clock: &mut C) -> Result<u32, FlapError> {
        if !self.state.is_ready() {
            return Err(FlapError::NotHomed);
        }
        if target >= self.calibration.flap_count {
            return Err(FlapError::InvalidTarget);
        }

        let flaps = self.calibration.flaps_between(self.position, target);
        let steps = flaps as u32 * self.calibration.steps_per_flip as u32;
        self.rotate_steps(steps, clock);
        self.position = target;
        Ok(steps)
    }

    /// Turn forward to the flap showing `c`
    ///
    /// Characters that no flap carries are ignored.
    pub fn move_to_char<C: StepClock>(
        &mut self,
        c: char,
        clock: &mut C,
    ) -> Result<CharMove, FlapError> {
        match CharacterMap::index_of(c) {
            Some(target) => {
                let steps = self.move_to(target, clock)?;
                Ok(CharMove::Moved { steps })
            }
            None => Ok(CharMove::Ignored),
        }
    }
}
