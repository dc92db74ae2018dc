//! ULN2003 driver for 28BYJ-48 unipolar steppers
//!
//! Each of the four GPIOs switches one coil through the Darlington array.
//! The driver writes one row of the half-step table per call; a reversed
//! module walks the table from the other end, turning the wheel the other
//! way with the same phase indices.

use splitflap_core::motion::{phase_at, COIL_COUNT, PHASE_COUNT};
use splitflap_core::traits::PhaseDriver;
use splitflap_hal::OutputPin;

/// Four-coil ULN2003 driver
pub struct Uln2003<P> {
    coils: [P; COIL_COUNT],
    reversed: bool,
}

impl<P: OutputPin> Uln2003<P> {
    /// Create a driver with all coils de-energized
    ///
    /// `coils` are the pins wired to IN1..IN4.
    pub fn new(coils: [P; COIL_COUNT], reversed: bool) -> Self {
        let mut driver = Self { coils, reversed };
        for coil in driver.coils.iter_mut() {
            coil.set_low();
        }
        driver
    }

    /// Check if the phase table is walked backwards
    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// Coil pins in IN1..IN4 order
    pub fn coils(&self) -> &[P; COIL_COUNT] {
        &self.coils
    }
}

impl<P: OutputPin> PhaseDriver for Uln2003<P> {
    fn apply_phase(&mut self, index: usize) {
        let index = if self.reversed {
            PHASE_COUNT - 1 - index % PHASE_COUNT
        } else {
            index
        };

        for (coil, &on) in self.coils.iter_mut().zip(phase_at(index).iter()) {
            coil.set_state(on);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use splitflap_core::motion::HALF_STEP_SEQUENCE;

    struct MockPin {
        high: bool,
    }

    impl MockPin {
        fn new() -> Self {
            Self { high: true }
        }
    }

    impl OutputPin for MockPin {
        fn set_high(&mut self) {
            self.high = true;
        }

        fn set_low(&mut self) {
            self.high = false;
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    fn levels(driver: &Uln2003<MockPin>) -> [bool; COIL_COUNT] {
        let c = driver.coils();
        [
            c[0].is_set_high(),
            c[1].is_set_high(),
            c[2].is_set_high(),
            c[3].is_set_high(),
        ]
    }

    fn driver(reversed: bool) -> Uln2003<MockPin> {
        Uln2003::new(
            [MockPin::new(), MockPin::new(), MockPin::new(), MockPin::new()],
            reversed,
        )
    }

    #[test]
    fn test_new_releases_coils() {
        let d = driver(false);
        assert_eq!(levels(&d), [false; COIL_COUNT]);
    }

    #[test]
    fn test_forward_sequence() {
        let mut d = driver(false);
        for i in 0..PHASE_COUNT {
            d.apply_phase(i);
            assert_eq!(levels(&d), HALF_STEP_SEQUENCE[i]);
        }
    }

    #[test]
    fn test_reversed_sequence() {
        let mut d = driver(true);
        assert!(d.is_reversed());

        d.apply_phase(0);
        assert_eq!(levels(&d), [true, false, false, true]);
        d.apply_phase(1);
        assert_eq!(levels(&d), [false, false, false, true]);
        d.apply_phase(7);
        assert_eq!(levels(&d), [true, false, false, false]);
    }

    #[test]
    fn test_index_wraps() {
        let mut d = driver(false);
        d.apply_phase(PHASE_COUNT + 2);
        assert_eq!(levels(&d), HALF_STEP_SEQUENCE[2]);

        let mut d = driver(true);
        d.apply_phase(PHASE_COUNT);
        assert_eq!(levels(&d), HALF_STEP_SEQUENCE[7]);
    }
}
