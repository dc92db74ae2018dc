//! Unipolar stepper coil driver trait
//!
//! Flap modules use 4-coil unipolar steppers (28BYJ-48 class) driven
//! directly through a Darlington array. The driver only knows how to
//! energize the coils for a phase; sequencing and timing live in the
//! flap module.

/// Trait for coil drivers that can energize one phase of the half-step table
pub trait PhaseDriver {
    /// Energize the coils for `index`
    ///
    /// The index is reduced modulo [`PHASE_COUNT`](crate::motion::PHASE_COUNT),
    /// so callers may pass a free-running counter.
    fn apply_phase(&mut self, index: usize);
}

impl<T: PhaseDriver + ?Sized> PhaseDriver for &mut T {
    fn apply_phase(&mut self, index: usize) {
        (**self).apply_phase(index);
    }
}
