//! Half-step phase table for 4-coil unipolar steppers
//!
//! ```text
//! phase   A  B  C  D
//!   0     1  0  0  0
//!   1     1  1  0  0
//!   2     0  1  0  0
//!   3     0  1  1  0
//!   4     0  0  1  0
//!   5     0  0  1  1
//!   6     0  0  0  1
//!   7     1  0  0  1
//! ```
//!
//! Walking the table forward turns the rotor one way, walking it backwards
//! turns it the other way. Adjacent rows (including 7 -> 0) differ in
//! exactly one coil.

/// Number of coils driven per motor
pub const COIL_COUNT: usize = 4;

/// Number of phases in one electrical cycle
pub const PHASE_COUNT: usize = 8;

/// Coil energization for a single phase
pub type StepPhase = [bool; COIL_COUNT];

/// The 28BYJ-48 half-step sequence
pub const HALF_STEP_SEQUENCE: [StepPhase; PHASE_COUNT] = [
    [true, false, false, false],
    [true, true, false, false],
    [false, true, false, false],
    [false, true, true, false],
    [false, false, true, false],
    [false, false, true, true],
    [false, false, false, true],
    [true, false, false, true],
];

/// Look up the coil pattern for a free-running phase index
#[inline]
pub fn phase_at(index: usize) -> StepPhase {
    HALF_STEP_SEQUENCE[index % PHASE_COUNT]
}
