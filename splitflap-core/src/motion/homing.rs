//! Homing edge detection
//!
//! A flap wheel carries one magnet. Homing advances the wheel one phase at
//! a time until the sensor goes from "not home" to "home". Sitting on the
//! magnet is not enough: only the edge fixes the mechanical reference.

/// Homing state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HomingState {
    /// Still looking for the edge, remembering the previous sample
    Seeking {
        /// Whether the last sample read "home"
        previous_home: bool,
    },
    /// The sensor edge has been seen
    FoundEdge,
}

impl HomingState {
    /// Start a fresh search
    ///
    /// The previous sample is primed as "not home", so a wheel that is
    /// already parked on its magnet counts as an edge on the first sample.
    pub const fn start() -> Self {
        HomingState::Seeking {
            previous_home: false,
        }
    }

    /// Feed one sensor sample
    pub fn observe(self, home: bool) -> Self {
        match self {
            HomingState::Seeking { previous_home } => {
                if home && !previous_home {
                    HomingState::FoundEdge
                } else {
                    HomingState::Seeking {
                        previous_home: home,
                    }
                }
            }
            HomingState::FoundEdge => HomingState::FoundEdge,
        }
    }

    /// Check if the edge has been seen
    pub fn is_found(&self) -> bool {
        matches!(self, HomingState::FoundEdge)
    }
}

impl Default for HomingState {
    fn default() -> Self {
        Self::start()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(samples: &[bool]) -> Option<usize> {
        let mut state = HomingState::start();
        for (i, &s) in samples.iter().enumerate() {
            state = state.observe(s);
            if state.is_found() {
                return Some(i);
            }
        }
        None
    }

    #[test]
    fn test_falling_edge_found() {
        assert_eq!(run(&[false, false, true, true]), Some(2));
    }

    #[test]
    fn test_parked_on_magnet_counts_as_edge() {
        assert_eq!(run(&[true, true]), Some(0));
    }

    #[test]
    fn test_never_home() {
        assert_eq!(run(&[false; 32]), None);
    }

    #[test]
    fn test_found_edge_is_sticky() {
        let state = HomingState::FoundEdge.observe(false);
        assert!(state.is_found());
    }

    #[test]
    fn test_leaving_home_rearms() {
        let state = HomingState::Seeking {
            previous_home: true,
        }
        .observe(true);
        assert!(!state.is_found());

        let state = state.observe(false).observe(true);
        assert!(state.is_found());
    }
}
