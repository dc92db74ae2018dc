//! Drink counter

/// Count of increments since power-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Counter(u32);

impl Counter {
    /// Counter starting at 0
    pub const fn new() -> Self {
        Self(0)
    }

    /// Current value
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Add one, saturating at `u32::MAX`
    pub fn increment(&mut self) -> u32 {
        self.0 = self.0.saturating_add(1);
        self.0
    }
}
