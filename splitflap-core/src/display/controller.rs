//! Display controller
//!
//! Owns the ordered flap modules (index 0 is the most significant digit)
//! and the step clock they share. Only one module moves at a time.

use heapless::{String, Vec};
use splitflap_hal::StepClock;

use super::digits::format_digits;
use crate::flap::{CharMove, FlapError, FlapModule, HomeOutcome};
use crate::traits::{HomeSensor, PhaseDriver};

/// Most modules one controller drives; report masks hold one bit per module
pub const MAX_WIDTH: usize = 8;

/// Mask bit for module `index`
fn bit(index: usize) -> u8 {
    1u8.checked_shl(index as u32).unwrap_or(0)
}

/// Summary of a render pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RenderReport {
    /// Bit i set when module i was driven
    pub moved_mask: u8,
    /// Modules whose digit did not change
    pub unchanged: u8,
    /// Modules that had no flap for their character
    pub ignored: u8,
    /// Total phase-steps issued
    pub steps: u32,
}

impl RenderReport {
    /// Check if module `index` was driven
    pub fn moved(&self, index: usize) -> bool {
        self.moved_mask & bit(index) != 0
    }
}

/// Summary of a resync pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ResyncReport {
    /// Modules that found their sensor edge
    pub homed: u8,
    /// Bit i set when module i hit the homing limit
    pub failsafe_mask: u8,
}

impl ResyncReport {
    /// Check if every module found its edge
    pub fn all_found(&self) -> bool {
        self.failsafe_mask == 0
    }
}

/// Row of flap modules showing one number
///
/// `N` bounds the module count and the rendered string length. It may not
/// exceed [`MAX_WIDTH`]; wider controllers fail to build.
pub struct DisplayController<D, S, C, const N: usize> {
    modules: Vec<FlapModule<D, S>, N>,
    clock: C,
    last_rendered: Option<String<N>>,
}

impl<D, S, C, const N: usize> DisplayController<D, S, C, N>
where
    D: PhaseDriver,
    S: HomeSensor,
    C: StepClock,
{
    const WIDTH_OK: () = assert!(N <= MAX_WIDTH, "display controller is wider than MAX_WIDTH");

    /// Create a controller over `modules`, most significant digit first
    pub fn new(modules: Vec<FlapModule<D, S>, N>, clock: C) -> Self {
        let () = Self::WIDTH_OK;
        Self {
            modules,
            clock,
            last_rendered: None,
        }
    }

    /// Number of digits
    pub fn width(&self) -> usize {
        self.modules.len()
    }

    /// Digits shown by the last successful render
    pub fn last_rendered(&self) -> Option<&str> {
        self.last_rendered.as_deref()
    }

    /// Module at `index`
    pub fn module(&self, index: usize) -> Option<&FlapModule<D, S>> {
        self.modules.get(index)
    }

    /// All modules in digit order
    pub fn modules(&self) -> &[FlapModule<D, S>] {
        &self.modules
    }

    /// Step clock
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Show `value`, moving only modules whose digit changed
    ///
    /// The first render drives every module. If a module refuses to move
    /// the last rendered digits are forgotten, so the next render drives
    /// every module again.
    pub fn render(&mut self, value: u32) -> Result<RenderReport, FlapError> {
        let digits: String<N> = format_digits(value, self.modules.len());
        let previous = self.last_rendered.take();
        let previous = previous.as_ref().map(|s| s.as_bytes());
        let mut report = RenderReport::default();

        for (i, (module, &digit)) in self
            .modules
            .iter_mut()
            .zip(digits.as_bytes().iter())
            .enumerate()
        {
            if previous.and_then(|p| p.get(i)) == Some(&digit) {
                report.unchanged += 1;
                continue;
            }

            match module.move_to_char(digit as char, &mut self.clock)? {
                CharMove::Moved { steps } => {
                    report.moved_mask |= bit(i);
                    report.steps += steps;
                }
                CharMove::Ignored => report.ignored += 1,
            }
        }

        self.last_rendered = Some(digits);
        Ok(report)
    }

    /// Home every module in digit order
    ///
    /// Does not touch the last rendered digits.
    pub fn resync(&mut self) -> ResyncReport {
        let mut report = ResyncReport::default();
        for (i, module) in self.modules.iter_mut().enumerate() {
            match module.home(&mut self.clock) {
                HomeOutcome::Found { .. } => report.homed += 1,
                HomeOutcome::Failsafe => report.failsafe_mask |= bit(i),
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::MAX_DIGITS;
    use crate::flap::Calibration;
    use crate::sim::{SimClock, SimCoils, SimSensor, SimWheel};

    type Module<'a> = FlapModule<SimCoils<'a>, SimSensor<'a>>;

    fn cal() -> Calibration {
        Calibration {
            steps_per_flip: 4,
            flap_count: 11,
            offset: 0,
            homing_limit: 200,
        }
    }

    fn display<'a>(
        wheels: &'a [SimWheel],
    ) -> DisplayController<SimCoils<'a>, SimSensor<'a>, SimClock, 4> {
        let mut modules: Vec<Module<'a>, 4> = Vec::new();
        for wheel in wheels {
            let m = FlapModule::new(SimCoils::new(wheel), SimSensor::new(wheel), cal());
            assert!(modules.push(m).is_ok());
        }
        DisplayController::new(modules, SimClock::new())
    }

    fn reset(wheels: &[SimWheel]) {
        for w in wheels {
            w.reset_steps();
        }
    }

    #[test]
    fn test_render_before_resync_fails() {
        let wheels = [SimWheel::new(44, Some(0)), SimWheel::new(44, Some(0))];
        let mut d = display(&wheels);

        assert_eq!(d.render(1), Err(FlapError::NotHomed));
        assert_eq!(d.last_rendered(), None);
    }

    #[test]
    fn test_first_render_drives_every_module() {
        let wheels = [SimWheel::new(44, Some(0)), SimWheel::new(44, Some(0))];
        let mut d = display(&wheels);
        assert!(d.resync().all_found());

        let report = d.render(0).unwrap();

        assert!(report.moved(0));
        assert!(report.moved(1));
        assert_eq!(report.unchanged, 0);
        assert_eq!(d.last_rendered(), Some("00"));
        assert_eq!(d.module(0).unwrap().current_char(), Some('0'));
        assert_eq!(d.module(1).unwrap().current_char(), Some('0'));
    }

    #[test]
    fn test_only_changed_digits_move() {
        let wheels = [SimWheel::new(44, Some(0)), SimWheel::new(44, Some(0))];
        let mut d = display(&wheels);
        d.resync();
        d.render(3).unwrap();
        reset(&wheels);

        let report = d.render(4).unwrap();

        assert!(!report.moved(0));
        assert!(report.moved(1));
        assert_eq!(report.unchanged, 1);
        assert_eq!(wheels[0].steps(), 0);
        assert_eq!(wheels[1].steps(), 4);
        assert_eq!(d.last_rendered(), Some("04"));
    }

    #[test]
    fn test_identical_render_moves_nothing() {
        let wheels = [SimWheel::new(44, Some(0)), SimWheel::new(44, Some(0))];
        let mut d = display(&wheels);
        d.resync();
        d.render(12).unwrap();
        reset(&wheels);

        let report = d.render(12).unwrap();

        assert_eq!(report.moved_mask, 0);
        assert_eq!(report.unchanged, 2);
        assert_eq!(wheels[0].steps() + wheels[1].steps(), 0);
    }

    #[test]
    fn test_render_wraps_past_width() {
        let wheels = [SimWheel::new(44, Some(0)), SimWheel::new(44, Some(0))];
        let mut d = display(&wheels);
        d.resync();
        d.render(99).unwrap();

        d.render(100).unwrap();

        assert_eq!(d.last_rendered(), Some("00"));
    }

    #[test]
    fn test_resync_keeps_last_rendered() {
        let wheels = [SimWheel::new(44, Some(0)), SimWheel::new(44, None)];
        let mut d = display(&wheels);
        d.resync();
        d.render(5).unwrap();

        let report = d.resync();

        assert_eq!(report.homed, 1);
        assert_eq!(report.failsafe_mask, 0b10);
        assert!(!report.all_found());
        assert_eq!(d.last_rendered(), Some("05"));
        assert_eq!(d.module(0).unwrap().position(), 0);
        assert_eq!(d.module(1).unwrap().position(), 0);
    }

    #[test]
    fn test_widest_display_fits_digit_formatter() {
        assert!(MAX_WIDTH <= MAX_DIGITS);
    }

    #[test]
    fn test_widest_display_drives_every_module() {
        let wheels: [SimWheel; MAX_WIDTH] = core::array::from_fn(|_| SimWheel::new(44, Some(0)));
        let mut modules: Vec<Module<'_>, MAX_WIDTH> = Vec::new();
        for wheel in &wheels {
            let m = FlapModule::new(SimCoils::new(wheel), SimSensor::new(wheel), cal());
            assert!(modules.push(m).is_ok());
        }
        let mut d = DisplayController::new(modules, SimClock::new());
        assert_eq!(d.resync().homed as usize, MAX_WIDTH);

        let report = d.render(12_345_678).unwrap();

        assert_eq!(report.moved_mask, 0xFF);
        assert!(report.moved(MAX_WIDTH - 1));
        assert_eq!(d.last_rendered(), Some("12345678"));
        assert_eq!(d.module(MAX_WIDTH - 1).unwrap().current_char(), Some('8'));
    }

    #[test]
    fn test_width_follows_module_count() {
        let wheels = [
            SimWheel::new(44, Some(0)),
            SimWheel::new(44, Some(0)),
            SimWheel::new(44, Some(0)),
        ];
        let mut d = display(&wheels);
        d.resync();

        d.render(7).unwrap();

        assert_eq!(d.width(), 3);
        assert_eq!(d.last_rendered(), Some("007"));
    }
}
