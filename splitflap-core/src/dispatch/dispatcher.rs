//! Request dispatcher
//!
//! Owns the counter and the display. One request is handled at a time and
//! each produces exactly one reply; motion blocks until it is finished.

use splitflap_hal::StepClock;
use splitflap_protocol::{Reply, Request};

use super::counter::Counter;
use crate::display::{DisplayController, RenderReport, ResyncReport};
use crate::flap::FlapError;
use crate::traits::{HomeSensor, PhaseDriver};

/// What a request did to the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Activity {
    /// No motion
    Idle,
    /// The counter was rendered
    Rendered(RenderReport),
    /// A module refused to move
    Refused(FlapError),
    /// Every module was homed
    Resynced(ResyncReport),
}

/// Reply to send plus what happened while producing it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Handled {
    /// Response for the transport
    pub reply: Reply,
    /// Motion performed, if any
    pub activity: Activity,
}

/// Outcome of the boot sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BootReport {
    /// Result of homing every module
    pub resync: ResyncReport,
    /// Result of showing the initial count
    pub render: RenderReport,
}

/// Single-owner dispatcher for control requests
pub struct CommandDispatcher<D, S, C, const N: usize> {
    display: DisplayController<D, S, C, N>,
    counter: Counter,
}

impl<D, S, C, const N: usize> CommandDispatcher<D, S, C, N>
where
    D: PhaseDriver,
    S: HomeSensor,
    C: StepClock,
{
    /// Wrap a display; the counter starts at 0
    pub fn new(display: DisplayController<D, S, C, N>) -> Self {
        Self {
            display,
            counter: Counter::new(),
        }
    }

    /// Home every module and show the current count
    pub fn start(&mut self) -> Result<BootReport, FlapError> {
        let resync = self.display.resync();
        let render = self.display.render(self.counter.value())?;
        Ok(BootReport { resync, render })
    }

    /// Current count
    pub fn count(&self) -> u32 {
        self.counter.value()
    }

    /// The display being driven
    pub fn display(&self) -> &DisplayController<D, S, C, N> {
        &self.display
    }

    /// Handle one request
    pub fn dispatch(&mut self, request: Request) -> Handled {
        match request {
            Request::Increment => {
                let value = self.counter.increment();
                match self.display.render(value) {
                    Ok(report) => Handled {
                        reply: Reply::Redirect,
                        activity: Activity::Rendered(report),
                    },
                    Err(e) => Handled {
                        reply: Reply::NotReady,
                        activity: Activity::Refused(e),
                    },
                }
            }
            Request::Resync => Handled {
                reply: Reply::Redirect,
                activity: Activity::Resynced(self.display.resync()),
            },
            Request::Root => Handled {
                reply: Reply::ControlPage {
                    count: self.counter.value(),
                },
                activity: Activity::Idle,
            },
            Request::Unknown => Handled {
                reply: Reply::NotFound,
                activity: Activity::Idle,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flap::{Calibration, FlapModule};
    use crate::sim::{SimClock, SimCoils, SimSensor, SimWheel};
    use heapless::Vec;

    type Dispatcher<'a> = CommandDispatcher<SimCoils<'a>, SimSensor<'a>, SimClock, 4>;

    fn dispatcher(wheels: &[SimWheel]) -> Dispatcher<'_> {
        let cal = Calibration {
            steps_per_flip: 4,
            flap_count: 11,
            offset: 1,
            homing_limit: 100,
        };
        let mut modules = Vec::new();
        for wheel in wheels {
            let m = FlapModule::new(SimCoils::new(wheel), SimSensor::new(wheel), cal);
            assert!(modules.push(m).is_ok());
        }
        CommandDispatcher::new(DisplayController::new(modules, SimClock::new()))
    }

    fn two_wheels() -> [SimWheel; 2] {
        [SimWheel::new(44, Some(20)), SimWheel::new(44, Some(7))]
    }

    #[test]
    fn test_start_homes_and_renders_zero() {
        let wheels = two_wheels();
        let mut d = dispatcher(&wheels);

        let boot = d.start().unwrap();

        assert!(boot.resync.all_found());
        assert_eq!(boot.render.moved_mask, 0b11);
        assert_eq!(d.display().last_rendered(), Some("00"));
        assert_eq!(d.count(), 0);
    }

    #[test]
    fn test_increment_moves_only_ones_digit() {
        let wheels = two_wheels();
        let mut d = dispatcher(&wheels);
        d.start().unwrap();
        wheels[0].reset_steps();
        wheels[1].reset_steps();

        let handled = d.dispatch(Request::Increment);

        assert_eq!(handled.reply, Reply::Redirect);
        assert_eq!(d.count(), 1);
        assert_eq!(d.display().last_rendered(), Some("01"));
        assert_eq!(wheels[0].steps(), 0);
        // '0' is the last flap, '1' follows right after the blank
        assert_eq!(wheels[1].steps(), 2 * 4);
        assert_eq!(d.display().module(1).unwrap().current_char(), Some('1'));
        match handled.activity {
            Activity::Rendered(report) => {
                assert!(!report.moved(0));
                assert!(report.moved(1));
            }
            other => panic!("unexpected activity {:?}", other),
        }
    }

    #[test]
    fn test_increment_before_start_is_not_ready() {
        let wheels = two_wheels();
        let mut d = dispatcher(&wheels);

        let handled = d.dispatch(Request::Increment);

        assert_eq!(handled.reply, Reply::NotReady);
        assert_eq!(handled.activity, Activity::Refused(FlapError::NotHomed));
        assert_eq!(wheels[0].steps() + wheels[1].steps(), 0);
    }

    #[test]
    fn test_resync_redirects_and_keeps_count() {
        let wheels = two_wheels();
        let mut d = dispatcher(&wheels);
        d.start().unwrap();
        d.dispatch(Request::Increment);

        let handled = d.dispatch(Request::Resync);

        assert_eq!(handled.reply, Reply::Redirect);
        assert!(matches!(handled.activity, Activity::Resynced(r) if r.all_found()));
        assert_eq!(d.count(), 1);
        assert_eq!(d.display().module(1).unwrap().position(), 0);
    }

    #[test]
    fn test_root_reports_count_without_motion() {
        let wheels = two_wheels();
        let mut d = dispatcher(&wheels);
        d.start().unwrap();
        d.dispatch(Request::Increment);
        d.dispatch(Request::Increment);
        wheels[0].reset_steps();
        wheels[1].reset_steps();

        let handled = d.dispatch(Request::Root);

        assert_eq!(handled.reply, Reply::ControlPage { count: 2 });
        assert_eq!(handled.activity, Activity::Idle);
        assert_eq!(wheels[0].steps() + wheels[1].steps(), 0);
    }

    #[test]
    fn test_unknown_is_not_found() {
        let wheels = two_wheels();
        let mut d = dispatcher(&wheels);

        let handled = d.dispatch(Request::Unknown);

        assert_eq!(handled.reply, Reply::NotFound);
        assert_eq!(d.count(), 0);
    }

    #[test]
    fn test_render_after_resync_only_moves_changed_digits() {
        let wheels = two_wheels();
        let mut d = dispatcher(&wheels);
        d.start().unwrap();
        d.dispatch(Request::Resync);
        wheels[0].reset_steps();
        wheels[1].reset_steps();

        // Both wheels sit on the blank flap while "00" is remembered
        d.dispatch(Request::Increment);

        assert_eq!(wheels[0].steps(), 0);
        assert_eq!(d.display().module(0).unwrap().current_char(), Some(' '));
        assert_eq!(d.display().module(1).unwrap().current_char(), Some('1'));
    }
}
