//! Concrete hardware types and module assembly

use embassy_time::Delay;
use heapless::Vec;

use splitflap_core::config::{DisplayConfig, MAX_MODULES};
use splitflap_core::dispatch::CommandDispatcher;
use splitflap_core::flap::FlapModule;
use splitflap_drivers::sensor::HallSensor;
use splitflap_drivers::stepper::Uln2003;
use splitflap_hal::DelayClock;
use splitflap_hal_rp2040::gpio::{RpInput, RpOutput};
use splitflap_hal_rp2040::pins::{PinBank, PinError};

pub type Coils = Uln2003<RpOutput>;
pub type Sensor = HallSensor<RpInput>;
pub type Module = FlapModule<Coils, Sensor>;
pub type Clock = DelayClock<Delay>;
pub type Dispatcher = CommandDispatcher<Coils, Sensor, Clock, MAX_MODULES>;

/// Claim the pins of every configured module, in digit order
pub fn build_modules(
    config: &DisplayConfig,
    bank: &mut PinBank,
) -> Result<Vec<Module, MAX_MODULES>, PinError> {
    let mut modules = Vec::new();

    for m in config.modules.iter() {
        let [a, b, c, d] = &m.coil_pins;
        let coils = [bank.output(a)?, bank.output(b)?, bank.output(c)?, bank.output(d)?];
        let sensor = HallSensor::new(bank.input(&m.home_pin)?);
        let module = FlapModule::new(
            Uln2003::new(coils, m.reversed),
            sensor,
            m.calibration(config.homing_limit),
        );

        // Both vectors are bounded by MAX_MODULES
        if modules.push(module).is_err() {
            break;
        }
    }

    Ok(modules)
}
