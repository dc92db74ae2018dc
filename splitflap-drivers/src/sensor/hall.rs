//! Hall effect home sensor
//!
//! Open-collector hall switches pull the line low while the magnet is
//! present, so the sensor is active-low and needs a pull-up.

use splitflap_core::traits::HomeSensor;
use splitflap_hal::InputPin;

/// Active-low hall switch
pub struct HallSensor<P> {
    pin: P,
}

impl<P: InputPin> HallSensor<P> {
    /// Create a sensor on `pin`
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Release the pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: InputPin> HomeSensor for HallSensor<P> {
    fn is_home(&mut self) -> bool {
        self.pin.is_low()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockPin {
        high: bool,
    }

    impl InputPin for MockPin {
        fn is_high(&self) -> bool {
            self.high
        }
    }

    #[test]
    fn test_low_is_home() {
        let mut sensor = HallSensor::new(MockPin { high: false });
        assert!(sensor.is_home());
    }

    #[test]
    fn test_high_is_away() {
        let mut sensor = HallSensor::new(MockPin { high: true });
        assert!(!sensor.is_home());
        assert!(sensor.into_inner().high);
    }
}
