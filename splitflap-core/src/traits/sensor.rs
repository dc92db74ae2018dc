//! Home position sensor trait

/// Binary sensor that reports when a flap wheel passes its reference point
///
/// Reading the sensor must not have side effects.
pub trait HomeSensor {
    /// Returns true while the reference magnet is under the sensor
    fn is_home(&mut self) -> bool;
}

impl<T: HomeSensor + ?Sized> HomeSensor for &mut T {
    fn is_home(&mut self) -> bool {
        (**self).is_home()
    }
}
