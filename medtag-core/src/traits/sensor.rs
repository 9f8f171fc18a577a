//! Sensor Acquisition Seam
//!
//! The board support code owns the I2C/one-wire drivers and implements
//! [`SampleSource`]. Reads must return promptly; a failed read reports
//! `f32::NAN` rather than blocking or erroring, and the trackers treat NaN as
//! a transient glitch.

/// Three-axis acceleration in units of standard gravity
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Acceleration {
    /// X axis (g)
    pub x: f32,
    /// Y axis (g)
    pub y: f32,
    /// Z axis (g)
    pub z: f32,
}

impl Acceleration {
    /// Reading from three axes
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean norm (g)
    pub fn magnitude(&self) -> f32 {
        libm::sqrtf(self.x * self.x + self.y * self.y + self.z * self.z)
    }
}

/// Raw readings from the tag's sensors
pub trait SampleSource {
    /// Probe temperature in °C, `NAN` if the read failed
    fn read_temperature(&mut self) -> f32;

    /// Cell voltage; some power-chip backends report volts, others millivolts
    fn read_voltage(&mut self) -> f32;

    /// Current acceleration
    fn read_acceleration(&mut self) -> Acceleration;
}

impl<T: SampleSource + ?Sized> SampleSource for &mut T {
    fn read_temperature(&mut self) -> f32 {
        (**self).read_temperature()
    }

    fn read_voltage(&mut self) -> f32 {
        (**self).read_voltage()
    }

    fn read_acceleration(&mut self) -> Acceleration {
        (**self).read_acceleration()
    }
}
