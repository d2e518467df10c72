//! Sensor capability traits: touch, color, gyro, light, ultrasonic, compass.
//!
//! Sensor reads are plain values; only commands that change device state
//! (LED toggles, calibration) are fallible.

use opkit_types::OpkitError;

use crate::device::Device;

/// A momentary touch/limit switch.
pub trait TouchSensor: Device {
    /// `true` while the switch is held down.
    fn is_pressed(&self) -> bool;

    /// Raw analog value of the switch, `0.0` when released.
    fn value(&self) -> f64;
}

/// An RGB(A) color sensor with a controllable illumination LED.
pub trait ColorSensor: Device {
    /// Red channel reading.
    fn red(&self) -> i32;

    /// Green channel reading.
    fn green(&self) -> i32;

    /// Blue channel reading.
    fn blue(&self) -> i32;

    /// Alpha (overall brightness) channel reading.
    fn alpha(&self) -> i32;

    /// Switch the illumination LED on or off.
    ///
    /// # Errors
    ///
    /// Returns an error when the command cannot be applied.
    fn set_led_enabled(&self, enabled: bool) -> Result<(), OpkitError>;
}

/// A single-axis gyroscope reporting integrated heading.
pub trait GyroSensor: Device {
    /// Integrated heading in whole degrees, `[0, 360)`.
    fn heading(&self) -> i32;

    /// Begin a calibration cycle; poll [`GyroSensor::is_calibrating`] for
    /// completion.
    ///
    /// # Errors
    ///
    /// Returns an error when the command cannot be applied.
    fn calibrate(&self) -> Result<(), OpkitError>;

    /// `true` while a calibration cycle is in progress.
    fn is_calibrating(&self) -> bool;
}

/// An ambient/reflected light sensor.
pub trait LightSensor: Device {
    /// Detected light level, `0.0` (dark) to `1.0` (saturated).
    fn light_detected(&self) -> f64;

    /// Switch the illumination LED on or off.
    ///
    /// # Errors
    ///
    /// Returns an error when the command cannot be applied.
    fn set_led_enabled(&self, enabled: bool) -> Result<(), OpkitError>;
}

/// An ultrasonic range finder.
pub trait UltrasonicSensor: Device {
    /// Raw echo level; `0.0` when nothing is in range.
    fn level(&self) -> f64;
}

/// A magnetic compass.
pub trait CompassSensor: Device {
    /// Current heading in degrees, `[0.0, 360.0)`.
    fn direction_degrees(&self) -> f64;
}
