//! Raw I/O capability traits: analog inputs, digital channels, LEDs, and
//! voltage rails.

use opkit_types::OpkitError;

use crate::device::Device;

/// A raw analog input channel.
pub trait AnalogInput: Device {
    /// Current reading in volts.
    fn value(&self) -> f64;
}

/// A bidirectional digital channel.
pub trait DigitalChannel: Device {
    /// Current pin state.
    fn state(&self) -> bool;

    /// Drive the pin high (`true`) or low (`false`).
    ///
    /// # Errors
    ///
    /// Returns an error when the command cannot be applied.
    fn set_state(&self, state: bool) -> Result<(), OpkitError>;
}

/// A discrete indicator LED.
pub trait Led: Device {
    /// Switch the LED on or off.
    ///
    /// # Errors
    ///
    /// Returns an error when the command cannot be applied.
    fn set_enabled(&self, enabled: bool) -> Result<(), OpkitError>;

    /// `true` while the LED is lit.
    fn is_enabled(&self) -> bool;
}

/// A voltage rail monitor.
pub trait VoltageSensor: Device {
    /// Measured rail voltage in volts.
    fn voltage(&self) -> f64;
}
