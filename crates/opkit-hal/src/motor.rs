//! `DcMotor` capability trait for power-controlled rotary actuators.

use opkit_types::OpkitError;

use crate::device::{Device, Direction};

/// A DC motor with open-loop power control and an encoder.
///
/// Drivers implement this trait and are registered with a
/// [`DeviceDirectory`][crate::directory::DeviceDirectory] under the
/// [`DcMotor`][opkit_types::DeviceCapability::DcMotor] capability. Power is
/// on the interval `[-1.0, 1.0]`; encoder positions are raw ticks.
pub trait DcMotor: Device {
    /// Command the motor to run at `power` in `[-1.0, 1.0]`.
    ///
    /// # Errors
    ///
    /// Returns [`OpkitError::DeviceNotFound`] when the backing controller
    /// has gone away, or a driver-specific error when the command cannot be
    /// applied.
    fn set_power(&self, power: f64) -> Result<(), OpkitError>;

    /// The most recently commanded power level.
    fn power(&self) -> f64;

    /// Set the logical spin direction applied to subsequent power commands.
    ///
    /// # Errors
    ///
    /// Returns an error when the command cannot be applied.
    fn set_direction(&self, direction: Direction) -> Result<(), OpkitError>;

    /// The current logical spin direction.
    fn direction(&self) -> Direction;

    /// Latch a target encoder position for run-to-position control.
    ///
    /// # Errors
    ///
    /// Returns an error when the command cannot be applied.
    fn set_target_position(&self, position: i32) -> Result<(), OpkitError>;

    /// The latched target encoder position.
    fn target_position(&self) -> i32;

    /// The current encoder reading in ticks.
    fn current_position(&self) -> i32;
}
