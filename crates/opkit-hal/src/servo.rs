//! `Servo` capability trait for position-controlled actuators.

use opkit_types::OpkitError;

use crate::device::{Device, Direction};

/// A hobby-style servo commanded to absolute positions in `[0.0, 1.0]`.
///
/// Drivers implement this trait and are registered with a
/// [`DeviceDirectory`][crate::directory::DeviceDirectory] under the
/// [`Servo`][opkit_types::DeviceCapability::Servo] capability.
pub trait Servo: Device {
    /// Command the servo to `position` in `[0.0, 1.0]`.
    ///
    /// # Errors
    ///
    /// Returns an error when the command cannot be applied.
    fn set_position(&self, position: f64) -> Result<(), OpkitError>;

    /// The most recently commanded position.
    fn position(&self) -> f64;

    /// Set the logical travel direction applied to subsequent commands.
    ///
    /// # Errors
    ///
    /// Returns an error when the command cannot be applied.
    fn set_direction(&self, direction: Direction) -> Result<(), OpkitError>;

    /// The current logical travel direction.
    fn direction(&self) -> Direction;
}
