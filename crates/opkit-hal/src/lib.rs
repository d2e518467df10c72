//! `opkit-hal` – Device capabilities, the device directory, and its mock
//!
//! Control units never talk to concrete drivers; they hold shared
//! [`DeviceHandle`][handle::DeviceHandle]s obtained through injection and
//! only ever call capability-trait methods on them. The directory owns the
//! underlying device objects; handles are non-owning references
//! (`close()` is reserved to the directory by convention).
//!
//! # Modules
//!
//! - [`device`] – [`Device`][device::Device]: the generic named-device
//!   capability every handle carries (name, connection info, version,
//!   close), plus the shared [`Direction`][device::Direction] tag.
//! - [`motor`] / [`servo`] – position- and power-controlled actuators.
//! - [`sensor`] – touch, color, gyro, light, ultrasonic, and compass
//!   capabilities.
//! - [`io`] – raw analog/digital channels, LEDs, and voltage rails.
//! - [`handle`] – [`DeviceHandle`][handle::DeviceHandle]: a capability-tagged
//!   shared handle, and [`FromHandle`][handle::FromHandle] for typed
//!   extraction.
//! - [`directory`] – [`DeviceDirectory`][directory::DeviceDirectory]: name →
//!   handle lookup per capability category, with a fixed-order by-name
//!   ("guess") fallback, behind the [`DeviceLookup`][directory::DeviceLookup]
//!   trait.
//! - [`mock`] – [`MockDeviceDirectory`][mock::MockDeviceDirectory]: one
//!   deterministic stub per capability so control units can be constructed
//!   and driven with no hardware attached.

pub mod device;
pub mod directory;
pub mod handle;
pub mod io;
pub mod mock;
pub mod motor;
pub mod sensor;
pub mod servo;

pub use device::{Device, Direction};
pub use directory::{DeviceDirectory, DeviceLookup};
pub use handle::{DeviceHandle, FromHandle};
pub use io::{AnalogInput, DigitalChannel, Led, VoltageSensor};
pub use mock::MockDeviceDirectory;
pub use motor::DcMotor;
pub use sensor::{
    ColorSensor, CompassSensor, GyroSensor, LightSensor, TouchSensor, UltrasonicSensor,
};
pub use servo::Servo;
