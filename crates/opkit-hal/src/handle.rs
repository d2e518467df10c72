//! [`DeviceHandle`] – a capability-tagged shared reference to a device.
//!
//! The directory owns the underlying device objects; control units receive
//! cloned handles through injection and share them read-only. Identity is
//! meaningful: two handles compare [`ptr_eq`][DeviceHandle::ptr_eq] exactly
//! when they refer to the same underlying device instance.

use std::fmt;
use std::sync::Arc;

use opkit_types::DeviceCapability;

use crate::device::Device;
use crate::io::{AnalogInput, DigitalChannel, Led, VoltageSensor};
use crate::motor::DcMotor;
use crate::sensor::{
    ColorSensor, CompassSensor, GyroSensor, LightSensor, TouchSensor, UltrasonicSensor,
};
use crate::servo::Servo;

/// A shared handle to a device of exactly one capability category.
#[derive(Clone)]
pub enum DeviceHandle {
    DcMotor(Arc<dyn DcMotor>),
    Servo(Arc<dyn Servo>),
    TouchSensor(Arc<dyn TouchSensor>),
    ColorSensor(Arc<dyn ColorSensor>),
    GyroSensor(Arc<dyn GyroSensor>),
    LightSensor(Arc<dyn LightSensor>),
    UltrasonicSensor(Arc<dyn UltrasonicSensor>),
    CompassSensor(Arc<dyn CompassSensor>),
    AnalogInput(Arc<dyn AnalogInput>),
    DigitalChannel(Arc<dyn DigitalChannel>),
    Led(Arc<dyn Led>),
    VoltageSensor(Arc<dyn VoltageSensor>),
}

impl DeviceHandle {
    /// The capability category this handle was registered under.
    pub fn capability(&self) -> DeviceCapability {
        match self {
            DeviceHandle::DcMotor(_) => DeviceCapability::DcMotor,
            DeviceHandle::Servo(_) => DeviceCapability::Servo,
            DeviceHandle::TouchSensor(_) => DeviceCapability::TouchSensor,
            DeviceHandle::ColorSensor(_) => DeviceCapability::ColorSensor,
            DeviceHandle::GyroSensor(_) => DeviceCapability::GyroSensor,
            DeviceHandle::LightSensor(_) => DeviceCapability::LightSensor,
            DeviceHandle::UltrasonicSensor(_) => DeviceCapability::UltrasonicSensor,
            DeviceHandle::CompassSensor(_) => DeviceCapability::CompassSensor,
            DeviceHandle::AnalogInput(_) => DeviceCapability::AnalogInput,
            DeviceHandle::DigitalChannel(_) => DeviceCapability::DigitalChannel,
            DeviceHandle::Led(_) => DeviceCapability::Led,
            DeviceHandle::VoltageSensor(_) => DeviceCapability::VoltageSensor,
        }
    }

    /// View the handle through the generic named-device capability.
    pub fn as_device(&self) -> &dyn Device {
        match self {
            DeviceHandle::DcMotor(d) => d.as_ref(),
            DeviceHandle::Servo(d) => d.as_ref(),
            DeviceHandle::TouchSensor(d) => d.as_ref(),
            DeviceHandle::ColorSensor(d) => d.as_ref(),
            DeviceHandle::GyroSensor(d) => d.as_ref(),
            DeviceHandle::LightSensor(d) => d.as_ref(),
            DeviceHandle::UltrasonicSensor(d) => d.as_ref(),
            DeviceHandle::CompassSensor(d) => d.as_ref(),
            DeviceHandle::AnalogInput(d) => d.as_ref(),
            DeviceHandle::DigitalChannel(d) => d.as_ref(),
            DeviceHandle::Led(d) => d.as_ref(),
            DeviceHandle::VoltageSensor(d) => d.as_ref(),
        }
    }

    /// The configured name of the underlying device.
    pub fn name(&self) -> &str {
        self.as_device().name()
    }

    /// `true` when both handles refer to the same underlying device
    /// instance (not merely devices with equal names).
    pub fn ptr_eq(&self, other: &DeviceHandle) -> bool {
        use DeviceHandle::*;
        match (self, other) {
            (DcMotor(a), DcMotor(b)) => Arc::ptr_eq(a, b),
            (Servo(a), Servo(b)) => Arc::ptr_eq(a, b),
            (TouchSensor(a), TouchSensor(b)) => Arc::ptr_eq(a, b),
            (ColorSensor(a), ColorSensor(b)) => Arc::ptr_eq(a, b),
            (GyroSensor(a), GyroSensor(b)) => Arc::ptr_eq(a, b),
            (LightSensor(a), LightSensor(b)) => Arc::ptr_eq(a, b),
            (UltrasonicSensor(a), UltrasonicSensor(b)) => Arc::ptr_eq(a, b),
            (CompassSensor(a), CompassSensor(b)) => Arc::ptr_eq(a, b),
            (AnalogInput(a), AnalogInput(b)) => Arc::ptr_eq(a, b),
            (DigitalChannel(a), DigitalChannel(b)) => Arc::ptr_eq(a, b),
            (Led(a), Led(b)) => Arc::ptr_eq(a, b),
            (VoltageSensor(a), VoltageSensor(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for DeviceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceHandle")
            .field("name", &self.name())
            .field("capability", &self.capability())
            .finish()
    }
}

/// Typed extraction of a capability-trait object out of a [`DeviceHandle`].
///
/// One generic mechanism instead of an accessor per capability: the
/// injection engine resolves a handle, then the control unit pulls the
/// trait object it declared, e.g. `Arc<dyn DcMotor>`.
pub trait FromHandle: Sized {
    /// The capability this extraction accepts.
    const CAPABILITY: DeviceCapability;

    /// Extract from `handle`, or `None` when the capability differs.
    fn from_handle(handle: &DeviceHandle) -> Option<Self>;
}

// Capability variants and their traits share names, so one identifier
// covers both sides of the extraction.
macro_rules! impl_from_handle {
    ($($name:ident),+ $(,)?) => {
        $(
            impl FromHandle for Arc<dyn $name> {
                const CAPABILITY: DeviceCapability = DeviceCapability::$name;

                fn from_handle(handle: &DeviceHandle) -> Option<Self> {
                    match handle {
                        DeviceHandle::$name(d) => Some(d.clone()),
                        _ => None,
                    }
                }
            }
        )+
    };
}

impl_from_handle!(
    DcMotor,
    Servo,
    TouchSensor,
    ColorSensor,
    GyroSensor,
    LightSensor,
    UltrasonicSensor,
    CompassSensor,
    AnalogInput,
    DigitalChannel,
    Led,
    VoltageSensor,
);
