//! [`MockDeviceDirectory`] – deterministic stand-in for a real directory.
//!
//! One stub device per capability category, built eagerly at construction
//! and returned for every lookup regardless of the requested name. Stubs
//! read neutral values, accept and discard every write, and never fail, so
//! control units can be constructed and driven with no hardware attached
//! and identical results from run to run.

use std::collections::HashMap;
use std::sync::Arc;

use opkit_types::{DeviceCapability, OpkitError};
use tracing::debug;

use crate::device::{Device, Direction};
use crate::directory::DeviceLookup;
use crate::handle::DeviceHandle;
use crate::io::{AnalogInput, DigitalChannel, Led, VoltageSensor};
use crate::motor::DcMotor;
use crate::sensor::{
    ColorSensor, CompassSensor, GyroSensor, LightSensor, TouchSensor, UltrasonicSensor,
};
use crate::servo::Servo;

// ────────────────────────────────────────────────────────────────────────────
// Stub device
// ────────────────────────────────────────────────────────────────────────────

// One generic stub stands in for every capability: reads are the type's
// neutral value, writes are discarded, close() is a no-op. The stub holds no
// state at all, which is what makes it safe to share across concurrently
// running control units.
struct StubDevice {
    name: String,
    capability: DeviceCapability,
}

impl StubDevice {
    fn new(capability: DeviceCapability) -> Self {
        Self {
            name: format!("stub {capability}"),
            capability,
        }
    }
}

impl Device for StubDevice {
    fn name(&self) -> &str {
        &self.name
    }

    fn connection_info(&self) -> String {
        format!("mock directory ({})", self.capability)
    }

    fn version(&self) -> i32 {
        0
    }

    fn close(&self) {}
}

impl DcMotor for StubDevice {
    fn set_power(&self, _power: f64) -> Result<(), OpkitError> {
        Ok(())
    }

    fn power(&self) -> f64 {
        0.0
    }

    fn set_direction(&self, _direction: Direction) -> Result<(), OpkitError> {
        Ok(())
    }

    fn direction(&self) -> Direction {
        Direction::Forward
    }

    fn set_target_position(&self, _position: i32) -> Result<(), OpkitError> {
        Ok(())
    }

    fn target_position(&self) -> i32 {
        0
    }

    fn current_position(&self) -> i32 {
        0
    }
}

impl Servo for StubDevice {
    fn set_position(&self, _position: f64) -> Result<(), OpkitError> {
        Ok(())
    }

    fn position(&self) -> f64 {
        0.0
    }

    fn set_direction(&self, _direction: Direction) -> Result<(), OpkitError> {
        Ok(())
    }

    fn direction(&self) -> Direction {
        Direction::Forward
    }
}

impl TouchSensor for StubDevice {
    fn is_pressed(&self) -> bool {
        false
    }

    fn value(&self) -> f64 {
        0.0
    }
}

impl ColorSensor for StubDevice {
    fn red(&self) -> i32 {
        0
    }

    fn green(&self) -> i32 {
        0
    }

    fn blue(&self) -> i32 {
        0
    }

    fn alpha(&self) -> i32 {
        0
    }

    fn set_led_enabled(&self, _enabled: bool) -> Result<(), OpkitError> {
        Ok(())
    }
}

impl GyroSensor for StubDevice {
    fn heading(&self) -> i32 {
        0
    }

    fn calibrate(&self) -> Result<(), OpkitError> {
        Ok(())
    }

    fn is_calibrating(&self) -> bool {
        false
    }
}

impl LightSensor for StubDevice {
    fn light_detected(&self) -> f64 {
        0.0
    }

    fn set_led_enabled(&self, _enabled: bool) -> Result<(), OpkitError> {
        Ok(())
    }
}

impl UltrasonicSensor for StubDevice {
    fn level(&self) -> f64 {
        0.0
    }
}

impl CompassSensor for StubDevice {
    fn direction_degrees(&self) -> f64 {
        0.0
    }
}

impl AnalogInput for StubDevice {
    fn value(&self) -> f64 {
        0.0
    }
}

impl DigitalChannel for StubDevice {
    fn state(&self) -> bool {
        false
    }

    fn set_state(&self, _state: bool) -> Result<(), OpkitError> {
        Ok(())
    }
}

impl Led for StubDevice {
    fn set_enabled(&self, _enabled: bool) -> Result<(), OpkitError> {
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        false
    }
}

impl VoltageSensor for StubDevice {
    fn voltage(&self) -> f64 {
        0.0
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Mock directory
// ────────────────────────────────────────────────────────────────────────────

/// A [`DeviceLookup`] whose every lookup succeeds with a pre-built stub.
///
/// Every device of a given capability is the *same* stub instance within
/// one directory, so two lookups with different names return handles that
/// are [`ptr_eq`][DeviceHandle::ptr_eq].
///
/// # Example
///
/// ```
/// use opkit_hal::{DeviceLookup, MockDeviceDirectory};
/// use opkit_types::DeviceCapability;
///
/// let mock = MockDeviceDirectory::new();
/// let a = mock.get_exact("anything", DeviceCapability::Servo).unwrap();
/// let b = mock.get_exact("anything_else", DeviceCapability::Servo).unwrap();
/// assert!(a.ptr_eq(&b));
/// ```
#[derive(Debug)]
pub struct MockDeviceDirectory {
    stubs: HashMap<DeviceCapability, DeviceHandle>,
}

impl MockDeviceDirectory {
    /// Build the directory with one stub per capability in
    /// [`DeviceCapability::ALL`], eagerly and exactly once.
    pub fn new() -> Self {
        let mut stubs = HashMap::with_capacity(DeviceCapability::ALL.len());
        for capability in DeviceCapability::ALL {
            stubs.insert(capability, stub_handle(capability));
        }
        debug!(stubs = stubs.len(), "built mock device directory");
        Self { stubs }
    }

    /// The pre-built stub for `capability`.
    pub fn stub(&self, capability: DeviceCapability) -> Option<&DeviceHandle> {
        self.stubs.get(&capability)
    }
}

impl Default for MockDeviceDirectory {
    fn default() -> Self {
        Self::new()
    }
}

fn stub_handle(capability: DeviceCapability) -> DeviceHandle {
    let stub = Arc::new(StubDevice::new(capability));
    match capability {
        DeviceCapability::DcMotor => DeviceHandle::DcMotor(stub),
        DeviceCapability::Servo => DeviceHandle::Servo(stub),
        DeviceCapability::TouchSensor => DeviceHandle::TouchSensor(stub),
        DeviceCapability::ColorSensor => DeviceHandle::ColorSensor(stub),
        DeviceCapability::GyroSensor => DeviceHandle::GyroSensor(stub),
        DeviceCapability::LightSensor => DeviceHandle::LightSensor(stub),
        DeviceCapability::UltrasonicSensor => DeviceHandle::UltrasonicSensor(stub),
        DeviceCapability::CompassSensor => DeviceHandle::CompassSensor(stub),
        DeviceCapability::AnalogInput => DeviceHandle::AnalogInput(stub),
        DeviceCapability::DigitalChannel => DeviceHandle::DigitalChannel(stub),
        DeviceCapability::Led => DeviceHandle::Led(stub),
        DeviceCapability::VoltageSensor => DeviceHandle::VoltageSensor(stub),
    }
}

impl DeviceLookup for MockDeviceDirectory {
    /// The requested name is ignored; the per-capability stub is returned.
    fn get_exact(
        &self,
        name: &str,
        capability: DeviceCapability,
    ) -> Result<DeviceHandle, OpkitError> {
        self.stubs
            .get(&capability)
            .cloned()
            .ok_or_else(|| OpkitError::DeviceNotFound {
                name: name.to_string(),
                capability: Some(capability),
            })
    }

    /// The requested name is ignored; the stub for the first category in
    /// the fixed search order is returned, so guess lookups always succeed.
    fn get_by_guess(&self, name: &str) -> Result<DeviceHandle, OpkitError> {
        self.get_exact(name, DeviceCapability::ALL[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::FromHandle;

    #[test]
    fn every_capability_has_a_stub() {
        let mock = MockDeviceDirectory::new();
        for capability in DeviceCapability::ALL {
            let handle = mock.get_exact("anything", capability).unwrap();
            assert_eq!(handle.capability(), capability);
        }
    }

    #[test]
    fn lookups_ignore_name_and_share_identity() {
        let mock = MockDeviceDirectory::new();
        let a = mock
            .get_exact("anything", DeviceCapability::Servo)
            .unwrap();
        let b = mock
            .get_exact("anything_else", DeviceCapability::Servo)
            .unwrap();
        assert!(a.ptr_eq(&b));
    }

    #[test]
    fn stub_identity_is_stable_across_repeated_lookups() {
        let mock = MockDeviceDirectory::new();
        let first = mock.get_by_guess("whatever").unwrap();
        for _ in 0..3 {
            assert!(mock.get_by_guess("other").unwrap().ptr_eq(&first));
        }
    }

    #[test]
    fn guess_resolves_to_first_search_category() {
        let mock = MockDeviceDirectory::new();
        let handle = mock.get_by_guess("no_such_device").unwrap();
        assert_eq!(handle.capability(), DeviceCapability::DcMotor);
    }

    #[test]
    fn stub_reads_are_neutral() {
        let mock = MockDeviceDirectory::new();

        let servo: Arc<dyn Servo> = FromHandle::from_handle(
            &mock.get_exact("arm", DeviceCapability::Servo).unwrap(),
        )
        .unwrap();
        assert_eq!(servo.position(), 0.0);

        let touch: Arc<dyn TouchSensor> = FromHandle::from_handle(
            &mock
                .get_exact("bumper", DeviceCapability::TouchSensor)
                .unwrap(),
        )
        .unwrap();
        assert!(!touch.is_pressed());

        let color: Arc<dyn ColorSensor> = FromHandle::from_handle(
            &mock
                .get_exact("line", DeviceCapability::ColorSensor)
                .unwrap(),
        )
        .unwrap();
        assert_eq!(
            (color.red(), color.green(), color.blue(), color.alpha()),
            (0, 0, 0, 0)
        );
    }

    #[test]
    fn stub_writes_are_accepted_and_discarded() {
        let mock = MockDeviceDirectory::new();
        let motor: Arc<dyn DcMotor> = FromHandle::from_handle(
            &mock
                .get_exact("motor_left", DeviceCapability::DcMotor)
                .unwrap(),
        )
        .unwrap();

        motor.set_power(0.75).unwrap();
        motor.set_direction(Direction::Reverse).unwrap();
        motor.set_target_position(1440).unwrap();

        assert_eq!(motor.power(), 0.0);
        assert_eq!(motor.direction(), Direction::Forward);
        assert_eq!(motor.target_position(), 0);
    }

    #[test]
    fn stub_close_is_a_noop() {
        let mock = MockDeviceDirectory::new();
        let handle = mock.get_exact("anything", DeviceCapability::Led).unwrap();
        handle.as_device().close();
        // Still usable after close.
        assert!(mock.get_exact("anything", DeviceCapability::Led).is_ok());
    }
}
