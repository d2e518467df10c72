//! Built-in demo control units.
//!
//! These exist so `opkit run` has something real to drive against the mock
//! directory; they double as worked examples of the injection plan /
//! assemble pairing.

use std::sync::Arc;

use opkit_control::{Bindings, ControlUnit, Injectable, InjectionPlan, UnitDescriptor};
use opkit_hal::{ColorSensor, DcMotor, GyroSensor, TouchSensor};
use opkit_types::{DeviceCapability, OpkitError};
use tracing::{info, warn};

/// Every demo unit the CLI registers, in listing order.
pub fn descriptors() -> Vec<UnitDescriptor> {
    vec![
        UnitDescriptor::of::<TankDrive>("TankDrive"),
        UnitDescriptor::of::<SensorSweep>("SensorSweep"),
    ]
}

/// Two-motor drive base running at a configured cruise speed.
pub struct TankDrive {
    motor_left: Arc<dyn DcMotor>,
    motor_right: Arc<dyn DcMotor>,
    motor_speed: f64,
    red_team: bool,
}

impl ControlUnit for TankDrive {
    fn init(&mut self) {
        info!(
            red_team = self.red_team,
            speed = self.motor_speed,
            "tank drive ready"
        );
    }

    fn loop_once(&mut self) {
        if let Err(err) = self.motor_left.set_power(self.motor_speed) {
            warn!(error = %err, "left motor rejected power command");
        }
        if let Err(err) = self.motor_right.set_power(self.motor_speed) {
            warn!(error = %err, "right motor rejected power command");
        }
    }

    fn stop(&mut self) {
        let _ = self.motor_left.set_power(0.0);
        let _ = self.motor_right.set_power(0.0);
    }
}

impl Injectable for TankDrive {
    fn plan() -> InjectionPlan {
        InjectionPlan::new()
            .value("motor_speed", 1.0)
            .value("red_team", false)
            .device("motor_left", DeviceCapability::DcMotor)
            .device("motor_right", DeviceCapability::DcMotor)
    }

    fn assemble(bindings: &Bindings) -> Result<Self, OpkitError> {
        Ok(TankDrive {
            motor_left: bindings.device("motor_left")?,
            motor_right: bindings.device("motor_right")?,
            motor_speed: bindings.value("motor_speed")?,
            red_team: bindings.value("red_team")?,
        })
    }
}

/// Reads a bank of sensors each tick and reports their values.
pub struct SensorSweep {
    touch: Arc<dyn TouchSensor>,
    line_color: Arc<dyn ColorSensor>,
    gyro: Arc<dyn GyroSensor>,
    sample_count: i64,
    samples_taken: i64,
}

impl ControlUnit for SensorSweep {
    fn init(&mut self) {
        if let Err(err) = self.gyro.calibrate() {
            warn!(error = %err, "gyro calibration failed");
        }
    }

    fn loop_once(&mut self) {
        if self.samples_taken >= self.sample_count {
            return;
        }
        self.samples_taken += 1;
        info!(
            sample = self.samples_taken,
            pressed = self.touch.is_pressed(),
            red = self.line_color.red(),
            green = self.line_color.green(),
            blue = self.line_color.blue(),
            heading = self.gyro.heading(),
            "sensor sweep"
        );
    }

    fn stop(&mut self) {
        info!(samples = self.samples_taken, "sensor sweep complete");
    }
}

impl Injectable for SensorSweep {
    fn plan() -> InjectionPlan {
        InjectionPlan::new()
            .value("sample_count", 10i64)
            .device("touch", DeviceCapability::TouchSensor)
            .device_named("line_color", "color_front", DeviceCapability::ColorSensor)
            .device("gyro", DeviceCapability::GyroSensor)
    }

    fn assemble(bindings: &Bindings) -> Result<Self, OpkitError> {
        Ok(SensorSweep {
            touch: bindings.device("touch")?,
            line_color: bindings.device("line_color")?,
            gyro: bindings.device("gyro")?,
            sample_count: bindings.value("sample_count")?,
            samples_taken: 0,
        })
    }
}
