use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A typed configuration scalar stored by the value store.
///
/// Values widen on insertion (`i32` → [`Scalar::Int`], `f32` →
/// [`Scalar::Float`]) and never narrow on the way out. There is no
/// numeric↔string coercion in either direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl Scalar {
    /// The kind tag for this value, used in type-mismatch reports.
    pub fn kind(&self) -> ScalarKind {
        match self {
            Scalar::Bool(_) => ScalarKind::Bool,
            Scalar::Int(_) => ScalarKind::Int,
            Scalar::Float(_) => ScalarKind::Float,
            Scalar::Str(_) => ScalarKind::Str,
        }
    }
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scalar::Bool(v) => write!(f, "{v}"),
            Scalar::Int(v) => write!(f, "{v}"),
            Scalar::Float(v) => write!(f, "{v}"),
            Scalar::Str(v) => write!(f, "{v}"),
        }
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Scalar::Bool(v)
    }
}

impl From<i32> for Scalar {
    fn from(v: i32) -> Self {
        Scalar::Int(i64::from(v))
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Int(v)
    }
}

impl From<f32> for Scalar {
    fn from(v: f32) -> Self {
        Scalar::Float(f64::from(v))
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Float(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::Str(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Scalar::Str(v)
    }
}

/// The four storable kinds of [`Scalar`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScalarKind {
    Bool,
    Int,
    Float,
    Str,
}

impl std::fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ScalarKind::Bool => "bool",
            ScalarKind::Int => "int",
            ScalarKind::Float => "float",
            ScalarKind::Str => "string",
        };
        write!(f, "{name}")
    }
}

/// The set of hardware capability categories a device handle can declare.
///
/// Every concrete device declares exactly one of these plus the generic
/// named-device operations (name, connection info, version, close). The
/// declaration order of [`DeviceCapability::ALL`] is also the fixed search
/// order for by-name ("guess") lookup: motors before servos before sensors
/// before raw I/O.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceCapability {
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
}

impl DeviceCapability {
    /// Every supported capability category, in declaration order.
    ///
    /// This order is a contract: by-name device lookup walks it front to
    /// back and the first category containing a matching name wins.
    pub const ALL: [DeviceCapability; 12] = [
        DeviceCapability::DcMotor,
        DeviceCapability::Servo,
        DeviceCapability::TouchSensor,
        DeviceCapability::ColorSensor,
        DeviceCapability::GyroSensor,
        DeviceCapability::LightSensor,
        DeviceCapability::UltrasonicSensor,
        DeviceCapability::CompassSensor,
        DeviceCapability::AnalogInput,
        DeviceCapability::DigitalChannel,
        DeviceCapability::Led,
        DeviceCapability::VoltageSensor,
    ];
}

impl std::fmt::Display for DeviceCapability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DeviceCapability::DcMotor => "dc motor",
            DeviceCapability::Servo => "servo",
            DeviceCapability::TouchSensor => "touch sensor",
            DeviceCapability::ColorSensor => "color sensor",
            DeviceCapability::GyroSensor => "gyro sensor",
            DeviceCapability::LightSensor => "light sensor",
            DeviceCapability::UltrasonicSensor => "ultrasonic sensor",
            DeviceCapability::CompassSensor => "compass sensor",
            DeviceCapability::AnalogInput => "analog input",
            DeviceCapability::DigitalChannel => "digital channel",
            DeviceCapability::Led => "led",
            DeviceCapability::VoltageSensor => "voltage sensor",
        };
        write!(f, "{name}")
    }
}

/// Global error type spanning registry conflicts, configuration typing
/// errors, device lookup misses, and control-unit construction failures.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OpkitError {
    /// A second, non-identical descriptor was registered under an
    /// already-taken unit name. Fatal at discovery time.
    #[error("Duplicate unit name: {name:?}")]
    DuplicateName { name: String },

    /// The host asked for a unit name that was never registered.
    #[error("No unit registered as {name:?}")]
    UnknownUnit { name: String },

    /// A candidate descriptor carried a name the registry refuses.
    #[error("Invalid unit name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },

    /// A configuration value exists under the key but holds the wrong kind.
    #[error("Type mismatch for config key {key:?}: expected {expected}, found {found}")]
    TypeMismatch {
        key: String,
        expected: ScalarKind,
        found: ScalarKind,
    },

    /// No device satisfied the lookup. `capability` is `None` for by-name
    /// ("guess") lookups that searched every category.
    #[error("No device named {name:?} (capability: {capability:?})")]
    DeviceNotFound {
        name: String,
        capability: Option<DeviceCapability>,
    },

    /// A unit's assemble step asked for a field its injection plan never
    /// declared. Always a unit authoring bug.
    #[error("No resolved binding for field {field:?}")]
    MissingBinding { field: String },

    /// Injection failed while constructing a unit. Wraps the first failing
    /// target; the unit is never partially exposed.
    #[error("Failed to construct unit {unit:?} at target {target:?}: {source}")]
    Construction {
        unit: String,
        target: String,
        #[source]
        source: Box<OpkitError>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_widens_on_insertion() {
        assert_eq!(Scalar::from(7i32), Scalar::Int(7));
        assert_eq!(Scalar::from(7i64), Scalar::Int(7));
        assert_eq!(Scalar::from(0.5f32), Scalar::Float(0.5));
        assert_eq!(Scalar::from("red").kind(), ScalarKind::Str);
    }

    #[test]
    fn scalar_serialization_roundtrip() {
        let values = vec![
            Scalar::Bool(true),
            Scalar::Int(-3),
            Scalar::Float(2.25),
            Scalar::Str("motor_left".to_string()),
        ];
        let json = serde_json::to_string(&values).unwrap();
        let back: Vec<Scalar> = serde_json::from_str(&json).unwrap();
        assert_eq!(values, back);
    }

    #[test]
    fn scalar_untagged_reads_plain_json() {
        let v: Scalar = serde_json::from_str("true").unwrap();
        assert_eq!(v, Scalar::Bool(true));
        let v: Scalar = serde_json::from_str("\"0.75\"").unwrap();
        assert_eq!(v, Scalar::Str("0.75".to_string()));
    }

    #[test]
    fn capability_order_is_stable() {
        assert_eq!(DeviceCapability::ALL.len(), 12);
        assert_eq!(DeviceCapability::ALL[0], DeviceCapability::DcMotor);
        assert_eq!(DeviceCapability::ALL[1], DeviceCapability::Servo);
        assert_eq!(
            DeviceCapability::ALL[11],
            DeviceCapability::VoltageSensor
        );
    }

    #[test]
    fn capability_serialization_roundtrip() {
        for cap in DeviceCapability::ALL {
            let json = serde_json::to_string(&cap).unwrap();
            let back: DeviceCapability = serde_json::from_str(&json).unwrap();
            assert_eq!(cap, back);
        }
    }

    #[test]
    fn error_display() {
        let err = OpkitError::TypeMismatch {
            key: "motor_speed".to_string(),
            expected: ScalarKind::Float,
            found: ScalarKind::Str,
        };
        assert!(err.to_string().contains("motor_speed"));
        assert!(err.to_string().contains("expected float"));

        let err = OpkitError::DeviceNotFound {
            name: "arm".to_string(),
            capability: Some(DeviceCapability::Servo),
        };
        assert!(err.to_string().contains("Servo"));

        let err = OpkitError::DeviceNotFound {
            name: "arm".to_string(),
            capability: None,
        };
        assert!(err.to_string().contains("None"));
    }

    #[test]
    fn construction_error_carries_source() {
        let inner = OpkitError::DeviceNotFound {
            name: "motor_right".to_string(),
            capability: Some(DeviceCapability::DcMotor),
        };
        let err = OpkitError::Construction {
            unit: "Teleop".to_string(),
            target: "motor_right".to_string(),
            source: Box::new(inner.clone()),
        };
        assert!(err.to_string().contains("Teleop"));
        assert!(err.to_string().contains(&inner.to_string()));
    }
}
