//! Injection engine: declarative targets, eager resolution, typed bindings.
//!
//! A control-unit type declares its dependencies as an explicit
//! [`InjectionPlan`] — no runtime introspection of fields. At construction
//! the engine resolves every target in declaration order against the typed
//! value store and the device directory; the first failure aborts the whole
//! construction, so a partially-injected unit never exists.

use opkit_config::{ConfigStore, FromScalar};
use opkit_hal::{DeviceHandle, DeviceLookup, FromHandle};
use opkit_types::{DeviceCapability, OpkitError, Scalar};
use tracing::debug;

/// What a single injection target resolves to.
#[derive(Debug, Clone, PartialEq)]
pub enum TargetKind {
    /// A typed configuration value with a caller-supplied default.
    Value { key: String, default: Scalar },
    /// A named device handle; `capability` of `None` requests the fixed-order
    /// by-name ("guess") lookup.
    Device {
        name: String,
        capability: Option<DeviceCapability>,
    },
}

/// One declared dependency of a control-unit type.
#[derive(Debug, Clone, PartialEq)]
pub struct InjectionTarget {
    /// The binding name the unit's assemble step pulls the result out by.
    pub field: String,
    pub kind: TargetKind,
}

/// Ordered list of [`InjectionTarget`]s built at type-definition time.
///
/// The builder preserves declaration order, which is also resolution order.
/// For device targets the field name doubles as the device name unless
/// overridden with [`device_named`][InjectionPlan::device_named].
///
/// # Example
///
/// ```
/// use opkit_control::InjectionPlan;
/// use opkit_types::DeviceCapability;
///
/// let plan = InjectionPlan::new()
///     .value("motor_speed", 1.0)
///     .device("motor_left", DeviceCapability::DcMotor)
///     .device_guess("motor_back");
/// assert_eq!(plan.targets().len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InjectionPlan {
    targets: Vec<InjectionTarget>,
}

impl InjectionPlan {
    /// Start an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a configuration value target; `field` is also the config key.
    pub fn value(mut self, field: &str, default: impl Into<Scalar>) -> Self {
        self.targets.push(InjectionTarget {
            field: field.to_string(),
            kind: TargetKind::Value {
                key: field.to_string(),
                default: default.into(),
            },
        });
        self
    }

    /// Declare a device target; `field` is also the device name.
    pub fn device(self, field: &str, capability: DeviceCapability) -> Self {
        let name = field.to_string();
        self.device_named(field, &name, capability)
    }

    /// Declare a device target whose directory name differs from the field.
    pub fn device_named(
        mut self,
        field: &str,
        name: &str,
        capability: DeviceCapability,
    ) -> Self {
        self.targets.push(InjectionTarget {
            field: field.to_string(),
            kind: TargetKind::Device {
                name: name.to_string(),
                capability: Some(capability),
            },
        });
        self
    }

    /// Declare a device target resolved by name only, using the fixed-order
    /// guess lookup; `field` is also the device name.
    pub fn device_guess(mut self, field: &str) -> Self {
        self.targets.push(InjectionTarget {
            field: field.to_string(),
            kind: TargetKind::Device {
                name: field.to_string(),
                capability: None,
            },
        });
        self
    }

    /// The declared targets in declaration order.
    pub fn targets(&self) -> &[InjectionTarget] {
        &self.targets
    }
}

enum Binding {
    Value(Scalar),
    Device(DeviceHandle),
}

/// The fully-resolved dependency set of one unit under construction.
///
/// Handed to the unit's assemble step, which pulls each binding out by its
/// declared field name. Every extraction error here is a unit authoring bug
/// (field never declared, or declared with a different type), never a
/// runtime hardware condition.
pub struct Bindings {
    entries: Vec<(String, Binding)>,
}

impl std::fmt::Debug for Bindings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bindings")
            .field(
                "fields",
                &self.entries.iter().map(|(name, _)| name).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Bindings {
    fn find(&self, field: &str) -> Result<&Binding, OpkitError> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, binding)| binding)
            .ok_or_else(|| OpkitError::MissingBinding {
                field: field.to_string(),
            })
    }

    /// The configuration value resolved for `field`.
    ///
    /// # Errors
    ///
    /// [`OpkitError::MissingBinding`] when the plan never declared `field`;
    /// [`OpkitError::TypeMismatch`] when `T` differs from the declared
    /// default's kind.
    pub fn value<T: FromScalar>(&self, field: &str) -> Result<T, OpkitError> {
        match self.find(field)? {
            Binding::Value(scalar) => {
                T::from_scalar(scalar).ok_or_else(|| OpkitError::TypeMismatch {
                    key: field.to_string(),
                    expected: T::KIND,
                    found: scalar.kind(),
                })
            }
            Binding::Device(_) => Err(OpkitError::MissingBinding {
                field: field.to_string(),
            }),
        }
    }

    /// The device resolved for `field`, extracted as its capability-trait
    /// object (e.g. `Arc<dyn DcMotor>`).
    ///
    /// # Errors
    ///
    /// [`OpkitError::MissingBinding`] when the plan never declared `field`;
    /// [`OpkitError::DeviceNotFound`] when the resolved device's capability
    /// is not the one `T` extracts (possible only for guess-resolved
    /// targets — exact targets were already capability-checked).
    pub fn device<T: FromHandle>(&self, field: &str) -> Result<T, OpkitError> {
        let handle = self.handle(field)?;
        T::from_handle(handle).ok_or_else(|| OpkitError::DeviceNotFound {
            name: handle.name().to_string(),
            capability: Some(T::CAPABILITY),
        })
    }

    /// The raw [`DeviceHandle`] resolved for `field`.
    ///
    /// # Errors
    ///
    /// [`OpkitError::MissingBinding`] when the plan never declared `field`
    /// as a device target.
    pub fn handle(&self, field: &str) -> Result<&DeviceHandle, OpkitError> {
        match self.find(field)? {
            Binding::Device(handle) => Ok(handle),
            Binding::Value(_) => Err(OpkitError::MissingBinding {
                field: field.to_string(),
            }),
        }
    }
}

/// Resolve every target of `plan` for the unit named `unit`.
///
/// Targets resolve strictly in declaration order. Resolution is
/// all-or-nothing: the first failure is returned wrapped in
/// [`OpkitError::Construction`] (naming the failing target) and no bindings
/// escape.
///
/// # Errors
///
/// Returns [`OpkitError::Construction`] wrapping the first
/// [`TypeMismatch`][OpkitError::TypeMismatch] or
/// [`DeviceNotFound`][OpkitError::DeviceNotFound] encountered.
pub fn resolve(
    unit: &str,
    plan: &InjectionPlan,
    config: &ConfigStore,
    devices: &dyn DeviceLookup,
) -> Result<Bindings, OpkitError> {
    let mut entries = Vec::with_capacity(plan.targets().len());
    for target in plan.targets() {
        let wrap = |source: OpkitError| OpkitError::Construction {
            unit: unit.to_string(),
            target: target.field.clone(),
            source: Box::new(source),
        };
        let binding = match &target.kind {
            TargetKind::Value { key, default } => {
                Binding::Value(config.get_scalar(key, default).map_err(wrap)?)
            }
            TargetKind::Device {
                name,
                capability: Some(capability),
            } => Binding::Device(devices.get_exact(name, *capability).map_err(wrap)?),
            TargetKind::Device {
                name,
                capability: None,
            } => Binding::Device(devices.get_by_guess(name).map_err(wrap)?),
        };
        debug!(unit, field = %target.field, "resolved injection target");
        entries.push((target.field.clone(), binding));
    }
    Ok(Bindings { entries })
}

#[cfg(test)]
mod tests {
    use super::*;
    use opkit_hal::MockDeviceDirectory;
    use std::sync::Arc;

    #[test]
    fn values_resolve_with_defaults() {
        let mut config = ConfigStore::new();
        config.set("motor_speed", 0.5);

        let plan = InjectionPlan::new()
            .value("motor_speed", 1.0)
            .value("time_length", 30i64)
            .value("red_team", false);
        let bindings = resolve("Teleop", &plan, &config, &MockDeviceDirectory::new()).unwrap();

        assert_eq!(bindings.value::<f64>("motor_speed").unwrap(), 0.5);
        assert_eq!(bindings.value::<i64>("time_length").unwrap(), 30);
        assert!(!bindings.value::<bool>("red_team").unwrap());
    }

    #[test]
    fn devices_resolve_exact_and_guess() {
        let plan = InjectionPlan::new()
            .device("motor_left", DeviceCapability::DcMotor)
            .device_guess("motor_back");
        let bindings = resolve(
            "Teleop",
            &plan,
            &ConfigStore::new(),
            &MockDeviceDirectory::new(),
        )
        .unwrap();

        let motor: Arc<dyn opkit_hal::DcMotor> = bindings.device("motor_left").unwrap();
        assert_eq!(motor.power(), 0.0);
        assert_eq!(
            bindings.handle("motor_back").unwrap().capability(),
            DeviceCapability::DcMotor
        );
    }

    #[test]
    fn device_named_overrides_directory_name() {
        let plan = InjectionPlan::new().device_named("left", "motor_left", DeviceCapability::DcMotor);
        let target = &plan.targets()[0];
        assert_eq!(target.field, "left");
        assert_eq!(
            target.kind,
            TargetKind::Device {
                name: "motor_left".to_string(),
                capability: Some(DeviceCapability::DcMotor),
            }
        );
    }

    #[test]
    fn first_failure_aborts_with_construction_error() {
        let mut config = ConfigStore::new();
        config.set("motor_speed", "fast");

        let plan = InjectionPlan::new()
            .device("motor_left", DeviceCapability::DcMotor)
            .value("motor_speed", 1.0)
            .value("never_reached", true);
        let err = resolve(
            "Teleop",
            &plan,
            &config,
            &MockDeviceDirectory::new(),
        )
        .unwrap_err();

        match err {
            OpkitError::Construction { unit, target, source } => {
                assert_eq!(unit, "Teleop");
                assert_eq!(target, "motor_speed");
                assert!(matches!(*source, OpkitError::TypeMismatch { .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn undeclared_field_is_a_missing_binding() {
        let plan = InjectionPlan::new().value("motor_speed", 1.0);
        let bindings = resolve(
            "Teleop",
            &plan,
            &ConfigStore::new(),
            &MockDeviceDirectory::new(),
        )
        .unwrap();

        assert!(matches!(
            bindings.value::<f64>("motor_power"),
            Err(OpkitError::MissingBinding { .. })
        ));
        assert!(matches!(
            bindings.handle("motor_speed"),
            Err(OpkitError::MissingBinding { .. })
        ));
    }

    #[test]
    fn wrong_typed_extraction_is_a_type_mismatch() {
        let plan = InjectionPlan::new().value("motor_speed", 1.0);
        let bindings = resolve(
            "Teleop",
            &plan,
            &ConfigStore::new(),
            &MockDeviceDirectory::new(),
        )
        .unwrap();

        assert!(matches!(
            bindings.value::<i64>("motor_speed"),
            Err(OpkitError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn guess_extraction_with_wrong_capability_fails() {
        // The mock resolves guesses to the first search category (dc motor),
        // so extracting a servo from it must fail loudly, not coerce.
        let plan = InjectionPlan::new().device_guess("arm");
        let bindings = resolve(
            "Teleop",
            &plan,
            &ConfigStore::new(),
            &MockDeviceDirectory::new(),
        )
        .unwrap();

        let servo: Result<Arc<dyn opkit_hal::Servo>, _> = bindings.device("arm");
        assert!(matches!(
            servo,
            Err(OpkitError::DeviceNotFound {
                capability: Some(DeviceCapability::Servo),
                ..
            })
        ));
    }
}
