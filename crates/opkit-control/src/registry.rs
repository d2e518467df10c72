//! [`UnitRegistry`] – declared name → constructible control-unit type.
//!
//! The host performs discovery exactly once at startup, handing the registry
//! the full set of candidate descriptors; the registry validates names,
//! refuses ambiguous registrations, and is read-only afterwards (shared
//! references are all that construction needs, so concurrent reads require
//! no locking). Teardown is simply dropping the registry.

use std::collections::HashMap;
use std::fmt;

use opkit_config::ConfigStore;
use opkit_hal::DeviceLookup;
use opkit_types::OpkitError;
use tracing::{info, warn};

use crate::inject::{Bindings, InjectionPlan, resolve};
use crate::unit::ControlUnit;

/// Constructor signature stored in a [`UnitDescriptor`]: the declared unit
/// name (for error reporting) plus the stores injection reads from.
pub type UnitFactory =
    fn(&str, &ConfigStore, &dyn DeviceLookup) -> Result<Box<dyn ControlUnit>, OpkitError>;

/// A control-unit type that declares its dependencies and assembles itself
/// from their resolved bindings.
///
/// # Example
///
/// ```
/// use opkit_control::{Bindings, ControlUnit, Injectable, InjectionPlan};
/// use opkit_types::OpkitError;
///
/// struct Idle {
///     ticks: i64,
/// }
///
/// impl ControlUnit for Idle {
///     fn init(&mut self) {}
///     fn loop_once(&mut self) {}
/// }
///
/// impl Injectable for Idle {
///     fn plan() -> InjectionPlan {
///         InjectionPlan::new().value("ticks", 100i64)
///     }
///
///     fn assemble(bindings: &Bindings) -> Result<Self, OpkitError> {
///         Ok(Idle {
///             ticks: bindings.value("ticks")?,
///         })
///     }
/// }
/// ```
pub trait Injectable: ControlUnit + Sized + 'static {
    /// The unit's declared injection targets, in declaration order.
    fn plan() -> InjectionPlan;

    /// Build the unit from its resolved bindings.
    ///
    /// # Errors
    ///
    /// Any error here (or from [`Bindings`] extraction) aborts construction;
    /// the host never sees a partially-assembled unit.
    fn assemble(bindings: &Bindings) -> Result<Self, OpkitError>;
}

// Monomorphized per unit type; the resulting fn pointer doubles as the
// "identical descriptor" identity for idempotent re-discovery.
fn construct_unit<U: Injectable>(
    name: &str,
    config: &ConfigStore,
    devices: &dyn DeviceLookup,
) -> Result<Box<dyn ControlUnit>, OpkitError> {
    let plan = U::plan();
    let bindings = resolve(name, &plan, config, devices)?;
    let unit = U::assemble(&bindings).map_err(|e| wrap_assemble(name, e))?;
    Ok(Box::new(unit))
}

fn wrap_assemble(unit: &str, err: OpkitError) -> OpkitError {
    if matches!(err, OpkitError::Construction { .. }) {
        return err;
    }
    let target = match &err {
        OpkitError::TypeMismatch { key, .. } => key.clone(),
        OpkitError::DeviceNotFound { name, .. } => name.clone(),
        OpkitError::MissingBinding { field } => field.clone(),
        _ => "assemble".to_string(),
    };
    OpkitError::Construction {
        unit: unit.to_string(),
        target,
        source: Box::new(err),
    }
}

/// A declared unit name paired with its constructor.
#[derive(Clone)]
pub struct UnitDescriptor {
    name: String,
    factory: UnitFactory,
}

impl UnitDescriptor {
    /// Describe the unit type `U` under `name`.
    pub fn of<U: Injectable>(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            factory: construct_unit::<U>,
        }
    }

    /// The name this unit registers under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Construct, injecting from `config` and `devices`.
    ///
    /// # Errors
    ///
    /// Returns [`OpkitError::Construction`] wrapping the first injection or
    /// assembly failure.
    pub fn construct(
        &self,
        config: &ConfigStore,
        devices: &dyn DeviceLookup,
    ) -> Result<Box<dyn ControlUnit>, OpkitError> {
        (self.factory)(&self.name, config, devices)
    }

    fn same_factory(&self, other: &UnitDescriptor) -> bool {
        std::ptr::fn_addr_eq(self.factory, other.factory)
    }
}

impl fmt::Debug for UnitDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnitDescriptor")
            .field("name", &self.name)
            .finish()
    }
}

fn validate_name(name: &str) -> Result<(), OpkitError> {
    if name.trim().is_empty() {
        return Err(OpkitError::InvalidName {
            name: name.to_string(),
            reason: "name must not be blank".to_string(),
        });
    }
    // '=' is the profile screen's key/value separator.
    if name.contains('=') {
        return Err(OpkitError::InvalidName {
            name: name.to_string(),
            reason: "name must not contain '='".to_string(),
        });
    }
    Ok(())
}

/// Process-wide table of constructible control units.
///
/// # Example
///
/// ```
/// use opkit_control::{UnitDescriptor, UnitRegistry};
/// # use opkit_control::{Bindings, ControlUnit, Injectable, InjectionPlan};
/// # use opkit_types::OpkitError;
/// # struct Auto;
/// # impl ControlUnit for Auto {
/// #     fn init(&mut self) {}
/// #     fn loop_once(&mut self) {}
/// # }
/// # impl Injectable for Auto {
/// #     fn plan() -> InjectionPlan {
/// #         InjectionPlan::new()
/// #     }
/// #     fn assemble(_: &Bindings) -> Result<Self, OpkitError> {
/// #         Ok(Auto)
/// #     }
/// # }
///
/// let mut registry = UnitRegistry::new();
/// registry
///     .discover([UnitDescriptor::of::<Auto>("Auto")])
///     .unwrap();
/// assert!(registry.resolve("Auto").is_ok());
/// ```
#[derive(Debug, Default)]
pub struct UnitRegistry {
    units: HashMap<String, UnitDescriptor>,
}

impl UnitRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a single descriptor.
    ///
    /// Re-registering an identical descriptor (same name, same unit type)
    /// is accepted and does nothing, so repeated discovery passes are
    /// idempotent.
    ///
    /// # Errors
    ///
    /// [`OpkitError::InvalidName`] when the declared name fails validation;
    /// [`OpkitError::DuplicateName`] when the name is taken by a different
    /// unit type — the registry refuses to become ambiguous.
    pub fn register(&mut self, descriptor: UnitDescriptor) -> Result<(), OpkitError> {
        validate_name(descriptor.name())?;
        match self.units.get(descriptor.name()) {
            Some(existing) if existing.same_factory(&descriptor) => Ok(()),
            Some(_) => Err(OpkitError::DuplicateName {
                name: descriptor.name().to_string(),
            }),
            None => {
                info!(name = %descriptor.name(), "registered control unit");
                self.units.insert(descriptor.name().to_string(), descriptor);
                Ok(())
            }
        }
    }

    /// Register every candidate descriptor the host's scan produced.
    ///
    /// Candidates with invalid names are skipped with a warning — a badly
    /// named unit should not take the whole process down — and the number
    /// of newly registered units is returned.
    ///
    /// # Errors
    ///
    /// [`OpkitError::DuplicateName`] when two candidates (or a candidate
    /// and an existing entry) claim the same name for different unit types.
    pub fn discover(
        &mut self,
        candidates: impl IntoIterator<Item = UnitDescriptor>,
    ) -> Result<usize, OpkitError> {
        let before = self.units.len();
        for candidate in candidates {
            match self.register(candidate) {
                Ok(()) => {}
                Err(OpkitError::InvalidName { name, reason }) => {
                    warn!(name = %name, reason = %reason, "skipping unit with invalid name");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(self.units.len() - before)
    }

    /// The descriptor registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`OpkitError::UnknownUnit`] when no unit registered as `name`.
    pub fn resolve(&self, name: &str) -> Result<&UnitDescriptor, OpkitError> {
        self.units.get(name).ok_or_else(|| OpkitError::UnknownUnit {
            name: name.to_string(),
        })
    }

    /// Resolve and construct in one step.
    ///
    /// # Errors
    ///
    /// Returns [`OpkitError::UnknownUnit`] or a construction error.
    pub fn construct(
        &self,
        name: &str,
        config: &ConfigStore,
        devices: &dyn DeviceLookup,
    ) -> Result<Box<dyn ControlUnit>, OpkitError> {
        self.resolve(name)?.construct(config, devices)
    }

    /// Registered names, sorted for stable listing.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.units.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// `true` when no units are registered.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}
