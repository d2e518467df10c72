//! [`DeviceDirectory`] – name → device handle lookup per capability.
//!
//! The directory is the owner of every registered device. It is filled once
//! while the host wires up a session and is read-only during injection, so
//! lookups are plain synchronous map reads.

use std::collections::HashMap;

use opkit_types::{DeviceCapability, OpkitError};
use tracing::warn;

use crate::handle::DeviceHandle;

/// The lookup surface the injection engine depends on.
///
/// [`DeviceDirectory`] implements it against real registrations;
/// [`MockDeviceDirectory`][crate::mock::MockDeviceDirectory] implements it
/// with deterministic stubs for hardware-free runs.
pub trait DeviceLookup {
    /// The device registered as `name` under `capability`.
    ///
    /// # Errors
    ///
    /// Returns [`OpkitError::DeviceNotFound`] when no such device exists.
    fn get_exact(
        &self,
        name: &str,
        capability: DeviceCapability,
    ) -> Result<DeviceHandle, OpkitError>;

    /// Fallback lookup for callers that do not know the capability: walk
    /// every category in the fixed [`DeviceCapability::ALL`] order and
    /// return the first device whose name matches.
    ///
    /// When the same name exists in several categories the earliest
    /// category in that order wins; the tie-break is a documented contract,
    /// not a heuristic.
    ///
    /// # Errors
    ///
    /// Returns [`OpkitError::DeviceNotFound`] (with no capability) when no
    /// category contains the name.
    fn get_by_guess(&self, name: &str) -> Result<DeviceHandle, OpkitError>;
}

/// In-memory device directory backed by one name map per capability.
///
/// # Example
///
/// ```
/// use opkit_hal::{DeviceDirectory, DeviceLookup};
/// use opkit_types::DeviceCapability;
///
/// let directory = DeviceDirectory::new();
/// assert!(
///     directory
///         .get_exact("motor_left", DeviceCapability::DcMotor)
///         .is_err()
/// );
/// ```
#[derive(Debug, Default)]
pub struct DeviceDirectory {
    categories: HashMap<DeviceCapability, HashMap<String, DeviceHandle>>,
}

impl DeviceDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handle` under its own name and capability. A device
    /// already registered under the same name and capability is replaced.
    pub fn insert(&mut self, handle: DeviceHandle) {
        let name = handle.name().to_string();
        let capability = handle.capability();
        let replaced = self
            .categories
            .entry(capability)
            .or_default()
            .insert(name.clone(), handle);
        if replaced.is_some() {
            warn!(name = %name, capability = %capability, "replacing registered device");
        }
    }

    /// `true` when a device named `name` exists under `capability`.
    pub fn contains(&self, name: &str, capability: DeviceCapability) -> bool {
        self.categories
            .get(&capability)
            .is_some_and(|devices| devices.contains_key(name))
    }

    /// Total number of registered devices across all categories.
    pub fn len(&self) -> usize {
        self.categories.values().map(HashMap::len).sum()
    }

    /// `true` when no devices are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registered `(capability, name)` pairs in guess-search order, names
    /// sorted within each category.
    pub fn names(&self) -> Vec<(DeviceCapability, String)> {
        let mut out = Vec::with_capacity(self.len());
        for capability in DeviceCapability::ALL {
            if let Some(devices) = self.categories.get(&capability) {
                let mut names: Vec<&String> = devices.keys().collect();
                names.sort();
                out.extend(names.into_iter().map(|n| (capability, n.clone())));
            }
        }
        out
    }
}

impl DeviceLookup for DeviceDirectory {
    fn get_exact(
        &self,
        name: &str,
        capability: DeviceCapability,
    ) -> Result<DeviceHandle, OpkitError> {
        self.categories
            .get(&capability)
            .and_then(|devices| devices.get(name))
            .cloned()
            .ok_or_else(|| OpkitError::DeviceNotFound {
                name: name.to_string(),
                capability: Some(capability),
            })
    }

    fn get_by_guess(&self, name: &str) -> Result<DeviceHandle, OpkitError> {
        for capability in DeviceCapability::ALL {
            if let Some(handle) = self
                .categories
                .get(&capability)
                .and_then(|devices| devices.get(name))
            {
                return Ok(handle.clone());
            }
        }
        Err(OpkitError::DeviceNotFound {
            name: name.to_string(),
            capability: None,
        })
    }
}
