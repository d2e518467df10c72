//! [`Profiles`] – per-unit configuration scopes with named variants.
//!
//! Every control unit owns an independent set of configuration variants
//! (e.g. `"[default]"`, `"red alliance"`, `"demo field"`), exactly one of
//! which is active at a time. The active variant's [`ConfigStore`] is what
//! the injection engine reads at construction.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::store::ConfigStore;

/// Name of the variant every unit starts with.
pub const DEFAULT_VARIANT: &str = "[default]";

/// The configuration variants of a single control unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitProfiles {
    #[serde(default)]
    variants: HashMap<String, ConfigStore>,
    #[serde(default = "default_variant_name")]
    active: String,
}

fn default_variant_name() -> String {
    DEFAULT_VARIANT.to_string()
}

impl Default for UnitProfiles {
    fn default() -> Self {
        Self {
            variants: HashMap::new(),
            active: DEFAULT_VARIANT.to_string(),
        }
    }
}

impl UnitProfiles {
    /// Create a profile set with no stored variants and `"[default]"` active.
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of the currently active variant.
    pub fn active_variant(&self) -> &str {
        &self.active
    }

    /// Make `variant` active, creating an empty store for it if needed.
    pub fn set_active(&mut self, variant: impl Into<String>) {
        let variant = variant.into();
        self.variants.entry(variant.clone()).or_default();
        self.active = variant;
    }

    /// A copy of the active variant's store. Units whose active variant was
    /// never written to get an empty store, which resolves every lookup to
    /// its caller-supplied default.
    pub fn active_store(&self) -> ConfigStore {
        self.variants.get(&self.active).cloned().unwrap_or_default()
    }

    /// Mutable access to `variant`'s store, creating it if needed.
    pub fn variant_mut(&mut self, variant: impl Into<String>) -> &mut ConfigStore {
        self.variants.entry(variant.into()).or_default()
    }

    /// Store `value` under `key` in the active variant.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<opkit_types::Scalar>) {
        let active = self.active.clone();
        self.variant_mut(active).set(key, value);
    }

    /// Delete `variant` and its values. Deleting the active variant resets
    /// the selection to `"[default]"`.
    pub fn remove_variant(&mut self, variant: &str) {
        self.variants.remove(variant);
        if self.active == variant {
            self.active = DEFAULT_VARIANT.to_string();
        }
    }

    /// Iterate over the stored variant names in arbitrary order.
    pub fn variant_names(&self) -> impl Iterator<Item = &str> {
        self.variants.keys().map(String::as_str)
    }
}

/// Root of the configuration tree: one [`UnitProfiles`] per unit name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Profiles {
    units: HashMap<String, UnitProfiles>,
}

impl Profiles {
    /// Create an empty profile tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// The profile set for `unit`, if any values were ever stored for it.
    pub fn unit(&self, unit: &str) -> Option<&UnitProfiles> {
        self.units.get(unit)
    }

    /// Mutable access to `unit`'s profile set, creating it if needed.
    pub fn unit_mut(&mut self, unit: impl Into<String>) -> &mut UnitProfiles {
        self.units.entry(unit.into()).or_default()
    }

    /// The store to inject when constructing `unit`: a copy of its active
    /// variant, or an empty store for units never configured.
    pub fn store_for(&self, unit: &str) -> ConfigStore {
        match self.units.get(unit) {
            Some(profiles) => profiles.active_store(),
            None => {
                debug!(unit, "no stored profile; injecting empty config store");
                ConfigStore::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_variant_is_active() {
        let profiles = UnitProfiles::new();
        assert_eq!(profiles.active_variant(), DEFAULT_VARIANT);
        assert!(profiles.active_store().is_empty());
    }

    #[test]
    fn set_writes_into_active_variant() {
        let mut profiles = UnitProfiles::new();
        profiles.set("motor_speed", 0.5);
        assert_eq!(profiles.active_store().get("motor_speed", 1.0).unwrap(), 0.5);
    }

    #[test]
    fn variants_are_independent() {
        let mut profiles = UnitProfiles::new();
        profiles.set("motor_speed", 0.5);

        profiles.set_active("aggressive");
        profiles.set("motor_speed", 1.0);
        assert_eq!(profiles.active_store().get("motor_speed", 0.0).unwrap(), 1.0);

        profiles.set_active(DEFAULT_VARIANT);
        assert_eq!(profiles.active_store().get("motor_speed", 0.0).unwrap(), 0.5);
    }

    #[test]
    fn removing_active_variant_falls_back_to_default() {
        let mut profiles = UnitProfiles::new();
        profiles.set_active("demo field");
        profiles.set("red_team", true);

        profiles.remove_variant("demo field");
        assert_eq!(profiles.active_variant(), DEFAULT_VARIANT);
        assert!(profiles.active_store().is_empty());
    }

    #[test]
    fn store_for_unknown_unit_is_empty() {
        let profiles = Profiles::new();
        let store = profiles.store_for("Teleop");
        assert!(store.is_empty());
        assert_eq!(store.get("time_length", 30i64).unwrap(), 30);
    }

    #[test]
    fn store_for_returns_active_variant_values() {
        let mut profiles = Profiles::new();
        profiles.unit_mut("Teleop").set("motor_speed", 0.25);

        let store = profiles.store_for("Teleop");
        assert_eq!(store.get("motor_speed", 1.0).unwrap(), 0.25);
    }

    #[test]
    fn serialization_roundtrip() {
        let mut profiles = Profiles::new();
        profiles.unit_mut("Auto").set("red_team", true);
        profiles.unit_mut("Teleop").set_active("scrimmage");
        profiles.unit_mut("Teleop").set("motor_speed", 0.5);

        let json = serde_json::to_string(&profiles).unwrap();
        let back: Profiles = serde_json::from_str(&json).unwrap();
        assert_eq!(profiles, back);
    }
}
