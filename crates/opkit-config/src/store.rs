//! [`ConfigStore`] – named typed configuration scalars with defaults.
//!
//! The store is read-mostly: the host fills it before a control-unit session
//! starts and the injection engine only ever reads from it. Reads with a
//! default never insert, so probing for an optional key leaves no trace.

use std::collections::HashMap;

use opkit_types::{OpkitError, Scalar, ScalarKind};
use serde::{Deserialize, Serialize};

/// Conversion out of a stored [`Scalar`].
///
/// Conversions are exact-kind only: `bool` from a bool entry, `i64` from an
/// int entry, `f64` from a float entry, `String` from a string entry. All
/// widening happened when the value was inserted (see the `From` impls on
/// [`Scalar`]), so there is nothing to coerce on the way out.
pub trait FromScalar: Sized {
    /// The kind this conversion accepts, used in mismatch reports.
    const KIND: ScalarKind;

    /// Convert from the stored value, or `None` when the kind differs.
    fn from_scalar(value: &Scalar) -> Option<Self>;
}

impl FromScalar for bool {
    const KIND: ScalarKind = ScalarKind::Bool;

    fn from_scalar(value: &Scalar) -> Option<Self> {
        match value {
            Scalar::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromScalar for i64 {
    const KIND: ScalarKind = ScalarKind::Int;

    fn from_scalar(value: &Scalar) -> Option<Self> {
        match value {
            Scalar::Int(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromScalar for f64 {
    const KIND: ScalarKind = ScalarKind::Float;

    fn from_scalar(value: &Scalar) -> Option<Self> {
        match value {
            Scalar::Float(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromScalar for String {
    const KIND: ScalarKind = ScalarKind::Str;

    fn from_scalar(value: &Scalar) -> Option<Self> {
        match value {
            Scalar::Str(v) => Some(v.clone()),
            _ => None,
        }
    }
}

/// A flat map of configuration keys to typed [`Scalar`] values.
///
/// # Example
///
/// ```
/// use opkit_config::ConfigStore;
///
/// let mut store = ConfigStore::new();
/// store.set("motor_speed", 0.75);
///
/// assert_eq!(store.get("motor_speed", 1.0).unwrap(), 0.75);
/// // Absent keys resolve to the default and are not recorded.
/// assert_eq!(store.get("time_length", 30i64).unwrap(), 30);
/// assert!(!store.contains("time_length"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigStore {
    values: HashMap<String, Scalar>,
}

impl ConfigStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch `key` as `T`, falling back to `default` when the key is absent.
    ///
    /// The store is never mutated by a read; asking for a missing key twice
    /// returns the same default twice and the key stays absent.
    ///
    /// # Errors
    ///
    /// Returns [`OpkitError::TypeMismatch`] when the key is present but holds
    /// a different kind than `T` converts from.
    pub fn get<T: FromScalar>(&self, key: &str, default: T) -> Result<T, OpkitError> {
        match self.values.get(key) {
            None => Ok(default),
            Some(value) => T::from_scalar(value).ok_or_else(|| OpkitError::TypeMismatch {
                key: key.to_string(),
                expected: T::KIND,
                found: value.kind(),
            }),
        }
    }

    /// Fetch `key` as `T` without a default; `Ok(None)` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`OpkitError::TypeMismatch`] when the key is present but holds
    /// a different kind than `T` converts from.
    pub fn get_opt<T: FromScalar>(&self, key: &str) -> Result<Option<T>, OpkitError> {
        match self.values.get(key) {
            None => Ok(None),
            Some(value) => T::from_scalar(value)
                .map(Some)
                .ok_or_else(|| OpkitError::TypeMismatch {
                    key: key.to_string(),
                    expected: T::KIND,
                    found: value.kind(),
                }),
        }
    }

    /// Kind-checked untyped fetch used by the injection engine: the stored
    /// value must hold the same kind as `default`, and a missing key yields
    /// a copy of `default` itself.
    ///
    /// # Errors
    ///
    /// Returns [`OpkitError::TypeMismatch`] when the key is present but its
    /// kind differs from `default.kind()`.
    pub fn get_scalar(&self, key: &str, default: &Scalar) -> Result<Scalar, OpkitError> {
        match self.values.get(key) {
            None => Ok(default.clone()),
            Some(value) if value.kind() == default.kind() => Ok(value.clone()),
            Some(value) => Err(OpkitError::TypeMismatch {
                key: key.to_string(),
                expected: default.kind(),
                found: value.kind(),
            }),
        }
    }

    /// Store `value` under `key`, replacing any previous entry.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Scalar>) {
        self.values.insert(key.into(), value.into());
    }

    /// Remove `key` from the store. No-ops when absent.
    pub fn unset(&mut self, key: &str) {
        self.values.remove(key);
    }

    /// `true` when an entry exists under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Number of entries in the store.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// `true` when the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over `(key, value)` entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn present_key_returns_stored_value() {
        let mut store = ConfigStore::new();
        store.set("red_team", true);
        store.set("motor_speed", 0.5);
        store.set("time_length", 30i64);
        store.set("variant", "aggressive");

        assert!(store.get("red_team", false).unwrap());
        assert_eq!(store.get("motor_speed", 1.0).unwrap(), 0.5);
        assert_eq!(store.get("time_length", 0i64).unwrap(), 30);
        assert_eq!(
            store.get("variant", String::new()).unwrap(),
            "aggressive".to_string()
        );
    }

    #[test]
    fn missing_key_returns_default_without_insert() {
        let store = ConfigStore::new();
        assert_eq!(store.get("stuff", 100_000i64).unwrap(), 100_000);
        assert!(!store.contains("stuff"));
        assert!(store.is_empty());
    }

    #[test]
    fn get_is_idempotent() {
        let mut store = ConfigStore::new();
        store.set("motor_speed", 0.75);

        let first = store.get("motor_speed", 0.0).unwrap();
        let second = store.get("motor_speed", 0.0).unwrap();
        assert_eq!(first, second);

        let first: i64 = store.get("missing", 42).unwrap();
        let second: i64 = store.get("missing", 42).unwrap();
        assert_eq!(first, 42);
        assert_eq!(second, 42);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn wrong_kind_is_a_type_mismatch() {
        let mut store = ConfigStore::new();
        store.set("motor_speed", "fast");

        let result = store.get("motor_speed", 1.0);
        assert_eq!(
            result,
            Err(OpkitError::TypeMismatch {
                key: "motor_speed".to_string(),
                expected: ScalarKind::Float,
                found: ScalarKind::Str,
            })
        );
    }

    #[test]
    fn no_numeric_string_coercion() {
        let mut store = ConfigStore::new();
        store.set("count", "3");
        assert!(matches!(
            store.get("count", 0i64),
            Err(OpkitError::TypeMismatch { .. })
        ));

        store.set("count", 3i64);
        assert!(matches!(
            store.get("count", String::new()),
            Err(OpkitError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn int_does_not_read_as_float() {
        let mut store = ConfigStore::new();
        store.set("ticks", 10i64);
        assert!(matches!(
            store.get("ticks", 0.0),
            Err(OpkitError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn get_opt_distinguishes_absent_from_mismatch() {
        let mut store = ConfigStore::new();
        assert_eq!(store.get_opt::<bool>("red_team").unwrap(), None);

        store.set("red_team", true);
        assert_eq!(store.get_opt::<bool>("red_team").unwrap(), Some(true));
        assert!(store.get_opt::<i64>("red_team").is_err());
    }

    #[test]
    fn i32_widens_through_set() {
        let mut store = ConfigStore::new();
        store.set("stuff", 100_000i32);
        assert_eq!(store.get("stuff", 0i64).unwrap(), 100_000);
    }

    #[test]
    fn serialization_roundtrip() {
        let mut store = ConfigStore::new();
        store.set("red_team", false);
        store.set("motor_speed", 1.0);
        store.set("name", "tank");

        let json = serde_json::to_string(&store).unwrap();
        let back: ConfigStore = serde_json::from_str(&json).unwrap();
        assert_eq!(store, back);
    }
}
