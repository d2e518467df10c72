//! `opkit-config` – Typed configuration for control units
//!
//! Configuration values are established before a control-unit session starts
//! and are only read during injection, so every lookup here is synchronous
//! and in-memory.
//!
//! # Modules
//!
//! - [`store`] – [`ConfigStore`][store::ConfigStore]:
//!   named typed scalars with per-key caller-supplied defaults. A missing key
//!   resolves to the default without being recorded; a key holding the wrong
//!   kind is a configuration authoring bug and fails with
//!   [`OpkitError::TypeMismatch`][opkit_types::OpkitError::TypeMismatch]
//!   rather than being coerced.
//! - [`profiles`] – [`Profiles`][profiles::Profiles]:
//!   per-unit configuration scopes. Each unit owns a set of named variants
//!   ([`UnitProfiles`][profiles::UnitProfiles]) with one marked active; the
//!   active variant's store is what gets handed to the injection engine.
//!
//! The backing persistence (file, settings screen) is a host concern; both
//! types serialize with `serde` so the host can store them however it likes.

pub mod profiles;
pub mod store;

pub use profiles::{DEFAULT_VARIANT, Profiles, UnitProfiles};
pub use store::{ConfigStore, FromScalar};
