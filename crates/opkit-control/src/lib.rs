//! `opkit-control` – Control-unit registry, injection, and sessions
//!
//! A control unit is one independently schedulable hardware-control routine.
//! The host discovers the available unit types once at startup, then asks
//! this crate to construct one by name; construction resolves the unit's
//! declared configuration and device dependencies before the host ever sees
//! the instance.
//!
//! # Modules
//!
//! - [`unit`] – [`ControlUnit`][unit::ControlUnit]: the lifecycle trait
//!   (`init`, `start`, `loop_once`, `stop`) the host drives.
//! - [`inject`] – [`InjectionPlan`][inject::InjectionPlan] /
//!   [`Bindings`][inject::Bindings]: each unit type declares an explicit
//!   list of injection targets; the engine resolves them in declaration
//!   order, all-or-nothing, against a
//!   [`ConfigStore`][opkit_config::ConfigStore] and a
//!   [`DeviceLookup`][opkit_hal::DeviceLookup].
//! - [`registry`] – [`UnitRegistry`][registry::UnitRegistry]: process-wide
//!   table from declared unit name to constructor, populated by explicit
//!   discovery and read-only afterwards.
//! - [`session`] – [`Session`][session::Session]: convenience driver that
//!   constructs a unit from its active configuration profile and runs it
//!   through its lifecycle.

pub mod inject;
pub mod registry;
pub mod session;
pub mod unit;

pub use inject::{Bindings, InjectionPlan, InjectionTarget, TargetKind, resolve};
pub use registry::{Injectable, UnitDescriptor, UnitFactory, UnitRegistry};
pub use session::Session;
pub use unit::ControlUnit;
