//! [`Session`] – drives a constructed unit through its lifecycle.
//!
//! The session is the host-side glue between the registry, the active
//! configuration profile, and a device directory (real or mock): construct,
//! `init`, `start`, tick `loop_once` until done or stopped, `stop`.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use opkit_config::Profiles;
use opkit_hal::DeviceLookup;
use opkit_types::OpkitError;
use tracing::info;

use crate::registry::UnitRegistry;
use crate::unit::ControlUnit;

/// One run of one control unit.
pub struct Session<'a> {
    registry: &'a UnitRegistry,
    profiles: &'a Profiles,
    devices: &'a dyn DeviceLookup,
    stop: Option<Arc<AtomicBool>>,
}

impl<'a> Session<'a> {
    /// Create a session over the given registry, profiles, and directory.
    pub fn new(
        registry: &'a UnitRegistry,
        profiles: &'a Profiles,
        devices: &'a dyn DeviceLookup,
    ) -> Self {
        Self {
            registry,
            profiles,
            devices,
            stop: None,
        }
    }

    /// Install a flag that ends the loop early when set (e.g. from a Ctrl-C
    /// handler). Checked before every tick.
    pub fn with_stop_flag(mut self, stop: Arc<AtomicBool>) -> Self {
        self.stop = Some(stop);
        self
    }

    /// Construct `name` using its active configuration profile.
    ///
    /// # Errors
    ///
    /// Returns [`OpkitError::UnknownUnit`] or a construction error; a
    /// failed construction yields no unit at all, and the host may retry
    /// with a different name or directory.
    pub fn construct(&self, name: &str) -> Result<Box<dyn ControlUnit>, OpkitError> {
        let store = self.profiles.store_for(name);
        self.registry.construct(name, &store, self.devices)
    }

    /// Construct `name` and run it: `init`, `start`, up to `ticks` calls to
    /// `loop_once`, then `stop`. Returns the number of ticks executed.
    ///
    /// # Errors
    ///
    /// Construction errors only; the lifecycle itself is infallible.
    pub fn run(&self, name: &str, ticks: u64) -> Result<u64, OpkitError> {
        let mut unit = self.construct(name)?;
        info!(unit = name, "constructed; starting lifecycle");

        unit.init();
        unit.start();

        let mut executed = 0;
        for _ in 0..ticks {
            if let Some(stop) = &self.stop
                && stop.load(Ordering::SeqCst)
            {
                info!(unit = name, "stop flag set; ending loop early");
                break;
            }
            unit.loop_once();
            executed += 1;
        }

        unit.stop();
        info!(unit = name, ticks = executed, "session finished");
        Ok(executed)
    }
}
