//! Loads a [`Profiles`] tree from a TOML file.
//!
//! The on-disk shape mirrors the in-memory one:
//!
//! ```toml
//! [TankDrive]
//! active = "scrimmage"
//!
//! [TankDrive.variants.scrimmage]
//! motor_speed = 0.5
//! red_team = true
//! ```

use std::fs;
use std::path::Path;

use opkit_config::Profiles;
use thiserror::Error;

/// Failure to read or parse a profile file.
#[derive(Error, Debug)]
pub enum ProfilesError {
    #[error("failed to read profile file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse profile file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Read and parse `path`.
///
/// # Errors
///
/// Returns [`ProfilesError`] when the file is unreadable or not valid TOML.
pub fn load(path: &Path) -> Result<Profiles, ProfilesError> {
    let text = fs::read_to_string(path)?;
    Ok(toml::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_units_variants_and_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[TankDrive]
active = "scrimmage"

[TankDrive.variants.scrimmage]
motor_speed = 0.5
red_team = true

[SensorSweep]
[SensorSweep.variants."[default]"]
sample_count = 4
"#
        )
        .unwrap();

        let profiles = load(file.path()).unwrap();

        let tank = profiles.store_for("TankDrive");
        assert_eq!(tank.get("motor_speed", 1.0).unwrap(), 0.5);
        assert!(tank.get("red_team", false).unwrap());

        let sweep = profiles.store_for("SensorSweep");
        assert_eq!(sweep.get("sample_count", 0i64).unwrap(), 4);
    }

    #[test]
    fn active_defaults_when_omitted() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[SensorSweep.variants."[default]"]
sample_count = 2
"#
        )
        .unwrap();

        let profiles = load(file.path()).unwrap();
        assert_eq!(
            profiles.unit("SensorSweep").unwrap().active_variant(),
            opkit_config::DEFAULT_VARIANT
        );
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not = [valid").unwrap();
        assert!(matches!(load(file.path()), Err(ProfilesError::Parse(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = load(Path::new("/nonexistent/profiles.toml"));
        assert!(matches!(result, Err(ProfilesError::Io(_))));
    }
}
