//! Tool settings.
//!
//! [`Settings`] is built once per invocation from, in increasing priority:
//! built-in defaults, the per-user settings file
//! (`<config_dir>/ocean/ocean.toml`), an `ocean.*` file in the working
//! directory (or the explicit `--settings` file instead of both), and
//! `OCEAN_*` environment variables. The result is passed by value to the
//! computations that need it; nothing reads the environment afterwards.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::constants::{
    DEFAULT_FOCAL_PROFILE, DEFAULT_REPORTS_DIR, DEFAULT_SENSITIVITY,
    DEFAULT_UTILITY_GAP_THRESHOLD, MANIFEST_FILE_NAME, SETTINGS_ENV_PREFIX, SETTINGS_FILE_STEM,
};
use crate::error::ConfigError;

/// Settings shared by every subcommand.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory dated reports and the manifest are written to.
    pub reports_dir: PathBuf,
    /// Manifest file name, relative to `reports_dir`.
    pub manifest_file: String,
    /// Sensitivity used by the seed estimator when `--sensitivity` is absent.
    pub default_sensitivity: f64,
    /// Canvas profile id treated as our own offering.
    pub focal_profile: String,
    /// Buyer-utility gap threshold used when `--threshold` is absent.
    pub utility_gap_threshold: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reports_dir: PathBuf::from(DEFAULT_REPORTS_DIR),
            manifest_file: MANIFEST_FILE_NAME.to_string(),
            default_sensitivity: DEFAULT_SENSITIVITY,
            focal_profile: DEFAULT_FOCAL_PROFILE.to_string(),
            utility_gap_threshold: DEFAULT_UTILITY_GAP_THRESHOLD,
        }
    }
}

impl Settings {
    /// Layer defaults, settings files and environment overrides.
    ///
    /// With `explicit` set, that file must exist and replaces the implicit
    /// per-user and working-directory files.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();

        match explicit {
            Some(path) => {
                builder = builder.add_source(config::File::from(path).required(true));
            }
            None => {
                if let Some(user) = user_settings_path() {
                    builder = builder.add_source(config::File::from(user).required(false));
                }
                builder =
                    builder.add_source(config::File::with_name(SETTINGS_FILE_STEM).required(false));
            }
        }

        builder = builder.add_source(
            config::Environment::with_prefix(SETTINGS_ENV_PREFIX).try_parsing(true),
        );

        builder
            .build()
            .and_then(|c| c.try_deserialize::<Settings>())
            .map_err(|e| ConfigError::Settings(e.to_string()))
    }

    /// Full path of the artifact manifest.
    pub fn manifest_path(&self) -> PathBuf {
        self.reports_dir.join(&self.manifest_file)
    }
}

/// Per-user settings file location, if the platform has a config directory.
pub fn user_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("ocean").join(format!("{SETTINGS_FILE_STEM}.toml")))
}
