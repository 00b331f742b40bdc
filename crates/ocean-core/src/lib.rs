//! # ocean-core
//! Shared foundation for the Ocean report tools.
//!
//! - [`error`] — `OceanError` and its `ConfigError` / `DependencyError` parts
//! - [`constants`] — model constants and default file names
//! - [`settings`] — tool settings layered from defaults, files and environment
//! - [`input`] — JSON config loading with lenient numeric parsing
//! - [`artifact`] — report writer, digest-tagged references and the manifest
//! - [`traits`] — the [`Report`](traits::Report) contract every report implements

pub mod artifact;
pub mod constants;
pub mod date;
pub mod error;
pub mod input;
pub mod numeric;
pub mod settings;
pub mod traits;

pub use artifact::{ArtifactKind, ArtifactRef, ArtifactStore, Manifest};
pub use error::{ConfigError, DependencyError, OceanError};
pub use settings::Settings;
pub use traits::Report;
