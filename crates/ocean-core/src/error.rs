//! Error types for Ocean report computations.
use thiserror::Error;

/// A malformed or missing configuration value. Always fatal, raised before
/// any computation runs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("cannot read {path}: {reason}")] Unreadable { path: String, reason: String },
    #[error("malformed config {path}: {reason}")] Malformed { path: String, reason: String },
    #[error("invalid value for `{field}`: {reason}")] InvalidValue { field: String, reason: String },
    #[error("no {0} provided")] Empty(String),
    #[error("invalid report date `{0}` (expected YYYY-MM-DD)")] InvalidDate(String),
    #[error("settings: {0}")] Settings(String),
}

/// A required upstream report artifact is absent, unreadable, stale, or lacks
/// the fields a dependent computation needs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DependencyError {
    #[error("missing {kind} report")] NotFound { kind: String },
    #[error("cannot read {path}: {reason}")] Unreadable { path: String, reason: String },
    #[error("{path} is missing `{field}`")] MissingField { path: String, field: String },
    #[error("{path} changed since it was recorded: expected digest {expected}, found {actual}")] DigestMismatch { path: String, expected: String, actual: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OceanError {
    #[error(transparent)] Config(#[from] ConfigError),
    #[error(transparent)] MissingDependency(#[from] DependencyError),
    #[error("io: {0}")] Io(String),
    #[error("serialization: {0}")] Serialization(String),
}

impl From<std::io::Error> for OceanError {
    fn from(e: std::io::Error) -> Self {
        OceanError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for OceanError {
    fn from(e: serde_json::Error) -> Self {
        OceanError::Serialization(e.to_string())
    }
}
