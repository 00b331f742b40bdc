//! JSON configuration loading.
//!
//! Every report starts from a JSON object on disk. Loading is fail-fast: an
//! unreadable file, invalid JSON, or a missing/non-numeric required field is a
//! [`ConfigError`] that names the file, and nothing is computed.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::ConfigError;

/// Read and parse a JSON document.
pub fn read_json_value(path: &Path) -> Result<Value, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    serde_json::from_str(&text).map_err(|e| ConfigError::Malformed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Read a JSON document and deserialize it into `T`.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let value = read_json_value(path)?;
    debug!(path = %path.display(), "loaded config");
    from_value(path, value)
}

/// Deserialize an already-parsed document, attributing failures to `path`.
pub fn from_value<T: DeserializeOwned>(path: &Path, value: Value) -> Result<T, ConfigError> {
    serde_json::from_value(value).map_err(|e| ConfigError::Malformed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Reject negative and non-finite inputs.
pub fn require_non_negative(field: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: format!("{value} is not a finite number"),
        });
    }
    if value < 0.0 {
        return Err(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: format!("{value} is negative"),
        });
    }
    Ok(())
}

/// Serde helpers that accept a number or a numeric string, so `"0.02"`
/// and `0.02` load the same way.
pub mod lenient {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumOrText {
        Num(f64),
        Text(String),
    }

    /// Deserialize an `f64` from a JSON number or numeric string.
    pub fn f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match NumOrText::deserialize(deserializer)? {
            NumOrText::Num(n) => Ok(n),
            NumOrText::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| serde::de::Error::custom(format!("`{s}` is not a number"))),
        }
    }

    /// Like [`f64`] but maps JSON `null` to `None`.
    pub fn opt_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        match Option::<NumOrText>::deserialize(deserializer)? {
            None => Ok(None),
            Some(NumOrText::Num(n)) => Ok(Some(n)),
            Some(NumOrText::Text(s)) => s
                .trim()
                .parse::<f64>()
                .map(Some)
                .map_err(|_| serde::de::Error::custom(format!("`{s}` is not a number"))),
        }
    }
}
