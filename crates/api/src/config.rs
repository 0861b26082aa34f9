//! Default manager configuration via TOML
//!
//! A host can describe which manager to use, and with which settings, in
//! a small TOML document:
//!
//! ```toml
//! [manager]
//! identifier = "org.example.manager"
//!
//! [manager.settings]
//! library_path = "/mnt/assets"
//! cache_size = 512
//! read_only = false
//! ```
//!
//! Settings values must be booleans, integers, floats or strings. The
//! host decides where the file lives; nothing is read from the
//! environment.

use assetgate_core::{Error, InfoDictionary, Result, Value};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Manager selection and settings loaded from TOML
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ManagerConfig {
    /// Identifier of the manager to instantiate
    pub identifier: String,
    /// Settings passed to `initialize`
    pub settings: InfoDictionary,
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    #[serde(default)]
    manager: RawManagerSection,
}

#[derive(Debug, Default, Deserialize)]
struct RawManagerSection {
    #[serde(default)]
    identifier: String,
    #[serde(default)]
    settings: toml::Table,
}

fn setting_value(key: &str, value: toml::Value) -> Result<Value> {
    match value {
        toml::Value::Boolean(b) => Ok(Value::Bool(b)),
        toml::Value::Integer(i) => Ok(Value::Int(i)),
        toml::Value::Float(f) => Ok(Value::Float(f)),
        toml::Value::String(s) => Ok(Value::String(s)),
        _ => Err(Error::configuration(format!(
            "Unsupported value type for '{}'.",
            key
        ))),
    }
}

impl ManagerConfig {
    /// Parse a config document
    ///
    /// # Errors
    ///
    /// `Configuration` if the document is not valid TOML, or a setting has
    /// an unsupported type.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(content).map_err(|e| {
            Error::configuration(format!("Failed to parse manager config: {}", e))
        })?;

        let mut settings = InfoDictionary::new();
        for (key, value) in raw.manager.settings {
            let value = setting_value(&key, value)?;
            settings.insert(key, value);
        }

        Ok(ManagerConfig {
            identifier: raw.manager.identifier,
            settings,
        })
    }

    /// Read and parse a config file
    ///
    /// # Errors
    ///
    /// `Configuration` if the file does not exist, cannot be read, or does
    /// not parse.
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!(
            target: "assetgate::factory",
            path = %path.display(),
            "Loading default manager config"
        );

        if !path.exists() {
            return Err(Error::configuration(format!(
                "Could not load default manager config from '{}', file does not exist.",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::configuration(format!(
                "Failed to read manager config '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }
}
