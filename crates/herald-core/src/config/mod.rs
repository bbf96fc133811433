//! # Herald Core Configuration
//!
//! Declarative dispatcher setup: the default method for type references and a
//! list of listener bindings, loadable from JSON, YAML (`yaml-config` feature)
//! or TOML (`toml-config` feature). Apply it with
//! [`Dispatcher::from_config`](crate::dispatcher::Dispatcher::from_config).
pub mod error;

use std::fs;
use std::path::Path;
use std::result::Result as StdResult;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::listener::DEFAULT_METHOD;

pub use error::ConfigError;

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigFormat {
    /// JSON format (.json)
    Json,
    /// YAML format (.yaml, .yml) - requires "yaml-config" feature
    #[cfg(feature = "yaml-config")]
    Yaml,
    /// TOML format (.toml) - requires "toml-config" feature
    #[cfg(feature = "toml-config")]
    Toml,
}

impl ConfigFormat {
    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ConfigFormat::Json => "json",
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => "yaml",
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => "toml",
        }
    }

    /// Determine format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_lowercase().as_str() {
                "json" => Some(ConfigFormat::Json),
                #[cfg(feature = "yaml-config")]
                "yaml" | "yml" => Some(ConfigFormat::Yaml),
                #[cfg(feature = "toml-config")]
                "toml" => Some(ConfigFormat::Toml),
                _ => None,
            })
    }
}

fn default_method() -> String {
    DEFAULT_METHOD.to_string()
}

/// One declarative subscription: a type reference listening to some events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListenerBinding {
    /// Event names the listener is registered for
    pub events: Vec<String>,
    /// Type reference, `"Type"` or `"Type@method"`
    pub listener: String,
    #[serde(default)]
    pub priority: i32,
}

impl ListenerBinding {
    pub fn new<I, S>(events: I, listener: impl Into<String>, priority: i32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            events: events.into_iter().map(Into::into).collect(),
            listener: listener.into(),
            priority,
        }
    }
}

/// Dispatcher configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatcherConfig {
    /// Method bound for type references without `@method`
    #[serde(default = "default_method")]
    pub default_method: String,
    /// Listener bindings, registered in order
    #[serde(default)]
    pub listeners: Vec<ListenerBinding>,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            default_method: default_method(),
            listeners: Vec::new(),
        }
    }
}

impl DispatcherConfig {
    /// Add a binding
    pub fn bind(mut self, binding: ListenerBinding) -> Self {
        self.listeners.push(binding);
        self
    }

    /// Deserialize from string based on format
    pub fn deserialize(data: &str, format: ConfigFormat) -> StdResult<Self, ConfigError> {
        let failed = |reason: String| ConfigError::Deserialization {
            format: format.extension().to_string(),
            reason,
        };

        match format {
            ConfigFormat::Json => serde_json::from_str(data).map_err(|e| failed(e.to_string())),
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => serde_yaml::from_str(data).map_err(|e| failed(e.to_string())),
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => toml::from_str(data).map_err(|e| failed(e.to_string())),
        }
    }

    /// Serialize to string based on format
    pub fn serialize(&self, format: ConfigFormat) -> StdResult<String, ConfigError> {
        let failed = |reason: String| ConfigError::Serialization {
            format: format.extension().to_string(),
            reason,
        };

        match format {
            ConfigFormat::Json => serde_json::to_string_pretty(self).map_err(|e| failed(e.to_string())),
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => serde_yaml::to_string(self).map_err(|e| failed(e.to_string())),
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => toml::to_string_pretty(self).map_err(|e| failed(e.to_string())),
        }
    }

    /// Load configuration from a file; the extension selects the format.
    pub fn load(path: &Path) -> StdResult<Self, ConfigError> {
        let format = ConfigFormat::from_path(path).ok_or_else(|| ConfigError::UnsupportedFormat {
            path: path.to_path_buf(),
        })?;

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::deserialize(&content, format)?;
        debug!(
            "Loaded dispatcher config from {} with {} binding(s)",
            path.display(),
            config.listeners.len()
        );
        Ok(config)
    }
}
