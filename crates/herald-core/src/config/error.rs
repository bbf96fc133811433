//! # Herald Core Configuration Errors
//!
//! Defines [`ConfigError`] for loading a [`DispatcherConfig`](crate::config::DispatcherConfig)
//! from a string or a file.
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error reading config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unknown or unsupported config format for path: {path}")]
    UnsupportedFormat { path: PathBuf },

    #[error("Failed to deserialize config from {format}: {reason}")]
    Deserialization { format: String, reason: String },

    #[error("Failed to serialize config to {format}: {reason}")]
    Serialization { format: String, reason: String },
}
