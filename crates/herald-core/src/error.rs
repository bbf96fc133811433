//! # Herald Core Errors
//!
//! [`DispatchError`] is the crate-level error. It wraps the subsystem errors
//! ([`ResolutionError`], [`ConfigError`]) and carries failures raised by
//! listeners while an event is being fired.
use std::error::Error as StdError;
use std::result::Result as StdResult;

use thiserror::Error;

use crate::config::error::ConfigError;
use crate::listener::error::ResolutionError;

/// Boxed error returned by listeners.
pub type BoxError = Box<dyn StdError + Send + Sync>;

#[derive(Debug, Error)]
pub enum DispatchError {
    /// A subscription could not be resolved at registration time
    #[error("Listener resolution error: {0}")]
    Resolution(#[from] ResolutionError),

    /// A listener returned an error; the remaining listeners were skipped
    #[error("Listener failed while handling event '{event}': {source}")]
    ListenerFailed {
        event: String,
        #[source]
        source: BoxError,
    },

    /// A stateful listener instance panicked during an earlier fire
    #[error("Listener '{listener}' is poisoned by an earlier panic")]
    ListenerPoisoned { listener: String },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for dispatcher operations
pub type Result<T> = StdResult<T, DispatchError>;
