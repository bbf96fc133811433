//! # Herald Core Listener Errors
//!
//! Defines [`ResolutionError`], raised while turning a subscription into an
//! invocable listener. Resolution runs when a listener is registered, so every
//! variant here surfaces from `listen`, never from `fire`.
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    #[error("Malformed listener reference '{reference}': {reason}")]
    MalformedReference {
        reference: String,
        reason: String,
    },

    #[error("No listener type bound for '{type_name}'")]
    UnknownType {
        type_name: String,
    },

    #[error("Failed to instantiate listener type '{type_name}': {reason}")]
    InstantiationFailed {
        type_name: String,
        reason: String,
    },

    #[error("Listener type '{type_name}' has no method '{method}'")]
    UnknownMethod {
        type_name: String,
        method: String,
    },
}
