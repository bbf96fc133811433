//! # Herald Core
//!
//! In-process event dispatcher. Listeners subscribe to named events with a
//! priority; firing an event calls them in priority order, optionally halting
//! on the first response.
//!
//! ```
//! use herald_core::{Dispatcher, Subscription, Value};
//!
//! let mut dispatcher = Dispatcher::new();
//! dispatcher
//!     .listen("user.created", Subscription::direct(|args| Ok(args[0].clone())), 0)
//!     .unwrap();
//!
//! let responses = dispatcher.fire("user.created", "ada", false).unwrap();
//! assert_eq!(responses.into_responses(), vec![Value::from("ada")]);
//! ```
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod event;
pub mod listener;

// Re-export key public types for easier use by applications
pub use config::{ConfigFormat, DispatcherConfig, ListenerBinding};
pub use dispatcher::shared::{SharedDispatcher, create_dispatcher};
pub use dispatcher::{Dispatcher, Response, Subscriber};
pub use error::{BoxError, DispatchError, Result};
pub use event::{Event, EventKey, EventNames, Payload, Value};
pub use listener::{
    ClassListener, Instantiate, Listener, ListenerContainer, ListenerRef, ListenerResult,
    ResolutionError, Subscription,
};

#[cfg(test)]
mod tests;
