//! # Herald Core Events
//!
//! Types describing *what* gets fired: the [`Event`] trait for object events,
//! [`EventKey`] for the "name or object" argument accepted by the dispatcher,
//! [`EventNames`] for registering against several names at once, and the
//! dynamic [`Value`]/[`Payload`] pair carried to listeners.
pub mod value;

use std::any::Any;
use std::fmt;
use std::sync::Arc;

pub use value::{Payload, Value};

/// Core event trait for object events.
///
/// Firing an object event routes it by [`Event::event_name`] and hands the
/// object itself to listeners as the single payload argument.
pub trait Event: Any + fmt::Debug + Send + Sync {
    /// Name this event is routed by. Defaults to the short type name,
    /// e.g. `OrderPlaced` for `shop::orders::OrderPlaced`.
    ///
    /// The module path is dropped, so `shop::Created` and `users::Created`
    /// share the name `Created` and reach the same listeners. Override this
    /// when two event types would otherwise collide.
    fn event_name(&self) -> &str {
        short_type_name(std::any::type_name::<Self>())
    }

    /// Cast to Any for downcasting
    fn as_any(&self) -> &dyn Any;
}

/// Strip the module path and any generic arguments from a type name.
pub fn short_type_name(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// The event argument accepted by `fire` and `has`: a bare name or an object.
#[derive(Debug, Clone)]
pub enum EventKey {
    Name(String),
    Object(Arc<dyn Event>),
}

impl EventKey {
    /// Wrap an event object.
    pub fn object<E: Event>(event: E) -> Self {
        EventKey::Object(Arc::new(event))
    }

    /// The name listeners are looked up by.
    pub fn name(&self) -> &str {
        match self {
            EventKey::Name(name) => name.as_str(),
            EventKey::Object(event) => event.event_name(),
        }
    }

    /// Resolve the routed name and the payload handed to listeners.
    ///
    /// An object event replaces whatever payload was given with the object itself.
    pub fn normalize(self, payload: Payload) -> (String, Payload) {
        match self {
            EventKey::Name(name) => (name, payload),
            EventKey::Object(event) => {
                let name = event.event_name().to_string();
                (name, Payload::from(vec![Value::Object(event)]))
            }
        }
    }
}

impl From<&str> for EventKey {
    fn from(name: &str) -> Self {
        EventKey::Name(name.to_string())
    }
}

impl From<String> for EventKey {
    fn from(name: String) -> Self {
        EventKey::Name(name)
    }
}

impl From<&String> for EventKey {
    fn from(name: &String) -> Self {
        EventKey::Name(name.clone())
    }
}

impl From<Arc<dyn Event>> for EventKey {
    fn from(event: Arc<dyn Event>) -> Self {
        EventKey::Object(event)
    }
}

/// One or more event names a listener is registered against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventNames(Vec<String>);

impl EventNames {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for EventNames {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<&str> for EventNames {
    fn from(name: &str) -> Self {
        EventNames(vec![name.to_string()])
    }
}

impl From<String> for EventNames {
    fn from(name: String) -> Self {
        EventNames(vec![name])
    }
}

impl From<Vec<String>> for EventNames {
    fn from(names: Vec<String>) -> Self {
        EventNames(names)
    }
}

impl From<Vec<&str>> for EventNames {
    fn from(names: Vec<&str>) -> Self {
        EventNames(names.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for EventNames {
    fn from(names: &[&str]) -> Self {
        EventNames(names.iter().map(|name| name.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for EventNames {
    fn from(names: [&str; N]) -> Self {
        EventNames(names.iter().map(|name| name.to_string()).collect())
    }
}
