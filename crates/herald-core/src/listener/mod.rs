pub mod container;
pub mod error;
pub mod registry;
pub mod resolver;

use std::fmt;
use std::result::Result as StdResult;
use std::sync::Arc;

use crate::error::{BoxError, Result};
use crate::event::{Payload, Value};

/// Method bound when a type reference names no method
pub const DEFAULT_METHOD: &str = "handle";

/// Separator between type identifier and method in a type reference
pub const METHOD_SEPARATOR: char = '@';

/// What a listener body returns. `Ok(Value::Null)` is "no response".
pub type ListenerResult = StdResult<Value, BoxError>;

/// Raw callable accepted by [`Subscription::Direct`]. Receives the payload
/// arguments in order.
pub type DirectFn = Arc<dyn Fn(&[Value]) -> ListenerResult + Send + Sync>;

type InvokeFn = Arc<dyn Fn(&str, &Payload) -> Result<Value> + Send + Sync>;

/// A resolved listener: the uniform `(event name, payload) -> result` invocable
/// stored in the registry.
#[derive(Clone)]
pub struct Listener {
    label: String,
    invoke: InvokeFn,
}

impl Listener {
    pub fn new<F>(label: impl Into<String>, invoke: F) -> Self
    where
        F: Fn(&str, &Payload) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            invoke: Arc::new(invoke),
        }
    }

    /// Human readable origin, e.g. `closure` or `ReportMailer@handle`.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn invoke(&self, event: &str, payload: &Payload) -> Result<Value> {
        (self.invoke)(event, payload)
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Listener instance created by type reference (`"Type@method"`).
///
/// The instance is built once when the listener is registered and then kept
/// for every fire, so `&mut self` state carries across fires.
pub trait ClassListener: Send {
    /// Whether `method` can be bound on this instance. Checked at registration.
    fn responds_to(&self, method: &str) -> bool {
        method == DEFAULT_METHOD
    }

    /// Invoke `method` with the payload arguments.
    fn call(&mut self, method: &str, args: &[Value]) -> ListenerResult;
}

/// A subscription before resolution.
#[derive(Clone)]
pub enum Subscription {
    /// A closure called with the payload arguments
    Direct(DirectFn),
    /// A `"Type@method"` reference instantiated through the container
    TypeRef(String),
}

impl Subscription {
    pub fn direct<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> ListenerResult + Send + Sync + 'static,
    {
        Subscription::Direct(Arc::new(f))
    }

    pub fn type_ref(reference: impl Into<String>) -> Self {
        Subscription::TypeRef(reference.into())
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subscription::Direct(_) => f.write_str("Direct(..)"),
            Subscription::TypeRef(reference) => f.debug_tuple("TypeRef").field(reference).finish(),
        }
    }
}

impl From<&str> for Subscription {
    fn from(reference: &str) -> Self {
        Subscription::TypeRef(reference.to_string())
    }
}

impl From<String> for Subscription {
    fn from(reference: String) -> Self {
        Subscription::TypeRef(reference)
    }
}

impl From<DirectFn> for Subscription {
    fn from(f: DirectFn) -> Self {
        Subscription::Direct(f)
    }
}

/// Parsed type reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerRef {
    pub type_name: String,
    pub method: String,
}

impl fmt::Display for ListenerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.type_name, METHOD_SEPARATOR, self.method)
    }
}

/// Re-export important types
pub use container::{Instantiate, ListenerContainer};
pub use error::ResolutionError;
pub use registry::{ListenerRegistry, Registration};
pub use resolver::{ListenerResolver, parse_reference};
