use std::fmt;
use std::result::Result as StdResult;
use std::sync::{Arc, Mutex};

use log::debug;

use crate::error::DispatchError;
use crate::listener::container::{Instantiate, ListenerContainer};
use crate::listener::error::ResolutionError;
use crate::listener::{DEFAULT_METHOD, Listener, ListenerRef, METHOD_SEPARATOR, Subscription};

/// Split a `"Type@method"` reference into its parts.
///
/// Without a separator the whole string is the type and `default_method` is
/// bound. Only the first separator splits; the rest belongs to the method.
pub fn parse_reference(reference: &str, default_method: &str) -> StdResult<ListenerRef, ResolutionError> {
    let malformed = |reason: &str| ResolutionError::MalformedReference {
        reference: reference.to_string(),
        reason: reason.to_string(),
    };

    let (type_name, method) = match reference.split_once(METHOD_SEPARATOR) {
        Some((type_name, method)) => (type_name.trim(), method.trim()),
        None => (reference.trim(), default_method),
    };

    if type_name.is_empty() {
        return Err(malformed("missing type identifier"));
    }
    if method.is_empty() {
        return Err(malformed("missing method name"));
    }

    Ok(ListenerRef {
        type_name: type_name.to_string(),
        method: method.to_string(),
    })
}

/// Turns subscriptions into [`Listener`]s. Runs once per registration.
pub struct ListenerResolver {
    container: Arc<dyn Instantiate>,
    default_method: String,
}

impl fmt::Debug for ListenerResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerResolver")
            .field("default_method", &self.default_method)
            .finish_non_exhaustive()
    }
}

impl ListenerResolver {
    pub fn new(container: Arc<dyn Instantiate>) -> Self {
        Self {
            container,
            default_method: DEFAULT_METHOD.to_string(),
        }
    }

    /// Method bound for references without an explicit `@method`.
    pub fn with_default_method(mut self, method: impl Into<String>) -> Self {
        self.default_method = method.into();
        self
    }

    pub fn default_method(&self) -> &str {
        &self.default_method
    }

    pub fn set_default_method(&mut self, method: impl Into<String>) {
        self.default_method = method.into();
    }

    /// Resolve a subscription into an invocable listener.
    ///
    /// Type references are instantiated here, not at fire time, so a bad
    /// reference fails now and the instance is shared by every later fire.
    pub fn resolve(&self, subscription: &Subscription) -> StdResult<Listener, ResolutionError> {
        match subscription {
            Subscription::Direct(f) => {
                let f = Arc::clone(f);
                Ok(Listener::new("closure", move |event: &str, payload| {
                    f(payload.args()).map_err(|source| DispatchError::ListenerFailed {
                        event: event.to_string(),
                        source,
                    })
                }))
            }
            Subscription::TypeRef(reference) => self.resolve_reference(reference),
        }
    }

    fn resolve_reference(&self, reference: &str) -> StdResult<Listener, ResolutionError> {
        let listener_ref = parse_reference(reference, &self.default_method)?;
        let instance = self.container.instantiate(&listener_ref.type_name)?;

        if !instance.responds_to(&listener_ref.method) {
            return Err(ResolutionError::UnknownMethod {
                type_name: listener_ref.type_name,
                method: listener_ref.method,
            });
        }

        debug!("Resolved listener '{}'", listener_ref);

        let label = listener_ref.to_string();
        let poisoned_label = label.clone();
        let method = listener_ref.method;
        let instance = Mutex::new(instance);

        Ok(Listener::new(label, move |event: &str, payload| {
            let mut instance = instance.lock().map_err(|_| DispatchError::ListenerPoisoned {
                listener: poisoned_label.clone(),
            })?;
            instance
                .call(&method, payload.args())
                .map_err(|source| DispatchError::ListenerFailed {
                    event: event.to_string(),
                    source,
                })
        }))
    }
}

impl Default for ListenerResolver {
    fn default() -> Self {
        Self::new(Arc::new(ListenerContainer::new()))
    }
}
