use std::collections::HashMap;
use std::fmt;
use std::result::Result as StdResult;

use log::{debug, warn};

use crate::error::BoxError;
use crate::event::short_type_name;
use crate::listener::ClassListener;
use crate::listener::error::ResolutionError;

/// Host capability for building listener instances by type identifier.
///
/// Only type references (`"Type@method"`) go through here. Implemented for
/// [`ListenerContainer`] and for plain closures, so an application can plug in
/// whatever object construction it already has.
pub trait Instantiate: Send + Sync {
    fn instantiate(&self, type_name: &str) -> StdResult<Box<dyn ClassListener>, ResolutionError>;
}

impl<F> Instantiate for F
where
    F: Fn(&str) -> StdResult<Box<dyn ClassListener>, ResolutionError> + Send + Sync,
{
    fn instantiate(&self, type_name: &str) -> StdResult<Box<dyn ClassListener>, ResolutionError> {
        self(type_name)
    }
}

type Constructor = Box<dyn Fn() -> StdResult<Box<dyn ClassListener>, BoxError> + Send + Sync>;

/// Table of zero-argument constructors keyed by type identifier.
#[derive(Default)]
pub struct ListenerContainer {
    constructors: HashMap<String, Constructor>,
}

// Manual Debug implementation
impl fmt::Debug for ListenerContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerContainer")
            .field("bound_types", &self.bound_types())
            .finish()
    }
}

impl ListenerContainer {
    pub fn new() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// Bind `type_name` to `T::default()`.
    pub fn bind<T>(&mut self, type_name: impl Into<String>) -> &mut Self
    where
        T: ClassListener + Default + 'static,
    {
        self.bind_with(type_name, || Ok(T::default()))
    }

    /// Bind `T` under its short type name, e.g. `ReportMailer`. Types whose
    /// short names match replace each other.
    pub fn bind_type<T>(&mut self) -> &mut Self
    where
        T: ClassListener + Default + 'static,
    {
        self.bind::<T>(short_type_name(std::any::type_name::<T>()))
    }

    /// Bind `type_name` to a fallible constructor.
    pub fn bind_with<T, F>(&mut self, type_name: impl Into<String>, constructor: F) -> &mut Self
    where
        T: ClassListener + 'static,
        F: Fn() -> StdResult<T, BoxError> + Send + Sync + 'static,
    {
        let type_name = type_name.into();
        debug!("Binding listener type '{}'", type_name);
        let replaced = self.constructors.insert(
            type_name.clone(),
            Box::new(move || constructor().map(|instance| Box::new(instance) as Box<dyn ClassListener>)),
        );
        if replaced.is_some() {
            warn!("Listener type '{}' was already bound; replacing its constructor", type_name);
        }
        self
    }

    /// Check if a constructor is bound for `type_name`
    pub fn is_bound(&self, type_name: &str) -> bool {
        self.constructors.contains_key(type_name)
    }

    /// Get all bound type identifiers
    pub fn bound_types(&self) -> Vec<String> {
        self.constructors.keys().cloned().collect()
    }
}

impl Instantiate for ListenerContainer {
    fn instantiate(&self, type_name: &str) -> StdResult<Box<dyn ClassListener>, ResolutionError> {
        let constructor = self
            .constructors
            .get(type_name)
            .ok_or_else(|| ResolutionError::UnknownType {
                type_name: type_name.to_string(),
            })?;

        constructor().map_err(|e| ResolutionError::InstantiationFailed {
            type_name: type_name.to_string(),
            reason: e.to_string(),
        })
    }
}
