pub mod shared;

use std::fmt;
use std::result::Result as StdResult;
use std::sync::Arc;

use log::{debug, trace, warn};

use crate::config::DispatcherConfig;
use crate::error::Result;
use crate::event::{EventKey, EventNames, Payload, Value};
use crate::listener::{
    Instantiate, Listener, ListenerRegistry, ListenerResolver, ResolutionError,
    Subscription,
};

/// Outcome of [`Dispatcher::fire`].
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// Every response collected without halting, in firing order. Shorter
    /// than the listener count when a listener returned `false`.
    Collected(Vec<Value>),
    /// Halting fire: the first non-null response, or `None` if every listener
    /// answered `Null` (or there were none).
    Halted(Option<Value>),
}

impl Response {
    pub fn is_halted(&self) -> bool {
        matches!(self, Response::Halted(_))
    }

    /// Collected responses; `None` for a halting fire.
    pub fn responses(&self) -> Option<&[Value]> {
        match self {
            Response::Collected(responses) => Some(responses),
            Response::Halted(_) => None,
        }
    }

    /// Collected responses; empty for a halting fire.
    pub fn into_responses(self) -> Vec<Value> {
        match self {
            Response::Collected(responses) => responses,
            Response::Halted(_) => Vec::new(),
        }
    }

    /// The halting response; `None` for a collecting fire.
    pub fn into_halted(self) -> Option<Value> {
        match self {
            Response::Halted(value) => value,
            Response::Collected(_) => None,
        }
    }
}

/// Registers several listeners at once.
pub trait Subscriber: Send + Sync {
    fn subscribe(&self, dispatcher: &mut Dispatcher) -> StdResult<(), ResolutionError>;
}

/// Event dispatcher: resolves listeners on registration and fires events to
/// them in priority order.
///
/// Build one per application root and pass it (or a [`shared::SharedDispatcher`])
/// to whatever needs to publish or subscribe.
pub struct Dispatcher {
    registry: ListenerRegistry,
    resolver: ListenerResolver,
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("registry", &self.registry)
            .field("resolver", &self.resolver)
            .finish()
    }
}

impl Dispatcher {
    /// Dispatcher with an empty container: closures only, every type reference
    /// fails to resolve.
    pub fn new() -> Self {
        Self::with_resolver(ListenerResolver::default())
    }

    /// Dispatcher that instantiates type references through `container`.
    pub fn with_container(container: impl Instantiate + 'static) -> Self {
        Self::with_resolver(ListenerResolver::new(Arc::new(container)))
    }

    pub fn with_resolver(resolver: ListenerResolver) -> Self {
        Self {
            registry: ListenerRegistry::new(),
            resolver,
        }
    }

    /// Build a dispatcher and register every binding in `config`.
    pub fn from_config(config: &DispatcherConfig, container: impl Instantiate + 'static) -> Result<Self> {
        let mut dispatcher = Self::with_container(container);
        dispatcher.apply_config(config)?;
        Ok(dispatcher)
    }

    /// Adopt the configured default method and register the configured bindings.
    ///
    /// Stops at the first binding that fails to resolve; bindings before it
    /// stay registered.
    pub fn apply_config(&mut self, config: &DispatcherConfig) -> Result<()> {
        self.resolver.set_default_method(config.default_method.as_str());
        for binding in &config.listeners {
            self.listen(
                binding.events.clone(),
                binding.listener.as_str(),
                binding.priority,
            )?;
        }
        debug!("Applied {} configured listener binding(s)", config.listeners.len());
        Ok(())
    }

    /// Register `listener` for one or more events.
    ///
    /// The listener is resolved once per event name; repeated calls register
    /// it again rather than deduplicating. Every name is resolved before any
    /// is registered, so a failure leaves the registry untouched. A bad
    /// reference fails even when `events` is empty.
    pub fn listen(
        &mut self,
        events: impl Into<EventNames>,
        listener: impl Into<Subscription>,
        priority: i32,
    ) -> StdResult<(), ResolutionError> {
        let subscription = listener.into();
        let events = events.into();

        if events.is_empty() {
            self.resolver.resolve(&subscription)?;
            debug!("Listener resolved but registered for no events");
            return Ok(());
        }

        let resolved = events
            .into_iter()
            .map(|event| self.resolver.resolve(&subscription).map(|listener| (event, listener)))
            .collect::<StdResult<Vec<_>, _>>()?;

        for (event, listener) in resolved {
            self.registry.register(event, priority, listener);
        }
        Ok(())
    }

    /// Let `subscriber` register its listeners.
    pub fn subscribe(&mut self, subscriber: &dyn Subscriber) -> StdResult<(), ResolutionError> {
        subscriber.subscribe(self)
    }

    /// Fire an event.
    ///
    /// Listeners run in order on the calling thread. With `halt`, the first
    /// non-null response is returned and nothing after it runs; that check
    /// comes first, so even `false` is returned as the halting response.
    /// Otherwise a `false` response stops propagation without being collected.
    /// A listener error aborts the fire and is returned as is.
    pub fn fire(
        &self,
        event: impl Into<EventKey>,
        payload: impl Into<Payload>,
        halt: bool,
    ) -> Result<Response> {
        let (event, payload) = event.into().normalize(payload.into());
        let mut responses = Vec::new();

        for registration in self.registry.listeners_for(&event) {
            let listener = registration.listener();
            trace!("Invoking listener '{}' for event '{}'", listener.label(), event);

            let response = listener.invoke(&event, &payload).inspect_err(|e| {
                warn!("Listener '{}' failed for event '{}': {}", listener.label(), event, e);
            })?;

            if halt && !response.is_null() {
                debug!("Event '{}' halted by listener '{}'", event, listener.label());
                return Ok(Response::Halted(Some(response)));
            }

            if response.is_false() {
                debug!("Event '{}' propagation stopped by listener '{}'", event, listener.label());
                break;
            }

            responses.push(response);
        }

        Ok(if halt {
            Response::Halted(None)
        } else {
            Response::Collected(responses)
        })
    }

    /// Fire until the first non-null response and return it.
    pub fn until(&self, event: impl Into<EventKey>, payload: impl Into<Payload>) -> Result<Option<Value>> {
        self.fire(event, payload, true).map(Response::into_halted)
    }

    /// Check if the event (by name, or by an object's event name) has listeners
    pub fn has(&self, event: impl Into<EventKey>) -> bool {
        self.registry.has_listeners(event.into().name())
    }

    /// Resolved listeners for the event in firing order.
    pub fn listeners_for(&self, event: impl Into<EventKey>) -> Vec<&Listener> {
        self.registry
            .listeners_for(event.into().name())
            .iter()
            .map(|registration| registration.listener())
            .collect()
    }

    pub fn registry(&self) -> &ListenerRegistry {
        &self.registry
    }

    pub fn resolver(&self) -> &ListenerResolver {
        &self.resolver
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}
