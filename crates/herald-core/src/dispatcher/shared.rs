use std::fmt;
use std::result::Result as StdResult;
use std::sync::Arc;

use tokio::sync::RwLock; // Use tokio's RwLock

use crate::dispatcher::{Dispatcher, Response, Subscriber};
use crate::error::Result;
use crate::event::{EventKey, EventNames, Payload, Value};
use crate::listener::{ResolutionError, Subscription};

/// Thread-safe shared dispatcher using a Tokio RwLock.
///
/// Registration takes the write lock; fires and lookups share the read lock,
/// so fires may run in parallel but never alongside a registration.
#[derive(Clone)]
pub struct SharedDispatcher {
    dispatcher: Arc<RwLock<Dispatcher>>,
}

// Manual Debug impl for SharedDispatcher
impl fmt::Debug for SharedDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedDispatcher").finish_non_exhaustive()
    }
}

impl SharedDispatcher {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher: Arc::new(RwLock::new(dispatcher)),
        }
    }

    pub fn clone_dispatcher(&self) -> Arc<RwLock<Dispatcher>> {
        self.dispatcher.clone()
    }

    pub async fn listen(
        &self,
        events: impl Into<EventNames>,
        listener: impl Into<Subscription>,
        priority: i32,
    ) -> StdResult<(), ResolutionError> {
        let mut dispatcher = self.dispatcher.write().await;
        dispatcher.listen(events, listener, priority)
    }

    pub async fn subscribe(&self, subscriber: &dyn Subscriber) -> StdResult<(), ResolutionError> {
        let mut dispatcher = self.dispatcher.write().await;
        dispatcher.subscribe(subscriber)
    }

    /// Listeners run synchronously while the read lock is held.
    pub async fn fire(
        &self,
        event: impl Into<EventKey>,
        payload: impl Into<Payload>,
        halt: bool,
    ) -> Result<Response> {
        let dispatcher = self.dispatcher.read().await;
        dispatcher.fire(event, payload, halt)
    }

    pub async fn until(&self, event: impl Into<EventKey>, payload: impl Into<Payload>) -> Result<Option<Value>> {
        let dispatcher = self.dispatcher.read().await;
        dispatcher.until(event, payload)
    }

    pub async fn has(&self, event: impl Into<EventKey>) -> bool {
        let dispatcher = self.dispatcher.read().await;
        dispatcher.has(event)
    }
}

impl Default for SharedDispatcher {
    fn default() -> Self {
        Self::new(Dispatcher::new())
    }
}

/// Create a new shared dispatcher with no listeners
pub fn create_dispatcher() -> SharedDispatcher {
    SharedDispatcher::default()
}
