use std::collections::HashMap;
use std::fmt;

use log::debug;

use crate::listener::Listener;

/// A listener stored for one event, with the priority it was registered at.
#[derive(Debug, Clone)]
pub struct Registration {
    priority: i32,
    listener: Listener,
}

impl Registration {
    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn listener(&self) -> &Listener {
        &self.listener
    }
}

/// Registry of resolved listeners keyed by event name.
///
/// Each event keeps a single sequence already in firing order: priority
/// descending, then registration order. Inserts place the new entry after
/// every entry of equal or higher priority, so lookups never sort.
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: HashMap<String, Vec<Registration>>,
}

// Manual Debug implementation
impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: HashMap<&String, usize> = self
            .listeners
            .iter()
            .map(|(event, entries)| (event, entries.len()))
            .collect();
        f.debug_struct("ListenerRegistry")
            .field("listeners", &counts)
            .finish()
    }
}

impl ListenerRegistry {
    /// Create a new listener registry
    pub fn new() -> Self {
        Self {
            listeners: HashMap::new(),
        }
    }

    /// Register a resolved listener for `event` at `priority`.
    pub fn register(&mut self, event: impl Into<String>, priority: i32, listener: Listener) {
        let event = event.into();
        debug!(
            "Registering listener '{}' for event '{}' at priority {}",
            listener.label(),
            event,
            priority
        );

        let entries = self.listeners.entry(event).or_default();
        // Sorted by descending priority, so this is the first slot past every
        // entry that must run before the new one.
        let index = entries.partition_point(|entry| entry.priority >= priority);
        entries.insert(index, Registration { priority, listener });
    }

    /// Listeners for `event` in firing order. Unknown events yield an empty slice.
    pub fn listeners_for(&self, event: &str) -> &[Registration] {
        self.listeners
            .get(event)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Check if at least one listener is registered for exactly `event`
    pub fn has_listeners(&self, event: &str) -> bool {
        !self.listeners_for(event).is_empty()
    }

    /// Number of listeners registered for `event`
    pub fn listener_count(&self, event: &str) -> usize {
        self.listeners_for(event).len()
    }

    /// Get all event names with at least one listener
    pub fn event_names(&self) -> Vec<String> {
        self.listeners.keys().cloned().collect()
    }

    /// Check if no listener is registered at all
    pub fn is_empty(&self) -> bool {
        self.listeners.values().all(Vec::is_empty)
    }
}
