//! In-process event bus over a tokio broadcast channel

use super::EventBus;
use crate::errors::{NotificationError, Result};
use crate::events::NotifyEvent;
use parking_lot::Mutex;
use std::collections::HashMap;
use tokio::sync::broadcast;

/// Channel capacity; slow subscribers see `Lagged` past this
const BUS_CAPACITY: usize = 256;

/// Event bus that fans events out to any number of subscribers
pub struct BroadcastEventBus {
    sender: broadcast::Sender<NotifyEvent>,
    /// guid -> declared event names
    registered: Mutex<HashMap<String, Vec<&'static str>>>,
}

impl Default for BroadcastEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl BroadcastEventBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(BUS_CAPACITY);
        Self {
            sender,
            registered: Mutex::new(HashMap::new()),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<NotifyEvent> {
        self.sender.subscribe()
    }

    fn is_declared(&self, name: &str) -> bool {
        self.registered
            .lock()
            .values()
            .any(|names| names.contains(&name))
    }
}

impl EventBus for BroadcastEventBus {
    fn register_plugin_instance(&self, guid: &str, events: &[&'static str]) -> Result<()> {
        let mut registered = self.registered.lock();
        if registered.contains_key(guid) {
            return Err(NotificationError::EventBus(format!(
                "plugin instance '{guid}' is already registered"
            )));
        }
        registered.insert(guid.to_string(), events.to_vec());
        tracing::debug!(guid = %guid, events = ?events, "Registered plugin instance");
        Ok(())
    }

    fn publish_event(&self, event: NotifyEvent) {
        let name = event.name();
        if !self.is_declared(name) {
            tracing::warn!(event = name, "Dropping undeclared event");
            return;
        }

        // No subscribers is not an error
        match self.sender.send(event) {
            Ok(receivers) => tracing::trace!(event = name, receivers, "Published event"),
            Err(_) => tracing::trace!(event = name, "Published event with no subscribers"),
        }
    }
}
