//! Lifecycle events published to the host event bus

use crate::entry::NotificationEntry;
use crate::errors::Result;
use crate::host::EventBus;
use serde::Serialize;
use std::sync::Arc;

pub const NEW_NOTIFY: &str = "newNotify";
pub const REMOVE_NOTIFY: &str = "removeNotify";
pub const CLEAR_NOTIFY_LIST: &str = "clearNotifyList";

/// Every event name this system emits, declared to the bus once at startup
pub const EVENT_NAMES: [&str; 3] = [NEW_NOTIFY, REMOVE_NOTIFY, CLEAR_NOTIFY_LIST];

/// Event published after a registry mutation
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "payload")]
pub enum NotifyEvent {
    /// A notification was stored (or replaced)
    #[serde(rename = "newNotify")]
    NewNotify(NotificationEntry),
    /// A notification id was removed
    #[serde(rename = "removeNotify")]
    RemoveNotify(String),
    /// The whole list was cleared
    #[serde(rename = "clearNotifyList")]
    ClearNotifyList,
}

impl NotifyEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::NewNotify(_) => NEW_NOTIFY,
            Self::RemoveNotify(_) => REMOVE_NOTIFY,
            Self::ClearNotifyList => CLEAR_NOTIFY_LIST,
        }
    }
}

/// Fire-and-forget publisher over the host bus
#[derive(Clone)]
pub struct EventBridge {
    bus: Arc<dyn EventBus>,
}

impl EventBridge {
    /// Declare the emitted event names for `guid`. A refusal here is fatal.
    pub fn register(bus: Arc<dyn EventBus>, guid: &str) -> Result<Self> {
        bus.register_plugin_instance(guid, &EVENT_NAMES)?;
        Ok(Self { bus })
    }

    pub fn new_notify(&self, entry: NotificationEntry) {
        self.bus.publish_event(NotifyEvent::NewNotify(entry));
    }

    pub fn remove_notify(&self, id: &str) {
        self.bus.publish_event(NotifyEvent::RemoveNotify(id.to_string()));
    }

    pub fn clear_notify_list(&self) {
        self.bus.publish_event(NotifyEvent::ClearNotifyList);
    }
}
