//! Notification registry
//!
//! Single source of truth for active notifications. Each `create` assigns an
//! id, stores the entry, announces it on the event bus and, when the host
//! window is hidden, escalates to a native desktop notification.
//!
//! Identity:
//! - a `tag` yields the stable id `tag-<tag>`; reusing it replaces the entry
//!   in place (last write wins, list position kept)
//! - no tag yields a fresh UUID v4
//!
//! The list lock is never held across an await or while publishing, so bus
//! subscribers may read the registry from inside their handler.

use crate::entry::{NotificationEntry, NotificationKind, NotificationOptions};
use crate::errors::Result;
use crate::events::EventBridge;
use crate::host::{HostEnvironment, HostWindow, LogSink, NativeHandle, NativeNotifications, Permission};
use crate::meta::{self, RegistrationMeta};
use crate::notifier::DesktopNotifier;
use crate::permission::PermissionGate;
use indexmap::IndexMap;
use parking_lot::Mutex;
use rand::distributions::Alphanumeric;
use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::Arc;
use uuid::Uuid;

/// Seconds a self-test float notification stays on screen
const TEST_FLOAT_TIME: u64 = 5;

/// Upper bound (exclusive) on words in a self-test body
const TEST_MAX_WORDS: usize = 50;

pub struct NotificationRegistry {
    guid: String,
    /// id -> entry, in insertion order
    list: Mutex<IndexMap<String, NotificationEntry>>,
    events: EventBridge,
    permission: PermissionGate,
    notifier: DesktopNotifier,
    native: Option<Arc<dyn NativeNotifications>>,
    window: Arc<dyn HostWindow>,
    log: Arc<dyn LogSink>,
}

impl NotificationRegistry {
    /// Build the registry and declare its events on the host bus.
    ///
    /// Fails when the bus refuses the registration.
    pub fn new(guid: impl Into<String>, host: HostEnvironment) -> Result<Self> {
        let guid = guid.into();
        let events = EventBridge::register(Arc::clone(&host.events), &guid)?;

        Ok(Self {
            guid,
            list: Mutex::new(IndexMap::new()),
            events,
            permission: PermissionGate::new(host.native.clone()),
            notifier: DesktopNotifier::new(
                host.native.clone(),
                Arc::clone(&host.window),
                Arc::clone(&host.log),
            ),
            native: host.native,
            window: host.window,
            log: host.log,
        })
    }

    pub fn registration_meta() -> RegistrationMeta {
        meta::registration_meta()
    }

    pub fn guid(&self) -> &str {
        &self.guid
    }

    pub fn is_support_notification_api(&self) -> bool {
        self.native.is_some()
    }

    /// Register a notification and return its id.
    ///
    /// Permission problems never fail the call; only a native construction
    /// error does, after the entry is already stored and announced.
    pub async fn create(
        &self,
        title: impl Into<String>,
        body: impl Into<String>,
        mut options: NotificationOptions,
    ) -> Result<String> {
        let id = match &options.tag {
            Some(tag) => format!("tag-{tag}"),
            None => Uuid::new_v4().to_string(),
        };
        options.id = id.clone();
        self.log.debug(&format!("creating notification id: {id}"));

        let entry = NotificationEntry::new(title, body, options);
        self.list.lock().insert(id.clone(), entry.clone());
        self.events.new_notify(entry.clone());

        let Some(native) = &self.native else {
            return Ok(id);
        };

        let permission = native.permission();
        if permission != Permission::Denied {
            self.log.debug(&format!(
                "Notification permission is: {permission}, request permission"
            ));
            if let Err(e) = self.permission.request_permission().await {
                self.log.debug(&format!("Skipping desktop notification: {e}"));
            }
        }

        if self.window.is_hidden() {
            if native.permission() == Permission::Granted {
                self.log.debug("Document is hidden, make desktop notification");
                self.notifier
                    .create_desktop_notification(&entry.title, &entry.body, &entry.options)
                    .await?;
            } else {
                self.log
                    .debug("Document is hidden but desktop notifications are not permitted");
            }
        }

        Ok(id)
    }

    /// Remove a notification by id. Unknown ids are not an error.
    pub fn remove(&self, id: &str) {
        self.log.debug(&format!("Remove notification id: {id}"));
        self.list.lock().shift_remove(id);
        self.events.remove_notify(id);
    }

    /// Snapshot of the current entries in insertion order
    pub fn get_list(&self) -> Vec<NotificationEntry> {
        self.log.debug("Get notification list");
        self.list.lock().values().cloned().collect()
    }

    pub fn clear_list(&self) {
        self.log.debug("Clear notification list");
        self.list.lock().clear();
        self.events.clear_notify_list();
    }

    /// Dispatch a native notification for an existing entry without
    /// registering it again
    pub async fn send_desktop_notification(&self, entry: &NotificationEntry) -> Result<NativeHandle> {
        self.notifier
            .create_desktop_notification(&entry.title, &entry.body, &entry.options)
            .await
    }

    /// Ask for native permission directly; failures reach the caller
    pub async fn request_desktop_notification_permission(&self) -> Result<Permission> {
        self.permission.request_permission().await
    }

    /// Create a floating notification with random content and type
    pub async fn test_float_notification(&self) -> Result<String> {
        let (body, kind) = random_float_content();
        let options = NotificationOptions::new()
            .with_float(TEST_FLOAT_TIME)
            .with_kind(kind);

        self.create("[Float] Test notification", body, options).await
    }
}

/// Random words and a random kind; the rng must not live across an await
fn random_float_content() -> (String, NotificationKind) {
    let mut rng = rand::thread_rng();
    let words = rng.gen_range(0..TEST_MAX_WORDS);
    let body = (0..words)
        .map(|_| {
            let len = rng.gen_range(1..=13);
            (&mut rng)
                .sample_iter(&Alphanumeric)
                .take(len)
                .map(char::from)
                .collect::<String>()
                .to_lowercase()
        })
        .collect::<Vec<_>>()
        .join(" ");
    let kind = NotificationKind::ALL
        .choose(&mut rng)
        .copied()
        .unwrap_or(NotificationKind::Info);
    (body, kind)
}
