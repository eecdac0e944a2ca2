//! In-memory host fakes for tests

use super::{
    ClickHandler, EventBus, HostEnvironment, HostWindow, LogSink, NativeContent, NativeHandle,
    NativeNotifications, Permission,
};
use crate::errors::{NotificationError, Result};
use crate::events::NotifyEvent;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// Bus recording registrations and published events
#[derive(Default)]
pub struct MemoryEventBus {
    reject: bool,
    registrations: Mutex<Vec<(String, Vec<&'static str>)>>,
    events: Mutex<Vec<NotifyEvent>>,
}

impl MemoryEventBus {
    /// A bus that refuses every registration
    pub fn rejecting() -> Self {
        Self {
            reject: true,
            ..Self::default()
        }
    }

    pub fn registrations(&self) -> Vec<(String, Vec<&'static str>)> {
        self.registrations.lock().clone()
    }

    pub fn events(&self) -> Vec<NotifyEvent> {
        self.events.lock().clone()
    }

    pub fn count(&self, name: &str) -> usize {
        self.events.lock().iter().filter(|e| e.name() == name).count()
    }
}

impl EventBus for MemoryEventBus {
    fn register_plugin_instance(&self, guid: &str, events: &[&'static str]) -> Result<()> {
        if self.reject {
            return Err(NotificationError::EventBus("bus unavailable".to_string()));
        }
        self.registrations
            .lock()
            .push((guid.to_string(), events.to_vec()));
        Ok(())
    }

    fn publish_event(&self, event: NotifyEvent) {
        self.events.lock().push(event);
    }
}

/// Log sink keeping every message
#[derive(Default)]
pub struct MemoryLog {
    messages: Mutex<Vec<String>>,
}

impl MemoryLog {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }
}

impl LogSink for MemoryLog {
    fn debug(&self, message: &str) {
        self.messages.lock().push(message.to_string());
    }
}

/// Window with a switchable visibility flag
#[derive(Default)]
pub struct FakeWindow {
    hidden: AtomicBool,
    focused: AtomicUsize,
}

impl FakeWindow {
    pub fn new(hidden: bool) -> Self {
        Self {
            hidden: AtomicBool::new(hidden),
            focused: AtomicUsize::new(0),
        }
    }

    pub fn set_hidden(&self, hidden: bool) {
        self.hidden.store(hidden, Ordering::SeqCst);
    }

    pub fn focus_count(&self) -> usize {
        self.focused.load(Ordering::SeqCst)
    }
}

impl HostWindow for FakeWindow {
    fn is_hidden(&self) -> bool {
        self.hidden.load(Ordering::SeqCst)
    }

    fn focus(&self) {
        self.focused.fetch_add(1, Ordering::SeqCst);
    }
}

/// Scriptable native notification API
pub struct FakeNative {
    permission: Mutex<Permission>,
    answer: Permission,
    fail: bool,
    prompts: AtomicUsize,
    shown: Mutex<Vec<(String, NativeContent)>>,
    handlers: Mutex<Vec<ClickHandler>>,
}

impl FakeNative {
    /// Prompts are answered with `granted` unless `answering` says otherwise
    pub fn new(permission: Permission) -> Self {
        Self {
            permission: Mutex::new(permission),
            answer: Permission::Granted,
            fail: false,
            prompts: AtomicUsize::new(0),
            shown: Mutex::new(Vec::new()),
            handlers: Mutex::new(Vec::new()),
        }
    }

    pub fn answering(mut self, answer: Permission) -> Self {
        self.answer = answer;
        self
    }

    /// Refuse every construction
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn prompts(&self) -> usize {
        self.prompts.load(Ordering::SeqCst)
    }

    pub fn shown(&self) -> Vec<(String, NativeContent)> {
        self.shown.lock().clone()
    }

    /// Simulate the user clicking the `index`th shown notification
    pub fn click(&self, index: usize) {
        let handlers = self.handlers.lock();
        handlers[index]();
    }
}

#[async_trait]
impl NativeNotifications for FakeNative {
    fn permission(&self) -> Permission {
        *self.permission.lock()
    }

    async fn request_permission(&self) -> Permission {
        self.prompts.fetch_add(1, Ordering::SeqCst);
        *self.permission.lock() = self.answer;
        self.answer
    }

    async fn show(
        &self,
        title: &str,
        content: NativeContent,
        on_click: ClickHandler,
    ) -> Result<NativeHandle> {
        if self.fail {
            return Err(NotificationError::NativeConstruction(
                "blocked by the operating system".to_string(),
            ));
        }
        let mut shown = self.shown.lock();
        shown.push((title.to_string(), content));
        self.handlers.lock().push(on_click);
        Ok(NativeHandle {
            native_id: shown.len().to_string(),
            title: title.to_string(),
        })
    }
}

/// Fakes wired into a host environment, kept for assertions
pub struct FakeHost {
    pub native: Option<Arc<FakeNative>>,
    pub window: Arc<FakeWindow>,
    pub events: Arc<MemoryEventBus>,
    pub log: Arc<MemoryLog>,
}

impl FakeHost {
    pub fn new(native: Option<FakeNative>, hidden: bool) -> Self {
        Self {
            native: native.map(Arc::new),
            window: Arc::new(FakeWindow::new(hidden)),
            events: Arc::new(MemoryEventBus::default()),
            log: Arc::new(MemoryLog::default()),
        }
    }

    pub fn environment(&self) -> HostEnvironment {
        HostEnvironment {
            native: self
                .native
                .clone()
                .map(|native| native as Arc<dyn NativeNotifications>),
            window: self.window.clone(),
            events: self.events.clone(),
            log: self.log.clone(),
        }
    }

    pub fn native(&self) -> &FakeNative {
        self.native.as_deref().expect("host has no native capability")
    }
}
