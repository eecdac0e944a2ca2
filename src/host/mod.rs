//! Host capabilities consumed by the notification system
//!
//! The host (event bus, log sink, native notification API, window) is
//! injected through narrow traits so each can be swapped for an
//! in-memory fake. Concrete adapters:
//! - `TracingLog`: log sink forwarding to `tracing`
//! - `BroadcastEventBus`: in-process bus over a tokio broadcast channel
//! - `DesktopNative`: native notifications via notify-rust
//! - `TerminalWindow`: window with a configured visibility flag

mod bus;
mod desktop;
mod log;
#[cfg(test)]
pub mod testing;

pub use bus::BroadcastEventBus;
pub use desktop::DesktopNative;
pub use log::TracingLog;

use crate::errors::Result;
use crate::events::NotifyEvent;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Native notification permission state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    /// Never asked
    #[default]
    Default,
    Granted,
    Denied,
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Default => "default",
            Self::Granted => "granted",
            Self::Denied => "denied",
        };
        f.write_str(s)
    }
}

/// Body plus every option, as handed to the native constructor
pub type NativeContent = serde_json::Map<String, serde_json::Value>;

/// Invoked by the native layer when the user clicks a notification
pub type ClickHandler = Box<dyn Fn() + Send + Sync>;

/// Handle to a constructed native notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeHandle {
    /// Native-side identifier (platform specific)
    pub native_id: String,
    pub title: String,
}

/// The platform's native desktop notification facility
#[async_trait]
pub trait NativeNotifications: Send + Sync {
    /// Current permission, read without prompting
    fn permission(&self) -> Permission;

    /// Show the platform permission prompt and return the user's answer
    async fn request_permission(&self) -> Permission;

    /// Construct and emit one notification.
    ///
    /// Fails with `NativeConstruction` when the platform refuses.
    async fn show(
        &self,
        title: &str,
        content: NativeContent,
        on_click: ClickHandler,
    ) -> Result<NativeHandle>;
}

/// The window hosting the application
pub trait HostWindow: Send + Sync {
    /// True when the user cannot currently see the application
    fn is_hidden(&self) -> bool;

    /// Bring the application to the foreground
    fn focus(&self);
}

/// Host event bus
pub trait EventBus: Send + Sync {
    /// Declare the events a plugin instance will publish
    fn register_plugin_instance(&self, guid: &str, events: &[&'static str]) -> Result<()>;

    /// Publish an event. Never fails from the caller's perspective.
    fn publish_event(&self, event: NotifyEvent);
}

/// Host logging facility
pub trait LogSink: Send + Sync {
    fn debug(&self, message: &str);
}

/// Everything the registry needs from its host
#[derive(Clone)]
pub struct HostEnvironment {
    /// `None` when the platform has no native notification capability
    pub native: Option<Arc<dyn NativeNotifications>>,
    pub window: Arc<dyn HostWindow>,
    pub events: Arc<dyn EventBus>,
    pub log: Arc<dyn LogSink>,
}

impl HostEnvironment {
    pub fn is_support_notification_api(&self) -> bool {
        self.native.is_some()
    }
}

/// Window whose visibility is fixed at startup (CLI hosts)
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalWindow {
    hidden: bool,
}

impl TerminalWindow {
    pub fn new(hidden: bool) -> Self {
        Self { hidden }
    }
}

impl HostWindow for TerminalWindow {
    fn is_hidden(&self) -> bool {
        self.hidden
    }

    fn focus(&self) {
        // A terminal cannot be raised portably
        tracing::debug!("Focus requested for terminal window");
    }
}
