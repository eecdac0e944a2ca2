//! Native desktop notification dispatch
//!
//! Builds the native content (`body` plus every option) and wires the click
//! handler: focus the host window, then run the caller's action. Action
//! failures never leave the handler; they are logged and dropped.

use crate::entry::{NotificationEntry, NotificationOptions};
use crate::errors::{NotificationError, Result};
use crate::host::{ClickHandler, HostWindow, LogSink, NativeContent, NativeHandle, NativeNotifications};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

#[derive(Clone)]
pub struct DesktopNotifier {
    native: Option<Arc<dyn NativeNotifications>>,
    window: Arc<dyn HostWindow>,
    log: Arc<dyn LogSink>,
}

impl DesktopNotifier {
    pub fn new(
        native: Option<Arc<dyn NativeNotifications>>,
        window: Arc<dyn HostWindow>,
        log: Arc<dyn LogSink>,
    ) -> Self {
        Self { native, window, log }
    }

    /// Construct exactly one native notification.
    ///
    /// Option keys are merged after `body`, so an option named like a
    /// native field replaces it verbatim.
    pub async fn create_desktop_notification(
        &self,
        title: &str,
        body: &str,
        options: &NotificationOptions,
    ) -> Result<NativeHandle> {
        let native = self
            .native
            .as_ref()
            .ok_or(NotificationError::UnsupportedEnvironment)?;

        let content = native_content(body, options)?;
        let entry = NotificationEntry::new(title, body, options.clone());
        let on_click = self.click_handler(entry);

        native.show(title, content, on_click).await
    }

    fn click_handler(&self, entry: NotificationEntry) -> ClickHandler {
        let window = Arc::clone(&self.window);
        let log = Arc::clone(&self.log);

        Box::new(move || {
            log.debug(&format!("Click on desktop notification id: {}", entry.id()));
            window.focus();

            let Some(action) = &entry.options.action else {
                return;
            };
            match panic::catch_unwind(AssertUnwindSafe(|| action.call(&entry))) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    log.debug(&format!("Notification action failed for id {}: {}", entry.id(), e));
                    tracing::warn!(id = %entry.id(), error = %e, "Notification action failed");
                }
                Err(_) => {
                    log.debug(&format!("Notification action panicked for id {}", entry.id()));
                    tracing::warn!(id = %entry.id(), "Notification action panicked");
                }
            }
        })
    }
}

/// `{ body, ...options }`
fn native_content(body: &str, options: &NotificationOptions) -> Result<NativeContent> {
    let mut content = NativeContent::new();
    content.insert("body".to_string(), body.into());

    if let serde_json::Value::Object(fields) = serde_json::to_value(options)? {
        content.extend(fields);
    }
    Ok(content)
}
