//! Cross-platform native desktop notifications
//!
//! Uses notify-rust for native notifications on macOS, Linux, BSD and Windows.
//! None of those platforms prompt for permission, so a `default` permission
//! becomes `granted` on the first request unless the config pins it to
//! `denied`.

use super::{ClickHandler, NativeContent, NativeHandle, NativeNotifications, Permission};
use crate::config::DesktopConfig;
use crate::errors::{NotificationError, Result};
use async_trait::async_trait;
use notify_rust::{Notification, Timeout};
use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::oneshot;

/// Action identifier freedesktop servers report for a click on the body
#[cfg(all(unix, not(target_os = "macos")))]
const DEFAULT_ACTION: &str = "default";

/// Native notification backend built on notify-rust
#[derive(Debug)]
pub struct DesktopNative {
    app_name: String,
    timeout_ms: u32,
    permission: Mutex<Permission>,
}

impl DesktopNative {
    pub fn new(config: &DesktopConfig) -> Self {
        Self {
            app_name: config.app_name.clone(),
            timeout_ms: config.timeout_ms,
            permission: Mutex::new(config.permission),
        }
    }

    /// Build the notify-rust notification from title and merged content.
    ///
    /// `floatTime` (seconds) overrides the configured timeout.
    fn build(&self, title: &str, content: &NativeContent) -> Notification {
        let timeout_ms = content
            .get("floatTime")
            .and_then(Value::as_u64)
            .and_then(|secs| u32::try_from(secs.saturating_mul(1000)).ok())
            .unwrap_or(self.timeout_ms);

        let mut notification = Notification::new();
        notification
            .appname(&self.app_name)
            .summary(title)
            .timeout(Timeout::Milliseconds(timeout_ms));

        if let Some(body) = content.get("body").and_then(Value::as_str) {
            notification.body(body);
        }
        if let Some(icon) = content.get("icon").and_then(Value::as_str) {
            notification.icon(icon);
        }

        #[cfg(all(unix, not(target_os = "macos")))]
        notification.action(DEFAULT_ACTION, "Open");

        notification
    }
}

#[async_trait]
impl NativeNotifications for DesktopNative {
    fn permission(&self) -> Permission {
        *self.permission.lock()
    }

    async fn request_permission(&self) -> Permission {
        let mut permission = self.permission.lock();
        if *permission == Permission::Default {
            *permission = Permission::Granted;
        }
        *permission
    }

    async fn show(
        &self,
        title: &str,
        content: NativeContent,
        on_click: ClickHandler,
    ) -> Result<NativeHandle> {
        let notification = self.build(title, &content);
        let (tx, rx) = oneshot::channel();

        // Showing and waiting for the click both block, keep them off the runtime
        std::thread::spawn(move || show_and_wait(&notification, on_click, tx));

        let native_id = rx
            .await
            .map_err(|_| {
                NotificationError::NativeConstruction("notification thread exited".to_string())
            })?
            .map_err(NotificationError::NativeConstruction)?;

        tracing::debug!(native_id = %native_id, title = %title, "Desktop notification shown");
        Ok(NativeHandle {
            native_id,
            title: title.to_string(),
        })
    }
}

#[cfg(all(unix, not(target_os = "macos")))]
fn show_and_wait(
    notification: &Notification,
    on_click: ClickHandler,
    tx: oneshot::Sender<std::result::Result<String, String>>,
) {
    match notification.show() {
        Ok(handle) => {
            let _ = tx.send(Ok(handle.id().to_string()));
            handle.wait_for_action(|action| {
                if action == DEFAULT_ACTION {
                    on_click();
                }
            });
        }
        Err(e) => {
            let _ = tx.send(Err(e.to_string()));
        }
    }
}

/// macOS and Windows report no click back through notify-rust
#[cfg(not(all(unix, not(target_os = "macos"))))]
fn show_and_wait(
    notification: &Notification,
    _on_click: ClickHandler,
    tx: oneshot::Sender<std::result::Result<String, String>>,
) {
    let result = notification
        .show()
        .map(|_| String::from("0"))
        .map_err(|e| e.to_string());
    let _ = tx.send(result);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(permission: Permission) -> DesktopConfig {
        DesktopConfig {
            permission,
            ..DesktopConfig::default()
        }
    }

    #[tokio::test]
    async fn test_default_permission_granted_on_request() {
        let native = DesktopNative::new(&config(Permission::Default));
        assert_eq!(native.permission(), Permission::Default);

        assert_eq!(native.request_permission().await, Permission::Granted);
        assert_eq!(native.permission(), Permission::Granted);
    }

    #[tokio::test]
    async fn test_denied_permission_is_sticky() {
        let native = DesktopNative::new(&config(Permission::Denied));
        assert_eq!(native.request_permission().await, Permission::Denied);
    }
}
