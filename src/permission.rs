//! Native notification permission negotiation

use crate::errors::{NotificationError, Result};
use crate::host::{NativeNotifications, Permission};
use std::sync::Arc;

/// Single entry point for asking the platform for notification permission
#[derive(Clone)]
pub struct PermissionGate {
    native: Option<Arc<dyn NativeNotifications>>,
}

impl PermissionGate {
    pub fn new(native: Option<Arc<dyn NativeNotifications>>) -> Self {
        Self { native }
    }

    /// Resolve the permission, prompting only when it was never asked.
    ///
    /// - no native capability: `UnsupportedEnvironment`
    /// - granted: resolves immediately, no prompt
    /// - default: prompts; anything but granted is `PermissionDenied`
    /// - denied: never resolves. Prompting again is pointless and callers
    ///   check for `denied` before asking; wrap in a timeout if you must call it.
    pub async fn request_permission(&self) -> Result<Permission> {
        let native = self
            .native
            .as_ref()
            .ok_or(NotificationError::UnsupportedEnvironment)?;

        match native.permission() {
            Permission::Granted => Ok(Permission::Granted),
            Permission::Denied => std::future::pending().await,
            Permission::Default => match native.request_permission().await {
                Permission::Granted => Ok(Permission::Granted),
                outcome => Err(NotificationError::PermissionDenied(outcome)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::testing::FakeNative;
    use std::time::Duration;

    fn gate(native: &Arc<FakeNative>) -> PermissionGate {
        PermissionGate::new(Some(native.clone()))
    }

    #[tokio::test]
    async fn test_unsupported_environment() {
        let err = PermissionGate::new(None).request_permission().await.unwrap_err();
        assert!(matches!(err, NotificationError::UnsupportedEnvironment));
    }

    #[tokio::test]
    async fn test_granted_resolves_without_prompt() {
        let native = Arc::new(FakeNative::new(Permission::Granted));

        assert_eq!(gate(&native).request_permission().await.unwrap(), Permission::Granted);
        assert_eq!(native.prompts(), 0);
    }

    #[tokio::test]
    async fn test_default_prompts_and_accepts() {
        let native = Arc::new(FakeNative::new(Permission::Default));

        assert_eq!(gate(&native).request_permission().await.unwrap(), Permission::Granted);
        assert_eq!(native.prompts(), 1);
        assert_eq!(native.permission(), Permission::Granted);
    }

    #[tokio::test]
    async fn test_default_prompt_rejected() {
        let native = Arc::new(FakeNative::new(Permission::Default).answering(Permission::Denied));

        let err = gate(&native).request_permission().await.unwrap_err();
        assert!(matches!(err, NotificationError::PermissionDenied(Permission::Denied)));
    }

    #[tokio::test]
    async fn test_dismissed_prompt_rejects_with_default() {
        let native = Arc::new(FakeNative::new(Permission::Default).answering(Permission::Default));

        let err = gate(&native).request_permission().await.unwrap_err();
        assert!(matches!(err, NotificationError::PermissionDenied(Permission::Default)));
    }

    #[tokio::test]
    async fn test_denied_never_resolves() {
        let native = Arc::new(FakeNative::new(Permission::Denied));

        let result =
            tokio::time::timeout(Duration::from_millis(20), gate(&native).request_permission()).await;
        assert!(result.is_err());
        assert_eq!(native.prompts(), 0);
    }
}
