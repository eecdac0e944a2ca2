//! Structured error types for the notification system
//!
//! Uses thiserror for ergonomic error definitions with automatic Display
//! and Error trait implementations.

use crate::host::Permission;
use thiserror::Error;

/// All possible errors raised by the notification system
#[derive(Error, Debug)]
pub enum NotificationError {
    /// The host exposes no native notification capability at all
    #[error("This environment does not support desktop notifications")]
    UnsupportedEnvironment,

    /// The native permission prompt resolved to something other than granted
    #[error("Desktop notification permission was not granted: {0}")]
    PermissionDenied(Permission),

    /// The native layer refused to construct a notification
    #[error("Failed to construct desktop notification: {0}")]
    NativeConstruction(String),

    /// The host event bus rejected plugin registration
    #[error("Event bus error: {0}")]
    EventBus(String),

    /// Configuration could not be read or written
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience Result type using NotificationError
pub type Result<T> = std::result::Result<T, NotificationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_denied_message_names_outcome() {
        let err = NotificationError::PermissionDenied(Permission::Denied);
        assert_eq!(
            err.to_string(),
            "Desktop notification permission was not granted: denied"
        );
    }
}
