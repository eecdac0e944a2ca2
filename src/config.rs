use crate::errors::{NotificationError, Result};
use crate::host::Permission;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// System name reported to the log sink and the plugin loader
pub const SYSTEM_NAME: &str = "NotificationSystem";

/// Application configuration loaded from file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Instance identifier used for bus registration and log tagging
    #[serde(default = "default_guid")]
    pub guid: String,

    /// Native desktop notification settings
    #[serde(default)]
    pub desktop: DesktopConfig,

    /// Host window settings
    #[serde(default)]
    pub window: WindowConfig,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            guid: default_guid(),
            desktop: DesktopConfig::default(),
            window: WindowConfig::default(),
        }
    }
}

fn default_guid() -> String {
    "notification-system".to_string()
}

/// Desktop-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesktopConfig {
    /// Expose the native notification capability at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Application name shown by the notification server
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// Display time in milliseconds when a notification has no floatTime
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u32,

    /// Initial permission state
    #[serde(default)]
    pub permission: Permission,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            app_name: default_app_name(),
            timeout_ms: default_timeout_ms(),
            permission: Permission::default(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_app_name() -> String {
    "Notification System".to_string()
}

fn default_timeout_ms() -> u32 {
    5000
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WindowConfig {
    /// Treat the host window as hidden, so every notification escalates
    #[serde(default)]
    pub hidden: bool,
}

impl NotificationConfig {
    /// Get the default configuration path
    pub fn default_path() -> PathBuf {
        directories::BaseDirs::new().map_or_else(
            || PathBuf::from("~/.config/notification-system/config.toml"),
            |dirs| {
                dirs.config_dir()
                    .join("notification-system")
                    .join("config.toml")
            },
        )
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: PathBuf) -> Self {
        if !path.exists() {
            tracing::debug!("Config file not found at {:?}, using defaults", path);
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded configuration from {:?}", path);
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config file: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config file: {}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Save configuration to `path`, creating parent directories
    pub fn save_to_path(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| NotificationError::Config(e.to_string()))?;

        std::fs::write(path, content)?;
        tracing::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Generate example configuration file content
    pub fn example() -> String {
        r#"# Notification System Configuration
# Place this file at ~/.config/notification-system/config.toml

# Instance identifier used when registering with the event bus
guid = "notification-system"

[desktop]
# Expose native desktop notifications
enabled = true

# Application name shown by the notification server
app_name = "Notification System"

# Display time when a notification has no floatTime
timeout_ms = 5000

# Initial permission: "default", "granted" or "denied"
permission = "default"

[window]
# Treat the window as hidden so notifications always escalate
hidden = false
"#
        .to_string()
    }
}
