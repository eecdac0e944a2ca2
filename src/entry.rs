//! Notification records held by the registry
//!
//! A `NotificationEntry` is the unit of record: caller content plus the
//! options bag that carries the resolved id. Options not interpreted here
//! (`floatMode`, `floatTime`, `type`, extra keys) are passed through
//! untouched for downstream renderers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Error type returned by caller-supplied click actions
pub type ActionError = Box<dyn std::error::Error + Send + Sync>;

/// Callback invoked when the user clicks a native notification
#[derive(Clone)]
pub struct Action(Arc<dyn Fn(&NotificationEntry) -> Result<(), ActionError> + Send + Sync>);

impl Action {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&NotificationEntry) -> Result<(), ActionError> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn call(&self, entry: &NotificationEntry) -> Result<(), ActionError> {
        (self.0)(entry)
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Action(..)")
    }
}

/// Visual severity hint for floating renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    pub const ALL: [Self; 4] = [Self::Info, Self::Success, Self::Warning, Self::Error];
}

/// Caller-supplied configuration for a notification
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationOptions {
    /// Resolved identity, assigned by the registry on create
    #[serde(default)]
    pub id: String,
    /// Grouping tag; a present tag yields the stable id `tag-<tag>`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub float_mode: Option<bool>,
    /// Seconds a floating renderer keeps the notification on screen
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub float_time: Option<u64>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<NotificationKind>,
    #[serde(skip)]
    pub action: Option<Action>,
    /// Anything else, forwarded verbatim
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl NotificationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_kind(mut self, kind: NotificationKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Enable floating mode for `seconds`
    pub fn with_float(mut self, seconds: u64) -> Self {
        self.float_mode = Some(true);
        self.float_time = Some(seconds);
        self
    }

    pub fn with_action<F>(mut self, f: F) -> Self
    where
        F: Fn(&NotificationEntry) -> Result<(), ActionError> + Send + Sync + 'static,
    {
        self.action = Some(Action::new(f));
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

/// One registered notification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationEntry {
    pub title: String,
    pub body: String,
    pub options: NotificationOptions,
}

impl NotificationEntry {
    pub fn new(title: impl Into<String>, body: impl Into<String>, options: NotificationOptions) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            options,
        }
    }

    pub fn id(&self) -> &str {
        &self.options.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_options_serialize_camel_case_and_skip_action() {
        let options = NotificationOptions::new()
            .with_tag("build")
            .with_float(5)
            .with_kind(NotificationKind::Warning)
            .with_action(|_| Ok(()))
            .with_extra("icon", json!("/tmp/icon.png"));

        let value = serde_json::to_value(&options).unwrap();
        assert_eq!(value["tag"], "build");
        assert_eq!(value["floatMode"], true);
        assert_eq!(value["floatTime"], 5);
        assert_eq!(value["type"], "warning");
        assert_eq!(value["icon"], "/tmp/icon.png");
        assert!(value.get("action").is_none());
    }

    #[test]
    fn test_options_deserialize_keeps_unknown_keys() {
        let options: NotificationOptions =
            serde_json::from_value(json!({"type": "error", "silent": true})).unwrap();

        assert_eq!(options.kind, Some(NotificationKind::Error));
        assert_eq!(options.extra.get("silent"), Some(&json!(true)));
        assert!(options.id.is_empty());
    }

    #[test]
    fn test_action_receives_entry() {
        let entry = NotificationEntry::new(
            "Title",
            "Body",
            NotificationOptions::new().with_action(|entry| {
                if entry.title == "Title" {
                    Ok(())
                } else {
                    Err("wrong entry".into())
                }
            }),
        );

        let action = entry.options.action.clone().unwrap();
        assert!(action.call(&entry).is_ok());
    }
}
