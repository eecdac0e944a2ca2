// Clippy configuration: enable pedantic but allow overly strict lints
#![allow(clippy::missing_errors_doc)] // Internal functions don't need # Errors docs
#![allow(clippy::missing_panics_doc)] // Internal functions don't need # Panics docs
#![allow(clippy::must_use_candidate)] // Not all getters need #[must_use]
#![allow(clippy::module_name_repetitions)] // e.g., NotificationEntry in entry module is fine
#![allow(clippy::doc_markdown)] // Don't require backticks around JSON, UUID, etc.

//! Notification System - in-process notification registry
//!
//! Accepts notification requests, assigns identities, keeps the live list,
//! republishes lifecycle events on the host event bus and escalates to a
//! native desktop notification while the host window is hidden.
//!
//! Components:
//! - `NotificationRegistry`: the list, identity assignment and orchestration
//! - `PermissionGate`: native permission negotiation
//! - `DesktopNotifier`: native construction and click wiring
//! - `EventBridge`: `newNotify` / `removeNotify` / `clearNotifyList` publishing

pub mod config;
pub mod entry;
pub mod errors;
pub mod events;
pub mod host;
pub mod meta;
pub mod notifier;
pub mod permission;
pub mod registry;

pub use config::NotificationConfig;
pub use entry::{Action, NotificationEntry, NotificationKind, NotificationOptions};
pub use errors::{NotificationError, Result};
pub use events::{EventBridge, NotifyEvent};
pub use host::{HostEnvironment, Permission};
pub use meta::{registration_meta, RegistrationMeta};
pub use notifier::DesktopNotifier;
pub use permission::PermissionGate;
pub use registry::NotificationRegistry;
