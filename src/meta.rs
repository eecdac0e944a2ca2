//! Registration metadata consumed by the host plugin loader

use crate::config::SYSTEM_NAME;
use serde::Serialize;

/// Load priority among core systems
const PRIORITY: u32 = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationMeta {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub title: &'static str,
    pub name: &'static str,
    pub version: &'static str,
    pub with_dependencies: bool,
    pub priority: u32,
}

pub fn registration_meta() -> RegistrationMeta {
    RegistrationMeta {
        kind: "core",
        title: "Система уведомлений",
        name: SYSTEM_NAME,
        version: env!("CARGO_PKG_VERSION"),
        with_dependencies: false,
        priority: PRIORITY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_json_shape() {
        let value = serde_json::to_value(registration_meta()).unwrap();

        assert_eq!(value["type"], "core");
        assert_eq!(value["name"], "NotificationSystem");
        assert_eq!(value["version"], env!("CARGO_PKG_VERSION"));
        assert_eq!(value["withDependencies"], false);
        assert_eq!(value["priority"], 7);
    }
}
