use super::LogSink;

/// Log sink forwarding to `tracing`, tagged with the owning instance
#[derive(Debug, Clone)]
pub struct TracingLog {
    guid: String,
    system: String,
}

impl TracingLog {
    pub fn new(guid: impl Into<String>, system: impl Into<String>) -> Self {
        Self {
            guid: guid.into(),
            system: system.into(),
        }
    }
}

impl LogSink for TracingLog {
    fn debug(&self, message: &str) {
        tracing::debug!(guid = %self.guid, system = %self.system, "{}", message);
    }
}
