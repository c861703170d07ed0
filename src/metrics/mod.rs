use serde_json::json;

use crate::logging::{LogEvent, LogFields, LogLevel};

/// Counters accumulated across an authoring session.
#[derive(Debug, Default, Clone)]
pub struct SessionMetrics {
    fields_added: u64,
    fields_removed: u64,
    compiles: u64,
    layouts_packed: u64,
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_field_added(&mut self) {
        self.fields_added = self.fields_added.saturating_add(1);
    }

    pub fn record_field_removed(&mut self) {
        self.fields_removed = self.fields_removed.saturating_add(1);
    }

    pub fn record_compile(&mut self, packed_layout: bool) {
        self.compiles = self.compiles.saturating_add(1);
        if packed_layout {
            self.layouts_packed = self.layouts_packed.saturating_add(1);
        }
    }

    pub fn snapshot(&self) -> MetricSnapshot {
        MetricSnapshot {
            fields_added: self.fields_added,
            fields_removed: self.fields_removed,
            compiles: self.compiles,
            layouts_packed: self.layouts_packed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub fields_added: u64,
    pub fields_removed: u64,
    pub compiles: u64,
    pub layouts_packed: u64,
}

impl MetricSnapshot {
    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("fields_added".to_string(), json!(self.fields_added));
        map.insert("fields_removed".to_string(), json!(self.fields_removed));
        map.insert("compiles".to_string(), json!(self.compiles));
        map.insert("layouts_packed".to_string(), json!(self.layouts_packed));
        map
    }

    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(
            LogLevel::Info,
            target.to_string(),
            "session_metrics".to_string(),
            self.as_fields(),
        )
    }
}
