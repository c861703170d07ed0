use std::sync::{Arc, Mutex};

use crate::error::{FormError, Result};
use crate::field::{Field, FieldKind};
use crate::layout::LAYOUT_GRID_KEY;
use crate::logging::{LogEvent, LogLevel, Logger, event_with_fields, json_kv};
use crate::metrics::SessionMetrics;
use crate::schema::{CompiledSchemas, compile};

/// Configuration knobs for an authoring session.
#[derive(Clone)]
pub struct SessionConfig {
    /// Optional structured logger receiving session events.
    pub logger: Option<Logger>,
    /// Metrics accumulator shared with the host.
    pub metrics: Option<Arc<Mutex<SessionMetrics>>>,
    /// Target field used on emitted log events.
    pub log_target: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            logger: None,
            metrics: None,
            log_target: "formgrid::session".to_string(),
        }
    }
}

impl SessionConfig {
    /// Enable metrics collection if it has not already been configured.
    pub fn enable_metrics(&mut self) {
        if self.metrics.is_none() {
            self.metrics = Some(Arc::new(Mutex::new(SessionMetrics::new())));
        }
    }

    /// Access the shared metrics handle if metrics are enabled.
    pub fn metrics_handle(&self) -> Option<Arc<Mutex<SessionMetrics>>> {
        self.metrics.as_ref().map(Arc::clone)
    }
}

/// Ordered field list plus the operations the authoring surface exposes.
///
/// Compiled documents are pure derivations: [`FormSession::compile`] runs the
/// full transformation on every call and caches nothing.
#[derive(Default)]
pub struct FormSession {
    fields: Vec<Field>,
    config: SessionConfig,
}

impl FormSession {
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    pub fn with_config(config: SessionConfig) -> Self {
        Self {
            fields: Vec::new(),
            config,
        }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Append a descriptor seeded with the authoring defaults for `kind`.
    pub fn add(&mut self, kind: FieldKind) -> &Field {
        let field = Field::new(kind);
        self.emit(event_with_fields(
            LogLevel::Debug,
            &self.config.log_target,
            "field_added",
            [
                json_kv("kind", kind.token()),
                json_kv("name", field.name.as_str()),
            ],
        ));
        if let Some(metrics) = &self.config.metrics {
            metrics
                .lock()
                .expect("metrics mutex poisoned")
                .record_field_added();
        }
        self.fields.push(field);
        self.fields.last().expect("push succeeded")
    }

    /// Apply an arbitrary edit to the descriptor at `index`.
    ///
    /// The id is restored afterwards; it stays immutable for the
    /// descriptor's lifetime no matter what the edit does.
    pub fn update(&mut self, index: usize, edit: impl FnOnce(&mut Field)) -> Result<()> {
        let field = self
            .fields
            .get_mut(index)
            .ok_or(FormError::FieldIndex(index))?;
        let id = field.id.clone();
        edit(field);
        field.id = id;
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<Field> {
        if index >= self.fields.len() {
            return Err(FormError::FieldIndex(index));
        }
        let field = self.fields.remove(index);
        self.emit(event_with_fields(
            LogLevel::Debug,
            &self.config.log_target,
            "field_removed",
            [json_kv("name", field.name.as_str())],
        ));
        if let Some(metrics) = &self.config.metrics {
            metrics
                .lock()
                .expect("metrics mutex poisoned")
                .record_field_removed();
        }
        Ok(field)
    }

    /// Swap the descriptor at `index` with its predecessor. Moving the first
    /// descriptor up is a no-op.
    pub fn move_up(&mut self, index: usize) -> Result<()> {
        if index >= self.fields.len() {
            return Err(FormError::FieldIndex(index));
        }
        if index > 0 {
            self.fields.swap(index - 1, index);
        }
        Ok(())
    }

    /// Swap the descriptor at `index` with its successor. Moving the last
    /// descriptor down is a no-op.
    pub fn move_down(&mut self, index: usize) -> Result<()> {
        if index >= self.fields.len() {
            return Err(FormError::FieldIndex(index));
        }
        if index + 1 < self.fields.len() {
            self.fields.swap(index, index + 1);
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.fields.clear();
        self.emit(LogEvent::new(
            LogLevel::Debug,
            self.config.log_target.clone(),
            "fields_cleared",
        ));
    }

    /// Compile the current field list. Pure over the list contents; invoked
    /// afresh whenever the caller needs up-to-date documents.
    pub fn compile(&self) -> CompiledSchemas {
        let compiled = compile(&self.fields);
        let packed_layout = compiled
            .presentation_schema
            .get(LAYOUT_GRID_KEY)
            .is_some();

        if let Some(metrics) = &self.config.metrics {
            metrics
                .lock()
                .expect("metrics mutex poisoned")
                .record_compile(packed_layout);
        }
        self.emit(event_with_fields(
            LogLevel::Debug,
            &self.config.log_target,
            "schemas_compiled",
            [
                json_kv("fields", self.fields.len()),
                json_kv("layout", packed_layout),
            ],
        ));
        compiled
    }

    fn emit(&self, event: LogEvent) {
        if let Some(logger) = &self.config.logger {
            let _ = logger.log_event(event);
        }
    }
}
