//! formgrid — a field-descriptor compiler and grid-layout interpreter.
//!
//! An ordered list of [`Field`] descriptors compiles deterministically into
//! two coupled documents: a JSON-Schema-like data schema and a presentation
//! schema that can embed a declarative grid-layout document. At render time
//! the [`LayoutInterpreter`] walks the layout document back into a nested
//! visual tree, binding leaves to slices of a shared data object through
//! dotted paths. Control rendering itself belongs to an external engine
//! behind the [`ControlRenderer`] trait.

pub mod error;
pub mod field;
pub mod layout;
pub mod logging;
pub mod metrics;
pub mod path;
pub mod registry;
pub mod render;
pub mod schema;
pub mod session;

pub use error::{FormError, Result};
pub use field::{Field, FieldId, FieldKind};
pub use layout::{
    Column, ColumnContent, GRID_UNITS, LAYOUT_FIELD, LAYOUT_GRID_KEY, LayoutDocument, Row, pack,
    span_for,
};
pub use logging::{
    FileSink, LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult,
    MemorySink, event_with_fields, json_kv,
};
pub use metrics::{MetricSnapshot, SessionMetrics};
pub use registry::{ExtensionContext, ExtensionRegistry, RenderExtension};
pub use render::{ControlBinding, ControlRenderer, LayoutInterpreter, RenderNode, SchemaFieldRenderer};
pub use schema::{CompiledSchemas, compile};
pub use session::{FormSession, SessionConfig};
