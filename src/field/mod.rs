//! Field descriptors — the authoring data model the compiler consumes.

mod types;

pub use types::{Field, FieldId, FieldKind};
