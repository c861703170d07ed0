//! Render-time interpretation of compiled layout documents.
//!
//! Actual control rendering belongs to an external engine reached through
//! [`ControlRenderer`]; this module only reconstructs the visual tree and
//! binds its leaves to slices of the shared data object.

mod engine;
mod interpret;

pub use engine::{ControlBinding, ControlRenderer, RenderNode, SchemaFieldRenderer};
pub use interpret::LayoutInterpreter;
