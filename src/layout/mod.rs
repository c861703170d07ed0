//! Grid layout documents and the row packer.
//!
//! Downstream code imports layout types from here while the implementation
//! details live in the private `document` and `pack` modules.

mod document;
mod pack;

pub use document::{
    Column, ColumnContent, GRID_UNITS, LAYOUT_FIELD, LAYOUT_GRID_KEY, LayoutDocument, Row,
};
pub use pack::{pack, span_for};
