//! The layout interpreter: a stateless walk over a compiled layout document.

use serde_json::Value;

use crate::layout::{Column, ColumnContent, LayoutDocument, Row};
use crate::path;

use super::engine::{ControlBinding, ControlRenderer, RenderNode};

/// Reconstructs a visual tree from a layout document at render time.
///
/// The interpreter holds no state between renders: the same arguments always
/// produce the same tree. A leaf whose field reference cannot be resolved in
/// the data schema becomes a placeholder; its siblings are unaffected.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutInterpreter;

impl LayoutInterpreter {
    pub fn new() -> Self {
        Self
    }

    /// Walk `document`, binding each leaf against the compiled schemas and
    /// the current data snapshot, and delegating control rendering to the
    /// engine.
    pub fn render(
        &self,
        document: &LayoutDocument,
        data_schema: &Value,
        presentation: &Value,
        data: &Value,
        renderer: &dyn ControlRenderer,
    ) -> RenderNode {
        let properties = data_schema.get("properties").unwrap_or(&Value::Null);
        let rows = document
            .rows
            .iter()
            .map(|row| self.render_row(row, properties, presentation, data, renderer))
            .collect();
        RenderNode::Grid { rows }
    }

    /// Build a new data snapshot with `value` installed at `path` and hand
    /// it to `on_change`. The snapshot given as input is never mutated.
    pub fn dispatch_edit(
        &self,
        data: &Value,
        path: &str,
        value: Value,
        on_change: &mut dyn FnMut(Value),
    ) {
        on_change(path::set(data, path, value));
    }

    fn render_row(
        &self,
        row: &Row,
        properties: &Value,
        presentation: &Value,
        data: &Value,
        renderer: &dyn ControlRenderer,
    ) -> RenderNode {
        let columns = row
            .columns
            .iter()
            .map(|column| self.render_column(column, properties, presentation, data, renderer))
            .collect();
        RenderNode::Row { columns }
    }

    fn render_column(
        &self,
        column: &Column,
        properties: &Value,
        presentation: &Value,
        data: &Value,
        renderer: &dyn ControlRenderer,
    ) -> RenderNode {
        let children = match &column.content {
            ColumnContent::Leaf(name) => {
                vec![self.render_leaf(name, properties, presentation, data, renderer)]
            }
            ColumnContent::Rows(rows) => rows
                .iter()
                .map(|row| self.render_row(row, properties, presentation, data, renderer))
                .collect(),
        };
        RenderNode::Column {
            span: column.span,
            children,
        }
    }

    fn render_leaf(
        &self,
        name: &str,
        properties: &Value,
        presentation: &Value,
        data: &Value,
        renderer: &dyn ControlRenderer,
    ) -> RenderNode {
        match path::get(properties, name) {
            Some(schema) => {
                let binding = ControlBinding {
                    path: name.to_string(),
                    schema: schema.clone(),
                    presentation: path::get(presentation, name)
                        .cloned()
                        .unwrap_or(Value::Null),
                    value: path::get(data, name).cloned().unwrap_or(Value::Null),
                };
                renderer.control(&binding)
            }
            None => renderer.placeholder(name),
        }
    }
}
