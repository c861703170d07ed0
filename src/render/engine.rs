//! The boundary with the external rendering engine.

use serde::Serialize;
use serde_json::Value;

/// Everything the engine needs to render one editable control: the field's
/// dotted path, its property schema, its presentation fragment, and the
/// current value. Absent fragments and values are `Null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlBinding {
    pub path: String,
    pub schema: Value,
    pub presentation: Value,
    pub value: Value,
}

/// A node of the reconstructed visual tree.
///
/// The tree is isomorphic to the layout document: `Grid` wraps the document,
/// `Row`/`Column` mirror its structure, and leaves are either rendered
/// controls or inert placeholders for unresolvable references.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "node", rename_all = "kebab-case")]
pub enum RenderNode {
    Grid { rows: Vec<RenderNode> },
    Row { columns: Vec<RenderNode> },
    Column { span: u8, children: Vec<RenderNode> },
    Control { binding: ControlBinding },
    Placeholder { field_ref: String },
}

/// Implemented by the external rendering engine.
///
/// The default method materializes a [`RenderNode::Control`] carrying the
/// binding, which is all a headless engine needs; richer engines override it
/// to build their own widget tree.
pub trait ControlRenderer {
    fn control(&self, binding: &ControlBinding) -> RenderNode {
        RenderNode::Control {
            binding: binding.clone(),
        }
    }

    fn placeholder(&self, field_ref: &str) -> RenderNode {
        RenderNode::Placeholder {
            field_ref: field_ref.to_string(),
        }
    }
}

/// Pass-through renderer delegating every leaf to the engine's generic
/// schema-driven control.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaFieldRenderer;

impl ControlRenderer for SchemaFieldRenderer {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_renderer_echoes_binding() {
        let binding = ControlBinding {
            path: "a.b".to_string(),
            schema: json!({"type": "string"}),
            presentation: Value::Null,
            value: json!("x"),
        };
        let node = SchemaFieldRenderer.control(&binding);
        assert_eq!(node, RenderNode::Control { binding });
    }

    #[test]
    fn render_nodes_serialize_with_tag() {
        let node = RenderNode::Placeholder {
            field_ref: "gone".to_string(),
        };
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["node"], json!("placeholder"));
        assert_eq!(value["field_ref"], json!("gone"));
    }
}
