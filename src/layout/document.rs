//! The layout document tree and its JSON wire format.
//!
//! A document is a list of rows; each row holds columns sized in 12-unit
//! grid spans; each column references a field by name or nests further rows.
//! The wire shape mirrors the grid-field convention of the rendering engine:
//! `{"ui:row": [{"ui:row": {"className": "row", "children": [{"ui:col":
//! {"className": "col-xs-6", "children": ["field_name"]}}]}}]}`.

use serde_json::{Value, json};

/// Number of span units in a full row.
pub const GRID_UNITS: u8 = 12;

/// Registry key under which the layout interpreter is resolved.
pub const LAYOUT_FIELD: &str = "LayoutGridField";

/// Presentation-schema key carrying the layout document.
pub const LAYOUT_GRID_KEY: &str = "ui:layoutGrid";

const ROW_KEY: &str = "ui:row";
const COL_KEY: &str = "ui:col";
const COLS_KEY: &str = "ui:columns";

/// Root of a compiled layout tree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LayoutDocument {
    pub rows: Vec<Row>,
}

/// One horizontal band of the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub columns: Vec<Column>,
}

/// A cell within a row, sized in grid spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub span: u8,
    pub content: ColumnContent,
}

/// What a column holds: a field reference or nested rows.
///
/// The packer only emits leaves; nested rows exist so the interpreter can
/// consume hand-authored or future documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnContent {
    Leaf(String),
    Rows(Vec<Row>),
}

impl LayoutDocument {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Serialize to the wire shape embedded in the presentation schema.
    pub fn to_value(&self) -> Value {
        let rows: Vec<Value> = self.rows.iter().map(row_to_value).collect();
        json!({ ROW_KEY: rows })
    }

    /// Parse a wire document. Returns `None` when the root carries no
    /// `ui:row` entry; malformed children are skipped rather than failing
    /// the whole document.
    pub fn from_value(value: &Value) -> Option<Self> {
        let rows = value.get(ROW_KEY)?;
        let entries: Vec<&Value> = match rows {
            Value::Array(items) => items.iter().collect(),
            single => vec![single],
        };
        let rows = entries.into_iter().filter_map(row_from_value).collect();
        Some(Self { rows })
    }
}

fn row_to_value(row: &Row) -> Value {
    let children: Vec<Value> = row.columns.iter().map(column_to_value).collect();
    json!({ ROW_KEY: { "className": "row", "children": children } })
}

fn column_to_value(column: &Column) -> Value {
    let children: Vec<Value> = match &column.content {
        ColumnContent::Leaf(name) => vec![Value::String(name.clone())],
        ColumnContent::Rows(rows) => rows.iter().map(row_to_value).collect(),
    };
    json!({ COL_KEY: {
        "className": format!("col-xs-{}", column.span),
        "children": children,
    }})
}

fn row_from_value(entry: &Value) -> Option<Row> {
    let config = entry.get(ROW_KEY)?;
    let mut columns = Vec::new();
    if let Some(children) = config.get("children").and_then(Value::as_array) {
        for child in children {
            if let Some(column) = column_from_value(child) {
                columns.push(column);
            }
        }
    }
    Some(Row { columns })
}

fn column_from_value(child: &Value) -> Option<Column> {
    let config = child.get(COL_KEY).or_else(|| child.get(COLS_KEY))?;
    let span = config
        .get("className")
        .and_then(Value::as_str)
        .map(parse_span)
        .unwrap_or(GRID_UNITS);

    let mut leaf = None;
    let mut rows = Vec::new();
    if let Some(children) = config.get("children").and_then(Value::as_array) {
        for entry in children {
            match entry {
                Value::String(name) => {
                    if leaf.is_none() {
                        leaf = Some(name.clone());
                    }
                }
                nested => {
                    if let Some(row) = row_from_value(nested) {
                        rows.push(row);
                    }
                }
            }
        }
    }

    // A column carries one field reference or nested rows, never both.
    let content = if !rows.is_empty() {
        ColumnContent::Rows(rows)
    } else {
        ColumnContent::Leaf(leaf?)
    };
    Some(Column { span, content })
}

/// Extract the span from a `col-xs-N` class token, defaulting to a full row
/// when the class is missing or unparsable.
fn parse_span(class: &str) -> u8 {
    class
        .split_whitespace()
        .find_map(|token| token.strip_prefix("col-xs-"))
        .and_then(|digits| digits.parse().ok())
        .unwrap_or(GRID_UNITS)
}
