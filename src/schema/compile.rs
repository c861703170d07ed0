//! The field-list → (data schema, presentation schema) transformation.
//!
//! `compile` is a pure function: structurally equal input yields structurally
//! equal output, with no hidden counters or timestamps. Every field compiles
//! to something — unknown kinds fall back to the text mapping, duplicate
//! names overwrite earlier properties — so compilation is total.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::error::Result;
use crate::field::{Field, FieldKind};
use crate::layout::{LAYOUT_FIELD, LAYOUT_GRID_KEY, pack};

/// The coupled output documents.
///
/// `data` is a JSON-Schema-like object contract; `presentation` carries
/// per-field rendering hints and, when any field is narrower than a full
/// row, the embedded layout document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledSchemas {
    pub data_schema: Value,
    pub presentation_schema: Value,
}

impl CompiledSchemas {
    /// Render both documents as one pretty-printed JSON object, suitable for
    /// saving to a file as-is.
    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the pretty-printed documents to `path`.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }
}

/// Compile an ordered field list into its data and presentation schemas.
///
/// Property iteration order follows list order. `required` is attached only
/// when at least one field asks for it.
pub fn compile(fields: &[Field]) -> CompiledSchemas {
    let mut properties = Map::new();
    let mut required: Vec<Value> = Vec::new();
    let mut presentation = Map::new();

    for field in fields {
        let (prop, ui) = compile_field(field);
        properties.insert(field.name.clone(), Value::Object(prop));
        if !ui.is_empty() {
            presentation.insert(field.name.clone(), Value::Object(ui));
        }
        if field.required {
            required.push(Value::String(field.name.clone()));
        }
    }

    let mut data = Map::new();
    data.insert("type".to_string(), json!("object"));
    data.insert("properties".to_string(), Value::Object(properties));
    if !required.is_empty() {
        data.insert("required".to_string(), Value::Array(required));
    }

    if needs_layout(fields) {
        let document = pack(fields.iter().map(|f| (f.name.as_str(), f.width_fraction)));
        presentation.insert("ui:field".to_string(), json!(LAYOUT_FIELD));
        presentation.insert(LAYOUT_GRID_KEY.to_string(), document.to_value());
    }

    CompiledSchemas {
        data_schema: Value::Object(data),
        presentation_schema: Value::Object(presentation),
    }
}

fn needs_layout(fields: &[Field]) -> bool {
    fields
        .iter()
        .any(|f| f.width_fraction.is_some_and(|w| w < 100))
}

type Fragment = Map<String, Value>;

fn compile_field(field: &Field) -> (Fragment, Fragment) {
    let mut prop = Fragment::new();
    let mut ui = Fragment::new();

    match field.kind {
        FieldKind::Text | FieldKind::Unrecognized => {
            string_fragment(field, &mut prop);
        }
        FieldKind::MultilineText => {
            string_fragment(field, &mut prop);
            let widget = field.widget_variant.as_deref().unwrap_or("multiline");
            ui.insert("ui:widget".to_string(), json!(widget));
            if let Some(rows) = field.row_count {
                ui.insert("ui:options".to_string(), json!({ "rows": rows }));
            }
        }
        FieldKind::Number => {
            prop.insert("type".to_string(), json!("number"));
            prop.insert("title".to_string(), json!(field.title));
            if let Some(minimum) = field.minimum {
                prop.insert("minimum".to_string(), json!(minimum));
            }
            if let Some(maximum) = field.maximum {
                prop.insert("maximum".to_string(), json!(maximum));
            }
            if let Some(default) = field.default_value.as_ref().filter(|v| v.is_number()) {
                prop.insert("default".to_string(), default.clone());
            }
        }
        FieldKind::Boolean => {
            prop.insert("type".to_string(), json!("boolean"));
            prop.insert("title".to_string(), json!(field.title));
            if let Some(default) = field.default_value.as_ref().filter(|v| v.is_boolean()) {
                prop.insert("default".to_string(), default.clone());
            }
            if field.widget_variant.as_deref() == Some("radio") {
                ui.insert("ui:widget".to_string(), json!("radio"));
            } else if field.inline {
                ui.insert("ui:options".to_string(), json!({ "inline": true }));
            }
        }
        FieldKind::Choice => {
            prop.insert("type".to_string(), json!("string"));
            prop.insert("title".to_string(), json!(field.title));
            prop.insert(
                "enum".to_string(),
                json!(field.choices.clone().unwrap_or_default()),
            );
            if let Some(default) = string_default(field) {
                prop.insert("default".to_string(), json!(default));
            }
            if field.widget_variant.as_deref() == Some("radio") {
                ui.insert("ui:widget".to_string(), json!("radio"));
                if field.inline {
                    ui.insert("ui:options".to_string(), json!({ "inline": true }));
                }
            }
        }
    }

    if let Some(description) = non_empty(field.description.as_deref()) {
        prop.insert("description".to_string(), json!(description));
    }

    // Common presentation step, applied after the kind mapping.
    if let Some(placeholder) = non_empty(field.placeholder.as_deref())
        && !prop.contains_key("default")
    {
        ui.insert("ui:placeholder".to_string(), json!(placeholder));
    }
    if let Some(help) = non_empty(field.help_text.as_deref()) {
        ui.insert("ui:help".to_string(), json!(help));
    }
    if field.disabled {
        ui.insert("ui:disabled".to_string(), json!(true));
    }

    (prop, ui)
}

/// The text mapping: a string property whose default comes from the
/// placeholder, overridden by an explicit string default.
fn string_fragment(field: &Field, prop: &mut Fragment) {
    prop.insert("type".to_string(), json!("string"));
    prop.insert("title".to_string(), json!(field.title));
    if let Some(placeholder) = non_empty(field.placeholder.as_deref()) {
        prop.insert("default".to_string(), json!(placeholder));
    }
    if let Some(default) = string_default(field) {
        prop.insert("default".to_string(), json!(default));
    }
}

fn string_default(field: &Field) -> Option<&str> {
    non_empty(field.default_value.as_ref().and_then(Value::as_str))
}

// Empty display strings carry no signal and are dropped.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldId;

    fn field(kind: FieldKind, name: &str) -> Field {
        Field::new(kind).with_name(name)
    }

    #[test]
    fn required_text_field_compiles_to_object_schema() {
        let fields = vec![field(FieldKind::Text, "a").with_required(true)];
        let compiled = compile(&fields);

        assert_eq!(compiled.data_schema["type"], json!("object"));
        assert_eq!(compiled.data_schema["properties"]["a"]["type"], json!("string"));
        assert_eq!(
            compiled.data_schema["properties"]["a"]["title"],
            json!(fields[0].title)
        );
        assert_eq!(compiled.data_schema["required"], json!(["a"]));
    }

    #[test]
    fn choice_enum_matches_choices_exactly() {
        let fields = vec![
            field(FieldKind::Choice, "b").with_choices(vec!["X".to_string(), "Y".to_string()]),
        ];
        let compiled = compile(&fields);

        assert_eq!(compiled.data_schema["properties"]["b"]["enum"], json!(["X", "Y"]));
        assert!(compiled.data_schema.get("required").is_none());
    }

    #[test]
    fn compile_is_deterministic() {
        let fields = vec![
            field(FieldKind::Text, "a").with_width(50),
            field(FieldKind::Number, "b"),
            field(FieldKind::Boolean, "c").with_required(true),
        ];
        assert_eq!(compile(&fields), compile(&fields));
    }

    #[test]
    fn property_order_follows_list_order() {
        let fields = vec![
            field(FieldKind::Number, "zeta"),
            field(FieldKind::Text, "alpha"),
            field(FieldKind::Boolean, "mid"),
        ];
        let compiled = compile(&fields);
        let keys: Vec<&str> = compiled.data_schema["properties"]
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn required_lists_names_in_list_order() {
        let fields = vec![
            field(FieldKind::Text, "one").with_required(true),
            field(FieldKind::Text, "two"),
            field(FieldKind::Text, "three").with_required(true),
        ];
        let compiled = compile(&fields);
        assert_eq!(compiled.data_schema["required"], json!(["one", "three"]));
    }

    #[test]
    fn required_key_is_omitted_when_empty() {
        let compiled = compile(&[field(FieldKind::Text, "a")]);
        assert!(compiled.data_schema.as_object().unwrap().get("required").is_none());
    }

    #[test]
    fn placeholder_seeds_default_and_is_then_suppressed() {
        let fields = vec![field(FieldKind::Text, "a").with_placeholder("type here")];
        let compiled = compile(&fields);
        assert_eq!(
            compiled.data_schema["properties"]["a"]["default"],
            json!("type here")
        );
        // The default absorbed the placeholder, so no ui:placeholder.
        assert!(compiled.presentation_schema.get("a").is_none());
    }

    #[test]
    fn explicit_default_overrides_placeholder() {
        let fields = vec![
            field(FieldKind::Text, "a")
                .with_placeholder("hint")
                .with_default(json!("value")),
        ];
        let compiled = compile(&fields);
        assert_eq!(compiled.data_schema["properties"]["a"]["default"], json!("value"));
    }

    #[test]
    fn empty_placeholder_is_ignored() {
        let fields = vec![field(FieldKind::Text, "a").with_placeholder("")];
        let compiled = compile(&fields);
        assert!(
            compiled.data_schema["properties"]["a"]
                .as_object()
                .unwrap()
                .get("default")
                .is_none()
        );
        assert!(compiled.presentation_schema.get("a").is_none());
    }

    #[test]
    fn number_bounds_and_zero_default_survive() {
        let mut f = field(FieldKind::Number, "n").with_default(json!(0));
        f.minimum = Some(1.0);
        f.maximum = Some(10.0);
        let compiled = compile(&[f]);
        let prop = &compiled.data_schema["properties"]["n"];
        assert_eq!(prop["type"], json!("number"));
        assert_eq!(prop["minimum"], json!(1.0));
        assert_eq!(prop["maximum"], json!(10.0));
        assert_eq!(prop["default"], json!(0));
    }

    #[test]
    fn boolean_false_default_survives() {
        let compiled = compile(&[field(FieldKind::Boolean, "flag")]);
        // Field::new seeds `false` for booleans.
        assert_eq!(
            compiled.data_schema["properties"]["flag"]["default"],
            json!(false)
        );
    }

    #[test]
    fn boolean_radio_variant_wins_over_inline() {
        let mut f = field(FieldKind::Boolean, "flag");
        f.widget_variant = Some("radio".to_string());
        f.inline = true;
        let compiled = compile(&[f]);
        let ui = &compiled.presentation_schema["flag"];
        assert_eq!(ui["ui:widget"], json!("radio"));
        assert!(ui.as_object().unwrap().get("ui:options").is_none());
    }

    #[test]
    fn boolean_inline_without_radio_sets_options() {
        let mut f = field(FieldKind::Boolean, "flag");
        f.inline = true;
        let compiled = compile(&[f]);
        assert_eq!(
            compiled.presentation_schema["flag"]["ui:options"],
            json!({ "inline": true })
        );
    }

    #[test]
    fn choice_radio_variant_carries_inline_option() {
        let mut f = field(FieldKind::Choice, "pick");
        f.widget_variant = Some("radio".to_string());
        f.inline = true;
        let compiled = compile(&[f]);
        let ui = &compiled.presentation_schema["pick"];
        assert_eq!(ui["ui:widget"], json!("radio"));
        assert_eq!(ui["ui:options"], json!({ "inline": true }));
    }

    #[test]
    fn multiline_gets_widget_and_rows() {
        let mut f = field(FieldKind::MultilineText, "notes");
        f.row_count = Some(5);
        f.placeholder = None;
        let compiled = compile(&[f]);
        let ui = &compiled.presentation_schema["notes"];
        assert_eq!(ui["ui:widget"], json!("multiline"));
        assert_eq!(ui["ui:options"], json!({ "rows": 5 }));
    }

    #[test]
    fn multiline_widget_variant_overrides_default_widget() {
        let mut f = field(FieldKind::MultilineText, "notes");
        f.widget_variant = Some("codeblock".to_string());
        f.placeholder = None;
        let compiled = compile(&[f]);
        assert_eq!(
            compiled.presentation_schema["notes"]["ui:widget"],
            json!("codeblock")
        );
    }

    #[test]
    fn help_disabled_and_description_land_on_their_documents() {
        let mut f = field(FieldKind::Text, "a");
        f.help_text = Some("shown under the control".to_string());
        f.description = Some("long form".to_string());
        f.disabled = true;
        let compiled = compile(&[f]);

        assert_eq!(
            compiled.data_schema["properties"]["a"]["description"],
            json!("long form")
        );
        let ui = &compiled.presentation_schema["a"];
        assert_eq!(ui["ui:help"], json!("shown under the control"));
        assert_eq!(ui["ui:disabled"], json!(true));
        assert!(
            compiled.data_schema["properties"]["a"]
                .as_object()
                .unwrap()
                .get("ui:help")
                .is_none()
        );
    }

    #[test]
    fn unrecognized_kind_compiles_as_text() {
        let mut f = field(FieldKind::Text, "mystery");
        f.kind = FieldKind::Unrecognized;
        let compiled = compile(&[f]);
        assert_eq!(
            compiled.data_schema["properties"]["mystery"]["type"],
            json!("string")
        );
    }

    #[test]
    fn duplicate_names_overwrite_last_wins() {
        let fields = vec![
            field(FieldKind::Text, "dup").with_title("first"),
            field(FieldKind::Number, "dup").with_title("second"),
        ];
        let compiled = compile(&fields);
        let properties = compiled.data_schema["properties"].as_object().unwrap();
        assert_eq!(properties.len(), 1);
        assert_eq!(properties["dup"]["type"], json!("number"));
        assert_eq!(properties["dup"]["title"], json!("second"));
    }

    #[test]
    fn narrow_field_triggers_layout_document() {
        let fields = vec![
            field(FieldKind::Text, "a").with_width(50),
            field(FieldKind::Text, "b").with_width(50),
        ];
        let compiled = compile(&fields);
        let ui = compiled.presentation_schema.as_object().unwrap();
        assert_eq!(ui["ui:field"], json!(LAYOUT_FIELD));
        let grid = &ui[LAYOUT_GRID_KEY];
        assert_eq!(
            grid["ui:row"][0]["ui:row"]["children"][0]["ui:col"]["className"],
            json!("col-xs-6")
        );
    }

    #[test]
    fn full_width_fields_compile_without_layout() {
        let fields = vec![
            field(FieldKind::Text, "a"),
            field(FieldKind::Text, "b").with_width(100),
        ];
        let compiled = compile(&fields);
        let ui = compiled.presentation_schema.as_object().unwrap();
        assert!(ui.get("ui:field").is_none());
        assert!(ui.get(LAYOUT_GRID_KEY).is_none());
    }

    #[test]
    fn layout_keeps_per_field_fragments() {
        let mut narrow = field(FieldKind::MultilineText, "notes").with_width(50);
        narrow.placeholder = None;
        let fields = vec![narrow, field(FieldKind::Text, "b").with_width(50)];
        let compiled = compile(&fields);
        let ui = compiled.presentation_schema.as_object().unwrap();
        assert_eq!(ui["notes"]["ui:widget"], json!("multiline"));
        assert!(ui.contains_key(LAYOUT_GRID_KEY));
    }

    #[test]
    fn serialized_output_uses_camel_case_document_keys() {
        let compiled = compile(&[field(FieldKind::Text, "a")]);
        let value = serde_json::to_value(&compiled).unwrap();
        assert!(value.get("dataSchema").is_some());
        assert!(value.get("presentationSchema").is_some());
        let pretty = compiled.to_pretty_json().unwrap();
        assert!(pretty.contains("\"dataSchema\""));
    }

    #[test]
    fn compile_ignores_descriptor_ids() {
        let mut a = field(FieldKind::Text, "same");
        let mut b = a.clone();
        a.id = FieldId::generate();
        b.id = FieldId::generate();
        assert_eq!(compile(&[a]), compile(&[b]));
    }
}
