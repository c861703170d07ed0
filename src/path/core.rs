use serde_json::{Map, Value};

/// Walk `root` along a `.`-separated path, returning the value at the leaf.
///
/// Short-circuits to `None` as soon as a segment is missing or the current
/// node is not an object. The empty path resolves to nothing.
pub fn get<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return None;
    }
    let mut current = root;
    for segment in path.split('.') {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Produce a new document equal to `root` except at `path`, where `leaf` is
/// installed.
///
/// Only objects along the spine are rebuilt; the input is never mutated.
/// Missing intermediates are created and non-object intermediates are
/// replaced by fresh objects. An empty path replaces the whole document.
pub fn set(root: &Value, path: &str, leaf: Value) -> Value {
    if path.is_empty() {
        return leaf;
    }
    let segments: Vec<&str> = path.split('.').collect();
    set_at(root, &segments, leaf)
}

fn set_at(node: &Value, segments: &[&str], leaf: Value) -> Value {
    let Some((head, rest)) = segments.split_first() else {
        return leaf;
    };

    let mut map = match node.as_object() {
        Some(existing) => existing.clone(),
        None => Map::new(),
    };
    let child = map.get(*head).cloned().unwrap_or(Value::Null);
    map.insert((*head).to_string(), set_at(&child, rest, leaf));
    Value::Object(map)
}
