//! Rewrites a descriptor into the ordered-list field form.
//!
//! Authors write `fields` as an object keyed by field id. The generator
//! walks an ordered list instead, so every field map (root, nested object
//! `fields` or legacy `properties`, and array `items` recursively) becomes
//! `[{"id": <key>, ...definition}]` in declaration order. A map key always
//! wins over an `id` already present in the definition.
//!
//! Anything that is not a field map is copied through untouched, so the
//! rewrite is safe on descriptors that were never validated.

use serde_json::{Map, Value};

/// Return the normalized form of `descriptor`.
pub fn normalize_descriptor(descriptor: &Value) -> Value {
    let Value::Object(root) = descriptor else {
        return descriptor.clone();
    };

    let mut out = root.clone();
    if let Some(fields) = root.get("fields") {
        out.insert("fields".to_string(), normalize_field_collection(fields));
    }
    Value::Object(out)
}

fn normalize_field_collection(fields: &Value) -> Value {
    match fields {
        Value::Object(map) => Value::Array(
            map.iter()
                .map(|(id, definition)| with_id(id, definition))
                .collect(),
        ),
        Value::Array(list) => Value::Array(list.iter().map(normalize_definition).collect()),
        other => other.clone(),
    }
}

fn with_id(id: &str, definition: &Value) -> Value {
    let Value::Object(def) = normalize_definition(definition) else {
        return definition.clone();
    };

    let mut out = Map::with_capacity(def.len() + 1);
    out.insert("id".to_string(), Value::String(id.to_string()));
    for (key, value) in def {
        if key != "id" {
            out.insert(key, value);
        }
    }
    Value::Object(out)
}

fn normalize_definition(definition: &Value) -> Value {
    let Value::Object(def) = definition else {
        return definition.clone();
    };

    let mut out = def.clone();
    if let Some(nested) = def.get("fields") {
        out.insert("fields".to_string(), normalize_field_collection(nested));
        out.remove("properties");
    } else if let Some(nested) = def.get("properties") {
        out.insert("fields".to_string(), normalize_field_collection(nested));
        out.remove("properties");
    }
    if let Some(items) = def.get("items") {
        out.insert("items".to_string(), normalize_definition(items));
    }
    Value::Object(out)
}
