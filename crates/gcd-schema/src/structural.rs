//! # Structural Validation
//!
//! Recursively checks a JSON value against a [`MetaSchema`].
//!
//! Per node, in order:
//! 1. `type` — on mismatch one error is recorded and the node is not
//!    descended into (siblings are still validated);
//! 2. `enum` — deep-equality membership, does not short-circuit;
//! 3. type-specific keywords for strings, numbers, arrays, and objects.
//!
//! Booleans and null carry no further constraints.

use fancy_regex::Regex;
use serde_json::{Map, Value};

use gcd_core::{deep_equal, json_type_of, FieldPath, JsonType};

use crate::error::SchemaError;
use crate::meta::{AdditionalProperties, MetaSchema};
use crate::report::{ErrorCollector, ValidationError};
use crate::MAX_DEPTH;

/// Validate `value` against `schema`, returning every violation found.
///
/// # Errors
///
/// Returns [`SchemaError::DepthExceeded`] if the document nests deeper than
/// [`MAX_DEPTH`]; no partial error list is returned in that case.
pub fn validate_structure(
    value: &Value,
    schema: &MetaSchema,
) -> Result<Vec<ValidationError>, SchemaError> {
    let mut errors = ErrorCollector::default();
    check_node(value, schema, &FieldPath::root(), &mut errors)?;
    Ok(errors.into_errors())
}

fn check_node(
    value: &Value,
    schema: &MetaSchema,
    path: &FieldPath,
    errors: &mut ErrorCollector,
) -> Result<(), SchemaError> {
    if path.depth() > MAX_DEPTH {
        return Err(SchemaError::DepthExceeded {
            max: MAX_DEPTH,
            path: path.to_string(),
        });
    }

    let actual = json_type_of(value);

    if let Some(type_spec) = &schema.type_spec {
        let allowed = type_spec.names();
        if !allowed.iter().any(|name| actual.satisfies(name)) {
            errors.add(
                path,
                format!("type mismatch: expected {}, got {actual}", allowed.join(" | ")),
            );
            return Ok(());
        }
    }

    if let Some(enum_values) = &schema.enum_values {
        if !enum_values.iter().any(|candidate| deep_equal(candidate, value)) {
            errors.add(
                path,
                format!("value is not in enum: {}", Value::Array(enum_values.clone())),
            );
        }
    }

    match (actual, value) {
        (JsonType::String, Value::String(s)) => check_string(s, schema, path, errors),
        (JsonType::Integer | JsonType::Number, Value::Number(n)) => {
            if let Some(n) = n.as_f64() {
                check_number(n, schema, path, errors);
            }
        }
        (JsonType::Array, Value::Array(items)) => check_array(items, schema, path, errors)?,
        (JsonType::Object, Value::Object(map)) => check_object(map, schema, path, errors)?,
        _ => {}
    }

    Ok(())
}

fn check_string(value: &str, schema: &MetaSchema, path: &FieldPath, errors: &mut ErrorCollector) {
    if let Some(pattern) = &schema.pattern {
        match Regex::new(pattern) {
            Ok(re) => match re.is_match(value) {
                Ok(true) => {}
                Ok(false) => {
                    errors.add(path, format!("string does not match pattern: {pattern}"));
                }
                Err(e) => {
                    errors.add(path, format!("pattern could not be evaluated: {e}"));
                }
            },
            Err(_) => {
                errors.add(
                    path,
                    format!("invalid pattern in schema: {}", Value::String(pattern.clone())),
                );
            }
        }
    }

    let length = value.chars().count() as u64;

    if let Some(min) = schema.min_length {
        if length < min {
            errors.add(path, format!("string length {length} is less than minLength {min}"));
        }
    }

    if let Some(max) = schema.max_length {
        if length > max {
            errors.add(path, format!("string length {length} is greater than maxLength {max}"));
        }
    }
}

fn check_number(value: f64, schema: &MetaSchema, path: &FieldPath, errors: &mut ErrorCollector) {
    if let Some(min) = schema.minimum {
        if value < min {
            errors.add(path, format!("number {value} is less than minimum {min}"));
        }
    }

    if let Some(max) = schema.maximum {
        if value > max {
            errors.add(path, format!("number {value} is greater than maximum {max}"));
        }
    }

    if let Some(min) = schema.exclusive_minimum {
        if value <= min {
            errors.add(
                path,
                format!("number {value} is less than or equal to exclusiveMinimum {min}"),
            );
        }
    }

    if let Some(max) = schema.exclusive_maximum {
        if value >= max {
            errors.add(
                path,
                format!("number {value} is greater than or equal to exclusiveMaximum {max}"),
            );
        }
    }
}

fn check_array(
    items: &[Value],
    schema: &MetaSchema,
    path: &FieldPath,
    errors: &mut ErrorCollector,
) -> Result<(), SchemaError> {
    let length = items.len() as u64;

    if let Some(min) = schema.min_items {
        if length < min {
            errors.add(path, format!("array length {length} is less than minItems {min}"));
        }
    }

    if let Some(max) = schema.max_items {
        if length > max {
            errors.add(path, format!("array length {length} is greater than maxItems {max}"));
        }
    }

    if let Some(item_schema) = &schema.items {
        for (i, item) in items.iter().enumerate() {
            check_node(item, item_schema, &path.index(i), errors)?;
        }
    }

    Ok(())
}

fn check_object(
    map: &Map<String, Value>,
    schema: &MetaSchema,
    path: &FieldPath,
    errors: &mut ErrorCollector,
) -> Result<(), SchemaError> {
    if let Some(required) = &schema.required {
        for key in required {
            if !map.contains_key(key) {
                errors.add(&path.join(key.as_str()), "missing required property");
            }
        }
    }

    if let Some(properties) = &schema.properties {
        for (name, property_schema) in properties.iter() {
            if let Some(child) = map.get(name) {
                check_node(child, property_schema, &path.join(name), errors)?;
            }
        }
    }

    let is_declared =
        |key: &str| schema.properties.as_ref().is_some_and(|props| props.contains(key));

    match &schema.additional_properties {
        None | Some(AdditionalProperties::Allowed(true)) => {}
        Some(AdditionalProperties::Allowed(false)) => {
            for key in map.keys().filter(|k| !is_declared(k.as_str())) {
                errors.add(&path.join(key.as_str()), "additional property is not allowed");
            }
        }
        Some(AdditionalProperties::Schema(extra_schema)) => {
            for (key, child) in map.iter().filter(|(k, _)| !is_declared(k.as_str())) {
                check_node(child, extra_schema, &path.join(key.as_str()), errors)?;
            }
        }
    }

    Ok(())
}
