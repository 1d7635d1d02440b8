//! # Domain Rules
//!
//! Validates a raw descriptor against the module-definition grammar.
//!
//! Root level:
//! - the root must be a JSON object (otherwise one `<root>` error and stop);
//! - `id` and `version` must be present and be strings;
//! - `fields` must be present and be an object mapping field ids to field
//!   definitions.
//!
//! Field definitions:
//! - must be objects with a string `type` from the six closed kinds;
//! - `description`/`help` are strings; `default` agrees with `type`;
//! - `validation` is an object of `regex`/`min`/`max`/`required` rules;
//! - `ui` is an object of primitive hints;
//! - enums need a non-empty `options` array of primitives;
//! - objects may nest a field map under `fields` (or `properties`);
//! - arrays need an `items` field definition.
//!
//! Every violation is collected; a bad field never hides its siblings.

use fancy_regex::Regex;
use serde_json::{Map, Value};

use gcd_core::{deep_equal, is_object, is_primitive, FieldKind, FieldPath};

use crate::error::SchemaError;
use crate::report::{ErrorCollector, ValidationError};
use crate::MAX_DEPTH;

/// Validate `descriptor` against the module grammar.
///
/// # Errors
///
/// Returns [`SchemaError::DepthExceeded`] when nested field definitions go
/// deeper than [`MAX_DEPTH`].
pub fn validate_domain(descriptor: &Value) -> Result<Vec<ValidationError>, SchemaError> {
    let mut errors = ErrorCollector::default();

    let Value::Object(root) = descriptor else {
        errors.add(&FieldPath::root(), "module schema must be a JSON object at the root");
        return Ok(errors.into_errors());
    };

    check_string_key(root, "id", &mut errors);
    check_string_key(root, "version", &mut errors);

    match root.get("fields") {
        None => errors.add(&FieldPath::key("fields"), "missing required key \"fields\""),
        Some(fields) => check_field_map(fields, &FieldPath::key("fields"), &mut errors)?,
    }

    Ok(errors.into_errors())
}

fn check_string_key(root: &Map<String, Value>, key: &str, errors: &mut ErrorCollector) {
    match root.get(key) {
        None => errors.add(&FieldPath::key(key), format!("missing required key \"{key}\"")),
        Some(Value::String(_)) => {}
        Some(_) => errors.add(&FieldPath::key(key), format!("{key} must be a string")),
    }
}

fn check_field_map(
    fields: &Value,
    path: &FieldPath,
    errors: &mut ErrorCollector,
) -> Result<(), SchemaError> {
    let Value::Object(map) = fields else {
        errors.add(path, "fields must be an object mapping field IDs to field definitions");
        return Ok(());
    };

    for (field_id, definition) in map {
        check_field_definition(definition, &path.join(field_id.as_str()), errors)?;
    }

    Ok(())
}

fn check_field_definition(
    definition: &Value,
    path: &FieldPath,
    errors: &mut ErrorCollector,
) -> Result<(), SchemaError> {
    if path.depth() > MAX_DEPTH {
        return Err(SchemaError::DepthExceeded {
            max: MAX_DEPTH,
            path: path.to_string(),
        });
    }

    let Value::Object(def) = definition else {
        errors.add(path, "field definition must be an object");
        return Ok(());
    };

    let Some(Value::String(type_name)) = def.get("type") else {
        errors.add(path, "missing or invalid \"type\"; expected a string");
        return Ok(());
    };

    let kind = FieldKind::from_type_name(type_name);
    if !kind.is_recognized() {
        errors.add(path, format!("unknown field type \"{type_name}\""));
    }

    for key in ["description", "help"] {
        if let Some(text) = def.get(key) {
            if !text.is_string() {
                errors.add(&path.join(key), format!("{key} must be a string"));
            }
        }
    }

    if let Some(default) = def.get("default") {
        check_default(default, &kind, def, &path.join("default"), errors);
    }

    if let Some(rules) = def.get("validation") {
        check_validation_rules(rules, &kind, &path.join("validation"), errors);
    }

    if let Some(ui) = def.get("ui") {
        check_ui_hints(ui, &path.join("ui"), errors);
    }

    match kind {
        FieldKind::Enum => check_enum_field(def, path, errors),
        FieldKind::Object => check_object_field(def, path, errors)?,
        FieldKind::Array => check_array_field(def, path, errors)?,
        _ => {}
    }

    Ok(())
}

fn check_default(
    default: &Value,
    kind: &FieldKind,
    def: &Map<String, Value>,
    path: &FieldPath,
    errors: &mut ErrorCollector,
) {
    match kind {
        FieldKind::String => {
            if !default.is_string() {
                errors.add(path, "default value must be a string");
            }
        }
        FieldKind::Number => {
            if !default.is_number() {
                errors.add(path, "default value must be a number");
            }
        }
        FieldKind::Boolean => {
            if !default.is_boolean() {
                errors.add(path, "default value must be a boolean");
            }
        }
        FieldKind::Enum => match def.get("options") {
            Some(Value::Array(options)) => {
                if !options.iter().any(|option| deep_equal(option, default)) {
                    errors.add(path, "default value must be one of the enum \"options\"");
                }
            }
            _ => errors.add(path, "enum field must define \"options\" as an array"),
        },
        FieldKind::Object => {
            if !is_object(default) {
                errors.add(path, "default value for object field must be an object");
            }
        }
        FieldKind::Array => {
            if !default.is_array() {
                errors.add(path, "default value for array field must be an array");
            }
        }
        FieldKind::Unknown(name) => {
            errors.add(
                path,
                format!("default value validation not implemented for field type \"{name}\""),
            );
        }
    }
}

fn check_validation_rules(
    rules: &Value,
    kind: &FieldKind,
    path: &FieldPath,
    errors: &mut ErrorCollector,
) {
    let Value::Object(rules) = rules else {
        errors.add(path, "validation must be an object");
        return;
    };

    if let Some(regex) = rules.get("regex") {
        let regex_path = path.join("regex");
        match regex {
            Value::String(_) if *kind != FieldKind::String => {
                errors.add(&regex_path, "regex validation is only applicable to string fields");
            }
            Value::String(pattern) => {
                if Regex::new(pattern).is_err() {
                    errors.add(&regex_path, "regex is not a valid regular expression");
                }
            }
            _ => errors.add(&regex_path, "regex must be a string"),
        }
    }

    for key in ["min", "max"] {
        if let Some(bound) = rules.get(key) {
            if !bound.is_number() {
                errors.add(&path.join(key), format!("{key} must be a number"));
            }
        }
    }

    if let Some(required) = rules.get("required") {
        if !required.is_boolean() {
            errors.add(&path.join("required"), "required must be a boolean");
        }
    }
}

fn check_ui_hints(ui: &Value, path: &FieldPath, errors: &mut ErrorCollector) {
    let Value::Object(hints) = ui else {
        errors.add(path, "ui must be an object of UI hint key-value pairs");
        return;
    };

    for (key, hint) in hints {
        if !is_primitive(hint) {
            errors.add(
                &path.join(key.as_str()),
                "UI hint values must be primitive (string, number, boolean, or null)",
            );
        }
    }
}

fn check_enum_field(def: &Map<String, Value>, path: &FieldPath, errors: &mut ErrorCollector) {
    let Some(Value::Array(options)) = def.get("options") else {
        errors.add(path, "enum field must define \"options\" as an array");
        return;
    };

    if options.is_empty() {
        errors.add(path, "enum \"options\" array must not be empty");
    }

    let options_path = path.join("options");
    for (i, option) in options.iter().enumerate() {
        if !is_primitive(option) {
            errors.add(
                &options_path.index(i),
                "enum option should be a primitive value (string, number, boolean, or null)",
            );
        }
    }
}

fn check_object_field(
    def: &Map<String, Value>,
    path: &FieldPath,
    errors: &mut ErrorCollector,
) -> Result<(), SchemaError> {
    // A leaf object (neither key present) is legal.
    if let Some(nested) = def.get("fields") {
        check_field_map(nested, &path.join("fields"), errors)
    } else if let Some(nested) = def.get("properties") {
        check_field_map(nested, &path.join("properties"), errors)
    } else {
        Ok(())
    }
}

fn check_array_field(
    def: &Map<String, Value>,
    path: &FieldPath,
    errors: &mut ErrorCollector,
) -> Result<(), SchemaError> {
    match def.get("items") {
        None => {
            errors.add(path, "array field must define \"items\" schema");
            Ok(())
        }
        Some(items) => check_field_definition(items, &path.join("items"), errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn errors_of(descriptor: Value) -> Vec<String> {
        validate_domain(&descriptor)
            .unwrap()
            .into_iter()
            .map(|e| e.to_string())
            .collect()
    }

    fn module(fields: Value) -> Value {
        json!({"id": "mockmod", "version": "1.0.0", "fields": fields})
    }

    #[test]
    fn well_formed_module_has_no_errors() {
        let errs = errors_of(module(json!({
            "title": {
                "type": "string",
                "description": "Display title",
                "help": "Shown in the header",
                "default": "Hello",
                "validation": {"regex": "^[A-Za-z ]+$", "min": 1, "max": 64, "required": true},
                "ui": {"widget": "text", "order": 1, "advanced": false, "group": null}
            },
            "retries": {"type": "number", "default": 3, "validation": {"min": 0, "max": 10}},
            "enabled": {"type": "boolean", "default": true},
            "mode": {"type": "enum", "options": ["fast", "safe"], "default": "safe"},
            "server": {
                "type": "object",
                "fields": {
                    "host": {"type": "string", "default": "localhost"},
                    "port": {"type": "number", "default": 8080}
                }
            },
            "legacy": {"type": "object", "properties": {"flag": {"type": "boolean"}}},
            "extra": {"type": "object", "default": {}},
            "tags": {"type": "array", "items": {"type": "string"}, "default": ["a"]}
        })));
        assert!(errs.is_empty(), "unexpected errors: {errs:?}");
    }

    #[test]
    fn root_must_be_object() {
        assert_eq!(errors_of(json!([1, 2])), vec!["<root>: module schema must be a JSON object at the root"]);
        assert_eq!(errors_of(json!(null)).len(), 1);
        assert_eq!(errors_of(json!("x")).len(), 1);
    }

    #[test]
    fn one_error_per_missing_root_key() {
        let errs = errors_of(json!({}));
        assert_eq!(
            errs,
            vec![
                "id: missing required key \"id\"",
                "version: missing required key \"version\"",
                "fields: missing required key \"fields\"",
            ]
        );

        let errs = errors_of(json!({"id": "m", "fields": {}}));
        assert_eq!(errs, vec!["version: missing required key \"version\""]);
    }

    #[test]
    fn root_keys_must_be_strings() {
        let errs = errors_of(json!({"id": 123, "version": 2, "fields": {}}));
        assert_eq!(errs, vec!["id: id must be a string", "version: version must be a string"]);
    }

    #[test]
    fn fields_must_be_an_object_map() {
        assert_eq!(
            errors_of(module(json!([{"id": "a", "type": "string"}]))),
            vec!["fields: fields must be an object mapping field IDs to field definitions"]
        );
        assert_eq!(errors_of(module(json!(null))).len(), 1);
    }

    #[test]
    fn field_definition_shape() {
        let errs = errors_of(module(json!({
            "scalar": 5,
            "untyped": {"description": "no type"},
            "numeric_type": {"type": 7}
        })));
        assert_eq!(
            errs,
            vec![
                "fields.scalar: field definition must be an object",
                "fields.untyped: missing or invalid \"type\"; expected a string",
                "fields.numeric_type: missing or invalid \"type\"; expected a string",
            ]
        );
    }

    #[test]
    fn unknown_type_is_rejected_but_checks_continue() {
        let errs = errors_of(module(json!({
            "color": {"type": "color", "default": "#fff", "help": 1}
        })));
        assert_eq!(
            errs,
            vec![
                "fields.color: unknown field type \"color\"",
                "fields.color.help: help must be a string",
                "fields.color.default: default value validation not implemented for field type \"color\"",
            ]
        );
    }

    #[test]
    fn scalar_defaults_must_match_type() {
        let errs = errors_of(module(json!({
            "s": {"type": "string", "default": 1},
            "n": {"type": "number", "default": "1"},
            "b": {"type": "boolean", "default": "yes"}
        })));
        assert_eq!(
            errs,
            vec![
                "fields.s.default: default value must be a string",
                "fields.n.default: default value must be a number",
                "fields.b.default: default value must be a boolean",
            ]
        );
    }

    #[test]
    fn structured_defaults_must_match_type() {
        let errs = errors_of(module(json!({
            "o": {"type": "object", "default": []},
            "a": {"type": "array", "items": {"type": "number"}, "default": {}}
        })));
        assert_eq!(
            errs,
            vec![
                "fields.o.default: default value for object field must be an object",
                "fields.a.default: default value for array field must be an array",
            ]
        );
    }

    #[test]
    fn enum_default_must_be_an_option() {
        let errs = errors_of(module(json!({
            "mode": {"type": "enum", "options": ["a", {"k": 1}], "default": {"k": 1}},
            "bad": {"type": "enum", "options": ["a"], "default": "z"}
        })));
        assert_eq!(
            errs,
            vec![
                "fields.mode.options[1]: enum option should be a primitive value (string, number, boolean, or null)",
                "fields.bad.default: default value must be one of the enum \"options\"",
            ]
        );
    }

    #[test]
    fn enum_without_options_reports_default_and_field() {
        let errs = errors_of(module(json!({
            "mode": {"type": "enum", "default": "a"}
        })));
        assert_eq!(
            errs,
            vec![
                "fields.mode.default: enum field must define \"options\" as an array",
                "fields.mode: enum field must define \"options\" as an array",
            ]
        );
    }

    #[test]
    fn enum_options_must_be_non_empty() {
        let errs = errors_of(module(json!({"mode": {"type": "enum", "options": []}})));
        assert_eq!(errs, vec!["fields.mode: enum \"options\" array must not be empty"]);
    }

    #[test]
    fn validation_rules() {
        let errs = errors_of(module(json!({
            "name": {
                "type": "string",
                "validation": {"regex": "[unclosed", "min": "low", "max": 5, "required": "yes"}
            },
            "count": {"type": "number", "validation": {"regex": "^\\d+$"}},
            "flag": {"type": "boolean", "validation": {"regex": 12}},
            "other": {"type": "string", "validation": []}
        })));
        assert_eq!(
            errs,
            vec![
                "fields.name.validation.regex: regex is not a valid regular expression",
                "fields.name.validation.min: min must be a number",
                "fields.name.validation.required: required must be a boolean",
                "fields.count.validation.regex: regex validation is only applicable to string fields",
                "fields.flag.validation.regex: regex must be a string",
                "fields.other.validation: validation must be an object",
            ]
        );
    }

    #[test]
    fn regex_accepts_lookaround_and_backreferences() {
        let errs = errors_of(module(json!({
            "pw": {"type": "string", "validation": {"regex": "^(?=.*\\d)(?=.*[a-z]).{8,}$"}},
            "slug": {"type": "string", "validation": {"regex": "^(?!-)[a-z0-9-]+(?<!-)$"}},
            "pair": {"type": "string", "validation": {"regex": "^(\\w)\\1$"}}
        })));
        assert!(errs.is_empty(), "{errs:?}");
    }

    #[test]
    fn ui_hints_must_be_primitive() {
        let errs = errors_of(module(json!({
            "a": {"type": "string", "ui": {"component": {"not": "primitive"}, "order": 2, "list": [1]}},
            "b": {"type": "string", "ui": "inline"}
        })));
        assert_eq!(
            errs,
            vec![
                "fields.a.ui.component: UI hint values must be primitive (string, number, boolean, or null)",
                "fields.a.ui.list: UI hint values must be primitive (string, number, boolean, or null)",
                "fields.b.ui: ui must be an object of UI hint key-value pairs",
            ]
        );
    }

    #[test]
    fn nested_object_fields_recurse() {
        let errs = errors_of(module(json!({
            "server": {
                "type": "object",
                "fields": {
                    "port": {"type": "number", "default": "80"},
                    "tls": {"type": "object", "fields": {"cert": {"type": "blob"}}}
                }
            },
            "legacy": {"type": "object", "properties": {"x": {"type": "string", "default": false}}}
        })));
        assert_eq!(
            errs,
            vec![
                "fields.server.fields.port.default: default value must be a number",
                "fields.server.fields.tls.fields.cert: unknown field type \"blob\"",
                "fields.legacy.properties.x.default: default value must be a string",
            ]
        );
    }

    #[test]
    fn fields_key_preferred_over_properties() {
        let errs = errors_of(module(json!({
            "o": {
                "type": "object",
                "fields": {"ok": {"type": "string"}},
                "properties": {"ignored": 5}
            }
        })));
        assert!(errs.is_empty(), "{errs:?}");
    }

    #[test]
    fn nested_field_map_wrong_shape() {
        let errs = errors_of(module(json!({"o": {"type": "object", "fields": ["x"]}})));
        assert_eq!(
            errs,
            vec!["fields.o.fields: fields must be an object mapping field IDs to field definitions"]
        );
    }

    #[test]
    fn array_fields_require_items() {
        let errs = errors_of(module(json!({
            "list": {"type": "array"},
            "typed": {"type": "array", "items": {"type": "enum", "options": []}}
        })));
        assert_eq!(
            errs,
            vec![
                "fields.list: array field must define \"items\" schema",
                "fields.typed.items: enum \"options\" array must not be empty",
            ]
        );
    }

    #[test]
    fn all_violations_collected_in_one_pass() {
        let errs = errors_of(json!({
            "id": 123,
            "fields": {
                "noTypeField": {"description": 42},
                "badField": {
                    "type": "potato",
                    "default": 10,
                    "validation": {"regex": "[unclosed", "min": "low", "max": 5, "required": "yes"},
                    "ui": {"component": {"not": "primitive"}}
                },
                "brokenEnum": {"type": "enum", "options": [], "default": "missing"},
                "listWithoutItems": {"type": "array", "default": "not-an-array"},
                "nestedObject": {"type": "object", "fields": {"inner": {"type": "string", "default": 999}}}
            }
        }));
        assert_eq!(errs.len(), 14, "{errs:#?}");
        assert_eq!(errs[0], "id: id must be a string");
        assert_eq!(errs[1], "version: missing required key \"version\"");
        assert_eq!(errs[13], "fields.nestedObject.fields.inner.default: default value must be a string");
    }

    #[test]
    fn deep_nesting_is_an_error() {
        let mut field = json!({"type": "string"});
        for _ in 0..(MAX_DEPTH + 1) {
            field = json!({"type": "array", "items": field});
        }
        let err = validate_domain(&module(json!({"deep": field}))).unwrap_err();
        assert!(matches!(err, SchemaError::DepthExceeded { .. }));
    }

    #[test]
    fn idempotent() {
        let doc = json!({"id": 1, "fields": {"a": {"type": "x"}}});
        assert_eq!(validate_domain(&doc).unwrap(), validate_domain(&doc).unwrap());
    }

    fn arb_field() -> impl Strategy<Value = Value> {
        let kinds = prop::sample::select(vec![
            "string", "number", "boolean", "enum", "object", "array", "color",
        ]);
        let defaults = prop::option::of(prop::sample::select(vec![
            json!("text"),
            json!(7),
            json!(true),
            json!(null),
            json!([1]),
            json!({"k": 1}),
        ]));
        (kinds, defaults, prop::collection::vec(0u8..4, 0..3)).prop_map(|(kind, default, options)| {
            let mut field = json!({"type": kind});
            if let Some(d) = default {
                field["default"] = d;
            }
            match kind {
                "enum" => field["options"] = json!(options),
                "array" if !options.is_empty() => field["items"] = json!({"type": "number"}),
                _ => {}
            }
            field
        })
    }

    fn arb_field_map() -> impl Strategy<Value = Value> {
        prop::collection::btree_map("[a-z]{1,6}", arb_field(), 0..6)
            .prop_map(|fields| Value::Object(fields.into_iter().collect()))
    }

    proptest! {
        #[test]
        fn prop_domain_validation_is_deterministic(fields in arb_field_map()) {
            let doc = module(fields);
            prop_assert_eq!(validate_domain(&doc).unwrap(), validate_domain(&doc).unwrap());
        }

        #[test]
        fn prop_errors_are_reported_under_fields(fields in arb_field_map()) {
            for err in validate_domain(&module(fields)).unwrap() {
                prop_assert!(err.path.render().starts_with("fields."), "{}", err);
            }
        }

        #[test]
        fn prop_matching_scalar_defaults_are_clean(
            text in ".{0,12}",
            number in any::<i32>(),
            flag in any::<bool>(),
        ) {
            let doc = module(json!({
                "s": {"type": "string", "default": text},
                "n": {"type": "number", "default": number},
                "b": {"type": "boolean", "default": flag}
            }));
            prop_assert!(validate_domain(&doc).unwrap().is_empty());
        }
    }
}
