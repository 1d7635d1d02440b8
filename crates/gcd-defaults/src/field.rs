//! Borrowed, typed view over one field definition.

use serde_json::{Map, Value};

use gcd_core::FieldKind;

/// A field definition object inside a validated schema.
#[derive(Debug, Clone, Copy)]
pub struct SchemaField<'a> {
    def: &'a Map<String, Value>,
}

impl<'a> SchemaField<'a> {
    /// View `value` as a field definition; `None` unless it is an object.
    pub fn from_value(value: &'a Value) -> Option<Self> {
        value.as_object().map(|def| Self { def })
    }

    /// The underlying definition object.
    pub fn raw(&self) -> &'a Map<String, Value> {
        self.def
    }

    /// `id`, else `key`; blank strings do not count.
    pub fn identifier(&self) -> Option<&'a str> {
        ["id", "key"]
            .into_iter()
            .filter_map(|name| self.def.get(name).and_then(Value::as_str))
            .find(|s| !s.trim().is_empty())
    }

    /// Explicit `default`, including an explicit `null`.
    pub fn explicit_default(&self) -> Option<&'a Value> {
        self.def.get("default")
    }

    pub fn type_name(&self) -> Option<&'a str> {
        self.def.get("type").and_then(Value::as_str)
    }

    pub fn options(&self) -> Option<&'a Vec<Value>> {
        self.def.get("options").and_then(Value::as_array)
    }

    /// Raw `fields` metadata, whatever its shape.
    pub fn children(&self) -> Option<&'a Value> {
        self.def.get("fields")
    }

    pub fn items(&self) -> Option<&'a Value> {
        self.def.get("items").filter(|items| !items.is_null())
    }

    /// Resolve the kind used for generation.
    ///
    /// A recognized `type` (any case) wins. Otherwise the structure decides:
    /// a `fields` list means object, `items` means array, an `options` list
    /// means enum. With no structural hint the field is a string, whatever
    /// its declared `type`.
    pub fn resolved_kind(&self) -> FieldKind {
        let declared = self.type_name().map(FieldKind::from_type_name_lenient);
        if let Some(kind) = declared.as_ref().filter(|k| k.is_recognized()) {
            return kind.clone();
        }

        if self.children().is_some_and(Value::is_array) {
            FieldKind::Object
        } else if self.items().is_some() {
            FieldKind::Array
        } else if self.options().is_some() {
            FieldKind::Enum
        } else {
            FieldKind::String
        }
    }
}

/// Identifier for the field at `index`: its `id`, else `key`, else
/// `_field_<index>`.
pub fn field_id(field: &Value, index: usize) -> String {
    SchemaField::from_value(field)
        .and_then(|f| f.identifier())
        .map_or_else(|| format!("_field_{index}"), str::to_string)
}
