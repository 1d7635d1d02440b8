//! # Meta-Schema
//!
//! Typed representation of the JSON-Schema subset understood by the
//! structural validator. Unknown keywords (`$schema`, `title`,
//! `description`, `default`, ...) are ignored so the schema-format file can
//! grow without breaking the loader.
//!
//! `properties` keeps the declaration order of the source file; the
//! structural validator reports property errors in that order.

use std::fmt;
use std::path::Path;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use serde_json::Value;

use crate::error::SchemaError;

/// The schema-format meta-schema shipped with the workspace.
pub const BUNDLED_META_SCHEMA: &str = include_str!("../../../schemas/schema-format.json");

/// A node of the meta-schema.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaSchema {
    /// Allowed JSON type(s).
    #[serde(rename = "type")]
    pub type_spec: Option<TypeSpec>,
    /// Allowed values, compared by deep equality.
    #[serde(rename = "enum")]
    pub enum_values: Option<Vec<Value>>,
    /// Declared object properties.
    pub properties: Option<Properties>,
    /// Keys that must be present on an object.
    pub required: Option<Vec<String>>,
    /// Policy for keys not listed in `properties`.
    pub additional_properties: Option<AdditionalProperties>,
    /// Schema applied to every array element.
    pub items: Option<Box<MetaSchema>>,
    pub min_items: Option<u64>,
    pub max_items: Option<u64>,
    /// Regular expression a string must match (unanchored search).
    pub pattern: Option<String>,
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub exclusive_minimum: Option<f64>,
    pub exclusive_maximum: Option<f64>,
}

impl MetaSchema {
    /// Parse the bundled `schemas/schema-format.json`.
    pub fn bundled() -> Result<Self, SchemaError> {
        Self::from_json_str(BUNDLED_META_SCHEMA, "bundled")
    }

    /// Parse a meta-schema from JSON text. `source_name` is used in errors.
    pub fn from_json_str(text: &str, source_name: &str) -> Result<Self, SchemaError> {
        serde_json::from_str(text).map_err(|e| SchemaError::MetaSchemaParse {
            source_name: source_name.to_string(),
            reason: e.to_string(),
        })
    }

    /// Read and parse a meta-schema file.
    pub fn from_path(path: &Path) -> Result<Self, SchemaError> {
        let text = std::fs::read_to_string(path).map_err(|e| SchemaError::MetaSchemaLoad {
            source_name: path.display().to_string(),
            reason: format!("cannot read file: {e}"),
        })?;
        Self::from_json_str(&text, &path.display().to_string())
    }

    /// Build from an already-parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self, SchemaError> {
        serde_json::from_value(value).map_err(|e| SchemaError::MetaSchemaParse {
            source_name: "inline".to_string(),
            reason: e.to_string(),
        })
    }
}

/// `type` keyword: a single name or a list of names.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TypeSpec {
    Single(String),
    Many(Vec<String>),
}

impl TypeSpec {
    /// The allowed type names, in declaration order.
    pub fn names(&self) -> Vec<&str> {
        match self {
            Self::Single(name) => vec![name.as_str()],
            Self::Many(names) => names.iter().map(String::as_str).collect(),
        }
    }
}

/// `additionalProperties` keyword.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    /// `true` allows any extra key, `false` rejects every extra key.
    Allowed(bool),
    /// Every extra key must validate against this schema.
    Schema(Box<MetaSchema>),
}

/// Ordered `properties` map.
#[derive(Debug, Clone, Default)]
pub struct Properties(Vec<(String, MetaSchema)>);

impl Properties {
    /// Iterate `(name, schema)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetaSchema)> {
        self.0.iter().map(|(name, schema)| (name.as_str(), schema))
    }

    /// True if `name` is declared.
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|(declared, _)| declared == name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for Properties {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PropertiesVisitor;

        impl<'de> Visitor<'de> for PropertiesVisitor {
            type Value = Properties;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of property names to schemas")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Properties, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, schema)) = map.next_entry::<String, MetaSchema>()? {
                    entries.push((name, schema));
                }
                Ok(Properties(entries))
            }
        }

        deserializer.deserialize_map(PropertiesVisitor)
    }
}
