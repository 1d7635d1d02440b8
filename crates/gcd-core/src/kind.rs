//! # Field Kinds
//!
//! The closed set of field types in the module-definition dialect, plus an
//! explicit catch-all that carries unrecognized type strings through
//! untouched.
//!
//! The domain validator rejects `Unknown` for real modules; the default
//! generator resolves it from the field's structure, else as a string.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

/// Field type of a field definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Free text; generated default `""`.
    String,
    /// Numeric value; generated default `0`.
    Number,
    /// Flag; generated default `false`.
    Boolean,
    /// One of a fixed list of `options`; generated default is the first option.
    Enum,
    /// Nested field group.
    Object,
    /// Homogeneous list described by `items`.
    Array,
    /// Any other type string, preserved verbatim.
    Unknown(String),
}

impl FieldKind {
    /// The six recognized kinds, in dialect order.
    pub const RECOGNIZED: [&'static str; 6] =
        ["string", "number", "boolean", "enum", "object", "array"];

    /// Parse a type name exactly as written. Anything outside the six
    /// recognized names becomes [`FieldKind::Unknown`].
    pub fn from_type_name(name: &str) -> Self {
        match name {
            "string" => Self::String,
            "number" => Self::Number,
            "boolean" => Self::Boolean,
            "enum" => Self::Enum,
            "object" => Self::Object,
            "array" => Self::Array,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Parse a type name ignoring ASCII case (`"String"` → `String`).
    pub fn from_type_name_lenient(name: &str) -> Self {
        match Self::from_type_name(&name.to_ascii_lowercase()) {
            Self::Unknown(_) => Self::Unknown(name.to_string()),
            known => known,
        }
    }

    /// True for every variant except `Unknown`.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }

    /// The dialect name of this kind.
    pub fn as_str(&self) -> &str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Enum => "enum",
            Self::Object => "object",
            Self::Array => "array",
            Self::Unknown(name) => name,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_type_name(s))
    }
}

impl Serialize for FieldKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
