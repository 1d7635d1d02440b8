//! # JSON Semantics
//!
//! Type inference and deep equality over `serde_json::Value`, shared by
//! the structural validator (`type`, `enum`) and the domain validator
//! (enum defaults, primitive checks).
//!
//! Whole numbers report the `integer` pseudo-type; this includes floats
//! with no fractional part (`5.0`), matching JSON Schema semantics.

use std::fmt;

use serde_json::Value;

/// JSON Schema style type name of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonType {
    Null,
    Boolean,
    Integer,
    Number,
    String,
    Array,
    Object,
}

impl JsonType {
    /// Schema keyword for this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }

    /// Whether a value of this type satisfies a schema `type` keyword.
    ///
    /// `integer` values also satisfy `number`; the reverse does not hold.
    pub fn satisfies(&self, keyword: &str) -> bool {
        match (self, keyword) {
            (Self::Integer, "number") => true,
            _ => self.as_str() == keyword,
        }
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Infer the [`JsonType`] of a value.
pub fn json_type_of(value: &Value) -> JsonType {
    match value {
        Value::Null => JsonType::Null,
        Value::Bool(_) => JsonType::Boolean,
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                JsonType::Integer
            } else {
                match n.as_f64() {
                    Some(f) if f.is_finite() && f.fract() == 0.0 => JsonType::Integer,
                    _ => JsonType::Number,
                }
            }
        }
        Value::String(_) => JsonType::String,
        Value::Array(_) => JsonType::Array,
        Value::Object(_) => JsonType::Object,
    }
}

/// True for string, number, boolean, and null.
pub fn is_primitive(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

/// True for a JSON object (never for arrays or null).
pub fn is_object(value: &Value) -> bool {
    matches!(value, Value::Object(_))
}

/// Structural equality of two JSON values.
///
/// Arrays compare element-wise and are order and length sensitive; objects
/// compare by key set and recursively by value, ignoring key order.
/// Numbers compare numerically, so `1` equals `1.0`. Two integers compare
/// exactly; the `f64` comparison applies only when either side is a float.
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => {
            if x == y {
                return true;
            }
            if !x.is_f64() && !y.is_f64() {
                return false;
            }
            match (x.as_f64(), y.as_f64()) {
                (Some(fx), Some(fy)) => fx == fy,
                _ => false,
            }
        }
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| deep_equal(x, y))
        }
        (Value::Object(xm), Value::Object(ym)) => {
            xm.len() == ym.len()
                && xm
                    .iter()
                    .all(|(k, xv)| ym.get(k).is_some_and(|yv| deep_equal(xv, yv)))
        }
        _ => false,
    }
}
