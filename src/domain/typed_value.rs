// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed configuration values and the tags that select them.
//!
//! [`TypeHint`] names a conversion rule, [`TypedValue`] holds the result of a
//! conversion and [`FieldDefault`] records whether a field is required or
//! falls back to a default.

use crate::domain::errors::EnvError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Selects which conversion rule applies to a raw string value.
///
/// Type hints can be parsed from their lowercase names:
///
/// ```
/// use envproxy::domain::TypeHint;
///
/// let hint: TypeHint = "json".parse().unwrap();
/// assert_eq!(hint, TypeHint::Json);
/// assert!("wrong".parse::<TypeHint>().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeHint {
    /// The raw string, untouched.
    Any,
    /// A boolean from the truthy/falsy vocabulary.
    Bool,
    /// A 64-bit float.
    Float,
    /// A 64-bit signed integer.
    Int,
    /// The raw string, untouched.
    Str,
    /// A list of strings split on a separator.
    List,
    /// A parsed JSON document.
    Json,
}

impl TypeHint {
    /// All type hints, in the order they are documented.
    pub const ALL: [TypeHint; 7] = [
        TypeHint::Any,
        TypeHint::Bool,
        TypeHint::Float,
        TypeHint::Int,
        TypeHint::Str,
        TypeHint::List,
        TypeHint::Json,
    ];

    /// Returns the lowercase name of this hint.
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeHint::Any => "any",
            TypeHint::Bool => "bool",
            TypeHint::Float => "float",
            TypeHint::Int => "int",
            TypeHint::Str => "str",
            TypeHint::List => "list",
            TypeHint::Json => "json",
        }
    }
}

impl fmt::Display for TypeHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeHint {
    type Err = EnvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TypeHint::ALL
            .iter()
            .copied()
            .find(|hint| hint.as_str() == s)
            .ok_or_else(|| EnvError::definition(s, format!("Unsupported type hint '{s}'")))
    }
}

/// A value produced by converting a raw environment string.
///
/// Values serialize to their natural JSON shape, which is what
/// [`EnvConfig::materialize`](crate::service::EnvConfig::materialize) relies on.
///
/// # Examples
///
/// ```
/// use envproxy::domain::{TypeHint, TypedValue};
///
/// let value = TypedValue::from(42);
/// assert_eq!(value.type_hint(), TypeHint::Int);
/// assert_eq!(value.as_int(), Some(42));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TypedValue {
    /// An untyped string.
    Any(String),
    /// A boolean.
    Bool(bool),
    /// A string.
    Str(String),
    /// An integer.
    Int(i64),
    /// A float.
    Float(f64),
    /// A list of strings.
    List(Vec<String>),
    /// A JSON document.
    Json(serde_json::Value),
}

impl TypedValue {
    /// Returns the type hint this value was produced for.
    pub fn type_hint(&self) -> TypeHint {
        match self {
            TypedValue::Any(_) => TypeHint::Any,
            TypedValue::Bool(_) => TypeHint::Bool,
            TypedValue::Str(_) => TypeHint::Str,
            TypedValue::Int(_) => TypeHint::Int,
            TypedValue::Float(_) => TypeHint::Float,
            TypedValue::List(_) => TypeHint::List,
            TypedValue::Json(_) => TypeHint::Json,
        }
    }

    /// Returns the boolean, if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            TypedValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer, if this is an `Int`.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            TypedValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the float, if this is a `Float`.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            TypedValue::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the string, if this is `Str` or `Any`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TypedValue::Any(s) | TypedValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the items, if this is a `List`.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            TypedValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the document, if this is `Json`.
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            TypedValue::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Converts the value into its JSON representation.
    ///
    /// Non-finite floats become `null`.
    pub fn into_json(self) -> serde_json::Value {
        match self {
            TypedValue::Any(s) | TypedValue::Str(s) => serde_json::Value::String(s),
            TypedValue::Bool(b) => serde_json::Value::Bool(b),
            TypedValue::Int(n) => serde_json::Value::from(n),
            TypedValue::Float(n) => serde_json::Number::from_f64(n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            TypedValue::List(items) => {
                serde_json::Value::Array(items.into_iter().map(serde_json::Value::String).collect())
            }
            TypedValue::Json(value) => value,
        }
    }

    /// Adapts this value so it can stand as a default for a field of type `hint`.
    ///
    /// Returns `None` when the value makes no sense for that type. Integers
    /// widen to floats, anything becomes a JSON document, and strings are
    /// interchangeable between `Any` and `Str`.
    pub fn coerce_to(self, hint: TypeHint) -> Option<TypedValue> {
        match (hint, self) {
            (TypeHint::Any, value) => Some(value),
            (TypeHint::Json, TypedValue::Json(value)) => Some(TypedValue::Json(value)),
            (TypeHint::Json, value) => Some(TypedValue::Json(value.into_json())),
            (TypeHint::Float, TypedValue::Int(n)) => Some(TypedValue::Float(n as f64)),
            (TypeHint::Str, TypedValue::Any(s)) => Some(TypedValue::Str(s)),
            (hint, value) if value.type_hint() == hint => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypedValue::Any(s) | TypedValue::Str(s) => f.write_str(s),
            TypedValue::Bool(b) => write!(f, "{b}"),
            TypedValue::Int(n) => write!(f, "{n}"),
            TypedValue::Float(n) => write!(f, "{n}"),
            TypedValue::List(items) => f.write_str(&items.join(",")),
            TypedValue::Json(value) => write!(f, "{value}"),
        }
    }
}

impl From<bool> for TypedValue {
    fn from(b: bool) -> Self {
        TypedValue::Bool(b)
    }
}

impl From<i64> for TypedValue {
    fn from(n: i64) -> Self {
        TypedValue::Int(n)
    }
}

impl From<i32> for TypedValue {
    fn from(n: i32) -> Self {
        TypedValue::Int(n.into())
    }
}

impl From<u32> for TypedValue {
    fn from(n: u32) -> Self {
        TypedValue::Int(n.into())
    }
}

impl From<f64> for TypedValue {
    fn from(n: f64) -> Self {
        TypedValue::Float(n)
    }
}

impl From<&str> for TypedValue {
    fn from(s: &str) -> Self {
        TypedValue::Str(s.to_string())
    }
}

impl From<String> for TypedValue {
    fn from(s: String) -> Self {
        TypedValue::Str(s)
    }
}

impl From<Vec<String>> for TypedValue {
    fn from(items: Vec<String>) -> Self {
        TypedValue::List(items)
    }
}

impl From<Vec<&str>> for TypedValue {
    fn from(items: Vec<&str>) -> Self {
        TypedValue::List(items.into_iter().map(str::to_string).collect())
    }
}

impl From<serde_json::Value> for TypedValue {
    fn from(value: serde_json::Value) -> Self {
        TypedValue::Json(value)
    }
}

/// Whether a field must be present in the environment, and what to use if not.
///
/// `Optional(None)` is a valid, explicit default of "no value"; it is distinct
/// from `Required`.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum FieldDefault {
    /// The value must be present; a miss is an error.
    #[default]
    Required,
    /// A miss yields the contained default, which may itself be `None`.
    Optional(Option<TypedValue>),
}

impl FieldDefault {
    /// An optional default carrying a value.
    pub fn value(value: impl Into<TypedValue>) -> Self {
        FieldDefault::Optional(Some(value.into()))
    }

    /// An optional default of "no value".
    pub fn none() -> Self {
        FieldDefault::Optional(None)
    }

    /// Returns `true` for `Required`.
    pub fn is_required(&self) -> bool {
        matches!(self, FieldDefault::Required)
    }

    /// Returns the default value, if one was supplied.
    pub fn as_value(&self) -> Option<&TypedValue> {
        match self {
            FieldDefault::Optional(Some(value)) => Some(value),
            _ => None,
        }
    }
}
