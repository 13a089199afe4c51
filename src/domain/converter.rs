// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversion of raw environment strings into typed values.
//!
//! The converter is stateless; [`TypeConverter::convert`] is the single entry
//! point and dispatches on a [`TypeHint`]. Only lists take extra arguments,
//! carried by [`ListFormat`].

use crate::domain::errors::{EnvError, Result};
use crate::domain::typed_value::{TypeHint, TypedValue};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Words accepted as `true`, compared case-insensitively.
pub const TRUTHY: [&str; 7] = ["yes", "true", "1", "on", "enable", "enabled", "allow"];

/// Words accepted as `false`, compared case-insensitively.
pub const FALSY: [&str; 8] = [
    "no", "false", "0", "off", "disable", "disabled", "disallow", "deny",
];

static BOOL_WORDS: Lazy<HashMap<&'static str, bool>> = Lazy::new(|| {
    TRUTHY
        .iter()
        .map(|word| (*word, true))
        .chain(FALSY.iter().map(|word| (*word, false)))
        .collect()
});

/// How a list value is split.
///
/// # Examples
///
/// ```
/// use envproxy::domain::ListFormat;
///
/// let format = ListFormat::new().separator(";").strip(false);
/// assert_eq!(format.split("a;b ;c"), vec!["a", "b ", "c"]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListFormat {
    separator: String,
    strip: bool,
}

impl ListFormat {
    /// Comma separated, items stripped of surrounding whitespace.
    pub fn new() -> Self {
        Self {
            separator: ",".to_string(),
            strip: true,
        }
    }

    /// Sets the separator. An empty separator is ignored.
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        let separator = separator.into();
        if !separator.is_empty() {
            self.separator = separator;
        }
        self
    }

    /// Sets whether items are stripped of leading and trailing whitespace.
    pub fn strip(mut self, enabled: bool) -> Self {
        self.strip = enabled;
        self
    }

    /// Returns the separator.
    pub fn get_separator(&self) -> &str {
        &self.separator
    }

    /// Returns whether items are stripped.
    pub fn is_strip(&self) -> bool {
        self.strip
    }

    /// Splits `raw` into items. Empty input yields no items.
    pub fn split(&self, raw: &str) -> Vec<String> {
        if raw.is_empty() {
            return Vec::new();
        }
        raw.split(self.separator.as_str())
            .map(|item| if self.strip { item.trim() } else { item })
            .map(str::to_string)
            .collect()
    }

    /// Joins items back with the separator.
    pub fn join(&self, items: &[String]) -> String {
        items.join(&self.separator)
    }
}

impl Default for ListFormat {
    fn default() -> Self {
        Self::new()
    }
}

/// Converts raw strings into [`TypedValue`]s.
///
/// # Examples
///
/// ```
/// use envproxy::domain::{ListFormat, TypeConverter, TypeHint, TypedValue};
///
/// let value = TypeConverter::convert("Enabled", TypeHint::Bool, &ListFormat::default()).unwrap();
/// assert_eq!(value, TypedValue::Bool(true));
///
/// assert!(TypeConverter::convert("maybe", TypeHint::Bool, &ListFormat::default()).is_err());
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct TypeConverter;

impl TypeConverter {
    /// Converts `raw` according to `hint`.
    ///
    /// `list` only matters for [`TypeHint::List`].
    pub fn convert(raw: &str, hint: TypeHint, list: &ListFormat) -> Result<TypedValue> {
        match hint {
            TypeHint::Any => Ok(TypedValue::Any(raw.to_string())),
            TypeHint::Str => Ok(TypedValue::Str(raw.to_string())),
            TypeHint::Bool => Self::to_bool(raw).map(TypedValue::Bool),
            TypeHint::Int => Self::to_int(raw).map(TypedValue::Int),
            TypeHint::Float => Self::to_float(raw).map(TypedValue::Float),
            TypeHint::List => Ok(TypedValue::List(list.split(raw))),
            TypeHint::Json => Self::to_json(raw).map(TypedValue::Json),
        }
    }

    /// Matches `raw` against the truthy and falsy vocabularies.
    pub fn to_bool(raw: &str) -> Result<bool> {
        BOOL_WORDS
            .get(raw.to_lowercase().as_str())
            .copied()
            .ok_or_else(|| EnvError::conversion(raw, TypeHint::Bool))
    }

    /// Parses a base-10 integer, ignoring surrounding whitespace.
    pub fn to_int(raw: &str) -> Result<i64> {
        raw.trim()
            .parse::<i64>()
            .map_err(|e| EnvError::conversion_from(raw, TypeHint::Int, e))
    }

    /// Parses a decimal float, ignoring surrounding whitespace.
    pub fn to_float(raw: &str) -> Result<f64> {
        raw.trim()
            .parse::<f64>()
            .map_err(|e| EnvError::conversion_from(raw, TypeHint::Float, e))
    }

    /// Parses a JSON document.
    pub fn to_json(raw: &str) -> Result<serde_json::Value> {
        serde_json::from_str(raw).map_err(|e| EnvError::conversion_from(raw, TypeHint::Json, e))
    }
}
