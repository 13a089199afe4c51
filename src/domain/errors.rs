// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the envproxy crate.
//!
//! This module defines the errors that can occur while resolving, converting,
//! declaring or exporting environment-backed configuration. All errors use
//! `thiserror` for proper error handling and conversion.

use crate::domain::typed_value::TypeHint;
use thiserror::Error;

/// The main error type for envproxy operations.
///
/// Every error surfaces to the immediate caller. Nothing is retried and nothing
/// is silently recovered: a caller who wants optional semantics supplies an
/// explicit default instead.
///
/// # Examples
///
/// ```
/// use envproxy::domain::errors::EnvError;
///
/// let error = EnvError::missing_key("MYAPP_DATABASE_URL");
/// assert_eq!(
///     error.to_string(),
///     "No value found for key 'MYAPP_DATABASE_URL' in the environment"
/// );
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EnvError {
    /// A required lookup found nothing and no default was supplied.
    #[error("No value found for key '{key}' in the environment")]
    MissingKey {
        /// The resolved environment variable name that was looked up
        key: String,
    },

    /// A value was found but could not be converted to the requested type.
    #[error("Value '{value}' cannot be converted to {target_type}{}", detail(.source))]
    Conversion {
        /// The raw value as read from the environment
        value: String,
        /// The type the value was converted to
        target_type: TypeHint,
        /// The underlying parser error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A schema field is defined in a way that cannot be resolved.
    #[error("Invalid definition of field '{field}': {message}")]
    Definition {
        /// The field name (or the offending input when no field is involved)
        field: String,
        /// What is wrong with the definition
        message: String,
    },

    /// The schema does not declare a field with this name.
    #[error("Field '{field}' is not declared in this configuration")]
    UnknownField {
        /// The requested field name
        field: String,
    },

    /// A write was attempted on a field that does not allow it.
    #[error("Field '{field}' is read-only")]
    ReadOnly {
        /// The field name
        field: String,
    },

    /// The environment cannot hold a variable with this name.
    #[error("Invalid environment variable name '{key}': {reason}")]
    InvalidKey {
        /// The resolved name
        key: String,
        /// Why the name is rejected
        reason: &'static str,
    },

    /// The variable exists but its value is not valid UTF-8.
    #[error("Value of key '{key}' is not valid unicode")]
    NotUnicode {
        /// The resolved name
        key: String,
    },

    /// Resolved values could not be deserialized into the requested type.
    #[error("Failed to materialize configuration: {0}")]
    Materialize(#[source] serde_json::Error),

    /// An I/O error occurred while exporting a sample environment file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn detail(source: &Option<Box<dyn std::error::Error + Send + Sync>>) -> String {
    match source {
        Some(err) => format!(": {err}"),
        None => String::new(),
    }
}

impl EnvError {
    /// Creates a `MissingKey` error for the resolved key.
    pub fn missing_key(key: impl Into<String>) -> Self {
        EnvError::MissingKey { key: key.into() }
    }

    /// Creates a `Conversion` error without an underlying cause.
    pub fn conversion(value: impl Into<String>, target_type: TypeHint) -> Self {
        EnvError::Conversion {
            value: value.into(),
            target_type,
            source: None,
        }
    }

    /// Creates a `Conversion` error wrapping the parser's error.
    pub fn conversion_from<E>(value: impl Into<String>, target_type: TypeHint, err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        EnvError::Conversion {
            value: value.into(),
            target_type,
            source: Some(Box::new(err)),
        }
    }

    /// Creates a `Definition` error for the given field.
    pub fn definition(field: impl Into<String>, message: impl Into<String>) -> Self {
        EnvError::Definition {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns `true` if this is a `MissingKey` error.
    pub fn is_missing_key(&self) -> bool {
        matches!(self, EnvError::MissingKey { .. })
    }
}

/// A specialized Result type for envproxy operations.
pub type Result<T> = std::result::Result<T, EnvError>;
