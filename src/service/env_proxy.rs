// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed access to environment variables.
//!
//! [`EnvProxy`] ties together the naming rules, an environment source and the
//! type converter. Every supported type gets three accessors:
//!
//! - `get_<type>(key)`: the variable must be set, a miss is
//!   [`EnvError::MissingKey`] naming the resolved key
//! - `get_<type>_or(key, default)`: a miss yields `default`
//! - `get_<type>_opt(key)`: a miss yields `None`
//!
//! A value that is set but malformed is always an error, whichever accessor
//! is used.

use crate::adapters::ProcessEnvAdapter;
use crate::domain::{
    EnvError, EnvKey, FieldDefault, ListFormat, NamingOptions, Result, TypeConverter, TypeHint,
    TypedValue,
};
use crate::ports::EnvSource;
use std::fmt;
use std::sync::Arc;

/// A proxy to environment variables with key naming rules and type conversion.
///
/// Cloning is cheap; clones share the same source.
///
/// # Examples
///
/// ```rust
/// use envproxy::adapters::MapEnvAdapter;
/// use envproxy::service::EnvProxy;
///
/// # fn main() -> envproxy::domain::Result<()> {
/// let proxy = EnvProxy::builder()
///     .prefix("myapp")
///     .source(MapEnvAdapter::new().with_var("MYAPP_PORT", "8080"))
///     .build();
///
/// assert_eq!(proxy.get_int("port")?, 8080);
/// assert_eq!(proxy.get_bool_or("debug", false)?, false);
///
/// let err = proxy.get_int("missing").unwrap_err();
/// assert!(err.to_string().contains("MYAPP_MISSING"));
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct EnvProxy {
    naming: NamingOptions,
    source: Arc<dyn EnvSource>,
}

impl EnvProxy {
    /// Creates a proxy with the baseline naming rules over the process environment.
    ///
    /// The baseline has no prefix, upper-cases keys and replaces hyphens with
    /// underscores.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Creates a proxy over the process environment with the given prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self::builder().prefix(prefix).build()
    }

    /// Creates a new proxy builder.
    pub fn builder() -> EnvProxyBuilder {
        EnvProxyBuilder::new()
    }

    /// Returns the naming rules.
    pub fn naming(&self) -> &NamingOptions {
        &self.naming
    }

    /// Returns the environment source.
    pub fn source(&self) -> &Arc<dyn EnvSource> {
        &self.source
    }

    /// Returns a proxy over the same source with different naming rules.
    pub fn with_naming(&self, naming: NamingOptions) -> Self {
        Self {
            naming,
            source: Arc::clone(&self.source),
        }
    }

    /// Resolves a logical key into the environment variable name.
    pub fn resolve_key(&self, key: &str) -> EnvKey {
        self.naming.resolve(key)
    }

    /// Reads the raw value for a logical key.
    pub fn get_raw(&self, key: &str) -> Result<Option<String>> {
        self.read(&self.resolve_key(key))
    }

    /// Reads a value of any type with explicit default semantics.
    ///
    /// Returns `Ok(None)` only when the variable is unset and the default is
    /// `FieldDefault::Optional(None)`.
    pub fn get(
        &self,
        key: &str,
        hint: TypeHint,
        list: &ListFormat,
        default: &FieldDefault,
    ) -> Result<Option<TypedValue>> {
        let env_key = self.resolve_key(key);
        if let Some(value) = self.fetch(&env_key, |raw| TypeConverter::convert(raw, hint, list))? {
            return Ok(Some(value));
        }
        match default {
            FieldDefault::Required => Err(EnvError::missing_key(env_key.into_string())),
            FieldDefault::Optional(value) => {
                tracing::debug!("Using default value for key {:?}", env_key.as_str());
                Ok(value.clone())
            }
        }
    }

    /// Writes `value` to the variable resolved from `key`.
    ///
    /// This is the only write in the crate; getters never call it. Returns the
    /// resolved key that was written.
    pub fn set(&self, key: &str, value: impl fmt::Display) -> Result<EnvKey> {
        let env_key = self.resolve_key(key);
        tracing::debug!(
            "Setting {:?} in the {} environment",
            env_key.as_str(),
            self.source.name()
        );
        self.source.set(&env_key, &value.to_string())?;
        Ok(env_key)
    }

    /// Gets a value as the raw string.
    pub fn get_any(&self, key: &str) -> Result<String> {
        self.required(key, |raw| Ok(raw.to_string()))
    }

    /// Gets a value as the raw string, or `default` if unset.
    pub fn get_any_or(&self, key: &str, default: impl Into<String>) -> Result<String> {
        Ok(self.optional(key, |raw| Ok(raw.to_string()))?.unwrap_or_else(|| default.into()))
    }

    /// Gets a value as the raw string, or `None` if unset.
    pub fn get_any_opt(&self, key: &str) -> Result<Option<String>> {
        self.optional(key, |raw| Ok(raw.to_string()))
    }

    /// Gets a string value.
    pub fn get_str(&self, key: &str) -> Result<String> {
        self.get_any(key)
    }

    /// Gets a string value, or `default` if unset.
    pub fn get_str_or(&self, key: &str, default: impl Into<String>) -> Result<String> {
        self.get_any_or(key, default)
    }

    /// Gets a string value, or `None` if unset.
    pub fn get_str_opt(&self, key: &str) -> Result<Option<String>> {
        self.get_any_opt(key)
    }

    /// Gets a boolean value.
    ///
    /// Truthy values: yes, true, 1, on, enable, enabled, allow.
    /// Falsy values: no, false, 0, off, disable, disabled, disallow, deny.
    /// Matching is case-insensitive; anything else is a conversion error.
    pub fn get_bool(&self, key: &str) -> Result<bool> {
        self.required(key, TypeConverter::to_bool)
    }

    /// Gets a boolean value, or `default` if unset.
    pub fn get_bool_or(&self, key: &str, default: bool) -> Result<bool> {
        Ok(self.optional(key, TypeConverter::to_bool)?.unwrap_or(default))
    }

    /// Gets a boolean value, or `None` if unset.
    pub fn get_bool_opt(&self, key: &str) -> Result<Option<bool>> {
        self.optional(key, TypeConverter::to_bool)
    }

    /// Gets an integer value.
    pub fn get_int(&self, key: &str) -> Result<i64> {
        self.required(key, TypeConverter::to_int)
    }

    /// Gets an integer value, or `default` if unset.
    pub fn get_int_or(&self, key: &str, default: i64) -> Result<i64> {
        Ok(self.optional(key, TypeConverter::to_int)?.unwrap_or(default))
    }

    /// Gets an integer value, or `None` if unset.
    pub fn get_int_opt(&self, key: &str) -> Result<Option<i64>> {
        self.optional(key, TypeConverter::to_int)
    }

    /// Gets a float value.
    pub fn get_float(&self, key: &str) -> Result<f64> {
        self.required(key, TypeConverter::to_float)
    }

    /// Gets a float value, or `default` if unset.
    pub fn get_float_or(&self, key: &str, default: f64) -> Result<f64> {
        Ok(self.optional(key, TypeConverter::to_float)?.unwrap_or(default))
    }

    /// Gets a float value, or `None` if unset.
    pub fn get_float_opt(&self, key: &str) -> Result<Option<f64>> {
        self.optional(key, TypeConverter::to_float)
    }

    /// Gets a comma separated list, items stripped of surrounding whitespace.
    pub fn get_list(&self, key: &str) -> Result<Vec<String>> {
        self.get_list_with(key, &ListFormat::default())
    }

    /// Gets a comma separated list, or `default` if unset.
    pub fn get_list_or(&self, key: &str, default: Vec<String>) -> Result<Vec<String>> {
        Ok(self.get_list_with_opt(key, &ListFormat::default())?.unwrap_or(default))
    }

    /// Gets a comma separated list, or `None` if unset.
    pub fn get_list_opt(&self, key: &str) -> Result<Option<Vec<String>>> {
        self.get_list_with_opt(key, &ListFormat::default())
    }

    /// Gets a list split according to `format`.
    pub fn get_list_with(&self, key: &str, format: &ListFormat) -> Result<Vec<String>> {
        self.required(key, |raw| Ok(format.split(raw)))
    }

    /// Gets a list split according to `format`, or `None` if unset.
    pub fn get_list_with_opt(&self, key: &str, format: &ListFormat) -> Result<Option<Vec<String>>> {
        self.optional(key, |raw| Ok(format.split(raw)))
    }

    /// Gets a parsed JSON document.
    pub fn get_json(&self, key: &str) -> Result<serde_json::Value> {
        self.required(key, TypeConverter::to_json)
    }

    /// Gets a parsed JSON document, or `default` if unset.
    pub fn get_json_or(&self, key: &str, default: serde_json::Value) -> Result<serde_json::Value> {
        Ok(self.optional(key, TypeConverter::to_json)?.unwrap_or(default))
    }

    /// Gets a parsed JSON document, or `None` if unset.
    pub fn get_json_opt(&self, key: &str) -> Result<Option<serde_json::Value>> {
        self.optional(key, TypeConverter::to_json)
    }

    fn read(&self, key: &EnvKey) -> Result<Option<String>> {
        tracing::debug!(
            "Attempting to read {:?} from the {} environment",
            key.as_str(),
            self.source.name()
        );
        let value = self.source.get(key)?;
        if value.is_none() {
            tracing::debug!("No value for key {:?} in the environment", key.as_str());
        }
        Ok(value)
    }

    fn fetch<T>(&self, key: &EnvKey, convert: impl FnOnce(&str) -> Result<T>) -> Result<Option<T>> {
        match self.read(key)? {
            Some(raw) => convert(&raw).map(Some).map_err(|e| {
                tracing::debug!("Conversion of key {:?} failed: {}", key.as_str(), e);
                e
            }),
            None => Ok(None),
        }
    }

    fn optional<T>(&self, key: &str, convert: impl FnOnce(&str) -> Result<T>) -> Result<Option<T>> {
        self.fetch(&self.resolve_key(key), convert)
    }

    fn required<T>(&self, key: &str, convert: impl FnOnce(&str) -> Result<T>) -> Result<T> {
        let env_key = self.resolve_key(key);
        self.fetch(&env_key, convert)?
            .ok_or_else(|| EnvError::missing_key(env_key.into_string()))
    }
}

impl Default for EnvProxy {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EnvProxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvProxy")
            .field("naming", &self.naming)
            .field("source", &self.source.name())
            .finish()
    }
}

/// Builder for constructing an [`EnvProxy`].
///
/// Unless told otherwise, the builder produces the baseline proxy: no prefix,
/// uppercase, underscored, reading the process environment.
///
/// # Examples
///
/// ```rust
/// use envproxy::service::EnvProxy;
///
/// let proxy = EnvProxy::builder()
///     .prefix("app")
///     .uppercase(false)
///     .build();
/// assert_eq!(proxy.resolve_key("my-key").as_str(), "app_my_key");
/// ```
pub struct EnvProxyBuilder {
    naming: NamingOptions,
    source: Option<Arc<dyn EnvSource>>,
}

impl EnvProxyBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            naming: NamingOptions::new(),
            source: None,
        }
    }

    /// Sets the prefix.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.naming = self.naming.prefix(prefix);
        self
    }

    /// Sets whether keys are upper-cased.
    pub fn uppercase(mut self, enabled: bool) -> Self {
        self.naming = self.naming.uppercase(enabled);
        self
    }

    /// Sets whether hyphens are replaced with underscores.
    pub fn underscored(mut self, enabled: bool) -> Self {
        self.naming = self.naming.underscored(enabled);
        self
    }

    /// Replaces all naming rules at once.
    pub fn naming(mut self, naming: NamingOptions) -> Self {
        self.naming = naming;
        self
    }

    /// Sets the environment source.
    pub fn source(self, source: impl EnvSource + 'static) -> Self {
        self.shared_source(Arc::new(source))
    }

    /// Sets an environment source that is shared with other proxies.
    pub fn shared_source(mut self, source: Arc<dyn EnvSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Builds the proxy.
    pub fn build(self) -> EnvProxy {
        EnvProxy {
            naming: self.naming,
            source: self
                .source
                .unwrap_or_else(|| Arc::new(ProcessEnvAdapter::new())),
        }
    }
}

impl Default for EnvProxyBuilder {
    fn default() -> Self {
        Self::new()
    }
}
