// SPDX-License-Identifier: MIT OR Apache-2.0

//! Declarative, self-documenting configuration schemas.
//!
//! An [`EnvConfig`] is an ordered list of [`EnvField`]s plus the [`EnvProxy`]
//! they resolve through. Values are read on demand:
//!
//! - [`EnvConfig::get`] reads one field
//! - [`EnvConfig::resolve_all`] reads every field into an [`EnvValues`]
//! - [`EnvConfig::materialize`] deserializes every field into your own type
//!
//! Nothing is cached. Every read consults the environment again, so a value
//! changed with [`EnvConfig::set`] (or by anyone else) is visible on the next
//! read. Take a snapshot with `resolve_all` or `materialize` when values must
//! not change under you.

use crate::domain::{EnvError, EnvKey, Result, TypedValue};
use crate::service::export::{self, ExportOptions};
use crate::service::{EnvField, EnvProxy, FieldSpec};
use serde::de::DeserializeOwned;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug)]
struct Schema {
    fields: Vec<EnvField>,
    index: HashMap<String, usize>,
}

/// A configuration schema bound to an environment proxy.
///
/// Cloning is cheap. Clones, and instances made with
/// [`with_proxy`](EnvConfig::with_proxy), share the same immutable field list.
///
/// # Examples
///
/// ```rust
/// use envproxy::adapters::MapEnvAdapter;
/// use envproxy::domain::{TypeHint, TypedValue};
/// use envproxy::service::{EnvConfig, EnvProxy, FieldSpec};
///
/// # fn main() -> envproxy::domain::Result<()> {
/// let proxy = EnvProxy::builder()
///     .prefix("myapp")
///     .source(MapEnvAdapter::new().with_var("MYAPP_DATABASE_URL", "postgres://db"))
///     .build();
///
/// let config = EnvConfig::builder()
///     .proxy(proxy)
///     .field(FieldSpec::new("database_url").type_hint(TypeHint::Str))
///     .field(FieldSpec::new("debug").default(false))
///     .build()?;
///
/// assert_eq!(config.get("database_url")?, Some(TypedValue::from("postgres://db")));
/// assert_eq!(config.get("debug")?, Some(TypedValue::Bool(false)));
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct EnvConfig {
    schema: Arc<Schema>,
    proxy: EnvProxy,
}

impl EnvConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> EnvConfigBuilder {
        EnvConfigBuilder::new()
    }

    /// Returns the proxy of this instance.
    pub fn proxy(&self) -> &EnvProxy {
        &self.proxy
    }

    /// Returns a new instance sharing this schema but resolving through `proxy`.
    ///
    /// Fields with a proxy of their own keep it; fields with a prefix override
    /// apply it on top of `proxy`.
    pub fn with_proxy(&self, proxy: EnvProxy) -> Self {
        Self {
            schema: Arc::clone(&self.schema),
            proxy,
        }
    }

    /// Returns the fields in declaration order.
    pub fn fields(&self) -> &[EnvField] {
        &self.schema.fields
    }

    /// Returns the field with the given name.
    pub fn field(&self, name: &str) -> Option<&EnvField> {
        self.schema.index.get(name).map(|&i| &self.schema.fields[i])
    }

    /// Returns the environment variable name a field is read from.
    pub fn env_key(&self, name: &str) -> Result<EnvKey> {
        let field = self.require_field(name)?;
        Ok(field.proxy(&self.proxy).resolve_key(field.key_name()))
    }

    /// Reads one field.
    ///
    /// Returns `Ok(None)` only for an optional field without a default whose
    /// variable is unset.
    pub fn get(&self, name: &str) -> Result<Option<TypedValue>> {
        let field = self.require_field(name)?;
        field.resolve(&field.proxy(&self.proxy))
    }

    /// Writes `value` to the variable of a field that allows it.
    ///
    /// Returns the resolved key that was written. Fields are read-only unless
    /// `allow_set` was enabled for them or for the whole configuration.
    pub fn set(&self, name: &str, value: impl fmt::Display) -> Result<EnvKey> {
        let field = self.require_field(name)?;
        if !field.allow_set() {
            return Err(EnvError::ReadOnly {
                field: name.to_string(),
            });
        }
        field.proxy(&self.proxy).set(field.key_name(), value)
    }

    /// Reads every field, in declaration order.
    ///
    /// Stops at the first field that fails.
    pub fn resolve_all(&self) -> Result<EnvValues> {
        let mut values = Vec::with_capacity(self.schema.fields.len());
        for field in &self.schema.fields {
            let value = field.resolve(&field.proxy(&self.proxy))?;
            values.push((field.name().to_string(), value));
        }
        Ok(EnvValues { values })
    }

    /// Reads every field and deserializes the result into `T`.
    ///
    /// Field names are the keys; unset optional fields are `null`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use envproxy::adapters::MapEnvAdapter;
    /// use envproxy::service::{EnvConfig, EnvProxy, FieldSpec};
    /// use serde::Deserialize;
    ///
    /// #[derive(Deserialize)]
    /// struct Settings {
    ///     port: u16,
    ///     hosts: Vec<String>,
    /// }
    ///
    /// # fn main() -> envproxy::domain::Result<()> {
    /// let proxy = EnvProxy::builder()
    ///     .source(MapEnvAdapter::new().with_var("HOSTS", "a, b"))
    ///     .build();
    /// let config = EnvConfig::builder()
    ///     .proxy(proxy)
    ///     .field(FieldSpec::new("port").default(8080))
    ///     .field(FieldSpec::new("hosts").default(Vec::<String>::new()))
    ///     .build()?;
    ///
    /// let settings: Settings = config.materialize()?;
    /// assert_eq!(settings.port, 8080);
    /// assert_eq!(settings.hosts, vec!["a", "b"]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn materialize<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(self.resolve_all()?.into_json()).map_err(EnvError::Materialize)
    }

    /// Renders the sample environment file.
    pub fn render_env(&self, options: &ExportOptions) -> String {
        export::render(&self.schema.fields, &self.proxy, options)
    }

    /// Writes the sample environment file to `writer`.
    pub fn write_env<W: Write>(&self, writer: &mut W, options: &ExportOptions) -> Result<()> {
        writer.write_all(self.render_env(options).as_bytes())?;
        Ok(())
    }

    /// Writes the sample environment file to `path`, replacing it if it exists.
    ///
    /// Only the file is touched; the environment is not modified.
    pub fn export_env(&self, path: impl AsRef<Path>, options: &ExportOptions) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.render_env(options))?;
        tracing::debug!(
            "Exported {} fields to {}",
            self.schema.fields.len(),
            path.display()
        );
        Ok(())
    }

    fn require_field(&self, name: &str) -> Result<&EnvField> {
        self.field(name).ok_or_else(|| EnvError::UnknownField {
            field: name.to_string(),
        })
    }
}

impl fmt::Debug for EnvConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvConfig")
            .field("fields", &self.schema.fields.iter().map(EnvField::name).collect::<Vec<_>>())
            .field("proxy", &self.proxy)
            .finish()
    }
}

/// Builder for constructing an [`EnvConfig`].
///
/// All definition errors are reported by [`build`](EnvConfigBuilder::build).
pub struct EnvConfigBuilder {
    proxy: Option<EnvProxy>,
    prefix: Option<String>,
    strict: bool,
    allow_set: bool,
    fields: Vec<FieldSpec>,
}

impl EnvConfigBuilder {
    /// Creates a new builder: strict, read-only, no fields.
    pub fn new() -> Self {
        Self {
            proxy: None,
            prefix: None,
            strict: true,
            allow_set: false,
            fields: Vec::new(),
        }
    }

    /// Sets the proxy fields resolve through.
    ///
    /// Defaults to [`EnvProxy::new`]: the process environment with no prefix,
    /// uppercase, underscored.
    pub fn proxy(mut self, proxy: EnvProxy) -> Self {
        self.proxy = Some(proxy);
        self
    }

    /// Sets the prefix, keeping the other naming rules and the source of the
    /// proxy. Applies to the proxy given with [`proxy`](Self::proxy) in
    /// whichever order the two are called.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Sets whether fields with an undeterminable type are rejected (the
    /// default) or fall back to `any` with a warning.
    pub fn strict(mut self, enabled: bool) -> Self {
        self.strict = enabled;
        self
    }

    /// Sets whether fields may be written back to the environment.
    pub fn allow_set(mut self, enabled: bool) -> Self {
        self.allow_set = enabled;
        self
    }

    /// Adds a field. Fields keep the order they are added in.
    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    /// Adds several fields.
    pub fn fields(mut self, specs: impl IntoIterator<Item = FieldSpec>) -> Self {
        self.fields.extend(specs);
        self
    }

    /// Validates every field and builds the configuration.
    pub fn build(self) -> Result<EnvConfig> {
        let mut fields = Vec::with_capacity(self.fields.len());
        let mut index = HashMap::with_capacity(self.fields.len());

        for spec in self.fields {
            let field = spec.into_field(self.strict, self.allow_set)?;
            if index.contains_key(field.name()) {
                return Err(EnvError::definition(
                    field.name(),
                    format!("Field '{}' is declared more than once", field.name()),
                ));
            }
            index.insert(field.name().to_string(), fields.len());
            fields.push(field);
        }

        let mut proxy = self.proxy.unwrap_or_default();
        if let Some(prefix) = self.prefix {
            proxy = proxy.with_naming(proxy.naming().clone().prefix(prefix));
        }

        tracing::debug!("Built configuration with {} fields", fields.len());
        Ok(EnvConfig {
            schema: Arc::new(Schema { fields, index }),
            proxy,
        })
    }
}

impl Default for EnvConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A snapshot of every field's value, in declaration order.
///
/// Serializes as a map from field name to value, with `null` for unset
/// optional fields.
#[derive(Clone, Debug, PartialEq)]
pub struct EnvValues {
    values: Vec<(String, Option<TypedValue>)>,
}

impl EnvValues {
    /// Returns the value of a field, or `None` if it is unset or not declared.
    pub fn get(&self, name: &str) -> Option<&TypedValue> {
        self.values
            .iter()
            .find(|(field, _)| field == name)
            .and_then(|(_, value)| value.as_ref())
    }

    /// Iterates over `(name, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&TypedValue>)> {
        self.values
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_ref()))
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the schema has no fields.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Converts the snapshot into a JSON object.
    pub fn into_json(self) -> serde_json::Value {
        serde_json::Value::Object(
            self.values
                .into_iter()
                .map(|(name, value)| {
                    (name, value.map(TypedValue::into_json).unwrap_or(serde_json::Value::Null))
                })
                .collect(),
        )
    }
}

impl Serialize for EnvValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in &self.values {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MapEnvAdapter;
    use crate::domain::{NamingOptions, TypeHint};
    use serde::Deserialize;
    use serde_json::json;

    fn proxy_with(prefix: &str, vars: &[(&str, &str)]) -> EnvProxy {
        let source = vars
            .iter()
            .fold(MapEnvAdapter::new(), |source, (k, v)| source.with_var(*k, *v));
        EnvProxy::builder().prefix(prefix).source(source).build()
    }

    #[test]
    fn test_get_and_unknown_field() {
        let config = EnvConfig::builder()
            .proxy(proxy_with("APP", &[("APP_INTEGER", "4")]))
            .field(FieldSpec::new("integer").type_hint(TypeHint::Int))
            .build()
            .unwrap();
        assert_eq!(config.get("integer").unwrap(), Some(TypedValue::Int(4)));

        let err = config.get("nope").unwrap_err();
        assert!(matches!(err, EnvError::UnknownField { .. }));
    }

    #[test]
    fn test_required_missing_names_resolved_key() {
        let config = EnvConfig::builder()
            .proxy(proxy_with("MYAPP", &[]))
            .field(FieldSpec::new("no_default").type_hint(TypeHint::Int))
            .build()
            .unwrap();
        let err = config.get("no_default").unwrap_err();
        assert!(err.is_missing_key());
        assert!(err.to_string().contains("MYAPP_NO_DEFAULT"));
    }

    #[test]
    fn test_duplicate_field() {
        let err = EnvConfig::builder()
            .field(FieldSpec::new("a").default(1))
            .field(FieldSpec::new("a").default(2))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("declared more than once"));
    }

    #[test]
    fn test_strict_inherited_by_fields() {
        assert!(EnvConfig::builder()
            .field(FieldSpec::new("unknown"))
            .build()
            .is_err());

        let config = EnvConfig::builder()
            .strict(false)
            .proxy(proxy_with("", &[("UNKNOWN", "whatever")]))
            .field(FieldSpec::new("unknown"))
            .build()
            .unwrap();
        assert_eq!(config.get("unknown").unwrap(), Some(TypedValue::Any("whatever".into())));
    }

    #[test]
    fn test_set_respects_allow_set() {
        let config = EnvConfig::builder()
            .proxy(proxy_with("ENV_TEST", &[]))
            .field(FieldSpec::new("integer").type_hint(TypeHint::Int))
            .field(FieldSpec::new("supports_set").type_hint(TypeHint::Str).allow_set(true))
            .build()
            .unwrap();

        let err = config.set("integer", 3).unwrap_err();
        assert!(matches!(err, EnvError::ReadOnly { .. }));
        assert_eq!(err.to_string(), "Field 'integer' is read-only");

        assert!(config.get("supports_set").unwrap_err().is_missing_key());
        let key = config.set("supports_set", "now it exists").unwrap();
        assert_eq!(key.as_str(), "ENV_TEST_SUPPORTS_SET");
        assert_eq!(
            config.get("supports_set").unwrap(),
            Some(TypedValue::from("now it exists"))
        );
    }

    #[test]
    fn test_reads_are_not_cached() {
        let config = EnvConfig::builder()
            .proxy(proxy_with("", &[]))
            .allow_set(true)
            .field(FieldSpec::new("count").default(1))
            .build()
            .unwrap();
        assert_eq!(config.get("count").unwrap(), Some(TypedValue::Int(1)));
        config.set("count", 420).unwrap();
        assert_eq!(config.get("count").unwrap(), Some(TypedValue::Int(420)));
    }

    #[test]
    fn test_with_proxy_shares_schema() {
        let config = EnvConfig::builder()
            .proxy(proxy_with("ONE", &[("ONE_PORT", "1")]))
            .field(FieldSpec::new("port").type_hint(TypeHint::Int))
            .build()
            .unwrap();
        let other = config.with_proxy(proxy_with("TWO", &[("TWO_PORT", "2")]));

        assert_eq!(config.get("port").unwrap(), Some(TypedValue::Int(1)));
        assert_eq!(other.get("port").unwrap(), Some(TypedValue::Int(2)));
        assert!(std::ptr::eq(config.fields(), other.fields()));
    }

    #[test]
    fn test_env_key() {
        let config = EnvConfig::builder()
            .proxy(proxy_with("MYAPP", &[]))
            .field(FieldSpec::new("float_field").alias("float").default(1.0))
            .field(FieldSpec::new("custom").env_prefix("other").default(1))
            .build()
            .unwrap();
        assert_eq!(config.env_key("float_field").unwrap().as_str(), "MYAPP_FLOAT");
        assert_eq!(config.env_key("custom").unwrap().as_str(), "OTHER_CUSTOM");
        assert!(config.env_key("missing").is_err());
    }

    #[test]
    fn test_prefix_keeps_configured_proxy() {
        let proxy = || {
            EnvProxy::builder()
                .uppercase(false)
                .source(MapEnvAdapter::new().with_var("app_port", "1"))
                .build()
        };

        let after = EnvConfig::builder()
            .proxy(proxy())
            .prefix("app")
            .field(FieldSpec::new("port").type_hint(TypeHint::Int))
            .build()
            .unwrap();
        let before = EnvConfig::builder()
            .prefix("app")
            .proxy(proxy())
            .field(FieldSpec::new("port").type_hint(TypeHint::Int))
            .build()
            .unwrap();

        for config in [after, before] {
            assert_eq!(config.proxy().source().name(), "map");
            assert_eq!(config.env_key("port").unwrap().as_str(), "app_port");
            assert_eq!(config.get("port").unwrap(), Some(TypedValue::Int(1)));
        }
    }

    #[test]
    fn test_prefix_without_proxy_uses_process_env() {
        let config = EnvConfig::builder()
            .prefix("myapp")
            .field(FieldSpec::new("port").default(1))
            .build()
            .unwrap();
        assert_eq!(config.proxy().source().name(), "process");
        assert_eq!(config.env_key("port").unwrap().as_str(), "MYAPP_PORT");
    }

    #[test]
    fn test_field_prefix_keeps_naming_rules() {
        let proxy = EnvProxy::builder()
            .naming(NamingOptions::new().uppercase(false))
            .source(MapEnvAdapter::new().with_var("pre_value", "x"))
            .build();
        let config = EnvConfig::builder()
            .proxy(proxy)
            .field(FieldSpec::new("value").env_prefix("pre").type_hint(TypeHint::Str))
            .build()
            .unwrap();
        assert_eq!(config.get("value").unwrap(), Some(TypedValue::from("x")));
    }

    #[test]
    fn test_resolve_all_and_values() {
        let config = EnvConfig::builder()
            .proxy(proxy_with("", &[("PORT", "8080")]))
            .field(FieldSpec::new("port").type_hint(TypeHint::Int))
            .field(FieldSpec::new("note").type_hint(TypeHint::Str).optional())
            .build()
            .unwrap();
        let values = config.resolve_all().unwrap();

        assert_eq!(values.len(), 2);
        assert!(!values.is_empty());
        assert_eq!(values.get("port"), Some(&TypedValue::Int(8080)));
        assert_eq!(values.get("note"), None);
        let names: Vec<&str> = values.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["port", "note"]);

        assert_eq!(
            serde_json::to_value(&values).unwrap(),
            json!({"port": 8080, "note": null})
        );
        assert_eq!(values.into_json(), json!({"port": 8080, "note": null}));
    }

    #[test]
    fn test_resolve_all_stops_at_error() {
        let config = EnvConfig::builder()
            .proxy(proxy_with("", &[]))
            .field(FieldSpec::new("required").type_hint(TypeHint::Str))
            .build()
            .unwrap();
        assert!(config.resolve_all().unwrap_err().is_missing_key());
    }

    #[test]
    fn test_materialize() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Settings {
            timeout: f64,
            services: Vec<String>,
            extra: serde_json::Value,
            debug: Option<bool>,
        }

        let config = EnvConfig::builder()
            .proxy(proxy_with("MYAPP", &[("MYAPP_SERVICES", "a, b")]))
            .field(FieldSpec::new("timeout").type_hint(TypeHint::Float).default(100))
            .field(FieldSpec::new("services").default(vec!["rabbitmq"]))
            .field(FieldSpec::new("extra").default(json!({"something": "value"})))
            .field(FieldSpec::new("debug").type_hint(TypeHint::Bool).optional())
            .build()
            .unwrap();

        let settings: Settings = config.materialize().unwrap();
        assert_eq!(
            settings,
            Settings {
                timeout: 100.0,
                services: vec!["a".into(), "b".into()],
                extra: json!({"something": "value"}),
                debug: None,
            }
        );
    }

    #[test]
    fn test_materialize_type_mismatch() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Settings {
            port: u8,
        }

        let config = EnvConfig::builder()
            .proxy(proxy_with("", &[("PORT", "4000")]))
            .field(FieldSpec::new("port").type_hint(TypeHint::Int))
            .build()
            .unwrap();
        let err = config.materialize::<Settings>().unwrap_err();
        assert!(matches!(err, EnvError::Materialize(_)));
    }

    #[test]
    fn test_write_env() {
        let config = EnvConfig::builder()
            .proxy(proxy_with("MYAPP", &[]))
            .field(FieldSpec::new("debug").default(false))
            .build()
            .unwrap();
        let mut out = Vec::new();
        config.write_env(&mut out, &ExportOptions::new()).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "# debug (bool) [optional]\nMYAPP_DEBUG=False\n"
        );
    }

    #[test]
    fn test_debug_lists_fields() {
        let config = EnvConfig::builder()
            .proxy(proxy_with("", &[]))
            .field(FieldSpec::new("port").default(1))
            .build()
            .unwrap();
        assert!(format!("{:?}", config).contains("port"));
    }
}
