// SPDX-License-Identifier: MIT OR Apache-2.0

//! Declarative field descriptors.
//!
//! A [`FieldSpec`] is what the user writes: a name plus optional alias,
//! description, default, type hint and overrides. When an
//! [`EnvConfig`](crate::service::EnvConfig) is built, each spec is validated
//! and frozen into an [`EnvField`], which is shared read-only by every
//! instance of that configuration.

use crate::domain::{
    EnvError, FieldDefault, ListFormat, NamingOptions, Result, TypeHint, TypedValue,
};
use crate::service::EnvProxy;

#[derive(Clone, Debug)]
enum DeclaredHint {
    Tag(TypeHint),
    Name(String),
}

/// Where a field gets its proxy from.
#[derive(Clone, Debug)]
pub(crate) enum ProxySource {
    /// The proxy of the configuration instance.
    Inherited,
    /// The instance proxy with its prefix replaced.
    Prefix(String),
    /// A proxy of the field's own.
    Own(EnvProxy),
}

/// The declaration of one configuration field.
///
/// # Examples
///
/// ```rust
/// use envproxy::domain::TypeHint;
/// use envproxy::service::FieldSpec;
///
/// let timeout = FieldSpec::new("timeout")
///     .description("Service timeout.")
///     .default(100.0);
///
/// let extra = FieldSpec::new("extra")
///     .type_hint(TypeHint::Json)
///     .optional();
/// ```
#[derive(Clone, Debug)]
pub struct FieldSpec {
    name: String,
    alias: Option<String>,
    description: Option<String>,
    default: FieldDefault,
    type_hint: Option<DeclaredHint>,
    env_prefix: Option<String>,
    env_proxy: Option<EnvProxy>,
    allow_set: Option<bool>,
    strict: Option<bool>,
    list_format: ListFormat,
}

impl FieldSpec {
    /// Declares a required field with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
            description: None,
            default: FieldDefault::Required,
            type_hint: None,
            env_prefix: None,
            env_proxy: None,
            allow_set: None,
            strict: None,
            list_format: ListFormat::default(),
        }
    }

    /// Looks the field up under `alias` instead of its name.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Sets the description used in the sample environment file.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Makes the field optional with the given default.
    ///
    /// Without a type hint, the field's type is inferred from the default.
    pub fn default(mut self, value: impl Into<TypedValue>) -> Self {
        self.default = FieldDefault::value(value);
        self
    }

    /// Makes the field optional with no default value.
    pub fn optional(mut self) -> Self {
        self.default = FieldDefault::none();
        self
    }

    /// Sets the default explicitly.
    pub fn default_value(mut self, default: FieldDefault) -> Self {
        self.default = default;
        self
    }

    /// Sets the type hint.
    pub fn type_hint(mut self, hint: TypeHint) -> Self {
        self.type_hint = Some(DeclaredHint::Tag(hint));
        self
    }

    /// Sets the type hint by name (`"int"`, `"json"`, ...).
    ///
    /// An unknown name is reported when the configuration is built.
    pub fn type_hint_name(mut self, name: impl Into<String>) -> Self {
        self.type_hint = Some(DeclaredHint::Name(name.into()));
        self
    }

    /// Uses `prefix` instead of the configuration's prefix for this field.
    pub fn env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// Uses a proxy of the field's own. Takes precedence over `env_prefix`.
    pub fn env_proxy(mut self, proxy: EnvProxy) -> Self {
        self.env_proxy = Some(proxy);
        self
    }

    /// Allows or forbids writing this field back to the environment,
    /// overriding the configuration-wide setting.
    pub fn allow_set(mut self, enabled: bool) -> Self {
        self.allow_set = Some(enabled);
        self
    }

    /// Overrides the configuration-wide strictness for this field.
    pub fn strict(mut self, enabled: bool) -> Self {
        self.strict = Some(enabled);
        self
    }

    /// Sets how list values are split.
    pub fn list_format(mut self, format: ListFormat) -> Self {
        self.list_format = format;
        self
    }

    /// Returns the declared name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Validates the declaration and freezes it into an [`EnvField`].
    ///
    /// `strict` and `allow_set` are the configuration-wide settings, used
    /// when the field does not override them.
    pub(crate) fn into_field(self, strict: bool, allow_set: bool) -> Result<EnvField> {
        if self.name.is_empty() || self.name.starts_with('_') {
            return Err(EnvError::definition(
                &self.name,
                format!("Field name '{}' is reserved for internal use", self.name),
            ));
        }

        let declared = match self.type_hint {
            Some(DeclaredHint::Tag(hint)) => Some(hint),
            Some(DeclaredHint::Name(name)) => Some(name.parse::<TypeHint>().map_err(|_| {
                EnvError::definition(&self.name, format!("Unsupported type hint '{name}'"))
            })?),
            None => None,
        };

        let inferred = || self.default.as_value().map(TypedValue::type_hint);
        let type_hint = match declared.or_else(inferred) {
            Some(hint) => Some(hint),
            None if self.strict.unwrap_or(strict) => {
                return Err(EnvError::definition(
                    &self.name,
                    "No type hint found and no default to infer the type from. \
                     Set strict(false) to fall back to 'any' instead",
                ));
            }
            None => {
                tracing::warn!(
                    "No type hint found for field {:?} and no default to infer it from, \
                     falling back to 'any'",
                    self.name
                );
                None
            }
        };

        let default = match self.default {
            FieldDefault::Optional(Some(value)) => {
                let hint = type_hint.unwrap_or(TypeHint::Any);
                let found = value.type_hint();
                let value = value.coerce_to(hint).ok_or_else(|| {
                    EnvError::definition(
                        &self.name,
                        format!("Default value of type {found} does not fit type {hint}"),
                    )
                })?;
                FieldDefault::Optional(Some(value))
            }
            other => other,
        };

        let proxy = match (self.env_proxy, self.env_prefix) {
            (Some(proxy), _) => ProxySource::Own(proxy),
            (None, Some(prefix)) => ProxySource::Prefix(prefix),
            (None, None) => ProxySource::Inherited,
        };

        Ok(EnvField {
            name: self.name,
            alias: self.alias,
            description: self.description,
            default,
            type_hint,
            proxy,
            allow_set: self.allow_set.unwrap_or(allow_set),
            list_format: self.list_format,
        })
    }
}

/// A validated, immutable configuration field.
///
/// Obtained from [`EnvConfig::fields`](crate::service::EnvConfig::fields) or
/// [`EnvConfig::field`](crate::service::EnvConfig::field).
#[derive(Clone, Debug)]
pub struct EnvField {
    name: String,
    alias: Option<String>,
    description: Option<String>,
    default: FieldDefault,
    type_hint: Option<TypeHint>,
    proxy: ProxySource,
    allow_set: bool,
    list_format: ListFormat,
}

impl EnvField {
    /// Returns the declared name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the alias, if any.
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Returns the logical key: the alias if set, else the name.
    pub fn key_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    /// Returns the description, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the default.
    pub fn default(&self) -> &FieldDefault {
        &self.default
    }

    /// Returns `true` if the field has no default.
    pub fn is_required(&self) -> bool {
        self.default.is_required()
    }

    /// Returns the type the field converts to.
    ///
    /// Lenient fields whose type could not be determined convert as `Any`.
    pub fn type_hint(&self) -> TypeHint {
        self.type_hint.unwrap_or(TypeHint::Any)
    }

    /// Returns the declared or inferred type, or `None` if it is unknown.
    pub fn declared_type(&self) -> Option<TypeHint> {
        self.type_hint
    }

    /// Returns whether the field may be written back to the environment.
    pub fn allow_set(&self) -> bool {
        self.allow_set
    }

    /// Returns how list values are split.
    pub fn list_format(&self) -> &ListFormat {
        &self.list_format
    }

    /// Returns the proxy this field resolves through, given the proxy of the
    /// configuration instance.
    pub fn proxy(&self, inherited: &EnvProxy) -> EnvProxy {
        match &self.proxy {
            ProxySource::Inherited => inherited.clone(),
            ProxySource::Prefix(prefix) => {
                let naming: NamingOptions = inherited.naming().clone().prefix(prefix.as_str());
                inherited.with_naming(naming)
            }
            ProxySource::Own(proxy) => proxy.clone(),
        }
    }

    /// Reads and converts the field's value through `proxy`.
    pub(crate) fn resolve(&self, proxy: &EnvProxy) -> Result<Option<TypedValue>> {
        proxy.get(self.key_name(), self.type_hint(), &self.list_format, &self.default)
    }
}
