// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sample environment file generation.
//!
//! Each field becomes one block:
//!
//! ```text
//! # <key name> (<type>) [required|optional]
//! # <description, one comment line per line, omitted if none>
//! <RESOLVED_KEY>=<default or empty>
//! ```
//!
//! Blocks are separated by a blank line. The output is meant for people to read
//! and copy into a real environment file; it is not parsed back.

use crate::domain::TypedValue;
use crate::service::{EnvField, EnvProxy};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Options for [`EnvConfig::export_env`](crate::service::EnvConfig::export_env)
/// and friends.
///
/// # Examples
///
/// ```rust
/// use envproxy::service::ExportOptions;
///
/// let options = ExportOptions::new().include_defaults(false).sort_by_name(true);
/// assert!(!options.includes_defaults());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportOptions {
    include_defaults: bool,
    sort_by_name: bool,
}

impl ExportOptions {
    /// Defaults included, declaration order.
    pub fn new() -> Self {
        Self {
            include_defaults: true,
            sort_by_name: false,
        }
    }

    /// Sets whether default values are written after the `=`.
    pub fn include_defaults(mut self, enabled: bool) -> Self {
        self.include_defaults = enabled;
        self
    }

    /// Sets whether blocks are sorted by key name instead of declaration order.
    pub fn sort_by_name(mut self, enabled: bool) -> Self {
        self.sort_by_name = enabled;
        self
    }

    /// Returns whether default values are written.
    pub fn includes_defaults(&self) -> bool {
        self.include_defaults
    }

    /// Returns whether blocks are sorted by key name.
    pub fn sorts_by_name(&self) -> bool {
        self.sort_by_name
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders the sample environment file for `fields` as seen through `proxy`.
pub(crate) fn render(fields: &[EnvField], proxy: &EnvProxy, options: &ExportOptions) -> String {
    let mut ordered: Vec<&EnvField> = fields.iter().collect();
    if options.sort_by_name {
        ordered.sort_by(|a, b| a.key_name().cmp(b.key_name()));
    }

    ordered
        .into_iter()
        .map(|field| render_block(field, proxy, options))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_block(field: &EnvField, proxy: &EnvProxy, options: &ExportOptions) -> String {
    let mut block = String::new();
    let required = if field.is_required() {
        "required"
    } else {
        "optional"
    };
    let type_name = field
        .declared_type()
        .map(|hint| hint.as_str())
        .unwrap_or("unknown type");
    let _ = writeln!(block, "# {} ({}) [{}]", field.key_name(), type_name, required);

    if let Some(description) = field.description() {
        for line in description.lines() {
            let _ = writeln!(block, "# {line}");
        }
    }

    let default = if options.include_defaults {
        field
            .default()
            .as_value()
            .map(|value| render_default(field, value))
            .unwrap_or_default()
    } else {
        String::new()
    };
    let env_key = field.proxy(proxy).resolve_key(field.key_name());
    let _ = writeln!(block, "{env_key}={default}");
    block
}

fn render_default(field: &EnvField, value: &TypedValue) -> String {
    match value {
        TypedValue::Bool(true) => "True".to_string(),
        TypedValue::Bool(false) => "False".to_string(),
        TypedValue::Json(serde_json::Value::String(s)) => s.clone(),
        TypedValue::List(items) => {
            let format = field.list_format();
            if items.iter().any(|item| item.contains(format.get_separator())) {
                tracing::warn!(
                    "Default of field {:?} has items containing the separator {:?}; \
                     the exported value will not split back the same way",
                    field.name(),
                    format.get_separator()
                );
            }
            format.join(items)
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MapEnvAdapter;
    use crate::domain::{ListFormat, TypeHint};
    use crate::service::FieldSpec;
    use serde_json::json;

    fn proxy() -> EnvProxy {
        EnvProxy::builder()
            .prefix("MYAPP")
            .source(MapEnvAdapter::new())
            .build()
    }

    fn field(spec: FieldSpec) -> EnvField {
        spec.into_field(true, false).unwrap()
    }

    #[test]
    fn test_required_block() {
        let fields = vec![field(FieldSpec::new("database_url").type_hint(TypeHint::Str))];
        assert_eq!(
            render(&fields, &proxy(), &ExportOptions::new()),
            "# database_url (str) [required]\nMYAPP_DATABASE_URL=\n"
        );
    }

    #[test]
    fn test_bool_default_block() {
        let fields = vec![field(FieldSpec::new("debug").default(false).description("Debug mode."))];
        assert_eq!(
            render(&fields, &proxy(), &ExportOptions::new()),
            "# debug (bool) [optional]\n# Debug mode.\nMYAPP_DEBUG=False\n"
        );
    }

    #[test]
    fn test_defaults_excluded() {
        let fields = vec![field(FieldSpec::new("debug").default(true))];
        let options = ExportOptions::new().include_defaults(false);
        assert_eq!(
            render(&fields, &proxy(), &options),
            "# debug (bool) [optional]\nMYAPP_DEBUG=\n"
        );
    }

    #[test]
    fn test_multiline_description() {
        let fields = vec![field(
            FieldSpec::new("has_prefix")
                .type_hint(TypeHint::Str)
                .description("This field has a prefix and\na multiline description.\n"),
        )];
        assert_eq!(
            render(&fields, &proxy(), &ExportOptions::new()),
            "# has_prefix (str) [required]\n# This field has a prefix and\n\
             # a multiline description.\nMYAPP_HAS_PREFIX=\n"
        );
    }

    #[test]
    fn test_default_rendering() {
        let fields = vec![
            field(FieldSpec::new("timeout").type_hint(TypeHint::Float).default(100)),
            field(FieldSpec::new("services").default(vec!["rabbitmq", "redis"])),
            field(FieldSpec::new("extra").default(json!({"something": "value"}))),
            field(
                FieldSpec::new("paths")
                    .default(vec!["/a", "/b"])
                    .list_format(ListFormat::new().separator(":")),
            ),
            field(FieldSpec::new("nothing").type_hint(TypeHint::Int).optional()),
        ];
        let out = render(&fields, &proxy(), &ExportOptions::new());
        assert!(out.contains("MYAPP_TIMEOUT=100\n"));
        assert!(out.contains("MYAPP_SERVICES=rabbitmq,redis\n"));
        assert!(out.contains(r#"MYAPP_EXTRA={"something":"value"}"#));
        assert!(out.contains("MYAPP_PATHS=/a:/b\n"));
        assert!(out.contains("# nothing (int) [optional]\nMYAPP_NOTHING=\n"));
    }

    #[test]
    fn test_json_string_default_unquoted() {
        let fields = vec![
            field(FieldSpec::new("x").type_hint(TypeHint::Json).default("abc")),
            field(FieldSpec::new("y").type_hint(TypeHint::Json).default(json!(["abc"]))),
        ];
        assert_eq!(
            render(&fields, &proxy(), &ExportOptions::new()),
            "# x (json) [optional]\nMYAPP_X=abc\n\n# y (json) [optional]\nMYAPP_Y=[\"abc\"]\n"
        );
    }

    #[test]
    fn test_unknown_type_label() {
        let fields = vec![field(FieldSpec::new("unknown").strict(false))];
        assert_eq!(
            render(&fields, &proxy(), &ExportOptions::new()),
            "# unknown (unknown type) [required]\nMYAPP_UNKNOWN=\n"
        );
    }

    #[test]
    fn test_alias_and_prefix_override() {
        let fields = vec![field(
            FieldSpec::new("has_prefix_and_alias")
                .alias("field")
                .env_prefix("DIFFERENT_PREFIX")
                .type_hint(TypeHint::Str),
        )];
        assert_eq!(
            render(&fields, &proxy(), &ExportOptions::new()),
            "# field (str) [required]\nDIFFERENT_PREFIX_FIELD=\n"
        );
    }

    #[test]
    fn test_order_and_sorting() {
        let fields = vec![
            field(FieldSpec::new("b").default(1)),
            field(FieldSpec::new("a").default(2)),
        ];
        let unsorted = render(&fields, &proxy(), &ExportOptions::new());
        assert_eq!(
            unsorted,
            "# b (int) [optional]\nMYAPP_B=1\n\n# a (int) [optional]\nMYAPP_A=2\n"
        );

        let sorted = render(&fields, &proxy(), &ExportOptions::new().sort_by_name(true));
        assert_eq!(
            sorted,
            "# a (int) [optional]\nMYAPP_A=2\n\n# b (int) [optional]\nMYAPP_B=1\n"
        );
    }

    #[test]
    fn test_empty_schema() {
        assert_eq!(render(&[], &proxy(), &ExportOptions::new()), "");
    }

    #[test]
    fn test_export_options_accessors() {
        let options = ExportOptions::default();
        assert!(options.includes_defaults());
        assert!(!options.sorts_by_name());
    }
}
