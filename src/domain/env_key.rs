// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment variable names and the rules that produce them.
//!
//! A caller asks for a short *logical* key such as `"debug"`. [`NamingOptions`]
//! turns it into the *resolved* key (for example `"MYAPP_DEBUG"`), which is
//! wrapped in the [`EnvKey`] newtype so resolved names never get confused with
//! logical ones.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A resolved environment variable name.
///
/// # Examples
///
/// ```
/// use envproxy::domain::env_key::{EnvKey, NamingOptions};
///
/// let key = NamingOptions::new().prefix("app").resolve("my-var");
/// assert_eq!(key.as_str(), "APP_MY_VAR");
/// assert_eq!(key, EnvKey::from("APP_MY_VAR"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnvKey(String);

impl EnvKey {
    /// Creates a new `EnvKey` from an already resolved name.
    pub fn new(key: String) -> Self {
        EnvKey(key)
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts the `EnvKey` into its inner `String`.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Checks that the process environment can hold a variable with this name.
    ///
    /// Returns the reason the name is rejected, if any.
    pub fn validate(&self) -> Option<&'static str> {
        if self.0.is_empty() {
            Some("name is empty")
        } else if self.0.contains('=') {
            Some("name contains '='")
        } else if self.0.contains('\0') {
            Some("name contains a NUL character")
        } else {
            None
        }
    }
}

impl From<String> for EnvKey {
    fn from(s: String) -> Self {
        EnvKey(s)
    }
}

impl From<&str> for EnvKey {
    fn from(s: &str) -> Self {
        EnvKey(s.to_string())
    }
}

impl From<EnvKey> for String {
    fn from(key: EnvKey) -> Self {
        key.0
    }
}

impl AsRef<str> for EnvKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EnvKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Rules for turning a logical key into an environment variable name.
///
/// The baseline (see [`NamingOptions::new`]) has no prefix, upper-cases keys
/// and replaces hyphens with underscores, so `"my-var"` resolves to `"MY_VAR"`.
///
/// # Examples
///
/// ```
/// use envproxy::domain::env_key::NamingOptions;
///
/// let naming = NamingOptions::new().uppercase(false).underscored(false);
/// assert_eq!(naming.resolve("my-variable").as_str(), "my-variable");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingOptions {
    prefix: Option<String>,
    uppercase: bool,
    underscored: bool,
}

impl NamingOptions {
    /// Creates the baseline naming rules: no prefix, uppercase, underscored.
    pub fn new() -> Self {
        Self {
            prefix: None,
            uppercase: true,
            underscored: true,
        }
    }

    /// Sets the prefix. An empty prefix is the same as no prefix.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        self.prefix = if prefix.is_empty() { None } else { Some(prefix) };
        self
    }

    /// Removes the prefix.
    pub fn without_prefix(mut self) -> Self {
        self.prefix = None;
        self
    }

    /// Sets whether keys are upper-cased.
    pub fn uppercase(mut self, enabled: bool) -> Self {
        self.uppercase = enabled;
        self
    }

    /// Sets whether hyphens are replaced with underscores.
    pub fn underscored(mut self, enabled: bool) -> Self {
        self.underscored = enabled;
        self
    }

    /// Returns the configured prefix.
    pub fn get_prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Returns whether keys are upper-cased.
    pub fn is_uppercase(&self) -> bool {
        self.uppercase
    }

    /// Returns whether hyphens are replaced with underscores.
    pub fn is_underscored(&self) -> bool {
        self.underscored
    }

    /// Resolves a logical key into the environment variable name to look up.
    ///
    /// Hyphens become underscores (if `underscored`), the result is
    /// upper-cased (if `uppercase`) and the prefix is prepended with a `_`
    /// separator. The prefix goes through the same rules as the key.
    pub fn resolve(&self, logical_key: &str) -> EnvKey {
        let key = self.apply_rules(logical_key);
        match &self.prefix {
            Some(prefix) => EnvKey(format!("{}_{}", self.apply_rules(prefix), key)),
            None => EnvKey(key),
        }
    }

    fn apply_rules(&self, input: &str) -> String {
        let mut out = if self.underscored {
            input.replace('-', "_")
        } else {
            input.to_string()
        };
        if self.uppercase {
            out = out.to_uppercase();
        }
        out
    }
}

impl Default for NamingOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_resolve_full_rules() {
        let naming = NamingOptions::new().prefix("APP");
        assert_eq!(naming.resolve("my-var").as_str(), "APP_MY_VAR");
    }

    #[test]
    fn test_resolve_baseline() {
        let naming = NamingOptions::default();
        assert_eq!(naming.resolve("my-variable").as_str(), "MY_VARIABLE");
        assert_eq!(naming.resolve("debug").as_str(), "DEBUG");
    }

    #[test]
    fn test_resolve_prefix_follows_case_rule() {
        let naming = NamingOptions::new().prefix("superprefix");
        assert_eq!(naming.resolve("variable").as_str(), "SUPERPREFIX_VARIABLE");

        let naming = NamingOptions::new().prefix("my-app");
        assert_eq!(naming.resolve("x").as_str(), "MY_APP_X");
    }

    #[test]
    fn test_resolve_original_case() {
        let naming = NamingOptions::new().uppercase(false);
        assert_eq!(naming.resolve("my-variable").as_str(), "my_variable");

        let naming = NamingOptions::new().uppercase(false).prefix("Pre");
        assert_eq!(naming.resolve("var").as_str(), "Pre_var");
    }

    #[test]
    fn test_resolve_keep_dashes() {
        let naming = NamingOptions::new().uppercase(false).underscored(false);
        assert_eq!(naming.resolve("my-variable").as_str(), "my-variable");
    }

    #[test]
    fn test_resolve_empty_key() {
        assert_eq!(NamingOptions::new().resolve("").as_str(), "");
        assert_eq!(NamingOptions::new().prefix("app").resolve("").as_str(), "APP_");
    }

    #[test]
    fn test_empty_prefix_is_no_prefix() {
        let naming = NamingOptions::new().prefix("");
        assert_eq!(naming.get_prefix(), None);
        assert_eq!(naming.resolve("key").as_str(), "KEY");
    }

    #[test]
    fn test_without_prefix() {
        let naming = NamingOptions::new().prefix("APP").without_prefix();
        assert_eq!(naming.resolve("key").as_str(), "KEY");
    }

    #[test]
    fn test_accessors() {
        let naming = NamingOptions::new().prefix("X").uppercase(false);
        assert_eq!(naming.get_prefix(), Some("X"));
        assert!(!naming.is_uppercase());
        assert!(naming.is_underscored());
    }

    #[test]
    fn test_env_key_validate() {
        assert_eq!(EnvKey::from("OK_KEY").validate(), None);
        assert!(EnvKey::from("").validate().is_some());
        assert!(EnvKey::from("A=B").validate().is_some());
        assert!(EnvKey::from("A\0B").validate().is_some());
    }

    #[test]
    fn test_env_key_conversions() {
        let key = EnvKey::new("APP_KEY".to_string());
        assert_eq!(format!("{}", key), "APP_KEY");
        let s: &str = key.as_ref();
        assert_eq!(s, "APP_KEY");
        let owned: String = key.clone().into();
        assert_eq!(owned, "APP_KEY");
        assert_eq!(key.into_string(), "APP_KEY");
    }

    #[test]
    fn test_env_key_hash() {
        let mut map = HashMap::new();
        map.insert(EnvKey::from("A"), 1);
        assert_eq!(map.get(&EnvKey::from("A")), Some(&1));
        assert_eq!(map.get(&EnvKey::from("B")), None);
    }

    #[test]
    fn test_naming_options_serde() {
        let naming = NamingOptions::new().prefix("APP");
        let json = serde_json::to_string(&naming).unwrap();
        let back: NamingOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, naming);
    }
}
