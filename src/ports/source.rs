// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment storage trait definition.
//!
//! This module defines the `EnvSource` trait, the port through which the proxy
//! reads (and, when explicitly asked to, writes) environment variables. The
//! process environment is the default implementation; an in-memory map is
//! provided for tests and embedding.

use crate::domain::{EnvKey, Result};
use std::fmt;

/// A trait for environment variable storage.
///
/// Lookups are by *resolved* key; name transformation happens before a source
/// is consulted. An explicitly empty value is reported as `Some("")`, never
/// as absent.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so a proxy can be shared. `set`
/// offers no atomicity beyond that of the underlying storage: callers that
/// need several variables to change together must coordinate externally.
///
/// # Examples
///
/// ```rust
/// use envproxy::ports::EnvSource;
/// use envproxy::domain::{EnvKey, Result};
///
/// #[derive(Debug)]
/// struct Fixed;
///
/// impl EnvSource for Fixed {
///     fn name(&self) -> &str {
///         "fixed"
///     }
///
///     fn get(&self, key: &EnvKey) -> Result<Option<String>> {
///         Ok((key.as_str() == "HOME").then(|| "/root".to_string()))
///     }
///
///     fn set(&self, _key: &EnvKey, _value: &str) -> Result<()> {
///         Ok(())
///     }
/// }
///
/// let source = Fixed;
/// assert_eq!(source.get_str("HOME").unwrap().as_deref(), Some("/root"));
/// ```
pub trait EnvSource: Send + Sync + fmt::Debug {
    /// Returns a short name for logging, such as `"process"`.
    fn name(&self) -> &str;

    /// Looks up a variable.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(value))` - The variable is set (possibly to `""`)
    /// * `Ok(None)` - The variable is not set
    /// * `Err(EnvError)` - The variable exists but cannot be read as text
    fn get(&self, key: &EnvKey) -> Result<Option<String>>;

    /// Writes a variable.
    ///
    /// This is the only mutating operation in the crate and is never called
    /// implicitly by a getter.
    fn set(&self, key: &EnvKey, value: &str) -> Result<()>;

    /// Looks up a variable by name.
    ///
    /// Equivalent to `get(&EnvKey::from(key))`.
    fn get_str(&self, key: &str) -> Result<Option<String>> {
        self.get(&EnvKey::from(key))
    }
}
