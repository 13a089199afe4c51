// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory environment adapter.
//!
//! This module provides an adapter that keeps variables in a map instead of the
//! process environment. It is useful in tests, where the process environment
//! is shared between threads, and when a program wants to resolve a schema
//! against a captured or synthetic environment.

use crate::domain::{EnvError, EnvKey, Result};
use crate::ports::EnvSource;
use std::collections::HashMap;
use std::sync::RwLock;

/// Environment source backed by an in-memory map.
///
/// Keys are stored exactly as given; no name transformation happens here.
///
/// # Examples
///
/// ```rust
/// use envproxy::adapters::MapEnvAdapter;
/// use envproxy::ports::EnvSource;
///
/// let adapter = MapEnvAdapter::new().with_var("MYAPP_DEBUG", "yes");
/// assert_eq!(adapter.get_str("MYAPP_DEBUG").unwrap().as_deref(), Some("yes"));
/// assert_eq!(adapter.get_str("MYAPP_OTHER").unwrap(), None);
/// ```
#[derive(Debug, Default)]
pub struct MapEnvAdapter {
    vars: RwLock<HashMap<String, String>>,
}

impl MapEnvAdapter {
    /// Creates an empty adapter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an adapter pre-populated with `vars`.
    pub fn with_values(vars: HashMap<String, String>) -> Self {
        Self {
            vars: RwLock::new(vars),
        }
    }

    /// Creates an adapter holding a snapshot of the current process environment.
    ///
    /// Variables whose name or value is not valid unicode are skipped.
    pub fn from_process_env() -> Self {
        let vars: HashMap<String, String> = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        tracing::debug!("Captured {} variables from the process environment", vars.len());
        Self::with_values(vars)
    }

    /// Adds a variable.
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let Ok(vars) = self.vars.get_mut() {
            vars.insert(key.into(), value.into());
        }
        self
    }

    /// Removes a variable, returning its previous value.
    pub fn remove(&self, key: &str) -> Option<String> {
        self.vars.write().ok()?.remove(key)
    }

    /// Returns the number of variables held.
    pub fn len(&self) -> usize {
        self.vars.read().map(|vars| vars.len()).unwrap_or(0)
    }

    /// Returns `true` if no variables are held.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn poisoned(&self) -> EnvError {
        EnvError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            "in-memory environment lock poisoned",
        ))
    }
}

impl EnvSource for MapEnvAdapter {
    fn name(&self) -> &str {
        "map"
    }

    fn get(&self, key: &EnvKey) -> Result<Option<String>> {
        let vars = self.vars.read().map_err(|_| self.poisoned())?;
        Ok(vars.get(key.as_str()).cloned())
    }

    fn set(&self, key: &EnvKey, value: &str) -> Result<()> {
        if let Some(reason) = key.validate() {
            return Err(EnvError::InvalidKey {
                key: key.to_string(),
                reason,
            });
        }
        let mut vars = self.vars.write().map_err(|_| self.poisoned())?;
        vars.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
