// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process environment adapter.
//!
//! This module provides the adapter that reads variables from, and writes them
//! back to, the environment of the running process.

use crate::domain::{EnvError, EnvKey, Result};
use crate::ports::EnvSource;
use std::env;

/// Environment source backed by the process environment.
///
/// Nothing is cached: every `get` reads the live environment, so changes made
/// elsewhere in the process are visible immediately.
///
/// Names the environment cannot hold (empty, containing `=` or NUL) are
/// reported as unset on read and rejected on write.
///
/// # Examples
///
/// ```rust
/// use envproxy::adapters::ProcessEnvAdapter;
/// use envproxy::ports::EnvSource;
///
/// let adapter = ProcessEnvAdapter::new();
/// assert_eq!(adapter.name(), "process");
/// assert_eq!(adapter.get_str("").unwrap(), None);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvAdapter;

impl ProcessEnvAdapter {
    /// Creates a new process environment adapter.
    pub fn new() -> Self {
        ProcessEnvAdapter
    }
}

impl EnvSource for ProcessEnvAdapter {
    fn name(&self) -> &str {
        "process"
    }

    fn get(&self, key: &EnvKey) -> Result<Option<String>> {
        if let Some(reason) = key.validate() {
            tracing::debug!("Key {:?} cannot exist in the environment: {}", key.as_str(), reason);
            return Ok(None);
        }
        match env::var(key.as_str()) {
            Ok(value) => Ok(Some(value)),
            Err(env::VarError::NotPresent) => Ok(None),
            Err(env::VarError::NotUnicode(_)) => Err(EnvError::NotUnicode {
                key: key.to_string(),
            }),
        }
    }

    fn set(&self, key: &EnvKey, value: &str) -> Result<()> {
        if let Some(reason) = key.validate() {
            return Err(EnvError::InvalidKey {
                key: key.to_string(),
                reason,
            });
        }
        if value.contains('\0') {
            return Err(EnvError::InvalidKey {
                key: key.to_string(),
                reason: "value contains a NUL character",
            });
        }
        env::set_var(key.as_str(), value);
        Ok(())
    }
}
