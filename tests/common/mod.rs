// SPDX-License-Identifier: MIT OR Apache-2.0

//! Helper utilities shared by the integration tests.

use envproxy::adapters::MapEnvAdapter;
use envproxy::service::EnvProxy;
use std::env;

/// Removes the process environment variables it set or tracked when dropped.
///
/// Tests using it must be `#[serial]`: the process environment is global.
#[allow(dead_code)]
pub struct EnvGuard {
    keys: Vec<String>,
}

#[allow(dead_code)]
impl EnvGuard {
    /// Creates a guard tracking nothing.
    pub fn new() -> Self {
        Self { keys: Vec::new() }
    }

    /// Sets a variable and removes it on drop.
    pub fn set(&mut self, key: &str, value: &str) {
        env::set_var(key, value);
        self.keys.push(key.to_string());
    }

    /// Removes a variable now and again on drop.
    pub fn unset(&mut self, key: &str) {
        env::remove_var(key);
        self.keys.push(key.to_string());
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for key in &self.keys {
            env::remove_var(key);
        }
    }
}

/// Creates a proxy with `prefix` over an in-memory environment holding `vars`.
#[allow(dead_code)]
pub fn map_proxy(prefix: &str, vars: &[(&str, &str)]) -> EnvProxy {
    let source = vars
        .iter()
        .fold(MapEnvAdapter::new(), |source, (k, v)| source.with_var(*k, *v));
    EnvProxy::builder().prefix(prefix).source(source).build()
}

/// Installs a test subscriber so `tracing` output shows up with `--nocapture`.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}
