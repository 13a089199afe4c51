// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer containing the environment proxy and configuration schemas.
//!
//! [`EnvProxy`] is the imperative interface: ask for a key and a type. An
//! [`EnvConfig`] is the declarative one: describe the fields once, then read,
//! write, materialize or export them.

pub mod env_config;
pub mod env_proxy;
pub mod export;
pub mod field;

pub use env_config::{EnvConfig, EnvConfigBuilder, EnvValues};
pub use env_proxy::{EnvProxy, EnvProxyBuilder};
pub use export::ExportOptions;
pub use field::{EnvField, FieldSpec};
