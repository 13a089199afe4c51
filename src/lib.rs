// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed, declarative access to environment variables.
//!
//! This crate reads configuration from environment variables and converts it
//! to typed values. Keys are resolved through naming rules (prefix, case,
//! hyphens), so `database-url` under the `myapp` prefix reads
//! `MYAPP_DATABASE_URL`.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: Core types and conversions (`EnvKey`, `NamingOptions`,
//!   `TypedValue`, `TypeConverter`, errors)
//! - **Ports**: The `EnvSource` trait an environment backend implements
//! - **Adapters**: The process environment and an in-memory map
//! - **Service**: `EnvProxy` for imperative access and `EnvConfig` for
//!   declarative schemas
//!
//! # Features
//!
//! - **Type Safety**: bool, int, float, str, list and JSON conversions with
//!   errors that name the value and the target type
//! - **Three accessor shapes**: required, with a default, or optional
//! - **Schemas**: declare fields once with defaults, aliases and descriptions,
//!   then read them one by one or deserialize them into your own struct
//! - **Self-documenting**: export a commented sample environment file
//! - **Testable**: swap the process environment for an in-memory source
//!
//! # Quick Start
//!
//! ```rust
//! use envproxy::prelude::*;
//!
//! # fn main() -> envproxy::domain::Result<()> {
//! let proxy = EnvProxy::builder()
//!     .prefix("myapp")
//!     .source(MapEnvAdapter::new().with_var("MYAPP_SERVICES", "rabbitmq, redis"))
//!     .build();
//!
//! let config = EnvConfig::builder()
//!     .proxy(proxy)
//!     .field(FieldSpec::new("database_url").type_hint(TypeHint::Str).description("Database URL."))
//!     .field(FieldSpec::new("debug").default(false))
//!     .field(FieldSpec::new("services").default(vec!["rabbitmq"]))
//!     .build()?;
//!
//! assert_eq!(config.get("debug")?, Some(TypedValue::Bool(false)));
//! assert_eq!(config.get("services")?, Some(TypedValue::from(vec!["rabbitmq", "redis"])));
//!
//! let sample = config.render_env(&ExportOptions::new());
//! assert!(sample.contains("MYAPP_DEBUG=False"));
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::adapters::{MapEnvAdapter, ProcessEnvAdapter};
    pub use crate::domain::{
        EnvError, EnvKey, FieldDefault, ListFormat, NamingOptions, Result, TypeConverter,
        TypeHint, TypedValue,
    };
    pub use crate::ports::EnvSource;
    pub use crate::service::{
        EnvConfig, EnvConfigBuilder, EnvField, EnvProxy, EnvProxyBuilder, EnvValues,
        ExportOptions, FieldSpec,
    };
}
