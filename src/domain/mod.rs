// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing core logic and types.
//!
//! Key resolution, typed values and the type converter live here. None of it
//! touches the process environment; that is the job of the adapters.

pub mod converter;
pub mod env_key;
pub mod errors;
pub mod typed_value;

// Re-export commonly used types
pub use converter::{ListFormat, TypeConverter};
pub use env_key::{EnvKey, NamingOptions};
pub use errors::{EnvError, Result};
pub use typed_value::{FieldDefault, TypeHint, TypedValue};
