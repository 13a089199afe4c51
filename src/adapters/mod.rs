// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing environment source implementations.
//!
//! Each adapter implements the [`EnvSource`](crate::ports::EnvSource) port for
//! a specific kind of storage.

pub mod map_env;
pub mod process_env;

pub use map_env::MapEnvAdapter;
pub use process_env::ProcessEnvAdapter;
