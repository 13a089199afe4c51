// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! The single port is [`EnvSource`], the storage the proxy reads variables
//! from. Adapters in the adapters layer implement it.

pub mod source;

pub use source::EnvSource;
