// SPDX-License-Identifier: MIT OR Apache-2.0

//! Basic usage example for the envproxy crate.
//!
//! This example demonstrates:
//! - Reading typed values through an `EnvProxy`
//! - Required, defaulted and optional accessors
//! - Declaring a schema with `EnvConfig`
//! - Exporting a sample environment file
//!
//! To run this example:
//! ```bash
//! # Set some environment variables
//! export MYAPP_PORT="8080"
//! export MYAPP_DEBUG="yes"
//! export MYAPP_SERVICES="rabbitmq, redis"
//!
//! # Run the example
//! cargo run --example basic_usage
//! ```

use envproxy::prelude::*;

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    println!("=== envproxy: Basic Usage ===\n");

    // Every key is prefixed with MYAPP_, upper-cased and has hyphens replaced
    let proxy = EnvProxy::with_prefix("myapp");

    // Example 1: required, defaulted and optional values
    println!("--- Example 1: Proxy Getters ---");
    match proxy.get_int("port") {
        Ok(port) => println!("✓ {} = {}", proxy.resolve_key("port"), port),
        Err(e) => println!("✗ {e}"),
    }
    let debug = proxy.get_bool_or("debug", false)?;
    println!("  debug (default false): {debug}");
    let timeout = proxy.get_float_opt("timeout")?;
    println!("  timeout (optional): {timeout:?}");
    let services = proxy.get_list_or("services", vec!["rabbitmq".to_string()])?;
    println!("  services: {services:?}");

    // Example 2: a declarative schema over the same proxy
    println!("\n--- Example 2: Schema ---");
    let config = EnvConfig::builder()
        .proxy(proxy)
        .field(
            FieldSpec::new("port")
                .description("Port to listen on.")
                .default(8000),
        )
        .field(
            FieldSpec::new("debug")
                .description("Debug mode.")
                .default(false),
        )
        .field(
            FieldSpec::new("services")
                .description("List of services.")
                .default(vec!["rabbitmq", "redis"]),
        )
        .field(
            FieldSpec::new("database_url")
                .description("Database connection string.")
                .type_hint(TypeHint::Str)
                .optional(),
        )
        .build()?;

    for (name, value) in config.resolve_all()?.iter() {
        match value {
            Some(value) => println!("  {name} = {value}"),
            None => println!("  {name} is not set"),
        }
    }

    // Example 3: document the schema as a sample environment file
    println!("\n--- Example 3: Export ---");
    let dir = tempfile::tempdir()?;
    let path = dir.path().join(".env.sample");
    config.export_env(&path, &ExportOptions::new())?;
    println!("Wrote {}:\n", path.display());
    print!("{}", std::fs::read_to_string(&path)?);

    Ok(())
}
