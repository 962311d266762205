// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Feedcodec CLI
//!
//! Command-line tool for decoding protobuf transit feeds.
//!
//! ## Usage
//!
//! ```sh
//! # Decode a GTFS-realtime feed with the built-in schema
//! feedcodec decode vehicle_positions.pb --pretty
//!
//! # Decode a hex dump from stdin against a custom schema
//! echo "0a 03 61 62 63" | feedcodec decode --hex --schema feed.toml
//!
//! # Print the built-in schema as TOML
//! feedcodec schema show
//! ```
//!
//! Diagnostics go to stderr; set `RUST_LOG` (e.g. `RUST_LOG=feedcodec=debug`)
//! to see more than warnings.

mod cmd;
mod common;

use std::process;

use clap::{Parser, Subcommand};
use cmd::{DecodeCmd, SchemaCmd};
use common::Result;

/// Feedcodec - schema-driven protobuf feed decoder
///
/// Decodes GTFS-realtime and other protobuf feeds into JSON without
/// generated code. Field names come from a schema file or the built-in
/// GTFS-realtime schema.
#[derive(Parser, Clone)]
#[command(name = "feedcodec")]
#[command(about = "Schema-driven decoder for protobuf transit feeds", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Clone)]
enum Commands {
    /// Decode a feed buffer to JSON
    Decode(DecodeCmd),

    /// Schema operations (show)
    #[command(subcommand)]
    Schema(SchemaCmd),
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Decode(cmd) => cmd.run(),
        Commands::Schema(cmd) => cmd.run(),
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
