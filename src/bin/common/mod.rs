// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for CLI commands.

use std::borrow::Cow;
use std::io::Write;
use std::path::Path;

use anyhow::Context;
use clap::ValueEnum;

use feedcodec::schema::{gtfs_realtime, SchemaNode};

pub use anyhow::Result as CliResult;
pub type Result<T = ()> = CliResult<T>;

/// Schema file format.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchemaFormat {
    Toml,
    Json,
}

/// Load a schema file, or the built-in GTFS-realtime schema when no path is given.
pub fn load_schema(path: Option<&Path>) -> Result<Cow<'static, SchemaNode>> {
    match path {
        Some(path) => {
            let schema = SchemaNode::load(path)
                .with_context(|| format!("failed to load schema {}", path.display()))?;
            Ok(Cow::Owned(schema))
        }
        None => Ok(Cow::Borrowed(gtfs_realtime::feed_message())),
    }
}

/// Write text plus a trailing newline to a file, or stdout when no path is given.
pub fn write_output(path: Option<&Path>, text: &str) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, format!("{text}\n"))
            .with_context(|| format!("failed to write {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{text}")?;
            stdout.flush()?;
            Ok(())
        }
    }
}
