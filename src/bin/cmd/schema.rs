// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema command - inspect decode schemas.

use std::path::PathBuf;

use clap::Subcommand;

use crate::common::{load_schema, Result, SchemaFormat};

/// Schema operations.
#[derive(Subcommand, Clone, Debug)]
pub enum SchemaCmd {
    /// Print a schema in the file format
    Show {
        /// Schema file (TOML or JSON); defaults to the built-in GTFS-realtime schema
        #[arg(long, env = "FEEDCODEC_SCHEMA", value_name = "PATH")]
        schema: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = SchemaFormat::Toml)]
        format: SchemaFormat,
    },
}

impl SchemaCmd {
    pub fn run(self) -> Result<()> {
        match self {
            SchemaCmd::Show { schema, format } => cmd_show(schema, format),
        }
    }
}

fn cmd_show(path: Option<PathBuf>, format: SchemaFormat) -> Result<()> {
    let schema = load_schema(path.as_deref())?;
    let text = match format {
        SchemaFormat::Toml => schema.to_toml_string()?,
        SchemaFormat::Json => schema.to_json_string()?,
    };
    println!("{}", text.trim_end());
    Ok(())
}
