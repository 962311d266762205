// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Decode command - decode a feed buffer and print it as JSON.

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use tracing::debug;

use crate::common::{load_schema, write_output, Result};
use feedcodec::io::{spawn_fetch, FeedSource, FileSource, HexSource, ReaderSource};
use feedcodec::{to_json_string, DecoderConfig, JsonOptions, ProtobufDecoder, UnsupportedPolicy};

/// Decode a feed buffer.
#[derive(Args, Clone, Debug)]
pub struct DecodeCmd {
    /// Input file ('-' or omitted reads stdin)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Input is a hex dump rather than raw bytes
    #[arg(long)]
    hex: bool,

    /// Schema file (TOML or JSON); defaults to the built-in GTFS-realtime schema
    #[arg(long, env = "FEEDCODEC_SCHEMA", value_name = "PATH")]
    schema: Option<PathBuf>,

    /// Fail on fields with unsupported wire types
    #[arg(long, conflicts_with = "skip_payload")]
    strict: bool,

    /// Skip fixed-width payloads of unsupported fields
    #[arg(long)]
    skip_payload: bool,

    /// Fractional digits kept for floats
    #[arg(long, value_name = "N", conflicts_with = "full_precision")]
    precision: Option<u32>,

    /// Print floats without rounding
    #[arg(long)]
    full_precision: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Write JSON to this file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Give up if the input is not complete within this many milliseconds
    #[arg(long, value_name = "N")]
    timeout_ms: Option<u64>,
}

impl DecodeCmd {
    pub fn run(self) -> Result<()> {
        let schema = load_schema(self.schema.as_deref())?;
        let decoder = ProtobufDecoder::with_config(self.decoder_config());

        let pending = spawn_fetch(self.source());
        debug!(source = pending.source(), "waiting for feed");
        let bytes = match self.timeout_ms {
            Some(ms) => pending.wait_timeout(Duration::from_millis(ms))?,
            None => pending.wait()?,
        };

        let report = decoder.decode_report(&bytes, &schema)?;
        let json = to_json_string(&report.tree, &self.json_options())?;
        write_output(self.output.as_deref(), &json)?;

        if report.is_degraded() {
            let count = report.warnings.len();
            eprintln!("{count} warning{}", if count == 1 { "" } else { "s" });
        }
        Ok(())
    }

    fn source(&self) -> Box<dyn FeedSource> {
        let raw: Box<dyn FeedSource> = match &self.input {
            Some(path) if path.as_os_str() != "-" => Box::new(FileSource::new(path)),
            _ => Box::new(ReaderSource::stdin()),
        };
        if self.hex {
            Box::new(HexSource::new(raw))
        } else {
            raw
        }
    }

    fn decoder_config(&self) -> DecoderConfig {
        let policy = if self.strict {
            UnsupportedPolicy::Abort
        } else if self.skip_payload {
            UnsupportedPolicy::SkipPayload
        } else {
            UnsupportedPolicy::SkipTag
        };
        DecoderConfig::default().with_unsupported(policy)
    }

    fn json_options(&self) -> JsonOptions {
        let options = JsonOptions::default().with_pretty(self.pretty);
        if self.full_precision {
            options.with_float_precision(None)
        } else if let Some(digits) = self.precision {
            options.with_float_precision(Some(digits))
        } else {
            options
        }
    }
}
