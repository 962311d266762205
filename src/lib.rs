// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Feedcodec
//!
//! Schema-driven protobuf decoding for transit realtime feeds.
//!
//! A [`SchemaNode`] tree names fields by number at each nesting level; the
//! decoder walks a wire-format buffer against it and produces a
//! [`DecodedTree`]. No generated code or compiled descriptor is needed, so
//! new feed layouts only need a schema file.
//!
//! ## Architecture
//!
//! - `core/` - Error type and the decoded value tree
//! - `encoding/protobuf/` - Wire cursor and the decoder
//! - `encoding/json/` - JSON rendering of decoded trees
//! - `schema/` - Schema model, TOML/JSON loading, built-in GTFS-realtime schema
//! - `io/` - Byte sources and completion-signaled acquisition
//!
//! ## Example: Decoding a GTFS-realtime feed
//!
//! ```rust,no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use feedcodec::io::{decode_when_ready, spawn_fetch, FileSource};
//! use feedcodec::schema::gtfs_realtime;
//! use feedcodec::{to_json_string, JsonOptions, ProtobufDecoder};
//!
//! let pending = spawn_fetch(FileSource::new("vehicle_positions.pb"));
//! let schema = gtfs_realtime::feed_message();
//! let report = decode_when_ready(pending, &ProtobufDecoder::new(), schema)?;
//! println!("{}", to_json_string(&report.tree, &JsonOptions::default())?);
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

// Re-export core types for convenience
pub use core::{lookup, merge_field, CodecError, DecodedTree, DecodedValue, Result};

// Encoding/decoding
pub mod encoding;

pub use encoding::json::{to_json_string, to_json_value, JsonOptions};
pub use encoding::protobuf::{
    decode, DecodeReport, DecodeWarning, DecoderConfig, ProtobufDecoder, UnsupportedPolicy,
};

// Schema model
pub mod schema;

pub use schema::SchemaNode;

// Byte acquisition
pub mod io;

pub use io::{decode_when_ready, spawn_fetch, FeedSource, PendingFeed};

/// Decoder trait for generic decoding operations.
pub trait Decoder: Send + Sync {
    /// Decode a complete message buffer against a schema.
    fn decode(&self, data: &[u8], schema: &SchemaNode) -> Result<DecodedTree>;
}
