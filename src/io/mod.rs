// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Byte acquisition for feed decoding.
//!
//! Decoding only ever sees a complete buffer. Sources ([`FeedSource`])
//! produce buffers; [`spawn_fetch`] runs one in the background and returns a
//! [`PendingFeed`] whose `wait` resolves once the last byte has arrived.
//!
//! # Example
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use feedcodec::io::{decode_when_ready, spawn_fetch, MemorySource};
//! use feedcodec::schema::SchemaNode;
//! use feedcodec::ProtobufDecoder;
//!
//! let schema = SchemaNode::message("Root", [(1, SchemaNode::terminal("id"))]);
//! let pending = spawn_fetch(MemorySource::new(vec![0x0A, 0x03, b'a', b'b', b'c']));
//! let report = decode_when_ready(pending, &ProtobufDecoder::new(), &schema)?;
//! assert_eq!(report.tree["id"].as_str(), Some("abc"));
//! # Ok(())
//! # }
//! ```

pub mod pending;
pub mod source;

pub use pending::{decode_when_ready, spawn_fetch, PendingFeed};
pub use source::{parse_hex, FeedSource, FileSource, HexSource, MemorySource, ReaderSource};
