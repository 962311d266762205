// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Message decoding and presentation.
//!
//! - [`protobuf`] - Schema-driven protobuf wire-format decoding
//! - [`json`] - JSON rendering of decoded trees

pub mod json;
pub mod protobuf;

pub use json::{to_json_string, to_json_value, JsonOptions};
pub use protobuf::{DecodeReport, DecodeWarning, DecoderConfig, ProtobufDecoder, UnsupportedPolicy};
