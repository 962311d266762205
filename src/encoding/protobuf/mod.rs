// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Protobuf codec module.
//!
//! Provides schema-driven protobuf wire-format decoding.

pub mod cursor;
pub mod decoder;
pub mod wire;

pub use cursor::WireCursor;
pub use decoder::{
    decode, DecodeReport, DecodeWarning, DecoderConfig, ProtobufDecoder, UnsupportedPolicy,
};
pub use wire::{Tag, WireType, MAX_VARINT_LEN};
