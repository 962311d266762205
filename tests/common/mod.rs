// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for integration tests.

#![allow(dead_code)]

use prost::encoding::{encode_key, encode_varint, WireType};

use feedcodec::schema::SchemaNode;

// ============================================================================
// Wire Builders
// ============================================================================

/// Encode a varint field.
pub fn varint_field(field: u32, value: u64) -> Vec<u8> {
    let mut buf = Vec::new();
    encode_key(field, WireType::Varint, &mut buf);
    encode_varint(value, &mut buf);
    buf
}

/// Encode a fixed32 float field.
pub fn float_field(field: u32, value: f32) -> Vec<u8> {
    let mut buf = Vec::new();
    encode_key(field, WireType::ThirtyTwoBit, &mut buf);
    buf.extend_from_slice(&value.to_le_bytes());
    buf
}

/// Encode a length-delimited field.
pub fn bytes_field(field: u32, payload: &[u8]) -> Vec<u8> {
    let mut buf = Vec::new();
    encode_key(field, WireType::LengthDelimited, &mut buf);
    encode_varint(payload.len() as u64, &mut buf);
    buf.extend_from_slice(payload);
    buf
}

/// Encode a bare varint.
pub fn varint(value: u64) -> Vec<u8> {
    let mut buf = Vec::new();
    encode_varint(value, &mut buf);
    buf
}

/// Concatenate encoded fields into one message.
pub fn message(fields: &[Vec<u8>]) -> Vec<u8> {
    fields.concat()
}

// ============================================================================
// Schemas
// ============================================================================

/// Root message schema from `(field_number, child)` pairs.
pub fn root(fields: impl IntoIterator<Item = (u32, SchemaNode)>) -> SchemaNode {
    SchemaNode::message("Root", fields)
}

/// Shorthand for a terminal node.
pub fn t(name: &str) -> SchemaNode {
    SchemaNode::terminal(name)
}
