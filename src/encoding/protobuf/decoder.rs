// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Schema-driven protobuf decoder
//!
//! Decodes a protobuf wire-format buffer into a [`DecodedTree`], naming
//! fields from a hand-authored [`SchemaNode`] instead of a compiled
//! descriptor.
//!
//! ## Example
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use feedcodec::encoding::protobuf::ProtobufDecoder;
//! use feedcodec::schema::SchemaNode;
//!
//! let schema = SchemaNode::message("Root", [(1, SchemaNode::terminal("version"))]);
//! let decoder = ProtobufDecoder::new();
//! let tree = decoder.decode(&[0x08, 0x96, 0x01], &schema)?;
//! assert_eq!(tree["version"].as_u64(), Some(150));
//! # Ok(())
//! # }
//! ```

use std::fmt;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use super::cursor::WireCursor;
use super::wire::{Tag, WireType};
use crate::core::{merge_field, CodecError, DecodedTree, DecodedValue, Result as CoreResult};
use crate::schema::SchemaNode;

/// What to do with a field whose wire type the decoder cannot interpret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnsupportedPolicy {
    /// Consume the tag and resume at the next byte. The payload, if any, is
    /// then read as if it were the next field.
    #[default]
    SkipTag,
    /// Like `SkipTag`, but also skip the payload when its width is fixed by
    /// the wire type (fixed64).
    SkipPayload,
    /// Fail the decode with [`CodecError::UnsupportedWireType`], or with
    /// [`CodecError::InvalidTag`] for a reserved or oversized field number.
    Abort,
}

/// Decoder configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Handling of unsupported wire types and invalid field numbers
    pub unsupported: UnsupportedPolicy,
}

impl DecoderConfig {
    /// Set the unsupported wire type policy.
    pub fn with_unsupported(mut self, policy: UnsupportedPolicy) -> Self {
        self.unsupported = policy;
        self
    }
}

/// A degraded-decode condition that did not abort the decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeWarning {
    /// A field with an unsupported wire type was skipped.
    UnsupportedWireType {
        /// Dotted message path containing the field
        path: String,
        /// Field number carried by the tag
        field_number: u32,
        /// Raw wire type code
        wire_type: u8,
        /// Tag position within the enclosing message
        position: usize,
    },
    /// A tag carried field number 0 or one wider than 32 bits.
    ///
    /// Field number 0 is still decoded, under the key `"0"`; an oversized
    /// field number has only its tag skipped.
    InvalidTag {
        /// Dotted message path containing the field
        path: String,
        /// Raw tag value
        tag: u64,
        /// Tag position within the enclosing message
        position: usize,
    },
    /// A text payload was not valid UTF-8 and was decoded lossily.
    InvalidUtf8 {
        /// Dotted message path containing the field
        path: String,
        /// Field number carried by the tag
        field_number: u32,
        /// Payload position within the enclosing message
        position: usize,
    },
}

impl fmt::Display for DecodeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeWarning::UnsupportedWireType {
                path,
                field_number,
                wire_type,
                position,
            } => write!(
                f,
                "{path}: skipped field {field_number} with unsupported wire type {wire_type} \
                 at position {position}"
            ),
            DecodeWarning::InvalidTag {
                path,
                tag,
                position,
            } => write!(f, "{path}: invalid tag {tag:#x} at position {position}"),
            DecodeWarning::InvalidUtf8 {
                path,
                field_number,
                position,
            } => write!(
                f,
                "{path}: field {field_number} at position {position} is not valid UTF-8"
            ),
        }
    }
}

/// Decoded tree together with the warnings raised while building it.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeReport {
    /// The decoded message
    pub tree: DecodedTree,
    /// Degraded-decode conditions, in encounter order
    pub warnings: Vec<DecodeWarning>,
}

impl DecodeReport {
    /// Whether any field was skipped or decoded lossily.
    pub fn is_degraded(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Protobuf decoder for decoding wire-format data against a schema.
///
/// The decoder holds only configuration; every call owns its own cursors,
/// so one instance can decode independent buffers from many threads.
#[derive(Debug, Clone, Default)]
pub struct ProtobufDecoder {
    config: DecoderConfig,
}

impl ProtobufDecoder {
    /// Create a decoder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a decoder with the given configuration.
    pub fn with_config(config: DecoderConfig) -> Self {
        Self { config }
    }

    /// Get the decoder configuration.
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode a message, logging warnings through `tracing`.
    pub fn decode(&self, data: &[u8], schema: &SchemaNode) -> CoreResult<DecodedTree> {
        self.decode_report(data, schema).map(|report| report.tree)
    }

    /// Decode a message and return the warnings alongside the tree.
    ///
    /// Any malformation aborts the whole call, including enclosing
    /// embedded messages; no partial tree is returned.
    pub fn decode_report(&self, data: &[u8], schema: &SchemaNode) -> CoreResult<DecodeReport> {
        let mut warnings = Vec::new();
        let tree = self
            .decode_message(data, schema, schema.name(), &mut warnings)
            .inspect_err(|err| {
                debug!(
                    schema = schema.name(),
                    malformed = err.is_malformed_input(),
                    fields = ?err.log_fields(),
                    "decode failed"
                );
            })?;
        Ok(DecodeReport { tree, warnings })
    }

    /// Decode independent buffers in parallel. Results keep the input order.
    pub fn decode_batch<B>(
        &self,
        buffers: &[B],
        schema: &SchemaNode,
    ) -> Vec<CoreResult<DecodeReport>>
    where
        B: AsRef<[u8]> + Sync,
    {
        buffers
            .par_iter()
            .map(|buffer| self.decode_report(buffer.as_ref(), schema))
            .collect()
    }

    fn decode_message(
        &self,
        data: &[u8],
        schema: &SchemaNode,
        path: &str,
        warnings: &mut Vec<DecodeWarning>,
    ) -> CoreResult<DecodedTree> {
        let mut cursor = WireCursor::new(data);
        let mut tree = DecodedTree::new();

        while !cursor.is_at_end() {
            let tag_pos = cursor.position();
            let tag = match cursor.read_tag() {
                Ok(tag) => tag,
                Err(CodecError::InvalidTag { tag: raw, position }) => {
                    self.report_invalid_tag(raw, position, path, warnings)?;
                    continue;
                }
                Err(err) => return Err(err),
            };
            if tag.is_reserved() {
                self.report_invalid_tag(tag.raw(), tag_pos, path, warnings)?;
            }
            let entry = schema.child(tag.field_number);

            let value = match tag.wire_type {
                WireType::Varint => DecodedValue::Integer(cursor.read_varint()?),
                WireType::Fixed32 => DecodedValue::Float(cursor.read_fixed32()?),
                WireType::LengthDelimited => {
                    let payload_pos = cursor.position();
                    let payload = cursor.read_length_delimited()?;
                    match entry {
                        Some(node) if node.is_message() => {
                            let child_path = format!("{path}.{}", node.name());
                            debug!(
                                path = %child_path,
                                len = payload.len(),
                                "decoding embedded message"
                            );
                            let subtree =
                                self.decode_message(payload, node, &child_path, warnings)?;
                            DecodedValue::Subtree(subtree)
                        }
                        _ => DecodedValue::Text(decode_text(
                            payload,
                            path,
                            tag.field_number,
                            payload_pos,
                            warnings,
                        )),
                    }
                }
                _ => {
                    self.skip_unsupported(&mut cursor, tag, tag_pos, path, warnings)?;
                    continue;
                }
            };

            let name = match entry {
                Some(node) => node.name().to_string(),
                None => tag.field_number.to_string(),
            };
            trace!(path, field = %name, kind = value.type_name(), "decoded field");
            merge_field(&mut tree, name, value);
        }

        Ok(tree)
    }

    fn report_invalid_tag(
        &self,
        raw: u64,
        position: usize,
        path: &str,
        warnings: &mut Vec<DecodeWarning>,
    ) -> CoreResult<()> {
        if self.config.unsupported == UnsupportedPolicy::Abort {
            return Err(CodecError::invalid_tag(raw, position));
        }

        warn!(path, tag = raw, position, "invalid field number in tag");
        warnings.push(DecodeWarning::InvalidTag {
            path: path.to_string(),
            tag: raw,
            position,
        });
        Ok(())
    }

    fn skip_unsupported(
        &self,
        cursor: &mut WireCursor<'_>,
        tag: Tag,
        tag_pos: usize,
        path: &str,
        warnings: &mut Vec<DecodeWarning>,
    ) -> CoreResult<()> {
        let wire_type = tag.wire_type.code();
        match self.config.unsupported {
            UnsupportedPolicy::Abort => {
                return Err(CodecError::unsupported_wire_type(tag.field_number, wire_type, tag_pos));
            }
            UnsupportedPolicy::SkipPayload => {
                if let Some(width) = tag.wire_type.fixed_width() {
                    cursor.skip(width)?;
                }
            }
            UnsupportedPolicy::SkipTag => {}
        }

        warn!(
            path,
            field = tag.field_number,
            wire_type = %tag.wire_type,
            position = tag_pos,
            "skipping field with unsupported wire type"
        );
        warnings.push(DecodeWarning::UnsupportedWireType {
            path: path.to_string(),
            field_number: tag.field_number,
            wire_type,
            position: tag_pos,
        });
        Ok(())
    }
}

fn decode_text(
    payload: &[u8],
    path: &str,
    field_number: u32,
    position: usize,
    warnings: &mut Vec<DecodeWarning>,
) -> String {
    match std::str::from_utf8(payload) {
        Ok(text) => text.to_owned(),
        Err(_) => {
            warn!(path, field = field_number, position, "text field is not valid UTF-8");
            warnings.push(DecodeWarning::InvalidUtf8 {
                path: path.to_string(),
                field_number,
                position,
            });
            String::from_utf8_lossy(payload).into_owned()
        }
    }
}

/// Decode a message with the default configuration.
pub fn decode(data: &[u8], schema: &SchemaNode) -> CoreResult<DecodedTree> {
    ProtobufDecoder::new().decode(data, schema)
}

impl crate::Decoder for ProtobufDecoder {
    fn decode(&self, data: &[u8], schema: &SchemaNode) -> CoreResult<DecodedTree> {
        ProtobufDecoder::decode(self, data, schema)
    }
}
