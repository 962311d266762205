// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for feedcodec.
//!
//! Covers the failure modes of a decode call and of the collaborators around it:
//! - Wire-level malformation (varints, truncated payloads, tags)
//! - Unsupported wire types when the decoder is configured to abort
//! - Schema loading
//! - Byte acquisition

use thiserror::Error;

/// Errors that can occur while acquiring or decoding a feed message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// A varint ran past the end of its buffer or exceeded 10 bytes / 64 bits.
    #[error("Malformed varint at position {position}: {reason}")]
    MalformedVarint {
        /// Position of the first byte of the varint
        position: usize,
        /// What went wrong
        reason: &'static str,
    },

    /// A payload declared more bytes than the buffer holds.
    #[error(
        "Truncated message: declared {declared} bytes at position {position}, \
         but only {available} bytes available"
    )]
    TruncatedMessage {
        /// Bytes the field needs
        declared: u64,
        /// Bytes left in the buffer
        available: usize,
        /// Cursor position when the payload started
        position: usize,
    },

    /// Wire type the decoder cannot interpret (raised only by the abort policy).
    #[error("Unsupported wire type {wire_type} for field {field_number} at position {position}")]
    UnsupportedWireType {
        /// Field number carried by the tag
        field_number: u32,
        /// Raw 3-bit wire type code
        wire_type: u8,
        /// Position of the tag
        position: usize,
    },

    /// Tag whose field number does not fit in 32 bits, or is zero under the
    /// abort policy.
    #[error("Invalid tag {tag:#x} at position {position}")]
    InvalidTag {
        /// Raw tag value
        tag: u64,
        /// Position of the tag
        position: usize,
    },

    /// Schema definition could not be loaded.
    #[error("Invalid schema '{schema_name}': {reason}")]
    InvalidSchema {
        /// Schema name or source
        schema_name: String,
        /// Validation error message
        reason: String,
    },

    /// I/O failure while reading feed bytes.
    #[error("I/O error: {0}")]
    Io(String),

    /// The acquisition step failed to deliver a complete buffer.
    #[error("Acquisition failed: {0}")]
    Acquisition(String),

    /// Other error
    #[error("Other error: {0}")]
    Other(String),
}

impl CodecError {
    /// Create a malformed varint error.
    pub fn malformed_varint(position: usize, reason: &'static str) -> Self {
        CodecError::MalformedVarint { position, reason }
    }

    /// Create a truncated message error.
    pub fn truncated(declared: u64, available: usize, position: usize) -> Self {
        CodecError::TruncatedMessage {
            declared,
            available,
            position,
        }
    }

    /// Create an unsupported wire type error.
    pub fn unsupported_wire_type(field_number: u32, wire_type: u8, position: usize) -> Self {
        CodecError::UnsupportedWireType {
            field_number,
            wire_type,
            position,
        }
    }

    /// Create an invalid tag error.
    pub fn invalid_tag(tag: u64, position: usize) -> Self {
        CodecError::InvalidTag { tag, position }
    }

    /// Create an invalid schema error.
    pub fn invalid_schema(schema_name: impl Into<String>, reason: impl Into<String>) -> Self {
        CodecError::InvalidSchema {
            schema_name: schema_name.into(),
            reason: reason.into(),
        }
    }

    /// Create an acquisition error.
    pub fn acquisition(message: impl Into<String>) -> Self {
        CodecError::Acquisition(message.into())
    }

    /// Whether this error came from malformed wire data, as opposed to
    /// configuration or acquisition.
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            CodecError::MalformedVarint { .. }
                | CodecError::TruncatedMessage { .. }
                | CodecError::InvalidTag { .. }
        )
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            CodecError::MalformedVarint { position, reason } => vec![
                ("position", position.to_string()),
                ("reason", reason.to_string()),
            ],
            CodecError::TruncatedMessage {
                declared,
                available,
                position,
            } => vec![
                ("declared", declared.to_string()),
                ("available", available.to_string()),
                ("position", position.to_string()),
            ],
            CodecError::UnsupportedWireType {
                field_number,
                wire_type,
                position,
            } => vec![
                ("field", field_number.to_string()),
                ("wire_type", wire_type.to_string()),
                ("position", position.to_string()),
            ],
            CodecError::InvalidTag { tag, position } => vec![
                ("tag", tag.to_string()),
                ("position", position.to_string()),
            ],
            CodecError::InvalidSchema {
                schema_name,
                reason,
            } => vec![("schema", schema_name.clone()), ("reason", reason.clone())],
            CodecError::Io(msg) | CodecError::Acquisition(msg) | CodecError::Other(msg) => {
                vec![("message", msg.clone())]
            }
        }
    }
}

impl From<std::io::Error> for CodecError {
    fn from(err: std::io::Error) -> Self {
        CodecError::Io(err.to_string())
    }
}

/// Result type for feedcodec operations.
pub type Result<T> = std::result::Result<T, CodecError>;
